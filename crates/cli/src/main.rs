#![deny(unsafe_code)]
//! CLI for the particle field.
//!
//! Subcommands:
//! - `render` — simulate headlessly for N ticks and write a PNG
//! - `schema` — print every tunable with its default and range

mod error;

use clap::{Parser, Subcommand};
use error::CliError;
use log::{debug, info};
use particle_field_core::{Bounds, DVec2, Srgb, Xorshift64};
use particle_field_raster::Raster;
use particle_field_sim::{init_field, render, step, FieldConfig, FrameStats};
use std::path::PathBuf;
use std::process;

#[derive(Parser)]
#[command(name = "particle-field", about = "Particle network background renderer")]
struct Cli {
    /// Output as JSON instead of human-readable text.
    #[arg(long, global = true)]
    json: bool,

    /// Increase log verbosity (-v info, -vv debug). `RUST_LOG` also works.
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    verbose: u8,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Simulate the field for N ticks and write a PNG snapshot.
    Render {
        /// Viewport width in CSS pixels.
        #[arg(short = 'W', long, default_value_t = 800.0)]
        width: f64,

        /// Viewport height in CSS pixels.
        #[arg(short = 'H', long, default_value_t = 600.0)]
        height: f64,

        /// Number of ticks to simulate before the snapshot.
        #[arg(short, long, default_value_t = 240)]
        steps: usize,

        /// Simulated frame rate; each tick advances 1/fps seconds.
        #[arg(long, default_value_t = 60.0)]
        fps: f64,

        /// PRNG seed for deterministic output.
        #[arg(long, default_value_t = 42)]
        seed: u64,

        /// Hold the pointer at `X,Y` for the whole run.
        #[arg(long, value_parser = parse_pointer)]
        pointer: Option<DVec2>,

        /// Background color as hex.
        #[arg(long, default_value = "#0a0f1a")]
        background: String,

        /// Output file path.
        #[arg(short, long, default_value = "particle-field.png")]
        output: PathBuf,

        /// Field parameters as a JSON object (see `schema`).
        #[arg(long, default_value = "{}")]
        params: String,
    },
    /// Print the field parameter schema.
    Schema,
}

fn parse_pointer(s: &str) -> Result<DVec2, String> {
    let (x, y) = s
        .split_once(',')
        .ok_or_else(|| format!("expected X,Y, got '{s}'"))?;
    let parse = |v: &str| {
        v.trim()
            .parse::<f64>()
            .map_err(|e| format!("bad coordinate '{v}': {e}"))
    };
    Ok(DVec2::new(parse(x)?, parse(y)?))
}

fn init_logging(verbose: u8) {
    let default = match verbose {
        0 => "warn",
        1 => "info",
        _ => "debug",
    };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(default)).init();
}

fn run(cli: Cli) -> Result<(), CliError> {
    match cli.command {
        Command::Schema => {
            let schema = FieldConfig::param_schema();
            if cli.json {
                println!("{}", serde_json::to_string_pretty(&schema)?);
            } else if let Some(entries) = schema.as_object() {
                for (name, entry) in entries {
                    println!(
                        "{name:<20} {:<8} default {:<10} {}",
                        entry["type"].as_str().unwrap_or("?"),
                        entry["default"].to_string(),
                        entry["description"].as_str().unwrap_or(""),
                    );
                }
            }
        }
        Command::Render {
            width,
            height,
            steps,
            fps,
            seed,
            pointer,
            background,
            output,
            params,
        } => {
            let params: serde_json::Value = serde_json::from_str(&params)
                .map_err(|e| CliError::Input(format!("invalid --params JSON: {e}")))?;
            let config = FieldConfig::from_json(&params)?;
            let background = Srgb::from_hex(&background)
                .map_err(|e| CliError::Input(format!("invalid --background: {e}")))?;
            if !(fps.is_finite() && fps > 0.0) {
                return Err(CliError::Input(format!("--fps must be positive, got {fps}")));
            }

            let bounds = Bounds::new(width, height)?;
            let mut raster = Raster::new(bounds, background)?;
            let mut rng = Xorshift64::new(seed);
            let mut field = init_field(bounds, config, &mut rng).with_pointer(pointer);
            info!(
                "simulating {} particles for {steps} ticks",
                field.particles.len()
            );

            let dt = 1.0 / fps;
            for _ in 0..steps {
                field = step(&field, dt);
            }
            debug!("simulated {:.2}s of motion", steps as f64 * dt);

            let FrameStats { edges, particles } = render(&mut raster, &field);
            particle_field_raster::snapshot::write_png(&raster, &output)?;

            if cli.json {
                let info = serde_json::json!({
                    "width": width,
                    "height": height,
                    "steps": steps,
                    "seed": seed,
                    "particles": particles,
                    "edges": edges,
                    "output": output.display().to_string(),
                });
                println!("{}", serde_json::to_string_pretty(&info)?);
            } else {
                eprintln!(
                    "rendered {particles} particles, {edges} edges ({width}x{height}, {steps} ticks, seed {seed}) -> {}",
                    output.display()
                );
            }
        }
    }

    Ok(())
}

fn main() {
    let cli = Cli::parse();
    init_logging(cli.verbose);
    let json_mode = cli.json;
    if let Err(e) = run(cli) {
        if json_mode {
            let j = serde_json::json!({"error": e.to_string(), "exit_code": e.exit_code()});
            eprintln!("{}", serde_json::to_string_pretty(&j).unwrap_or_default());
        } else {
            eprintln!("error: {e}");
        }
        process::exit(e.exit_code());
    }
}

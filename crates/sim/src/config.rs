//! Tunables for the particle field.
//!
//! Every value here is a visual tuning default rather than a contract. The
//! only structural constraints are checked by [`FieldConfig::validate`].

use particle_field_core::error::FieldError;
use particle_field_core::params::{ensure_in_range, param_color, param_f64, param_usize};
use particle_field_core::Srgb;
use serde_json::{json, Value};

/// Square pixels of viewport per particle.
const DEFAULT_AREA_PER_PARTICLE: f64 = 9000.0;
const DEFAULT_MIN_COUNT: usize = 24;
const DEFAULT_MAX_COUNT: usize = 120;
/// Hard ceiling on `max_count`; the edge pass is quadratic in the count.
const COUNT_CEILING: usize = 600;
/// Relative count change above which a resize re-seeds the field.
const DEFAULT_RESIZE_TOLERANCE: f64 = 0.2;
const DEFAULT_MIN_SPEED: f64 = 8.0;
const DEFAULT_MAX_SPEED: f64 = 36.0;
const DEFAULT_MIN_RADIUS: f64 = 1.0;
const DEFAULT_MAX_RADIUS: f64 = 2.4;
const DEFAULT_MIN_OPACITY: f64 = 0.35;
const DEFAULT_MAX_OPACITY: f64 = 0.85;
const DEFAULT_INTERACTION_RADIUS: f64 = 140.0;
/// Peak pointer acceleration in px/s^2, reached at zero distance.
const DEFAULT_POINTER_STRENGTH: f64 = 900.0;
/// Floor applied to distances before dividing by them.
const DEFAULT_MIN_DISTANCE: f64 = 0.5;
/// Longest simulated interval per tick, in seconds.
const DEFAULT_MAX_DT: f64 = 0.1;
const DEFAULT_EDGE_THRESHOLD: f64 = 130.0;
const DEFAULT_EDGE_WIDTH: f64 = 1.0;
const DEFAULT_BASE_LINE_OPACITY: f64 = 0.35;
/// Page accent (`hsl(180, 100%, 50%)`).
const DEFAULT_ACCENT: &str = "#00ffff";

/// Simulation and rendering parameters for one field.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FieldConfig {
    pub area_per_particle: f64,
    pub min_count: usize,
    pub max_count: usize,
    pub resize_tolerance: f64,
    pub min_speed: f64,
    pub max_speed: f64,
    pub min_radius: f64,
    pub max_radius: f64,
    pub min_opacity: f64,
    pub max_opacity: f64,
    pub interaction_radius: f64,
    pub pointer_strength: f64,
    pub min_distance: f64,
    pub max_dt: f64,
    pub edge_threshold: f64,
    pub edge_width: f64,
    pub base_line_opacity: f64,
    pub edge_color: Srgb,
    pub particle_color: Srgb,
}

impl Default for FieldConfig {
    fn default() -> Self {
        let accent = accent();
        Self {
            area_per_particle: DEFAULT_AREA_PER_PARTICLE,
            min_count: DEFAULT_MIN_COUNT,
            max_count: DEFAULT_MAX_COUNT,
            resize_tolerance: DEFAULT_RESIZE_TOLERANCE,
            min_speed: DEFAULT_MIN_SPEED,
            max_speed: DEFAULT_MAX_SPEED,
            min_radius: DEFAULT_MIN_RADIUS,
            max_radius: DEFAULT_MAX_RADIUS,
            min_opacity: DEFAULT_MIN_OPACITY,
            max_opacity: DEFAULT_MAX_OPACITY,
            interaction_radius: DEFAULT_INTERACTION_RADIUS,
            pointer_strength: DEFAULT_POINTER_STRENGTH,
            min_distance: DEFAULT_MIN_DISTANCE,
            max_dt: DEFAULT_MAX_DT,
            edge_threshold: DEFAULT_EDGE_THRESHOLD,
            edge_width: DEFAULT_EDGE_WIDTH,
            base_line_opacity: DEFAULT_BASE_LINE_OPACITY,
            edge_color: accent,
            particle_color: accent,
        }
    }
}

fn accent() -> Srgb {
    Srgb {
        r: 0.0,
        g: 1.0,
        b: 1.0,
    }
}

impl FieldConfig {
    /// Reads a configuration from a JSON object, falling back to defaults
    /// for missing keys, then validates it.
    pub fn from_json(params: &Value) -> Result<Self, FieldError> {
        let d = Self::default();
        let config = Self {
            area_per_particle: param_f64(params, "area_per_particle", d.area_per_particle),
            min_count: param_usize(params, "min_count", d.min_count),
            max_count: param_usize(params, "max_count", d.max_count),
            resize_tolerance: param_f64(params, "resize_tolerance", d.resize_tolerance),
            min_speed: param_f64(params, "min_speed", d.min_speed),
            max_speed: param_f64(params, "max_speed", d.max_speed),
            min_radius: param_f64(params, "min_radius", d.min_radius),
            max_radius: param_f64(params, "max_radius", d.max_radius),
            min_opacity: param_f64(params, "min_opacity", d.min_opacity),
            max_opacity: param_f64(params, "max_opacity", d.max_opacity),
            interaction_radius: param_f64(params, "interaction_radius", d.interaction_radius),
            pointer_strength: param_f64(params, "pointer_strength", d.pointer_strength),
            min_distance: param_f64(params, "min_distance", d.min_distance),
            max_dt: param_f64(params, "max_dt", d.max_dt),
            edge_threshold: param_f64(params, "edge_threshold", d.edge_threshold),
            edge_width: param_f64(params, "edge_width", d.edge_width),
            base_line_opacity: param_f64(params, "base_line_opacity", d.base_line_opacity),
            edge_color: param_color(params, "edge_color", d.edge_color)?,
            particle_color: param_color(params, "particle_color", d.particle_color)?,
        };
        config.validate()?;
        Ok(config)
    }

    /// Checks the structural constraints the simulation relies on.
    pub fn validate(&self) -> Result<(), FieldError> {
        ensure_in_range("area_per_particle", self.area_per_particle, 1.0, 1e9)?;
        if self.min_count > self.max_count {
            return Err(out_of_range("min_count", "must not exceed max_count"));
        }
        if self.max_count > COUNT_CEILING {
            return Err(out_of_range(
                "max_count",
                &format!("must not exceed {COUNT_CEILING}"),
            ));
        }
        ensure_in_range("resize_tolerance", self.resize_tolerance, 0.0, 10.0)?;
        ensure_in_range("max_speed", self.max_speed, f64::MIN_POSITIVE, 1e5)?;
        ensure_in_range("min_speed", self.min_speed, 0.0, self.max_speed)?;
        ensure_in_range("max_radius", self.max_radius, f64::MIN_POSITIVE, 1e3)?;
        ensure_in_range("min_radius", self.min_radius, f64::MIN_POSITIVE, self.max_radius)?;
        ensure_in_range("max_opacity", self.max_opacity, 0.0, 1.0)?;
        ensure_in_range("min_opacity", self.min_opacity, 0.0, self.max_opacity)?;
        ensure_in_range("interaction_radius", self.interaction_radius, f64::MIN_POSITIVE, 1e5)?;
        ensure_in_range("pointer_strength", self.pointer_strength, 0.0, 1e6)?;
        ensure_in_range("min_distance", self.min_distance, f64::MIN_POSITIVE, 1e3)?;
        ensure_in_range("max_dt", self.max_dt, f64::MIN_POSITIVE, 10.0)?;
        ensure_in_range("edge_threshold", self.edge_threshold, f64::MIN_POSITIVE, 1e5)?;
        ensure_in_range("edge_width", self.edge_width, 0.0, 100.0)?;
        ensure_in_range("base_line_opacity", self.base_line_opacity, 0.0, 1.0)?;
        Ok(())
    }

    /// Current values as a JSON object, keyed like [`FieldConfig::from_json`].
    pub fn params(&self) -> Value {
        json!({
            "area_per_particle": self.area_per_particle,
            "min_count": self.min_count,
            "max_count": self.max_count,
            "resize_tolerance": self.resize_tolerance,
            "min_speed": self.min_speed,
            "max_speed": self.max_speed,
            "min_radius": self.min_radius,
            "max_radius": self.max_radius,
            "min_opacity": self.min_opacity,
            "max_opacity": self.max_opacity,
            "interaction_radius": self.interaction_radius,
            "pointer_strength": self.pointer_strength,
            "min_distance": self.min_distance,
            "max_dt": self.max_dt,
            "edge_threshold": self.edge_threshold,
            "edge_width": self.edge_width,
            "base_line_opacity": self.base_line_opacity,
            "edge_color": self.edge_color.to_hex(),
            "particle_color": self.particle_color.to_hex(),
        })
    }

    /// Schema describing every tunable: type, default, range, description.
    pub fn param_schema() -> Value {
        fn number(default: f64, min: f64, max: f64, description: &str) -> Value {
            json!({"type": "number", "default": default, "min": min, "max": max, "description": description})
        }
        fn integer(default: usize, min: usize, max: usize, description: &str) -> Value {
            json!({"type": "integer", "default": default, "min": min, "max": max, "description": description})
        }
        fn color(default: &str, description: &str) -> Value {
            json!({"type": "color", "default": default, "description": description})
        }

        json!({
            "area_per_particle": number(DEFAULT_AREA_PER_PARTICLE, 1.0, 1e9, "Viewport area (px^2) per particle"),
            "min_count": integer(DEFAULT_MIN_COUNT, 0, COUNT_CEILING, "Fewest particles on small viewports"),
            "max_count": integer(DEFAULT_MAX_COUNT, 0, COUNT_CEILING, "Most particles on large viewports"),
            "resize_tolerance": number(DEFAULT_RESIZE_TOLERANCE, 0.0, 10.0, "Relative count change that re-seeds the field on resize"),
            "min_speed": number(DEFAULT_MIN_SPEED, 0.0, 1e5, "Slowest initial speed (px/s)"),
            "max_speed": number(DEFAULT_MAX_SPEED, 0.0, 1e5, "Fastest initial speed and pointer speed cap (px/s)"),
            "min_radius": number(DEFAULT_MIN_RADIUS, 0.0, 1e3, "Smallest dot radius (px)"),
            "max_radius": number(DEFAULT_MAX_RADIUS, 0.0, 1e3, "Largest dot radius (px)"),
            "min_opacity": number(DEFAULT_MIN_OPACITY, 0.0, 1.0, "Faintest dot opacity"),
            "max_opacity": number(DEFAULT_MAX_OPACITY, 0.0, 1.0, "Strongest dot opacity"),
            "interaction_radius": number(DEFAULT_INTERACTION_RADIUS, 0.0, 1e5, "Pointer push reach (px)"),
            "pointer_strength": number(DEFAULT_POINTER_STRENGTH, 0.0, 1e6, "Peak pointer push (px/s^2)"),
            "min_distance": number(DEFAULT_MIN_DISTANCE, 0.0, 1e3, "Distance floor before division (px)"),
            "max_dt": number(DEFAULT_MAX_DT, 0.0, 10.0, "Longest simulated interval per tick (s)"),
            "edge_threshold": number(DEFAULT_EDGE_THRESHOLD, 0.0, 1e5, "Distance below which particles are linked (px)"),
            "edge_width": number(DEFAULT_EDGE_WIDTH, 0.0, 100.0, "Edge stroke width (px)"),
            "base_line_opacity": number(DEFAULT_BASE_LINE_OPACITY, 0.0, 1.0, "Edge opacity at zero distance"),
            "edge_color": color(DEFAULT_ACCENT, "Edge color"),
            "particle_color": color(DEFAULT_ACCENT, "Dot color"),
        })
    }
}

fn out_of_range(name: &str, reason: &str) -> FieldError {
    FieldError::ParamOutOfRange {
        name: name.to_string(),
        reason: reason.to_string(),
    }
}

//! Simulation Step: advances a [`FieldState`] by one tick.
//!
//! Integration is explicit Euler, followed by elastic reflection at the
//! viewport edges and then the pointer push. The step is a pure function of
//! its inputs; all randomness lives in field creation.

use crate::config::FieldConfig;
use crate::particle::Particle;
use crate::state::FieldState;
use glam::DVec2;
use particle_field_core::Bounds;

/// Clamps an elapsed interval to `[0, max_dt]`.
///
/// A backgrounded tab resumes with a huge gap; non-finite or negative
/// intervals simulate nothing.
pub fn clamp_dt(dt_seconds: f64, max_dt: f64) -> f64 {
    if dt_seconds.is_finite() {
        dt_seconds.clamp(0.0, max_dt)
    } else {
        0.0
    }
}

/// Produces the next field state after `dt_seconds`.
pub fn step(state: &FieldState, dt_seconds: f64) -> FieldState {
    let config = &state.config;
    let dt = clamp_dt(dt_seconds, config.max_dt);
    let particles = state
        .particles
        .iter()
        .map(|p| {
            let mut next = *p;
            next.position += next.velocity * dt;
            reflect(&mut next, state.bounds);
            if let Some(pointer) = state.pointer {
                let push = pointer_push(next.position - pointer, config, dt);
                if push != DVec2::ZERO {
                    next.velocity = (next.velocity + push).clamp_length_max(config.max_speed);
                }
            }
            next
        })
        .collect();

    FieldState {
        particles,
        bounds: state.bounds,
        pointer: state.pointer,
        config: state.config,
    }
}

/// Clamps the particle onto the edge it crossed and points the matching
/// velocity component back inward. Speed is preserved.
fn reflect(p: &mut Particle, bounds: Bounds) {
    if p.position.x <= 0.0 {
        p.position.x = 0.0;
        p.velocity.x = p.velocity.x.abs();
    } else if p.position.x >= bounds.width() {
        p.position.x = bounds.width();
        p.velocity.x = -p.velocity.x.abs();
    }
    if p.position.y <= 0.0 {
        p.position.y = 0.0;
        p.velocity.y = p.velocity.y.abs();
    } else if p.position.y >= bounds.height() {
        p.position.y = bounds.height();
        p.velocity.y = -p.velocity.y.abs();
    }
}

/// Velocity change for a particle at `offset` from the pointer.
///
/// Zero at and beyond `interaction_radius`, rising linearly to
/// `pointer_strength * dt` as the distance shrinks. Distances are floored at
/// `min_distance`; a particle sitting on the pointer is pushed along +x.
pub fn pointer_push(offset: DVec2, config: &FieldConfig, dt: f64) -> DVec2 {
    let distance = offset.length();
    if distance.is_nan() || distance >= config.interaction_radius {
        return DVec2::ZERO;
    }
    let floored = distance.max(config.min_distance);
    let direction = if distance < config.min_distance {
        DVec2::X
    } else {
        offset / floored
    };
    let falloff = (1.0 - floored / config.interaction_radius).max(0.0);
    direction * (config.pointer_strength * falloff * dt)
}

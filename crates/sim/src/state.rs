//! Field State: the complete simulation snapshot at one instant.
//!
//! A [`FieldState`] is created by [`init_field`], advanced by
//! [`crate::step::step`], and adapted to new viewport sizes by
//! [`resize_field`]. Each is a plain value owned by exactly one controller.

use crate::config::FieldConfig;
use crate::particle::Particle;
use glam::DVec2;
use log::debug;
use particle_field_core::{Bounds, Xorshift64};

/// Particles, viewport bounds, pointer and parameters of a running field.
#[derive(Debug, Clone, PartialEq)]
pub struct FieldState {
    pub particles: Vec<Particle>,
    pub bounds: Bounds,
    /// Last pointer position inside `bounds`, or `None` when the pointer is
    /// outside the surface.
    pub pointer: Option<DVec2>,
    pub config: FieldConfig,
}

impl FieldState {
    /// Records a pointer position, clamped into the current bounds.
    pub fn with_pointer(mut self, pointer: Option<DVec2>) -> Self {
        self.pointer = pointer.map(|p| self.bounds.clamp(p));
        self
    }
}

/// Number of particles for a viewport:
/// `clamp(round(area / area_per_particle), min_count, max_count)`.
pub fn particle_count(bounds: Bounds, config: &FieldConfig) -> usize {
    let raw = (bounds.area() / config.area_per_particle).round();
    // Saturating float-to-int cast; the clamp below bounds it anyway.
    (raw as usize).clamp(config.min_count, config.max_count)
}

/// Seeds a fresh field for `bounds` with no pointer.
pub fn init_field(bounds: Bounds, config: FieldConfig, rng: &mut Xorshift64) -> FieldState {
    let count = particle_count(bounds, &config);
    let particles = (0..count)
        .map(|_| Particle::random(bounds, &config, rng))
        .collect();
    debug!(
        "seeded {count} particles for {}x{}",
        bounds.width(),
        bounds.height()
    );
    FieldState {
        particles,
        bounds,
        pointer: None,
        config,
    }
}

/// Adapts `state` to `new_bounds`.
///
/// When the target count moves by more than `resize_tolerance` (relative to
/// the current count) the field is re-seeded; otherwise positions and the
/// pointer are rescaled per axis and velocities are kept, so small changes
/// like a scroll bar appearing do not make particles pop.
pub fn resize_field(state: &FieldState, new_bounds: Bounds, rng: &mut Xorshift64) -> FieldState {
    let current = state.particles.len();
    let target = particle_count(new_bounds, &state.config);
    let allowed = state.config.resize_tolerance * current.max(1) as f64;
    if current.abs_diff(target) as f64 > allowed {
        debug!("particle target moved {current} -> {target}, re-seeding");
        return init_field(new_bounds, state.config, rng).with_pointer(state.pointer);
    }

    let scale = new_bounds.size() / state.bounds.size();
    let particles = state
        .particles
        .iter()
        .map(|p| Particle {
            position: new_bounds.clamp(p.position * scale),
            ..*p
        })
        .collect();
    FieldState {
        particles,
        bounds: new_bounds,
        pointer: state.pointer.map(|p| new_bounds.clamp(p * scale)),
        config: state.config,
    }
}

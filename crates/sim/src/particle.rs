//! One node of the particle network.

use crate::config::FieldConfig;
use glam::DVec2;
use particle_field_core::{Bounds, Xorshift64};

/// Position, velocity and fixed rendering attributes of a single particle.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Particle {
    pub position: DVec2,
    pub velocity: DVec2,
    pub radius: f64,
    pub base_opacity: f64,
}

impl Particle {
    /// Creates a particle at a uniformly random point inside `bounds`,
    /// heading in a random direction at a speed in
    /// `[min_speed, max_speed)`.
    pub fn random(bounds: Bounds, config: &FieldConfig, rng: &mut Xorshift64) -> Self {
        let position = DVec2::new(
            rng.next_range(0.0, bounds.width()),
            rng.next_range(0.0, bounds.height()),
        );
        let speed = rng.next_range(config.min_speed, config.max_speed);
        Self {
            position,
            velocity: rng.next_direction() * speed,
            radius: rng.next_range(config.min_radius, config.max_radius),
            base_opacity: rng.next_range(config.min_opacity, config.max_opacity),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn random_particle_respects_config_ranges() {
        let config = FieldConfig::default();
        let bounds = Bounds::new(320.0, 200.0).unwrap();
        let mut rng = Xorshift64::new(42);
        for _ in 0..500 {
            let p = Particle::random(bounds, &config, &mut rng);
            assert!(bounds.contains(p.position));
            let speed = p.velocity.length();
            assert!(speed >= config.min_speed - 1e-9 && speed <= config.max_speed + 1e-9);
            assert!((config.min_radius..=config.max_radius).contains(&p.radius));
            assert!((config.min_opacity..=config.max_opacity).contains(&p.base_opacity));
        }
    }

    #[test]
    fn same_seed_gives_same_particle() {
        let config = FieldConfig::default();
        let bounds = Bounds::new(800.0, 600.0).unwrap();
        let a = Particle::random(bounds, &config, &mut Xorshift64::new(9));
        let b = Particle::random(bounds, &config, &mut Xorshift64::new(9));
        assert_eq!(a, b);
    }
}

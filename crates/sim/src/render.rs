//! Renderer: paints a [`FieldState`] onto a [`Surface`].
//!
//! Edges go first so dots sit on top of the lines that meet them. The edge
//! pass checks every unordered pair, which stays cheap because the particle
//! count is capped by `max_count`.

use crate::config::FieldConfig;
use crate::state::FieldState;
use particle_field_core::Surface;

/// What one call to [`render`] drew.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct FrameStats {
    pub edges: usize,
    pub particles: usize,
}

/// Edge opacity for two particles `distance` apart.
///
/// Falls off linearly from `base_line_opacity` at zero distance to exactly
/// zero at `edge_threshold`, and stays zero beyond it.
pub fn edge_opacity(distance: f64, config: &FieldConfig) -> f64 {
    if distance.is_nan() || distance >= config.edge_threshold {
        return 0.0;
    }
    let falloff = 1.0 - distance.max(0.0) / config.edge_threshold;
    (config.base_line_opacity * falloff).clamp(0.0, config.base_line_opacity)
}

/// Clears `surface` and draws the edges and dots of `state`.
pub fn render<S: Surface + ?Sized>(surface: &mut S, state: &FieldState) -> FrameStats {
    let config = &state.config;
    let particles = &state.particles;
    let threshold_sq = config.edge_threshold * config.edge_threshold;
    let mut stats = FrameStats::default();

    surface.clear();

    for (i, a) in particles.iter().enumerate() {
        for b in &particles[i + 1..] {
            let distance_sq = a.position.distance_squared(b.position);
            if distance_sq >= threshold_sq {
                continue;
            }
            let alpha = edge_opacity(distance_sq.sqrt(), config);
            if alpha > 0.0 {
                surface.stroke_line(
                    a.position,
                    b.position,
                    config.edge_width,
                    config.edge_color,
                    alpha,
                );
                stats.edges += 1;
            }
        }
    }

    for p in particles {
        surface.fill_circle(p.position, p.radius, config.particle_color, p.base_opacity);
    }
    stats.particles = particles.len();
    stats
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use crate::particle::Particle;
    use glam::DVec2;
    use particle_field_core::{Bounds, Srgb};

    /// Draw call captured by [`RecordingSurface`].
    #[derive(Debug, Clone, PartialEq)]
    pub(crate) enum Op {
        Resize(Bounds),
        Clear,
        Line { from: DVec2, to: DVec2, alpha: f64 },
        Circle { center: DVec2, radius: f64, alpha: f64 },
    }

    /// Surface that records draw calls instead of painting.
    #[derive(Debug, Default)]
    pub(crate) struct RecordingSurface {
        pub ops: Vec<Op>,
    }

    impl Surface for RecordingSurface {
        fn resize(&mut self, bounds: Bounds) {
            self.ops.push(Op::Resize(bounds));
        }

        fn clear(&mut self) {
            self.ops.push(Op::Clear);
        }

        fn stroke_line(&mut self, from: DVec2, to: DVec2, _width: f64, _color: Srgb, alpha: f64) {
            self.ops.push(Op::Line { from, to, alpha });
        }

        fn fill_circle(&mut self, center: DVec2, radius: f64, _color: Srgb, alpha: f64) {
            self.ops.push(Op::Circle {
                center,
                radius,
                alpha,
            });
        }
    }

    fn state_with(points: &[(f64, f64)]) -> FieldState {
        FieldState {
            particles: points
                .iter()
                .map(|&(x, y)| Particle {
                    position: DVec2::new(x, y),
                    velocity: DVec2::ZERO,
                    radius: 2.0,
                    base_opacity: 0.6,
                })
                .collect(),
            bounds: Bounds::new(1000.0, 1000.0).unwrap(),
            pointer: None,
            config: FieldConfig::default(),
        }
    }

    #[test]
    fn edge_opacity_hits_base_at_zero_and_zero_at_threshold() {
        let config = FieldConfig::default();
        assert_eq!(edge_opacity(0.0, &config), config.base_line_opacity);
        assert_eq!(edge_opacity(config.edge_threshold, &config), 0.0);
        assert_eq!(edge_opacity(config.edge_threshold * 3.0, &config), 0.0);
        let half = edge_opacity(config.edge_threshold / 2.0, &config);
        assert!((half - config.base_line_opacity / 2.0).abs() < 1e-12);
    }

    #[test]
    fn render_clears_then_draws_edges_then_dots() {
        let state = state_with(&[(100.0, 100.0), (150.0, 100.0), (900.0, 900.0)]);
        let mut surface = RecordingSurface::default();
        let stats = render(&mut surface, &state);

        assert_eq!(stats, FrameStats { edges: 1, particles: 3 });
        assert_eq!(surface.ops[0], Op::Clear);
        assert!(matches!(surface.ops[1], Op::Line { .. }));
        assert!(surface.ops[2..]
            .iter()
            .all(|op| matches!(op, Op::Circle { .. })));
        assert_eq!(surface.ops.len(), 1 + 1 + 3);
    }

    #[test]
    fn edge_alpha_uses_linear_falloff() {
        let state = state_with(&[(0.0, 0.0), (65.0, 0.0)]);
        let mut surface = RecordingSurface::default();
        render(&mut surface, &state);
        let Op::Line { alpha, .. } = surface.ops[1] else {
            panic!("expected a line, got {:?}", surface.ops[1]);
        };
        let expected = state.config.base_line_opacity * (1.0 - 65.0 / state.config.edge_threshold);
        assert!((alpha - expected).abs() < 1e-12);
    }

    #[test]
    fn coincident_particles_get_full_opacity_edge() {
        let state = state_with(&[(10.0, 10.0), (10.0, 10.0)]);
        let mut surface = RecordingSurface::default();
        let stats = render(&mut surface, &state);
        assert_eq!(stats.edges, 1);
        assert!(surface.ops.contains(&Op::Line {
            from: DVec2::new(10.0, 10.0),
            to: DVec2::new(10.0, 10.0),
            alpha: state.config.base_line_opacity,
        }));
    }

    #[test]
    fn pair_exactly_at_threshold_draws_no_edge() {
        let config = FieldConfig::default();
        let state = state_with(&[(0.0, 0.0), (config.edge_threshold, 0.0)]);
        let mut surface = RecordingSurface::default();
        assert_eq!(render(&mut surface, &state).edges, 0);
    }

    #[test]
    fn dots_use_particle_radius_and_base_opacity() {
        let state = state_with(&[(500.0, 500.0)]);
        let mut surface = RecordingSurface::default();
        render(&mut surface, &state);
        assert_eq!(
            surface.ops[1],
            Op::Circle {
                center: DVec2::new(500.0, 500.0),
                radius: 2.0,
                alpha: 0.6
            }
        );
    }

    #[test]
    fn render_does_not_touch_state() {
        let state = state_with(&[(1.0, 2.0), (3.0, 4.0)]);
        let before = state.clone();
        render(&mut RecordingSurface::default(), &state);
        assert_eq!(state, before);
    }

    mod proptests {
        use super::*;
        use proptest::prelude::*;

        proptest! {
            #[test]
            fn edge_opacity_is_monotone_non_increasing(d1 in 0.0_f64..400.0, d2 in 0.0_f64..400.0) {
                let config = FieldConfig::default();
                let (near, far) = if d1 <= d2 { (d1, d2) } else { (d2, d1) };
                prop_assert!(edge_opacity(near, &config) >= edge_opacity(far, &config));
            }

            #[test]
            fn edge_opacity_stays_within_base(d in 0.0_f64..1000.0) {
                let config = FieldConfig::default();
                let a = edge_opacity(d, &config);
                prop_assert!((0.0..=config.base_line_opacity).contains(&a));
            }
        }
    }
}

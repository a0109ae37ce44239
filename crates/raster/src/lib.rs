#![deny(unsafe_code)]
//! CPU raster surface for headless particle field rendering.
//!
//! [`Raster`] implements [`Surface`] over an in-memory sRGB buffer so the
//! same renderer that paints the browser canvas can produce snapshots for
//! the CLI and for tests. Compositing is source-over in sRGB space, matching
//! canvas 2D defaults.

pub mod pixel;

#[cfg(feature = "png")]
pub mod snapshot;

use glam::DVec2;
use log::warn;
use particle_field_core::{Bounds, FieldError, Srgb, Surface};

/// An RGB pixel buffer with an opaque background.
#[derive(Debug, Clone)]
pub struct Raster {
    width: usize,
    height: usize,
    background: Srgb,
    pixels: Vec<Srgb>,
}

impl Raster {
    /// Creates a raster covering `bounds`, rounded up to whole pixels.
    ///
    /// Returns `FieldError::InvalidBounds` when the pixel buffer would not
    /// fit in memory addressing.
    pub fn new(bounds: Bounds, background: Srgb) -> Result<Self, FieldError> {
        let (width, height, len) = pixel_size(bounds)?;
        Ok(Self {
            width,
            height,
            background,
            pixels: vec![background; len],
        })
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    pub fn background(&self) -> Srgb {
        self.background
    }

    /// Row-major pixels, `width * height` long.
    pub fn pixels(&self) -> &[Srgb] {
        &self.pixels
    }

    /// Pixel at `(x, y)`, or `None` outside the raster.
    pub fn get(&self, x: usize, y: usize) -> Option<Srgb> {
        (x < self.width && y < self.height).then(|| self.pixels[y * self.width + x])
    }

    /// Blends `color` over the pixels in the `min`..`max` box, weighting
    /// `alpha` by `coverage(pixel_center)` in [0, 1].
    fn paint(
        &mut self,
        min: DVec2,
        max: DVec2,
        color: Srgb,
        alpha: f64,
        coverage: impl Fn(DVec2) -> f64,
    ) {
        if alpha <= 0.0 || self.width == 0 || self.height == 0 {
            return;
        }
        let x0 = min.x.floor().max(0.0) as usize;
        let y0 = min.y.floor().max(0.0) as usize;
        let x1 = (max.x.ceil().max(0.0) as usize).min(self.width - 1);
        let y1 = (max.y.ceil().max(0.0) as usize).min(self.height - 1);
        for y in y0..=y1 {
            for x in x0..=x1 {
                let center = DVec2::new(x as f64 + 0.5, y as f64 + 0.5);
                let c = coverage(center);
                if c > 0.0 {
                    let idx = y * self.width + x;
                    self.pixels[idx] = color.over(self.pixels[idx], alpha * c);
                }
            }
        }
    }
}

/// Whole-pixel size of `bounds` and the buffer length it needs.
fn pixel_size(bounds: Bounds) -> Result<(usize, usize, usize), FieldError> {
    let width = bounds.width().ceil() as usize;
    let height = bounds.height().ceil() as usize;
    let len = width
        .checked_mul(height)
        .filter(|len| {
            len.checked_mul(std::mem::size_of::<Srgb>())
                .is_some_and(|bytes| bytes <= isize::MAX as usize)
        })
        .ok_or(FieldError::InvalidBounds {
            width: bounds.width(),
            height: bounds.height(),
        })?;
    Ok((width, height, len))
}

/// Distance from `p` to the segment `a`-`b`.
fn distance_to_segment(p: DVec2, a: DVec2, b: DVec2) -> f64 {
    let ab = b - a;
    let len_sq = ab.length_squared();
    if len_sq <= f64::EPSILON {
        return p.distance(a);
    }
    let t = ((p - a).dot(ab) / len_sq).clamp(0.0, 1.0);
    p.distance(a + ab * t)
}

impl Surface for Raster {
    /// An unaddressable size leaves an empty raster that ignores drawing.
    fn resize(&mut self, bounds: Bounds) {
        let (width, height, len) = match pixel_size(bounds) {
            Ok(size) => size,
            Err(e) => {
                warn!("raster resize rejected: {e}");
                (0, 0, 0)
            }
        };
        self.width = width;
        self.height = height;
        self.pixels = vec![self.background; len];
    }

    fn clear(&mut self) {
        self.pixels.fill(self.background);
    }

    fn stroke_line(&mut self, from: DVec2, to: DVec2, width: f64, color: Srgb, alpha: f64) {
        let half = width.max(0.0) / 2.0;
        let reach = DVec2::splat(half + 1.0);
        self.paint(
            from.min(to) - reach,
            from.max(to) + reach,
            color,
            alpha,
            |p| (half + 0.5 - distance_to_segment(p, from, to)).clamp(0.0, 1.0),
        );
    }

    fn fill_circle(&mut self, center: DVec2, radius: f64, color: Srgb, alpha: f64) {
        let radius = radius.max(0.0);
        let reach = DVec2::splat(radius + 1.0);
        self.paint(center - reach, center + reach, color, alpha, |p| {
            (radius + 0.5 - p.distance(center)).clamp(0.0, 1.0)
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use particle_field_sim::{init_field, render, FieldConfig};
    use particle_field_core::Xorshift64;

    fn white() -> Srgb {
        Srgb {
            r: 1.0,
            g: 1.0,
            b: 1.0,
        }
    }

    #[test]
    fn new_rounds_size_up_and_fills_background() {
        let raster = Raster::new(Bounds::new(10.2, 4.0).unwrap(), Srgb::BLACK).unwrap();
        assert_eq!(raster.width(), 11);
        assert_eq!(raster.height(), 4);
        assert!(raster.pixels().iter().all(|&p| p == Srgb::BLACK));
    }

    #[test]
    fn fill_circle_paints_center_and_leaves_far_pixels() {
        let mut raster = Raster::new(Bounds::new(20.0, 20.0).unwrap(), Srgb::BLACK).unwrap();
        raster.fill_circle(DVec2::new(10.0, 10.0), 3.0, white(), 1.0);
        assert_eq!(raster.get(10, 10), Some(white()));
        assert_eq!(raster.get(0, 0), Some(Srgb::BLACK));
        assert_eq!(raster.get(19, 10), Some(Srgb::BLACK));
    }

    #[test]
    fn stroke_line_respects_alpha() {
        let mut raster = Raster::new(Bounds::new(20.0, 5.0).unwrap(), Srgb::BLACK).unwrap();
        raster.stroke_line(
            DVec2::new(0.0, 2.5),
            DVec2::new(20.0, 2.5),
            1.0,
            white(),
            0.5,
        );
        let mid = raster.get(10, 2).unwrap();
        assert!((mid.r - 0.5).abs() < 1e-9, "got {mid:?}");
        assert_eq!(raster.get(10, 0), Some(Srgb::BLACK));
    }

    #[test]
    fn zero_length_line_behaves_like_a_dot() {
        let mut raster = Raster::new(Bounds::new(8.0, 8.0).unwrap(), Srgb::BLACK).unwrap();
        let p = DVec2::new(4.5, 4.5);
        raster.stroke_line(p, p, 1.0, white(), 1.0);
        assert_eq!(raster.get(4, 4), Some(white()));
    }

    #[test]
    fn shapes_partially_off_raster_are_clipped() {
        let mut raster = Raster::new(Bounds::new(10.0, 10.0).unwrap(), Srgb::BLACK).unwrap();
        raster.fill_circle(DVec2::new(-2.0, -2.0), 6.0, white(), 1.0);
        raster.stroke_line(
            DVec2::new(-50.0, 5.0),
            DVec2::new(50.0, 5.0),
            2.0,
            white(),
            1.0,
        );
        assert_eq!(raster.get(0, 0), Some(white()));
        assert_eq!(raster.get(9, 5), Some(white()));
    }

    #[test]
    fn clear_restores_background_and_resize_reallocates() {
        let mut raster = Raster::new(Bounds::new(10.0, 10.0).unwrap(), Srgb::BLACK).unwrap();
        raster.fill_circle(DVec2::new(5.0, 5.0), 3.0, white(), 1.0);
        raster.clear();
        assert!(raster.pixels().iter().all(|&p| p == Srgb::BLACK));
        raster.resize(Bounds::new(30.0, 2.0).unwrap());
        assert_eq!(raster.pixels().len(), 60);
    }

    #[test]
    fn new_rejects_sizes_that_overflow_the_buffer() {
        let bounds = Bounds::new(1e10, 1e10).unwrap();
        assert!(matches!(
            Raster::new(bounds, Srgb::BLACK),
            Err(FieldError::InvalidBounds { .. })
        ));
    }

    #[test]
    fn resize_to_an_overflowing_size_leaves_an_empty_raster() {
        let mut raster = Raster::new(Bounds::new(4.0, 4.0).unwrap(), Srgb::BLACK).unwrap();
        raster.resize(Bounds::new(1e10, 1e10).unwrap());
        assert_eq!((raster.width(), raster.height()), (0, 0));
        assert!(raster.pixels().is_empty());
        raster.fill_circle(DVec2::new(2.0, 2.0), 1.0, white(), 1.0);
        raster.clear();
        assert_eq!(raster.get(0, 0), None);
    }

    #[test]
    fn rendering_a_field_lights_up_pixels() {
        let bounds = Bounds::new(320.0, 240.0).unwrap();
        let field = init_field(bounds, FieldConfig::default(), &mut Xorshift64::new(42));
        let mut raster = Raster::new(bounds, Srgb::BLACK).unwrap();
        let stats = render(&mut raster, &field);
        assert_eq!(stats.particles, field.particles.len());
        let lit = raster.pixels().iter().filter(|&&p| p != Srgb::BLACK).count();
        assert!(lit >= field.particles.len(), "only {lit} pixels lit");
    }

    mod proptests {
        use super::*;
        use proptest::prelude::*;

        proptest! {
            #[test]
            fn painting_never_panics_or_leaves_unit_range(
                x0 in -100.0_f64..200.0, y0 in -100.0_f64..200.0,
                x1 in -100.0_f64..200.0, y1 in -100.0_f64..200.0,
                r in 0.0_f64..20.0,
                alpha in 0.0_f64..1.0,
            ) {
                let mut raster = Raster::new(Bounds::new(64.0, 48.0).unwrap(), Srgb::BLACK).unwrap();
                raster.stroke_line(DVec2::new(x0, y0), DVec2::new(x1, y1), 1.5, white(), alpha);
                raster.fill_circle(DVec2::new(x1, y0), r, white(), alpha);
                for p in raster.pixels() {
                    prop_assert!((0.0..=1.0).contains(&p.r));
                }
            }
        }
    }
}

//! Viewport bounds in CSS pixels.

use crate::error::FieldError;
use glam::DVec2;

/// The drawable rectangle `[0, width] x [0, height]`.
///
/// Always finite and strictly positive; zero-area containers seen during
/// layout are rejected at construction so callers can defer and retry.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Bounds {
    width: f64,
    height: f64,
}

impl Bounds {
    /// Creates bounds, rejecting zero, negative, or non-finite sizes.
    pub fn new(width: f64, height: f64) -> Result<Self, FieldError> {
        let valid = |v: f64| v.is_finite() && v > 0.0;
        if !valid(width) || !valid(height) {
            return Err(FieldError::InvalidBounds { width, height });
        }
        Ok(Self { width, height })
    }

    pub fn width(&self) -> f64 {
        self.width
    }

    pub fn height(&self) -> f64 {
        self.height
    }

    pub fn area(&self) -> f64 {
        self.width * self.height
    }

    /// Size as a vector, handy for per-axis scaling.
    pub fn size(&self) -> DVec2 {
        DVec2::new(self.width, self.height)
    }

    /// Whether `p` lies in the closed rectangle.
    pub fn contains(&self, p: DVec2) -> bool {
        (0.0..=self.width).contains(&p.x) && (0.0..=self.height).contains(&p.y)
    }

    /// Clamps `p` into the closed rectangle.
    pub fn clamp(&self, p: DVec2) -> DVec2 {
        p.clamp(DVec2::ZERO, self.size())
    }
}

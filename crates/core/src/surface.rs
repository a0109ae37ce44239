//! The 2D drawing surface a renderer paints onto.
//!
//! The browser binding implements this over `CanvasRenderingContext2d`; the
//! raster crate implements it over an in-memory pixel buffer. Coordinates
//! are CSS pixels with the origin at the top-left corner.

use crate::color::Srgb;
use crate::geometry::Bounds;
use glam::DVec2;

/// Minimal immediate-mode drawing API needed by the particle renderer.
pub trait Surface {
    /// Adopts new logical dimensions. Implementations reallocate their
    /// backing store; the previous contents are discarded.
    fn resize(&mut self, bounds: Bounds);

    /// Erases the whole surface to its transparent or background state.
    fn clear(&mut self);

    /// Strokes a straight segment with the given color and alpha.
    fn stroke_line(&mut self, from: DVec2, to: DVec2, width: f64, color: Srgb, alpha: f64);

    /// Fills a disc with the given color and alpha.
    fn fill_circle(&mut self, center: DVec2, radius: f64, color: Srgb, alpha: f64);
}

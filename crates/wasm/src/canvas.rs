//! [`Surface`] over a browser `CanvasRenderingContext2d`.
//!
//! The backing store is sized in device pixels and the context transform
//! scales CSS pixels onto it, so drawing code stays in CSS pixels and lines
//! remain crisp on high-DPI screens.

use glam::DVec2;
use log::warn;
use particle_field_core::{Bounds, Srgb, Surface};
use std::f64::consts::TAU;
use web_sys::{CanvasRenderingContext2d, HtmlCanvasElement};

/// Upper bound on the device pixel ratio honoured for the backing store.
const MAX_PIXEL_RATIO: f64 = 2.0;

/// Device-pixel size of the backing store for `bounds` at `pixel_ratio`.
pub fn backing_size(bounds: Bounds, pixel_ratio: f64) -> (u32, u32) {
    let ratio = effective_ratio(pixel_ratio);
    let px = |v: f64| (v * ratio).round().clamp(1.0, f64::from(u32::MAX)) as u32;
    (px(bounds.width()), px(bounds.height()))
}

fn effective_ratio(pixel_ratio: f64) -> f64 {
    if pixel_ratio.is_finite() && pixel_ratio > 0.0 {
        pixel_ratio.min(MAX_PIXEL_RATIO)
    } else {
        1.0
    }
}

pub struct CanvasSurface {
    canvas: HtmlCanvasElement,
    ctx: CanvasRenderingContext2d,
    pixel_ratio: f64,
    bounds: Option<Bounds>,
}

impl CanvasSurface {
    /// Wraps the canvas if it can produce a 2D context; `None` otherwise.
    pub fn from_canvas(canvas: HtmlCanvasElement, pixel_ratio: f64) -> Option<Self> {
        use wasm_bindgen::JsCast;

        let ctx = canvas
            .get_context("2d")
            .ok()
            .flatten()?
            .dyn_into::<CanvasRenderingContext2d>()
            .ok()?;
        Some(Self {
            canvas,
            ctx,
            pixel_ratio: effective_ratio(pixel_ratio),
            bounds: None,
        })
    }
}

impl Surface for CanvasSurface {
    fn resize(&mut self, bounds: Bounds) {
        let (w, h) = backing_size(bounds, self.pixel_ratio);
        self.canvas.set_width(w);
        self.canvas.set_height(h);
        let r = self.pixel_ratio;
        if let Err(e) = self.ctx.set_transform(r, 0.0, 0.0, r, 0.0, 0.0) {
            warn!("canvas transform rejected: {e:?}");
        }
        self.ctx.set_line_cap("round");
        self.bounds = Some(bounds);
    }

    fn clear(&mut self) {
        if let Some(b) = self.bounds {
            self.ctx.clear_rect(0.0, 0.0, b.width(), b.height());
        }
    }

    fn stroke_line(&mut self, from: DVec2, to: DVec2, width: f64, color: Srgb, alpha: f64) {
        self.ctx.set_stroke_style_str(&color.to_css_rgba(alpha));
        self.ctx.set_line_width(width);
        self.ctx.begin_path();
        self.ctx.move_to(from.x, from.y);
        self.ctx.line_to(to.x, to.y);
        self.ctx.stroke();
    }

    fn fill_circle(&mut self, center: DVec2, radius: f64, color: Srgb, alpha: f64) {
        self.ctx.set_fill_style_str(&color.to_css_rgba(alpha));
        self.ctx.begin_path();
        // arc only fails on a negative radius
        if self.ctx.arc(center.x, center.y, radius.max(0.0), 0.0, TAU).is_ok() {
            self.ctx.fill();
        }
    }
}

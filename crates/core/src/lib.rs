#![deny(unsafe_code)]
//! Core types shared by every particle field crate.
//!
//! Provides the [`FieldError`] type, the [`Bounds`] viewport rectangle, the
//! [`Surface`] drawing trait that renderers target, the [`Srgb`] accent
//! color, the seedable [`Xorshift64`] PRNG, and JSON parameter helpers.

pub mod color;
pub mod error;
pub mod geometry;
pub mod params;
pub mod prng;
pub mod surface;

pub use color::Srgb;
pub use error::FieldError;
pub use geometry::Bounds;
pub use glam::DVec2;
pub use prng::Xorshift64;
pub use surface::Surface;

//! PNG snapshots of a [`Raster`].
//!
//! Feature-gated behind `png` (default on) so WASM builds never pull in the
//! `image` crate.

use crate::pixel::raster_to_rgba;
use crate::Raster;
use particle_field_core::FieldError;
use std::path::Path;

/// Writes the raster as a PNG.
///
/// Returns `FieldError::Io` when the dimensions do not fit `u32` or the
/// file cannot be written.
pub fn write_png(raster: &Raster, path: &Path) -> Result<(), FieldError> {
    let w = u32::try_from(raster.width()).map_err(|_| FieldError::Io("raster too wide".into()))?;
    let h = u32::try_from(raster.height()).map_err(|_| FieldError::Io("raster too tall".into()))?;
    let img = image::RgbaImage::from_raw(w, h, raster_to_rgba(raster))
        .ok_or_else(|| FieldError::Io("RGBA buffer size mismatch".into()))?;
    img.save(path).map_err(|e| FieldError::Io(e.to_string()))
}

//! Conversion from a [`Raster`] to packed RGBA8 bytes.
//!
//! Shared by the PNG snapshot path and anything else that wants raw bytes.

use crate::Raster;

/// Packs the raster as `[r, g, b, 255]` per pixel, row-major.
pub fn raster_to_rgba(raster: &Raster) -> Vec<u8> {
    raster
        .pixels()
        .iter()
        .flat_map(|c| {
            let [r, g, b] = c.to_rgb8();
            [r, g, b, 255u8]
        })
        .collect()
}

//! sRGB color used for edges, particles and raster backgrounds.
//!
//! Canvas 2D compositing happens in gamma-encoded sRGB, so the raster
//! surface blends in the same space to keep snapshots faithful to the
//! browser output.

use crate::error::FieldError;
use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// sRGB color with components in [0, 1].
///
/// Serializes as a hex string `"#rrggbb"`. The hex round-trip has 8-bit
/// quantization, which is acceptable since CSS colors are 8-bit as well.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Srgb {
    pub r: f64,
    pub g: f64,
    pub b: f64,
}

impl Srgb {
    pub const BLACK: Srgb = Srgb {
        r: 0.0,
        g: 0.0,
        b: 0.0,
    };

    /// Parses a hex color string like "#00ffff" or "00FFFF".
    ///
    /// Returns `FieldError::InvalidColor` if the input is not 6 hex digits.
    pub fn from_hex(hex: &str) -> Result<Srgb, FieldError> {
        let digits = hex.strip_prefix('#').unwrap_or(hex);
        if digits.len() != 6 || !digits.is_ascii() {
            return Err(FieldError::InvalidColor(format!(
                "expected 6 hex digits, got '{hex}'"
            )));
        }
        let channel = |range: std::ops::Range<usize>| {
            u8::from_str_radix(&digits[range], 16)
                .map(|v| f64::from(v) / 255.0)
                .map_err(|e| FieldError::InvalidColor(format!("'{hex}': {e}")))
        };
        Ok(Srgb {
            r: channel(0..2)?,
            g: channel(2..4)?,
            b: channel(4..6)?,
        })
    }

    /// Formats the color as `"#rrggbb"`, clamping and rounding each channel.
    pub fn to_hex(self) -> String {
        let [r, g, b] = self.to_rgb8();
        format!("#{r:02x}{g:02x}{b:02x}")
    }

    /// Formats the color as a CSS `rgba(r, g, b, a)` string for canvas styles.
    ///
    /// Alpha is clamped to [0, 1] and printed with three decimals.
    pub fn to_css_rgba(self, alpha: f64) -> String {
        let [r, g, b] = self.to_rgb8();
        let a = if alpha.is_nan() {
            0.0
        } else {
            alpha.clamp(0.0, 1.0)
        };
        format!("rgba({r}, {g}, {b}, {a:.3})")
    }

    /// Quantizes to 8-bit channels.
    pub fn to_rgb8(self) -> [u8; 3] {
        let q = |c: f64| (c.clamp(0.0, 1.0) * 255.0).round() as u8;
        [q(self.r), q(self.g), q(self.b)]
    }

    /// Source-over composite of `self` (with `alpha`) onto `dst`.
    pub fn over(self, dst: Srgb, alpha: f64) -> Srgb {
        let a = alpha.clamp(0.0, 1.0);
        Srgb {
            r: dst.r + (self.r - dst.r) * a,
            g: dst.g + (self.g - dst.g) * a,
            b: dst.b + (self.b - dst.b) * a,
        }
    }
}

impl Serialize for Srgb {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.to_hex())
    }
}

impl<'de> Deserialize<'de> for Srgb {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        Srgb::from_hex(&s).map_err(serde::de::Error::custom)
    }
}

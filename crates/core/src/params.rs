//! Helpers for reading typed tunables out of a `serde_json::Value` object.
//!
//! Missing keys and values of the wrong JSON type fall back to the default,
//! so a partial or empty object always yields a usable configuration. Range
//! checks are the caller's job once every value has been read.

use crate::color::Srgb;
use crate::error::FieldError;
use serde_json::Value;

/// Extracts an `f64` from `params[name]` (integers accepted).
pub fn param_f64(params: &Value, name: &str, default: f64) -> f64 {
    params.get(name).and_then(Value::as_f64).unwrap_or(default)
}

/// Extracts a non-negative integer from `params[name]`.
pub fn param_usize(params: &Value, name: &str, default: usize) -> usize {
    params
        .get(name)
        .and_then(Value::as_u64)
        .and_then(|v| usize::try_from(v).ok())
        .unwrap_or(default)
}

/// Extracts a hex color from `params[name]`.
///
/// Unlike the numeric helpers, a string that is present but not a valid
/// color is reported as `FieldError::InvalidColor` instead of being ignored.
pub fn param_color(params: &Value, name: &str, default: Srgb) -> Result<Srgb, FieldError> {
    match params.get(name).and_then(Value::as_str) {
        Some(hex) => Srgb::from_hex(hex),
        None => Ok(default),
    }
}

/// Checks `value` lies in `[min, max]`, naming the parameter on failure.
pub fn ensure_in_range(name: &str, value: f64, min: f64, max: f64) -> Result<(), FieldError> {
    if value.is_finite() && (min..=max).contains(&value) {
        Ok(())
    } else {
        Err(FieldError::ParamOutOfRange {
            name: name.to_string(),
            reason: format!("{value} not in [{min}, {max}]"),
        })
    }
}

//! Error types for the particle field core.

use thiserror::Error;

/// Errors produced while building or driving a particle field.
///
/// None of these are fatal to an embedding page: the lifecycle controller
/// degrades or retries on every variant, and only the CLI surfaces them.
#[derive(Debug, Error)]
pub enum FieldError {
    /// Width or height was zero, negative, or not finite.
    #[error("invalid bounds {width}x{height}: width and height must be finite and positive")]
    InvalidBounds { width: f64, height: f64 },

    /// A configuration value violated its allowed range.
    #[error("parameter '{name}' out of range: {reason}")]
    ParamOutOfRange { name: String, reason: String },

    /// A color string could not be parsed.
    #[error("invalid color: {0}")]
    InvalidColor(String),

    /// The host environment refused a request (no 2D context, scheduler or
    /// listener registration failure).
    #[error("host error: {0}")]
    Host(String),

    /// Writing a snapshot failed.
    #[error("i/o error: {0}")]
    Io(String),
}

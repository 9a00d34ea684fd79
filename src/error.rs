//! Simulation error types.

use thiserror::Error;

/// Errors raised when constructing simulation entities or loading settings.
///
/// Numerical degeneracies during a tick are not errors; they are skipped and
/// counted in the tick report.
#[derive(Debug, Error)]
pub enum SimError {
    /// Body radius was zero, negative, or not finite.
    #[error("body radius must be positive and finite, got {0}")]
    InvalidRadius(f64),

    /// Container circumradius was zero, negative, or not finite.
    #[error("container circumradius must be positive and finite, got {0}")]
    InvalidCircumradius(f64),

    /// Angular speed range is empty or unbounded.
    #[error("invalid angular speed range [{min}, {max}]")]
    InvalidSpinRange { min: f64, max: f64 },

    /// A physics or spawn parameter is outside its domain.
    #[error("invalid parameter `{name}`: {value}")]
    InvalidParameter { name: &'static str, value: f64 },

    /// Settings file could not be read.
    #[error("failed to read settings from {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    /// Settings JSON was malformed.
    #[error("failed to parse settings: {0}")]
    Parse(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, SimError>;

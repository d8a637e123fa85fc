//! Configuration errors
//!
//! The gameplay core has no recoverable errors; only loading settings can fail.

use std::fmt;

/// Why a settings document was rejected
#[derive(Debug, Clone, PartialEq)]
pub enum ConfigError {
    /// Not valid JSON for `Settings`
    Parse(String),
    /// A duration, size or rate that must be strictly positive was not
    NonPositive { field: &'static str, value: f64 },
    /// A value above its supported ceiling
    TooLarge {
        field: &'static str,
        value: f64,
        max: f64,
    },
    /// The sprite sheet must have at least one frame per row
    NoFrames,
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Parse(msg) => write!(f, "invalid settings JSON: {msg}"),
            Self::NonPositive { field, value } => {
                write!(f, "{field} must be positive (got {value})")
            }
            Self::TooLarge { field, value, max } => {
                write!(f, "{field} must be at most {max} (got {value})")
            }
            Self::NoFrames => write!(f, "frames_per_row must be at least 1"),
        }
    }
}

impl std::error::Error for ConfigError {}

impl From<serde_json::Error> for ConfigError {
    fn from(err: serde_json::Error) -> Self {
        Self::Parse(err.to_string())
    }
}

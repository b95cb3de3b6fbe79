//! Error types for Hanami

use thiserror::Error;

/// The main error type for Hanami operations
///
/// Only configuration loading and validation can fail. A running simulation
/// never produces an error: a missing surface or capability is reported as a
/// skipped subsystem, not as a failure.
#[derive(Debug, Error)]
pub enum HanamiError {
    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("TOML parse error: {0}")]
    TomlParseError(String),

    #[error("TOML serialization error: {0}")]
    TomlSerError(String),

    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    #[error("Value out of range: {field} must be between {min} and {max}, got {value}")]
    ValueOutOfRange {
        field: String,
        min: f64,
        max: f64,
        value: f64,
    },

    #[error("Empty range: {field} has min {min} greater than max {max}")]
    EmptyRange { field: String, min: f64, max: f64 },
}

/// Result type alias for Hanami operations
pub type Result<T> = std::result::Result<T, HanamiError>;

impl From<toml::de::Error> for HanamiError {
    fn from(err: toml::de::Error) -> Self {
        HanamiError::TomlParseError(err.to_string())
    }
}

impl From<toml::ser::Error> for HanamiError {
    fn from(err: toml::ser::Error) -> Self {
        HanamiError::TomlSerError(err.to_string())
    }
}

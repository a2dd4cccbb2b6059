//! Error types shared across Seer crates

use thiserror::Error;

/// Result type alias for Seer operations
pub type Result<T> = std::result::Result<T, SeerError>;

/// Errors that are not owned by a single pipeline stage
#[derive(Error, Debug)]
pub enum SeerError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// A required setting is missing or empty
    #[error("Configuration error: {0}")]
    Config(String),

    /// A setting is present but cannot be parsed
    #[error("Invalid value for {key}: '{value}'")]
    InvalidValue { key: String, value: String },
}

impl SeerError {
    pub fn config(message: impl Into<String>) -> Self {
        Self::Config(message.into())
    }

    pub fn invalid_value(key: impl Into<String>, value: impl Into<String>) -> Self {
        Self::InvalidValue {
            key: key.into(),
            value: value.into(),
        }
    }
}

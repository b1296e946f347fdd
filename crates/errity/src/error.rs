//! Error types for wrapper configuration.
//!
//! Failures raised by wrapped functions never pass through these types. They
//! stay opaque and are handed to the configured handlers as-is.

use thiserror::Error;

/// Result type alias for configuration operations.
pub type Result<T> = std::result::Result<T, ConfigError>;

/// Errors produced while building or loading a wrapper configuration.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigError {
    /// The total number of attempts must be at least one.
    #[error("retry count must be at least 1, got {0}")]
    InvalidRetryCount(u32),

    /// A serialized retry policy could not be parsed.
    #[error("failed to parse retry policy: {0}")]
    Parse(String),
}

impl From<serde_json::Error> for ConfigError {
    fn from(err: serde_json::Error) -> Self {
        ConfigError::Parse(err.to_string())
    }
}

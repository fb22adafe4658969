//! Error types shared across wordhoard crates.

use thiserror::Error;

/// Unified error type for configuration and encoding failures.
#[derive(Debug, Error)]
pub enum WordhoardError {
    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),

    /// Serialization/deserialization error
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

//! Error types for adweave
//!
//! Defines module-specific error types using thiserror for clear error propagation.

use thiserror::Error;

/// Main error type for the adweave coordinator
#[derive(Error, Debug)]
pub enum Error {
    /// Configuration file loading errors
    #[error("Configuration error: {0}")]
    Config(String),

    /// Ad timeline / stream request errors
    #[error("Timeline error: {0}")]
    Timeline(String),

    /// Stream player errors
    #[error("Player error: {0}")]
    Player(String),

    /// Engagement renderer errors
    #[error("Engagement error: {0}")]
    Engagement(String),

    /// Invalid state for operation
    #[error("Invalid state: {0}")]
    InvalidState(String),

    /// Malformed engagement parameter payload
    #[error("Invalid engagement parameters: {0}")]
    InvalidParameters(String),

    /// File I/O errors
    #[error("File I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON payload errors
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Convenience Result type using the adweave Error
pub type Result<T> = std::result::Result<T, Error>;

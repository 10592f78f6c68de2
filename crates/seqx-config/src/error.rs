//! Error types for settings handling.

use thiserror::Error;

/// Errors that can occur while loading or persisting settings.
#[derive(Error, Debug)]
pub enum ConfigError {
    /// I/O error reading or writing the settings file.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON serialization error while persisting settings.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

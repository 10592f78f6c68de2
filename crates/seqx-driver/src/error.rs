//! Driver error type.

use thiserror::Error;

/// Errors surfaced by a connection backend.
#[derive(Error, Debug)]
pub enum DriverError {
    /// Could not open a session with the controller.
    #[error("cannot connect to {route}: {reason}")]
    Connect { route: String, reason: String },

    /// Tag catalog fetch failed.
    #[error("tag list failed: {0}")]
    TagList(String),

    /// A batch read failed before producing per-element results.
    #[error("batch read failed: {0}")]
    BatchRead(String),

    /// The route addresses a backend this build does not provide.
    #[error("no backend for {route}: {reason}")]
    NoBackend { route: String, reason: String },

    /// I/O error (simulator catalog files).
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON error (simulator catalog files).
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

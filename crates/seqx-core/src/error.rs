//! Error taxonomy for the export pipeline.
//!
//! Everything except `Configuration` is caught at the attempt boundary and
//! funneled into the retry decision; `Configuration` is raised before the
//! attempt loop and never retried.

use crate::reader::ReadError;
use seqx_archive::ArchiveError;
use seqx_driver::DriverError;
use thiserror::Error;

/// Result type alias for export operations.
pub type Result<T> = std::result::Result<T, ExportError>;

/// Errors that can end an export attempt or the whole run.
#[derive(Error, Debug)]
pub enum ExportError {
    /// Cannot reach or open the controller.
    #[error("connection to {route} failed: {source}")]
    Connection {
        route: String,
        #[source]
        source: DriverError,
    },

    /// Tag catalog fetch failed.
    #[error("tag discovery failed: {0}")]
    Discovery(#[source] DriverError),

    /// Array read failed.
    #[error(transparent)]
    Read(#[from] ReadError),

    /// An export record could not be serialized. Not expected in practice;
    /// fails the attempt like any other error.
    #[error("cannot serialize record for {tag}: {source}")]
    Serialization {
        tag: String,
        #[source]
        source: serde_json::Error,
    },

    /// The archive file could not be written or deleted.
    #[error("archive I/O failed: {0}")]
    Archive(#[from] ArchiveError),

    /// Required connection parameters unresolved after merging flags and
    /// settings, or a setting holds an unusable value.
    #[error("configuration error: {0}")]
    Configuration(String),
}

impl ExportError {
    /// Stable snake_case kind string, used in the diagnostic side file.
    pub fn kind(&self) -> &'static str {
        match self {
            ExportError::Connection { .. } => "connection",
            ExportError::Discovery(_) => "discovery",
            ExportError::Read(_) => "read",
            ExportError::Serialization { .. } => "serialization",
            ExportError::Archive(_) => "archive_io",
            ExportError::Configuration(_) => "configuration",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn kind_strings_are_stable() {
        let err = ExportError::Configuration("missing ip".to_string());
        assert_eq!(err.kind(), "configuration");

        let err = ExportError::Discovery(DriverError::TagList("timeout".to_string()));
        assert_eq!(err.kind(), "discovery");
        assert_eq!(err.to_string(), "tag discovery failed: tag list failed: timeout");
    }
}

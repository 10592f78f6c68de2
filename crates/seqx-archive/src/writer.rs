//! Incremental writer for export archives.

use crate::ArchiveError;
use std::fs::File;
use std::io::Write;
use std::path::{Path, PathBuf};
use tracing::{debug, info, warn};
use zip::write::{FileOptions, ZipWriter};
use zip::CompressionMethod;

fn entry_options() -> FileOptions<'static, ()> {
    FileOptions::default()
        .compression_method(CompressionMethod::Deflated)
        .unix_permissions(0o644)
}

/// An export archive open for writing.
///
/// Owned exclusively by one export attempt. [`ExportArchive::finish`] makes
/// the file final; anything else must end in [`ExportArchive::discard`] so
/// no partial archive survives.
pub struct ExportArchive {
    path: PathBuf,
    zip: ZipWriter<File>,
    entries: usize,
}

impl ExportArchive {
    /// Create the archive at `path`, truncating any previous file there.
    pub fn create(path: impl Into<PathBuf>) -> Result<Self, ArchiveError> {
        let path = path.into();
        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() {
                std::fs::create_dir_all(parent)?;
            }
        }
        let file = File::create(&path)?;
        Ok(Self {
            path,
            zip: ZipWriter::new(file),
            entries: 0,
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Entries written so far.
    pub fn entry_count(&self) -> usize {
        self.entries
    }

    /// Serialize `value` and add it as `<stem>.json`.
    pub fn add_json<T: serde::Serialize>(
        &mut self,
        stem: &str,
        value: &T,
        pretty: bool,
    ) -> Result<(), ArchiveError> {
        let json = if pretty {
            serde_json::to_string_pretty(value)?
        } else {
            serde_json::to_string(value)?
        };
        let entry = format!("{stem}.json");
        self.zip.start_file(entry.as_str(), entry_options())?;
        self.zip.write_all(json.as_bytes())?;
        self.entries += 1;
        debug!(entry, bytes = json.len(), "archive entry written");
        Ok(())
    }

    /// Finalize the archive and return its path.
    pub fn finish(self) -> Result<PathBuf, ArchiveError> {
        self.zip.finish()?;
        info!(path = %self.path.display(), entries = self.entries, "archive written");
        Ok(self.path)
    }

    /// Abandon the archive and delete the partial file.
    ///
    /// Deletion failures are logged, not surfaced: the next attempt
    /// truncates the same path anyway.
    pub fn discard(self) {
        let Self { path, zip, .. } = self;
        drop(zip);
        if let Err(err) = std::fs::remove_file(&path) {
            warn!(path = %path.display(), %err, "could not delete partial archive");
        }
    }
}

/// Delete an archive file if present. Missing files are not an error.
pub fn remove_stale(path: &Path) -> Result<(), ArchiveError> {
    match std::fs::remove_file(path) {
        Ok(()) => Ok(()),
        Err(err) if err.kind() == std::io::ErrorKind::NotFound => Ok(()),
        Err(err) => Err(err.into()),
    }
}

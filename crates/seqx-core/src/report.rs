//! Diagnostic side file written on terminal failure.

use crate::error::ExportError;
use crate::export::{ExportOptions, RETRY_ATTEMPTS, RETRY_DELAY};
use chrono::Local;
use std::path::Path;
use tracing::warn;

/// Context captured in `EXPORT_ERROR.txt`.
#[derive(Debug)]
pub struct FailureReport<'a> {
    pub options: &'a ExportOptions,
    pub archive_path: &'a Path,
    pub error: &'a ExportError,
}

impl FailureReport<'_> {
    /// Render the plain-text report body.
    pub fn render(&self) -> String {
        format!(
            "EXPORT FAILED\n\
             Time: {time}\n\
             IP: {ip}\n\
             Ethernet slot: {eth_slot}\n\
             CPU slot: {cpu_slot}\n\
             Include program tags: {include_program_tags}\n\
             ZIP path: {zip_path}\n\
             Attempts: {attempts}\n\
             Delay seconds: {delay}\n\
             \n\
             {kind}: {error}\n",
            time = Local::now().format("%Y-%m-%d %H:%M:%S"),
            ip = self.options.params.ip,
            eth_slot = self.options.params.eth_slot,
            cpu_slot = self.options.params.cpu_slot,
            include_program_tags = self.options.include_program_tags,
            zip_path = self.archive_path.display(),
            attempts = RETRY_ATTEMPTS,
            delay = RETRY_DELAY.as_secs(),
            kind = self.error.kind(),
            error = self.error,
        )
    }
}

/// Overwrite the diagnostic file at `path`.
///
/// Write failures are logged and swallowed so they never mask the export
/// error being reported. A stale report from an earlier run is only ever
/// overwritten, never deleted.
pub fn write_failure_report(path: &Path, report: &FailureReport<'_>) {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            if let Err(err) = std::fs::create_dir_all(parent) {
                warn!(path = %path.display(), %err, "could not create report directory");
                return;
            }
        }
    }
    if let Err(err) = std::fs::write(path, report.render()) {
        warn!(path = %path.display(), %err, "could not write failure report");
    }
}

//! Export orchestrator.
//!
//! Drives one full export to a fresh archive inside a bounded retry loop.
//! Every failure discards the whole attempt (connection, discovery, reads,
//! and everything written so far) and starts over from a clean archive;
//! partial state across a reconnect is not trustworthy, so there is no
//! resume-from-partial-progress.

use crate::error::ExportError;
use crate::filter;
use crate::reader::{self, ElementSnapshot};
use crate::report::{write_failure_report, FailureReport};
use chrono::{DateTime, Local};
use seqx_archive::{remove_stale, sanitize_file_stem, ArchiveError, ExportArchive};
use seqx_driver::{ConnectionParams, Connector, TagScope};
use serde::Serialize;
use std::path::{Path, PathBuf};
use std::time::Duration;
use tracing::{info, warn};

/// Whole-attempt tries before giving up. Not configurable.
pub const RETRY_ATTEMPTS: u32 = 5;

/// Fixed pause between attempts. No backoff growth.
pub const RETRY_DELAY: Duration = Duration::from_secs(3);

/// Name of the diagnostic side file written on terminal failure.
pub const ERROR_FILENAME: &str = "EXPORT_ERROR.txt";

/// Everything one export run needs, resolved before the attempt loop.
#[derive(Debug, Clone)]
pub struct ExportOptions {
    pub params: ConnectionParams,
    pub out_dir: PathBuf,
    pub chunk_size: usize,
    pub pretty_json: bool,
    pub include_program_tags: bool,
}

impl ExportOptions {
    fn scope(&self) -> TagScope {
        if self.include_program_tags {
            TagScope::All
        } else {
            TagScope::ControllerOnly
        }
    }
}

/// Outcome of a successful run.
#[derive(Debug, Clone)]
pub struct ExportSummary {
    /// Tags written into the archive.
    pub exported: usize,
    /// Final archive location.
    pub archive_path: PathBuf,
}

/// One JSON document inside the archive.
#[derive(Debug, Serialize)]
struct ExportRecord<'a> {
    source_tag_name: &'a str,
    required_definition: String,
    value: Vec<ElementSnapshot>,
}

fn archive_filename(started: &DateTime<Local>) -> String {
    format!("seq_export_{}.zip", started.format("%Y%m%d_%H%M%S"))
}

/// Run one export: up to [`RETRY_ATTEMPTS`] whole attempts against the same
/// timestamped archive path, [`RETRY_DELAY`] apart. On terminal failure the
/// diagnostic side file is written before the last error is surfaced.
pub fn run_export(
    connector: &dyn Connector,
    options: &ExportOptions,
) -> Result<ExportSummary, ExportError> {
    if options.chunk_size == 0 {
        return Err(ExportError::Configuration(
            "chunk_size must be at least 1".to_string(),
        ));
    }

    let archive_path = options.out_dir.join(archive_filename(&Local::now()));
    let mut attempt = 1;
    loop {
        match run_attempt(connector, options, &archive_path) {
            Ok(summary) => {
                info!(attempt, exported = summary.exported, "export succeeded");
                return Ok(summary);
            }
            Err(error) => {
                warn!(attempt, %error, "export attempt failed");
                if attempt >= RETRY_ATTEMPTS {
                    let report = FailureReport {
                        options,
                        archive_path: &archive_path,
                        error: &error,
                    };
                    write_failure_report(&options.out_dir.join(ERROR_FILENAME), &report);
                    return Err(error);
                }
                std::thread::sleep(RETRY_DELAY);
                attempt += 1;
            }
        }
    }
}

/// One attempt: fresh archive, fresh connection, full pipeline. Any failure
/// deletes the partial archive before propagating.
fn run_attempt(
    connector: &dyn Connector,
    options: &ExportOptions,
    archive_path: &Path,
) -> Result<ExportSummary, ExportError> {
    let mut archive = ExportArchive::create(archive_path)?;
    match export_tags(connector, options, &mut archive) {
        Ok(exported) => match archive.finish() {
            Ok(path) => Ok(ExportSummary {
                exported,
                archive_path: path,
            }),
            Err(error) => {
                if let Err(cleanup) = remove_stale(archive_path) {
                    warn!(%cleanup, "could not delete unfinished archive");
                }
                Err(error.into())
            }
        },
        Err(error) => {
            archive.discard();
            Err(error)
        }
    }
}

fn export_tags(
    connector: &dyn Connector,
    options: &ExportOptions,
    archive: &mut ExportArchive,
) -> Result<usize, ExportError> {
    let mut conn = connector
        .connect(&options.params)
        .map_err(|source| ExportError::Connection {
            route: options.params.route(),
            source,
        })?;

    let catalog = conn.list_tags(options.scope()).map_err(ExportError::Discovery)?;
    let names = filter::matching_tag_names(&catalog);
    info!(catalog = catalog.len(), matched = names.len(), "tag discovery complete");

    let mut exported = 0;
    for name in &names {
        let value = reader::read_full_array(
            conn.as_mut(),
            name,
            filter::REQUIRED_ARRAY_LEN,
            options.chunk_size,
        )?;
        let record = ExportRecord {
            source_tag_name: name,
            required_definition: filter::required_definition(),
            value,
        };
        archive
            .add_json(&sanitize_file_stem(name), &record, options.pretty_json)
            .map_err(|error| match error {
                ArchiveError::Json(source) => ExportError::Serialization {
                    tag: name.clone(),
                    source,
                },
                other => ExportError::Archive(other),
            })?;
        exported += 1;
    }
    Ok(exported)
}

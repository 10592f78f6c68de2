//! No-mock retry behavior tests for the export orchestrator.
//!
//! Exercises the whole-attempt retry loop against the simulator backend:
//! - recovery after transient connection outages
//! - attempt exhaustion with archive cleanup and the diagnostic side file
//! - mid-read failures discarding the partial archive

use seqx_core::export::{run_export, ExportOptions, ERROR_FILENAME, RETRY_ATTEMPTS};
use seqx_core::ExportError;
use seqx_driver::sim::{SimController, SimTag};
use seqx_driver::{Connection, ConnectionParams, Connector, DriverError};
use serde_json::json;
use std::cell::Cell;
use std::path::PathBuf;
use tempfile::TempDir;

fn seq_tag(name: &str, len: usize) -> SimTag {
    SimTag {
        name: name.to_string(),
        data_type: "SEQ".to_string(),
        dimensions: vec![100],
        elements: (0..len)
            .map(|i| json!({"step": i, "dwell_ms": i * 10}))
            .collect(),
    }
}

fn options(out_dir: PathBuf) -> ExportOptions {
    ExportOptions {
        params: ConnectionParams {
            ip: "sim:".to_string(),
            eth_slot: 1,
            cpu_slot: 0,
        },
        out_dir,
        chunk_size: 20,
        pretty_json: true,
        include_program_tags: false,
    }
}

/// Connector that refuses the first `fail_times` sessions.
struct FlakyConnector {
    fail_times: u32,
    attempts: Cell<u32>,
    inner: SimController,
}

impl FlakyConnector {
    fn new(fail_times: u32, inner: SimController) -> Self {
        Self {
            fail_times,
            attempts: Cell::new(0),
            inner,
        }
    }
}

impl Connector for FlakyConnector {
    fn connect(&self, params: &ConnectionParams) -> Result<Box<dyn Connection>, DriverError> {
        let attempt = self.attempts.get() + 1;
        self.attempts.set(attempt);
        if attempt <= self.fail_times {
            return Err(DriverError::Connect {
                route: params.route(),
                reason: "simulated outage".to_string(),
            });
        }
        self.inner.connect(params)
    }
}

#[test]
fn recovers_after_transient_connection_failures() {
    let dir = TempDir::new().unwrap();
    let controller = SimController::new()
        .with_tag(seq_tag("SeqAlpha", 100))
        .with_tag(seq_tag("SeqBeta", 100));
    let connector = FlakyConnector::new(2, controller);

    let summary = run_export(&connector, &options(dir.path().to_path_buf())).unwrap();

    assert_eq!(summary.exported, 2);
    assert_eq!(connector.attempts.get(), 3);
    assert!(summary.archive_path.exists());
    assert!(!dir.path().join(ERROR_FILENAME).exists());

    let file = std::fs::File::open(&summary.archive_path).unwrap();
    let mut archive = zip::ZipArchive::new(file).unwrap();
    assert_eq!(archive.len(), 2);
    assert!(archive.by_name("SeqAlpha.json").is_ok());
}

#[test]
fn exhausted_attempts_leave_no_archive_and_write_the_report() {
    let dir = TempDir::new().unwrap();
    let connector = FlakyConnector::new(u32::MAX, SimController::new());

    let err = run_export(&connector, &options(dir.path().to_path_buf())).unwrap_err();

    assert!(matches!(err, ExportError::Connection { .. }));
    assert_eq!(connector.attempts.get(), RETRY_ATTEMPTS);

    let leftover_zips: Vec<_> = std::fs::read_dir(dir.path())
        .unwrap()
        .filter_map(|entry| entry.ok())
        .filter(|entry| entry.file_name().to_string_lossy().ends_with(".zip"))
        .collect();
    assert!(leftover_zips.is_empty(), "partial archive survived: {leftover_zips:?}");

    let report = std::fs::read_to_string(dir.path().join(ERROR_FILENAME)).unwrap();
    assert!(report.starts_with("EXPORT FAILED\n"));
    assert!(report.contains("Attempts: 5\n"));
    assert!(report.contains("Delay seconds: 3\n"));
    assert!(report.contains("connection: "));
    assert!(report.contains("simulated outage"));
}

#[test]
fn mid_read_failure_discards_the_partial_archive() {
    let dir = TempDir::new().unwrap();
    // Second tag is short one element, so the first tag's document has
    // already been written when the read of the second fails.
    let controller = SimController::new()
        .with_tag(seq_tag("SeqAlpha", 100))
        .with_tag(seq_tag("SeqBeta", 99));
    let connector = FlakyConnector::new(0, controller);

    let err = run_export(&connector, &options(dir.path().to_path_buf())).unwrap_err();

    assert!(matches!(err, ExportError::Read(_)));
    assert!(err.to_string().contains("out of range"));
    assert_eq!(connector.attempts.get(), RETRY_ATTEMPTS);

    let leftover_zips: Vec<_> = std::fs::read_dir(dir.path())
        .unwrap()
        .filter_map(|entry| entry.ok())
        .filter(|entry| entry.file_name().to_string_lossy().ends_with(".zip"))
        .collect();
    assert!(leftover_zips.is_empty());

    let report = std::fs::read_to_string(dir.path().join(ERROR_FILENAME)).unwrap();
    assert!(report.contains("read: "));
}

#[test]
fn zero_chunk_size_fails_before_the_attempt_loop() {
    let dir = TempDir::new().unwrap();
    let connector = FlakyConnector::new(0, SimController::new());
    let mut opts = options(dir.path().to_path_buf());
    opts.chunk_size = 0;

    let err = run_export(&connector, &opts).unwrap_err();

    assert!(matches!(err, ExportError::Configuration(_)));
    assert_eq!(connector.attempts.get(), 0);
    assert!(!dir.path().join(ERROR_FILENAME).exists());
}

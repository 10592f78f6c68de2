//! Core export pipeline for seqx.
//!
//! This crate drives the end-to-end export of `SEQ[100]` tags from a
//! controller into a timestamped ZIP archive:
//!
//! - [`filter`]: selects catalog entries matching the required shape
//! - [`reader`]: chunked bulk reads reassembled into complete arrays
//! - [`export`]: the orchestrator: bounded whole-attempt retries, archive
//!   cleanup on failure, diagnostic side file on terminal failure
//!
//! The controller itself sits behind the `seqx-driver` port; the pipeline
//! is strictly sequential and retries only at whole-attempt granularity,
//! since a failed element read usually means the session itself is gone.

pub mod error;
pub mod export;
pub mod filter;
pub mod logging;
pub mod reader;
pub mod report;

pub use error::ExportError;
pub use export::{run_export, ExportOptions, ExportSummary, RETRY_ATTEMPTS, RETRY_DELAY};

//! Chunked array reader.
//!
//! Reads every element of a structured-tag array in fixed-size batches and
//! reassembles them into one complete, index-ordered snapshot. Batching
//! exists because the protocol bounds how many requests coalesce into one
//! round trip; the chunk size amortizes latency while staying under that
//! bound.
//!
//! This module never retries: a failed element read usually means the
//! session is gone, and the orchestrator recovers with a full reconnect.

use seqx_driver::{address, Connection, DriverError};
use serde_json::{Map, Value};
use thiserror::Error;
use tracing::debug;

/// One array element: always a structured, keyed record.
pub type ElementSnapshot = Map<String, Value>;

/// How many missing indices a [`ReadError::Missing`] names.
const MISSING_REPORT_CAP: usize = 10;

fn format_missing(indices: &[usize], more: &bool) -> String {
    let shown: Vec<String> = indices.iter().map(|i| i.to_string()).collect();
    let suffix = if *more { "..." } else { "" };
    format!("[{}]{}", shown.join(", "), suffix)
}

fn value_type_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "bool",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

/// Errors that fail a whole array read.
#[derive(Error, Debug)]
pub enum ReadError {
    /// A batch read failed below the per-element level.
    #[error("batch read failed: {0}")]
    Driver(#[from] DriverError),

    /// The driver reported an element-level error.
    #[error("{address}: {message}")]
    Element { address: String, message: String },

    /// An echoed address carried no parseable element index.
    #[error("could not parse index from returned tag address: {address}")]
    UnparseableIndex { address: String },

    /// An element value was null or not a structured record.
    #[error("{address}: {reason}")]
    InvalidValue { address: String, reason: String },

    /// Indices never returned by any batch.
    #[error("{base}: missing elements at indices {}", format_missing(.indices, .more))]
    Missing {
        base: String,
        /// First [`MISSING_REPORT_CAP`] missing indices, ascending.
        indices: Vec<usize>,
        /// Whether further indices were missing beyond those named.
        more: bool,
    },
}

fn ensure_snapshot(address: &str, value: Option<Value>) -> Result<ElementSnapshot, ReadError> {
    match value {
        None | Some(Value::Null) => Err(ReadError::InvalidValue {
            address: address.to_string(),
            reason: "value is null".to_string(),
        }),
        Some(Value::Object(map)) => Ok(map),
        Some(other) => Err(ReadError::InvalidValue {
            address: address.to_string(),
            reason: format!(
                "unexpected element value type {} (expected structured record)",
                value_type_name(&other)
            ),
        }),
    }
}

/// Read all `len` elements of `base` in batches of `chunk_size`.
///
/// Fails on any driver-reported element error, unparseable echoed index,
/// null or non-structured value, or gap left after all batches. A duplicate
/// echoed index overwrites silently (not expected, not itself an error).
pub fn read_full_array(
    conn: &mut dyn Connection,
    base: &str,
    len: usize,
    chunk_size: usize,
) -> Result<Vec<ElementSnapshot>, ReadError> {
    let addresses: Vec<String> = (0..len)
        .map(|index| address::element_address(base, index))
        .collect();
    let mut elements: Vec<Option<ElementSnapshot>> = vec![None; len];

    for batch in addresses.chunks(chunk_size.max(1)) {
        let items = conn.read_batch(batch)?;
        debug!(base, requested = batch.len(), returned = items.len(), "batch read");
        for item in items {
            if let Some(message) = item.error {
                return Err(ReadError::Element {
                    address: item.address,
                    message,
                });
            }
            let Some(index) = address::parse_element_index(&item.address) else {
                return Err(ReadError::UnparseableIndex {
                    address: item.address,
                });
            };
            let snapshot = ensure_snapshot(&item.address, item.value)?;
            if let Some(slot) = elements.get_mut(index) {
                *slot = Some(snapshot);
            }
        }
    }

    let missing: Vec<usize> = elements
        .iter()
        .enumerate()
        .filter(|(_, slot)| slot.is_none())
        .map(|(index, _)| index)
        .collect();
    if !missing.is_empty() {
        return Err(ReadError::Missing {
            base: base.to_string(),
            more: missing.len() > MISSING_REPORT_CAP,
            indices: missing.into_iter().take(MISSING_REPORT_CAP).collect(),
        });
    }

    Ok(elements.into_iter().flatten().collect())
}

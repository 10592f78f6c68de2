//! Export archive writer for seqx.
//!
//! An export archive is a deflate-compressed ZIP holding one JSON document
//! per exported tag. Entries stream into the open archive as tags are read,
//! so a failed export attempt leaves a partial file on disk that the caller
//! must discard; [`ExportArchive::discard`] and [`remove_stale`] cover that
//! cleanup.

mod error;
mod filename;
mod writer;

pub use error::ArchiveError;
pub use filename::sanitize_file_stem;
pub use writer::{remove_stale, ExportArchive};

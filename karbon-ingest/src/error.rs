//! Errors surfaced by statement ingestion.

use std::path::PathBuf;

use karbon_core::CoreError;

use crate::extract::ExtractError;

#[derive(Debug, thiserror::Error)]
pub enum IngestError {
    /// The file extension is not one the bank parser accepts.
    #[error("unsupported file format `{extension}` for {}: expected one of {expected}", .path.display())]
    UnsupportedFormat {
        path: PathBuf,
        /// Rejected extension with its leading dot, or `(none)`.
        extension: String,
        expected: String,
    },

    #[error("failed to read {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },

    /// The PDF could not be parsed or its text could not be extracted.
    #[error("PDF extraction failed for {}: {source}", .path.display())]
    Extraction {
        path: PathBuf,
        source: ExtractError,
    },

    /// The extractor panicked on a malformed document.
    #[error("PDF extraction panicked on {} (malformed document)", .path.display())]
    ExtractionPanicked { path: PathBuf },

    /// A delimited file with no header record.
    #[error("{} has no header row", .path.display())]
    EmptyHeader { path: PathBuf },

    #[error("failed to read delimited rows from {}: {source}", .path.display())]
    Csv { path: PathBuf, source: csv::Error },

    #[error("{}: record {record} has {found} fields but the header has {expected}", .path.display())]
    MalformedRow {
        path: PathBuf,
        record: u64,
        expected: usize,
        found: usize,
    },

    #[error(transparent)]
    Core(#[from] CoreError),
}

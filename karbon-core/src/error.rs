//! Errors raised while rebuilding tables from statement text.

/// Failures of the tokenize / reconstruct stages.
#[derive(Debug, thiserror::Error)]
pub enum CoreError {
    /// The extracted text had no non-blank lines to build a table from.
    #[error("no non-empty lines found in statement text")]
    NoLines,

    /// No line matched the header marker.
    #[error("no header line matches marker `{marker}`")]
    HeaderNotFound { marker: String },

    #[error("column gap must be at least 1 whitespace character, got {0}")]
    InvalidColumnGap(usize),

    /// A splitter or marker pattern failed to compile.
    #[error("invalid pattern: {0}")]
    InvalidPattern(#[from] regex::Error),
}

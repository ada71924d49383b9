//! karbon-core: table model and text-to-table reconstruction for bank statements

pub mod error;
pub mod normalize;
pub mod options;
pub mod reconstruct;
pub mod table;
pub mod tokenize;

pub use error::CoreError;
pub use normalize::{normalize, parse_number};
pub use options::{ParseOptions, PolicyKind};
pub use reconstruct::{reconstruct, Reconstruction, RowPolicy, DEFAULT_MARKER};
pub use table::{Column, ColumnKind, RawTable, RowView, Table, Value};
pub use tokenize::{lines, ColumnSplitter};

/// Tokenize extracted text and rebuild it into a raw table under `policy`.
pub fn reconstruct_text(
    text: &str,
    splitter: &ColumnSplitter,
    policy: &RowPolicy,
) -> Result<Reconstruction, CoreError> {
    let lines = tokenize::lines(text);
    log::debug!("tokenized {} non-empty lines", lines.len());
    reconstruct(&lines, splitter, policy)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_reconstruct_text_header_anchored() {
        let text = "Date  Amount  Balance\n\n   \n2024-01-01  100.0  100.0\ngarbage line with wrong  spacing\n";
        let splitter = ColumnSplitter::new(2).unwrap();
        let out = reconstruct_text(text, &splitter, &RowPolicy::HeaderAnchored).unwrap();
        assert_eq!(out.table.columns, vec!["Date", "Amount", "Balance"]);
        assert_eq!(out.table.rows.len(), 1);
        assert_eq!(out.dropped_lines, 1);
    }

    #[test]
    fn test_reconstruct_text_blank_input_is_degenerate() {
        let splitter = ColumnSplitter::new(2).unwrap();
        let err = reconstruct_text(" \n\t\n", &splitter, &RowPolicy::HeaderAnchored).unwrap_err();
        assert!(matches!(err, CoreError::NoLines));
    }
}

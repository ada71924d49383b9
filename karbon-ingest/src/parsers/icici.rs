//! ICICI Bank statement parser
//!
//! Accepts `.pdf` and `.csv`. PDF text is rebuilt header-first: the first
//! non-blank line is the header and only lines with the same field count
//! become rows.
//!
//! Expected text rows after PDF-to-text:
//!   Date          Particulars                 Withdrawals    Deposits    Balance
//!   01-04-2024    UPI/412345/SWIGGY           350.00         0           12650.00

use std::path::Path;

use karbon_core::Table;

use crate::{Bank, IngestError, StatementParser};

pub fn parser() -> StatementParser {
    StatementParser::new(Bank::Icici)
}

/// Parse an ICICI statement (PDF or CSV export).
pub fn parse(path: impl AsRef<Path>) -> Result<Table, IngestError> {
    parser().parse(path)
}

/// Parse already-extracted ICICI statement text.
pub fn parse_icici_text(text: &str) -> Result<Table, IngestError> {
    parser().parse_text(text)
}

#[cfg(test)]
mod tests {
    use karbon_core::{ColumnKind, CoreError, Value};

    use super::*;

    #[test]
    fn test_parses_basic_rows() {
        let text = "Date  Amount  Balance\n2024-01-01  100.0  100.0\ngarbage line with wrong  spacing\n";
        let table = parse_icici_text(text).unwrap();
        assert_eq!(table.column_names(), vec!["Date", "Amount", "Balance"]);
        assert_eq!(table.len(), 1);
        assert_eq!(table.get(0, "Date"), Some(&Value::Text("2024-01-01".into())));
        assert_eq!(table.get(0, "Amount"), Some(&Value::Number(100.0)));
        assert_eq!(table.get(0, "Balance"), Some(&Value::Number(100.0)));
    }

    #[test]
    fn test_statement_layout() {
        let text = r#"
Date          Particulars                 Withdrawals    Deposits    Balance
01-04-2024    UPI/412345/SWIGGY           350.00         0           12650.00
02-04-2024    NEFT-ACME PAYROLL           0              85000.00    97650.00
              continuation of narration
Page 1 of 3
03-04-2024    ATM WDL MG ROAD             2000.00        0           95650.00
"#;
        let table = parse_icici_text(text).unwrap();
        assert_eq!(table.len(), 3);
        assert_eq!(table.kind_of("Withdrawals"), Some(ColumnKind::Numeric));
        assert_eq!(table.kind_of("Particulars"), Some(ColumnKind::Text));
        assert_eq!(table.get(2, "Balance"), Some(&Value::Number(95650.0)));
    }

    #[test]
    fn test_repeated_header_label_truncates_columns() {
        let text = "Date  Amount  Date  Balance\n01/01  5  01/01  10\n";
        let table = parse_icici_text(text).unwrap();
        assert_eq!(table.column_names(), vec!["Date", "Amount"]);
    }

    #[test]
    fn test_blank_text_is_degenerate() {
        let err = parse_icici_text("\n \n").unwrap_err();
        assert!(matches!(err, IngestError::Core(CoreError::NoLines)));
    }
}

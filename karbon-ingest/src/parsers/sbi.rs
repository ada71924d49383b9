//! SBI (State Bank of India) statement parser
//!
//! Accepts `.pdf`, `.csv` and `.txt`. PDF statements open with a block of
//! account details, so the header is located by marker (the first line
//! naming both a `Date` and a `Balance` column) rather than assumed to be
//! the first line. Repeated page headers are skipped.
//!
//! Expected text rows after PDF-to-text:
//!   Txn Date      Value Date    Description              Debit      Credit      Balance
//!   1 Jan 2024    1 Jan 2024    TO TRANSFER-UPI/DR       500.00                 9500.00

use std::path::Path;

use karbon_core::Table;

use crate::{Bank, IngestError, StatementParser};

pub fn parser() -> StatementParser {
    StatementParser::new(Bank::Sbi)
}

/// Parse an SBI statement (PDF, CSV or text export).
pub fn parse(path: impl AsRef<Path>) -> Result<Table, IngestError> {
    parser().parse(path)
}

/// Parse already-extracted SBI statement text.
pub fn parse_sbi_text(text: &str) -> Result<Table, IngestError> {
    parser().parse_text(text)
}

#[cfg(test)]
mod tests {
    use karbon_core::{ColumnKind, CoreError, ParseOptions, PolicyKind, Value};

    use super::*;

    const STATEMENT: &str = r#"
Account Name       :  MR A KUMAR
Account Number     :  00000012345678901
Txn Date      Value Date    Description              Debit      Credit      Balance
1 Jan 2024    1 Jan 2024    TO TRANSFER-UPI/DR       500.00     0           9500.00
2 Jan 2024    2 Jan 2024    BY TRANSFER-NEFT         0          1500.00     11000.00
Txn Date      Value Date    Description              Debit      Credit      Balance
5 Jan 2024    5 Jan 2024    ATM WDL                  1000.00    0           10000.00
**This is a computer generated statement**
"#;

    #[test]
    fn test_parses_rows_after_marker() {
        let table = parse_sbi_text(STATEMENT).unwrap();
        assert_eq!(
            table.column_names(),
            vec!["Txn Date", "Value Date", "Description", "Debit", "Credit", "Balance"]
        );
        assert_eq!(table.len(), 3);
        assert_eq!(table.kind_of("Credit"), Some(ColumnKind::Numeric));
        assert_eq!(table.get(1, "Credit"), Some(&Value::Number(1500.0)));
        assert_eq!(
            table.get(2, "Description"),
            Some(&Value::Text("ATM WDL".into()))
        );
    }

    #[test]
    fn test_statement_date_preamble_is_not_the_header() {
        let text = "Statement Date  :  01-02-2024\n\
                    Txn Date  Description  Debit  Credit  Balance\n\
                    1 Jan 2024  UPI  250.00  0  9750.00\n";
        let table = parse_sbi_text(text).unwrap();
        assert_eq!(
            table.column_names(),
            vec!["Txn Date", "Description", "Debit", "Credit", "Balance"]
        );
        assert_eq!(table.len(), 1);
        assert_eq!(table.get(0, "Balance"), Some(&Value::Number(9750.0)));
    }

    #[test]
    fn test_no_header_marker() {
        let err = parse_sbi_text("Account Number  :  123\nOpening Balance  :  10.00\n").unwrap_err();
        assert!(matches!(
            err,
            IngestError::Core(CoreError::HeaderNotFound { .. })
        ));
    }

    #[test]
    fn test_legacy_transpose_policy() {
        let parser = parser().with_options(ParseOptions {
            policy: Some(PolicyKind::Transpose),
            ..ParseOptions::default()
        });
        let table = parser.parse_text("Date  01/01\nAmount  5.00\n").unwrap();
        assert_eq!(table.column_names(), vec!["0", "1"]);
        assert_eq!(table.len(), 2);
        assert_eq!(table.get(0, "1"), Some(&Value::Text("Amount".into())));
        // each source line became a column, so numbers share a column with labels
        assert_eq!(table.get(1, "1"), Some(&Value::Text("5.00".into())));
        assert_eq!(table.kind_of("1"), Some(ColumnKind::Text));
    }
}

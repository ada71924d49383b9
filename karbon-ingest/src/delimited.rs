//! Read CSV / text statement exports straight into a [`RawTable`].
//!
//! The first record is the header and must exist. Short records are padded with missing
//! cells; a record wider than the header is an error.

use std::fs::File;
use std::path::Path;

use karbon_core::RawTable;

use crate::IngestError;

/// Cell spellings read as missing.
const NA_TOKENS: &[&str] = &[
    "NA", "N/A", "n/a", "#N/A", "NaN", "nan", "-NaN", "-nan", "null", "NULL", "None",
];

pub fn read_delimited(path: &Path) -> Result<RawTable, IngestError> {
    let csv_err = |source: csv::Error| IngestError::Csv {
        path: path.to_path_buf(),
        source,
    };

    let file = File::open(path).map_err(|source| IngestError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    let mut rdr = csv::ReaderBuilder::new()
        .flexible(true)
        .has_headers(true)
        .from_reader(file);

    let columns: Vec<String> = rdr
        .headers()
        .map_err(csv_err)?
        .iter()
        .map(str::to_string)
        .collect();
    if columns.is_empty() {
        return Err(IngestError::EmptyHeader {
            path: path.to_path_buf(),
        });
    }
    let mut table = RawTable::new(columns);

    for (i, result) in rdr.records().enumerate() {
        let record = result.map_err(csv_err)?;
        if record.len() > table.width() {
            return Err(IngestError::MalformedRow {
                path: path.to_path_buf(),
                record: record.position().map_or(i as u64 + 2, |p| p.line()),
                expected: table.width(),
                found: record.len(),
            });
        }
        table.push_row(record.iter().map(cell).collect());
    }

    log::debug!(
        "read {} columns, {} rows from {}",
        table.width(),
        table.rows.len(),
        path.display()
    );

    Ok(table)
}

fn cell(field: &str) -> Option<String> {
    let trimmed = field.trim();
    if trimmed.is_empty() || NA_TOKENS.contains(&trimmed) {
        None
    } else {
        Some(field.to_string())
    }
}

#[cfg(test)]
mod tests {
    use std::io::Write;

    use pretty_assertions::assert_eq;

    use super::*;

    fn write_csv(contents: &str) -> tempfile::NamedTempFile {
        let mut file = tempfile::Builder::new().suffix(".csv").tempfile().unwrap();
        file.write_all(contents.as_bytes()).unwrap();
        file
    }

    #[test]
    fn test_reads_header_and_rows() {
        let file = write_csv("Date,Description,Amount\n01/01/2024,UPI PAYTM,250.00\n02/01/2024,\"NEFT, SALARY\",\n");
        let table = read_delimited(file.path()).unwrap();
        assert_eq!(table.columns, vec!["Date", "Description", "Amount"]);
        assert_eq!(
            table.rows[1],
            vec![
                Some("02/01/2024".to_string()),
                Some("NEFT, SALARY".to_string()),
                None
            ]
        );
    }

    #[test]
    fn test_short_rows_padded_and_na_tokens_missing() {
        let file = write_csv("A,B,C\n1,NA\n");
        let table = read_delimited(file.path()).unwrap();
        assert_eq!(table.rows, vec![vec![Some("1".to_string()), None, None]]);
    }

    #[test]
    fn test_wide_row_is_malformed() {
        let file = write_csv("A,B\n1,2\n1,2,3\n");
        let err = read_delimited(file.path()).unwrap_err();
        match err {
            IngestError::MalformedRow {
                record,
                expected,
                found,
                ..
            } => {
                assert_eq!(record, 3);
                assert_eq!((expected, found), (2, 3));
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_empty_file_has_no_header() {
        let file = write_csv("");
        let err = read_delimited(file.path()).unwrap_err();
        assert!(matches!(err, IngestError::EmptyHeader { .. }), "{err}");
    }

    #[test]
    fn test_missing_file_is_io_error() {
        let err = read_delimited(Path::new("/nonexistent/statement.csv")).unwrap_err();
        assert!(matches!(err, IngestError::Io { .. }));
    }
}

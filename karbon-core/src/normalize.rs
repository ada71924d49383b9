//! Turn a [`RawTable`] into a typed [`Table`].
//!
//! Steps, in order:
//! 1. clean labels (trim, collapse inner whitespace)
//! 2. cut the columns at the first repeated label
//! 3. drop rows where every cell is missing
//! 4. classify each column as numeric or text
//! 5. fill missing cells: `0.0` for numeric columns, `""` for text

use std::collections::HashSet;

use crate::table::{Column, ColumnKind, RawTable, Table, Value};

/// Normalize a raw table. Pure; never fails.
pub fn normalize(raw: RawTable) -> Table {
    let RawTable { columns, rows } = raw;

    let mut labels: Vec<String> = columns.iter().map(|c| clean_label(c)).collect();
    let keep = unique_prefix_len(&labels);
    if keep < labels.len() {
        log::trace!(
            "label {:?} repeats; dropping {} columns from index {keep}",
            labels[keep],
            labels.len() - keep
        );
    }
    labels.truncate(keep);

    let rows: Vec<Vec<Option<String>>> = rows
        .into_iter()
        .map(|mut row| {
            row.resize(keep, None);
            row
        })
        .filter(|row| !row.iter().all(is_missing))
        .collect();

    let kinds: Vec<ColumnKind> = (0..keep).map(|col| classify(&rows, col)).collect();

    let rows = rows
        .into_iter()
        .map(|row| {
            row.into_iter()
                .zip(&kinds)
                .map(|(cell, kind)| fill(cell, *kind))
                .collect()
        })
        .collect();

    let columns = labels
        .into_iter()
        .zip(kinds)
        .map(|(name, kind)| Column { name, kind })
        .collect();

    Table::from_parts(columns, rows)
}

/// Trim a label and collapse runs of inner whitespace to one space.
pub fn clean_label(label: &str) -> String {
    label.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// Number of leading labels before the first label that repeats.
///
/// Everything from the repeat onward is discarded by [`normalize`]; repeated
/// columns are dropped, not renamed.
pub fn unique_prefix_len(labels: &[String]) -> usize {
    let mut seen = HashSet::new();
    labels
        .iter()
        .position(|label| !seen.insert(label.as_str()))
        .unwrap_or(labels.len())
}

/// Parse a cell as a finite number. `inf` and `NaN` spellings are rejected.
pub fn parse_number(cell: &str) -> Option<f64> {
    let n: f64 = cell.trim().parse().ok()?;
    n.is_finite().then_some(n)
}

fn is_missing(cell: &Option<String>) -> bool {
    cell.as_deref().is_none_or(|s| s.trim().is_empty())
}

/// Numeric when every present cell parses; a column with no present cells is
/// numeric too.
fn classify(rows: &[Vec<Option<String>>], col: usize) -> ColumnKind {
    let numeric = rows
        .iter()
        .filter_map(|row| row.get(col))
        .filter(|cell| !is_missing(cell))
        .all(|cell| cell.as_deref().and_then(parse_number).is_some());

    if numeric {
        ColumnKind::Numeric
    } else {
        ColumnKind::Text
    }
}

fn fill(cell: Option<String>, kind: ColumnKind) -> Value {
    let present = cell.filter(|s| !s.trim().is_empty());
    match (kind, present) {
        (ColumnKind::Numeric, Some(s)) => Value::Number(parse_number(&s).unwrap_or(0.0)),
        (ColumnKind::Numeric, None) => Value::Number(0.0),
        (ColumnKind::Text, Some(s)) => Value::Text(s),
        (ColumnKind::Text, None) => Value::Text(String::new()),
    }
}

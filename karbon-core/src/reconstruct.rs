//! Rebuild column-delimited records from statement lines.
//!
//! Three row policies:
//! - `HeaderAnchored`: the first line is the header; a later line is a row
//!   only if it splits into exactly as many fields.
//! - `MarkerHeader`: the header is the first line matching a marker regex;
//!   preamble before it and repeats of it are skipped.
//! - `Transpose`: legacy layout where the i-th field of every line forms
//!   row i. Only meaningful when every line has the same field count.

use std::sync::LazyLock;

use regex::Regex;

use crate::table::RawTable;
use crate::tokenize::ColumnSplitter;
use crate::{CoreError, PolicyKind};

/// Marker used to find the header line when none is configured: a line
/// naming both a date column and a balance column. Preamble fields such as
/// `Statement Date` carry no balance and do not match.
pub const DEFAULT_MARKER: &str = r"(?i)\bdate\b.*\bbalance\b";

static DEFAULT_MARKER_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(DEFAULT_MARKER).unwrap());

#[derive(Debug, Clone)]
pub enum RowPolicy {
    HeaderAnchored,
    MarkerHeader { marker: Regex },
    Transpose,
}

impl RowPolicy {
    pub fn marker(pattern: &str) -> Result<Self, CoreError> {
        Ok(RowPolicy::MarkerHeader {
            marker: Regex::new(pattern)?,
        })
    }

    /// `MarkerHeader` on [`DEFAULT_MARKER`].
    pub fn default_marker() -> Self {
        RowPolicy::MarkerHeader {
            marker: DEFAULT_MARKER_RE.clone(),
        }
    }

    pub fn kind(&self) -> PolicyKind {
        match self {
            RowPolicy::HeaderAnchored => PolicyKind::Header,
            RowPolicy::MarkerHeader { .. } => PolicyKind::Marker,
            RowPolicy::Transpose => PolicyKind::Transpose,
        }
    }

    pub fn marker_pattern(&self) -> Option<&str> {
        match self {
            RowPolicy::MarkerHeader { marker } => Some(marker.as_str()),
            _ => None,
        }
    }
}

/// Output of reconstruction.
#[derive(Debug, Clone, PartialEq)]
pub struct Reconstruction {
    pub table: RawTable,
    /// Lines that did not become rows (count mismatch, preamble, repeated
    /// headers, or lines cut short by a transpose).
    pub dropped_lines: usize,
}

/// Build a raw table from non-blank `lines` under `policy`.
pub fn reconstruct(
    lines: &[&str],
    splitter: &ColumnSplitter,
    policy: &RowPolicy,
) -> Result<Reconstruction, CoreError> {
    if lines.is_empty() {
        return Err(CoreError::NoLines);
    }

    let out = match policy {
        RowPolicy::HeaderAnchored => header_anchored(lines, splitter),
        RowPolicy::MarkerHeader { marker } => marker_header(lines, splitter, marker)?,
        RowPolicy::Transpose => transpose(lines, splitter),
    };

    log::debug!(
        "{} policy: {} columns, {} rows, {} lines dropped",
        policy.kind(),
        out.table.width(),
        out.table.rows.len(),
        out.dropped_lines
    );

    Ok(out)
}

fn accept_rows<'a>(
    table: &mut RawTable,
    body: impl Iterator<Item = &'a str>,
    splitter: &ColumnSplitter,
    skip_header_repeats: bool,
) -> usize {
    let mut dropped = 0;
    for line in body {
        let fields = splitter.split(line);
        if skip_header_repeats && fields == table.columns {
            log::trace!("skipping repeated header: {line:?}");
            dropped += 1;
            continue;
        }
        if fields.len() != table.width() {
            log::trace!(
                "dropping line with {} fields (expected {}): {line:?}",
                fields.len(),
                table.width()
            );
            dropped += 1;
            continue;
        }
        table.rows.push(fields.into_iter().map(Some).collect());
    }
    dropped
}

fn header_anchored(lines: &[&str], splitter: &ColumnSplitter) -> Reconstruction {
    let mut table = RawTable::new(splitter.split(lines[0]));
    let dropped_lines = accept_rows(&mut table, lines[1..].iter().copied(), splitter, false);
    Reconstruction {
        table,
        dropped_lines,
    }
}

fn marker_header(
    lines: &[&str],
    splitter: &ColumnSplitter,
    marker: &Regex,
) -> Result<Reconstruction, CoreError> {
    let position = lines
        .iter()
        .position(|line| marker.is_match(line))
        .ok_or_else(|| CoreError::HeaderNotFound {
            marker: marker.as_str().to_string(),
        })?;

    let mut table = RawTable::new(splitter.split(lines[position]));
    let body = lines[position + 1..].iter().copied();
    let dropped_lines = position + accept_rows(&mut table, body, splitter, true);

    Ok(Reconstruction {
        table,
        dropped_lines,
    })
}

fn transpose(lines: &[&str], splitter: &ColumnSplitter) -> Reconstruction {
    let records: Vec<Vec<String>> = lines.iter().map(|line| splitter.split(line)).collect();
    let depth = records.iter().map(Vec::len).min().unwrap_or(0);
    let widest = records.iter().map(Vec::len).max().unwrap_or(0);

    if depth != widest || depth != records.len() {
        log::warn!(
            "transpose over {} lines with {depth}..={widest} fields per line; columns will not line up",
            records.len()
        );
    }

    let columns = (0..records.len()).map(|i| i.to_string()).collect();
    let mut table = RawTable::new(columns);
    for i in 0..depth {
        table.push_row(records.iter().map(|fields| fields.get(i).cloned()).collect());
    }

    Reconstruction {
        table,
        dropped_lines: records.iter().filter(|r| r.len() > depth).count(),
    }
}

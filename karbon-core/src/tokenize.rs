//! Line tokenizer and column splitter for text pulled out of statement PDFs.
//!
//! Columns in extracted text are separated by runs of whitespace. A single
//! space belongs to the field ("New York"); a run of `min_gap` or more
//! whitespace characters is a column boundary.

use regex::Regex;

use crate::CoreError;

/// Split text on `\n` and keep the lines that are not blank.
///
/// Line bodies are returned untouched apart from a trailing `\r`.
pub fn lines(text: &str) -> Vec<&str> {
    text.split('\n')
        .map(|line| line.strip_suffix('\r').unwrap_or(line))
        .filter(|line| !line.trim().is_empty())
        .collect()
}

#[derive(Debug, Clone)]
pub struct ColumnSplitter {
    gap: Regex,
    min_gap: usize,
}

impl ColumnSplitter {
    pub const DEFAULT_MIN_GAP: usize = 2;

    pub fn new(min_gap: usize) -> Result<Self, CoreError> {
        if min_gap == 0 {
            return Err(CoreError::InvalidColumnGap(min_gap));
        }
        let gap = Regex::new(&format!(r"\s{{{min_gap},}}"))?;
        Ok(Self { gap, min_gap })
    }

    pub fn min_gap(&self) -> usize {
        self.min_gap
    }

    /// Split one line into fields.
    ///
    /// Leading or trailing gaps yield empty fields, so `"  a  b"` has three.
    pub fn split(&self, line: &str) -> Vec<String> {
        self.gap.split(line).map(str::to_owned).collect()
    }
}

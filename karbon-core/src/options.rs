//! Tunables for text reconstruction, loadable from a config file.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::reconstruct::RowPolicy;
use crate::tokenize::ColumnSplitter;
use crate::CoreError;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PolicyKind {
    Header,
    Marker,
    Transpose,
}

impl fmt::Display for PolicyKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            PolicyKind::Header => "header",
            PolicyKind::Marker => "marker",
            PolicyKind::Transpose => "transpose",
        })
    }
}

impl FromStr for PolicyKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "header" => Ok(PolicyKind::Header),
            "marker" => Ok(PolicyKind::Marker),
            "transpose" => Ok(PolicyKind::Transpose),
            other => Err(format!(
                "unknown policy `{other}` (expected header, marker or transpose)"
            )),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ParseOptions {
    /// Whitespace run length that separates two columns.
    pub min_column_gap: usize,
    /// Overrides the bank's row policy.
    pub policy: Option<PolicyKind>,
    /// Header marker regex for the `marker` policy.
    pub marker: Option<String>,
}

impl Default for ParseOptions {
    fn default() -> Self {
        Self {
            min_column_gap: ColumnSplitter::DEFAULT_MIN_GAP,
            policy: None,
            marker: None,
        }
    }
}

impl ParseOptions {
    pub fn splitter(&self) -> Result<ColumnSplitter, CoreError> {
        ColumnSplitter::new(self.min_column_gap)
    }

    /// Pick the row policy: an explicit `policy` wins over the bank default,
    /// and a configured `marker` replaces the default marker.
    pub fn resolve_policy(&self, default: &RowPolicy) -> Result<RowPolicy, CoreError> {
        let kind = self.policy.unwrap_or_else(|| default.kind());
        match kind {
            PolicyKind::Header => Ok(RowPolicy::HeaderAnchored),
            PolicyKind::Transpose => Ok(RowPolicy::Transpose),
            PolicyKind::Marker => match (&self.marker, default) {
                (Some(pattern), _) => RowPolicy::marker(pattern),
                (None, RowPolicy::MarkerHeader { .. }) => Ok(default.clone()),
                (None, _) => Ok(RowPolicy::default_marker()),
            },
        }
    }
}

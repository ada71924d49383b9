use std::fmt;
use std::str::FromStr;

use karbon_core::{RowPolicy, Table};
use serde::{Deserialize, Serialize};

use crate::dispatch::SourceFormat;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Bank {
    Icici,
    Sbi,
}

impl Bank {
    pub const ALL: [Bank; 2] = [Bank::Icici, Bank::Sbi];

    pub fn profile(self) -> BankProfile {
        match self {
            Bank::Icici => BankProfile {
                bank: self,
                extensions: &["pdf", "csv"],
                policy: RowPolicy::HeaderAnchored,
            },
            Bank::Sbi => BankProfile {
                bank: self,
                extensions: &["pdf", "csv", "txt"],
                policy: RowPolicy::default_marker(),
            },
        }
    }
}

impl fmt::Display for Bank {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(match self {
            Bank::Icici => "icici",
            Bank::Sbi => "sbi",
        })
    }
}

impl FromStr for Bank {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "icici" => Ok(Bank::Icici),
            "sbi" => Ok(Bank::Sbi),
            other => Err(format!("unknown bank `{other}` (expected icici or sbi)")),
        }
    }
}

/// Which files a bank parser accepts and how it rebuilds PDF text.
#[derive(Debug, Clone)]
pub struct BankProfile {
    pub bank: Bank,
    /// Lower-case extensions without the dot.
    pub extensions: &'static [&'static str],
    pub policy: RowPolicy,
}

impl BankProfile {
    pub fn accepts(&self, extension: &str) -> bool {
        self.extensions.contains(&extension)
    }

    /// Human-readable list such as `.pdf, .csv`.
    pub fn expected_extensions(&self) -> String {
        self.extensions
            .iter()
            .map(|e| format!(".{e}"))
            .collect::<Vec<_>>()
            .join(", ")
    }
}

/// A parsed table plus what was discarded on the way.
#[derive(Debug, Clone, PartialEq)]
pub struct ParseReport {
    pub table: Table,
    pub format: SourceFormat,
    /// Pages read from a PDF; zero for delimited input.
    pub pages: usize,
    /// PDF lines that did not become rows.
    pub dropped_lines: usize,
}

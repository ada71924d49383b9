//! Format dispatch and the parse pipeline shared by every bank parser.
//!
//! `.pdf` goes through extraction → reconstruction → normalization;
//! `.csv` (and `.txt` where the bank allows it) goes through the delimited
//! reader → normalization. Dispatch looks only at the extension.

use std::fmt;
use std::path::Path;

use karbon_core::{normalize, reconstruct_text, ParseOptions, Table};
use serde::Serialize;

use crate::delimited::read_delimited;
use crate::extract::{extract_document, PageTextExtractor, PdfTextExtractor};
use crate::{Bank, BankProfile, IngestError, ParseReport};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum SourceFormat {
    Pdf,
    Delimited,
}

impl SourceFormat {
    /// Pick the format for `path` from its extension (case-insensitive).
    pub fn detect(path: &Path, profile: &BankProfile) -> Result<Self, IngestError> {
        let extension = path.extension().map(|e| e.to_string_lossy().into_owned());
        let lowered = extension.as_deref().map(str::to_ascii_lowercase);

        match lowered.as_deref() {
            Some("pdf") if profile.accepts("pdf") => Ok(SourceFormat::Pdf),
            Some(ext) if profile.accepts(ext) => Ok(SourceFormat::Delimited),
            _ => Err(IngestError::UnsupportedFormat {
                path: path.to_path_buf(),
                extension: extension.map_or_else(|| "(none)".to_string(), |e| format!(".{e}")),
                expected: profile.expected_extensions(),
            }),
        }
    }
}

impl fmt::Display for SourceFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            SourceFormat::Pdf => "pdf",
            SourceFormat::Delimited => "delimited",
        })
    }
}

/// A bank parser: profile, reconstruction options and the PDF extractor.
pub struct StatementParser {
    profile: BankProfile,
    options: ParseOptions,
    extractor: Box<dyn PageTextExtractor + Send + Sync>,
}

impl StatementParser {
    pub fn new(bank: Bank) -> Self {
        Self::from_profile(bank.profile())
    }

    pub fn from_profile(profile: BankProfile) -> Self {
        Self {
            profile,
            options: ParseOptions::default(),
            extractor: Box::new(PdfTextExtractor),
        }
    }

    pub fn with_options(mut self, options: ParseOptions) -> Self {
        self.options = options;
        self
    }

    /// Swap the PDF extractor (tests feed canned pages this way).
    pub fn with_extractor(mut self, extractor: impl PageTextExtractor + Send + Sync + 'static) -> Self {
        self.extractor = Box::new(extractor);
        self
    }

    /// Parse a statement file into a table.
    pub fn parse(&self, path: impl AsRef<Path>) -> Result<Table, IngestError> {
        Ok(self.parse_with_report(path)?.table)
    }

    /// Parse a statement file and report what was dropped along the way.
    pub fn parse_with_report(&self, path: impl AsRef<Path>) -> Result<ParseReport, IngestError> {
        let path = path.as_ref();
        let format = SourceFormat::detect(path, &self.profile)?;
        log::debug!("{} parser: {} as {format}", self.profile.bank, path.display());

        let report = match format {
            SourceFormat::Pdf => {
                // validate options before touching the file
                let splitter = self.options.splitter()?;
                let policy = self.options.resolve_policy(&self.profile.policy)?;

                let document = extract_document(path, self.extractor.as_ref())?;
                let rebuilt = reconstruct_text(&document.text(), &splitter, &policy)?;
                ParseReport {
                    table: normalize(rebuilt.table),
                    format,
                    pages: document.page_count(),
                    dropped_lines: rebuilt.dropped_lines,
                }
            }
            SourceFormat::Delimited => ParseReport {
                table: normalize(read_delimited(path)?),
                format,
                pages: 0,
                dropped_lines: 0,
            },
        };

        log::debug!(
            "{}: {} rows x {} columns ({} lines dropped)",
            path.display(),
            report.table.len(),
            report.table.columns().len(),
            report.dropped_lines
        );

        Ok(report)
    }

    /// Rebuild a table from already-extracted statement text.
    pub fn parse_text(&self, text: &str) -> Result<Table, IngestError> {
        let splitter = self.options.splitter()?;
        let policy = self.options.resolve_policy(&self.profile.policy)?;
        let rebuilt = reconstruct_text(text, &splitter, &policy)?;
        Ok(normalize(rebuilt.table))
    }
}

impl fmt::Debug for StatementParser {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("StatementParser")
            .field("profile", &self.profile)
            .field("options", &self.options)
            .finish_non_exhaustive()
    }
}

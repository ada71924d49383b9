//! PDF text extraction.
//!
//! Statement PDFs are read page by page with [`pdf_extract`]. The extractor
//! sits behind [`PageTextExtractor`] so the rest of the pipeline can be fed
//! canned pages in tests.

use std::fs::File;
use std::io::Read;
use std::panic::{self, AssertUnwindSafe};
use std::path::Path;

use crate::IngestError;

/// Error returned by an extractor; kept as the source of
/// [`IngestError::Extraction`].
pub type ExtractError = Box<dyn std::error::Error + Send + Sync>;

/// Black-box "PDF bytes in, one string per page out".
pub trait PageTextExtractor {
    fn extract_pages(&self, pdf_bytes: &[u8]) -> Result<Vec<String>, ExtractError>;
}

/// Extractor backed by `pdf-extract`.
#[derive(Debug, Clone, Copy, Default)]
pub struct PdfTextExtractor;

impl PageTextExtractor for PdfTextExtractor {
    fn extract_pages(&self, pdf_bytes: &[u8]) -> Result<Vec<String>, ExtractError> {
        Ok(pdf_extract::extract_text_from_mem_by_pages(pdf_bytes)?)
    }
}

/// Extracted pages of one PDF, in document order.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Document {
    pub pages: Vec<String>,
}

impl Document {
    pub fn page_count(&self) -> usize {
        self.pages.len()
    }

    /// All page text joined with no separator.
    ///
    /// Page boundaries are not marked, so the last line of a page can run
    /// into the first line of the next.
    pub fn text(&self) -> String {
        self.pages.concat()
    }
}

/// Read `path` and extract its pages with `extractor`.
pub fn extract_document(
    path: &Path,
    extractor: &dyn PageTextExtractor,
) -> Result<Document, IngestError> {
    let bytes = read_file(path)?;
    log::debug!("read {} bytes from {}", bytes.len(), path.display());

    // pdf_extract can panic on malformed input instead of returning an error
    let pages = match panic::catch_unwind(AssertUnwindSafe(|| extractor.extract_pages(&bytes))) {
        Ok(Ok(pages)) => pages,
        Ok(Err(source)) => {
            return Err(IngestError::Extraction {
                path: path.to_path_buf(),
                source,
            });
        }
        Err(_) => {
            return Err(IngestError::ExtractionPanicked {
                path: path.to_path_buf(),
            });
        }
    };

    let empty = pages.iter().filter(|p| p.trim().is_empty()).count();
    log::debug!(
        "extracted {} pages ({empty} without text) from {}",
        pages.len(),
        path.display()
    );

    Ok(Document { pages })
}

fn read_file(path: &Path) -> Result<Vec<u8>, IngestError> {
    let io_err = |source: std::io::Error| IngestError::Io {
        path: path.to_path_buf(),
        source,
    };
    let mut file = File::open(path).map_err(io_err)?;
    let mut bytes = Vec::new();
    file.read_to_end(&mut bytes).map_err(io_err)?;
    Ok(bytes)
}

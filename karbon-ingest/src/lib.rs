//! karbon-ingest: statement ingestion (PDF text, CSV/text exports) and bank-specific parsers.

pub mod delimited;
pub mod dispatch;
pub mod error;
pub mod extract;
pub mod parsers;
pub mod types;

pub use dispatch::{SourceFormat, StatementParser};
pub use error::IngestError;
pub use extract::{Document, ExtractError, PageTextExtractor, PdfTextExtractor};
pub use types::{Bank, BankProfile, ParseReport};

pub use karbon_core::{ColumnKind, ParseOptions, PolicyKind, Table, Value};

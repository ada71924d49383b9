//! Bank-specific statement parsers.

pub mod icici;
pub mod sbi;

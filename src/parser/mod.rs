//! PDF parsing module.

mod options;
mod pdf_parser;

pub use options::{ErrorMode, ParseOptions};
pub use pdf_parser::{is_pdf_bytes, PdfParser};

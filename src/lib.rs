//! # docsift
//!
//! Persona-driven section extraction and ranking for PDF collections.
//!
//! Sections are recovered from each PDF with a three-step fallback: the
//! document outline when it has one, heading-like lines otherwise, and
//! whole pages as a last resort. A locally hosted language model then rates
//! each section against a persona and task, and the best sections are
//! summarized into a JSON report.
//!
//! ## Quick Start
//!
//! ```no_run
//! use docsift::extract_file;
//!
//! fn main() -> docsift::Result<()> {
//!     let doc = extract_file("guide.pdf")?;
//!     println!("{} ({} pages)", doc.title, doc.total_pages);
//!     for section in &doc.sections {
//!         println!("p.{} {}", section.page, section.text);
//!     }
//!     Ok(())
//! }
//! ```
//!
//! ## Ranking a collection
//!
//! ```no_run
//! use docsift::{wait_until_ready, Analyzer, Manifest, OllamaClient};
//! use std::time::Duration;
//!
//! fn main() -> docsift::Result<()> {
//!     let manifest = Manifest::load("collection/input.json")?;
//!     let client = OllamaClient::new().with_model("tinyllama");
//!     wait_until_ready(&client, 5, Duration::from_secs(3))?;
//!
//!     let report = Analyzer::new(client)
//!         .analyze(&manifest, &Manifest::pdf_dir("collection/input.json"))?;
//!     report.write("collection/output/report.json")?;
//!     Ok(())
//! }
//! ```

pub mod analysis;
pub mod collection;
pub mod error;
pub mod llm;
pub mod model;
pub mod parser;
pub mod pipeline;

// Re-export commonly used types
pub use analysis::{Analyzer, AnalyzerOptions, Progress, Report, ScoredSection};
pub use collection::{
    extract_collection, extract_document, DocumentEntry, ExtractedDocument, Job, Manifest,
    Outcome, Persona,
};
pub use error::{Error, Result};
pub use llm::{wait_until_ready, OllamaClient, TextGenerator};
pub use model::{Document, Outline, Page, Section};
pub use parser::{ErrorMode, ParseOptions, PdfParser};
pub use pipeline::{extract_sections, is_heading, Strategy};

use std::io::Read;
use std::path::Path;

/// Load a PDF file into a [`Document`].
///
/// # Example
///
/// ```no_run
/// use docsift::parse_file;
///
/// let doc = parse_file("document.pdf").unwrap();
/// println!("Pages: {}", doc.page_count());
/// ```
pub fn parse_file<P: AsRef<Path>>(path: P) -> Result<Document> {
    let parser = PdfParser::open(path)?;
    parser.parse()
}

/// Load a PDF file with custom options.
pub fn parse_file_with_options<P: AsRef<Path>>(path: P, options: ParseOptions) -> Result<Document> {
    let parser = PdfParser::open_with_options(path, options)?;
    parser.parse()
}

/// Load a PDF from bytes.
pub fn parse_bytes(data: &[u8]) -> Result<Document> {
    let parser = PdfParser::from_bytes(data)?;
    parser.parse()
}

/// Load a PDF from a reader.
pub fn parse_reader<R: Read>(reader: R) -> Result<Document> {
    let parser = PdfParser::from_reader(reader)?;
    parser.parse()
}

/// Extract the title, page count and sections of a PDF file.
pub fn extract_file<P: AsRef<Path>>(path: P) -> Result<ExtractedDocument> {
    collection::extract_file(path, &ParseOptions::default())
}

/// Extract the title, page count and sections of a PDF held in memory.
pub fn extract_bytes(data: &[u8]) -> Result<ExtractedDocument> {
    let doc = parse_bytes(data)?;
    Ok(ExtractedDocument {
        title: doc.title(),
        total_pages: doc.page_count(),
        sections: extract_sections(&doc),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_bytes_empty_data() {
        let data: [u8; 0] = [];
        assert!(matches!(parse_bytes(&data), Err(Error::UnknownFormat)));
    }

    #[test]
    fn test_parse_bytes_unknown_magic() {
        let data = [0xFF, 0xFE, 0x00, 0x01, 0x02, 0x03, 0x04, 0x05, 0x06, 0x07];
        assert!(parse_bytes(&data).is_err());
    }

    #[test]
    fn test_extract_bytes_rejects_garbage() {
        assert!(extract_bytes(b"not a pdf").is_err());
    }

    #[test]
    fn test_parse_file_missing_is_unavailable() {
        let err = parse_file("/no/such/file.pdf").unwrap_err();
        assert!(err.is_unavailable());
    }
}

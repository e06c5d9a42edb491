//! Error types for docsift library.

use std::io;
use thiserror::Error;

/// Result type alias for docsift operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Error types that can occur while extracting and ranking sections.
#[derive(Error, Debug)]
pub enum Error {
    /// I/O error when reading or writing files.
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    /// The file format is not recognized as PDF.
    #[error("Unknown file format: not a valid PDF")]
    UnknownFormat,

    /// Error parsing PDF structure.
    #[error("PDF parsing error: {0}")]
    PdfParse(String),

    /// The PDF document is encrypted.
    #[error("Document is encrypted")]
    Encrypted,

    /// Error extracting text content.
    #[error("Text extraction error: {0}")]
    TextExtract(String),

    /// The manifest could not be read or is malformed.
    #[error("Invalid manifest: {0}")]
    Manifest(String),

    /// JSON (de)serialization error.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Transport error talking to the model endpoint.
    #[error("Model request failed: {0}")]
    Http(#[from] reqwest::Error),

    /// The model endpoint answered with an unexpected payload.
    #[error("Model response error: {0}")]
    Model(String),

    /// The model endpoint never became ready.
    #[error("Model service not available after {0} attempts")]
    ServiceUnavailable(u32),

    /// No document in the collection produced any section.
    #[error("No sections were extracted from any document")]
    NoSections,
}

impl Error {
    /// Whether this error means the document should be skipped rather than
    /// reported as a parse failure.
    pub fn is_unavailable(&self) -> bool {
        match self {
            Error::Encrypted => true,
            Error::Io(e) => e.kind() == io::ErrorKind::NotFound,
            _ => false,
        }
    }
}

impl From<lopdf::Error> for Error {
    fn from(err: lopdf::Error) -> Self {
        match err {
            lopdf::Error::IO(e) => Error::Io(e),
            lopdf::Error::Decryption(_) => Error::Encrypted,
            _ => Error::PdfParse(err.to_string()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = Error::Encrypted;
        assert_eq!(err.to_string(), "Document is encrypted");

        let err = Error::ServiceUnavailable(5);
        assert_eq!(
            err.to_string(),
            "Model service not available after 5 attempts"
        );
    }

    #[test]
    fn test_io_error_conversion() {
        let io_err = io::Error::new(io::ErrorKind::NotFound, "file not found");
        let err: Error = io_err.into();
        assert!(matches!(err, Error::Io(_)));
        assert!(err.is_unavailable());
    }

    #[test]
    fn test_unavailable_classification() {
        assert!(Error::Encrypted.is_unavailable());
        assert!(!Error::PdfParse("bad xref".into()).is_unavailable());
        assert!(!Error::UnknownFormat.is_unavailable());
    }
}

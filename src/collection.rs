//! Document collections: the input manifest and batch extraction.
//!
//! A failure in one document never stops the others. Missing and encrypted
//! files are skipped with a warning; anything else is logged as an error and
//! the document contributes no sections.

use std::panic::{self, AssertUnwindSafe};
use std::path::{Path, PathBuf};

use rayon::prelude::*;
use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};
use crate::model::Section;
use crate::parser::{ParseOptions, PdfParser};
use crate::pipeline::extract_sections;

/// Directory, next to the manifest, holding the collection's PDF files.
pub const PDF_DIR_NAME: &str = "PDFs";

/// Input manifest describing a collection and who it is analyzed for.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Manifest {
    /// Documents of the collection
    pub documents: Vec<DocumentEntry>,

    /// Who the analysis is for
    pub persona: Persona,

    /// What they are trying to get done
    pub job_to_be_done: Job,
}

/// One document listed in the manifest.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DocumentEntry {
    /// File name, relative to the PDF directory
    pub filename: String,

    /// Optional display title
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
}

/// Persona descriptor.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Persona {
    /// Role, e.g. "Travel Planner"
    pub role: String,
}

/// Job descriptor.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Job {
    /// Task statement
    pub task: String,
}

impl Manifest {
    /// Load a manifest from a JSON file.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let data = std::fs::read_to_string(path.as_ref())?;
        Self::from_json(&data)
    }

    /// Parse a manifest from JSON text.
    pub fn from_json(data: &str) -> Result<Self> {
        serde_json::from_str(data).map_err(|e| Error::Manifest(e.to_string()))
    }

    /// Directory holding the PDFs of the manifest at `manifest_path`.
    pub fn pdf_dir<P: AsRef<Path>>(manifest_path: P) -> PathBuf {
        manifest_path
            .as_ref()
            .parent()
            .filter(|p| !p.as_os_str().is_empty())
            .unwrap_or_else(|| Path::new("."))
            .join(PDF_DIR_NAME)
    }

    /// File names of all listed documents.
    pub fn filenames(&self) -> Vec<String> {
        self.documents.iter().map(|d| d.filename.clone()).collect()
    }
}

/// A document reduced to its title, page count and sections.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExtractedDocument {
    /// Resolved document title
    pub title: String,

    /// Total number of pages
    pub total_pages: u32,

    /// Filtered sections
    pub sections: Vec<Section>,
}

/// Result of extracting a single document.
#[derive(Debug)]
pub enum Outcome {
    /// The document was read
    Extracted(ExtractedDocument),
    /// The document is missing or encrypted and was skipped
    Unavailable(Error),
    /// The document could not be parsed
    Failed(Error),
}

impl Outcome {
    /// Sections of an extracted document, empty otherwise.
    pub fn into_sections(self) -> Vec<Section> {
        match self {
            Outcome::Extracted(doc) => doc.sections,
            Outcome::Unavailable(_) | Outcome::Failed(_) => Vec::new(),
        }
    }
}

/// Extract the title and sections of one PDF file.
pub fn extract_file<P: AsRef<Path>>(path: P, options: &ParseOptions) -> Result<ExtractedDocument> {
    let parser = PdfParser::open_with_options(path, options.clone())?;
    let doc = parser.parse()?;
    Ok(ExtractedDocument {
        title: doc.title(),
        total_pages: doc.page_count(),
        sections: extract_sections(&doc),
    })
}

/// Extract one document, classifying failures instead of returning them.
pub fn extract_document(path: &Path, options: &ParseOptions) -> Outcome {
    if !path.exists() {
        log::warn!("PDF not found: {}", path.display());
        let err = std::io::Error::new(std::io::ErrorKind::NotFound, path.display().to_string());
        return Outcome::Unavailable(err.into());
    }

    log::info!("Parsing document: {}", path.display());
    let result = panic::catch_unwind(AssertUnwindSafe(|| extract_file(path, options)))
        .unwrap_or_else(|_| Err(Error::PdfParse("parser panicked".to_string())));
    match result {
        Ok(doc) => Outcome::Extracted(doc),
        Err(e) if e.is_unavailable() => {
            log::warn!("Skipping {}: {}", path.display(), e);
            Outcome::Unavailable(e)
        }
        Err(e) => {
            log::error!("Fatal error parsing PDF {}: {}", path.display(), e);
            Outcome::Failed(e)
        }
    }
}

/// Extract every listed document and tag its sections with the file name.
///
/// Sections come back in manifest order whether or not documents are
/// processed in parallel.
pub fn extract_collection(
    documents: &[DocumentEntry],
    pdf_dir: &Path,
    options: &ParseOptions,
) -> Vec<Section> {
    log::info!("Looking for PDFs in: {}", pdf_dir.display());

    let extract = |entry: &DocumentEntry| -> Vec<Section> {
        extract_document(&pdf_dir.join(&entry.filename), options)
            .into_sections()
            .into_iter()
            .map(|s| s.with_document(entry.filename.clone()))
            .collect()
    };

    let per_document: Vec<Vec<Section>> = if options.parallel {
        documents.par_iter().map(extract).collect()
    } else {
        documents.iter().map(extract).collect()
    };

    per_document.into_iter().flatten().collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    const MANIFEST: &str = r#"{
        "challenge_info": {"challenge_id": "round_1b_002"},
        "documents": [
            {"filename": "South of France - Cities.pdf", "title": "Cities"},
            {"filename": "South of France - Cuisine.pdf"}
        ],
        "persona": {"role": "Travel Planner"},
        "job_to_be_done": {"task": "Plan a trip of 4 days for a group of 10 college friends."}
    }"#;

    #[test]
    fn test_manifest_from_json() {
        let manifest = Manifest::from_json(MANIFEST).unwrap();
        assert_eq!(manifest.documents.len(), 2);
        assert_eq!(manifest.documents[0].title.as_deref(), Some("Cities"));
        assert!(manifest.documents[1].title.is_none());
        assert_eq!(manifest.persona.role, "Travel Planner");
        assert!(manifest.job_to_be_done.task.starts_with("Plan a trip"));
        assert_eq!(
            manifest.filenames(),
            vec!["South of France - Cities.pdf", "South of France - Cuisine.pdf"]
        );
    }

    #[test]
    fn test_manifest_missing_field() {
        let result = Manifest::from_json(r#"{"documents": []}"#);
        assert!(matches!(result, Err(Error::Manifest(_))));
    }

    #[test]
    fn test_pdf_dir_next_to_manifest() {
        assert_eq!(
            Manifest::pdf_dir("collection/input.json"),
            PathBuf::from("collection").join("PDFs")
        );
        assert_eq!(Manifest::pdf_dir("input.json"), PathBuf::from(".").join("PDFs"));
    }

    #[test]
    fn test_missing_document_is_unavailable() {
        let outcome = extract_document(Path::new("/definitely/not/here.pdf"), &ParseOptions::default());
        assert!(matches!(outcome, Outcome::Unavailable(_)));
        assert!(outcome.into_sections().is_empty());
    }

    #[test]
    fn test_collection_skips_bad_documents() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("notes.pdf"), b"plain text, not a pdf").unwrap();

        let documents = vec![
            DocumentEntry { filename: "missing.pdf".into(), title: None },
            DocumentEntry { filename: "notes.pdf".into(), title: None },
        ];

        for options in [ParseOptions::default(), ParseOptions::default().sequential()] {
            let sections = extract_collection(&documents, dir.path(), &options);
            assert!(sections.is_empty());
        }
    }
}

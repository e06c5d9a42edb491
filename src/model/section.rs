//! Section type produced by the pipeline.

use serde::{Deserialize, Serialize};

/// A titled, contiguous span of a document's text.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Section {
    /// Heading text
    pub text: String,

    /// Page the section starts on (1-indexed)
    pub page: u32,

    /// Section body
    pub content: String,

    /// Source document file name, attached once the document is known
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub document: Option<String>,
}

impl Section {
    /// Create a section that is not yet tied to a document.
    pub fn new(text: impl Into<String>, page: u32, content: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            page,
            content: content.into(),
            document: None,
        }
    }

    /// Attach the source document name.
    pub fn with_document(mut self, document: impl Into<String>) -> Self {
        self.document = Some(document.into());
        self
    }

    /// Number of characters of content left after trimming whitespace.
    pub fn content_len(&self) -> usize {
        self.content.trim().chars().count()
    }
}

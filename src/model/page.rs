//! Page-level types.

use serde::{Deserialize, Serialize};

/// Page object identifier: (object number, generation number).
pub type PageId = (u32, u16);

/// A single page of extracted text.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Page {
    /// Page number (1-indexed)
    pub number: u32,

    /// Extracted plain text; empty when nothing could be extracted
    pub text: String,

    /// Identity of the page object in the source file, if known
    #[serde(skip)]
    pub object_id: Option<PageId>,
}

impl Page {
    /// Create a page with the given text.
    pub fn new(number: u32, text: impl Into<String>) -> Self {
        Self {
            number,
            text: text.into(),
            object_id: None,
        }
    }

    /// Create a page whose text could not be extracted.
    pub fn blank(number: u32) -> Self {
        Self::new(number, String::new())
    }

    /// Attach the page object identity.
    pub fn with_object_id(mut self, id: PageId) -> Self {
        self.object_id = Some(id);
        self
    }

    /// Number of characters left after trimming surrounding whitespace.
    pub fn stripped_len(&self) -> usize {
        self.text.trim().chars().count()
    }

    /// Check if the page carries no text at all.
    pub fn is_empty(&self) -> bool {
        self.text.is_empty()
    }
}

//! Document-level types.

use super::{Destination, Outline, Page, PageId};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Placeholder used when no title can be found.
pub const UNTITLED: &str = "Untitled Document";

/// A loaded PDF document, reduced to what section extraction needs.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Document {
    /// Document metadata (title, version, etc.)
    pub metadata: Metadata,

    /// Pages in the document
    pub pages: Vec<Page>,

    /// Document outline (bookmarks)
    pub outline: Option<Outline>,

    /// Page object → page number, when the source provided one
    #[serde(skip)]
    page_index: Option<HashMap<PageId, u32>>,
}

impl Document {
    /// Create a new empty document.
    pub fn new() -> Self {
        Self {
            metadata: Metadata::default(),
            pages: Vec::new(),
            outline: None,
            page_index: None,
        }
    }

    /// Get the number of pages in the document.
    pub fn page_count(&self) -> u32 {
        self.pages.len() as u32
    }

    /// Get a page by number (1-indexed).
    pub fn get_page(&self, page_num: u32) -> Option<&Page> {
        if page_num == 0 {
            return None;
        }
        self.pages.get((page_num - 1) as usize)
    }

    /// Add a page to the document.
    pub fn add_page(&mut self, page: Page) {
        self.pages.push(page);
    }

    /// Check if the document has any pages.
    pub fn is_empty(&self) -> bool {
        self.pages.is_empty()
    }

    /// Check if the document carries a non-empty outline.
    pub fn has_outline(&self) -> bool {
        self.outline.as_ref().is_some_and(|o| !o.is_empty())
    }

    /// Build the page object index from the pages' object ids.
    pub fn index_pages(&mut self) {
        let index = self
            .pages
            .iter()
            .filter_map(|p| p.object_id.map(|id| (id, p.number)))
            .collect();
        self.page_index = Some(index);
    }

    /// Whether a page object index is available.
    pub fn has_page_index(&self) -> bool {
        self.page_index.is_some()
    }

    /// Resolve a bookmark destination to a page number (1-indexed).
    ///
    /// Page objects are looked up in the page index first; when the index is
    /// missing or does not know the object, every page is compared by object
    /// identity.
    pub fn page_number(&self, target: &Destination) -> Option<u32> {
        match *target {
            Destination::Index(index) => {
                let number = index.checked_add(1)?;
                (number <= self.page_count()).then_some(number)
            }
            Destination::Page(id) => self
                .page_index
                .as_ref()
                .and_then(|index| index.get(&id).copied())
                .or_else(|| self.scan_for_page(id)),
        }
    }

    fn scan_for_page(&self, id: PageId) -> Option<u32> {
        self.pages
            .iter()
            .find(|p| p.object_id == Some(id))
            .map(|p| p.number)
    }

    /// Resolve the document title.
    ///
    /// Uses the metadata title when present, else the first line longer than
    /// five characters among the first five lines of page 1.
    pub fn title(&self) -> String {
        if let Some(title) = self.metadata.title.as_deref().filter(|t| !t.is_empty()) {
            return title.to_string();
        }

        self.pages
            .first()
            .and_then(|page| {
                page.text
                    .split('\n')
                    .take(5)
                    .map(str::trim)
                    .find(|line| line.chars().count() > 5)
            })
            .map(String::from)
            .unwrap_or_else(|| UNTITLED.to_string())
    }
}

impl Default for Document {
    fn default() -> Self {
        Self::new()
    }
}

/// Document metadata.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Metadata {
    /// Document title
    pub title: Option<String>,

    /// PDF version (e.g., "1.7")
    pub pdf_version: String,

    /// Total number of pages
    pub page_count: u32,
}

impl Metadata {
    /// Create new metadata with PDF version.
    pub fn with_version(version: impl Into<String>) -> Self {
        Self {
            pdf_version: version.into(),
            ..Default::default()
        }
    }
}

//! Section extraction pipeline.
//!
//! Three strategies are tried in a fixed order and the first one that
//! produces any section wins:
//!
//! 1. [`Strategy::Outline`]: one section per document bookmark;
//! 2. [`Strategy::Headings`]: segmentation at heading-like lines;
//! 3. [`Strategy::PageOverview`]: one section per page with enough text.
//!
//! The winning strategy's sections are then filtered so that every returned
//! section has more than [`MIN_SECTION_CHARS`] characters of content.
//!
//! # Example
//!
//! ```
//! use docsift::model::{Document, Page};
//! use docsift::pipeline::extract_sections;
//!
//! let mut doc = Document::new();
//! let body = "Plenty of prose about the region. ".repeat(10);
//! doc.add_page(Page::new(1, format!("INTRODUCTION\n{}", body)));
//!
//! let sections = extract_sections(&doc);
//! assert_eq!(sections.len(), 1);
//! assert_eq!(sections[0].text, "INTRODUCTION");
//! ```

mod fallback;
mod heading;
mod outline;

pub use fallback::{build_from_headings, build_page_overviews, MIN_OVERVIEW_PAGE_CHARS};
pub use heading::{is_heading, is_title_case, is_upper_case};
pub use outline::{resolve as resolve_outline, MIN_OUTLINE_CONTENT_CHARS};

use log::{error, info, warn};

use crate::model::{Document, Section};

/// Sections at or below this many characters of content are never returned.
pub const MIN_SECTION_CHARS: usize = 200;

/// Section discovery strategy.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Strategy {
    /// Bookmarks from the document outline
    Outline,
    /// Heading lines detected in page text
    Headings,
    /// One section per page
    PageOverview,
}

impl Strategy {
    /// All strategies in priority order.
    pub const ORDER: [Strategy; 3] = [Strategy::Outline, Strategy::Headings, Strategy::PageOverview];

    /// Run this strategy on a document.
    pub fn run(self, doc: &Document) -> Vec<Section> {
        match self {
            Strategy::Outline => outline::resolve(doc),
            Strategy::Headings => fallback::build_from_headings(&doc.pages),
            Strategy::PageOverview => fallback::build_page_overviews(&doc.pages),
        }
    }

    /// Short human-readable name.
    pub fn name(self) -> &'static str {
        match self {
            Strategy::Outline => "outline",
            Strategy::Headings => "headings",
            Strategy::PageOverview => "page-overview",
        }
    }

    fn announce(self, doc: &Document) {
        match self {
            Strategy::Outline => {
                if doc.has_outline() {
                    info!("Found PDF outline, extracting sections from bookmarks");
                }
            }
            Strategy::Headings => {
                warn!("No usable outline, falling back to text-based heading detection")
            }
            Strategy::PageOverview => {
                error!("No headings found, treating each page as a section")
            }
        }
    }
}

impl std::fmt::Display for Strategy {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

/// Extract the final, filtered section list of a document.
pub fn extract_sections(doc: &Document) -> Vec<Section> {
    extract_sections_with_strategy(doc)
        .map(|(_, sections)| sections)
        .unwrap_or_default()
}

/// Like [`extract_sections`], also reporting which strategy produced the
/// sections. Returns `None` when every strategy came up empty.
///
/// The strategy is the one whose output was kept, even if the length filter
/// removed all of it afterwards.
pub fn extract_sections_with_strategy(doc: &Document) -> Option<(Strategy, Vec<Section>)> {
    let (strategy, sections) = Strategy::ORDER.iter().find_map(|&strategy| {
        strategy.announce(doc);
        let sections = strategy.run(doc);
        (!sections.is_empty()).then_some((strategy, sections))
    })?;

    Some((strategy, filter_sections(sections)))
}

/// Keep sections with more than [`MIN_SECTION_CHARS`] characters of content.
pub fn filter_sections(sections: Vec<Section>) -> Vec<Section> {
    sections
        .into_iter()
        .filter(|s| s.content_len() > MIN_SECTION_CHARS)
        .collect()
}

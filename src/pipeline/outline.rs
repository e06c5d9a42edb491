//! Sections from the document outline.

use log::debug;

use crate::model::{Bookmark, Document, Section};

/// Outline sections at or below this many characters are dropped before
/// the global length filter runs.
pub const MIN_OUTLINE_CONTENT_CHARS: usize = 100;

/// Build one section per resolvable bookmark.
///
/// Returns an empty list when the document has no outline. A bookmark's
/// span runs from its own page up to the page before the next bookmark in
/// preorder when that page is strictly later, otherwise to the last page of
/// the document.
pub fn resolve(doc: &Document) -> Vec<Section> {
    let Some(outline) = doc.outline.as_ref().filter(|o| !o.is_empty()) else {
        return Vec::new();
    };

    let bookmarks = outline.flatten();
    let mut sections = Vec::new();

    for (i, bookmark) in bookmarks.iter().enumerate() {
        let Some(page) = resolve_page(doc, bookmark) else {
            debug!("Dropping bookmark {:?}: target page not found", bookmark.title);
            continue;
        };

        let end = span_end(doc, page, bookmarks.get(i + 1));
        let content = span_text(doc, page, end);

        if content.chars().count() > MIN_OUTLINE_CONTENT_CHARS {
            sections.push(Section::new(bookmark.title.clone(), page, content));
        }
    }

    sections
}

fn resolve_page(doc: &Document, bookmark: &Bookmark) -> Option<u32> {
    bookmark.target.as_ref().and_then(|t| doc.page_number(t))
}

/// Last page (inclusive) covered by a bookmark starting on `page`.
fn span_end(doc: &Document, page: u32, next: Option<&Bookmark>) -> u32 {
    match next.and_then(|b| resolve_page(doc, b)) {
        Some(next_page) if next_page > page => next_page - 1,
        _ => doc.page_count(),
    }
}

/// Text of pages `start..=end`, one line break after each page, trimmed.
fn span_text(doc: &Document, start: u32, end: u32) -> String {
    let mut content = String::new();
    for number in start..=end {
        if let Some(page) = doc.get_page(number) {
            content.push_str(&page.text);
            content.push('\n');
        }
    }
    content.trim().to_string()
}

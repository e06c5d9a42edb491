//! Sections recovered from page text when no outline is usable.

use crate::model::{Page, Section};

use super::heading::is_heading;

/// Pages at or below this many characters get no overview section.
pub const MIN_OVERVIEW_PAGE_CHARS: usize = 100;

/// Segment page text into sections at detected heading lines.
///
/// Text before the first heading is discarded. Every other line is copied
/// into the open section followed by a line break.
pub fn build_from_headings(pages: &[Page]) -> Vec<Section> {
    let mut sections = Vec::new();
    let mut open: Option<Section> = None;

    for page in pages {
        for line in page.text.split('\n') {
            if is_heading(line) {
                sections.extend(open.take());
                open = Some(Section::new(line.trim(), page.number, String::new()));
            } else if let Some(section) = open.as_mut() {
                section.content.push_str(line);
                section.content.push('\n');
            }
        }
    }

    sections.extend(open);
    sections
}

/// One `"Page N - Overview"` section for every page with enough text.
pub fn build_page_overviews(pages: &[Page]) -> Vec<Section> {
    pages
        .iter()
        .filter(|page| page.stripped_len() > MIN_OVERVIEW_PAGE_CHARS)
        .map(|page| {
            Section::new(
                format!("Page {} - Overview", page.number),
                page.number,
                page.text.clone(),
            )
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_lines_before_first_heading_are_discarded() {
        let pages = vec![Page::new(
            1,
            "preamble that is not a heading.\nINTRODUCTION\nfirst line of body.\nsecond line of body.",
        )];

        let sections = build_from_headings(&pages);
        assert_eq!(sections.len(), 1);
        assert_eq!(sections[0].text, "INTRODUCTION");
        assert_eq!(sections[0].page, 1);
        assert_eq!(
            sections[0].content,
            "first line of body.\nsecond line of body.\n"
        );
    }

    #[test]
    fn test_sections_continue_across_pages() {
        let pages = vec![
            Page::new(1, "OVERVIEW\nalpha body line.\n"),
            Page::new(2, "more alpha on page two.\n2. Next Part\nbeta body line."),
        ];

        let sections = build_from_headings(&pages);
        assert_eq!(sections.len(), 2);

        assert_eq!(sections[0].text, "OVERVIEW");
        assert!(sections[0].content.contains("more alpha on page two."));

        assert_eq!(sections[1].text, "2. Next Part");
        assert_eq!(sections[1].page, 2);
        assert_eq!(sections[1].content, "beta body line.\n");
    }

    #[test]
    fn test_heading_text_is_trimmed() {
        let pages = vec![Page::new(4, "   Local Cuisine   \nbody text here.")];
        let sections = build_from_headings(&pages);
        assert_eq!(sections[0].text, "Local Cuisine");
        assert_eq!(sections[0].page, 4);
    }

    #[test]
    fn test_no_headings_yields_nothing() {
        let pages = vec![Page::new(1, "only lower case prose here.\nand more prose.")];
        assert!(build_from_headings(&pages).is_empty());
    }

    #[test]
    fn test_page_overviews_skip_short_pages() {
        let long = "x".repeat(101);
        let pages = vec![
            Page::new(1, long.clone()),
            Page::new(2, format!("   {}   ", "y".repeat(100))),
            Page::blank(3),
            Page::new(4, long),
        ];

        let sections = build_page_overviews(&pages);
        let titles: Vec<_> = sections.iter().map(|s| s.text.as_str()).collect();
        assert_eq!(titles, vec!["Page 1 - Overview", "Page 4 - Overview"]);
        assert_eq!(sections[1].page, 4);
    }
}

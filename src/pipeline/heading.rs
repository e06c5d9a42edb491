//! Line-level heading heuristics.

use once_cell::sync::Lazy;
use regex::Regex;

/// Lines longer than this are never headings.
const MAX_HEADING_CHARS: usize = 150;

/// Title-case lines must have fewer words than this.
const TITLE_CASE_MAX_WORDS: usize = 10;

/// Upper-case lines must have fewer words than this.
const UPPER_CASE_MAX_WORDS: usize = 8;

// "1. ", "2.3. ", "10.1.4.\t"
static NUMBERED_HEADING: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^\d+(\.\d+)*\.\s").expect("numbered heading pattern"));

/// Decide whether a line of text looks like a section heading.
///
/// The rules are tried in order on the trimmed line:
///
/// 1. empty lines and lines over 150 characters are rejected;
/// 2. title-cased lines with fewer than 10 words that do not end in
///    `.`, `,` or `;` are accepted;
/// 3. all upper-case lines with fewer than 8 words are accepted;
/// 4. lines starting with a number such as `1. ` or `2.3. ` are accepted.
pub fn is_heading(line: &str) -> bool {
    let line = line.trim();
    if line.is_empty() || line.chars().count() > MAX_HEADING_CHARS {
        return false;
    }

    let words = line.split_whitespace().count();

    if !line.ends_with(['.', ',', ';']) && is_title_case(line) && words < TITLE_CASE_MAX_WORDS {
        return true;
    }

    if is_upper_case(line) && words < UPPER_CASE_MAX_WORDS {
        return true;
    }

    NUMBERED_HEADING.is_match(line)
}

/// Title-case check over cased runs.
///
/// Every run of cased letters must start with an upper-case letter and
/// continue in lower case, and at least one cased letter must be present.
/// Digits, spaces and punctuation break runs, so `"1. Getting Started"` and
/// `"Nice-To-Have"` qualify while `"INTRODUCTION"` and `"Don't"` do not.
pub fn is_title_case(text: &str) -> bool {
    let mut in_run = false;
    let mut seen_cased = false;

    for c in text.chars() {
        if c.is_uppercase() {
            if in_run {
                return false;
            }
            in_run = true;
            seen_cased = true;
        } else if c.is_lowercase() {
            if !in_run {
                return false;
            }
            seen_cased = true;
        } else {
            in_run = false;
        }
    }

    seen_cased
}

/// At least one cased letter and no lower-case ones.
pub fn is_upper_case(text: &str) -> bool {
    let mut seen_upper = false;
    for c in text.chars() {
        if c.is_lowercase() {
            return false;
        }
        if c.is_uppercase() {
            seen_upper = true;
        }
    }
    seen_upper
}

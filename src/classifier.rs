//! Heading detection for bot output lines
//!
//! The model marks section titles with markdown bold (`**Title**`). A line is
//! a heading only when the whole trimmed line is wrapped in the delimiter
//! pair; everything else renders as body text, unchanged.
//!
//! Upstream output sometimes closes a title with a single `*`
//! (`**Title*`). Those lines are not headings: they fall through as body
//! text with the markers left in place.

use serde::Serialize;

const DELIMITER: &str = "**";

/// A line of bot text ready for rendering
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ClassifiedLine {
    pub text: String,
    pub is_heading: bool,
}

/// Classify a single line. Never fails.
pub fn classify(line: &str) -> ClassifiedLine {
    let trimmed = line.trim();
    match strip_heading(trimmed) {
        Some(content) => ClassifiedLine {
            text: content.to_string(),
            is_heading: true,
        },
        None => ClassifiedLine {
            text: trimmed.to_string(),
            is_heading: false,
        },
    }
}

/// Classify every line of a bot turn, preserving order
pub fn classify_lines<S: AsRef<str>>(lines: &[S]) -> Vec<ClassifiedLine> {
    lines.iter().map(|l| classify(l.as_ref())).collect()
}

/// Remove exactly one leading and one trailing delimiter pair.
///
/// The two pairs must not overlap, so `**` and `***` are not headings.
fn strip_heading(line: &str) -> Option<&str> {
    line.strip_prefix(DELIMITER)?.strip_suffix(DELIMITER)
}

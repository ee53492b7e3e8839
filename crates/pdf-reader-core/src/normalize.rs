//! Whitespace normalization for extracted text.

use std::sync::LazyLock;

use regex::Regex;

static WHITESPACE_RUN: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\s+").unwrap());
static BLANK_LINE_RUN: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\n{3,}").unwrap());

/// Collapse whitespace in extracted text.
///
/// Every whitespace run (newlines included) becomes a single space, then
/// runs of three or more newlines become exactly two, then the result is
/// trimmed. The first step already removes every newline, so paragraph
/// structure does not survive cleaning; both steps are kept so the output
/// stays stable for existing consumers.
pub fn clean_text(text: &str) -> String {
    let collapsed = WHITESPACE_RUN.replace_all(text, " ");
    let collapsed = BLANK_LINE_RUN.replace_all(&collapsed, "\n\n");
    collapsed.trim().to_string()
}

//! Page-range expressions like `"all"` or `"1,3-5"`.
//!
//! Resolution is lenient: tokens that do not parse, and pages outside
//! `1..=page_count`, are dropped instead of reported.

use std::collections::BTreeSet;

/// Expression selecting every page.
pub const ALL_PAGES: &str = "all";

/// A resolved page selection (1-indexed page numbers).
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PageSelection {
    /// Every page of a document with `page_count` pages.
    All {
        /// Number of pages in the document.
        page_count: usize,
    },
    /// An explicit, sorted, duplicate-free list of pages.
    Pages(Vec<usize>),
}

impl PageSelection {
    /// Resolve `expression` against a document with `page_count` pages.
    pub fn resolve(expression: &str, page_count: usize) -> Self {
        if expression.trim() == ALL_PAGES {
            return PageSelection::All { page_count };
        }

        let mut pages = BTreeSet::new();
        for token in expression.split(',') {
            if token.contains('-') {
                let mut bounds = token.split('-');
                let start = bounds.next().and_then(parse_bound);
                let end = bounds.next().and_then(parse_bound);
                let (Some(start), Some(end)) = (start, end) else {
                    continue;
                };
                let last = end.min(page_count as i64);
                let mut page = start.max(1);
                while page <= last {
                    pages.insert(page as usize);
                    page += 1;
                }
            } else if let Some(page) = parse_leading_int(token) {
                if page >= 1 && page <= page_count as i64 {
                    pages.insert(page as usize);
                }
            }
        }

        PageSelection::Pages(pages.into_iter().collect())
    }

    /// Returns `true` for the `"all"` selection.
    pub fn is_all(&self) -> bool {
        matches!(self, PageSelection::All { .. })
    }

    /// The selected pages in ascending order.
    pub fn pages(&self) -> Vec<usize> {
        match self {
            PageSelection::All { page_count } => (1..=*page_count).collect(),
            PageSelection::Pages(pages) => pages.clone(),
        }
    }
}

/// Resolve a page-range expression into the selected 1-indexed pages.
///
/// `"all"` yields `1..=page_count`. Otherwise the expression is a
/// comma-separated list of single pages (`"3"`) and inclusive ranges
/// (`"2-4"`). A range whose start exceeds its end contributes nothing.
pub fn resolve_page_range(expression: &str, page_count: usize) -> Vec<usize> {
    PageSelection::resolve(expression, page_count).pages()
}

/// Parse one side of a range token. An empty side counts as zero.
fn parse_bound(raw: &str) -> Option<i64> {
    let raw = raw.trim();
    if raw.is_empty() {
        return Some(0);
    }
    raw.parse().ok()
}

/// Parse the leading integer of a token, ignoring trailing garbage (`"3abc"` is 3).
fn parse_leading_int(raw: &str) -> Option<i64> {
    let raw = raw.trim_start();
    let (sign, digits) = match raw.strip_prefix('-') {
        Some(rest) => (-1, rest),
        None => (1, raw.strip_prefix('+').unwrap_or(raw)),
    };
    let end = digits
        .find(|c: char| !c.is_ascii_digit())
        .unwrap_or(digits.len());
    digits[..end].parse::<i64>().ok().map(|n| sign * n)
}

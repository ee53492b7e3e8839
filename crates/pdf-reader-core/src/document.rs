//! The in-memory result of parsing one document.

use crate::metadata::{InfoDictionary, MetadataRecord, project_metadata};

/// Separator placed between the texts of consecutive pages.
pub const PAGE_SEPARATOR: &str = "\n\n";

/// A parsed document, owned by the request that loaded it.
///
/// Holds the per-page texts, the full text (pages joined with
/// [`PAGE_SEPARATOR`]), the raw `/Info` mapping and the format version.
#[derive(Debug, Clone, PartialEq)]
pub struct DocumentHandle {
    pages: Vec<String>,
    raw_text: String,
    /// 0-based line index at which each page's text starts in `raw_text`.
    page_starts: Vec<usize>,
    info: InfoDictionary,
    version: Option<String>,
}

impl DocumentHandle {
    /// Build a handle from page texts in document order.
    pub fn new(pages: Vec<String>, info: InfoDictionary, version: Option<String>) -> Self {
        let raw_text = pages.join(PAGE_SEPARATOR);

        let mut page_starts = Vec::with_capacity(pages.len());
        let mut line = 0;
        for page in &pages {
            page_starts.push(line);
            // the separator contributes one blank line after the page's last line
            line += page.split('\n').count() + 1;
        }

        Self {
            pages,
            raw_text,
            page_starts,
            info,
            version,
        }
    }

    /// The full extracted text.
    pub fn raw_text(&self) -> &str {
        &self.raw_text
    }

    /// Number of pages.
    pub fn page_count(&self) -> usize {
        self.pages.len()
    }

    /// Text of page `page` (1-indexed), if it exists.
    pub fn page_text(&self, page: usize) -> Option<&str> {
        page.checked_sub(1)
            .and_then(|i| self.pages.get(i))
            .map(String::as_str)
    }

    /// Join the text of the given pages (1-indexed); unknown pages are skipped.
    pub fn text_for_pages(&self, pages: &[usize]) -> String {
        pages
            .iter()
            .filter_map(|&p| self.page_text(p))
            .collect::<Vec<_>>()
            .join(PAGE_SEPARATOR)
    }

    /// The page (1-indexed) containing line `line` (1-indexed) of [`raw_text`](Self::raw_text).
    ///
    /// The blank line between two pages belongs to the earlier page.
    pub fn page_of_line(&self, line: usize) -> Option<usize> {
        if self.pages.is_empty() || line == 0 {
            return None;
        }
        let idx = line - 1;
        let page = self.page_starts.partition_point(|&start| start <= idx);
        Some(page.max(1))
    }

    /// Raw `/Info` mapping.
    pub fn info(&self) -> &InfoDictionary {
        &self.info
    }

    /// PDF format version from the header, if known.
    pub fn version(&self) -> Option<&str> {
        self.version.as_deref()
    }

    /// Project this document's metadata onto the stable field set.
    pub fn metadata(&self) -> MetadataRecord {
        project_metadata(&self.info, self.page_count(), self.version())
    }
}

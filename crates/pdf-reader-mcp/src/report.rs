//! Human-readable reports returned as tool output.

use std::fmt::Write;

use pdf_reader_core::{MetadataRecord, PageSelection, SearchMatch};

/// Render the metadata block.
pub fn render_metadata(record: &MetadataRecord) -> String {
    let mut out = String::from("PDF Metadata:\n");
    for (label, value) in record.entries() {
        let _ = writeln!(out, "{label}: {value}");
    }
    out.truncate(out.trim_end().len());
    out
}

/// Render the `read-pdf` report.
pub fn render_read(
    metadata: Option<&MetadataRecord>,
    selection: &PageSelection,
    page_count: usize,
    text: &str,
) -> String {
    let mut out = String::new();
    if let Some(record) = metadata {
        out.push_str(&render_metadata(record));
        out.push_str("\n\n--- Content ---\n");
    }
    if !selection.is_all() {
        let pages = selection.pages();
        let listed = if pages.is_empty() {
            "none".to_string()
        } else {
            pages
                .iter()
                .map(ToString::to_string)
                .collect::<Vec<_>>()
                .join(", ")
        };
        let _ = writeln!(out, "Selected pages: {listed} (of {page_count})");
    }
    out.push_str(text);
    out
}

/// Render the `search-pdf` report. `page_of` maps a line number to its page.
pub fn render_search(
    query: &str,
    matches: &[SearchMatch],
    page_of: impl Fn(usize) -> Option<usize>,
) -> String {
    if matches.is_empty() {
        return format!("No matches found for \"{query}\".");
    }

    let noun = if matches.len() == 1 { "match" } else { "matches" };
    let mut out = format!("Found {} {noun} for \"{query}\":", matches.len());
    for (i, m) in matches.iter().enumerate() {
        let location = match page_of(m.line) {
            Some(page) => format!("line {}, page {page}", m.line),
            None => format!("line {}", m.line),
        };
        let _ = write!(out, "\n\n--- Match {} ({location}) ---\n{}", i + 1, m.context);
    }
    out
}

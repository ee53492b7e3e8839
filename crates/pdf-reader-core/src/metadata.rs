//! Document-level metadata: the raw `/Info` mapping and its projection.
//!
//! The parser hands over an [`InfoDictionary`] keyed by the PDF `/Info`
//! names (`Title`, `Author`, `CreationDate`, ...). [`project_metadata`] maps
//! it to a [`MetadataRecord`] in which every field is populated, falling
//! back to [`NOT_AVAILABLE`].

use std::collections::BTreeMap;
use std::fmt;

use chrono::{DateTime, FixedOffset};

/// Sentinel for metadata fields the document does not supply.
pub const NOT_AVAILABLE: &str = "N/A";

/// A raw `/Info` value.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InfoValue {
    /// A text string (already decoded from its PDF encoding).
    Text(String),
    /// A date that parsed as a PDF date string.
    Date(DateTime<FixedOffset>),
}

impl InfoValue {
    /// Returns `true` if the value has no displayable content.
    pub fn is_empty(&self) -> bool {
        match self {
            InfoValue::Text(s) => s.trim().is_empty(),
            InfoValue::Date(_) => false,
        }
    }
}

impl fmt::Display for InfoValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            InfoValue::Text(s) => f.write_str(s.trim()),
            InfoValue::Date(d) => f.write_str(&d.to_rfc3339()),
        }
    }
}

/// Raw parser-supplied document properties, keyed by `/Info` entry name.
pub type InfoDictionary = BTreeMap<String, InfoValue>;

/// Stable, user-facing metadata; every field is populated.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MetadataRecord {
    /// Number of pages in the document.
    pub page_count: usize,
    /// Document title.
    pub title: String,
    /// Document author.
    pub author: String,
    /// Document subject / description.
    pub subject: String,
    /// Keywords associated with the document.
    pub keywords: String,
    /// Application that created the original document.
    pub creator: String,
    /// Application that produced the PDF.
    pub producer: String,
    /// Creation date (RFC 3339 when it parsed, raw string otherwise).
    pub creation_date: String,
    /// Last modification date.
    pub mod_date: String,
    /// PDF format version from the file header.
    pub version: String,
}

impl MetadataRecord {
    /// Label/value pairs in display order.
    pub fn entries(&self) -> Vec<(&'static str, String)> {
        vec![
            ("Pages", self.page_count.to_string()),
            ("Title", self.title.clone()),
            ("Author", self.author.clone()),
            ("Subject", self.subject.clone()),
            ("Keywords", self.keywords.clone()),
            ("Creator", self.creator.clone()),
            ("Producer", self.producer.clone()),
            ("Creation Date", self.creation_date.clone()),
            ("Modification Date", self.mod_date.clone()),
            ("PDF Version", self.version.clone()),
        ]
    }
}

/// Project the raw info mapping onto the stable field set.
pub fn project_metadata(
    info: &InfoDictionary,
    page_count: usize,
    version: Option<&str>,
) -> MetadataRecord {
    let field = |key: &str| -> String {
        info.get(key)
            .filter(|v| !v.is_empty())
            .map_or_else(|| NOT_AVAILABLE.to_string(), ToString::to_string)
    };

    MetadataRecord {
        page_count,
        title: field("Title"),
        author: field("Author"),
        subject: field("Subject"),
        keywords: field("Keywords"),
        creator: field("Creator"),
        producer: field("Producer"),
        creation_date: field("CreationDate"),
        mod_date: field("ModDate"),
        version: version
            .map(str::trim)
            .filter(|v| !v.is_empty())
            .unwrap_or(NOT_AVAILABLE)
            .to_string(),
    }
}

//! pdf-reader-core: backend-independent document query engines.
//!
//! Turns the flat output of a PDF parser (page texts plus the raw `/Info`
//! mapping) into the three things a caller asks for: cleaned text, line
//! indexed search hits with surrounding context, and a projected metadata
//! record with explicit fallbacks. Nothing in this crate performs I/O.

pub mod document;
pub mod error;
pub mod metadata;
pub mod normalize;
pub mod page_range;
pub mod pdf_date;
pub mod search;

pub use document::DocumentHandle;
pub use error::{QueryError, QueryResult};
pub use metadata::{InfoDictionary, InfoValue, MetadataRecord, NOT_AVAILABLE, project_metadata};
pub use normalize::clean_text;
pub use page_range::{PageSelection, resolve_page_range};
pub use pdf_date::parse_pdf_date;
pub use search::{CONTEXT_LINES, SearchMatch, SearchOptions, search_lines};

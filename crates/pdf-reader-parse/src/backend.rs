//! PDF parsing backend trait.
//!
//! Defines the [`DocumentParser`] trait that abstracts the binary PDF
//! format away from the query engines.

use pdf_reader_core::DocumentHandle;

use crate::error::BackendError;

/// Converts a byte buffer into a [`DocumentHandle`].
///
/// Implementations must be thread-safe: the loader runs them on a blocking
/// worker thread, one fresh call per request.
///
/// # Usage
///
/// ```ignore
/// let doc = LopdfParser.parse(&pdf_bytes)?;
/// println!("{} pages", doc.page_count());
/// ```
pub trait DocumentParser: Send + Sync {
    /// Parse PDF bytes into a document handle.
    ///
    /// # Errors
    ///
    /// Returns an error if the bytes do not represent a readable PDF document.
    fn parse(&self, bytes: &[u8]) -> Result<DocumentHandle, BackendError>;
}

impl<P: DocumentParser + ?Sized> DocumentParser for std::sync::Arc<P> {
    fn parse(&self, bytes: &[u8]) -> Result<DocumentHandle, BackendError> {
        (**self).parse(bytes)
    }
}

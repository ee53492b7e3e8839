//! pdf-reader-parse: turns PDF bytes into a [`DocumentHandle`].
//!
//! The [`DocumentParser`] trait is the seam between the query engines and
//! the binary PDF format; [`LopdfParser`] is the default implementation.

pub mod backend;
pub mod error;
pub mod lopdf_backend;

pub use backend::DocumentParser;
pub use error::BackendError;
pub use lopdf_backend::LopdfParser;
pub use pdf_reader_core;
pub use pdf_reader_core::DocumentHandle;

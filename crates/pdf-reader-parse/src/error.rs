//! Error types for the parsing layer.
//!
//! Uses [`thiserror`] for ergonomic error derivation. Provides [`BackendError`]
//! and its conversion into the engine-level [`QueryError`].

use pdf_reader_core::QueryError;
use thiserror::Error;

/// Error type for PDF parsing backend operations.
#[derive(Debug, Error)]
pub enum BackendError {
    /// The bytes are not a PDF the backend can interpret.
    #[error("PDF parse error: {0}")]
    Parse(String),

    /// The document is encrypted and cannot be read without a password.
    #[error("PDF is encrypted and requires a password")]
    Encrypted,

    /// Error reading PDF data.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl From<BackendError> for QueryError {
    fn from(err: BackendError) -> Self {
        match err {
            BackendError::Parse(_) | BackendError::Encrypted => QueryError::Parse(err.to_string()),
            BackendError::Io(e) => QueryError::io("", e.to_string()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn backend_error_parse() {
        let err = BackendError::Parse("invalid xref table".to_string());
        assert_eq!(err.to_string(), "PDF parse error: invalid xref table");
    }

    #[test]
    fn backend_error_io_from_std() {
        let io_err = std::io::Error::new(std::io::ErrorKind::NotFound, "file missing");
        let err: BackendError = io_err.into();
        assert!(matches!(err, BackendError::Io(_)));
        assert!(err.to_string().contains("file missing"));
    }

    #[test]
    fn parse_converts_to_parse_error() {
        let query_err: QueryError = BackendError::Parse("bad syntax".to_string()).into();
        assert_eq!(
            query_err,
            QueryError::Parse("PDF parse error: bad syntax".to_string())
        );
        assert_eq!(query_err.kind(), "ParseError");
    }

    #[test]
    fn encrypted_converts_to_parse_error() {
        let query_err: QueryError = BackendError::Encrypted.into();
        assert_eq!(query_err.kind(), "ParseError");
        assert!(query_err.to_string().contains("password"));
    }

    #[test]
    fn io_converts_to_io_error() {
        let io_err = std::io::Error::new(std::io::ErrorKind::PermissionDenied, "denied");
        let query_err: QueryError = BackendError::Io(io_err).into();
        assert_eq!(query_err.kind(), "IOError");
        assert!(query_err.to_string().contains("denied"));
    }

    #[test]
    fn backend_error_implements_std_error() {
        let err: Box<dyn std::error::Error> = Box::new(BackendError::Parse("test".to_string()));
        assert!(err.to_string().contains("test"));
    }
}

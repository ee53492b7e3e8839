//! Error types for document queries.
//!
//! Provides [`QueryError`], the single failure type every engine and the
//! dispatcher report through, and the [`QueryResult`] alias.

use std::fmt;

/// Fatal error for a single document query.
///
/// Each variant corresponds to one entry of the error taxonomy surfaced to
/// callers; see [`QueryError::kind`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum QueryError {
    /// The argument bag does not satisfy the operation's contract.
    Validation {
        /// Names of the offending fields (empty when the bag itself is malformed).
        fields: Vec<String>,
        /// Human-readable description of every violation.
        message: String,
    },
    /// The target path could not be read.
    Io {
        /// Path that was being read, as resolved by the loader.
        path: String,
        /// Underlying error description.
        message: String,
    },
    /// The bytes at the path are not a document the parser can interpret.
    Parse(String),
    /// Any other failure while cleaning, searching or projecting.
    Runtime(String),
}

impl QueryError {
    /// Create a validation error for the given fields.
    pub fn validation<I, S>(fields: I, message: impl Into<String>) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        QueryError::Validation {
            fields: fields.into_iter().map(Into::into).collect(),
            message: message.into(),
        }
    }

    /// Create an I/O error for `path`.
    pub fn io(path: impl Into<String>, message: impl Into<String>) -> Self {
        QueryError::Io {
            path: path.into(),
            message: message.into(),
        }
    }

    /// Returns the taxonomy tag for this error.
    pub fn kind(&self) -> &'static str {
        match self {
            QueryError::Validation { .. } => "ValidationError",
            QueryError::Io { .. } => "IOError",
            QueryError::Parse(_) => "ParseError",
            QueryError::Runtime(_) => "RuntimeError",
        }
    }

    /// Returns `true` if this is a validation error.
    pub fn is_validation(&self) -> bool {
        matches!(self, QueryError::Validation { .. })
    }
}

impl fmt::Display for QueryError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            QueryError::Validation { message, .. } => write!(f, "invalid arguments: {message}"),
            QueryError::Io { path, message } if path.is_empty() => {
                write!(f, "I/O error: {message}")
            }
            QueryError::Io { path, message } => write!(f, "cannot read {path}: {message}"),
            QueryError::Parse(msg) => write!(f, "failed to parse document: {msg}"),
            QueryError::Runtime(msg) => write!(f, "{msg}"),
        }
    }
}

impl std::error::Error for QueryError {}

impl From<std::io::Error> for QueryError {
    fn from(err: std::io::Error) -> Self {
        QueryError::io("", err.to_string())
    }
}

/// Result alias used by the query engines.
pub type QueryResult<T> = Result<T, QueryError>;

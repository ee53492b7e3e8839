//! Loading documents from the filesystem.

use std::future::Future;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use pdf_reader_core::{DocumentHandle, QueryError, QueryResult};
use pdf_reader_parse::DocumentParser;

/// Produces one fresh [`DocumentHandle`] per call.
pub trait DocumentLoader {
    /// Load and parse the document at `path`.
    fn load(&self, path: &Path) -> impl Future<Output = QueryResult<DocumentHandle>> + Send;
}

/// Reads files with `tokio::fs` and parses them on a blocking worker.
#[derive(Debug)]
pub struct FileLoader<P> {
    parser: Arc<P>,
    max_file_size: Option<u64>,
}

impl<P> FileLoader<P> {
    pub fn new(parser: P) -> Self {
        Self {
            parser: Arc::new(parser),
            max_file_size: None,
        }
    }

    /// Refuse files larger than `limit` bytes (`None` disables the check).
    pub fn with_max_file_size(mut self, limit: Option<u64>) -> Self {
        self.max_file_size = limit;
        self
    }
}

/// Resolve `path` against the current directory.
pub fn resolve_path(path: &Path) -> QueryResult<PathBuf> {
    std::path::absolute(path)
        .map_err(|e| QueryError::io(path.display().to_string(), e.to_string()))
}

impl<P: DocumentParser + 'static> DocumentLoader for FileLoader<P> {
    async fn load(&self, path: &Path) -> QueryResult<DocumentHandle> {
        let path = resolve_path(path)?;
        let shown = path.display().to_string();
        let io_err = |e: std::io::Error| QueryError::io(shown.clone(), e.to_string());

        let meta = tokio::fs::metadata(&path).await.map_err(io_err)?;
        if !meta.is_file() {
            return Err(QueryError::io(shown, "not a regular file"));
        }
        if let Some(limit) = self.max_file_size {
            if meta.len() > limit {
                return Err(QueryError::io(
                    shown,
                    format!("file is {} bytes, limit is {limit}", meta.len()),
                ));
            }
        }

        let bytes = tokio::fs::read(&path).await.map_err(io_err)?;
        tracing::debug!(path = %shown, bytes = bytes.len(), "read document");

        let parser = Arc::clone(&self.parser);
        tokio::task::spawn_blocking(move || parser.parse(&bytes))
            .await
            .map_err(|e| QueryError::Runtime(format!("parser task failed: {e}")))?
            .map_err(QueryError::from)
    }
}

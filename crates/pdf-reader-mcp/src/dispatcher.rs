//! Routes a named operation to its engine and packages the outcome.
//!
//! [`Dispatcher::handle`] is the boundary of the query core: whatever goes
//! wrong inside, the caller gets a [`ToolResult`], never an error.

use std::path::Path;
use std::time::Duration;

use pdf_reader_core::{
    DocumentHandle, PageSelection, QueryError, QueryResult, SearchOptions, clean_text,
    search_lines,
};
use serde::Serialize;
use serde_json::Value;

use crate::loader::DocumentLoader;
use crate::report;
use crate::tools::{QueryRequest, ReadArgs, SearchArgs};

/// One item of a tool result's `content` array.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TextContent {
    #[serde(rename = "type")]
    pub kind: &'static str,
    pub text: String,
}

/// Result envelope of a tool call.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ToolResult {
    pub content: Vec<TextContent>,
    #[serde(rename = "isError", skip_serializing_if = "Option::is_none")]
    pub is_error: Option<bool>,
}

impl ToolResult {
    /// A successful result carrying `text`.
    pub fn text(text: impl Into<String>) -> Self {
        Self {
            content: vec![TextContent {
                kind: "text",
                text: text.into(),
            }],
            is_error: None,
        }
    }

    /// An error result describing `err`.
    pub fn error(err: &QueryError) -> Self {
        Self {
            is_error: Some(true),
            ..Self::text(format!("{}: {err}", err.kind()))
        }
    }
}

/// Validates, loads, and routes tool calls.
#[derive(Debug)]
pub struct Dispatcher<L> {
    loader: L,
    timeout: Option<Duration>,
}

impl<L: DocumentLoader> Dispatcher<L> {
    pub fn new(loader: L) -> Self {
        Self {
            loader,
            timeout: None,
        }
    }

    /// Abandon requests that run longer than `timeout`.
    pub fn with_timeout(mut self, timeout: Option<Duration>) -> Self {
        self.timeout = timeout;
        self
    }

    /// Run tool `name` with argument bag `args`.
    pub async fn handle(&self, name: &str, args: Value) -> ToolResult {
        let outcome = match self.timeout {
            Some(limit) => tokio::time::timeout(limit, self.execute(name, args))
                .await
                .unwrap_or_else(|_| {
                    Err(QueryError::Runtime(format!(
                        "request timed out after {:.1}s",
                        limit.as_secs_f64()
                    )))
                }),
            None => self.execute(name, args).await,
        };

        match outcome {
            Ok(text) => {
                tracing::info!(tool = name, bytes = text.len(), "tool call succeeded");
                ToolResult::text(text)
            }
            Err(err) => {
                tracing::warn!(tool = name, kind = err.kind(), error = %err, "tool call failed");
                ToolResult::error(&err)
            }
        }
    }

    /// Validate, load the document once, and run the requested engine.
    pub async fn execute(&self, name: &str, args: Value) -> QueryResult<String> {
        let request = QueryRequest::from_call(name, args)?;
        let doc = self.loader.load(Path::new(request.file())).await?;
        tracing::debug!(tool = name, pages = doc.page_count(), "document loaded");

        match request {
            QueryRequest::Read(args) => Ok(read_pdf(&doc, &args)),
            QueryRequest::Search(args) => search_pdf(&doc, &args),
            QueryRequest::Metadata(_) => Ok(pdf_metadata(&doc)),
        }
    }
}

/// `read-pdf`: selected page text, optionally cleaned, optionally with metadata.
pub fn read_pdf(doc: &DocumentHandle, args: &ReadArgs) -> String {
    let selection = PageSelection::resolve(&args.pages, doc.page_count());
    let text = if selection.is_all() {
        doc.raw_text().to_string()
    } else {
        doc.text_for_pages(&selection.pages())
    };
    let text = if args.clean_text {
        clean_text(&text)
    } else {
        text
    };
    let metadata = args.include_metadata.then(|| doc.metadata());
    report::render_read(metadata.as_ref(), &selection, doc.page_count(), &text)
}

/// `search-pdf`: every matching line of the full text with its context.
pub fn search_pdf(doc: &DocumentHandle, args: &SearchArgs) -> QueryResult<String> {
    let options = SearchOptions {
        case_sensitive: args.case_sensitive,
        whole_word: args.whole_word,
    };
    let matches = search_lines(doc.raw_text(), &args.query, &options)?;
    Ok(report::render_search(&args.query, &matches, |line| {
        doc.page_of_line(line)
    }))
}

/// `pdf-metadata`: the projected metadata block.
pub fn pdf_metadata(doc: &DocumentHandle) -> String {
    report::render_metadata(&doc.metadata())
}

//! The MCP request loop.

use serde_json::{Value, json};
use tokio::io::{AsyncBufRead, AsyncBufReadExt, AsyncWrite, AsyncWriteExt};

use crate::dispatcher::Dispatcher;
use crate::loader::DocumentLoader;
use crate::protocol::{
    INTERNAL_ERROR, INVALID_PARAMS, INVALID_REQUEST, JsonRpcRequest, JsonRpcResponse,
    METHOD_NOT_FOUND, PARSE_ERROR, PROTOCOL_VERSION,
};
use crate::tools::TOOLS;

pub const SERVER_NAME: &str = "pdf-reader-mcp";

/// Answers MCP requests by delegating tool calls to a [`Dispatcher`].
#[derive(Debug)]
pub struct McpServer<L> {
    dispatcher: Dispatcher<L>,
}

impl<L: DocumentLoader> McpServer<L> {
    pub fn new(dispatcher: Dispatcher<L>) -> Self {
        Self { dispatcher }
    }

    /// Handle one raw frame. Returns `None` when no reply is due.
    pub async fn handle_line(&self, line: &str) -> Option<JsonRpcResponse> {
        let frame: Value = match serde_json::from_str(line) {
            Ok(v) => v,
            Err(e) => {
                tracing::error!(error = %e, "invalid JSON-RPC frame");
                return Some(JsonRpcResponse::failure(
                    Value::Null,
                    PARSE_ERROR,
                    format!("Parse error: {e}"),
                ));
            }
        };
        let id = frame.get("id").cloned().unwrap_or(Value::Null);
        let request: JsonRpcRequest = match serde_json::from_value(frame) {
            Ok(r) => r,
            Err(e) => {
                tracing::error!(error = %e, "malformed JSON-RPC request");
                return Some(JsonRpcResponse::failure(
                    id,
                    INVALID_REQUEST,
                    format!("Invalid Request: {e}"),
                ));
            }
        };
        self.handle_request(request).await
    }

    /// Handle one raw frame as read off the wire.
    pub async fn handle_bytes(&self, bytes: &[u8]) -> Option<JsonRpcResponse> {
        match std::str::from_utf8(bytes) {
            Ok(line) => self.handle_line(line).await,
            Err(e) => {
                tracing::error!(error = %e, "frame is not valid UTF-8");
                Some(JsonRpcResponse::failure(
                    Value::Null,
                    PARSE_ERROR,
                    format!("Parse error: {e}"),
                ))
            }
        }
    }

    pub async fn handle_request(&self, request: JsonRpcRequest) -> Option<JsonRpcResponse> {
        tracing::debug!(method = %request.method, "received request");
        if request.is_notification() {
            return None;
        }
        let id = request.id.unwrap_or(Value::Null);

        let response = match request.method.as_str() {
            "initialize" => JsonRpcResponse::success(
                id,
                json!({
                    "protocolVersion": PROTOCOL_VERSION,
                    "serverInfo": {
                        "name": SERVER_NAME,
                        "version": env!("CARGO_PKG_VERSION"),
                    },
                    "capabilities": { "tools": {} },
                }),
            ),
            "ping" => JsonRpcResponse::success(id, json!({})),
            "tools/list" => {
                let tools: Vec<Value> = TOOLS.iter().map(|t| t.descriptor()).collect();
                JsonRpcResponse::success(id, json!({ "tools": tools }))
            }
            "tools/call" => {
                let params = request.params.unwrap_or(Value::Null);
                let Some(name) = params.get("name").and_then(Value::as_str) else {
                    return Some(JsonRpcResponse::failure(
                        id,
                        INVALID_PARAMS,
                        "Invalid params: missing tool name",
                    ));
                };
                let arguments = params.get("arguments").cloned().unwrap_or(Value::Null);
                tracing::info!(tool = name, "calling tool");

                let result = self.dispatcher.handle(name, arguments).await;
                match serde_json::to_value(result) {
                    Ok(value) => JsonRpcResponse::success(id, value),
                    Err(e) => JsonRpcResponse::failure(id, INTERNAL_ERROR, e.to_string()),
                }
            }
            other => {
                tracing::warn!(method = other, "unknown method");
                JsonRpcResponse::failure(
                    id,
                    METHOD_NOT_FOUND,
                    format!("Method not found: {other}"),
                )
            }
        };
        Some(response)
    }
}

/// Serve newline-delimited frames from `reader` until EOF, one at a time.
///
/// A frame that is not UTF-8 or not JSON gets an error reply; the loop
/// only stops on EOF or a transport failure.
///
/// # Errors
///
/// Returns the first read or write failure on the transport.
pub async fn serve<L, R, W>(
    server: &McpServer<L>,
    mut reader: R,
    mut writer: W,
) -> std::io::Result<()>
where
    L: DocumentLoader,
    R: AsyncBufRead + Unpin,
    W: AsyncWrite + Unpin,
{
    let mut buf = Vec::new();
    loop {
        buf.clear();
        if reader.read_until(b'\n', &mut buf).await? == 0 {
            break;
        }
        let line = buf.trim_ascii();
        if line.is_empty() {
            continue;
        }
        let Some(response) = server.handle_bytes(line).await else {
            continue;
        };
        let mut frame = serde_json::to_vec(&response)?;
        frame.push(b'\n');
        writer.write_all(&frame).await?;
        writer.flush().await?;
    }
    Ok(())
}

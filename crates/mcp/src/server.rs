// MCP server: JSON-RPC 2.0 dispatch over a newline-delimited byte stream

use crate::error::ToolError;
use crate::protocol::*;
use crate::tools::ToolRegistry;
use anyhow::Result;
use futures::{SinkExt, StreamExt};
use serde_json::{json, Value};
use std::sync::Arc;
use tokio::io::{AsyncRead, AsyncWrite};
use tokio::sync::mpsc;
use tokio::task::JoinSet;
use tokio_util::codec::{AnyDelimiterCodec, FramedRead, FramedWrite, LinesCodec};

/// MCP server exposing a tool registry.
///
/// Requests are read one per line. `tools/call` runs in its own task so a
/// slow upstream never blocks other requests; every response goes through a
/// single writer so lines are never interleaved.
#[derive(Clone)]
pub struct McpServer {
    registry: Arc<ToolRegistry>,
    server_info: ServerInfo,
    instructions: Option<String>,
}

impl McpServer {
    pub fn new(registry: ToolRegistry) -> Self {
        Self {
            registry: Arc::new(registry),
            server_info: ServerInfo {
                name: env!("CARGO_PKG_NAME").to_string(),
                version: env!("CARGO_PKG_VERSION").to_string(),
            },
            instructions: None,
        }
    }

    pub fn with_instructions(mut self, instructions: impl Into<String>) -> Self {
        self.instructions = Some(instructions.into());
        self
    }

    /// Serve on stdin/stdout until stdin closes.
    pub async fn start(&self) -> Result<()> {
        tracing::info!(tools = self.registry.len(), "MCP server listening on stdio");
        self.serve(tokio::io::stdin(), tokio::io::stdout()).await
    }

    /// Serve on an arbitrary reader/writer pair until the reader hits EOF.
    ///
    /// Calls still running at EOF are aborted and produce no response.
    pub async fn serve<R, W>(&self, reader: R, writer: W) -> Result<()>
    where
        R: AsyncRead + Unpin + Send,
        W: AsyncWrite + Unpin + Send + 'static,
    {
        // Frames are raw bytes so invalid UTF-8 surfaces as a parse error
        let codec = AnyDelimiterCodec::new(b"\n".to_vec(), Vec::new());
        let mut lines = FramedRead::new(reader, codec);
        let (tx, mut rx) = mpsc::unbounded_channel::<JsonRpcResponse>();

        let writer_task = tokio::spawn(async move {
            let mut sink = FramedWrite::new(writer, LinesCodec::new());
            while let Some(response) = rx.recv().await {
                let line = match serde_json::to_string(&response) {
                    Ok(line) => line,
                    Err(e) => {
                        tracing::error!(error = %e, "Failed to serialize response");
                        continue;
                    }
                };
                if let Err(e) = sink.send(line).await {
                    tracing::error!(error = %e, "Failed to write response");
                    break;
                }
            }
        });

        let mut in_flight = JoinSet::new();

        while let Some(line) = lines.next().await {
            let line = match line {
                Ok(line) => line,
                Err(e) => {
                    tracing::error!(error = %e, "Failed to read request stream");
                    break;
                }
            };

            // Reap finished calls
            while in_flight.try_join_next().is_some() {}

            if line.iter().all(u8::is_ascii_whitespace) {
                continue;
            }

            let request = match parse_request(&line) {
                Ok(request) => request,
                Err(response) => {
                    let _ = tx.send(response);
                    continue;
                }
            };

            if request.method == "tools/call" && !request.is_notification() {
                let server = self.clone();
                let tx = tx.clone();
                in_flight.spawn(async move {
                    if let Some(response) = server.handle_request(request).await {
                        let _ = tx.send(response);
                    }
                });
            } else if let Some(response) = self.handle_request(request).await {
                let _ = tx.send(response);
            }
        }

        if !in_flight.is_empty() {
            tracing::info!(calls = in_flight.len(), "Input closed, aborting in-flight calls");
        }
        in_flight.shutdown().await;

        drop(tx);
        writer_task.await?;

        tracing::info!("MCP server stopped");
        Ok(())
    }

    /// Handle one request. Notifications yield `None`.
    pub async fn handle_request(&self, request: JsonRpcRequest) -> Option<JsonRpcResponse> {
        if request.is_notification() {
            tracing::debug!(method = %request.method, "Notification received");
            return None;
        }

        let id = request.id.unwrap_or(Value::Null);
        let result = match request.method.as_str() {
            "initialize" => self.handle_initialize(request.params),
            "ping" => Ok(json!({})),
            "tools/list" => self.handle_list_tools(),
            "tools/call" => self.handle_call_tool(request.params).await,
            method => Err(JsonRpcError::method_not_found(method)),
        };

        Some(match result {
            Ok(value) => JsonRpcResponse::success(id, value),
            Err(error) => JsonRpcResponse::error(id, error),
        })
    }

    fn handle_initialize(&self, params: Option<Value>) -> Result<Value, JsonRpcError> {
        let params: InitializeParams = params
            .map(serde_json::from_value)
            .transpose()
            .map_err(|e| JsonRpcError::invalid_params(format!("Invalid initialize params: {}", e)))?
            .ok_or_else(|| JsonRpcError::invalid_params("Missing initialize params"))?;

        let protocol_version = negotiate_protocol_version(&params.protocol_version);
        match &params.client_info {
            Some(client) => tracing::info!(
                client = %client.name,
                client_version = %client.version,
                protocol = protocol_version,
                "Client initialized"
            ),
            None => tracing::info!(protocol = protocol_version, "Client initialized"),
        }

        let result = InitializeResult {
            protocol_version: protocol_version.to_string(),
            capabilities: ServerCapabilities {
                tools: Some(ToolsCapability {
                    list_changed: false,
                }),
            },
            server_info: self.server_info.clone(),
            instructions: self.instructions.clone(),
        };

        to_result(&result)
    }

    fn handle_list_tools(&self) -> Result<Value, JsonRpcError> {
        to_result(&ListToolsResult {
            tools: self.registry.list_schemas(),
        })
    }

    async fn handle_call_tool(&self, params: Option<Value>) -> Result<Value, JsonRpcError> {
        let params: CallToolParams = params
            .map(serde_json::from_value)
            .transpose()
            .map_err(|e| JsonRpcError::invalid_params(format!("Invalid tools/call params: {}", e)))?
            .ok_or_else(|| JsonRpcError::invalid_params("Missing tools/call params"))?;

        tracing::info!(tool = %params.name, "Tool call");

        match self.registry.call(&params.name, &params.arguments).await {
            Ok(result) => to_result(&result),
            Err(ToolError::Validation { field, reason }) => Err(JsonRpcError::invalid_params(
                format!("Invalid arguments for {}: {}: {}", params.name, field, reason),
            )
            .with_data(json!({"field": field, "reason": reason}))),
            Err(e) if e.is_protocol_error() => Err(JsonRpcError::invalid_params(e.to_string())),
            Err(e) => {
                tracing::error!(tool = %params.name, error = %e, "Tool call failed");
                to_result(&CallToolResult::error(e.to_string()))
            }
        }
    }
}

fn to_result<T: serde::Serialize>(value: &T) -> Result<Value, JsonRpcError> {
    serde_json::to_value(value).map_err(|e| JsonRpcError::internal_error(e.to_string()))
}

/// Decode one line into a request, or the error response it deserves.
fn parse_request(line: &[u8]) -> Result<JsonRpcRequest, JsonRpcResponse> {
    let value: Value = serde_json::from_slice(line).map_err(|e| {
        tracing::warn!(error = %e, "Unparseable request line");
        JsonRpcResponse::error(Value::Null, JsonRpcError::parse_error())
    })?;

    let id = value.get("id").cloned().unwrap_or(Value::Null);
    let request: JsonRpcRequest = serde_json::from_value(value)
        .map_err(|_| JsonRpcResponse::error(id.clone(), JsonRpcError::invalid_request()))?;

    if request.jsonrpc != "2.0" {
        return Err(JsonRpcResponse::error(id, JsonRpcError::invalid_request()));
    }

    Ok(request)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::CredentialSource;
    use crate::tools::{register_all, Forwarder};
    use dumpling_sdk::DumplingClient;
    use tokio::io::{AsyncBufReadExt, AsyncWriteExt, BufReader};
    use wiremock::matchers::{method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn server(uri: &str, key: Option<&str>) -> McpServer {
        let client = DumplingClient::builder().base_url(uri).build().unwrap();
        let forwarder = Forwarder::new(client, CredentialSource::Fixed(key.map(str::to_string)));
        let mut registry = ToolRegistry::new();
        register_all(&mut registry, Arc::new(forwarder));
        McpServer::new(registry)
    }

    fn call(id: i64, name: &str, arguments: Value) -> JsonRpcRequest {
        JsonRpcRequest::new(id, "tools/call", json!({"name": name, "arguments": arguments}))
    }

    #[tokio::test]
    async fn test_initialize_echoes_supported_version() {
        let server = server("http://127.0.0.1:9", None).with_instructions("Use search first");
        let request = JsonRpcRequest::new(
            1,
            "initialize",
            json!({
                "protocolVersion": "2024-11-05",
                "capabilities": {},
                "clientInfo": {"name": "test", "version": "0.0.1"}
            }),
        );

        let response = server.handle_request(request).await.unwrap();
        let result = response.result.unwrap();
        assert_eq!(response.id, json!(1));
        assert_eq!(result["protocolVersion"], "2024-11-05");
        assert_eq!(result["capabilities"]["tools"]["listChanged"], false);
        assert_eq!(result["serverInfo"]["name"], "dumpling-mcp");
        assert_eq!(result["instructions"], "Use search first");
    }

    #[tokio::test]
    async fn test_initialize_unknown_version_answers_latest() {
        let server = server("http://127.0.0.1:9", None);
        let request =
            JsonRpcRequest::new(1, "initialize", json!({"protocolVersion": "1999-01-01"}));

        let response = server.handle_request(request).await.unwrap();
        assert_eq!(response.result.unwrap()["protocolVersion"], LATEST_PROTOCOL_VERSION);
    }

    #[tokio::test]
    async fn test_ping_and_notifications() {
        let server = server("http://127.0.0.1:9", None);

        let response = server
            .handle_request(JsonRpcRequest::new("p", "ping", json!({})))
            .await
            .unwrap();
        assert_eq!(response.id, json!("p"));
        assert_eq!(response.result, Some(json!({})));

        let none = server
            .handle_request(JsonRpcRequest::notification("notifications/initialized"))
            .await;
        assert!(none.is_none());
    }

    #[tokio::test]
    async fn test_unknown_method() {
        let server = server("http://127.0.0.1:9", None);
        let response = server
            .handle_request(JsonRpcRequest::new(3, "resources/list", json!({})))
            .await
            .unwrap();
        assert_eq!(response.error.unwrap().code, JsonRpcError::METHOD_NOT_FOUND);
    }

    #[tokio::test]
    async fn test_list_tools_without_credential() {
        let server = server("http://127.0.0.1:9", None);
        let response = server
            .handle_request(JsonRpcRequest::new(2, "tools/list", json!({})))
            .await
            .unwrap();

        let tools = response.result.unwrap()["tools"].as_array().unwrap().clone();
        assert_eq!(tools.len(), 28);
        assert!(tools.iter().all(|t| t["inputSchema"]["type"] == "object"));
    }

    #[tokio::test]
    async fn test_validation_error_is_invalid_params() {
        let server = server("http://127.0.0.1:9", Some("k"));
        let response = server
            .handle_request(call(4, "search", json!({"query": 42})))
            .await
            .unwrap();

        let error = response.error.unwrap();
        assert_eq!(error.code, JsonRpcError::INVALID_PARAMS);
        assert_eq!(error.message, "Invalid arguments for search: query: expected string");
        assert_eq!(error.data, Some(json!({"field": "query", "reason": "expected string"})));
    }

    #[tokio::test]
    async fn test_unknown_tool_is_invalid_params() {
        let server = server("http://127.0.0.1:9", Some("k"));
        let response = server
            .handle_request(call(5, "does-not-exist", json!({})))
            .await
            .unwrap();

        let error = response.error.unwrap();
        assert_eq!(error.code, JsonRpcError::INVALID_PARAMS);
        assert_eq!(error.message, "Unknown tool: does-not-exist");
    }

    #[tokio::test]
    async fn test_missing_call_params() {
        let server = server("http://127.0.0.1:9", Some("k"));
        let response = server
            .handle_request(JsonRpcRequest {
                jsonrpc: "2.0".into(),
                id: Some(json!(6)),
                method: "tools/call".into(),
                params: None,
            })
            .await
            .unwrap();
        assert_eq!(response.error.unwrap().code, JsonRpcError::INVALID_PARAMS);
    }

    #[tokio::test]
    async fn test_missing_credential_is_error_result() {
        let server = server("http://127.0.0.1:9", None);
        let response = server
            .handle_request(call(7, "search", json!({"query": "rust"})))
            .await
            .unwrap();

        assert!(response.error.is_none());
        let result: CallToolResult = serde_json::from_value(response.result.unwrap()).unwrap();
        assert_eq!(result.is_error, Some(true));
        assert_eq!(
            result.joined_text(),
            "Error: Configuration error: API key is not configured"
        );
    }

    #[tokio::test]
    async fn test_upstream_error_is_error_result() {
        let upstream = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(500).set_body_string("server error"))
            .mount(&upstream)
            .await;

        let server = server(&upstream.uri(), Some("k"));
        let response = server
            .handle_request(call(8, "run-js-code", json!({"code": "1"})))
            .await
            .unwrap();

        let result: CallToolResult = serde_json::from_value(response.result.unwrap()).unwrap();
        assert_eq!(result.is_error, Some(true));
        assert_eq!(
            result.joined_text(),
            "Error: Upstream API error (status 500): server error"
        );
    }

    #[test]
    fn test_parse_request_errors() {
        let err = parse_request(b"{not json").unwrap_err();
        assert_eq!(err.id, Value::Null);
        assert_eq!(err.error.unwrap().code, JsonRpcError::PARSE_ERROR);

        let err = parse_request(br#"{"jsonrpc":"2.0","id":9}"#).unwrap_err();
        assert_eq!(err.id, json!(9));
        assert_eq!(err.error.unwrap().code, JsonRpcError::INVALID_REQUEST);

        let err = parse_request(br#"{"jsonrpc":"1.0","id":10,"method":"ping"}"#).unwrap_err();
        assert_eq!(err.id, json!(10));
        assert_eq!(err.error.unwrap().code, JsonRpcError::INVALID_REQUEST);

        let ok = parse_request(br#"{"jsonrpc":"2.0","id":11,"method":"ping"}"#).unwrap();
        assert_eq!(ok.method, "ping");

        let err = parse_request(b"{\"jsonrpc\":\"2.0\",\"id\":12,\"method\":\"ping\",\"x\":\"\xff\"}")
            .unwrap_err();
        assert_eq!(err.id, Value::Null);
        assert_eq!(err.error.unwrap().code, JsonRpcError::PARSE_ERROR);

        // Carriage returns from CRLF framing are JSON whitespace
        let ok = parse_request(b"{\"jsonrpc\":\"2.0\",\"id\":13,\"method\":\"ping\"}\r").unwrap();
        assert_eq!(ok.id, Some(json!(13)));
    }

    #[tokio::test]
    async fn test_serve_over_stream() {
        let upstream = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/api/v1/run-python-code"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({"stdout": "hi\n"})))
            .mount(&upstream)
            .await;

        let server = server(&upstream.uri(), Some("k"));
        let (client, server_io) = tokio::io::duplex(64 * 1024);
        let (server_read, server_write) = tokio::io::split(server_io);
        let handle = tokio::spawn(async move { server.serve(server_read, server_write).await });

        let (client_read, mut client_write) = tokio::io::split(client);
        let mut responses = BufReader::new(client_read).lines();

        client_write
            .write_all(b"{\"jsonrpc\":\"2.0\",\"method\":\"notifications/initialized\"}\n")
            .await
            .unwrap();
        client_write.write_all(b"garbage\n").await.unwrap();
        let line = responses.next_line().await.unwrap().unwrap();
        let parse_error: Value = serde_json::from_str(&line).unwrap();
        assert_eq!(parse_error["id"], Value::Null);
        assert_eq!(parse_error["error"]["code"], JsonRpcError::PARSE_ERROR);

        let request = serde_json::to_string(&call(1, "run-python-code", json!({"code": "print('hi')"})))
            .unwrap();
        client_write.write_all(request.as_bytes()).await.unwrap();
        client_write.write_all(b"\n").await.unwrap();

        let line = responses.next_line().await.unwrap().unwrap();
        let response: Value = serde_json::from_str(&line).unwrap();
        assert_eq!(response["id"], 1);
        let text = response["result"]["content"][0]["text"].as_str().unwrap();
        assert!(text.contains("\"stdout\": \"hi\\n\""));

        client_write.shutdown().await.unwrap();
        handle.await.unwrap().unwrap();
    }

    #[tokio::test]
    async fn test_invalid_utf8_line_keeps_serving() {
        let server = server("http://127.0.0.1:9", None);
        let (client, server_io) = tokio::io::duplex(64 * 1024);
        let (server_read, server_write) = tokio::io::split(server_io);
        let handle = tokio::spawn(async move { server.serve(server_read, server_write).await });

        let (client_read, mut client_write) = tokio::io::split(client);
        let mut responses = BufReader::new(client_read).lines();

        client_write
            .write_all(b"{\"jsonrpc\":\"2.0\",\"id\":1,\"method\":\"ping\",\"x\":\"\xff\"}\n")
            .await
            .unwrap();
        client_write
            .write_all(b"{\"jsonrpc\":\"2.0\",\"id\":2,\"method\":\"ping\"}\n")
            .await
            .unwrap();

        let first: Value =
            serde_json::from_str(&responses.next_line().await.unwrap().unwrap()).unwrap();
        assert_eq!(first["id"], Value::Null);
        assert_eq!(first["error"]["code"], JsonRpcError::PARSE_ERROR);

        let second: Value =
            serde_json::from_str(&responses.next_line().await.unwrap().unwrap()).unwrap();
        assert_eq!(second["id"], 2);
        assert_eq!(second["result"], json!({}));
        assert!(!handle.is_finished());

        client_write.shutdown().await.unwrap();
        handle.await.unwrap().unwrap();
    }

    #[tokio::test]
    async fn test_slow_call_does_not_block_other_requests() {
        let upstream = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(
                ResponseTemplate::new(200)
                    .set_body_json(json!({"done": true}))
                    .set_delay(std::time::Duration::from_millis(300)),
            )
            .mount(&upstream)
            .await;

        let server = server(&upstream.uri(), Some("k"));
        let (client, server_io) = tokio::io::duplex(64 * 1024);
        let (server_read, server_write) = tokio::io::split(server_io);
        let handle = tokio::spawn(async move { server.serve(server_read, server_write).await });

        let (client_read, mut client_write) = tokio::io::split(client);
        let mut responses = BufReader::new(client_read).lines();

        let slow = serde_json::to_string(&call(1, "run-js-code", json!({"code": "1"}))).unwrap();
        let ping = serde_json::to_string(&JsonRpcRequest::new(2, "ping", json!({}))).unwrap();
        client_write
            .write_all(format!("{}\n{}\n", slow, ping).as_bytes())
            .await
            .unwrap();

        let first: Value = serde_json::from_str(&responses.next_line().await.unwrap().unwrap()).unwrap();
        let second: Value =
            serde_json::from_str(&responses.next_line().await.unwrap().unwrap()).unwrap();
        assert_eq!(first["id"], 2);
        assert_eq!(second["id"], 1);

        client_write.shutdown().await.unwrap();
        handle.await.unwrap().unwrap();
    }

    #[tokio::test]
    async fn test_eof_aborts_in_flight_calls() {
        let upstream = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(
                ResponseTemplate::new(200)
                    .set_body_json(json!({}))
                    .set_delay(std::time::Duration::from_secs(30)),
            )
            .mount(&upstream)
            .await;

        let server = server(&upstream.uri(), Some("k"));
        let (client, server_io) = tokio::io::duplex(64 * 1024);
        let (server_read, server_write) = tokio::io::split(server_io);
        let handle = tokio::spawn(async move { server.serve(server_read, server_write).await });

        let (client_read, mut client_write) = tokio::io::split(client);
        let request = serde_json::to_string(&call(1, "run-js-code", json!({"code": "1"}))).unwrap();
        client_write
            .write_all(format!("{}\n", request).as_bytes())
            .await
            .unwrap();
        client_write.shutdown().await.unwrap();

        tokio::time::timeout(std::time::Duration::from_secs(5), handle)
            .await
            .expect("server should stop promptly")
            .unwrap()
            .unwrap();

        // No response was written for the aborted call
        let mut responses = BufReader::new(client_read).lines();
        assert!(responses.next_line().await.unwrap().is_none());
    }
}

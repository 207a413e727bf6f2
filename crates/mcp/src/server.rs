// MCP server: JSON-RPC 2.0 over newline-delimited stdio

use crate::protocol::*;
use crate::tools::ToolRegistry;
use anyhow::{Context, Result};
use futures::{SinkExt, StreamExt};
use serde::Serialize;
use serde_json::{json, Value};
use std::collections::HashMap;
use std::sync::Arc;
use tokio::io::{AsyncRead, AsyncWrite};
use tokio::sync::{mpsc, Mutex};
use tokio::task::AbortHandle;
use tokio_util::codec::{FramedRead, FramedWrite, LinesCodec};
use tracing::{debug, error, info, warn};

const SERVER_NAME: &str = "leadmagic-mcp";

const INSTRUCTIONS: &str = "Tools for the LeadMagic B2B data-enrichment API. \
Most tools consume credits; check_credits is free and reports the remaining balance. \
Failed calls return isError with a classification and guidance.";

type SharedInFlight = Arc<Mutex<InFlight>>;

/// Running `tools/call` tasks keyed by the JSON text of their request id.
///
/// Each registration gets a generation so a finished task only removes its own entry.
#[derive(Default)]
struct InFlight {
    next: u64,
    calls: HashMap<String, (u64, AbortHandle)>,
}

impl InFlight {
    fn next_generation(&mut self) -> u64 {
        self.next += 1;
        self.next
    }

    /// Track `handle` under `key`, aborting a call still running with the same id.
    fn insert(&mut self, key: String, generation: u64, handle: AbortHandle) {
        if let Some((_, previous)) = self.calls.insert(key, (generation, handle)) {
            warn!("Request id reused while a call with the same id is still running");
            previous.abort();
        }
    }

    fn finish(&mut self, key: &str, generation: u64) {
        if self.calls.get(key).is_some_and(|(current, _)| *current == generation) {
            self.calls.remove(key);
        }
    }

    fn cancel(&mut self, key: &str) -> bool {
        match self.calls.remove(key) {
            Some((_, handle)) => {
                handle.abort();
                true
            }
            None => false,
        }
    }
}

pub struct McpServer {
    registry: Arc<ToolRegistry>,
}

impl McpServer {
    pub fn new(registry: ToolRegistry) -> Self {
        Self {
            registry: Arc::new(registry),
        }
    }

    /// Serve on the process stdin/stdout until stdin closes.
    pub async fn start(&self) -> Result<()> {
        info!(tools = self.registry.len(), "MCP server listening on stdio");
        self.serve(tokio::io::stdin(), tokio::io::stdout()).await
    }

    /// Serve one connection until `reader` reaches EOF.
    ///
    /// Responses to calls still running at EOF are written before this returns.
    pub async fn serve<R, W>(&self, reader: R, writer: W) -> Result<()>
    where
        R: AsyncRead + Unpin + Send,
        W: AsyncWrite + Unpin + Send + 'static,
    {
        let mut lines = FramedRead::new(reader, LinesCodec::new());
        let (tx, mut rx) = mpsc::channel::<JsonRpcResponse>(64);

        let writer_task = tokio::spawn(async move {
            let mut sink = FramedWrite::new(writer, LinesCodec::new());
            while let Some(response) = rx.recv().await {
                let line = match serde_json::to_string(&response) {
                    Ok(line) => line,
                    Err(e) => {
                        error!(error = %e, "Failed to serialize response");
                        continue;
                    }
                };
                if let Err(e) = sink.send(line).await {
                    error!(error = %e, "Failed to write response");
                    break;
                }
            }
        });

        let in_flight: SharedInFlight = Arc::default();

        while let Some(line) = lines.next().await {
            let line = match line {
                Ok(line) => line,
                Err(e) => {
                    error!(error = %e, "Failed to read from input");
                    break;
                }
            };
            let line = line.trim();
            if line.is_empty() {
                continue;
            }
            debug!(message = %line, "Received message");

            let value: Value = match serde_json::from_str(line) {
                Ok(value) => value,
                Err(e) => {
                    warn!(error = %e, "Received malformed JSON");
                    let response = JsonRpcResponse::error(
                        Value::Null,
                        JsonRpcError::parse_error(format!("Parse error: {}", e)),
                    );
                    send(&tx, response).await;
                    continue;
                }
            };

            let id = value.get("id").cloned();
            let request: JsonRpcRequest = match serde_json::from_value(value) {
                Ok(request) => request,
                Err(e) => {
                    warn!(error = %e, "Received invalid JSON-RPC request");
                    let response = JsonRpcResponse::error(
                        id.unwrap_or(Value::Null),
                        JsonRpcError::invalid_request(format!("Invalid request: {}", e)),
                    );
                    send(&tx, response).await;
                    continue;
                }
            };

            self.dispatch(request, &tx, &in_flight).await;
        }

        info!("Input closed, shutting down");
        drop(tx);
        writer_task.await.context("Response writer task failed")?;
        Ok(())
    }

    async fn dispatch(
        &self,
        request: JsonRpcRequest,
        tx: &mpsc::Sender<JsonRpcResponse>,
        in_flight: &SharedInFlight,
    ) {
        let Some(id) = request.id else {
            self.handle_notification(&request.method, request.params, in_flight)
                .await;
            return;
        };

        let response = match request.method.as_str() {
            "initialize" => self.handle_initialize(id, request.params),
            "ping" => JsonRpcResponse::success(id, json!({})),
            "tools/list" => respond(
                id,
                &ListToolsResult {
                    tools: self.registry.list_schemas(),
                },
            ),
            "tools/call" => {
                match self
                    .spawn_tool_call(id.clone(), request.params, tx.clone(), in_flight)
                    .await
                {
                    Ok(()) => return,
                    Err(err) => JsonRpcResponse::error(id, err),
                }
            }
            method => {
                warn!(method = %method, "Unknown method");
                JsonRpcResponse::error(id, JsonRpcError::method_not_found(method))
            }
        };
        send(tx, response).await;
    }

    fn handle_initialize(&self, id: Value, params: Option<Value>) -> JsonRpcResponse {
        let params = params.and_then(|p| serde_json::from_value::<InitializeParams>(p).ok());
        let requested = params.as_ref().map(|p| p.protocol_version.as_str());
        let version = negotiate_protocol_version(requested);

        match &params {
            Some(p) => info!(
                client = %p.client_info.name,
                client_version = %p.client_info.version,
                protocol = version,
                "Client initialized"
            ),
            None => info!(protocol = version, "Client initialized without client info"),
        }
        if let Some(p) = &params {
            debug!(capabilities = %p.capabilities, "Client capabilities");
        }

        respond(
            id,
            &InitializeResult {
                protocol_version: version.to_string(),
                capabilities: ServerCapabilities {
                    tools: Some(ToolsCapability {
                        list_changed: false,
                    }),
                },
                server_info: ServerInfo {
                    name: SERVER_NAME.to_string(),
                    version: env!("CARGO_PKG_VERSION").to_string(),
                },
                instructions: Some(INSTRUCTIONS.to_string()),
            },
        )
    }

    /// Start a tool call on its own task. The task sends its own response.
    async fn spawn_tool_call(
        &self,
        id: Value,
        params: Option<Value>,
        tx: mpsc::Sender<JsonRpcResponse>,
        in_flight: &SharedInFlight,
    ) -> std::result::Result<(), JsonRpcError> {
        let params: CallToolParams = serde_json::from_value(params.unwrap_or(Value::Null))
            .map_err(|e| JsonRpcError::invalid_params(format!("Invalid tools/call params: {}", e)))?;
        let tool = self
            .registry
            .get(&params.name)
            .ok_or_else(|| JsonRpcError::invalid_params(format!("Unknown tool: {}", params.name)))?;

        let key = id.to_string();
        debug!(tool = %params.name, id = %key, "Calling tool");

        // Held until the handle is stored, so the task cannot deregister first.
        let mut running = in_flight.lock().await;
        let generation = running.next_generation();
        let task_key = key.clone();
        let task_in_flight = Arc::clone(in_flight);
        let handle = tokio::spawn(async move {
            let response = match tool.execute(params.arguments).await {
                Ok(result) => respond(id, &result),
                Err(e) => {
                    error!(tool = %params.name, error = %e, "Tool execution failed");
                    JsonRpcResponse::error(id, JsonRpcError::internal_error(e.to_string()))
                }
            };
            task_in_flight.lock().await.finish(&task_key, generation);
            send(&tx, response).await;
        });
        running.insert(key, generation, handle.abort_handle());
        Ok(())
    }

    async fn handle_notification(&self, method: &str, params: Option<Value>, in_flight: &SharedInFlight) {
        match method {
            "notifications/initialized" => debug!("Client finished initialization"),
            "notifications/cancelled" => {
                let params = match params.map(serde_json::from_value::<CancelledParams>) {
                    Some(Ok(params)) => params,
                    _ => {
                        warn!("Ignoring malformed cancellation");
                        return;
                    }
                };
                let key = params.request_id.to_string();
                if in_flight.lock().await.cancel(&key) {
                    info!(id = %key, reason = ?params.reason, "Cancelled tool call");
                } else {
                    debug!(id = %key, "Cancellation for a request that is not running");
                }
            }
            other => debug!(method = %other, "Ignoring notification"),
        }
    }
}

fn respond<T: Serialize>(id: Value, result: &T) -> JsonRpcResponse {
    match serde_json::to_value(result) {
        Ok(value) => JsonRpcResponse::success(id, value),
        Err(e) => JsonRpcResponse::error(id, JsonRpcError::internal_error(e.to_string())),
    }
}

async fn send(tx: &mpsc::Sender<JsonRpcResponse>, response: JsonRpcResponse) {
    if tx.send(response).await.is_err() {
        warn!("Response dropped, writer has stopped");
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tools::Tool;
    use tokio::io::{AsyncBufReadExt, AsyncWriteExt, BufReader, DuplexStream, Lines, ReadHalf, WriteHalf};

    struct EchoTool;

    #[async_trait::async_trait]
    impl Tool for EchoTool {
        fn schema(&self) -> ToolSchema {
            ToolSchema {
                name: "echo".to_string(),
                title: None,
                description: "Echo the arguments".to_string(),
                input_schema: json!({"type": "object"}),
            }
        }

        async fn execute(&self, arguments: Value) -> Result<CallToolResult> {
            Ok(CallToolResult::text(arguments.to_string()))
        }
    }

    struct Client {
        lines: Lines<BufReader<ReadHalf<DuplexStream>>>,
        writer: WriteHalf<DuplexStream>,
    }

    impl Client {
        async fn send(&mut self, message: Value) {
            self.send_raw(&message.to_string()).await;
        }

        async fn send_raw(&mut self, line: &str) {
            self.writer.write_all(line.as_bytes()).await.unwrap();
            self.writer.write_all(b"\n").await.unwrap();
        }

        async fn recv(&mut self) -> Value {
            let line = self.lines.next_line().await.unwrap().unwrap();
            serde_json::from_str(&line).unwrap()
        }
    }

    fn connect() -> Client {
        let mut registry = ToolRegistry::new();
        registry.register(Arc::new(EchoTool));
        let server = McpServer::new(registry);

        let (client, server_io) = tokio::io::duplex(64 * 1024);
        let (read, write) = tokio::io::split(server_io);
        tokio::spawn(async move { server.serve(read, write).await });

        let (read, writer) = tokio::io::split(client);
        Client {
            lines: BufReader::new(read).lines(),
            writer,
        }
    }

    #[tokio::test]
    async fn test_initialize_negotiates_version() {
        let mut client = connect();
        client
            .send(json!({
                "jsonrpc": "2.0",
                "id": 1,
                "method": "initialize",
                "params": {
                    "protocolVersion": "2024-11-05",
                    "capabilities": {"roots": {"listChanged": true}, "sampling": {}},
                    "clientInfo": {"name": "test", "version": "1.0"}
                }
            }))
            .await;

        let response = client.recv().await;
        assert_eq!(response["id"], 1);
        assert_eq!(response["result"]["protocolVersion"], "2024-11-05");
        assert_eq!(response["result"]["serverInfo"]["name"], SERVER_NAME);
        assert_eq!(response["result"]["capabilities"]["tools"]["listChanged"], false);
    }

    #[tokio::test]
    async fn test_ping_and_unknown_method() {
        let mut client = connect();
        client
            .send(json!({"jsonrpc": "2.0", "id": "a", "method": "ping"}))
            .await;
        let response = client.recv().await;
        assert_eq!(response["id"], "a");
        assert_eq!(response["result"], json!({}));

        client
            .send(json!({"jsonrpc": "2.0", "id": 2, "method": "resources/list"}))
            .await;
        let response = client.recv().await;
        assert_eq!(response["error"]["code"], JsonRpcError::METHOD_NOT_FOUND);
    }

    #[tokio::test]
    async fn test_malformed_json_is_parse_error() {
        let mut client = connect();
        client.send_raw("{not json").await;

        let response = client.recv().await;
        assert_eq!(response["id"], Value::Null);
        assert_eq!(response["error"]["code"], JsonRpcError::PARSE_ERROR);
    }

    #[tokio::test]
    async fn test_tools_call_and_unknown_tool() {
        let mut client = connect();
        client
            .send(json!({
                "jsonrpc": "2.0",
                "id": 3,
                "method": "tools/call",
                "params": {"name": "echo", "arguments": {"x": 1}}
            }))
            .await;
        let response = client.recv().await;
        assert_eq!(response["id"], 3);
        assert_eq!(response["result"]["isError"], false);
        assert_eq!(response["result"]["content"][0]["text"], "{\"x\":1}");

        client
            .send(json!({
                "jsonrpc": "2.0",
                "id": 4,
                "method": "tools/call",
                "params": {"name": "nope"}
            }))
            .await;
        let response = client.recv().await;
        assert_eq!(response["error"]["code"], JsonRpcError::INVALID_PARAMS);
    }

    #[tokio::test]
    async fn test_notifications_get_no_response() {
        let mut client = connect();
        client
            .send(json!({"jsonrpc": "2.0", "method": "notifications/initialized"}))
            .await;
        client
            .send(json!({"jsonrpc": "2.0", "id": 5, "method": "ping"}))
            .await;

        let response = client.recv().await;
        assert_eq!(response["id"], 5);
    }

    #[tokio::test]
    async fn test_reused_id_keeps_the_newer_call() {
        let first = tokio::spawn(std::future::pending::<()>());
        let second = tokio::spawn(std::future::pending::<()>());
        let mut in_flight = InFlight::default();

        let old = in_flight.next_generation();
        in_flight.insert("1".to_string(), old, first.abort_handle());
        let new = in_flight.next_generation();
        in_flight.insert("1".to_string(), new, second.abort_handle());
        assert!(first.await.unwrap_err().is_cancelled());

        // The replaced call finishing must not drop the newer registration.
        in_flight.finish("1", old);
        assert!(in_flight.cancel("1"));
        assert!(second.await.unwrap_err().is_cancelled());
        assert!(!in_flight.cancel("1"));

        let third = tokio::spawn(async {});
        let generation = in_flight.next_generation();
        in_flight.insert("2".to_string(), generation, third.abort_handle());
        in_flight.finish("2", generation);
        assert!(!in_flight.cancel("2"));
    }
}

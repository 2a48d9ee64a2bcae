//! MCP server over newline-delimited JSON-RPC on stdio

use crate::protocol::*;
use crate::tools::{all_tools, Tool};
use anyhow::{Context, Result};
use dfir_iris_core::IrisClient;
use serde::Deserialize;
use serde_json::{json, Value};
use tokio::io::{AsyncBufRead, AsyncBufReadExt, AsyncWrite, AsyncWriteExt, BufReader};

/// Name reported in `initialize`
pub const SERVER_NAME: &str = "dfir-iris-mcp";

/// MCP Server
pub struct MCPServer {
    tools: Vec<Box<dyn Tool>>,
}

impl MCPServer {
    /// Create a server exposing every DFIR-IRIS tool
    pub fn new(client: &IrisClient) -> Self {
        Self::with_tools(all_tools(client))
    }

    pub fn with_tools(tools: Vec<Box<dyn Tool>>) -> Self {
        Self { tools }
    }

    pub fn tool_count(&self) -> usize {
        self.tools.len()
    }

    /// Listen on stdio until EOF
    pub async fn listen_stdio(&self) -> Result<()> {
        tracing::info!(tools = self.tools.len(), "Starting MCP server in stdio mode");
        let stdin = BufReader::new(tokio::io::stdin());
        let stdout = tokio::io::stdout();
        self.serve(stdin, stdout).await
    }

    /// Serve line-delimited requests from `reader`, writing responses to `writer`
    pub async fn serve<R, W>(&self, reader: R, mut writer: W) -> Result<()>
    where
        R: AsyncBufRead + Unpin,
        W: AsyncWrite + Unpin,
    {
        let mut lines = reader.lines();

        while let Some(line) = lines
            .next_line()
            .await
            .context("Failed to read request line")?
        {
            let line = line.trim();
            if line.is_empty() {
                continue;
            }

            if let Some(response) = self.handle_line(line).await {
                let response_json = serde_json::to_string(&response)?;
                tracing::trace!("Sending response: {}", response_json);
                writer.write_all(response_json.as_bytes()).await?;
                writer.write_all(b"\n").await?;
                writer.flush().await?;
            }
        }

        tracing::info!("stdin closed, shutting down");
        Ok(())
    }

    /// Handle one raw JSON-RPC line; `None` for notifications
    pub async fn handle_line(&self, line: &str) -> Option<MCPResponse> {
        tracing::trace!("Received request: {}", line);

        let message: Value = match serde_json::from_str(line) {
            Ok(message) => message,
            Err(e) => {
                tracing::error!("Failed to parse request: {}", e);
                return Some(MCPResponse::error(
                    None,
                    MCPError::parse_error(format!("Failed to parse request: {}", e)),
                ));
            }
        };

        // Echo whatever id can be recovered from a malformed request.
        let id = message
            .get("id")
            .and_then(|id| RequestId::deserialize(id).ok());

        match MCPRequest::deserialize(&message) {
            Ok(request) if request.jsonrpc == JSONRPC_VERSION => {
                self.handle_request(request).await
            }
            Ok(request) => Some(MCPResponse::error(
                id,
                MCPError::invalid_request(format!(
                    "Unsupported jsonrpc version '{}'",
                    request.jsonrpc
                )),
            )),
            Err(e) => {
                tracing::warn!("Invalid request: {}", e);
                Some(MCPResponse::error(
                    id,
                    MCPError::invalid_request(format!("Invalid request: {}", e)),
                ))
            }
        }
    }

    /// Handle an MCP request
    pub async fn handle_request(&self, request: MCPRequest) -> Option<MCPResponse> {
        let Some(id) = request.id else {
            tracing::debug!(method = %request.method, "notification");
            return None;
        };

        let response = match request.method.as_str() {
            "initialize" => self.handle_initialize(id),
            "ping" => MCPResponse::success(id, json!({})),
            "tools/list" => self.handle_list_tools(id),
            "tools/call" => self.handle_call_tool(id, request.params).await,
            other => MCPResponse::error(Some(id), MCPError::method_not_found(other)),
        };
        Some(response)
    }

    fn handle_initialize(&self, id: RequestId) -> MCPResponse {
        let result = InitializeResponse {
            protocol_version: MCP_VERSION.to_string(),
            capabilities: ServerCapabilities {
                tools: Some(ServerToolCapabilities {
                    list_changed: Some(false),
                }),
            },
            server_info: ServerInfo {
                name: SERVER_NAME.to_string(),
                version: env!("CARGO_PKG_VERSION").to_string(),
            },
        };

        to_response(id, &result)
    }

    fn handle_list_tools(&self, id: RequestId) -> MCPResponse {
        let tools: Vec<ToolDefinition> = self.tools.iter().map(|t| t.definition()).collect();

        MCPResponse::success(id, json!({ "tools": tools }))
    }

    async fn handle_call_tool(&self, id: RequestId, params: Option<Value>) -> MCPResponse {
        let params: CallToolParams = match params.map(serde_json::from_value) {
            Some(Ok(params)) => params,
            Some(Err(e)) => {
                return MCPResponse::error(
                    Some(id),
                    MCPError::invalid_params(format!("Invalid tools/call params: {}", e)),
                )
            }
            None => {
                return MCPResponse::error(
                    Some(id),
                    MCPError::invalid_params("Missing tools/call params"),
                )
            }
        };

        // Find tool
        let Some(tool) = self.tools.iter().find(|t| t.name() == params.name) else {
            return MCPResponse::error(Some(id), MCPError::tool_not_found(&params.name));
        };

        tracing::debug!(tool = %params.name, "calling tool");
        match tool.execute(params.arguments).await {
            Ok(result) => to_response(id, &result),
            Err(e) => {
                tracing::warn!(tool = %params.name, "rejected tool arguments: {}", e.message);
                MCPResponse::error(Some(id), e)
            }
        }
    }
}

fn to_response<T: serde::Serialize>(id: RequestId, result: &T) -> MCPResponse {
    match serde_json::to_value(result) {
        Ok(value) => MCPResponse::success(id, value),
        Err(e) => MCPResponse::error(
            Some(id),
            MCPError::internal_error(format!("Failed to encode result: {}", e)),
        ),
    }
}

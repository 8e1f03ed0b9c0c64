// MCP server: line-delimited JSON-RPC 2.0 over stdio

use crate::protocol::{
    CallToolParams, InitializeParams, InitializeResult, JsonRpcError, JsonRpcRequest,
    JsonRpcResponse, ListToolsResult, ServerCapabilities, ServerInfo, ToolsCapability,
    DEFAULT_PROTOCOL_VERSION,
};
use crate::tools::ToolRegistry;
use anyhow::Result;
use serde::Serialize;
use serde_json::Value;
use tokio::io::{AsyncBufRead, AsyncBufReadExt, AsyncWrite, AsyncWriteExt, BufReader};
use tracing::{debug, info, warn};

/// Name reported in `serverInfo` unless configured otherwise.
pub const DEFAULT_SERVER_NAME: &str = "apollo-mcp-server";

pub struct McpServer {
    registry: ToolRegistry,
    info: ServerInfo,
}

impl McpServer {
    pub fn new(registry: ToolRegistry) -> Self {
        Self {
            registry,
            info: ServerInfo {
                name: DEFAULT_SERVER_NAME.to_string(),
                version: env!("CARGO_PKG_VERSION").to_string(),
            },
        }
    }

    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.info.name = name.into();
        self
    }

    pub fn registry(&self) -> &ToolRegistry {
        &self.registry
    }

    /// Serve on the process stdin/stdout until stdin closes.
    pub async fn start(&self) -> Result<()> {
        info!(
            server = %self.info.name,
            tools = self.registry.len(),
            "MCP server listening on stdio"
        );
        self.serve(BufReader::new(tokio::io::stdin()), tokio::io::stdout())
            .await
    }

    /// Read one request per line and write one response per line.
    /// Notifications and blank lines produce no output.
    pub async fn serve<R, W>(&self, reader: R, mut writer: W) -> Result<()>
    where
        R: AsyncBufRead + Unpin,
        W: AsyncWrite + Unpin,
    {
        let mut lines = reader.lines();

        while let Some(line) = lines.next_line().await? {
            let line = line.trim();
            if line.is_empty() {
                continue;
            }

            if let Some(response) = self.handle_line(line).await {
                write_response(&mut writer, &response).await?;
            }
        }

        info!("stdin closed, MCP server stopping");
        Ok(())
    }

    /// Decode and answer a single raw message.
    pub async fn handle_line(&self, line: &str) -> Option<JsonRpcResponse> {
        let message: Value = match serde_json::from_str(line) {
            Ok(message) => message,
            Err(e) => {
                warn!(error = %e, "Discarding unparseable message");
                return Some(JsonRpcResponse::error(Value::Null, JsonRpcError::parse_error()));
            }
        };

        let id = message.get("id").cloned().unwrap_or(Value::Null);
        match serde_json::from_value::<JsonRpcRequest>(message) {
            Ok(request) => self.handle_request(request).await,
            Err(e) => Some(JsonRpcResponse::error(
                id,
                JsonRpcError::invalid_request(format!("Invalid request: {}", e)),
            )),
        }
    }

    pub async fn handle_request(&self, request: JsonRpcRequest) -> Option<JsonRpcResponse> {
        let Some(id) = request.id.clone() else {
            debug!(method = %request.method, "Received notification");
            return None;
        };

        debug!(method = %request.method, "Handling request");
        let outcome = match request.method.as_str() {
            "initialize" => self.initialize(request.params),
            "ping" => Ok(serde_json::json!({})),
            "tools/list" => to_result(&ListToolsResult {
                tools: self.registry.list_schemas(),
            }),
            "tools/call" => self.call_tool(request.params).await,
            other => Err(JsonRpcError::method_not_found(other)),
        };

        Some(match outcome {
            Ok(result) => JsonRpcResponse::success(id, result),
            Err(error) => JsonRpcResponse::error(id, error),
        })
    }

    fn initialize(&self, params: Option<Value>) -> Result<Value, JsonRpcError> {
        // Unreadable initialize params are tolerated; only the version is used
        let params: InitializeParams = params
            .and_then(|p| serde_json::from_value(p).ok())
            .unwrap_or_default();

        if let Some(client) = &params.client_info {
            info!(client = %client.name, version = %client.version, "Client connected");
        }

        to_result(&InitializeResult {
            protocol_version: params
                .protocol_version
                .unwrap_or_else(|| DEFAULT_PROTOCOL_VERSION.to_string()),
            capabilities: ServerCapabilities {
                tools: ToolsCapability {
                    list_changed: false,
                },
            },
            server_info: self.info.clone(),
        })
    }

    async fn call_tool(&self, params: Option<Value>) -> Result<Value, JsonRpcError> {
        let params: CallToolParams = params
            .ok_or_else(|| JsonRpcError::invalid_params("Missing params for tools/call"))
            .and_then(|p| {
                serde_json::from_value(p).map_err(|e| {
                    JsonRpcError::invalid_params(format!("Invalid params for tools/call: {}", e))
                })
            })?;

        let result = self.registry.call(&params.name, params.arguments).await;
        to_result(&result)
    }
}

fn to_result<T: Serialize>(value: &T) -> Result<Value, JsonRpcError> {
    serde_json::to_value(value).map_err(|e| JsonRpcError::internal_error(e.to_string()))
}

async fn write_response<W: AsyncWrite + Unpin>(
    writer: &mut W,
    response: &JsonRpcResponse,
) -> Result<()> {
    let line = serde_json::to_string(response)?;
    writer.write_all(line.as_bytes()).await?;
    writer.write_all(b"\n").await?;
    writer.flush().await?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tools::apollo_tools;
    use apollo_sdk::ApolloClient;
    use serde_json::json;

    fn server() -> McpServer {
        McpServer::new(apollo_tools(ApolloClient::builder().build().unwrap()))
    }

    async fn roundtrip(server: &McpServer, input: &str) -> Vec<Value> {
        let mut output = Vec::new();
        server.serve(input.as_bytes(), &mut output).await.unwrap();

        String::from_utf8(output)
            .unwrap()
            .lines()
            .map(|line| serde_json::from_str(line).unwrap())
            .collect()
    }

    #[tokio::test]
    async fn test_initialize_echoes_protocol_version() {
        let responses = roundtrip(
            &server(),
            r#"{"jsonrpc":"2.0","id":1,"method":"initialize","params":{"protocolVersion":"2025-03-26","capabilities":{},"clientInfo":{"name":"test","version":"1"}}}"#,
        )
        .await;

        assert_eq!(responses.len(), 1);
        let result = &responses[0]["result"];
        assert_eq!(result["protocolVersion"], "2025-03-26");
        assert_eq!(result["serverInfo"]["name"], "apollo-mcp-server");
        assert_eq!(result["capabilities"]["tools"]["listChanged"], false);
    }

    #[tokio::test]
    async fn test_notifications_and_blank_lines_are_silent() {
        let input = concat!(
            "{\"jsonrpc\":\"2.0\",\"method\":\"notifications/initialized\"}\n",
            "\n",
            "   \n",
            "{\"jsonrpc\":\"2.0\",\"id\":\"p\",\"method\":\"ping\"}\n",
        );
        let responses = roundtrip(&server(), input).await;

        assert_eq!(responses.len(), 1);
        assert_eq!(responses[0]["id"], "p");
        assert_eq!(responses[0]["result"], json!({}));
    }

    #[tokio::test]
    async fn test_tools_list_in_catalogue_order() {
        let responses = roundtrip(
            &server(),
            r#"{"jsonrpc":"2.0","id":2,"method":"tools/list"}"#,
        )
        .await;

        let tools = responses[0]["result"]["tools"].as_array().unwrap();
        assert_eq!(tools.len(), 7);
        assert_eq!(tools[0]["name"], "search_people");
        assert_eq!(tools[6]["name"], "export_to_csv");
        assert!(tools[0].get("inputSchema").is_some());
    }

    #[tokio::test]
    async fn test_parse_error_then_continue() {
        let input = "{not json\n{\"jsonrpc\":\"2.0\",\"id\":3,\"method\":\"ping\"}\n";
        let responses = roundtrip(&server(), input).await;

        assert_eq!(responses.len(), 2);
        assert_eq!(responses[0]["error"]["code"], -32700);
        assert_eq!(responses[0]["id"], Value::Null);
        assert_eq!(responses[1]["id"], 3);
    }

    #[tokio::test]
    async fn test_unknown_method() {
        let responses = roundtrip(
            &server(),
            r#"{"jsonrpc":"2.0","id":4,"method":"resources/list"}"#,
        )
        .await;

        assert_eq!(responses[0]["error"]["code"], -32601);
        assert_eq!(responses[0]["id"], 4);
    }

    #[tokio::test]
    async fn test_tools_call_without_params() {
        let responses = roundtrip(
            &server(),
            r#"{"jsonrpc":"2.0","id":5,"method":"tools/call"}"#,
        )
        .await;

        assert_eq!(responses[0]["error"]["code"], -32602);
    }

    #[tokio::test]
    async fn test_unknown_tool_is_error_content() {
        let responses = roundtrip(
            &server(),
            r#"{"jsonrpc":"2.0","id":6,"method":"tools/call","params":{"name":"delete_everything","arguments":{}}}"#,
        )
        .await;

        let result = &responses[0]["result"];
        assert!(responses[0].get("error").is_none());
        assert_eq!(result["isError"], true);
        assert_eq!(result["content"][0]["text"], "Error: Unknown tool: delete_everything");
    }

    #[tokio::test]
    async fn test_export_call_returns_raw_csv() {
        let responses = roundtrip(
            &server(),
            r#"{"jsonrpc":"2.0","id":7,"method":"tools/call","params":{"name":"export_to_csv","arguments":{"data":[{"a":1,"b":"x"}]}}}"#,
        )
        .await;

        let result = &responses[0]["result"];
        assert!(result.get("isError").is_none());
        assert_eq!(result["content"][0]["type"], "text");
        assert_eq!(result["content"][0]["text"], "a,b\n1,x");
    }

    #[tokio::test]
    async fn test_missing_api_key_surfaces_as_tool_error() {
        let responses = roundtrip(
            &server(),
            r#"{"jsonrpc":"2.0","id":8,"method":"tools/call","params":{"name":"search_people","arguments":{"q_keywords":"cto"}}}"#,
        )
        .await;

        let result = &responses[0]["result"];
        assert_eq!(result["isError"], true);
        assert!(result["content"][0]["text"]
            .as_str()
            .unwrap()
            .contains("APOLLO_API_KEY environment variable is required"));
    }

    #[tokio::test]
    async fn test_configured_server_name() {
        let server = server().with_name("crm-adapter");
        let response = server
            .handle_line(r#"{"jsonrpc":"2.0","id":9,"method":"initialize"}"#)
            .await
            .unwrap();

        let result = response.result.unwrap();
        assert_eq!(result["serverInfo"]["name"], "crm-adapter");
        assert_eq!(result["protocolVersion"], DEFAULT_PROTOCOL_VERSION);
    }
}

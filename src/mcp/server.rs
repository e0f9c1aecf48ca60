//! MCP Server implementation using JSON-RPC 2.0 over stdio
//!
//! Implements the minimal MCP protocol:
//! - `initialize` - Return server info and capabilities
//! - `tools/list` - Return available tool definitions
//! - `tools/call` - Execute a tool and return result
//!
//! Requests are handled one at a time against a single [`EngineContext`], so
//! the explorer's current directory carries over between calls.

use crate::context::EngineContext;
use crate::error::EngineError;
use crate::services::render_error;
use crate::Result;
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};
use tokio::io::{AsyncBufReadExt, AsyncWriteExt, BufReader};

use super::tools::ToolRegistry;

/// MCP Server for handling JSON-RPC requests over stdio
pub struct McpServer {
    tool_registry: ToolRegistry,
    context: EngineContext,
}

/// JSON-RPC 2.0 Request
#[derive(Debug, Deserialize)]
struct JsonRpcRequest {
    jsonrpc: String,
    id: Option<Value>,
    method: String,
    #[serde(default)]
    params: Option<Value>,
}

/// JSON-RPC 2.0 Response
#[derive(Debug, Serialize)]
struct JsonRpcResponse {
    jsonrpc: String,
    id: Value,
    #[serde(skip_serializing_if = "Option::is_none")]
    result: Option<Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    error: Option<JsonRpcError>,
}

/// JSON-RPC 2.0 Error
#[derive(Debug, Serialize)]
struct JsonRpcError {
    code: i32,
    message: String,
}

// JSON-RPC error codes
const PARSE_ERROR: i32 = -32700;
const INVALID_REQUEST: i32 = -32600;
const METHOD_NOT_FOUND: i32 = -32601;
const INVALID_PARAMS: i32 = -32602;

const PROTOCOL_VERSION: &str = "2024-11-05";

impl JsonRpcResponse {
    fn success(id: Value, result: Value) -> Self {
        Self {
            jsonrpc: "2.0".to_string(),
            id,
            result: Some(result),
            error: None,
        }
    }

    fn failure(id: Value, code: i32, message: String) -> Self {
        Self {
            jsonrpc: "2.0".to_string(),
            id,
            result: None,
            error: Some(JsonRpcError { code, message }),
        }
    }
}

impl McpServer {
    pub fn new(context: EngineContext) -> Self {
        Self {
            tool_registry: ToolRegistry::new(),
            context,
        }
    }

    pub fn context(&self) -> &EngineContext {
        &self.context
    }

    /// Run the MCP server, reading from stdin and writing to stdout
    pub async fn run(&mut self) -> Result<()> {
        let mut lines = BufReader::new(tokio::io::stdin()).lines();
        let mut stdout = tokio::io::stdout();

        tracing::info!("MCP server started, waiting for requests");

        while let Some(line) = lines.next_line().await? {
            if line.trim().is_empty() {
                continue;
            }

            if let Some(response) = self.handle_line(&line) {
                stdout.write_all(response.as_bytes()).await?;
                stdout.write_all(b"\n").await?;
                stdout.flush().await?;
            }
        }

        tracing::info!("MCP server stopped");
        Ok(())
    }

    /// Handle one request line; notifications produce no response
    pub fn handle_line(&mut self, line: &str) -> Option<String> {
        let response = self.handle_request(line)?;
        match serde_json::to_string(&response) {
            Ok(json) => Some(json),
            Err(e) => {
                tracing::error!(error = %e, "failed to serialize response");
                None
            }
        }
    }

    fn handle_request(&mut self, line: &str) -> Option<JsonRpcResponse> {
        let request: JsonRpcRequest = match serde_json::from_str(line) {
            Ok(r) => r,
            Err(e) => {
                return Some(JsonRpcResponse::failure(
                    Value::Null,
                    PARSE_ERROR,
                    format!("Parse error: {}", e),
                ));
            }
        };

        if request.jsonrpc != "2.0" {
            return Some(JsonRpcResponse::failure(
                request.id.unwrap_or(Value::Null),
                INVALID_REQUEST,
                "Invalid JSON-RPC version".to_string(),
            ));
        }

        let Some(id) = request.id.clone() else {
            tracing::debug!(method = %request.method, "notification");
            return None;
        };

        let result = match request.method.as_str() {
            "initialize" => Ok(self.handle_initialize()),
            "ping" => Ok(json!({})),
            "tools/list" => Ok(self.handle_tools_list()),
            "tools/call" => self.handle_tools_call(&request.params),
            "shutdown" => {
                tracing::info!("shutdown requested");
                Ok(json!({}))
            }
            _ => Err((
                METHOD_NOT_FOUND,
                format!("Method not found: {}", request.method),
            )),
        };

        Some(match result {
            Ok(value) => JsonRpcResponse::success(id, value),
            Err((code, message)) => JsonRpcResponse::failure(id, code, message),
        })
    }

    fn handle_initialize(&self) -> Value {
        json!({
            "protocolVersion": PROTOCOL_VERSION,
            "serverInfo": {
                "name": "emergence-engine",
                "version": env!("CARGO_PKG_VERSION")
            },
            "capabilities": {
                "tools": {}
            }
        })
    }

    fn handle_tools_list(&self) -> Value {
        json!({ "tools": self.tool_registry.list_tools() })
    }

    fn handle_tools_call(
        &mut self,
        params: &Option<Value>,
    ) -> std::result::Result<Value, (i32, String)> {
        let params = params
            .as_ref()
            .ok_or((INVALID_PARAMS, "Missing params".to_string()))?;

        let name = params
            .get("name")
            .and_then(|v| v.as_str())
            .ok_or((INVALID_PARAMS, "Missing tool name".to_string()))?;

        if !self.tool_registry.has_tool(name) {
            return Err((INVALID_PARAMS, format!("Unknown tool: {}", name)));
        }

        let arguments = params.get("arguments").cloned().unwrap_or(json!({}));

        tracing::info!(tool = name, %arguments, "calling tool");

        match self.tool_registry.call_tool(name, &arguments, &mut self.context) {
            Ok(text) => Ok(json!({
                "content": [{ "type": "text", "text": text }]
            })),
            Err(e) => {
                let text = match e.downcast_ref::<EngineError>() {
                    Some(engine_err) if engine_err.is_recoverable() => render_error(engine_err),
                    _ => {
                        tracing::error!(tool = name, error = %e, "tool failed");
                        format!("❌ Error: {:#}", e)
                    }
                };
                Ok(json!({
                    "content": [{ "type": "text", "text": text }],
                    "isError": true
                }))
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::EngineConfig;
    use tempfile::TempDir;

    fn setup_server() -> (TempDir, McpServer) {
        let temp = TempDir::new().unwrap();
        let config = EngineConfig {
            state_dir: temp.path().join("states"),
            methodology_root: temp.path().join("methodology"),
            ..EngineConfig::default()
        };
        let server = McpServer::new(EngineContext::new(config).unwrap());
        (temp, server)
    }

    fn call(server: &mut McpServer, request: Value) -> Value {
        let line = server.handle_line(&request.to_string()).unwrap();
        serde_json::from_str(&line).unwrap()
    }

    #[test]
    fn test_parse_request() {
        let json = r#"{"jsonrpc":"2.0","id":1,"method":"initialize","params":{}}"#;
        let request: JsonRpcRequest = serde_json::from_str(json).unwrap();
        assert_eq!(request.method, "initialize");
        assert_eq!(request.jsonrpc, "2.0");
    }

    #[test]
    fn test_serialize_response() {
        let response = JsonRpcResponse::success(json!(1), json!({"status": "ok"}));
        let json = serde_json::to_string(&response).unwrap();
        assert!(json.contains("\"result\""));
        assert!(!json.contains("\"error\""));
    }

    #[test]
    fn test_initialize() {
        let (_temp, mut server) = setup_server();
        let response = call(
            &mut server,
            json!({"jsonrpc": "2.0", "id": 1, "method": "initialize", "params": {}}),
        );
        assert_eq!(response["id"], 1);
        assert_eq!(response["result"]["serverInfo"]["name"], "emergence-engine");
    }

    #[test]
    fn test_notification_has_no_response() {
        let (_temp, mut server) = setup_server();
        let line = json!({"jsonrpc": "2.0", "method": "notifications/initialized"}).to_string();
        assert!(server.handle_line(&line).is_none());
    }

    #[test]
    fn test_protocol_errors() {
        let (_temp, mut server) = setup_server();

        let line = server.handle_line("{not json").unwrap();
        let response: Value = serde_json::from_str(&line).unwrap();
        assert_eq!(response["error"]["code"], PARSE_ERROR);

        let response = call(
            &mut server,
            json!({"jsonrpc": "1.0", "id": 2, "method": "initialize"}),
        );
        assert_eq!(response["error"]["code"], INVALID_REQUEST);

        let response = call(
            &mut server,
            json!({"jsonrpc": "2.0", "id": 3, "method": "resources/list"}),
        );
        assert_eq!(response["error"]["code"], METHOD_NOT_FOUND);

        let response = call(
            &mut server,
            json!({"jsonrpc": "2.0", "id": 4, "method": "tools/call", "params": {"name": "nope"}}),
        );
        assert_eq!(response["error"]["code"], INVALID_PARAMS);
    }

    #[test]
    fn test_tool_error_is_result() {
        let (_temp, mut server) = setup_server();
        let response = call(
            &mut server,
            json!({
                "jsonrpc": "2.0",
                "id": 5,
                "method": "tools/call",
                "params": {"name": "get_next_phase", "arguments": {"starlog_path": "/nowhere"}}
            }),
        );
        assert_eq!(response["result"]["isError"], true);
        let text = response["result"]["content"][0]["text"].as_str().unwrap();
        assert!(text.contains("No active journey found"));
    }
}

/// JSON-RPC message types for the MCP wire format
///
/// Everything the habit journal says to a client, and everything a client
/// says back, travels as one JSON-RPC 2.0 message per line. The structs
/// here mirror that framing; the server module decides what goes in them.

use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::HashMap;

/// MCP protocol revision this server speaks
pub const MCP_VERSION: &str = "2024-11-05";

/// An incoming JSON-RPC 2.0 request
///
/// `method` picks the handler ("initialize", "tools/list", "tools/call")
/// and `id` is echoed back so the client can pair responses to requests.
#[derive(Debug, Deserialize)]
pub struct JsonRpcRequest {
    #[allow(dead_code)]
    pub jsonrpc: String,
    pub id: Value,
    pub method: String,
    pub params: Option<Value>,
}

/// An outgoing JSON-RPC 2.0 response
///
/// Exactly one of `result` and `error` is present; the other is skipped
/// during serialization rather than sent as null.
#[derive(Debug, Serialize)]
pub struct JsonRpcResponse {
    pub jsonrpc: String,
    pub id: Value,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub result: Option<Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<JsonRpcError>,
}

/// The error half of a failed JSON-RPC response
#[derive(Debug, Serialize)]
pub struct JsonRpcError {
    pub code: i32,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<Value>,
}

/// Payload of a "tools/call" request: which tool, with which arguments
#[derive(Debug, Deserialize)]
pub struct ToolCallParams {
    pub name: String,
    #[serde(default)]
    pub arguments: HashMap<String, Value>,
}

/// What a tool invocation hands back to the client
///
/// Tool failures ride inside a successful JSON-RPC response with
/// `is_error` set, so the client can show the message to the user
/// instead of treating it as a protocol fault.
#[derive(Debug, Serialize)]
pub struct ToolCallResult {
    pub content: Vec<ToolContent>,
    #[serde(default)]
    pub is_error: bool,
}

/// One piece of tool output, currently always text
#[derive(Debug, Serialize)]
pub struct ToolContent {
    #[serde(rename = "type")]
    pub content_type: String,
    pub text: String,
}

/// Advertisement of one tool in the "tools/list" response
#[derive(Debug, Serialize)]
pub struct ToolDefinition {
    pub name: String,
    pub description: String,
    /// JSON schema describing the tool's accepted arguments
    pub input_schema: Value,
}

/// What this server can do, reported during initialization
#[derive(Debug, Serialize)]
pub struct ServerCapabilities {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tools: Option<ToolsCapability>,
}

/// Tool-related capability flags
#[derive(Debug, Serialize)]
pub struct ToolsCapability {
    /// Whether the tool list can change after initialization
    #[serde(default)]
    pub list_changed: bool,
}

/// Body of the "initialize" response
#[derive(Debug, Serialize)]
pub struct InitializeResult {
    pub protocol_version: String,
    pub capabilities: ServerCapabilities,
    pub server_info: ServerInfo,
}

/// Name and version the server introduces itself with
#[derive(Debug, Serialize)]
pub struct ServerInfo {
    pub name: String,
    pub version: String,
}

/// JSON-RPC error codes
///
/// The first group is fixed by the JSON-RPC 2.0 spec; the -32000 to
/// -32099 range is reserved for applications, which is where the habit
/// journal's own failure kinds live.
#[allow(dead_code)]
pub mod error_codes {
    pub const PARSE_ERROR: i32 = -32700;
    pub const INVALID_REQUEST: i32 = -32600;
    pub const METHOD_NOT_FOUND: i32 = -32601;
    pub const INVALID_PARAMS: i32 = -32602;
    pub const INTERNAL_ERROR: i32 = -32603;

    /// No habit exists with the given ID
    pub const HABIT_NOT_FOUND: i32 = -32001;
    /// An active habit already uses this name
    pub const DUPLICATE_HABIT: i32 = -32002;
    /// A tool argument failed validation
    pub const VALIDATION_ERROR: i32 = -32003;
    /// The database could not complete the operation
    pub const STORAGE_ERROR: i32 = -32004;
}

impl JsonRpcResponse {
    /// Response carrying a result
    pub fn success(id: Value, result: Value) -> Self {
        Self {
            jsonrpc: "2.0".to_string(),
            id,
            result: Some(result),
            error: None,
        }
    }

    /// Response carrying an error
    pub fn error(id: Value, code: i32, message: String, data: Option<Value>) -> Self {
        Self {
            jsonrpc: "2.0".to_string(),
            id,
            result: None,
            error: Some(JsonRpcError {
                code,
                message,
                data,
            }),
        }
    }
}

impl ToolCallResult {
    /// Wrap tool output text in a result the client renders as-is
    pub fn success(text: String) -> Self {
        Self {
            content: vec![ToolContent {
                content_type: "text".to_string(),
                text,
            }],
            is_error: false,
        }
    }

    /// Wrap a failure message in a result flagged as an error
    pub fn error(error_message: String) -> Self {
        Self {
            content: vec![ToolContent {
                content_type: "text".to_string(),
                text: format!("Error: {}", error_message),
            }],
            is_error: true,
        }
    }
}

/// Map a tool failure onto the matching application error code
#[allow(dead_code)]
pub fn tool_error_to_json_rpc_code(error: &crate::tools::ToolError) -> i32 {
    use crate::domain::DomainError;
    use crate::storage::StoreError;
    use crate::tools::ToolError;

    match error {
        ToolError::Domain(DomainError::DuplicateHabitName(_)) => error_codes::DUPLICATE_HABIT,
        ToolError::Domain(_) => error_codes::VALIDATION_ERROR,
        ToolError::Store(StoreError::HabitNotFound { .. }) => error_codes::HABIT_NOT_FOUND,
        ToolError::Store(_) => error_codes::STORAGE_ERROR,
    }
}

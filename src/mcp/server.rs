/// The stdio request loop of the MCP server
///
/// Requests arrive one JSON-RPC message per stdin line; each produces at
/// most one response line on stdout. Tool calls are unpacked here and
/// routed to the tool functions, which do the actual work.

use std::collections::HashMap;
use serde_json::{json, Value};
use tokio::io::{AsyncBufReadExt, AsyncWriteExt, BufReader};
use tracing::{debug, error, info, warn};

use crate::mcp::protocol::*;
use crate::tools;
use crate::{HabitJournalServer, ServerError};

/// Wraps the habit journal in the MCP request/response cycle
pub struct McpServer {
    journal: HabitJournalServer,
    /// Set once the client sends its "initialized" notification
    initialized: bool,
}

impl McpServer {
    pub fn new(journal: HabitJournalServer) -> Self {
        Self {
            journal,
            initialized: false,
        }
    }

    /// Serve requests until stdin closes
    pub async fn run(&mut self) -> Result<(), ServerError> {
        info!("Starting MCP server, waiting for JSON-RPC requests...");

        let stdin = tokio::io::stdin();
        let mut reader = BufReader::new(stdin);
        let mut stdout = tokio::io::stdout();

        let mut line = String::new();

        loop {
            line.clear();

            match reader.read_line(&mut line).await {
                Ok(0) => {
                    info!("MCP server shutting down (stdin closed)");
                    break;
                }
                Ok(_) => {
                    if let Some(response) = self.process_line(&line).await {
                        let response_str = serde_json::to_string(&response)?;

                        // One response per line, flushed so the client never waits
                        stdout.write_all(response_str.as_bytes()).await?;
                        stdout.write_all(b"\n").await?;
                        stdout.flush().await?;

                        debug!("Sent response: {}", response_str);
                    }
                }
                Err(e) => {
                    error!("Failed to read from stdin: {}", e);
                    break;
                }
            }
        }

        Ok(())
    }

    /// Turn one input line into a response, if it warrants one
    ///
    /// Blank lines are skipped. A line that is not valid JSON gets a
    /// PARSE_ERROR response with a null ID, since the request ID never
    /// made it out of the broken payload.
    async fn process_line(&mut self, line: &str) -> Option<JsonRpcResponse> {
        let line = line.trim();
        if line.is_empty() {
            return None;
        }

        debug!("Processing request: {}", line);

        let request: JsonRpcRequest = match serde_json::from_str(line) {
            Ok(req) => req,
            Err(e) => {
                error!("Failed to parse JSON-RPC request: {}", e);
                return Some(JsonRpcResponse::error(
                    json!(null),
                    error_codes::PARSE_ERROR,
                    format!("Invalid JSON: {}", e),
                    None,
                ));
            }
        };

        Some(self.handle_request(request).await)
    }

    /// Route a request to its method handler
    async fn handle_request(&mut self, request: JsonRpcRequest) -> JsonRpcResponse {
        match request.method.as_str() {
            "initialize" => self.handle_initialize(request).await,
            "initialized" => {
                self.initialized = true;
                JsonRpcResponse::success(request.id, json!(null))
            }
            "tools/list" => self.handle_tools_list(request).await,
            "tools/call" => self.handle_tools_call(request).await,
            _ => JsonRpcResponse::error(
                request.id,
                error_codes::METHOD_NOT_FOUND,
                format!("Method '{}' not found", request.method),
                None,
            ),
        }
    }

    /// Answer the "initialize" handshake with our identity and capabilities
    async fn handle_initialize(&mut self, request: JsonRpcRequest) -> JsonRpcResponse {
        info!("MCP client connected");

        let result = InitializeResult {
            protocol_version: MCP_VERSION.to_string(),
            capabilities: ServerCapabilities {
                tools: Some(ToolsCapability {
                    list_changed: false,
                }),
            },
            server_info: ServerInfo {
                name: "Habit Journal MCP".to_string(),
                version: env!("CARGO_PKG_VERSION").to_string(),
            },
        };

        match serde_json::to_value(result) {
            Ok(value) => JsonRpcResponse::success(request.id, value),
            Err(e) => JsonRpcResponse::error(
                request.id,
                error_codes::INTERNAL_ERROR,
                format!("Failed to encode response: {}", e),
                None,
            ),
        }
    }

    /// Advertise the nine habit tools with their argument schemas
    async fn handle_tools_list(&mut self, request: JsonRpcRequest) -> JsonRpcResponse {
        let tools = vec![
            ToolDefinition {
                name: "habit_add".to_string(),
                description: "Add a new daily habit to track".to_string(),
                input_schema: json!({
                    "type": "object",
                    "properties": {
                        "name": {"type": "string", "description": "Name of the habit"}
                    },
                    "required": ["name"]
                }),
            },
            ToolDefinition {
                name: "habit_toggle".to_string(),
                description: "Mark a habit done for a day, or unmark it if it was already done".to_string(),
                input_schema: json!({
                    "type": "object",
                    "properties": {
                        "habit_id": {"type": "string", "description": "ID of the habit to toggle"},
                        "date": {"type": "string", "description": "Day to toggle (YYYY-MM-DD, optional - defaults to today)"}
                    },
                    "required": ["habit_id"]
                }),
            },
            ToolDefinition {
                name: "habit_today".to_string(),
                description: "Show the day's checklist with what is done and what is left".to_string(),
                input_schema: json!({
                    "type": "object",
                    "properties": {
                        "date": {"type": "string", "description": "Day to show (YYYY-MM-DD, optional - defaults to today)"}
                    },
                    "required": []
                }),
            },
            ToolDefinition {
                name: "habit_list".to_string(),
                description: "List habits with streaks and all-time completion rates".to_string(),
                input_schema: json!({
                    "type": "object",
                    "properties": {
                        "include_archived": {"type": "boolean", "description": "Also show archived habits (default: false)"}
                    },
                    "required": []
                }),
            },
            ToolDefinition {
                name: "habit_month_stats".to_string(),
                description: "Per-habit statistics for one month, clipped to each habit's tracked window".to_string(),
                input_schema: json!({
                    "type": "object",
                    "properties": {
                        "month": {"type": "string", "description": "Month to report (YYYY-MM, optional - defaults to the current month)"}
                    },
                    "required": []
                }),
            },
            ToolDefinition {
                name: "habit_calendar".to_string(),
                description: "Calendar of a month with each day marked full, partial or empty".to_string(),
                input_schema: json!({
                    "type": "object",
                    "properties": {
                        "month": {"type": "string", "description": "Month to show (YYYY-MM, optional - defaults to the current month)"}
                    },
                    "required": []
                }),
            },
            ToolDefinition {
                name: "habit_archive".to_string(),
                description: "Archive a habit, keeping its history but removing it from the daily checklist".to_string(),
                input_schema: json!({
                    "type": "object",
                    "properties": {
                        "habit_id": {"type": "string", "description": "ID of the habit to archive"}
                    },
                    "required": ["habit_id"]
                }),
            },
            ToolDefinition {
                name: "habit_restore".to_string(),
                description: "Bring an archived habit back into daily rotation".to_string(),
                input_schema: json!({
                    "type": "object",
                    "properties": {
                        "habit_id": {"type": "string", "description": "ID of the habit to restore"}
                    },
                    "required": ["habit_id"]
                }),
            },
            ToolDefinition {
                name: "habit_delete".to_string(),
                description: "Delete a habit. Archives by default; hard deletion also removes its history".to_string(),
                input_schema: json!({
                    "type": "object",
                    "properties": {
                        "habit_id": {"type": "string", "description": "ID of the habit to delete"},
                        "hard": {"type": "boolean", "description": "Permanently delete the habit and its completions (default: false)"}
                    },
                    "required": ["habit_id"]
                }),
            },
        ];

        JsonRpcResponse::success(request.id, json!({"tools": tools}))
    }

    /// Unpack a "tools/call" request and dispatch to the named tool
    ///
    /// Tool failures come back as a ToolCallResult with is_error set, not
    /// as JSON-RPC errors; the call itself succeeded in protocol terms.
    async fn handle_tools_call(&mut self, request: JsonRpcRequest) -> JsonRpcResponse {
        if !self.initialized {
            warn!("Tool call received before 'initialized' notification");
        }

        let tool_params: ToolCallParams = match request.params {
            Some(params) => match serde_json::from_value(params) {
                Ok(p) => p,
                Err(e) => {
                    return JsonRpcResponse::error(
                        request.id,
                        error_codes::INVALID_PARAMS,
                        format!("Invalid parameters: {}", e),
                        None,
                    );
                }
            },
            None => {
                return JsonRpcResponse::error(
                    request.id,
                    error_codes::INVALID_PARAMS,
                    "Missing parameters".to_string(),
                    None,
                );
            }
        };

        let result = match tool_params.name.as_str() {
            "habit_add" => self.call_habit_add(tool_params.arguments).await,
            "habit_toggle" => self.call_habit_toggle(tool_params.arguments).await,
            "habit_today" => self.call_habit_today(tool_params.arguments).await,
            "habit_list" => self.call_habit_list(tool_params.arguments).await,
            "habit_month_stats" => self.call_habit_month_stats(tool_params.arguments).await,
            "habit_calendar" => self.call_habit_calendar(tool_params.arguments).await,
            "habit_archive" => self.call_habit_archive(tool_params.arguments).await,
            "habit_restore" => self.call_habit_restore(tool_params.arguments).await,
            "habit_delete" => self.call_habit_delete(tool_params.arguments).await,
            _ => ToolCallResult::error(format!("Unknown tool: {}", tool_params.name)),
        };

        match serde_json::to_value(result) {
            Ok(value) => JsonRpcResponse::success(request.id, value),
            Err(e) => JsonRpcResponse::error(
                request.id,
                error_codes::INTERNAL_ERROR,
                format!("Failed to encode response: {}", e),
                None,
            ),
        }
    }

    /// Call the habit_add tool
    async fn call_habit_add(&self, args: HashMap<String, Value>) -> ToolCallResult {
        let add_params = tools::AddHabitParams {
            name: args
                .get("name")
                .and_then(|v| v.as_str())
                .unwrap_or("")
                .to_string(),
        };

        match tools::add_habit(self.journal.store(), add_params) {
            Ok(response) => ToolCallResult::success(format!(
                "{}\nHabit ID: {}",
                response.message, response.habit_id
            )),
            Err(e) => ToolCallResult::error(e.to_string()),
        }
    }

    /// Call the habit_toggle tool
    async fn call_habit_toggle(&self, args: HashMap<String, Value>) -> ToolCallResult {
        let toggle_params = tools::ToggleParams {
            habit_id: args
                .get("habit_id")
                .and_then(|v| v.as_str())
                .unwrap_or("")
                .to_string(),
            date: args
                .get("date")
                .and_then(|v| v.as_str())
                .map(|s| s.to_string()),
        };

        match tools::toggle_habit(self.journal.store(), toggle_params) {
            Ok(response) => ToolCallResult::success(response.message),
            Err(e) => ToolCallResult::error(e.to_string()),
        }
    }

    /// Call the habit_today tool
    async fn call_habit_today(&self, args: HashMap<String, Value>) -> ToolCallResult {
        let today_params = tools::TodayParams {
            date: args
                .get("date")
                .and_then(|v| v.as_str())
                .map(|s| s.to_string()),
        };

        match tools::today_view(self.journal.store(), today_params) {
            Ok(response) => ToolCallResult::success(response.message),
            Err(e) => ToolCallResult::error(e.to_string()),
        }
    }

    /// Call the habit_list tool
    async fn call_habit_list(&self, args: HashMap<String, Value>) -> ToolCallResult {
        let list_params = tools::ListHabitsParams {
            include_archived: args.get("include_archived").and_then(|v| v.as_bool()),
        };

        match tools::list_habits(self.journal.store(), list_params) {
            Ok(response) => ToolCallResult::success(response.message),
            Err(e) => ToolCallResult::error(e.to_string()),
        }
    }

    /// Call the habit_month_stats tool
    async fn call_habit_month_stats(&self, args: HashMap<String, Value>) -> ToolCallResult {
        let stats_params = tools::MonthStatsParams {
            month: args
                .get("month")
                .and_then(|v| v.as_str())
                .map(|s| s.to_string()),
        };

        match tools::month_stats(self.journal.store(), stats_params) {
            Ok(response) => ToolCallResult::success(response.message),
            Err(e) => ToolCallResult::error(e.to_string()),
        }
    }

    /// Call the habit_calendar tool
    async fn call_habit_calendar(&self, args: HashMap<String, Value>) -> ToolCallResult {
        let calendar_params = tools::CalendarParams {
            month: args
                .get("month")
                .and_then(|v| v.as_str())
                .map(|s| s.to_string()),
        };

        match tools::month_calendar(self.journal.store(), calendar_params) {
            Ok(response) => ToolCallResult::success(response.message),
            Err(e) => ToolCallResult::error(e.to_string()),
        }
    }

    /// Call the habit_archive tool
    async fn call_habit_archive(&self, args: HashMap<String, Value>) -> ToolCallResult {
        let archive_params = tools::ArchiveHabitParams {
            habit_id: args
                .get("habit_id")
                .and_then(|v| v.as_str())
                .unwrap_or("")
                .to_string(),
        };

        match tools::archive_habit(self.journal.store(), archive_params) {
            Ok(response) => ToolCallResult::success(response.message),
            Err(e) => ToolCallResult::error(e.to_string()),
        }
    }

    /// Call the habit_restore tool
    async fn call_habit_restore(&self, args: HashMap<String, Value>) -> ToolCallResult {
        let restore_params = tools::RestoreHabitParams {
            habit_id: args
                .get("habit_id")
                .and_then(|v| v.as_str())
                .unwrap_or("")
                .to_string(),
        };

        match tools::restore_habit(self.journal.store(), restore_params) {
            Ok(response) => ToolCallResult::success(response.message),
            Err(e) => ToolCallResult::error(e.to_string()),
        }
    }

    /// Call the habit_delete tool
    async fn call_habit_delete(&self, args: HashMap<String, Value>) -> ToolCallResult {
        let delete_params = tools::DeleteHabitParams {
            habit_id: args
                .get("habit_id")
                .and_then(|v| v.as_str())
                .unwrap_or("")
                .to_string(),
            hard: args.get("hard").and_then(|v| v.as_bool()),
        };

        match tools::delete_habit(self.journal.store(), delete_params) {
            Ok(response) => ToolCallResult::success(response.message),
            Err(e) => ToolCallResult::error(e.to_string()),
        }
    }
}

//! MCP Tool Registry and Implementations
//!
//! Each tool validates its JSON arguments, calls the engine through the
//! service layer and returns the rendered text.

pub mod explore;
pub mod journey;
pub mod structure;

use crate::context::EngineContext;
use crate::Result;
use serde_json::{json, Value};

/// Registry of available MCP tools
pub struct ToolRegistry {
    tools: Vec<ToolDefinition>,
}

/// Tool definition for MCP protocol
#[derive(Clone)]
pub struct ToolDefinition {
    pub name: String,
    pub description: String,
    pub input_schema: Value,
}

impl ToolRegistry {
    /// Create a new tool registry with all available tools
    pub fn new() -> Self {
        Self {
            tools: vec![
                journey::core_run_definition(),
                journey::expanded_run_definition(),
                journey::next_phase_definition(),
                journey::current_state_definition(),
                journey::instructions_definition(),
                journey::status_definition(),
                journey::reset_definition(),
                journey::complete_definition(),
                journey::abandon_definition(),
                journey::contextual_prompt_definition(),
                journey::phase_file_path_definition(),
                explore::definition(),
                explore::master_prompt_definition(),
                structure::definition(),
            ],
        }
    }

    /// List all available tools in MCP format
    pub fn list_tools(&self) -> Vec<Value> {
        self.tools
            .iter()
            .map(|t| {
                json!({
                    "name": t.name,
                    "description": t.description,
                    "inputSchema": t.input_schema
                })
            })
            .collect()
    }

    pub fn has_tool(&self, name: &str) -> bool {
        self.tools.iter().any(|t| t.name == name)
    }

    /// Call a tool by name with the given arguments
    pub fn call_tool(&self, name: &str, arguments: &Value, ctx: &mut EngineContext) -> Result<String> {
        match name {
            "core_run" => journey::execute_core_run(arguments, ctx),
            "expanded_run" => journey::execute_expanded_run(arguments, ctx),
            "get_next_phase" => journey::execute_next_phase(arguments, ctx),
            "get_current_state" => journey::execute_current_state(arguments, ctx),
            "get_instructions" => journey::execute_instructions(arguments, ctx),
            "get_status" => journey::execute_status(arguments, ctx),
            "reset_journey" => journey::execute_reset(arguments, ctx),
            "complete_3pass_journey" => journey::execute_complete(arguments, ctx),
            "abandon_3pass_journey" => journey::execute_abandon(arguments, ctx),
            "get_contextual_prompt" => journey::execute_contextual_prompt(arguments),
            "get_phase_file_path" => journey::execute_phase_file_path(arguments, ctx),
            "explore_methodology_interface" => explore::execute(arguments, ctx),
            "get_master_prompt" => explore::execute_master_prompt(ctx),
            "inject_directory_structure" => structure::execute(arguments),
            _ => anyhow::bail!("Unknown tool: {}", name),
        }
    }
}

impl Default for ToolRegistry {
    fn default() -> Self {
        Self::new()
    }
}

/// Helper to extract a required string field from JSON
pub fn get_required_string(args: &Value, field: &str) -> Result<String> {
    args.get(field)
        .and_then(|v| v.as_str())
        .map(|s| s.to_string())
        .ok_or_else(|| anyhow::anyhow!("Missing required field: {}", field))
}

/// Helper to extract an optional string field from JSON
pub fn get_optional_string(args: &Value, field: &str) -> Option<String> {
    args.get(field).and_then(|v| v.as_str()).map(|s| s.to_string())
}

/// Helper to extract an optional non-negative integer; `null` counts as absent
pub fn get_optional_usize(args: &Value, field: &str) -> Result<Option<usize>> {
    match args.get(field) {
        None | Some(Value::Null) => Ok(None),
        Some(v) => v
            .as_u64()
            .and_then(|n| usize::try_from(n).ok())
            .map(Some)
            .ok_or_else(|| anyhow::anyhow!("Field '{}' must be a non-negative integer", field)),
    }
}

/// Helper to extract a required non-negative integer that fits in `u32`
pub fn get_required_u32(args: &Value, field: &str) -> Result<u32> {
    args.get(field)
        .and_then(|v| v.as_u64())
        .and_then(|n| u32::try_from(n).ok())
        .ok_or_else(|| anyhow::anyhow!("Missing or invalid integer field: {}", field))
}

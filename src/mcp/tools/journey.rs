//! Journey MCP Tools
//!
//! Start, advance, inspect and finish 3-pass journeys. Every journey tool is
//! keyed by `starlog_path`, the project path that identifies the journey.

use super::{get_optional_string, get_required_string, get_required_u32, ToolDefinition};
use crate::context::EngineContext;
use crate::prompts;
use crate::services::journey_service;
use crate::Result;
use serde_json::{json, Value};

const KEY_FIELD: &str = "starlog_path";

fn key_only_schema() -> Value {
    json!({
        "type": "object",
        "required": [KEY_FIELD],
        "properties": {
            KEY_FIELD: {
                "type": "string",
                "description": "Project path used as the unique journey identifier"
            }
        }
    })
}

fn domain_and_key_schema() -> Value {
    json!({
        "type": "object",
        "required": ["domain", KEY_FIELD],
        "properties": {
            "domain": {
                "type": "string",
                "description": "The domain you're applying 3-pass thinking to (e.g., 'Autobiography System')"
            },
            KEY_FIELD: {
                "type": "string",
                "description": "Project path used as the unique journey identifier"
            }
        }
    })
}

fn key_tool(name: &str, description: &str) -> ToolDefinition {
    ToolDefinition {
        name: name.to_string(),
        description: description.to_string(),
        input_schema: key_only_schema(),
    }
}

pub fn core_run_definition() -> ToolDefinition {
    ToolDefinition {
        name: "core_run".to_string(),
        description: "Set up a 3-pass session with minimal guidance. Replaces any existing journey at the same path.".to_string(),
        input_schema: domain_and_key_schema(),
    }
}

pub fn expanded_run_definition() -> ToolDefinition {
    ToolDefinition {
        name: "expanded_run".to_string(),
        description: "Start a 3-pass session with the full instructions for the first phase. Replaces any existing journey at the same path.".to_string(),
        input_schema: domain_and_key_schema(),
    }
}

pub fn next_phase_definition() -> ToolDefinition {
    key_tool(
        "get_next_phase",
        "Advance to the next phase and get the prompt, workflow definition and output file for the new pass + phase",
    )
}

pub fn current_state_definition() -> ToolDefinition {
    key_tool("get_current_state", "Current position in DSL notation, e.g. L0P2W[0](3)")
}

pub fn instructions_definition() -> ToolDefinition {
    key_tool("get_instructions", "Detailed instructions for the current pass and phase")
}

pub fn status_definition() -> ToolDefinition {
    key_tool("get_status", "Overall progress, what's next, and recommended outputs")
}

pub fn reset_definition() -> ToolDefinition {
    key_tool("reset_journey", "Reset the journey back to L0P1W[0](0), keeping its domain")
}

pub fn complete_definition() -> ToolDefinition {
    key_tool("complete_3pass_journey", "Mark the journey completed and remove its state")
}

pub fn abandon_definition() -> ToolDefinition {
    key_tool("abandon_3pass_journey", "Abandon the journey and remove its state")
}

pub fn contextual_prompt_definition() -> ToolDefinition {
    ToolDefinition {
        name: "get_contextual_prompt".to_string(),
        description: "Prompt for any pass (1-3), phase (0-6) and domain, without touching journey state".to_string(),
        input_schema: json!({
            "type": "object",
            "required": ["pass_num", "phase", "domain"],
            "properties": {
                "pass_num": { "type": "integer", "minimum": 1, "maximum": 3 },
                "phase": { "type": "integer", "minimum": 0, "maximum": 6 },
                "domain": { "type": "string" }
            }
        }),
    }
}

pub fn phase_file_path_definition() -> ToolDefinition {
    ToolDefinition {
        name: "get_phase_file_path".to_string(),
        description: "File path where the current phase's output should be written".to_string(),
        input_schema: json!({
            "type": "object",
            "required": [KEY_FIELD],
            "properties": {
                KEY_FIELD: {
                    "type": "string",
                    "description": "Project path used as the unique journey identifier"
                },
                "run_type": {
                    "type": "string",
                    "enum": ["global", "local"],
                    "description": "'global' (default) or 'local' for a component run"
                },
                "component_name": {
                    "type": "string",
                    "description": "Component name, required when run_type is 'local'"
                }
            }
        }),
    }
}

pub fn execute_core_run(args: &Value, ctx: &mut EngineContext) -> Result<String> {
    let domain = get_required_string(args, "domain")?;
    let key = get_required_string(args, KEY_FIELD)?;
    Ok(journey_service::core_run(ctx.tracker(), &domain, &key)?)
}

pub fn execute_expanded_run(args: &Value, ctx: &mut EngineContext) -> Result<String> {
    let domain = get_required_string(args, "domain")?;
    let key = get_required_string(args, KEY_FIELD)?;
    Ok(journey_service::expanded_run(ctx.tracker(), &domain, &key)?)
}

pub fn execute_next_phase(args: &Value, ctx: &mut EngineContext) -> Result<String> {
    let key = get_required_string(args, KEY_FIELD)?;
    Ok(journey_service::next_phase(ctx.tracker(), &key)?)
}

pub fn execute_current_state(args: &Value, ctx: &mut EngineContext) -> Result<String> {
    let key = get_required_string(args, KEY_FIELD)?;
    Ok(journey_service::current_state(ctx.tracker(), &key)?)
}

pub fn execute_instructions(args: &Value, ctx: &mut EngineContext) -> Result<String> {
    let key = get_required_string(args, KEY_FIELD)?;
    Ok(journey_service::instructions(ctx.tracker(), &key)?)
}

pub fn execute_status(args: &Value, ctx: &mut EngineContext) -> Result<String> {
    let key = get_required_string(args, KEY_FIELD)?;
    Ok(journey_service::status(ctx.tracker(), &key)?)
}

pub fn execute_reset(args: &Value, ctx: &mut EngineContext) -> Result<String> {
    let key = get_required_string(args, KEY_FIELD)?;
    Ok(journey_service::reset(ctx.tracker(), &key)?)
}

pub fn execute_complete(args: &Value, ctx: &mut EngineContext) -> Result<String> {
    let key = get_required_string(args, KEY_FIELD)?;
    Ok(journey_service::complete(ctx.tracker(), &key)?)
}

pub fn execute_abandon(args: &Value, ctx: &mut EngineContext) -> Result<String> {
    let key = get_required_string(args, KEY_FIELD)?;
    Ok(journey_service::abandon(ctx.tracker(), &key)?)
}

pub fn execute_contextual_prompt(args: &Value) -> Result<String> {
    let pass_num = get_required_u32(args, "pass_num")?;
    let phase = get_required_u32(args, "phase")?;
    let domain = get_required_string(args, "domain")?;
    Ok(prompts::lookup(pass_num, phase, &domain))
}

pub fn execute_phase_file_path(args: &Value, ctx: &mut EngineContext) -> Result<String> {
    let key = get_required_string(args, KEY_FIELD)?;
    let run_type = get_optional_string(args, "run_type").unwrap_or_else(|| "global".to_string());

    let component = match run_type.as_str() {
        "global" => None,
        "local" => Some(
            get_optional_string(args, "component_name")
                .ok_or(crate::error::EngineError::MissingComponentName)?,
        ),
        other => anyhow::bail!("Unknown run_type '{}': use 'global' or 'local'", other),
    };

    Ok(journey_service::phase_file(
        ctx.tracker(),
        &key,
        component.as_deref(),
    )?)
}

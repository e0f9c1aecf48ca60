//! Directory structure injection MCP Tool

use super::{get_optional_string, get_required_string, ToolDefinition};
use crate::services::structure_service::{inject_structure, render_injection, RunType};
use crate::Result;
use serde_json::{json, Value};
use std::path::PathBuf;

pub fn definition() -> ToolDefinition {
    ToolDefinition {
        name: "inject_directory_structure".to_string(),
        description: "Create the 3_pass_thinking/ layer and pass directories inside a project".to_string(),
        input_schema: json!({
            "type": "object",
            "required": ["target_dir"],
            "properties": {
                "target_dir": {
                    "type": "string",
                    "description": "Project directory that receives 3_pass_thinking/"
                },
                "run_type": {
                    "type": "string",
                    "description": "'global' (default), 'local', or a component name"
                }
            }
        }),
    }
}

pub fn execute(args: &Value) -> Result<String> {
    let target_dir = PathBuf::from(get_required_string(args, "target_dir")?);
    let run_type = get_optional_string(args, "run_type").unwrap_or_else(|| "global".to_string());
    let run_type = RunType::parse(&run_type)?;

    let report = inject_structure(&target_dir, run_type)?;
    Ok(render_injection(&report))
}

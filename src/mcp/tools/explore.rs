//! Methodology explorer MCP Tools

use super::{get_optional_usize, ToolDefinition};
use crate::context::EngineContext;
use crate::services::explore_service;
use crate::Result;
use serde_json::{json, Value};

pub fn definition() -> ToolDefinition {
    ToolDefinition {
        name: "explore_methodology_interface".to_string(),
        description: "Navigate the 3-pass methodology tree with numbered selections. \
            No arguments shows the current directory, a number selects an entry, 0 goes up."
            .to_string(),
        input_schema: json!({
            "type": "object",
            "properties": {
                "selection": {
                    "type": "integer",
                    "minimum": 0,
                    "description": "Entry number to open; 0 goes up one directory"
                },
                "page": {
                    "type": "integer",
                    "minimum": 1,
                    "description": "Page of the current directory to show (10 entries per page)"
                }
            }
        }),
    }
}

pub fn master_prompt_definition() -> ToolDefinition {
    ToolDefinition {
        name: "get_master_prompt".to_string(),
        description: "Full text of the methodology's master prompt".to_string(),
        input_schema: json!({
            "type": "object",
            "properties": {}
        }),
    }
}

pub fn execute(args: &Value, ctx: &mut EngineContext) -> Result<String> {
    let selection = get_optional_usize(args, "selection")?;
    let page = get_optional_usize(args, "page")?;
    Ok(explore_service::explore(ctx.browser_mut(), selection, page)?)
}

pub fn execute_master_prompt(ctx: &mut EngineContext) -> Result<String> {
    let content = ctx.read_master_prompt()?;
    let path = ctx.master_prompt_path();
    let mut result = format!("📜 **Master Prompt** ({})\n\n", path.display());
    result.push_str(&content);
    Ok(result)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::EngineConfig;
    use crate::error::EngineError;
    use tempfile::TempDir;

    fn setup_context() -> (TempDir, EngineContext) {
        let temp = TempDir::new().unwrap();
        let root = temp.path().join("methodology");
        std::fs::create_dir_all(root.join("system_design_instructions")).unwrap();
        std::fs::write(
            root.join("system_design_instructions/MASTER_PROMPT.md"),
            "Think in three passes.",
        )
        .unwrap();
        std::fs::write(root.join("README.md"), "readme").unwrap();

        let config = EngineConfig {
            state_dir: temp.path().join("states"),
            methodology_root: root,
            ..EngineConfig::default()
        };
        let ctx = EngineContext::new(config).unwrap();
        (temp, ctx)
    }

    #[test]
    fn test_explore_keeps_position_between_calls() {
        let (_temp, mut ctx) = setup_context();

        let text = execute(&json!({}), &mut ctx).unwrap();
        assert!(text.contains("1. 📄 README.md"));
        assert!(text.contains("2. 📁 system_design_instructions"));

        execute(&json!({"selection": 2}), &mut ctx).unwrap();
        let text = execute(&json!({}), &mut ctx).unwrap();
        assert!(text.contains("**Current Path**: system_design_instructions"));

        let text = execute(&json!({"selection": 0}), &mut ctx).unwrap();
        assert!(text.contains("**Current Path**: /"));
    }

    #[test]
    fn test_explore_selection_out_of_range() {
        let (_temp, mut ctx) = setup_context();
        let err = execute(&json!({"selection": 9}), &mut ctx).unwrap_err();
        assert!(matches!(
            err.downcast_ref::<EngineError>(),
            Some(EngineError::SelectionOutOfRange { .. })
        ));
    }

    #[test]
    fn test_explore_rejects_negative_page() {
        let (_temp, mut ctx) = setup_context();
        assert!(execute(&json!({"page": -1}), &mut ctx).is_err());
    }

    #[test]
    fn test_master_prompt() {
        let (_temp, mut ctx) = setup_context();
        let text = execute_master_prompt(&mut ctx).unwrap();
        assert!(text.starts_with("📜 **Master Prompt**"));
        assert!(text.ends_with("Think in three passes."));
    }
}

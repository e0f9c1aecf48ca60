//! Structure service - injects the `3_pass_thinking/` directory skeleton

use crate::error::{EngineError, EngineResult};
use crate::state::tracker::THINKING_DIR;
use regex::Regex;
use std::path::{Path, PathBuf};
use std::sync::OnceLock;
use walkdir::WalkDir;

/// Layers pre-created by an injection
const INJECTED_LAYERS: u32 = 3;

const MAX_COMPONENT_NAME_LEN: usize = 64;

/// Which skeleton to create
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RunType {
    /// `global_system/layer_N/pass_M`
    Global,
    /// Empty `component_specific/` directory
    Local,
    /// `component_specific/<name>/layer_N/pass_M`
    Component(String),
}

impl RunType {
    /// Parse `global`, `local`, or a component name
    pub fn parse(raw: &str) -> EngineResult<Self> {
        match raw {
            "global" => Ok(RunType::Global),
            "local" => Ok(RunType::Local),
            name => {
                validate_component_name(name)?;
                Ok(RunType::Component(name.to_string()))
            }
        }
    }

    pub fn label(&self) -> &str {
        match self {
            RunType::Global => "global",
            RunType::Local => "local",
            RunType::Component(name) => name,
        }
    }
}

fn component_name_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| {
        Regex::new(r"^[A-Za-z0-9][A-Za-z0-9_-]*$").expect("component name pattern is valid")
    })
}

/// Component names become a single directory segment
pub fn validate_component_name(name: &str) -> EngineResult<()> {
    let invalid = |reason: &str| EngineError::InvalidComponentName {
        name: name.to_string(),
        reason: reason.to_string(),
    };

    if name.is_empty() {
        return Err(invalid("name is empty"));
    }
    if name.len() > MAX_COMPONENT_NAME_LEN {
        return Err(invalid("name is longer than 64 characters"));
    }
    if name == "global" || name == "local" {
        return Err(invalid("name is reserved"));
    }
    if !component_name_pattern().is_match(name) {
        return Err(invalid(
            "use letters, digits, '-' or '_', starting with a letter or digit",
        ));
    }
    Ok(())
}

/// Result of an injection
#[derive(Debug, Clone)]
pub struct InjectionReport {
    pub target_dir: PathBuf,
    pub run_type: RunType,
    /// Root of the created skeleton
    pub root: PathBuf,
    /// Directories under `root`, relative and sorted
    pub directories: Vec<String>,
}

impl InjectionReport {
    pub fn summary(&self) -> String {
        match &self.run_type {
            RunType::Global => {
                "global_system with layer_0/1/2 each containing pass_1/2/3".to_string()
            }
            RunType::Local => "component_specific directory ready for components".to_string(),
            RunType::Component(name) => {
                format!("component '{}' with layer_0/1/2 each containing pass_1/2/3", name)
            }
        }
    }
}

/// Create the layer/pass skeleton under `target_dir`; existing directories are kept
pub fn inject_structure(target_dir: &Path, run_type: RunType) -> EngineResult<InjectionReport> {
    let thinking_dir = target_dir.join(THINKING_DIR);

    let root = match &run_type {
        RunType::Global => {
            let system_dir = thinking_dir.join("global_system");
            create_layers(&system_dir)?;
            system_dir
        }
        RunType::Local => {
            let comp_dir = thinking_dir.join("component_specific");
            std::fs::create_dir_all(&comp_dir)?;
            comp_dir
        }
        RunType::Component(name) => {
            let comp_dir = thinking_dir.join("component_specific").join(name);
            create_layers(&comp_dir)?;
            comp_dir
        }
    };

    let directories = collect_directories(&root);

    tracing::info!(
        target_dir = %target_dir.display(),
        run_type = run_type.label(),
        count = directories.len(),
        "injected 3-pass structure"
    );

    Ok(InjectionReport {
        target_dir: target_dir.to_path_buf(),
        run_type,
        root,
        directories,
    })
}

fn create_layers(base: &Path) -> EngineResult<()> {
    for layer in 0..INJECTED_LAYERS {
        let layer_dir = base.join(format!("layer_{}", layer));
        for pass_num in 1..=3 {
            std::fs::create_dir_all(layer_dir.join(format!("pass_{}", pass_num)))?;
        }
    }
    Ok(())
}

fn collect_directories(root: &Path) -> Vec<String> {
    let mut dirs: Vec<String> = WalkDir::new(root)
        .min_depth(1)
        .into_iter()
        .filter_map(|e| e.ok())
        .filter(|e| e.file_type().is_dir())
        .filter_map(|e| {
            e.path()
                .strip_prefix(root)
                .ok()
                .map(|p| p.to_string_lossy().replace('\\', "/"))
        })
        .collect();
    dirs.sort();
    dirs
}

/// Render an injection report for the CLI and MCP surfaces
pub fn render_injection(report: &InjectionReport) -> String {
    let mut result = String::from("✅ **3-Pass Directory Structure Injected**\n\n");
    result.push_str(&format!("**Target**: {}\n", report.target_dir.display()));
    result.push_str(&format!("**Type**: {}\n", report.run_type.label()));
    result.push_str(&format!("**Structure Created**: {}\n", report.summary()));
    result.push_str(&format!("**Root**: {}\n\n", report.root.display()));

    if report.directories.is_empty() {
        result.push_str("No subdirectories yet.\n");
    } else {
        result.push_str("**Directories**:\n```\n");
        for dir in &report.directories {
            result.push_str(dir);
            result.push_str("/\n");
        }
        result.push_str("```\n");
    }

    result.push_str("\nReady for systematic thinking work!");
    result
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_parse_run_type() {
        assert_eq!(RunType::parse("global").unwrap(), RunType::Global);
        assert_eq!(RunType::parse("local").unwrap(), RunType::Local);
        assert_eq!(
            RunType::parse("auth-service").unwrap(),
            RunType::Component("auth-service".to_string())
        );
    }

    #[test]
    fn test_invalid_component_names() {
        for name in ["", "../escape", "a/b", ".hidden", "has space", "-leading", r"win\path"] {
            let err = RunType::parse(name).unwrap_err();
            assert!(
                matches!(err, EngineError::InvalidComponentName { .. }),
                "accepted {:?}",
                name
            );
        }

        let long = "a".repeat(65);
        assert!(validate_component_name(&long).is_err());
        assert!(validate_component_name("global").is_err());
        assert!(validate_component_name("parser_v2").is_ok());
    }

    #[test]
    fn test_inject_global() {
        let temp = TempDir::new().unwrap();
        let report = inject_structure(temp.path(), RunType::Global).unwrap();

        let base = temp.path().join("3_pass_thinking/global_system");
        for layer in 0..3 {
            for pass_num in 1..=3 {
                assert!(base.join(format!("layer_{}/pass_{}", layer, pass_num)).is_dir());
            }
        }
        assert_eq!(report.directories.len(), 12);
        assert_eq!(report.directories[0], "layer_0");
        assert!(report.directories.contains(&"layer_2/pass_3".to_string()));
    }

    #[test]
    fn test_inject_local_and_component() {
        let temp = TempDir::new().unwrap();

        let local = inject_structure(temp.path(), RunType::Local).unwrap();
        assert!(temp.path().join("3_pass_thinking/component_specific").is_dir());
        assert!(local.directories.is_empty());

        let comp = inject_structure(temp.path(), RunType::Component("parser".into())).unwrap();
        assert!(temp
            .path()
            .join("3_pass_thinking/component_specific/parser/layer_1/pass_2")
            .is_dir());
        assert_eq!(comp.directories.len(), 12);
    }

    #[test]
    fn test_inject_is_idempotent() {
        let temp = TempDir::new().unwrap();
        inject_structure(temp.path(), RunType::Global).unwrap();
        let marker = temp.path().join("3_pass_thinking/global_system/layer_0/pass_1/0_AbstractGoal.md");
        std::fs::write(&marker, "keep me").unwrap();

        inject_structure(temp.path(), RunType::Global).unwrap();
        assert_eq!(std::fs::read_to_string(&marker).unwrap(), "keep me");
    }

    #[test]
    fn test_render_injection() {
        let temp = TempDir::new().unwrap();
        let report = inject_structure(temp.path(), RunType::Component("ui".into())).unwrap();
        let text = render_injection(&report);

        assert!(text.contains("**Type**: ui"));
        assert!(text.contains("component 'ui' with layer_0/1/2"));
        assert!(text.contains("layer_0/pass_1/"));
    }
}

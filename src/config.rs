//! Engine configuration (`~/.emergence/config.toml`)

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

const CONFIG_DIR: &str = ".emergence";
const CONFIG_FILE: &str = "config.toml";

/// Where journeys live, which tree the browser serves, and the default log filter
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EngineConfig {
    /// Directory holding one `<key>.json` per journey
    #[serde(default = "default_state_dir")]
    pub state_dir: PathBuf,

    /// Root of the methodology document tree
    #[serde(default = "default_methodology_root")]
    pub methodology_root: PathBuf,

    /// `tracing` filter used when `RUST_LOG` is unset
    #[serde(default = "default_log_filter")]
    pub log_filter: String,
}

fn default_state_dir() -> PathBuf {
    std::env::temp_dir().join("three_pass_states")
}

fn default_methodology_root() -> PathBuf {
    std::env::temp_dir().join("3_pass_autonomous_research_system_v01")
}

fn default_log_filter() -> String {
    "warn".to_string()
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            state_dir: default_state_dir(),
            methodology_root: default_methodology_root(),
            log_filter: default_log_filter(),
        }
    }
}

impl EngineConfig {
    /// Default config file location (`~/.emergence/config.toml`)
    pub fn default_path() -> Option<PathBuf> {
        dirs::home_dir().map(|home| home.join(CONFIG_DIR).join(CONFIG_FILE))
    }

    /// Load from an explicit path (must exist), else the default path if present, else defaults
    pub fn load(explicit: Option<&Path>) -> Result<Self> {
        if let Some(path) = explicit {
            return Self::load_from(path);
        }

        match Self::default_path() {
            Some(path) if path.exists() => Self::load_from(&path),
            _ => Ok(Self::default()),
        }
    }

    pub fn load_from(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config {}", path.display()))?;
        let config: EngineConfig = toml::from_str(&content)
            .with_context(|| format!("Failed to parse config {}", path.display()))?;
        Ok(config)
    }

    pub fn save(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let content = toml::to_string_pretty(self).context("Failed to serialize config")?;
        std::fs::write(path, content)
            .with_context(|| format!("Failed to write config {}", path.display()))?;
        Ok(())
    }

    /// Apply per-field overrides from CLI flags or environment
    pub fn with_overrides(
        mut self,
        state_dir: Option<PathBuf>,
        methodology_root: Option<PathBuf>,
    ) -> Self {
        if let Some(dir) = state_dir {
            self.state_dir = dir;
        }
        if let Some(root) = methodology_root {
            self.methodology_root = root;
        }
        self
    }
}

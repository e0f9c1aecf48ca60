//! EngineContext - the one object every surface is handed
//!
//! Built once per process from an [`EngineConfig`] and passed explicitly to
//! CLI commands and the MCP server. Tests build their own over temp dirs.

use crate::browser::DirectoryBrowser;
use crate::config::EngineConfig;
use crate::error::{EngineError, EngineResult};
use crate::state::{JourneyTracker, StateStore};
use std::path::PathBuf;

/// Location of the master prompt inside the methodology tree
pub const MASTER_PROMPT_PATH: &str = "system_design_instructions/MASTER_PROMPT.md";

pub struct EngineContext {
    config: EngineConfig,
    tracker: JourneyTracker,
    browser: DirectoryBrowser,
}

impl EngineContext {
    /// Open the state store and point the browser at the methodology root
    pub fn new(config: EngineConfig) -> EngineResult<Self> {
        let store = StateStore::open(&config.state_dir)?;
        let browser = DirectoryBrowser::new(&config.methodology_root);
        Ok(Self {
            tracker: JourneyTracker::new(store),
            browser,
            config,
        })
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    pub fn tracker(&self) -> &JourneyTracker {
        &self.tracker
    }

    pub fn browser(&self) -> &DirectoryBrowser {
        &self.browser
    }

    pub fn browser_mut(&mut self) -> &mut DirectoryBrowser {
        &mut self.browser
    }

    pub fn master_prompt_path(&self) -> PathBuf {
        self.config.methodology_root.join(MASTER_PROMPT_PATH)
    }

    /// Full text of the methodology's master prompt
    pub fn read_master_prompt(&self) -> EngineResult<String> {
        let path = self.master_prompt_path();
        match std::fs::read_to_string(&path) {
            Ok(content) => Ok(content),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Err(EngineError::NotFound(
                format!("master prompt at {}", path.display()),
            )),
            Err(e) => Err(e.into()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn test_config(temp: &TempDir) -> EngineConfig {
        EngineConfig {
            state_dir: temp.path().join("states"),
            methodology_root: temp.path().join("methodology"),
            ..EngineConfig::default()
        }
    }

    #[test]
    fn test_new_creates_state_dir() {
        let temp = TempDir::new().unwrap();
        let ctx = EngineContext::new(test_config(&temp)).unwrap();
        assert!(ctx.tracker().store().base_dir().is_dir());
        assert_eq!(ctx.browser().root(), temp.path().join("methodology"));
    }

    #[test]
    fn test_master_prompt() {
        let temp = TempDir::new().unwrap();
        let ctx = EngineContext::new(test_config(&temp)).unwrap();

        assert!(matches!(
            ctx.read_master_prompt().unwrap_err(),
            EngineError::NotFound(_)
        ));

        let path = ctx.master_prompt_path();
        std::fs::create_dir_all(path.parent().unwrap()).unwrap();
        std::fs::write(&path, "# Master Prompt").unwrap();
        assert_eq!(ctx.read_master_prompt().unwrap(), "# Master Prompt");
    }
}

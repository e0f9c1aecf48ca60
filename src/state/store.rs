//! StateStore - one JSON file per project key
//!
//! Writers are not coordinated: two processes saving the same key race and
//! the last rename wins.

use crate::error::{EngineError, EngineResult};
use crate::models::JourneyState;
use chrono::Utc;
use std::io::Write;
use std::path::{Path, PathBuf};
use tempfile::NamedTempFile;

/// File-backed persistence for journey states
#[derive(Debug, Clone)]
pub struct StateStore {
    base_dir: PathBuf,
}

impl StateStore {
    /// Open a store rooted at `base_dir`, creating the directory if needed
    pub fn open(base_dir: impl Into<PathBuf>) -> EngineResult<Self> {
        let base_dir = base_dir.into();
        std::fs::create_dir_all(&base_dir)?;
        Ok(Self { base_dir })
    }

    pub fn base_dir(&self) -> &Path {
        &self.base_dir
    }

    /// State file for a key: path separators become `_`, suffixed `.json`
    pub fn state_file(&self, key: &str) -> PathBuf {
        self.base_dir.join(format!("{}.json", sanitize_key(key)))
    }

    /// Whether a state file exists for the key
    pub fn exists(&self, key: &str) -> bool {
        self.state_file(key).exists()
    }

    /// Load the state for a key; `None` when no file exists
    pub fn load(&self, key: &str) -> EngineResult<Option<JourneyState>> {
        let path = self.state_file(key);
        let content = match std::fs::read_to_string(&path) {
            Ok(content) => content,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                tracing::debug!(path = %path.display(), "no state file");
                return Ok(None);
            }
            Err(e) => return Err(e.into()),
        };

        let state: JourneyState =
            serde_json::from_str(&content).map_err(|e| corrupt(&path, e.to_string()))?;

        if !state.position().is_valid() {
            return Err(corrupt(
                &path,
                format!(
                    "position out of range (pass_num={}, phase={})",
                    state.pass_num, state.phase
                ),
            ));
        }

        tracing::debug!(path = %path.display(), position = %state.position(), "loaded state");
        Ok(Some(state))
    }

    /// Stamp `last_updated` and replace the state file in full
    pub fn save(&self, key: &str, state: &mut JourneyState) -> EngineResult<()> {
        state.last_updated = Utc::now();

        let path = self.state_file(key);
        let content = serde_json::to_string_pretty(state)?;

        let mut tmp = NamedTempFile::new_in(&self.base_dir)?;
        tmp.write_all(content.as_bytes())?;
        tmp.flush()?;
        tmp.persist(&path).map_err(|e| EngineError::Io(e.error))?;

        tracing::debug!(path = %path.display(), position = %state.position(), "saved state");
        Ok(())
    }

    /// Remove the state file; absent files are not an error
    pub fn delete(&self, key: &str) -> EngineResult<()> {
        let path = self.state_file(key);
        match std::fs::remove_file(&path) {
            Ok(()) => {
                tracing::debug!(path = %path.display(), "deleted state");
                Ok(())
            }
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(()),
            Err(e) => Err(e.into()),
        }
    }
}

/// Turn a project key into a single filesystem-safe segment
pub fn sanitize_key(key: &str) -> String {
    key.replace(['/', '\\'], "_")
}

fn corrupt(path: &Path, reason: String) -> EngineError {
    tracing::warn!(path = %path.display(), %reason, "corrupt state file");
    EngineError::CorruptState {
        path: path.to_path_buf(),
        reason,
    }
}

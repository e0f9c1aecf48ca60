//! Engine error taxonomy
//!
//! Every variant except `Io` and `Serialize` is recoverable: callers render it
//! as a user-facing message instead of aborting.

use std::path::PathBuf;

/// Result type for engine operations
pub type EngineResult<T> = std::result::Result<T, EngineError>;

/// Errors produced by the tracker, store, browser and structure injector
#[derive(Debug, thiserror::Error)]
pub enum EngineError {
    #[error("No active journey found for '{0}'")]
    NoActiveJourney(String),

    #[error("A journey for '{domain}' is already active at '{key}'")]
    JourneyExists { key: String, domain: String },

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Corrupt state file {}: {reason}", path.display())]
    CorruptState { path: PathBuf, reason: String },

    #[error("Page {page} out of range. Available pages: 1-{total}")]
    PageOutOfRange { page: usize, total: usize },

    #[error("Selection {selection} out of range. Available: 1-{available}")]
    SelectionOutOfRange { selection: usize, available: usize },

    #[error("Invalid component name '{name}': {reason}")]
    InvalidComponentName { name: String, reason: String },

    #[error("Component name required for component-specific runs")]
    MissingComponentName,

    #[error("Invalid path: {0}")]
    InvalidPath(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to serialize state: {0}")]
    Serialize(#[from] serde_json::Error),
}

impl EngineError {
    /// Whether the error should be reported to the caller rather than treated as a fault
    pub fn is_recoverable(&self) -> bool {
        !matches!(self, EngineError::Io(_) | EngineError::Serialize(_))
    }
}

// Emergence Engine - 3-pass systematic thinking tracker
// Tracks (layer, pass, phase) progress per project and serves the prompts for each step

pub mod browser;
pub mod cli;
pub mod config;
pub mod context;
pub mod error;
pub mod logging;
pub mod mcp;
pub mod models;
pub mod prompts;
pub mod services;
pub mod state;

pub use anyhow::{Context, Result};
pub use colored::Colorize;

// Re-export commonly used types
pub use browser::DirectoryBrowser;
pub use config::EngineConfig;
pub use context::EngineContext;
pub use error::{EngineError, EngineResult};
pub use models::{JourneyState, Position};
pub use state::{JourneyTracker, StateStore};

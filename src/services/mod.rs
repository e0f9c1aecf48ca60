//! Service layer
//!
//! Turns structured engine results into the text shared by the CLI commands
//! and the MCP tools, so both surfaces say the same thing.

pub mod explore_service;
pub mod journey_service;
pub mod structure_service;

pub use explore_service::{explore, render_file, render_listing};
pub use journey_service::render_error;
pub use structure_service::{inject_structure, render_injection, InjectionReport, RunType};

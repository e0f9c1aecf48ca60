//! Journey state persistence and tracking
//!
//! - `store`: one JSON file per project key
//! - `tracker`: start / advance / reset / status / complete / abandon

pub mod store;
pub mod tracker;

pub use store::{sanitize_key, StateStore};
pub use tracker::{Advance, JourneyStatus, JourneyTracker, NextStep, PhaseFileTarget};

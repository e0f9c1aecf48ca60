//! Diagnostic logging via `tracing`
//!
//! Output always goes to stderr: stdout carries MCP JSON-RPC traffic when
//! running as a server.

use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// Install the global subscriber. `RUST_LOG` wins over `default_filter`.
///
/// ```bash
/// RUST_LOG=emergence_engine=debug emergence next --project /path/to/project
/// ```
pub fn init(default_filter: &str) {
    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(default_filter))
        .unwrap_or_else(|_| EnvFilter::new("warn"));

    // A second call (e.g. from tests) keeps the first subscriber.
    let _ = tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer().with_writer(std::io::stderr).compact())
        .try_init();
}

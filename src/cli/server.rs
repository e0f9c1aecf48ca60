//! server CLI subcommand
//!
//! Starts the MCP server. The server communicates via JSON-RPC 2.0 over stdio,
//! so nothing but protocol traffic may go to stdout here.

use crate::context::EngineContext;
use crate::mcp::McpServer;
use crate::Result;

/// Run the MCP server until stdin closes
pub async fn run(context: EngineContext) -> Result<()> {
    let mut server = McpServer::new(context);
    server.run().await
}

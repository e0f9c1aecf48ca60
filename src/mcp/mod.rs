//! MCP (Model Context Protocol) server
//!
//! Exposes the journey engine, the methodology explorer and the structure
//! injector as MCP tools over stdio.

pub mod server;
pub mod tools;

pub use server::McpServer;

// MCP (Model Context Protocol) server exposing the Apollo tools to agent clients

pub mod config;
pub mod protocol;
pub mod server;
pub mod tools;

pub use config::McpConfig;
pub use server::McpServer;
pub use tools::{apollo_tools, ToolRegistry};

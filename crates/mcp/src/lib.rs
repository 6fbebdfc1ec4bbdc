// MCP (Model Context Protocol) server for the Dumpling AI API
// Each upstream endpoint is exposed as a tool to agent clients over stdio

pub mod config;
pub mod error;
pub mod protocol;
pub mod server;
pub mod tools;

pub use config::{CredentialSource, McpConfig};
pub use error::ToolError;
pub use server::McpServer;

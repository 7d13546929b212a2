//! MCP server exposing Qiita article tools to language-model agents.

pub mod app;
pub mod constants;
pub mod errors;
pub mod managers;
pub mod mcp;
pub mod services;

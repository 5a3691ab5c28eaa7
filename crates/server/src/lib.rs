//! MCP server exposing Fabric AI patterns.
//!
//! The server registers three tools against the MCP runtime and forwards
//! two of them to a Fabric HTTP backend through a shared
//! [`fabric_api::FabricClient`] injected at startup:
//!
//! - `fabric_list_patterns` — list available pattern names
//! - `fabric_pattern_prompt` — fetch the system prompt of one pattern
//! - `fabric_run_pattern` — placeholder for pattern execution
//!
//! Backend failures never surface to MCP callers: handlers log the typed
//! error and degrade to an empty/default result.

pub mod annotations;
pub mod config;
pub mod server;
pub mod tools;

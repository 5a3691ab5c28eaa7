//! Fabric REST API client.
//!
//! This crate is the outbound half of `fabric-mcp`: a shared, thread-safe
//! client for the Fabric backend's pattern endpoints. The MCP surface lives
//! in the `fabric-mcp` server crate and takes this client as an injected
//! dependency (via the [`client::PatternsApi`] trait).
//!
//! It intentionally contains **no** MCP protocol logic and **no** response
//! defaulting — callers decide how failures degrade.

pub mod client;
pub mod error;
pub mod redact;

pub use client::{FabricClient, PatternDetail, PatternsApi};
pub use error::{FabricApiError, Result};

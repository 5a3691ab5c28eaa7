//! MCP tool annotations for the Fabric tools.
//!
//! The two pattern-fetch tools are GET-backed and safe to retry; the run
//! tool executes a pattern and is neither read-only nor idempotent. All
//! tools talk to an external system, so `openWorldHint` is always set.

use rmcp::model::ToolAnnotations;

/// Annotations for a read-only, idempotent fetch against the backend.
#[must_use]
pub fn fetch() -> ToolAnnotations {
    ToolAnnotations {
        title: None,
        read_only_hint: Some(true),
        destructive_hint: Some(false),
        idempotent_hint: Some(true),
        open_world_hint: Some(true),
    }
}

/// Annotations for pattern execution.
#[must_use]
pub fn execute() -> ToolAnnotations {
    ToolAnnotations {
        title: None,
        read_only_hint: Some(false),
        destructive_hint: Some(false),
        idempotent_hint: Some(false),
        open_world_hint: Some(true),
    }
}

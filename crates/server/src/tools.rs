//! The three Fabric tools and their MCP definitions.
//!
//! Handlers never fail for backend reasons: gateway errors are logged and
//! converted to the operation's default result, so an MCP caller cannot
//! distinguish "backend down" from "legitimately empty". Protocol-level
//! problems (unknown tool, missing argument) are handled in
//! [`crate::server`] instead.

use crate::annotations;
use fabric_api::PatternsApi;
use rmcp::model::{CallToolResult, Content, JsonObject, Tool};
use serde::Serialize;
use serde_json::{Value, json};
use std::sync::Arc;

pub const LIST_PATTERNS: &str = "fabric_list_patterns";
pub const PATTERN_PROMPT: &str = "fabric_pattern_prompt";
pub const RUN_PATTERN: &str = "fabric_run_pattern";

/// Result of `fabric_pattern_prompt`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PatternPrompt {
    pub name: String,
    pub pattern: String,
}

/// Result of `fabric_run_pattern`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RunResult {
    pub name: String,
    pub input: String,
    pub result: String,
}

/// Tool registry: the three Fabric operations bound to a shared backend
/// gateway.
#[derive(Clone)]
pub struct FabricTools {
    api: Arc<dyn PatternsApi>,
}

impl FabricTools {
    #[must_use]
    pub fn new(api: Arc<dyn PatternsApi>) -> Self {
        Self { api }
    }

    /// `fabric_list_patterns`: list available pattern names.
    ///
    /// Any backend failure degrades to an empty list.
    pub async fn list_patterns(&self) -> CallToolResult {
        let patterns = match self.api.list_pattern_names().await {
            Ok(patterns) => patterns,
            Err(e) => {
                tracing::error!(error = %e, "failed to fetch pattern list from Fabric backend");
                Vec::new()
            }
        };

        let text = serde_json::to_string(&patterns).unwrap_or_else(|_| "[]".to_string());
        CallToolResult::success(vec![Content::text(text)])
    }

    /// `fabric_pattern_prompt`: fetch the prompt of one pattern.
    ///
    /// The name falls back to the requested one and the prompt to `""`
    /// whenever the backend omits a field or the call fails.
    pub async fn pattern_prompt(&self, pattern_name: &str) -> CallToolResult {
        let prompt = match self.api.pattern(pattern_name).await {
            Ok(detail) => PatternPrompt {
                name: detail.name.unwrap_or_else(|| pattern_name.to_string()),
                pattern: detail.pattern.unwrap_or_default(),
            },
            Err(e) => {
                tracing::error!(
                    pattern = %pattern_name,
                    error = %e,
                    "failed to fetch pattern prompt from Fabric backend"
                );
                PatternPrompt {
                    name: pattern_name.to_string(),
                    pattern: String::new(),
                }
            }
        };

        structured_result(&prompt)
    }

    /// `fabric_run_pattern`: placeholder until the backend execution
    /// protocol (request shape, streaming vs. buffered output) is designed.
    /// Echoes the inputs with a fixed result string; does not contact the
    /// backend.
    #[must_use]
    pub fn run_pattern(&self, pattern_name: &str, input_str: &str) -> CallToolResult {
        let result = RunResult {
            name: pattern_name.to_string(),
            input: input_str.to_string(),
            result: "Pattern result here".to_string(),
        };

        structured_result(&result)
    }
}

/// The MCP tool definitions exposed by `tools/list`.
#[must_use]
pub fn tool_definitions() -> Vec<Tool> {
    vec![list_patterns_tool(), pattern_prompt_tool(), run_pattern_tool()]
}

fn list_patterns_tool() -> Tool {
    let mut tool = Tool::new(
        LIST_PATTERNS,
        "Return a list of available fabric patterns from the Fabric backend.",
        object_schema(json!({}), &[]),
    );
    tool.annotations = Some(annotations::fetch());
    tool
}

fn pattern_prompt_tool() -> Tool {
    let mut tool = Tool::new(
        PATTERN_PROMPT,
        "Return the prompt of a specific fabric pattern.",
        object_schema(
            json!({
                "pattern_name": {
                    "type": "string",
                    "description": "Name of the fabric pattern."
                }
            }),
            &["pattern_name"],
        ),
    );
    tool.output_schema = Some(object_schema(
        json!({
            "name": { "type": "string" },
            "pattern": { "type": "string" }
        }),
        &["name", "pattern"],
    ));
    tool.annotations = Some(annotations::fetch());
    tool
}

fn run_pattern_tool() -> Tool {
    let mut tool = Tool::new(
        RUN_PATTERN,
        "Run a specific fabric pattern with the given input.",
        object_schema(
            json!({
                "pattern_name": {
                    "type": "string",
                    "description": "Name of the fabric pattern to run."
                },
                "input_str": {
                    "type": "string",
                    "description": "Input text to be processed by the pattern."
                }
            }),
            &["pattern_name", "input_str"],
        ),
    );
    tool.output_schema = Some(object_schema(
        json!({
            "name": { "type": "string" },
            "input": { "type": "string" },
            "result": { "type": "string" }
        }),
        &["name", "input", "result"],
    ));
    tool.annotations = Some(annotations::execute());
    tool
}

fn object_schema(properties: Value, required: &[&str]) -> Arc<JsonObject> {
    let v = json!({
        "type": "object",
        "properties": properties,
        "required": required,
    });
    let schema_obj = v.as_object().cloned().unwrap_or_else(JsonObject::new);
    Arc::new(schema_obj)
}

/// Object-shaped results are returned both as `structured_content` and as
/// JSON text, for clients that only render `content`.
fn structured_result<T: Serialize>(value: &T) -> CallToolResult {
    let structured = serde_json::to_value(value).unwrap_or(Value::Null);
    let text = serde_json::to_string(&structured).unwrap_or_else(|_| structured.to_string());

    CallToolResult {
        content: vec![Content::text(text)],
        structured_content: Some(structured),
        is_error: Some(false),
        meta: None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use fabric_api::{FabricApiError, PatternDetail};

    /// Backend double whose calls always fail.
    struct DeadBackend;

    #[async_trait]
    impl PatternsApi for DeadBackend {
        async fn list_pattern_names(&self) -> fabric_api::Result<Vec<String>> {
            Err(FabricApiError::Transport("connection refused".to_string()))
        }

        async fn pattern(&self, _name: &str) -> fabric_api::Result<PatternDetail> {
            Err(FabricApiError::Transport("connection refused".to_string()))
        }
    }

    fn result_json(result: &CallToolResult) -> Value {
        serde_json::to_value(result).expect("serialize CallToolResult")
    }

    #[tokio::test]
    async fn list_patterns_degrades_to_empty_on_backend_failure() {
        let tools = FabricTools::new(Arc::new(DeadBackend));
        let result = tools.list_patterns().await;

        let v = result_json(&result);
        assert_eq!(v["isError"], json!(false));
        assert_eq!(v["content"][0]["text"], json!("[]"));
    }

    #[tokio::test]
    async fn pattern_prompt_degrades_to_input_name_and_empty_prompt() {
        let tools = FabricTools::new(Arc::new(DeadBackend));
        let result = tools.pattern_prompt("summarize").await;

        let v = result_json(&result);
        assert_eq!(
            v["structuredContent"],
            json!({"name": "summarize", "pattern": ""})
        );
    }

    #[test]
    fn run_pattern_returns_the_placeholder() {
        let tools = FabricTools::new(Arc::new(DeadBackend));
        let result = tools.run_pattern("summarize", "hello world");

        let v = result_json(&result);
        assert_eq!(
            v["structuredContent"],
            json!({
                "name": "summarize",
                "input": "hello world",
                "result": "Pattern result here"
            })
        );
    }

    #[test]
    fn definitions_expose_the_three_tools_with_required_args() {
        let tools = tool_definitions();
        let names: Vec<&str> = tools.iter().map(|t| t.name.as_ref()).collect();
        assert_eq!(names, vec![LIST_PATTERNS, PATTERN_PROMPT, RUN_PATTERN]);

        let run = &tools[2];
        let schema = Value::Object(run.input_schema.as_ref().clone());
        assert_eq!(schema["required"], json!(["pattern_name", "input_str"]));
        assert_eq!(schema["properties"]["input_str"]["type"], json!("string"));
        assert!(run.output_schema.is_some());
    }
}

//! MCP protocol surface and server lifecycle.

use crate::tools::{self, FabricTools};
use anyhow::Context as _;
use rmcp::model::{
    CallToolRequestParam, CallToolResult, Implementation, ListToolsResult, PaginatedRequestParam,
    ProtocolVersion, ServerCapabilities, ServerInfo,
};
use rmcp::service::RequestContext;
use rmcp::transport::stdio;
use rmcp::{ErrorData, RoleServer, ServerHandler, ServiceExt as _};
use serde_json::Value;

impl FabricTools {
    /// Route a tool call by name.
    ///
    /// Unknown tools and missing/mistyped required arguments are
    /// protocol-level invalid-params errors; backend failures never reach
    /// this layer (the handlers swallow them).
    ///
    /// # Errors
    ///
    /// Returns an invalid-params [`ErrorData`] for unknown tool names and
    /// missing required arguments.
    pub async fn dispatch(
        &self,
        name: &str,
        args: &rmcp::model::JsonObject,
    ) -> Result<CallToolResult, ErrorData> {
        match name {
            tools::LIST_PATTERNS => Ok(self.list_patterns().await),
            tools::PATTERN_PROMPT => {
                let pattern_name = required_str(args, "pattern_name")?;
                Ok(self.pattern_prompt(pattern_name).await)
            }
            tools::RUN_PATTERN => {
                let pattern_name = required_str(args, "pattern_name")?;
                let input_str = required_str(args, "input_str")?;
                Ok(self.run_pattern(pattern_name, input_str))
            }
            other => Err(ErrorData::invalid_params(
                format!("Tool not found: {other}"),
                None,
            )),
        }
    }
}

impl ServerHandler for FabricTools {
    fn get_info(&self) -> ServerInfo {
        ServerInfo {
            protocol_version: ProtocolVersion::V_2025_03_26,
            capabilities: ServerCapabilities::builder().enable_tools().build(),
            server_info: Implementation::from_build_env(),
            instructions: Some(
                "Fabric MCP server: list fabric patterns, fetch a pattern's prompt, \
                 and run a pattern against the Fabric backend."
                    .to_string(),
            ),
        }
    }

    async fn list_tools(
        &self,
        _request: Option<PaginatedRequestParam>,
        _context: RequestContext<RoleServer>,
    ) -> Result<ListToolsResult, ErrorData> {
        Ok(ListToolsResult {
            meta: None,
            next_cursor: None,
            tools: tools::tool_definitions(),
        })
    }

    async fn call_tool(
        &self,
        request: CallToolRequestParam,
        _context: RequestContext<RoleServer>,
    ) -> Result<CallToolResult, ErrorData> {
        let args = request.arguments.unwrap_or_default();
        self.dispatch(request.name.as_ref(), &args).await
    }
}

fn required_str<'a>(args: &'a rmcp::model::JsonObject, key: &str) -> Result<&'a str, ErrorData> {
    args.get(key).and_then(Value::as_str).ok_or_else(|| {
        ErrorData::invalid_params(format!("missing required string argument '{key}'"), None)
    })
}

/// Serve the tools over stdio until the peer disconnects or the process is
/// interrupted.
///
/// Ctrl-C, service cancellation, and transport close are normal shutdown:
/// they are logged and absorbed. Startup failures and serve-loop join
/// errors propagate.
///
/// # Errors
///
/// Returns an error if the stdio transport fails to initialize or the serve
/// loop terminates abnormally.
pub async fn serve_stdio(tools: FabricTools) -> anyhow::Result<()> {
    let service = tools.serve(stdio()).await.context("start MCP stdio server")?;

    tokio::select! {
        quit = service.waiting() => {
            let reason = quit.context("MCP serve loop failed")?;
            tracing::info!(?reason, "server stopped");
        }
        signal = tokio::signal::ctrl_c() => {
            signal.context("listen for ctrl-c")?;
            tracing::info!("server stopped by user");
        }
    }

    Ok(())
}

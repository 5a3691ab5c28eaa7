use anyhow::Context as _;
use clap::Parser;
use fabric_api::FabricClient;
use fabric_mcp::tools::FabricTools;
use fabric_mcp::{config, server};
use std::sync::Arc;
use std::time::Duration;
use tracing_subscriber::EnvFilter;

/// A Model Context Protocol server for Fabric AI.
#[derive(Debug, Parser)]
#[command(name = "fabric-mcp", version)]
struct Cli {
    /// Run the server on the stdio transport (the default).
    #[arg(long)]
    stdio: bool,

    /// Base URL of the Fabric REST API.
    #[arg(long, env = "FABRIC_BASE_URL")]
    fabric_url: Option<String>,

    /// API key sent to the Fabric backend as X-API-Key.
    #[arg(long, env = "FABRIC_API_KEY", hide_env_values = true)]
    api_key: Option<String>,

    /// Per-request timeout for backend calls, in seconds.
    #[arg(long, default_value_t = 30)]
    timeout_secs: u64,

    /// Log level filter (overridden by RUST_LOG).
    #[arg(long, default_value = "info")]
    log_level: String,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // stdout carries the MCP transport; all diagnostics go to stderr.
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&cli.log_level)),
        )
        .with_writer(std::io::stderr)
        .init();

    if !cli.stdio {
        tracing::debug!("no transport flag given; defaulting to stdio");
    }

    let settings = config::FabricSettings::resolve(
        cli.fabric_url,
        cli.api_key,
        Duration::from_secs(cli.timeout_secs),
    );

    let (default_model, default_vendor) = config::default_model();
    tracing::info!(
        base_url = %settings.base_url,
        default_model = default_model.as_deref().unwrap_or("<unset>"),
        default_vendor = default_vendor.as_deref().unwrap_or("<unset>"),
        "starting fabric-mcp on stdio"
    );

    let client = FabricClient::new(&settings.base_url, settings.api_key, settings.timeout)
        .context("build Fabric API client")?;

    server::serve_stdio(FabricTools::new(Arc::new(client))).await
}

//! Promdash MCP Server
//!
//! Exposes metric-to-dashboard synthesis to AI agents via the MCP protocol.
//!
//! ## Tools
//!
//! - `create_dashboard_for_metric` - metric name in, Grafana dashboard out
//! - `update_grafana_dashboard` - retitle a dashboard and append a panel
//! - `get_dashboard_uid` - find a dashboard UID by title
//! - `search_metric` / `get_all_metrics` - inspect the Prometheus exposition
//! - `generate_promql` - preview the generated query
//! - `create_grafana_dashboard` - single-panel dashboard under a given name
//! - `trigger_webhook` - GET an external workflow webhook
//!
//! ## Usage
//!
//! Add to your MCP client configuration:
//! ```json
//! {
//!   "mcpServers": {
//!     "promdash": {
//!       "command": "promdash-mcp",
//!       "env": {
//!         "PROMDASH_GRAFANA_URL": "http://localhost:3000",
//!         "PROMDASH_GRAFANA_TOKEN": "glsa_..."
//!       }
//!     }
//!   }
//! }
//! ```

use anyhow::{Context, Result};
use promdash_synth::PromdashConfig;
use rmcp::transport::stdio;
use rmcp::ServiceExt;

mod tools;
mod webhook;

pub use tools::PromdashService;
pub use webhook::WebhookClient;

/// Binary entry point: stderr logging, config from file/env, stdio transport.
pub async fn main_entry() -> Result<()> {
    // Configure logging to stderr only (stdout is for MCP protocol)
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn"))
        .target(env_logger::Target::Stderr)
        .init();

    let config = PromdashConfig::load(None).context("Failed to load promdash config")?;
    serve_stdio(config).await
}

/// Serve the tools over stdin/stdout until the client disconnects.
pub async fn serve_stdio(config: PromdashConfig) -> Result<()> {
    log::info!(
        "Starting Promdash MCP server (grafana={}, prometheus={})",
        config.grafana.base_url,
        config.prometheus.url
    );

    let service = PromdashService::from_config(config)?;
    let server = service.serve(stdio()).await?;

    // Wait for shutdown
    server.waiting().await?;

    log::info!("Promdash MCP server stopped");
    Ok(())
}

use anyhow::{Context, Result};
use rmcp::model::{CallToolRequestParam, CallToolResult};
use rmcp::service::{RoleClient, RunningService, ServiceExt};
use rmcp::transport::TokioChildProcess;
use std::path::PathBuf;
use std::time::Duration;
use tokio::process::Command;

pub fn locate_promdash_mcp_bin() -> Result<PathBuf> {
    if let Some(path) = option_env!("CARGO_BIN_EXE_promdash-mcp") {
        return Ok(PathBuf::from(path));
    }

    // Try to resolve from the current test executable location.
    if let Ok(exe) = std::env::current_exe() {
        if let Some(target_profile_dir) = exe.parent().and_then(|p| p.parent()) {
            let candidate = target_profile_dir.join("promdash-mcp");
            if candidate.exists() {
                return Ok(candidate);
            }
        }
    }

    // Final fallback: search the repo target dirs.
    let manifest_dir = PathBuf::from(env!("CARGO_MANIFEST_DIR"));
    let repo_root = manifest_dir
        .ancestors()
        .nth(2)
        .context("failed to resolve repo root from CARGO_MANIFEST_DIR")?;
    for rel in ["target/debug/promdash-mcp", "target/release/promdash-mcp"] {
        let candidate = repo_root.join(rel);
        if candidate.exists() {
            return Ok(candidate);
        }
    }

    anyhow::bail!(
        "failed to locate promdash-mcp binary; build with: cargo build -p promdash-mcp --bin promdash-mcp"
    )
}

/// Spawn the server pointed at the given Grafana and Prometheus endpoints.
pub async fn start_server(
    grafana_url: &str,
    prometheus_url: &str,
) -> Result<RunningService<RoleClient, ()>> {
    let bin = locate_promdash_mcp_bin()?;
    let mut cmd = Command::new(bin);
    cmd.env_remove("PROMDASH_CONFIG");
    cmd.env("RUST_LOG", "warn");
    cmd.env("PROMDASH_GRAFANA_URL", grafana_url);
    cmd.env("PROMDASH_GRAFANA_TOKEN", "smoke-token");
    cmd.env("PROMDASH_PROMETHEUS_URL", prometheus_url);
    cmd.env("PROMDASH_TIMEOUT_MS", "2000");

    let transport = TokioChildProcess::new(cmd).context("spawn mcp server")?;
    tokio::time::timeout(Duration::from_secs(10), ().serve(transport))
        .await
        .context("timeout starting MCP server")?
        .context("start MCP client")
}

pub async fn call(
    service: &RunningService<RoleClient, ()>,
    name: &str,
    args: serde_json::Value,
) -> Result<CallToolResult> {
    tokio::time::timeout(
        Duration::from_secs(10),
        service.call_tool(CallToolRequestParam {
            name: name.to_string().into(),
            arguments: args.as_object().cloned(),
        }),
    )
    .await
    .with_context(|| format!("timeout calling {name}"))?
    .with_context(|| format!("call {name}"))
}

pub fn text_of(result: &CallToolResult) -> Result<&str> {
    result
        .content
        .first()
        .and_then(|c| c.as_text())
        .map(|t| t.text.as_str())
        .context("tool result missing text output")
}

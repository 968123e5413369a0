//! MCP tools for Promdash
//!
//! Every tool answers with human-readable text. Failures additionally set the
//! MCP `isError` flag; the failure kind is logged, not encoded in the text.

use anyhow::{Context as AnyhowContext, Result};
use promdash_grafana::GrafanaClient;
use promdash_metrics_source::PrometheusSource;
use promdash_protocol::ToolFailure;
use promdash_synth::{PromdashConfig, SynthOptions, Synthesizer};
use rmcp::handler::server::tool::ToolRouter;
use rmcp::handler::server::wrapper::Parameters;
use rmcp::model::{CallToolResult, Content, Implementation, ServerCapabilities, ServerInfo};
use rmcp::schemars;
use rmcp::{tool, tool_handler, tool_router, ErrorData as McpError, ServerHandler};
use serde::Deserialize;
use std::sync::Arc;

use crate::webhook::WebhookClient;

type GrafanaSynthesizer = Synthesizer<GrafanaClient, PrometheusSource>;

/// Promdash MCP Service
#[derive(Clone)]
pub struct PromdashService {
    synth: Arc<GrafanaSynthesizer>,
    webhook: WebhookClient,
    tool_router: ToolRouter<Self>,
}

impl PromdashService {
    pub fn from_config(config: PromdashConfig) -> Result<Self> {
        let options = SynthOptions {
            optimistic_updates: config.optimistic_updates,
        };
        let store = GrafanaClient::new(config.grafana).context("create Grafana client")?;
        let webhook = WebhookClient::new(config.prometheus.timeout_ms)
            .context("create webhook client")?;
        let source =
            PrometheusSource::new(config.prometheus).context("create Prometheus client")?;
        Ok(Self {
            synth: Arc::new(Synthesizer::new(store, source, options)),
            webhook,
            tool_router: Self::tool_router(),
        })
    }
}

#[tool_handler]
impl ServerHandler for PromdashService {
    fn get_info(&self) -> ServerInfo {
        ServerInfo {
            instructions: Some("Promdash turns Prometheus metric names into Grafana dashboards. Use 'search_metric' to check a metric exists, 'create_dashboard_for_metric' to build a dashboard with generated PromQL, 'get_dashboard_uid' to find a dashboard and 'update_grafana_dashboard' to append a panel.".into()),
            capabilities: ServerCapabilities::builder().enable_tools().build(),
            server_info: Implementation::from_build_env(),
            ..Default::default()
        }
    }
}

// ============================================================================
// Tool Input Schemas
// ============================================================================

#[derive(Debug, Deserialize, schemars::JsonSchema)]
pub struct MetricRequest {
    /// Prometheus metric name
    #[schemars(description = "Prometheus metric name, e.g. http_requests_total")]
    pub metric_name: String,
}

#[derive(Debug, Deserialize, schemars::JsonSchema)]
pub struct DashboardNameRequest {
    #[schemars(description = "Dashboard title (or part of it) to search for")]
    pub dashboard_name: String,
}

#[derive(Debug, Deserialize, schemars::JsonSchema)]
pub struct CreateDashboardRequest {
    #[schemars(description = "Title of the dashboard to create or replace")]
    pub dashboard_name: String,

    /// PromQL for the single panel
    #[schemars(description = "PromQL expression for the panel (defaults to node CPU usage)")]
    pub promql: Option<String>,
}

#[derive(Debug, Deserialize, schemars::JsonSchema)]
pub struct UpdateDashboardRequest {
    #[schemars(description = "UID of the dashboard to update")]
    pub dashboard_uid: String,

    #[schemars(description = "New dashboard title")]
    pub new_title: String,

    /// Used verbatim, not classified
    #[schemars(description = "PromQL expression for the appended panel")]
    pub promql: String,
}

#[derive(Debug, Deserialize, schemars::JsonSchema)]
pub struct WebhookRequest {
    #[schemars(description = "Full webhook URL to call with GET")]
    pub webhook_url: String,
}

fn text(message: impl Into<String>) -> CallToolResult {
    CallToolResult::success(vec![Content::text(message.into())])
}

fn failure(tool: &str, failure: ToolFailure) -> CallToolResult {
    log::warn!("{tool}: {} failure: {}", failure.kind, failure.message);
    CallToolResult::error(vec![Content::text(failure.message)])
}

// ============================================================================
// Tool Implementations
// ============================================================================

#[tool_router]
impl PromdashService {
    #[tool(description = "Fetch raw Prometheus /metrics text.")]
    pub async fn get_all_metrics(&self) -> Result<CallToolResult, McpError> {
        Ok(match self.synth.fetch_exposition().await {
            Ok(body) => text(body),
            Err(f) => failure("get_all_metrics", f),
        })
    }

    #[tool(description = "Search the Prometheus /metrics output for lines mentioning a metric name.")]
    pub async fn search_metric(
        &self,
        Parameters(request): Parameters<MetricRequest>,
    ) -> Result<CallToolResult, McpError> {
        Ok(match self.synth.search_metric(&request.metric_name).await {
            Ok(matches) => text(matches.render()),
            Err(f) => failure("search_metric", f),
        })
    }

    #[tool(description = "Show which PromQL would be generated for a metric (counter or gauge) without touching Grafana.")]
    pub async fn generate_promql(
        &self,
        Parameters(request): Parameters<MetricRequest>,
    ) -> Result<CallToolResult, McpError> {
        Ok(text(GrafanaSynthesizer::plan(&request.metric_name).to_string()))
    }

    #[tool(description = "Fully automated: check the metric exists in Prometheus, generate PromQL (rate() for counters) and create or replace the Grafana dashboard 'Auto Dashboard: <metric>'.")]
    pub async fn create_dashboard_for_metric(
        &self,
        Parameters(request): Parameters<MetricRequest>,
    ) -> Result<CallToolResult, McpError> {
        Ok(
            match self.synth.create_for_metric(&request.metric_name).await {
                Ok(report) if report.is_success() => text(report.to_string()),
                Ok(report) => CallToolResult::error(vec![Content::text(report.to_string())]),
                Err(f) => failure("create_dashboard_for_metric", f),
            },
        )
    }

    #[tool(description = "Create or replace a Grafana dashboard with a single panel for the given PromQL.")]
    pub async fn create_grafana_dashboard(
        &self,
        Parameters(request): Parameters<CreateDashboardRequest>,
    ) -> Result<CallToolResult, McpError> {
        Ok(
            match self
                .synth
                .create_named_dashboard(&request.dashboard_name, request.promql.as_deref())
                .await
            {
                Ok(report) => text(report.to_string()),
                Err(f) => failure("create_grafana_dashboard", f),
            },
        )
    }

    #[tool(description = "Update an existing Grafana dashboard: change its title and append a new panel for the given PromQL.")]
    pub async fn update_grafana_dashboard(
        &self,
        Parameters(request): Parameters<UpdateDashboardRequest>,
    ) -> Result<CallToolResult, McpError> {
        Ok(
            match self
                .synth
                .update_dashboard(&request.dashboard_uid, &request.new_title, &request.promql)
                .await
            {
                Ok(report) => text(report.to_string()),
                Err(f) => failure("update_grafana_dashboard", f),
            },
        )
    }

    #[tool(description = "Search Grafana dashboards by name and return the UID of the first match.")]
    pub async fn get_dashboard_uid(
        &self,
        Parameters(request): Parameters<DashboardNameRequest>,
    ) -> Result<CallToolResult, McpError> {
        Ok(
            match self.synth.lookup_dashboard(&request.dashboard_name).await {
                Ok(hit) => text(format!("Dashboard found: {}, UID: {}", hit.title, hit.uid)),
                Err(f) => failure("get_dashboard_uid", f),
            },
        )
    }

    #[tool(description = "Trigger an external workflow (e.g. an n8n webhook) with a GET request and return its response.")]
    pub async fn trigger_webhook(
        &self,
        Parameters(request): Parameters<WebhookRequest>,
    ) -> Result<CallToolResult, McpError> {
        Ok(match self.webhook.trigger(&request.webhook_url).await {
            Ok(body) => text(body),
            Err(f) => failure("trigger_webhook", f),
        })
    }
}

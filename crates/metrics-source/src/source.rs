use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use std::time::Duration;

use crate::error::{Result, SourceError};

pub const DEFAULT_PROMETHEUS_URL: &str = "http://localhost:9090/metrics";

/// Text reported when a search matches no exposition line.
pub const NO_SUCH_METRIC: &str = "No such metric found";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct SourceConfig {
    /// Full URL of the exposition endpoint, path included.
    pub url: String,
    pub timeout_ms: u64,
}

impl Default for SourceConfig {
    fn default() -> Self {
        Self {
            url: DEFAULT_PROMETHEUS_URL.to_string(),
            timeout_ms: 5_000,
        }
    }
}

/// Exposition lines that mention a metric, in source order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MetricMatches {
    pub lines: Vec<String>,
}

impl MetricMatches {
    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    /// Substring filter; `# HELP`/`# TYPE` lines count like samples.
    pub fn from_exposition(text: &str, metric_name: &str) -> Self {
        Self {
            lines: text
                .lines()
                .filter(|line| line.contains(metric_name))
                .map(str::to_string)
                .collect(),
        }
    }

    pub fn render(&self) -> String {
        if self.lines.is_empty() {
            NO_SUCH_METRIC.to_string()
        } else {
            self.lines.join("\n")
        }
    }
}

#[async_trait]
pub trait MetricsSource: Send + Sync {
    async fn fetch_exposition(&self) -> Result<String>;

    async fn search_metric(&self, metric_name: &str) -> Result<MetricMatches> {
        let text = self.fetch_exposition().await?;
        Ok(MetricMatches::from_exposition(&text, metric_name))
    }
}

#[derive(Debug, Clone)]
pub struct PrometheusSource {
    config: SourceConfig,
    http: Client,
}

impl PrometheusSource {
    pub fn new(config: SourceConfig) -> Result<Self> {
        let http = Client::builder()
            .pool_max_idle_per_host(0)
            .build()
            .map_err(|e| SourceError::Client(e.to_string()))?;
        Ok(Self { config, http })
    }

    pub fn config(&self) -> &SourceConfig {
        &self.config
    }
}

#[async_trait]
impl MetricsSource for PrometheusSource {
    async fn fetch_exposition(&self) -> Result<String> {
        log::debug!("prometheus: fetching {}", self.config.url);
        let resp = self
            .http
            .get(&self.config.url)
            .timeout(Duration::from_millis(self.config.timeout_ms))
            .send()
            .await
            .and_then(|r| r.error_for_status())
            .map_err(|e| SourceError::Fetch(e.to_string()))?;
        resp.text()
            .await
            .map_err(|e| SourceError::Fetch(e.to_string()))
    }
}

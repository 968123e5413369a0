//! # Promdash Synth
//!
//! Metric-to-dashboard synthesis.
//!
//! ## Pipeline
//!
//! ```text
//! metric name
//!     │
//!     ├──> Metrics source (is it exposed?)
//!     │
//!     ├──> Classifier ──> Synthesizer
//!     │      └─> PromQL expression
//!     │
//!     ├──> Panel composer (layout + id from current panels)
//!     │
//!     └──> Dashboard store (upsert, full document)
//! ```
//!
//! ## Example
//!
//! ```no_run
//! use promdash_grafana::GrafanaClient;
//! use promdash_metrics_source::PrometheusSource;
//! use promdash_synth::{PromdashConfig, SynthOptions, Synthesizer};
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     let config = PromdashConfig::load(None)?;
//!     let synth = Synthesizer::new(
//!         GrafanaClient::new(config.grafana)?,
//!         PrometheusSource::new(config.prometheus)?,
//!         SynthOptions::default(),
//!     );
//!     match synth.create_for_metric("http_requests_total").await {
//!         Ok(report) => println!("{report}"),
//!         Err(failure) => eprintln!("{failure}"),
//!     }
//!     Ok(())
//! }
//! ```

pub mod composer;
mod config;
mod orchestrator;
mod report;

pub use composer::{append_panel, compose_panel};
pub use config::{
    ConfigError, PromdashConfig, ENV_CONFIG_PATH, ENV_GRAFANA_TOKEN, ENV_GRAFANA_URL,
    ENV_OPTIMISTIC_UPDATES, ENV_PROMETHEUS_URL, ENV_TIMEOUT_MS,
};
pub use orchestrator::{dashboard_title_for, SynthOptions, Synthesizer, DEFAULT_NAMED_EXPRESSION};
pub use report::{CreateReport, NamedDashboardReport, QueryPlan, UpdateReport};

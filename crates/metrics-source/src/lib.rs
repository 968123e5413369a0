//! # Promdash Metrics Source
//!
//! Pulls the raw Prometheus exposition text and answers "is this metric
//! observable?" with a plain substring filter over its lines.

mod error;
mod source;

pub use error::{Result, SourceError};
pub use source::{
    MetricMatches, MetricsSource, PrometheusSource, SourceConfig, DEFAULT_PROMETHEUS_URL,
    NO_SUCH_METRIC,
};

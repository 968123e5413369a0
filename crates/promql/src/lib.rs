//! # Promdash PromQL
//!
//! Turns a metric name into a query expression using naming conventions only:
//!
//! ```text
//! http_requests_total ──> Counter ──> rate(http_requests_total[5m])
//! cpu_usage           ──> Gauge   ──> cpu_usage
//! ```
//!
//! No PromQL parsing happens here. Both steps are pure.

mod classify;
mod synthesize;

pub use classify::{classify, QueryCategory, COUNTER_SUFFIXES};
pub use synthesize::{synthesize, synthesize_for, RATE_WINDOW};

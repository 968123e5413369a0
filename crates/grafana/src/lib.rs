//! # Promdash Grafana
//!
//! The only component that talks to the dashboard store.
//!
//! | Operation | Endpoint | Failure kinds |
//! |---|---|---|
//! | [`DashboardStore::find_by_name`] | `GET /api/search?query=..&type=dash-db` | lookup, not found |
//! | [`DashboardStore::fetch_by_uid`] | `GET /api/dashboards/uid/<uid>` | lookup, not found |
//! | [`DashboardStore::create_or_overwrite`] | `POST /api/dashboards/db` | write |
//!
//! Reads are bounded by [`StoreConfig::timeout_ms`]; writes have no explicit
//! timeout. Nothing is retried.

mod client;
mod config;
mod error;

pub use client::{DashboardStore, GrafanaClient};
pub use config::{StoreConfig, DEFAULT_GRAFANA_URL, DEFAULT_TIMEOUT_MS};
pub use error::{Result, StoreError};

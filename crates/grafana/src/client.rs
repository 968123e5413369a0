use async_trait::async_trait;
use promdash_protocol::{Dashboard, DashboardRef, SaveConfirmation};
use reqwest::header::CONTENT_TYPE;
use reqwest::{Client, RequestBuilder, StatusCode};
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::config::StoreConfig;
use crate::error::{Result, StoreError};

/// Read/create/update access to a dashboard document store.
#[async_trait]
pub trait DashboardStore: Send + Sync {
    /// First search hit for `name`, in the order the store returned them.
    async fn find_by_name(&self, name: &str) -> Result<DashboardRef>;

    async fn fetch_by_uid(&self, uid: &str) -> Result<Dashboard>;

    /// Full-document write. With `overwrite` the store replaces any dashboard
    /// with the same title or uid instead of rejecting the save.
    async fn create_or_overwrite(
        &self,
        dashboard: &Dashboard,
        overwrite: bool,
    ) -> Result<SaveConfirmation>;
}

/// Grafana HTTP API client.
#[derive(Debug, Clone)]
pub struct GrafanaClient {
    config: StoreConfig,
    http: Client,
}

#[derive(Debug, Deserialize)]
struct SearchHit {
    #[serde(default)]
    uid: Option<String>,
    #[serde(default)]
    title: Option<String>,
}

#[derive(Debug, Deserialize)]
struct DashboardEnvelope {
    #[serde(default)]
    dashboard: Option<Value>,
}

#[derive(Debug, Serialize)]
struct SaveRequest<'a> {
    dashboard: &'a Dashboard,
    overwrite: bool,
}

impl GrafanaClient {
    pub fn new(config: StoreConfig) -> Result<Self> {
        // Every call opens its own connection; nothing is kept between invocations.
        let http = Client::builder()
            .pool_max_idle_per_host(0)
            .build()
            .map_err(|e| StoreError::Lookup(format!("Failed to build HTTP client: {e}")))?;
        Ok(Self { config, http })
    }

    pub fn config(&self) -> &StoreConfig {
        &self.config
    }

    fn authorized(&self, builder: RequestBuilder) -> RequestBuilder {
        builder
            .bearer_auth(&self.config.credential)
            .header(CONTENT_TYPE, "application/json")
    }
}

#[async_trait]
impl DashboardStore for GrafanaClient {
    async fn find_by_name(&self, name: &str) -> Result<DashboardRef> {
        log::debug!("grafana: searching dashboards for {name:?}");
        let url = self
            .config
            .endpoint(&["api", "search"])
            .map_err(|e| StoreError::Lookup(format!("Error fetching dashboard UID: {e}")))?;
        let request = self
            .http
            .get(url)
            .query(&[("query", name), ("type", "dash-db")])
            .timeout(self.config.read_timeout());
        let resp = self
            .authorized(request)
            .send()
            .await
            .and_then(|r| r.error_for_status())
            .map_err(|e| StoreError::Lookup(format!("Error fetching dashboard UID: {e}")))?;

        let hits: Vec<SearchHit> = resp.json().await.map_err(|e| {
            StoreError::Lookup(format!(
                "Error fetching dashboard UID: search response is not a JSON array: {e}"
            ))
        })?;

        let Some(first) = hits.into_iter().next() else {
            return Err(StoreError::NotFound(format!(
                "No dashboard found with name '{name}'"
            )));
        };
        let uid = first.uid.ok_or_else(|| {
            StoreError::Lookup("Error fetching dashboard UID: search hit has no uid".to_string())
        })?;
        Ok(DashboardRef {
            uid,
            title: first.title.unwrap_or_default(),
        })
    }

    async fn fetch_by_uid(&self, uid: &str) -> Result<Dashboard> {
        log::debug!("grafana: fetching dashboard uid={uid}");
        let url = self
            .config
            .endpoint(&["api", "dashboards", "uid", uid])
            .map_err(|e| StoreError::Lookup(format!("Error fetching dashboard: {e}")))?;
        let request = self
            .http
            .get(url)
            .timeout(self.config.read_timeout());
        let resp = self
            .authorized(request)
            .send()
            .await
            .map_err(|e| StoreError::Lookup(format!("Error fetching dashboard: {e}")))?;

        if resp.status() == StatusCode::NOT_FOUND {
            return Err(StoreError::NotFound(format!(
                "Dashboard with uid '{uid}' not found."
            )));
        }
        let resp = resp
            .error_for_status()
            .map_err(|e| StoreError::Lookup(format!("Error fetching dashboard: {e}")))?;
        let envelope: DashboardEnvelope = resp
            .json()
            .await
            .map_err(|e| StoreError::Lookup(format!("Error fetching dashboard: {e}")))?;

        let payload = match envelope.dashboard {
            None | Some(Value::Null) => None,
            Some(Value::Object(map)) if map.is_empty() => None,
            Some(other) => Some(other),
        };
        let Some(payload) = payload else {
            return Err(StoreError::NotFound(format!(
                "Dashboard JSON malformed or empty (uid '{uid}')."
            )));
        };

        serde_json::from_value(payload).map_err(|e| {
            StoreError::Lookup(format!("Error fetching dashboard: unreadable document: {e}"))
        })
    }

    async fn create_or_overwrite(
        &self,
        dashboard: &Dashboard,
        overwrite: bool,
    ) -> Result<SaveConfirmation> {
        log::debug!(
            "grafana: saving dashboard {:?} ({} panels, overwrite={overwrite})",
            dashboard.title,
            dashboard.panels.len()
        );
        let url = self
            .config
            .endpoint(&["api", "dashboards", "db"])
            .map_err(StoreError::WriteTransport)?;
        // Headers first: `json()` only sets Content-Type when it is absent.
        let resp = self
            .authorized(self.http.post(url))
            .json(&SaveRequest {
                dashboard,
                overwrite,
            })
            .send()
            .await
            .map_err(|e| StoreError::WriteTransport(e.to_string()))?;

        let status = resp.status();
        let body = resp
            .text()
            .await
            .map_err(|e| StoreError::WriteTransport(e.to_string()))?;
        if !status.is_success() {
            log::warn!("grafana: save rejected with status {status}");
            return Err(StoreError::Write {
                status: status.as_u16(),
                body,
            });
        }

        Ok(serde_json::from_str(&body).unwrap_or_default())
    }
}

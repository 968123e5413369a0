use reqwest::Url;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::time::Duration;

pub const DEFAULT_GRAFANA_URL: &str = "http://localhost:3000";
pub const DEFAULT_TIMEOUT_MS: u64 = 5_000;

/// Connection settings for the dashboard store.
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct StoreConfig {
    pub base_url: String,
    /// Bearer token (service account or API key).
    pub credential: String,
    /// Applied to read requests only.
    pub timeout_ms: u64,
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_GRAFANA_URL.to_string(),
            credential: String::new(),
            timeout_ms: DEFAULT_TIMEOUT_MS,
        }
    }
}

impl StoreConfig {
    pub fn new(base_url: impl Into<String>, credential: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            credential: credential.into(),
            ..Self::default()
        }
    }

    pub fn read_timeout(&self) -> Duration {
        Duration::from_millis(self.timeout_ms)
    }

    /// `base_url` with `segments` appended, each one percent-encoded.
    pub(crate) fn endpoint(&self, segments: &[&str]) -> Result<Url, String> {
        let invalid = || format!("invalid Grafana base URL '{}'", self.base_url);
        let mut url = Url::parse(&self.base_url).map_err(|_| invalid())?;
        url.path_segments_mut()
            .map_err(|_| invalid())?
            .pop_if_empty()
            .extend(segments);
        Ok(url)
    }
}

impl fmt::Debug for StoreConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("StoreConfig")
            .field("base_url", &self.base_url)
            .field(
                "credential",
                &if self.credential.is_empty() {
                    "<unset>"
                } else {
                    "<redacted>"
                },
            )
            .field("timeout_ms", &self.timeout_ms)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn endpoint_joins_without_double_slash() {
        let cfg = StoreConfig::new("http://grafana:3000/", "tok");
        assert_eq!(
            cfg.endpoint(&["api", "dashboards", "db"]).unwrap().as_str(),
            "http://grafana:3000/api/dashboards/db"
        );
    }

    #[test]
    fn endpoint_keeps_a_sub_path_install() {
        let cfg = StoreConfig::new("http://proxy/grafana/", "tok");
        assert_eq!(
            cfg.endpoint(&["api", "search"]).unwrap().as_str(),
            "http://proxy/grafana/api/search"
        );
    }

    #[test]
    fn endpoint_escapes_path_separators_and_queries_in_segments() {
        let cfg = StoreConfig::new("http://grafana:3000", "tok");
        let url = cfg
            .endpoint(&["api", "dashboards", "uid", "other?x=1/../db"])
            .unwrap();
        assert_eq!(url.query(), None);
        assert_eq!(url.path(), "/api/dashboards/uid/other%3Fx=1%2F..%2Fdb");
    }

    #[test]
    fn endpoint_rejects_a_malformed_base_url() {
        let cfg = StoreConfig::new("grafana:3000 nope", "tok");
        assert!(cfg.endpoint(&["api", "search"]).is_err());
    }

    #[test]
    fn debug_never_prints_the_credential() {
        let cfg = StoreConfig::new("http://grafana:3000", "glsa_secret");
        let rendered = format!("{cfg:?}");
        assert!(!rendered.contains("glsa_secret"));
        assert!(rendered.contains("<redacted>"));
    }
}

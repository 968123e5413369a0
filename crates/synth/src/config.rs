use promdash_grafana::StoreConfig;
use promdash_metrics_source::SourceConfig;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use thiserror::Error;

pub const ENV_CONFIG_PATH: &str = "PROMDASH_CONFIG";
pub const ENV_GRAFANA_URL: &str = "PROMDASH_GRAFANA_URL";
pub const ENV_GRAFANA_TOKEN: &str = "PROMDASH_GRAFANA_TOKEN";
pub const ENV_PROMETHEUS_URL: &str = "PROMDASH_PROMETHEUS_URL";
pub const ENV_TIMEOUT_MS: &str = "PROMDASH_TIMEOUT_MS";
pub const ENV_OPTIMISTIC_UPDATES: &str = "PROMDASH_OPTIMISTIC_UPDATES";

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Failed to read config {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Config {path} is not valid JSON ({json}) or TOML ({toml})")]
    Parse {
        path: PathBuf,
        json: String,
        toml: String,
    },

    #[error("Invalid value for {key}: {value:?}")]
    InvalidEnv { key: &'static str, value: String },
}

/// Everything the pipeline needs to reach its collaborators.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct PromdashConfig {
    pub grafana: StoreConfig,
    pub prometheus: SourceConfig,
    /// Reject updates whose dashboard version moved since the fetch, instead
    /// of overwriting (last writer wins).
    pub optimistic_updates: bool,
}

impl PromdashConfig {
    /// File (explicit path, else `PROMDASH_CONFIG`), then environment overrides.
    pub fn load(path: Option<&Path>) -> Result<Self, ConfigError> {
        let env_path = std::env::var_os(ENV_CONFIG_PATH).map(PathBuf::from);
        let mut config = match path.map(Path::to_path_buf).or(env_path) {
            Some(path) => Self::from_file(&path)?,
            None => Self::default(),
        };
        config.apply_env(|key| std::env::var(key).ok())?;
        Ok(config)
    }

    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let raw = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        Self::parse(&raw).map_err(|(json, toml)| ConfigError::Parse {
            path: path.to_path_buf(),
            json,
            toml,
        })
    }

    /// JSON first, TOML as fallback.
    fn parse(raw: &str) -> Result<Self, (String, String)> {
        match serde_json::from_str(raw) {
            Ok(config) => Ok(config),
            Err(json_err) => toml::from_str(raw).map_err(|toml_err: toml::de::Error| {
                (json_err.to_string(), toml_err.to_string())
            }),
        }
    }

    pub fn apply_env(
        &mut self,
        lookup: impl Fn(&str) -> Option<String>,
    ) -> Result<(), ConfigError> {
        let lookup = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        if let Some(url) = lookup(ENV_GRAFANA_URL) {
            self.grafana.base_url = url.trim().to_string();
        }
        if let Some(token) = lookup(ENV_GRAFANA_TOKEN) {
            self.grafana.credential = token.trim().to_string();
        }
        if let Some(url) = lookup(ENV_PROMETHEUS_URL) {
            self.prometheus.url = url.trim().to_string();
        }
        if let Some(raw) = lookup(ENV_TIMEOUT_MS) {
            let timeout_ms = raw
                .trim()
                .parse::<u64>()
                .map_err(|_| ConfigError::InvalidEnv {
                    key: ENV_TIMEOUT_MS,
                    value: raw.clone(),
                })?;
            self.grafana.timeout_ms = timeout_ms;
            self.prometheus.timeout_ms = timeout_ms;
        }
        if let Some(raw) = lookup(ENV_OPTIMISTIC_UPDATES) {
            self.optimistic_updates = match raw.trim().to_ascii_lowercase().as_str() {
                "1" | "true" | "yes" | "on" => true,
                "0" | "false" | "no" | "off" => false,
                _ => {
                    return Err(ConfigError::InvalidEnv {
                        key: ENV_OPTIMISTIC_UPDATES,
                        value: raw,
                    })
                }
            };
        }
        Ok(())
    }
}

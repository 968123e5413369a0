use serde::{Deserialize, Serialize};
use std::fmt;

/// Name suffixes that mark a monotonically increasing series.
pub const COUNTER_SUFFIXES: &[&str] = &["_total", "_count"];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum QueryCategory {
    Counter,
    Gauge,
}

impl QueryCategory {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Counter => "counter",
            Self::Gauge => "gauge",
        }
    }
}

impl fmt::Display for QueryCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Classify a metric by suffix. Anything that is not recognisably a counter,
/// including the empty string, is a gauge.
pub fn classify(metric_name: &str) -> QueryCategory {
    if COUNTER_SUFFIXES
        .iter()
        .any(|suffix| metric_name.ends_with(suffix))
    {
        QueryCategory::Counter
    } else {
        QueryCategory::Gauge
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn counter_suffixes_classify_as_counter() {
        assert_eq!(classify("http_requests_total"), QueryCategory::Counter);
        assert_eq!(classify("queue_count"), QueryCategory::Counter);
        assert_eq!(
            classify("http_request_duration_seconds_count"),
            QueryCategory::Counter
        );
    }

    #[test]
    fn everything_else_is_a_gauge() {
        assert_eq!(classify("up"), QueryCategory::Gauge);
        assert_eq!(classify("cpu_usage"), QueryCategory::Gauge);
        assert_eq!(classify("total_bytes"), QueryCategory::Gauge);
        assert_eq!(classify("_totals"), QueryCategory::Gauge);
        assert_eq!(classify(""), QueryCategory::Gauge);
        assert_eq!(classify("{weird name}"), QueryCategory::Gauge);
    }

    #[test]
    fn suffix_match_is_case_sensitive() {
        assert_eq!(classify("requests_TOTAL"), QueryCategory::Gauge);
    }

    #[test]
    fn category_serializes_snake_case() {
        assert_eq!(
            serde_json::to_string(&QueryCategory::Counter).unwrap(),
            "\"counter\""
        );
    }
}

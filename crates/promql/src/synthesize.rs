use crate::classify::{classify, QueryCategory};

/// Lookback window for rate queries. Not configurable.
pub const RATE_WINDOW: &str = "5m";

/// Build the expression for an already classified metric.
pub fn synthesize_for(metric_name: &str, category: QueryCategory) -> String {
    match category {
        QueryCategory::Counter => format!("rate({metric_name}[{RATE_WINDOW}])"),
        QueryCategory::Gauge => metric_name.to_string(),
    }
}

/// Classify and build in one step.
pub fn synthesize(metric_name: &str) -> String {
    synthesize_for(metric_name, classify(metric_name))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn counters_get_a_five_minute_rate() {
        assert_eq!(
            synthesize("http_requests_total"),
            "rate(http_requests_total[5m])"
        );
        assert_eq!(synthesize("queue_count"), "rate(queue_count[5m])");
    }

    #[test]
    fn gauges_pass_through() {
        assert_eq!(synthesize("cpu_usage"), "cpu_usage");
        assert_eq!(synthesize(""), "");
    }

    #[test]
    fn explicit_category_wins_over_the_name() {
        assert_eq!(
            synthesize_for("cpu_usage", QueryCategory::Counter),
            "rate(cpu_usage[5m])"
        );
        assert_eq!(
            synthesize_for("http_requests_total", QueryCategory::Gauge),
            "http_requests_total"
        );
    }

    #[test]
    fn synthesis_is_repeatable() {
        let first = synthesize("http_requests_total");
        for _ in 0..3 {
            assert_eq!(synthesize("http_requests_total"), first);
        }
    }
}

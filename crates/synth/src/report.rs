use promdash_promql::QueryCategory;
use promdash_protocol::{SaveConfirmation, ToolFailure};
use serde::Serialize;
use std::fmt;

/// Classification preview for a metric, without any I/O.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct QueryPlan {
    pub metric: String,
    pub category: QueryCategory,
    pub expression: String,
}

impl fmt::Display for QueryPlan {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Metric: {}\nType: {}\nPromQL: {}",
            self.metric, self.category, self.expression
        )
    }
}

/// Outcome of creating a dashboard for an observed metric.
///
/// All three facts are always present; a failed save is carried in `store`
/// rather than returned as an error.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CreateReport {
    pub metric: String,
    pub title: String,
    pub expression: String,
    pub store: Result<SaveConfirmation, ToolFailure>,
}

impl CreateReport {
    pub fn is_success(&self) -> bool {
        self.store.is_ok()
    }
}

impl fmt::Display for CreateReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Metric found: {}", self.metric)?;
        writeln!(f, "PromQL used: {}", self.expression)?;
        match &self.store {
            Ok(_) => write!(
                f,
                "Result: Dashboard '{}' created with PromQL: {}",
                self.title, self.expression
            ),
            Err(failure) => write!(f, "Result: {failure}"),
        }
    }
}

/// Outcome of upserting a dashboard under an explicit name.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NamedDashboardReport {
    pub title: String,
    pub expression: String,
    pub confirmation: SaveConfirmation,
}

impl fmt::Display for NamedDashboardReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Dashboard '{}' created with PromQL: {}",
            self.title, self.expression
        )
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UpdateReport {
    pub uid: String,
    pub title: String,
    pub panel_id: u64,
    pub panel_count: usize,
    pub confirmation: SaveConfirmation,
}

impl fmt::Display for UpdateReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Dashboard '{}' updated successfully with new panel! (panel id {}, {} panels total)",
            self.title, self.panel_id, self.panel_count
        )
    }
}

use promdash_grafana::DashboardStore;
use promdash_metrics_source::{MetricMatches, MetricsSource};
use promdash_promql::{classify, synthesize_for};
use promdash_protocol::{Dashboard, DashboardRef, ToolFailure};

use crate::composer::{append_panel, compose_panel};
use crate::report::{CreateReport, NamedDashboardReport, QueryPlan, UpdateReport};

/// Used by [`Synthesizer::create_named_dashboard`] when no expression is given.
pub const DEFAULT_NAMED_EXPRESSION: &str =
    r#"100 - (avg by (instance) (irate(node_cpu_seconds_total{mode="idle"}[5m])) * 100)"#;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SynthOptions {
    /// Save updates with `overwrite=false` so the store checks the fetched
    /// version. Off means last writer wins.
    pub optimistic_updates: bool,
}

pub fn dashboard_title_for(metric: &str) -> String {
    format!("Auto Dashboard: {metric}")
}

/// Runs the metric → expression → panel → store pipeline.
///
/// Every operation executes its steps strictly in order and holds no state
/// between calls.
pub struct Synthesizer<S, M> {
    store: S,
    source: M,
    options: SynthOptions,
}

impl<S, M> Synthesizer<S, M>
where
    S: DashboardStore,
    M: MetricsSource,
{
    pub fn new(store: S, source: M, options: SynthOptions) -> Self {
        Self {
            store,
            source,
            options,
        }
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    pub fn source(&self) -> &M {
        &self.source
    }

    pub fn plan(metric: &str) -> QueryPlan {
        let category = classify(metric);
        QueryPlan {
            metric: metric.to_string(),
            category,
            expression: synthesize_for(metric, category),
        }
    }

    pub async fn fetch_exposition(&self) -> Result<String, ToolFailure> {
        self.source.fetch_exposition().await.map_err(Into::into)
    }

    pub async fn search_metric(&self, metric: &str) -> Result<MetricMatches, ToolFailure> {
        self.source.search_metric(metric).await.map_err(Into::into)
    }

    /// Create (or replace) `Auto Dashboard: <metric>` with one panel.
    ///
    /// The metric must be visible in the exposition first; otherwise nothing
    /// is classified and nothing is written.
    pub async fn create_for_metric(&self, metric: &str) -> Result<CreateReport, ToolFailure> {
        let matches = self.search_metric(metric).await?;
        if matches.is_empty() {
            log::info!("synth: metric {metric:?} not exposed, skipping dashboard creation");
            return Err(ToolFailure::not_found(format!(
                "Metric '{metric}' not found in Prometheus."
            )));
        }

        let plan = Self::plan(metric);
        let title = dashboard_title_for(metric);
        log::info!(
            "synth: {metric} classified as {}, expression {}",
            plan.category,
            plan.expression
        );

        let panel = compose_panel(&[], &format!("Auto: {title}"), &plan.expression);
        let dashboard = Dashboard::new(title.clone(), vec![panel]);
        let store = self
            .store
            .create_or_overwrite(&dashboard, true)
            .await
            .map_err(ToolFailure::from);
        if let Err(failure) = &store {
            log::warn!("synth: creating {title:?} failed: {failure}");
        }

        Ok(CreateReport {
            metric: metric.to_string(),
            title,
            expression: plan.expression,
            store,
        })
    }

    /// Upsert a dashboard titled `name` with a single panel.
    pub async fn create_named_dashboard(
        &self,
        name: &str,
        expression: Option<&str>,
    ) -> Result<NamedDashboardReport, ToolFailure> {
        let expression = expression
            .map(str::trim)
            .filter(|e| !e.is_empty())
            .unwrap_or(DEFAULT_NAMED_EXPRESSION);
        let panel = compose_panel(&[], &format!("Auto: {name}"), expression);
        let dashboard = Dashboard::new(name, vec![panel]);
        let confirmation = self
            .store
            .create_or_overwrite(&dashboard, true)
            .await
            .map_err(|e| ToolFailure::new(e.kind(), format!("Error creating dashboard: {e}")))?;
        log::info!("synth: dashboard {name:?} saved");
        Ok(NamedDashboardReport {
            title: name.to_string(),
            expression: expression.to_string(),
            confirmation,
        })
    }

    /// Retitle the dashboard and append one panel for `expression`.
    ///
    /// `expression` is used verbatim; callers pass an already valid query.
    pub async fn update_dashboard(
        &self,
        uid: &str,
        new_title: &str,
        expression: &str,
    ) -> Result<UpdateReport, ToolFailure> {
        let mut dashboard = self.store.fetch_by_uid(uid).await?;

        dashboard.title = new_title.to_string();
        let panel_title = format!("Updated Panel - {new_title}");
        dashboard.panels = append_panel(&dashboard.panels, &panel_title, expression);
        let panel_count = dashboard.panels.len();
        let panel_id = panel_count as u64;

        let overwrite = !self.options.optimistic_updates;
        let confirmation = self
            .store
            .create_or_overwrite(&dashboard, overwrite)
            .await
            .map_err(|e| ToolFailure::new(e.kind(), format!("Error updating dashboard: {e}")))?;
        log::info!("synth: dashboard {uid} now has {panel_count} panels");

        Ok(UpdateReport {
            uid: uid.to_string(),
            title: new_title.to_string(),
            panel_id,
            panel_count,
            confirmation,
        })
    }

    pub async fn lookup_dashboard(&self, name: &str) -> Result<DashboardRef, ToolFailure> {
        self.store.find_by_name(name).await.map_err(Into::into)
    }
}

//! Panel layout and identity for appended panels.
//!
//! Panels stack vertically in insertion order: the n-th appended panel sits at
//! `y = 8 * n` and spans the whole canvas. This assumes every earlier panel is
//! exactly [`PANEL_HEIGHT`] tall; a taller hand-made panel will overlap the
//! next append. Ids are `existing.len() + 1` and are not checked against the
//! ids already present, so removing a panel and appending again can reuse an
//! id.

use promdash_protocol::{GridPos, Panel, Target};
use serde_json::Map;

pub const PANEL_HEIGHT: u32 = 8;
pub const CANVAS_WIDTH: u32 = 24;
pub const PANEL_TYPE: &str = "timeseries";
/// Series label: one line per scrape instance.
pub const LEGEND_FORMAT: &str = "{{instance}}";

pub fn compose_panel(existing: &[Panel], title: &str, expr: &str) -> Panel {
    let count = existing.len();
    Panel {
        id: Some(count as u64 + 1),
        title: Some(title.to_string()),
        panel_type: Some(PANEL_TYPE.to_string()),
        grid_pos: Some(GridPos::new(
            0,
            PANEL_HEIGHT.saturating_mul(count as u32),
            CANVAS_WIDTH,
            PANEL_HEIGHT,
        )),
        targets: Some(vec![Target {
            expr: Some(expr.to_string()),
            legend_format: Some(LEGEND_FORMAT.to_string()),
            extra: Map::new(),
        }]),
        extra: Map::new(),
    }
}

/// Copy of `existing` with one composed panel at the end.
pub fn append_panel(existing: &[Panel], title: &str, expr: &str) -> Vec<Panel> {
    let mut panels = Vec::with_capacity(existing.len() + 1);
    panels.extend_from_slice(existing);
    panels.push(compose_panel(existing, title, expr));
    panels
}

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Dashboard schema version written on newly created documents.
pub const DASHBOARD_SCHEMA_VERSION: u32 = 36;

/// A Grafana dashboard document.
///
/// Only the fields the pipeline reads or writes are typed; everything else the
/// store returned is carried in `extra` so a fetch-modify-write cycle does not
/// drop data.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Dashboard {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<u64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub uid: Option<String>,
    #[serde(default)]
    pub title: String,
    #[serde(
        rename = "schemaVersion",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub schema_version: Option<u32>,
    /// Owned by the store. Never set on creation.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub version: Option<u64>,
    #[serde(default)]
    pub panels: Vec<Panel>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl Dashboard {
    /// A fresh document with no store identity, ready for an upsert.
    pub fn new(title: impl Into<String>, panels: Vec<Panel>) -> Self {
        Self {
            id: None,
            uid: None,
            title: title.into(),
            schema_version: Some(DASHBOARD_SCHEMA_VERSION),
            version: None,
            panels,
            extra: Map::new(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Panel {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<u64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(rename = "type", default, skip_serializing_if = "Option::is_none")]
    pub panel_type: Option<String>,
    #[serde(rename = "gridPos", default, skip_serializing_if = "Option::is_none")]
    pub grid_pos: Option<GridPos>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub targets: Option<Vec<Target>>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// Panel placement in Grafana grid units (the canvas is 24 units wide).
///
/// Stored panels may carry partial positions or extra keys such as `static`;
/// both are kept as-is.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct GridPos {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub x: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub y: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub w: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub h: Option<u32>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl GridPos {
    pub fn new(x: u32, y: u32, w: u32, h: u32) -> Self {
        Self {
            x: Some(x),
            y: Some(y),
            w: Some(w),
            h: Some(h),
            extra: Map::new(),
        }
    }
}

/// One query binding of a panel.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Target {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub expr: Option<String>,
    #[serde(
        rename = "legendFormat",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub legend_format: Option<String>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// A search hit from the store: enough to address a dashboard later.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DashboardRef {
    pub uid: String,
    pub title: String,
}

/// What the store reported after a successful save. Every field is optional
/// because the response body is parsed best-effort.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SaveConfirmation {
    #[serde(default)]
    pub uid: Option<String>,
    #[serde(default)]
    pub url: Option<String>,
    #[serde(default)]
    pub status: Option<String>,
    #[serde(default)]
    pub version: Option<u64>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use serde_json::json;

    #[test]
    fn new_dashboard_has_no_store_identity() {
        let doc = Dashboard::new("Auto Dashboard: up", Vec::new());
        let value = serde_json::to_value(&doc).unwrap();
        assert_eq!(
            value,
            json!({ "title": "Auto Dashboard: up", "schemaVersion": 36, "panels": [] })
        );
    }

    #[test]
    fn unknown_fields_survive_a_round_trip() {
        let raw = json!({
            "id": 12,
            "uid": "abc",
            "title": "Prod",
            "schemaVersion": 39,
            "version": 7,
            "time": { "from": "now-6h", "to": "now" },
            "panels": [
                {
                    "id": 1,
                    "type": "stat",
                    "title": "Uptime",
                    "gridPos": { "x": 0, "y": 0, "w": 12, "h": 4 },
                    "options": { "colorMode": "value" },
                    "targets": [
                        { "expr": "up", "refId": "A", "datasource": { "uid": "prom" } }
                    ]
                },
                { "type": "row", "collapsed": false }
            ]
        });

        let doc: Dashboard = serde_json::from_value(raw.clone()).unwrap();
        assert_eq!(doc.panels.len(), 2);
        assert_eq!(doc.panels[1].id, None);
        assert_eq!(doc.version, Some(7));
        assert_eq!(serde_json::to_value(&doc).unwrap(), raw);
    }

    #[test]
    fn grid_positions_keep_foreign_keys_and_partial_shapes() {
        let raw = json!({
            "title": "Ops",
            "panels": [
                {
                    "id": 1,
                    "gridPos": { "h": 4, "static": true, "w": 12, "x": 0, "y": 0 }
                },
                { "id": 2, "gridPos": { "x": 0, "y": 4, "w": 12 } }
            ]
        });

        let doc: Dashboard = serde_json::from_value(raw.clone()).unwrap();
        let first = doc.panels[0].grid_pos.as_ref().unwrap();
        assert_eq!(first.extra.get("static"), Some(&json!(true)));
        assert_eq!(doc.panels[1].grid_pos.as_ref().unwrap().h, None);
        assert_eq!(serde_json::to_value(&doc).unwrap(), raw);
    }

    #[test]
    fn confirmation_tolerates_partial_bodies() {
        let confirmation: SaveConfirmation =
            serde_json::from_value(json!({ "status": "success", "slug": "prod" })).unwrap();
        assert_eq!(confirmation.status.as_deref(), Some("success"));
        assert_eq!(confirmation.uid, None);
    }
}

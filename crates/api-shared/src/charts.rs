//! Chart definitions in the shape plotly.js expects.
//!
//! A [`Graph`] serialises to `{"data": [...], "layout": {...}}`, which the landing page hands
//! straight to `Plotly.newPlot`.

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// One chart: a list of bar traces plus its layout.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct Graph {
    pub data: Vec<BarTrace>,
    pub layout: Layout,
}

/// A single bar series.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct BarTrace {
    /// Always `"bar"`.
    #[serde(rename = "type")]
    pub kind: String,
    pub x: Vec<String>,
    pub y: Vec<i64>,
    /// Legend entry; only set on grouped charts.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
}

impl BarTrace {
    pub fn new(x: Vec<String>, y: Vec<i64>) -> Self {
        Self {
            kind: "bar".into(),
            x,
            y,
            name: None,
        }
    }

    pub fn named(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct Layout {
    pub title: String,
    pub xaxis: Axis,
    pub yaxis: Axis,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub barmode: Option<BarMode>,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct Axis {
    pub title: String,
}

impl Axis {
    pub fn titled(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum BarMode {
    Group,
}

/// Landing page charts plus the element ids they bind to (`graph-0`, `graph-1`, ...).
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct GraphsRes {
    pub ids: Vec<String>,
    pub graphs: Vec<Graph>,
}

impl GraphsRes {
    pub fn new(graphs: Vec<Graph>) -> Self {
        let ids = (0..graphs.len()).map(|i| format!("graph-{i}")).collect();
        Self { ids, graphs }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bar_trace_serialises_with_plotly_type_key() {
        let trace = BarTrace::new(vec!["news".into()], vec![3]);
        let json = serde_json::to_value(&trace).unwrap();
        assert_eq!(json["type"], "bar");
        assert!(json.get("name").is_none());

        let named = serde_json::to_value(trace.named("food")).unwrap();
        assert_eq!(named["name"], "food");
    }

    #[test]
    fn layout_omits_barmode_unless_set() {
        let mut layout = Layout {
            title: "t".into(),
            xaxis: Axis::titled("Genre"),
            yaxis: Axis::titled("Count"),
            barmode: None,
        };
        let json = serde_json::to_value(&layout).unwrap();
        assert!(json.get("barmode").is_none());

        layout.barmode = Some(BarMode::Group);
        let json = serde_json::to_value(&layout).unwrap();
        assert_eq!(json["barmode"], "group");
        assert_eq!(json["xaxis"]["title"], "Genre");
    }

    #[test]
    fn graph_ids_follow_graph_order() {
        let layout = Layout {
            title: "t".into(),
            xaxis: Axis::titled("x"),
            yaxis: Axis::titled("y"),
            barmode: None,
        };
        let graph = Graph {
            data: vec![],
            layout,
        };
        let res = GraphsRes::new(vec![graph.clone(), graph]);
        assert_eq!(res.ids, vec!["graph-0", "graph-1"]);
    }
}

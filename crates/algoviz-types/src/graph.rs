//! Graph input model and the graph snapshot recorded in visualization steps.

use std::collections::BTreeMap;
use std::fmt;

use serde::{Deserialize, Deserializer, Serialize, Serializer};
use ts_rs::TS;

use crate::element::Element;

// ---------------------------------------------------------------------------
// Input model
// ---------------------------------------------------------------------------

/// Directedness of a graph.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, TS)]
#[serde(rename_all = "snake_case")]
#[ts(export, export_to = "bindings/")]
pub enum GraphKind {
    /// Edges run from `from` to `to` only.
    #[default]
    Directed,
    /// Every edge is traversable in both directions.
    Undirected,
}

impl GraphKind {
    /// Parses a graph type name, ignoring case and surrounding whitespace.
    ///
    /// An empty name selects [`GraphKind::Directed`].
    pub fn parse(name: &str) -> Option<Self> {
        match name.trim().to_ascii_lowercase().as_str() {
            "" | "directed" => Some(Self::Directed),
            "undirected" => Some(Self::Undirected),
            _ => None,
        }
    }
}

impl<'de> Deserialize<'de> for GraphKind {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = Option::<String>::deserialize(deserializer)?.unwrap_or_default();
        Self::parse(&raw).ok_or_else(|| {
            serde::de::Error::custom(format!(
                "invalid graph type: {raw}, supported types: directed, undirected"
            ))
        })
    }
}

impl fmt::Display for GraphKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Directed => f.write_str("directed"),
            Self::Undirected => f.write_str("undirected"),
        }
    }
}

/// A vertex of an input graph.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export, export_to = "bindings/")]
pub struct GraphNode {
    /// Unique node identifier. Filled with `node_{index}` when blank.
    #[serde(default)]
    pub id: String,
    /// Display label. Filled with the id when blank.
    #[serde(default)]
    pub label: String,
    /// Payload value. Filled with the node's position when absent.
    #[serde(default)]
    pub value: Option<Element>,
    /// Layout x coordinate.
    #[serde(default)]
    pub x: f64,
    /// Layout y coordinate.
    #[serde(default)]
    pub y: f64,
}

impl GraphNode {
    /// Creates a node with the given id and label at the origin.
    pub fn new(id: impl Into<String>, label: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            label: label.into(),
            value: None,
            x: 0.0,
            y: 0.0,
        }
    }
}

/// An edge of an input graph.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export, export_to = "bindings/")]
pub struct GraphEdge {
    /// Source node id.
    #[serde(default)]
    pub from: String,
    /// Target node id.
    #[serde(default)]
    pub to: String,
    /// Edge weight. Absent, null, blank or non-numeric weights become `1`.
    #[serde(default = "default_weight", deserialize_with = "lenient_weight")]
    pub weight: f64,
    /// Display label. Filled with the formatted weight when blank.
    #[serde(default)]
    pub label: String,
}

impl GraphEdge {
    /// Creates an unlabeled edge.
    pub fn new(from: impl Into<String>, to: impl Into<String>, weight: f64) -> Self {
        Self {
            from: from.into(),
            to: to.into(),
            weight,
            label: String::new(),
        }
    }
}

const fn default_weight() -> f64 {
    1.0
}

fn lenient_weight<'de, D: Deserializer<'de>>(deserializer: D) -> Result<f64, D::Error> {
    let raw = serde_json::Value::deserialize(deserializer)?;
    let weight = match raw {
        serde_json::Value::Number(n) => n.as_f64().unwrap_or_else(default_weight),
        serde_json::Value::String(s) => s.trim().parse().unwrap_or_else(|_| default_weight()),
        _ => default_weight(),
    };
    Ok(weight)
}

/// A graph supplied as algorithm input.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, TS)]
#[ts(export, export_to = "bindings/")]
pub struct GraphData {
    /// Vertices in declaration order.
    #[serde(default)]
    pub nodes: Vec<GraphNode>,
    /// Edges in declaration order.
    #[serde(default)]
    pub edges: Vec<GraphEdge>,
    /// Directedness. Defaults to directed.
    #[serde(default, rename = "type")]
    pub kind: GraphKind,
}

// ---------------------------------------------------------------------------
// Step snapshots
// ---------------------------------------------------------------------------

/// A tentative or final path length.
///
/// Serialized as a JSON number, or the string `"Infinity"` for unreachable
/// nodes.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Distance {
    /// A reachable node at the given cost.
    Finite(f64),
    /// No path is known.
    Unreachable,
}

impl Distance {
    /// The finite cost, if any.
    pub const fn finite(self) -> Option<f64> {
        match self {
            Self::Finite(v) => Some(v),
            Self::Unreachable => None,
        }
    }
}

impl Serialize for Distance {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            Self::Finite(v) => serializer.serialize_f64(*v),
            Self::Unreachable => serializer.serialize_str("Infinity"),
        }
    }
}

impl<'de> Deserialize<'de> for Distance {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        match serde_json::Value::deserialize(deserializer)? {
            serde_json::Value::Number(n) => n
                .as_f64()
                .map(Self::Finite)
                .ok_or_else(|| serde::de::Error::custom("distance out of range")),
            serde_json::Value::String(s) if s == "Infinity" => Ok(Self::Unreachable),
            other => Err(serde::de::Error::custom(format!(
                "expected a number or \"Infinity\", got {other}"
            ))),
        }
    }
}

/// An edge chosen by an algorithm, such as a spanning tree member.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export, export_to = "bindings/")]
pub struct WeightedEdge {
    /// Source node id.
    pub from: String,
    /// Target node id.
    pub to: String,
    /// Edge weight.
    pub weight: f64,
    /// Edge label carried over from the input.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[ts(optional)]
    pub label: Option<String>,
}

/// Graph state captured by a visualization step.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export, export_to = "bindings/")]
pub struct GraphState {
    /// Node ids finalized so far, in visit order.
    pub visited: Vec<String>,
    /// Node ids waiting in the queue, stack or heap.
    pub frontier: Vec<String>,
    /// Current distance labels, for shortest-path algorithms.
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    #[ts(type = "Record<string, number | \"Infinity\">")]
    pub distances: BTreeMap<String, Distance>,
    /// Edges selected so far, for spanning tree algorithms.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub selected_edges: Vec<WeightedEdge>,
}

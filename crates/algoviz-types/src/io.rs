//! Algorithm inputs and the typed outputs each family produces.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::element::Element;
use crate::graph::{Distance, GraphData, WeightedEdge};

/// Data an algorithm is executed against.
///
/// Serialized untagged: a JSON array is a sequence, a JSON object a graph.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[serde(untagged)]
#[ts(export, export_to = "bindings/")]
pub enum AlgorithmInput {
    /// Elements to sort or search.
    Sequence(Vec<Element>),
    /// A graph to process.
    Graph(GraphData),
}

impl AlgorithmInput {
    /// Short name of the input shape, for error messages.
    pub const fn shape_name(&self) -> &'static str {
        match self {
            Self::Sequence(_) => "sequence",
            Self::Graph(_) => "graph",
        }
    }
}

/// Result of a search.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export, export_to = "bindings/")]
pub struct SearchOutcome {
    /// Position of the match, or `-1`.
    pub index: i64,
    /// Whether the target was found.
    pub found: bool,
    /// The value searched for.
    pub target: Element,
}

impl SearchOutcome {
    /// Builds the outcome from an optional match position.
    pub fn new(position: Option<usize>, target: Element) -> Self {
        let index = position.and_then(|p| i64::try_from(p).ok()).unwrap_or(-1);
        Self {
            index,
            found: position.is_some(),
            target,
        }
    }
}

/// Result of a graph traversal.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export, export_to = "bindings/")]
pub struct TraversalResult {
    /// Node ids in visit order.
    pub order: Vec<String>,
    /// Node the traversal started from.
    pub start_node: String,
    /// Number of nodes in the graph.
    pub total_nodes: usize,
}

/// Distance and route to one destination.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export, export_to = "bindings/")]
pub struct PathInfo {
    /// Total path cost.
    #[ts(type = "number | \"Infinity\"")]
    pub distance: Distance,
    /// Node ids from the start to the destination. Empty when unreachable.
    pub path: Vec<String>,
}

/// Result of a single-source shortest path computation.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export, export_to = "bindings/")]
pub struct ShortestPathResult {
    /// Final distance per node id.
    #[ts(type = "Record<string, number | \"Infinity\">")]
    pub distances: BTreeMap<String, Distance>,
    /// Route per node id.
    pub paths: BTreeMap<String, PathInfo>,
    /// Source node id.
    pub start_node: String,
}

/// Result of a minimum spanning tree computation.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export, export_to = "bindings/")]
pub struct SpanningTreeResult {
    /// Selected edges in selection order.
    pub mst_edges: Vec<WeightedEdge>,
    /// Sum of selected weights.
    pub total_weight: f64,
    /// Number of selected edges.
    pub edge_count: usize,
    /// Number of nodes in the graph.
    pub node_count: usize,
    /// Root the tree was grown from, when the algorithm has one.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[ts(optional)]
    pub start_node: Option<String>,
    /// Whether the tree spans every node.
    pub is_connected: bool,
    /// Explanation when the graph is disconnected.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[ts(optional)]
    pub message: Option<String>,
}

/// Result of a topological ordering.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export, export_to = "bindings/")]
pub struct TopologicalResult {
    /// Node ids in dependency order. Partial when a cycle exists.
    pub topological_order: Vec<String>,
    /// Whether the graph is acyclic.
    #[serde(rename = "isDAG")]
    pub is_dag: bool,
    /// Nodes emitted before the algorithm stopped.
    pub processed_count: usize,
    /// Number of nodes in the graph.
    pub total_nodes: usize,
    /// Whether a cycle was detected.
    pub has_cycle: bool,
    /// Nodes on or behind a cycle.
    pub cycle_nodes: Vec<String>,
    /// Human-readable summary.
    pub message: String,
}

/// The output of an algorithm run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[serde(untagged)]
#[ts(export, export_to = "bindings/")]
pub enum AlgorithmOutput {
    /// A sorted copy of the input sequence.
    Sorted(Vec<Element>),
    /// Search result.
    Search(SearchOutcome),
    /// Traversal order.
    Traversal(TraversalResult),
    /// Shortest path tree.
    ShortestPaths(ShortestPathResult),
    /// Minimum spanning tree.
    SpanningTree(SpanningTreeResult),
    /// Topological order.
    Topological(TopologicalResult),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn arrays_become_sequences_and_objects_become_graphs() {
        let seq: Option<AlgorithmInput> = serde_json::from_str("[3, 1, 2]").ok();
        assert!(matches!(seq, Some(AlgorithmInput::Sequence(v)) if v.len() == 3));

        let graph: Option<AlgorithmInput> =
            serde_json::from_str(r#"{"nodes": [{"id": "A"}], "edges": []}"#).ok();
        assert!(matches!(graph, Some(AlgorithmInput::Graph(g)) if g.nodes.len() == 1));
    }

    #[test]
    fn missing_search_result_uses_negative_index() {
        let outcome = SearchOutcome::new(None, Element::Int(9));
        assert_eq!(outcome.index, -1);
        assert!(!outcome.found);
    }
}

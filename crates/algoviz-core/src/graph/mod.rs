//! Graph algorithms and the normalization they share.
//!
//! Every graph algorithm receives a graph that went through [`normalize`],
//! then builds an [`IndexedGraph`] over it for the run.

use std::collections::{BTreeMap, HashSet};

use algoviz_types::{GraphData, GraphKind, GraphState, StepData};

use crate::algorithm::{Parameters, str_param};
use crate::error::AlgorithmError;
use crate::tracker::{StepHandle, StepTracker};

mod bfs;
mod dfs;
mod dijkstra;
mod kruskal;
mod prim;
mod topological;

pub use bfs::BreadthFirstSearch;
pub use dfs::{DepthFirstSearch, MAX_DFS_NODES, MAX_RECURSION_DEPTH};
pub use dijkstra::Dijkstra;
pub use kruskal::Kruskal;
pub use prim::Prim;
pub use topological::TopologicalSort;

/// Fills defaults and rejects structurally broken graphs.
///
/// Node ids and labels are trimmed. A blank id becomes `node_{index}`, a
/// blank label becomes the id and a missing value becomes the node's index.
/// Edge endpoints must name existing nodes, and each edge may appear once
/// (in either direction for undirected graphs). A blank edge label becomes
/// the formatted weight.
pub fn normalize(mut graph: GraphData) -> Result<GraphData, AlgorithmError> {
    if graph.nodes.is_empty() {
        return Err(AlgorithmError::malformed("graph has no nodes"));
    }

    let mut ids = HashSet::with_capacity(graph.nodes.len());
    for (i, node) in graph.nodes.iter_mut().enumerate() {
        let id = node.id.trim();
        node.id = if id.is_empty() {
            format!("node_{i}")
        } else {
            id.to_owned()
        };
        if !ids.insert(node.id.clone()) {
            return Err(AlgorithmError::malformed(format!(
                "duplicate node id {}",
                node.id
            )));
        }
        let label = node.label.trim();
        node.label = if label.is_empty() {
            node.id.clone()
        } else {
            label.to_owned()
        };
        if node.value.is_none() {
            node.value = Some(i64::try_from(i).unwrap_or(i64::MAX).into());
        }
    }

    let mut seen = HashSet::with_capacity(graph.edges.len());
    for (i, edge) in graph.edges.iter_mut().enumerate() {
        edge.from = edge.from.trim().to_owned();
        edge.to = edge.to.trim().to_owned();
        if edge.from.is_empty() {
            return Err(AlgorithmError::malformed(format!(
                "edge {i}: source id is empty"
            )));
        }
        if edge.to.is_empty() {
            return Err(AlgorithmError::malformed(format!(
                "edge {i}: target id is empty"
            )));
        }
        for endpoint in [&edge.from, &edge.to] {
            if !ids.contains(endpoint) {
                return Err(AlgorithmError::malformed(format!(
                    "edge {i}: node {endpoint} does not exist"
                )));
            }
        }
        let key = match graph.kind {
            GraphKind::Undirected if edge.to < edge.from => format!("{}->{}", edge.to, edge.from),
            _ => format!("{}->{}", edge.from, edge.to),
        };
        if !seen.insert(key) {
            return Err(AlgorithmError::malformed(format!(
                "edge {i}: duplicate edge {} -> {}",
                edge.from, edge.to
            )));
        }
        if edge.label.trim().is_empty() {
            edge.label = format!("{}", edge.weight);
        }
    }

    Ok(graph)
}

/// One outgoing entry of an adjacency list.
#[derive(Debug, Clone, Copy)]
pub(crate) struct Neighbor {
    /// Target node index.
    pub(crate) to: usize,
    /// Edge weight.
    pub(crate) weight: f64,
    /// Position of the edge in the input edge list.
    pub(crate) edge: usize,
}

/// Index-based view of a normalized graph.
pub(crate) struct IndexedGraph<'g> {
    graph: &'g GraphData,
    index: BTreeMap<&'g str, usize>,
    adjacency: Vec<Vec<Neighbor>>,
}

impl<'g> IndexedGraph<'g> {
    /// Builds the id map and adjacency lists. Undirected edges are listed at
    /// both endpoints.
    pub(crate) fn new(graph: &'g GraphData) -> Self {
        let index: BTreeMap<&str, usize> = graph
            .nodes
            .iter()
            .enumerate()
            .map(|(i, node)| (node.id.as_str(), i))
            .collect();
        let mut adjacency = vec![Vec::new(); graph.nodes.len()];
        for (edge_index, edge) in graph.edges.iter().enumerate() {
            let (Some(&from), Some(&to)) =
                (index.get(edge.from.as_str()), index.get(edge.to.as_str()))
            else {
                continue;
            };
            if let Some(list) = adjacency.get_mut(from) {
                list.push(Neighbor {
                    to,
                    weight: edge.weight,
                    edge: edge_index,
                });
            }
            if graph.kind == GraphKind::Undirected && from != to {
                if let Some(list) = adjacency.get_mut(to) {
                    list.push(Neighbor {
                        to: from,
                        weight: edge.weight,
                        edge: edge_index,
                    });
                }
            }
        }
        Self {
            graph,
            index,
            adjacency,
        }
    }

    /// Number of nodes.
    pub(crate) fn len(&self) -> usize {
        self.graph.nodes.len()
    }

    /// Node id at `i`.
    pub(crate) fn id(&self, i: usize) -> &'g str {
        self.graph.nodes.get(i).map_or("", |n| n.id.as_str())
    }

    /// Node label at `i`.
    pub(crate) fn label(&self, i: usize) -> &'g str {
        self.graph.nodes.get(i).map_or("", |n| n.label.as_str())
    }

    /// Index of the node with `id`.
    pub(crate) fn index_of(&self, id: &str) -> Option<usize> {
        self.index.get(id).copied()
    }

    /// Outgoing adjacency of `i` in edge declaration order.
    pub(crate) fn neighbors(&self, i: usize) -> &[Neighbor] {
        self.adjacency.get(i).map_or(&[], Vec::as_slice)
    }

    /// Resolves the `start` parameter, defaulting to the first node.
    pub(crate) fn start(&self, params: &Parameters) -> Result<usize, AlgorithmError> {
        match str_param(params, "start")? {
            None => Ok(0),
            Some(id) => self
                .index_of(id.trim())
                .ok_or_else(|| AlgorithmError::UnknownNode { id: id.to_owned() }),
        }
    }

    /// Owned ids for a list of indices.
    pub(crate) fn ids(&self, indices: impl IntoIterator<Item = usize>) -> Vec<String> {
        indices
            .into_iter()
            .map(|i| self.id(i).to_owned())
            .collect()
    }
}

/// Opens a step carrying a graph state. `state` runs only when the step will
/// be retained.
pub(crate) fn graph_step(
    tracker: &mut StepTracker,
    description: impl Into<String>,
    highlights: Vec<usize>,
    state: impl FnOnce() -> GraphState,
) -> StepHandle {
    let data = if tracker.is_recording() {
        StepData::Graph(state())
    } else {
        StepData::Empty
    };
    tracker.add_step(description, data, highlights)
}

#[cfg(test)]
pub(crate) mod testing {
    use algoviz_types::{GraphData, GraphEdge, GraphKind, GraphNode};

    /// Graph over `ids` with unit or explicit weights.
    pub(crate) fn graph(kind: GraphKind, ids: &[&str], edges: &[(&str, &str, f64)]) -> GraphData {
        GraphData {
            nodes: ids.iter().map(|id| GraphNode::new(*id, *id)).collect(),
            edges: edges
                .iter()
                .map(|(from, to, weight)| GraphEdge::new(*from, *to, *weight))
                .collect(),
            kind,
        }
    }

    /// The weighted sample used by the shortest path and spanning tree tests.
    pub(crate) fn weighted(kind: GraphKind) -> GraphData {
        graph(
            kind,
            &["S", "A", "B", "C", "T"],
            &[
                ("S", "A", 4.0),
                ("S", "B", 2.0),
                ("B", "A", 1.0),
                ("A", "C", 5.0),
                ("B", "C", 8.0),
                ("C", "T", 2.0),
                ("B", "T", 10.0),
            ],
        )
    }

    /// `start` parameter map.
    pub(crate) fn start(id: &str) -> crate::algorithm::Parameters {
        let mut params = crate::algorithm::Parameters::new();
        params.insert("start".to_owned(), id.into());
        params
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use algoviz_types::{Element, GraphEdge, GraphNode};

    #[test]
    fn fills_blank_ids_labels_and_values() {
        let graph = GraphData {
            nodes: vec![GraphNode::new("  ", ""), GraphNode::new(" b ", "")],
            edges: vec![GraphEdge::new("node_0", "b", 2.5)],
            kind: GraphKind::Directed,
        };
        let normalized = normalize(graph);
        assert!(normalized.is_ok());
        let normalized = normalized.unwrap_or_default();
        assert_eq!(normalized.nodes[0].id, "node_0");
        assert_eq!(normalized.nodes[0].label, "node_0");
        assert_eq!(normalized.nodes[1].id, "b");
        assert_eq!(normalized.nodes[1].value, Some(Element::Int(1)));
        assert_eq!(normalized.edges[0].label, "2.5");
    }

    #[test]
    fn rejects_empty_graph() {
        let result = normalize(GraphData::default());
        assert!(matches!(result, Err(AlgorithmError::MalformedGraph { .. })));
    }

    #[test]
    fn rejects_duplicate_node_ids() {
        let graph = testing::graph(GraphKind::Directed, &["a", "a"], &[]);
        assert!(normalize(graph).is_err());
    }

    #[test]
    fn rejects_unknown_endpoint() {
        let graph = testing::graph(GraphKind::Directed, &["a"], &[("a", "z", 1.0)]);
        assert!(normalize(graph).is_err());
    }

    #[test]
    fn rejects_empty_endpoint() {
        let graph = testing::graph(GraphKind::Directed, &["a"], &[(" ", "a", 1.0)]);
        assert!(normalize(graph).is_err());
    }

    #[test]
    fn reverse_edge_is_allowed_only_when_directed() {
        let edges = [("a", "b", 1.0), ("b", "a", 1.0)];
        let directed = testing::graph(GraphKind::Directed, &["a", "b"], &edges);
        assert!(normalize(directed).is_ok());
        let undirected = testing::graph(GraphKind::Undirected, &["a", "b"], &edges);
        assert!(normalize(undirected).is_err());
    }

    #[test]
    fn undirected_adjacency_is_symmetric() {
        let graph = testing::graph(GraphKind::Undirected, &["a", "b"], &[("a", "b", 3.0)]);
        let indexed = IndexedGraph::new(&graph);
        assert_eq!(indexed.neighbors(0).len(), 1);
        assert_eq!(indexed.neighbors(1).len(), 1);
        assert_eq!(indexed.neighbors(1)[0].to, 0);
    }

    #[test]
    fn start_parameter_resolves_or_fails() {
        let graph = testing::graph(GraphKind::Directed, &["a", "b"], &[]);
        let indexed = IndexedGraph::new(&graph);
        assert_eq!(indexed.start(&Parameters::new()).unwrap_or(9), 0);
        assert_eq!(indexed.start(&testing::start("b")).unwrap_or(9), 1);
        assert!(matches!(
            indexed.start(&testing::start("z")),
            Err(AlgorithmError::UnknownNode { .. })
        ));
    }
}

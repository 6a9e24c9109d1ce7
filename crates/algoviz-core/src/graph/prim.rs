use std::cmp::Ordering;
use std::collections::BinaryHeap;

use algoviz_types::{
    AlgorithmInfo, AlgorithmInput, AlgorithmOutput, Category, Complexity, ComplexityBounds,
    Element, GraphData, GraphShape, GraphState, OperationType, ParameterSpec, SpanningTreeResult,
    WeightedEdge,
};

use super::{IndexedGraph, graph_step};
use crate::algorithm::{
    Algorithm, Capability, GraphAlgorithm, Parameters, Profile, describe, run_graph,
    validate_graph,
};
use crate::error::AlgorithmError;
use crate::tracker::StepTracker;

const PROFILE: Profile = Profile {
    id: "graph_prim",
    name: "Prim's Minimum Spanning Tree",
    category: Category::Graph,
    description: "Grows a minimum spanning tree from the start node, always adding \
                  the cheapest edge that reaches a new node.",
    stable: false,
    in_place: false,
    adaptive: false,
};

/// Lazy Prim over an edge heap.
#[derive(Debug, Clone, Copy, Default)]
pub struct Prim;

impl Algorithm for Prim {
    fn id(&self) -> &'static str {
        PROFILE.id
    }

    fn category(&self) -> Category {
        PROFILE.category
    }

    fn info(&self) -> AlgorithmInfo {
        describe(
            &PROFILE,
            &self.complexity(),
            vec![ParameterSpec::optional_string(
                "start",
                "Id of the root node, defaults to the first node",
            )],
        )
    }

    fn complexity(&self) -> Complexity {
        Complexity {
            time_complexity: ComplexityBounds::uniform("O(E log V)"),
            space_complexity: ComplexityBounds::uniform("O(V + E)"),
        }
    }

    fn validate_input(&self, input: &AlgorithmInput) -> Result<(), AlgorithmError> {
        validate_graph(self, input).map(|_| ())
    }

    fn execute(
        &self,
        input: &AlgorithmInput,
        params: &Parameters,
        tracker: &mut StepTracker,
    ) -> Result<AlgorithmOutput, AlgorithmError> {
        run_graph(self, input, params, tracker)
    }

    fn capability(&self) -> Capability<'_> {
        Capability::Graph(self)
    }
}

impl GraphAlgorithm for Prim {
    fn graph_shape(&self) -> GraphShape {
        GraphShape::UndirectedWeighted
    }

    fn check_graph(&self, graph: &GraphData) -> Result<(), AlgorithmError> {
        require_edges(graph)
    }

    fn process_graph(
        &self,
        graph: &GraphData,
        params: &Parameters,
        tracker: &mut StepTracker,
    ) -> Result<AlgorithmOutput, AlgorithmError> {
        let indexed = IndexedGraph::new(graph);
        let start = indexed.start(params)?;
        let n = indexed.len();
        let target_edges = n.saturating_sub(1);

        let mut in_tree = vec![false; n];
        let mut tree_nodes = Vec::new();
        let mut mst: Vec<WeightedEdge> = Vec::new();
        let mut total_weight = 0.0;
        let mut heap = BinaryHeap::new();
        let mut sequence = 0_u64;

        let state = |tree_nodes: &[usize], heap: &BinaryHeap<Candidate>, mst: &[WeightedEdge]| {
            GraphState {
                visited: indexed.ids(tree_nodes.iter().copied()),
                frontier: indexed.ids(heap.iter().map(|c| c.to)),
                selected_edges: mst.to_vec(),
                ..GraphState::default()
            }
        };

        tracker.set_phase("init");
        let mut grow = |node: usize,
                        in_tree: &mut [bool],
                        tree_nodes: &mut Vec<usize>,
                        heap: &mut BinaryHeap<Candidate>| {
            if let Some(flag) = in_tree.get_mut(node) {
                *flag = true;
            }
            tree_nodes.push(node);
            for neighbor in indexed.neighbors(node) {
                if !in_tree.get(neighbor.to).copied().unwrap_or(true) {
                    sequence = sequence.saturating_add(1);
                    heap.push(Candidate {
                        weight: neighbor.weight,
                        sequence,
                        from: node,
                        to: neighbor.to,
                        edge: neighbor.edge,
                    });
                }
            }
        };
        grow(start, &mut in_tree, &mut tree_nodes, &mut heap);
        let step = graph_step(
            tracker,
            format!("start tree at {}", indexed.label(start)),
            vec![start],
            || state(&tree_nodes, &heap, &mst),
        );
        tracker.add_note(step, format!("{} candidate edges", heap.len()));

        while mst.len() < target_edges {
            let Some(candidate) = heap.pop() else {
                break;
            };
            let (from, to) = (candidate.from, candidate.to);
            tracker.set_phase(&format!("tree size {}", tree_nodes.len()));
            if in_tree.get(to).copied().unwrap_or(true) {
                let step = graph_step(
                    tracker,
                    format!(
                        "skip {} - {}: both ends already in tree",
                        indexed.label(from),
                        indexed.label(to)
                    ),
                    vec![from, to],
                    || state(&tree_nodes, &heap, &mst),
                );
                tracker.add_edge_comparison(step, from, to, Ordering::Equal);
                continue;
            }

            let label = graph.edges.get(candidate.edge).map(|e| e.label.clone());
            mst.push(WeightedEdge {
                from: indexed.id(from).to_owned(),
                to: indexed.id(to).to_owned(),
                weight: candidate.weight,
                label,
            });
            total_weight += candidate.weight;
            grow(to, &mut in_tree, &mut tree_nodes, &mut heap);

            let step = graph_step(
                tracker,
                format!(
                    "add edge {} - {} (weight {})",
                    indexed.label(from),
                    indexed.label(to),
                    candidate.weight
                ),
                vec![from, to],
                || state(&tree_nodes, &heap, &mst),
            );
            tracker.add_edge_comparison(step, from, to, Ordering::Less);
            tracker.add_operation(
                step,
                OperationType::Insert,
                vec![from, to],
                vec![Element::Float(candidate.weight)],
                "add to tree",
            );
        }

        let result = spanning_tree(mst, total_weight, n, Some(indexed.id(start).to_owned()));
        tracker.set_phase("done");
        let step = graph_step(tracker, "minimum spanning tree complete", tree_nodes.clone(), || {
            state(&tree_nodes, &heap, &result.mst_edges)
        });
        tracker.add_note(step, format!("total weight {}", result.total_weight));
        if let Some(message) = &result.message {
            tracker.add_note(step, message.clone());
        }

        Ok(AlgorithmOutput::SpanningTree(result))
    }
}

/// Spanning tree algorithms need at least one edge.
pub(crate) fn require_edges(graph: &GraphData) -> Result<(), AlgorithmError> {
    if graph.edges.is_empty() {
        return Err(AlgorithmError::invalid_input("graph has no edges"));
    }
    Ok(())
}

/// Assembles the result, flagging forests that miss nodes.
pub(crate) fn spanning_tree(
    mst_edges: Vec<WeightedEdge>,
    total_weight: f64,
    node_count: usize,
    start_node: Option<String>,
) -> SpanningTreeResult {
    let is_connected = mst_edges.len() == node_count.saturating_sub(1);
    SpanningTreeResult {
        edge_count: mst_edges.len(),
        mst_edges,
        total_weight,
        node_count,
        start_node,
        is_connected,
        message: (!is_connected)
            .then(|| "graph is disconnected, no spanning tree covers every node".to_owned()),
    }
}

/// Heap entry for a tree edge candidate. Lightest first, then oldest.
#[derive(Debug, Clone, Copy)]
struct Candidate {
    weight: f64,
    sequence: u64,
    from: usize,
    to: usize,
    edge: usize,
}

impl Ord for Candidate {
    fn cmp(&self, other: &Self) -> Ordering {
        other
            .weight
            .total_cmp(&self.weight)
            .then_with(|| other.sequence.cmp(&self.sequence))
    }
}

impl PartialOrd for Candidate {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl PartialEq for Candidate {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other).is_eq()
    }
}

impl Eq for Candidate {}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::graph::testing;
    use algoviz_types::GraphKind;

    fn solve(graph: GraphData, params: &Parameters) -> Result<SpanningTreeResult, AlgorithmError> {
        let input = AlgorithmInput::Graph(graph);
        match Prim.execute(&input, params, &mut StepTracker::new())? {
            AlgorithmOutput::SpanningTree(result) => Ok(result),
            _ => Err(AlgorithmError::UnsupportedType),
        }
    }

    #[test]
    fn builds_minimum_tree() {
        let result = solve(testing::weighted(GraphKind::Undirected), &Parameters::new());
        assert!(result.is_ok());
        let result = result.unwrap_or_default();
        assert!((result.total_weight - 10.0).abs() < f64::EPSILON);
        assert_eq!(result.edge_count, 4);
        assert!(result.is_connected);
        assert!(result.message.is_none());
        assert_eq!(result.start_node.as_deref(), Some("S"));
    }

    #[test]
    fn start_node_does_not_change_weight() {
        let result = solve(testing::weighted(GraphKind::Undirected), &testing::start("T"))
            .unwrap_or_default();
        assert!((result.total_weight - 10.0).abs() < f64::EPSILON);
        assert_eq!(result.start_node.as_deref(), Some("T"));
    }

    #[test]
    fn disconnected_graph_reports_forest() {
        let graph = testing::graph(
            GraphKind::Undirected,
            &["a", "b", "c"],
            &[("a", "b", 1.0)],
        );
        let result = solve(graph, &Parameters::new()).unwrap_or_default();
        assert!(!result.is_connected);
        assert!(result.message.is_some());
        assert_eq!(result.edge_count, 1);
    }

    #[test]
    fn directed_graphs_are_rejected() {
        let input = AlgorithmInput::Graph(testing::weighted(GraphKind::Directed));
        assert!(matches!(
            Prim.validate_input(&input),
            Err(AlgorithmError::UnsupportedGraph { .. })
        ));
    }

    #[test]
    fn edgeless_graphs_are_rejected() {
        let input = AlgorithmInput::Graph(testing::graph(GraphKind::Undirected, &["a"], &[]));
        assert!(Prim.validate_input(&input).is_err());
    }
}

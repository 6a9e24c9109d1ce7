use std::cmp::Ordering;

use algoviz_types::{
    AlgorithmInfo, AlgorithmInput, AlgorithmOutput, Category, Complexity, ComplexityBounds,
    Element, GraphData, GraphShape, GraphState, OperationType, WeightedEdge,
};

use super::prim::{require_edges, spanning_tree};
use super::{IndexedGraph, graph_step};
use crate::algorithm::{
    Algorithm, Capability, GraphAlgorithm, Parameters, Profile, describe, run_graph,
    validate_graph,
};
use crate::error::AlgorithmError;
use crate::tracker::StepTracker;

const PROFILE: Profile = Profile {
    id: "graph_kruskal",
    name: "Kruskal's Minimum Spanning Tree",
    category: Category::Graph,
    description: "Adds edges from lightest to heaviest, skipping any edge that \
                  would close a cycle.",
    stable: false,
    in_place: false,
    adaptive: false,
};

/// Edge-sorted spanning tree with a disjoint-set forest.
#[derive(Debug, Clone, Copy, Default)]
pub struct Kruskal;

impl Algorithm for Kruskal {
    fn id(&self) -> &'static str {
        PROFILE.id
    }

    fn category(&self) -> Category {
        PROFILE.category
    }

    fn info(&self) -> AlgorithmInfo {
        describe(&PROFILE, &self.complexity(), Vec::new())
    }

    fn complexity(&self) -> Complexity {
        Complexity {
            time_complexity: ComplexityBounds::uniform("O(E log E)"),
            space_complexity: ComplexityBounds::uniform("O(V)"),
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

impl GraphAlgorithm for Kruskal {
    fn graph_shape(&self) -> GraphShape {
        GraphShape::UndirectedWeighted
    }

    fn check_graph(&self, graph: &GraphData) -> Result<(), AlgorithmError> {
        require_edges(graph)
    }

    fn process_graph(
        &self,
        graph: &GraphData,
        _params: &Parameters,
        tracker: &mut StepTracker,
    ) -> Result<AlgorithmOutput, AlgorithmError> {
        let indexed = IndexedGraph::new(graph);
        let n = indexed.len();
        let target_edges = n.saturating_sub(1);

        let mut edges: Vec<(usize, usize, usize)> = graph
            .edges
            .iter()
            .enumerate()
            .filter_map(|(i, e)| Some((i, indexed.index_of(&e.from)?, indexed.index_of(&e.to)?)))
            .collect();
        edges.sort_by(|a, b| weight_of(graph, a.0).total_cmp(&weight_of(graph, b.0)));

        let mut forest = DisjointSet::new(n);
        let mut mst: Vec<WeightedEdge> = Vec::new();
        let mut total_weight = 0.0;

        let state = |mst: &[WeightedEdge]| GraphState {
            visited: mst
                .iter()
                .flat_map(|e| [e.from.clone(), e.to.clone()])
                .fold(Vec::new(), |mut acc, id| {
                    if !acc.contains(&id) {
                        acc.push(id);
                    }
                    acc
                }),
            selected_edges: mst.to_vec(),
            ..GraphState::default()
        };

        tracker.set_phase("init");
        let step = graph_step(
            tracker,
            format!("sort {} edges by weight", edges.len()),
            Vec::new(),
            || state(&mst),
        );
        tracker.add_note(step, "every node starts in its own set");

        for (edge_index, from, to) in edges {
            if mst.len() >= target_edges {
                break;
            }
            let weight = weight_of(graph, edge_index);
            tracker.set_phase(&format!("edge {} of {}", mst.len().saturating_add(1), target_edges));
            let (root_from, root_to) = (forest.find(from), forest.find(to));
            if root_from == root_to {
                let step = graph_step(
                    tracker,
                    format!(
                        "skip {} - {} (weight {weight}): would form a cycle",
                        indexed.label(from),
                        indexed.label(to)
                    ),
                    vec![from, to],
                    || state(&mst),
                );
                tracker.add_edge_comparison(step, from, to, Ordering::Equal);
                tracker.add_operation(
                    step,
                    OperationType::Delete,
                    vec![from, to],
                    vec![Element::Float(weight)],
                    "skip (cycle)",
                );
                continue;
            }

            forest.union(root_from, root_to);
            mst.push(WeightedEdge {
                from: indexed.id(from).to_owned(),
                to: indexed.id(to).to_owned(),
                weight,
                label: graph.edges.get(edge_index).map(|e| e.label.clone()),
            });
            total_weight += weight;
            let step = graph_step(
                tracker,
                format!(
                    "add edge {} - {} (weight {weight})",
                    indexed.label(from),
                    indexed.label(to)
                ),
                vec![from, to],
                || state(&mst),
            );
            tracker.add_edge_comparison(step, from, to, Ordering::Less);
            tracker.add_operation(
                step,
                OperationType::Insert,
                vec![from, to],
                vec![Element::Float(weight)],
                "add to tree",
            );
        }

        let result = spanning_tree(mst, total_weight, n, None);
        tracker.set_phase("done");
        let step = graph_step(tracker, "minimum spanning tree complete", Vec::new(), || {
            state(&result.mst_edges)
        });
        tracker.add_note(step, format!("total weight {}", result.total_weight));
        if let Some(message) = &result.message {
            tracker.add_note(step, message.clone());
        }

        Ok(AlgorithmOutput::SpanningTree(result))
    }
}

fn weight_of(graph: &GraphData, edge: usize) -> f64 {
    graph.edges.get(edge).map_or(f64::INFINITY, |e| e.weight)
}

/// Union-find with path compression and union by rank.
struct DisjointSet {
    parent: Vec<usize>,
    rank: Vec<u32>,
}

impl DisjointSet {
    fn new(n: usize) -> Self {
        Self {
            parent: (0..n).collect(),
            rank: vec![0; n],
        }
    }

    fn find(&mut self, x: usize) -> usize {
        let mut root = x;
        while let Some(&p) = self.parent.get(root) {
            if p == root {
                break;
            }
            root = p;
        }
        let mut current = x;
        while current != root {
            let Some(slot) = self.parent.get_mut(current) else {
                break;
            };
            current = std::mem::replace(slot, root);
        }
        root
    }

    /// Joins two roots.
    fn union(&mut self, a: usize, b: usize) {
        let rank_a = self.rank.get(a).copied().unwrap_or(0);
        let rank_b = self.rank.get(b).copied().unwrap_or(0);
        let (child, parent) = match rank_a.cmp(&rank_b) {
            Ordering::Less => (a, b),
            Ordering::Greater => (b, a),
            Ordering::Equal => {
                if let Some(r) = self.rank.get_mut(a) {
                    *r = r.saturating_add(1);
                }
                (b, a)
            }
        };
        if let Some(slot) = self.parent.get_mut(child) {
            *slot = parent;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::graph::{Prim, testing};
    use algoviz_types::{GraphKind, SpanningTreeResult};

    fn solve<A: Algorithm>(algorithm: &A, graph: GraphData) -> SpanningTreeResult {
        let input = AlgorithmInput::Graph(graph);
        match algorithm.execute(&input, &Parameters::new(), &mut StepTracker::new()) {
            Ok(AlgorithmOutput::SpanningTree(result)) => result,
            _ => SpanningTreeResult::default(),
        }
    }

    #[test]
    fn agrees_with_prim_on_total_weight() {
        let kruskal = solve(&Kruskal, testing::weighted(GraphKind::Undirected));
        let prim = solve(&Prim, testing::weighted(GraphKind::Undirected));
        assert!((kruskal.total_weight - 10.0).abs() < f64::EPSILON);
        assert!((kruskal.total_weight - prim.total_weight).abs() < f64::EPSILON);
        assert!(kruskal.is_connected);
        assert!(kruskal.start_node.is_none());
    }

    #[test]
    fn lightest_edge_is_taken_first() {
        let result = solve(&Kruskal, testing::weighted(GraphKind::Undirected));
        let first = result.mst_edges.first().map(|e| (e.from.as_str(), e.to.as_str()));
        assert_eq!(first, Some(("B", "A")));
    }

    #[test]
    fn cycle_edges_are_recorded_as_skipped() {
        let mut tracker = StepTracker::new();
        let graph = testing::graph(
            GraphKind::Undirected,
            &["a", "b", "c", "d"],
            &[("a", "b", 1.0), ("b", "c", 1.0), ("a", "c", 2.0), ("c", "d", 3.0)],
        );
        let input = AlgorithmInput::Graph(graph);
        assert!(Kruskal.execute(&input, &Parameters::new(), &mut tracker).is_ok());
        let skipped = tracker
            .steps()
            .iter()
            .flat_map(|s| &s.operations)
            .filter(|op| op.kind == OperationType::Delete)
            .count();
        assert_eq!(skipped, 1);
    }

    #[test]
    fn disconnected_graph_is_flagged() {
        let graph = testing::graph(
            GraphKind::Undirected,
            &["a", "b", "c", "d"],
            &[("a", "b", 1.0), ("c", "d", 1.0)],
        );
        let result = solve(&Kruskal, graph);
        assert!(!result.is_connected);
        assert_eq!(result.edge_count, 2);
    }

    #[test]
    fn find_compresses_paths() {
        let mut set = DisjointSet::new(4);
        set.union(0, 1);
        set.union(2, 3);
        let (r0, r2) = (set.find(0), set.find(2));
        set.union(r0, r2);
        assert_eq!(set.find(1), set.find(3));
    }
}

use std::cmp::Ordering;
use std::collections::VecDeque;

use algoviz_types::{
    AlgorithmInfo, AlgorithmInput, AlgorithmOutput, Category, Complexity, ComplexityBounds,
    GraphData, GraphShape, GraphState, OperationType, ParameterSpec, TraversalResult,
};

use super::{IndexedGraph, graph_step};
use crate::algorithm::{
    Algorithm, Capability, GraphAlgorithm, Parameters, Profile, describe, run_graph,
    validate_graph,
};
use crate::error::AlgorithmError;
use crate::tracker::StepTracker;

const PROFILE: Profile = Profile {
    id: "graph_bfs",
    name: "Breadth-First Search",
    category: Category::Graph,
    description: "Visits nodes level by level from the start node using a queue.",
    stable: true,
    in_place: false,
    adaptive: false,
};

/// Queue-based traversal.
#[derive(Debug, Clone, Copy, Default)]
pub struct BreadthFirstSearch;

impl Algorithm for BreadthFirstSearch {
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
                "Id of the start node, defaults to the first node",
            )],
        )
    }

    fn complexity(&self) -> Complexity {
        Complexity {
            time_complexity: ComplexityBounds::uniform("O(V + E)"),
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

impl GraphAlgorithm for BreadthFirstSearch {
    fn graph_shape(&self) -> GraphShape {
        GraphShape::Both
    }

    fn process_graph(
        &self,
        graph: &GraphData,
        params: &Parameters,
        tracker: &mut StepTracker,
    ) -> Result<AlgorithmOutput, AlgorithmError> {
        let indexed = IndexedGraph::new(graph);
        let start = indexed.start(params)?;
        let mut visited = vec![false; indexed.len()];
        let mut queue = VecDeque::new();
        let mut order = Vec::new();

        let state = |order: &[usize], queue: &VecDeque<usize>| GraphState {
            visited: indexed.ids(order.iter().copied()),
            frontier: indexed.ids(queue.iter().copied()),
            ..GraphState::default()
        };

        tracker.set_phase("init");
        let step = graph_step(
            tracker,
            format!("start BFS from {}", indexed.label(start)),
            vec![start],
            || state(&order, &queue),
        );
        tracker.add_note(step, "nodes are visited in order of distance from the start");

        if let Some(flag) = visited.get_mut(start) {
            *flag = true;
        }
        queue.push_back(start);
        let step = graph_step(
            tracker,
            format!("enqueue start node {}", indexed.label(start)),
            vec![start],
            || state(&order, &queue),
        );
        tracker.add_operation(
            step,
            OperationType::Update,
            vec![start],
            Vec::new(),
            "mark visited and enqueue",
        );

        while let Some(node) = queue.pop_front() {
            order.push(node);
            tracker.set_phase(&format!("visit {}", indexed.label(node)));
            let step = graph_step(
                tracker,
                format!("visit node {}", indexed.label(node)),
                vec![node],
                || state(&order, &queue),
            );
            tracker.add_operation(step, OperationType::Access, vec![node], Vec::new(), "dequeue");

            for neighbor in indexed.neighbors(node) {
                let Some(seen) = visited.get_mut(neighbor.to) else {
                    continue;
                };
                if *seen {
                    continue;
                }
                *seen = true;
                queue.push_back(neighbor.to);
                let step = graph_step(
                    tracker,
                    format!(
                        "discovered {} from {}, enqueue",
                        indexed.label(neighbor.to),
                        indexed.label(node)
                    ),
                    vec![node, neighbor.to],
                    || state(&order, &queue),
                );
                tracker.add_edge_comparison(step, node, neighbor.to, Ordering::Equal);
                tracker.add_operation(
                    step,
                    OperationType::Insert,
                    vec![neighbor.to],
                    Vec::new(),
                    "enqueue",
                );
            }
        }

        tracker.set_phase("done");
        let step = graph_step(tracker, "BFS complete", order.clone(), || {
            state(&order, &queue)
        });
        tracker.add_note(step, format!("visited {} of {} nodes", order.len(), indexed.len()));

        Ok(AlgorithmOutput::Traversal(TraversalResult {
            order: indexed.ids(order),
            start_node: indexed.id(start).to_owned(),
            total_nodes: indexed.len(),
        }))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::graph::testing;
    use algoviz_types::GraphKind;

    fn traverse(graph: GraphData, params: &Parameters) -> Result<TraversalResult, AlgorithmError> {
        let input = AlgorithmInput::Graph(graph);
        match BreadthFirstSearch.execute(&input, params, &mut StepTracker::new())? {
            AlgorithmOutput::Traversal(result) => Ok(result),
            _ => Err(AlgorithmError::UnsupportedType),
        }
    }

    #[test]
    fn visits_level_by_level() {
        let graph = testing::graph(
            GraphKind::Directed,
            &["a", "b", "c", "d", "e"],
            &[("a", "b", 1.0), ("a", "c", 1.0), ("b", "d", 1.0), ("c", "e", 1.0)],
        );
        let result = traverse(graph, &Parameters::new());
        assert!(result.is_ok());
        assert_eq!(result.unwrap_or_default().order, ["a", "b", "c", "d", "e"]);
    }

    #[test]
    fn only_reachable_nodes_are_visited() {
        let graph = testing::graph(
            GraphKind::Directed,
            &["a", "b", "c"],
            &[("b", "a", 1.0), ("b", "c", 1.0)],
        );
        let result = traverse(graph, &testing::start("a")).unwrap_or_default();
        assert_eq!(result.order, ["a"]);
        assert_eq!(result.total_nodes, 3);
    }

    #[test]
    fn undirected_edges_are_followed_both_ways() {
        let graph = testing::graph(
            GraphKind::Undirected,
            &["a", "b", "c"],
            &[("b", "a", 1.0), ("b", "c", 1.0)],
        );
        let result = traverse(graph, &testing::start("a")).unwrap_or_default();
        assert_eq!(result.order, ["a", "b", "c"]);
        assert_eq!(result.start_node, "a");
    }

    #[test]
    fn unknown_start_node_is_rejected() {
        let graph = testing::graph(GraphKind::Directed, &["a"], &[]);
        let result = traverse(graph, &testing::start("missing"));
        assert!(matches!(result, Err(AlgorithmError::UnknownNode { .. })));
    }

    #[test]
    fn array_input_is_rejected() {
        let input = AlgorithmInput::Sequence(Vec::new());
        assert!(BreadthFirstSearch.validate_input(&input).is_err());
    }
}

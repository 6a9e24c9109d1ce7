use std::cmp::Ordering;

use algoviz_types::{
    AlgorithmInfo, AlgorithmInput, AlgorithmOutput, Category, Complexity, ComplexityBounds,
    GraphData, GraphShape, GraphState, OperationType, ParameterSpec, TraversalResult,
};

use super::{IndexedGraph, graph_step};
use crate::algorithm::{
    Algorithm, Capability, GraphAlgorithm, Parameters, Profile, choice_param, describe,
    run_graph, validate_graph,
};
use crate::error::AlgorithmError;
use crate::tracker::StepTracker;

/// Deepest call chain the recursive variant may build.
pub const MAX_RECURSION_DEPTH: usize = 1_000;

/// Largest graph accepted.
pub const MAX_DFS_NODES: usize = 1_000;

const METHODS: &[&str] = &["iterative", "recursive"];

const PROFILE: Profile = Profile {
    id: "dfs",
    name: "Depth-First Search",
    category: Category::Graph,
    description: "Follows each branch as deep as possible before backtracking.",
    stable: true,
    in_place: false,
    adaptive: false,
};

/// Stack-based or recursive traversal.
#[derive(Debug, Clone, Copy, Default)]
pub struct DepthFirstSearch;

impl Algorithm for DepthFirstSearch {
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
            vec![
                ParameterSpec::optional_string(
                    "start",
                    "Id of the start node, defaults to the first node",
                ),
                ParameterSpec::choice(
                    "method",
                    "Explicit stack or call recursion",
                    "iterative",
                    METHODS,
                ),
            ],
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

impl GraphAlgorithm for DepthFirstSearch {
    fn graph_shape(&self) -> GraphShape {
        GraphShape::Both
    }

    fn check_graph(&self, graph: &GraphData) -> Result<(), AlgorithmError> {
        if graph.nodes.len() > MAX_DFS_NODES {
            return Err(AlgorithmError::InputTooLarge {
                len: graph.nodes.len(),
                max: MAX_DFS_NODES,
            });
        }
        Ok(())
    }

    fn process_graph(
        &self,
        graph: &GraphData,
        params: &Parameters,
        tracker: &mut StepTracker,
    ) -> Result<AlgorithmOutput, AlgorithmError> {
        let method = choice_param(params, "method", METHODS, "iterative")?;
        let indexed = IndexedGraph::new(graph);
        let start = indexed.start(params)?;

        tracker.set_phase("init");
        let step = graph_step(
            tracker,
            format!("start {method} DFS from {}", indexed.label(start)),
            vec![start],
            GraphState::default,
        );
        tracker.add_note(step, "each branch is explored fully before backtracking");

        let mut walk = Walk {
            graph: &indexed,
            visited: vec![false; indexed.len()],
            order: Vec::new(),
        };
        if method == "recursive" {
            walk.recurse(start, 1, tracker)?;
        } else {
            walk.iterate(start, tracker);
        }

        let Walk { order, .. } = walk;
        tracker.set_phase("done");
        let step = graph_step(tracker, "DFS complete", order.clone(), || GraphState {
            visited: indexed.ids(order.iter().copied()),
            ..GraphState::default()
        });
        tracker.add_note(
            step,
            format!("visit order: {}", indexed.ids(order.iter().copied()).join(" -> ")),
        );

        Ok(AlgorithmOutput::Traversal(TraversalResult {
            order: indexed.ids(order),
            start_node: indexed.id(start).to_owned(),
            total_nodes: indexed.len(),
        }))
    }
}

struct Walk<'a, 'g> {
    graph: &'a IndexedGraph<'g>,
    visited: Vec<bool>,
    order: Vec<usize>,
}

impl Walk<'_, '_> {
    fn is_visited(&self, node: usize) -> bool {
        self.visited.get(node).copied().unwrap_or(true)
    }

    fn state(&self, stack: &[usize]) -> GraphState {
        GraphState {
            visited: self.graph.ids(self.order.iter().copied()),
            frontier: self.graph.ids(stack.iter().copied()),
            ..GraphState::default()
        }
    }

    fn mark(&mut self, node: usize, stack: &[usize], tracker: &mut StepTracker) {
        if let Some(flag) = self.visited.get_mut(node) {
            *flag = true;
        }
        self.order.push(node);
        let step = graph_step(
            tracker,
            format!("visit node {}", self.graph.label(node)),
            vec![node],
            || self.state(stack),
        );
        tracker.add_operation(step, OperationType::Access, vec![node], Vec::new(), "visit");
    }

    /// Neighbors are pushed in reverse so the first listed is popped first.
    /// A node may sit on the stack more than once; only its first pop visits
    /// it.
    fn iterate(&mut self, start: usize, tracker: &mut StepTracker) {
        let mut stack = vec![start];
        let step = graph_step(tracker, "init stack with start node", vec![start], || {
            self.state(&stack)
        });
        tracker.add_note(step, stack_note(self.graph, &stack));

        while let Some(node) = stack.pop() {
            if self.is_visited(node) {
                continue;
            }
            tracker.set_phase(&format!("stack depth {}", stack.len()));
            let step = graph_step(
                tracker,
                format!("pop node {}", self.graph.label(node)),
                vec![node],
                || self.state(&stack),
            );
            tracker.add_note(step, stack_note(self.graph, &stack));
            self.mark(node, &stack, tracker);

            let graph = self.graph;
            let neighbors = graph.neighbors(node);
            if neighbors.is_empty() {
                let step = graph_step(
                    tracker,
                    format!("node {} has no neighbors", self.graph.label(node)),
                    vec![node],
                    || self.state(&stack),
                );
                tracker.add_note(step, "backtrack");
                continue;
            }

            let step = graph_step(
                tracker,
                format!("check neighbors of {}", self.graph.label(node)),
                vec![node],
                || self.state(&stack),
            );
            let mut pushed = Vec::new();
            for neighbor in neighbors.iter().rev() {
                let seen = self.is_visited(neighbor.to);
                tracker.add_edge_comparison(
                    step,
                    node,
                    neighbor.to,
                    if seen { Ordering::Equal } else { Ordering::Less },
                );
                if !seen {
                    stack.push(neighbor.to);
                    pushed.push(neighbor.to);
                }
            }
            if !pushed.is_empty() {
                let step = graph_step(
                    tracker,
                    "push unvisited neighbors",
                    pushed.clone(),
                    || self.state(&stack),
                );
                tracker.add_operation(step, OperationType::Insert, pushed, Vec::new(), "push");
                tracker.add_note(step, stack_note(graph, &stack));
            }
        }
    }

    fn recurse(
        &mut self,
        node: usize,
        depth: usize,
        tracker: &mut StepTracker,
    ) -> Result<(), AlgorithmError> {
        if depth > MAX_RECURSION_DEPTH {
            return Err(AlgorithmError::RecursionLimit {
                limit: MAX_RECURSION_DEPTH,
            });
        }
        tracker.set_phase(&format!("recursion depth {depth}"));
        self.mark(node, &[], tracker);

        let graph = self.graph;
        let step = graph_step(
            tracker,
            format!("check neighbors of {}", graph.label(node)),
            vec![node],
            || self.state(&[]),
        );
        tracker.add_note(step, format!("{} neighbors", graph.neighbors(node).len()));

        for neighbor in graph.neighbors(node) {
            if self.is_visited(neighbor.to) {
                continue;
            }
            let step = graph_step(
                tracker,
                format!("recurse into {}", graph.label(neighbor.to)),
                vec![node, neighbor.to],
                || self.state(&[]),
            );
            tracker.add_edge_comparison(step, node, neighbor.to, Ordering::Less);
            tracker.add_note(step, "recurse into unvisited neighbor");
            self.recurse(neighbor.to, depth.saturating_add(1), tracker)?;
            tracker.set_phase(&format!("recursion depth {depth}"));
        }
        Ok(())
    }
}

fn stack_note(graph: &IndexedGraph<'_>, stack: &[usize]) -> String {
    format!("stack: [{}]", graph.ids(stack.iter().copied()).join(", "))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::graph::testing;
    use algoviz_types::GraphKind;

    fn traverse(graph: &GraphData, method: &str) -> TraversalResult {
        let mut params = Parameters::new();
        params.insert("method".to_owned(), method.into());
        let input = AlgorithmInput::Graph(graph.clone());
        match DepthFirstSearch.execute(&input, &params, &mut StepTracker::new()) {
            Ok(AlgorithmOutput::Traversal(result)) => result,
            _ => TraversalResult::default(),
        }
    }

    fn branching() -> GraphData {
        testing::graph(
            GraphKind::Directed,
            &["a", "b", "c", "d", "e"],
            &[
                ("a", "b", 1.0),
                ("a", "c", 1.0),
                ("b", "c", 1.0),
                ("b", "e", 1.0),
                ("c", "d", 1.0),
            ],
        )
    }

    #[test]
    fn iterative_goes_deep_first() {
        assert_eq!(traverse(&branching(), "iterative").order, ["a", "b", "c", "d", "e"]);
    }

    #[test]
    fn both_methods_agree() {
        let graph = branching();
        assert_eq!(
            traverse(&graph, "iterative").order,
            traverse(&graph, "recursive").order
        );
    }

    #[test]
    fn each_reachable_node_once() {
        let graph = testing::graph(
            GraphKind::Undirected,
            &["a", "b", "c", "d"],
            &[("a", "b", 1.0), ("b", "c", 1.0), ("c", "a", 1.0)],
        );
        let order = traverse(&graph, "iterative").order;
        assert_eq!(order.len(), 3);
        assert!(!order.contains(&"d".to_owned()));
    }

    #[test]
    fn long_chain_recurses_within_limit() {
        let ids: Vec<String> = (0..MAX_DFS_NODES).map(|i| format!("n{i}")).collect();
        let refs: Vec<&str> = ids.iter().map(String::as_str).collect();
        let edges: Vec<(&str, &str, f64)> =
            refs.windows(2).map(|w| (w[0], w[1], 1.0)).collect();
        let graph = testing::graph(GraphKind::Directed, &refs, &edges);
        let mut params = Parameters::new();
        params.insert("method".to_owned(), "recursive".into());
        let input = AlgorithmInput::Graph(graph);
        let result = DepthFirstSearch.execute(&input, &params, &mut StepTracker::counting());
        assert!(matches!(result, Ok(AlgorithmOutput::Traversal(r)) if r.order.len() == MAX_DFS_NODES));
    }

    #[test]
    fn oversized_graph_is_rejected() {
        let ids: Vec<String> = (0..=MAX_DFS_NODES).map(|i| format!("n{i}")).collect();
        let refs: Vec<&str> = ids.iter().map(String::as_str).collect();
        let input = AlgorithmInput::Graph(testing::graph(GraphKind::Directed, &refs, &[]));
        assert!(matches!(
            DepthFirstSearch.validate_input(&input),
            Err(AlgorithmError::InputTooLarge { max: MAX_DFS_NODES, .. })
        ));
    }

    #[test]
    fn unknown_method_is_rejected() {
        let mut params = Parameters::new();
        params.insert("method".to_owned(), "sideways".into());
        let input = AlgorithmInput::Graph(branching());
        let result = DepthFirstSearch.execute(&input, &params, &mut StepTracker::new());
        assert!(matches!(result, Err(AlgorithmError::InvalidParameter { .. })));
    }
}

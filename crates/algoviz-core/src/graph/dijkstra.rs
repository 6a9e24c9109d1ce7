use std::cmp::Ordering;
use std::collections::{BTreeMap, BinaryHeap};

use algoviz_types::{
    AlgorithmInfo, AlgorithmInput, AlgorithmOutput, Category, Complexity, ComplexityBounds,
    Distance, Element, GraphData, GraphShape, GraphState, OperationType, ParameterSpec, PathInfo,
    ShortestPathResult,
};

use super::{IndexedGraph, graph_step};
use crate::algorithm::{
    Algorithm, Capability, GraphAlgorithm, Parameters, Profile, describe, run_graph,
    validate_graph,
};
use crate::error::AlgorithmError;
use crate::tracker::StepTracker;

const PROFILE: Profile = Profile {
    id: "graph_dijkstra",
    name: "Dijkstra's Shortest Path",
    category: Category::Graph,
    description: "Finds the cheapest path from the start node to every other node \
                  when all edge weights are non-negative.",
    stable: true,
    in_place: false,
    adaptive: false,
};

/// Single-source shortest paths with a binary heap.
#[derive(Debug, Clone, Copy, Default)]
pub struct Dijkstra;

impl Algorithm for Dijkstra {
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
                "Id of the source node, defaults to the first node",
            )],
        )
    }

    fn complexity(&self) -> Complexity {
        Complexity {
            time_complexity: ComplexityBounds::uniform("O((V + E) log V)"),
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

impl GraphAlgorithm for Dijkstra {
    fn graph_shape(&self) -> GraphShape {
        GraphShape::Weighted
    }

    fn check_graph(&self, graph: &GraphData) -> Result<(), AlgorithmError> {
        match graph.edges.iter().find(|e| e.weight < 0.0 || e.weight.is_nan()) {
            Some(edge) => Err(AlgorithmError::NegativeWeight {
                from: edge.from.clone(),
                to: edge.to.clone(),
                weight: edge.weight,
            }),
            None => Ok(()),
        }
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

        let mut dist = vec![Distance::Unreachable; n];
        let mut previous: Vec<Option<usize>> = vec![None; n];
        let mut done = vec![false; n];
        let mut finalized = Vec::new();
        let mut heap = BinaryHeap::new();
        let mut sequence = 0_u64;

        let state = |dist: &[Distance], finalized: &[usize], heap: &BinaryHeap<Frontier>| {
            GraphState {
                visited: indexed.ids(finalized.iter().copied()),
                frontier: indexed.ids(heap.iter().map(|f| f.node)),
                distances: labels(&indexed, dist),
                ..GraphState::default()
            }
        };

        if let Some(d) = dist.get_mut(start) {
            *d = Distance::Finite(0.0);
        }
        heap.push(Frontier {
            cost: 0.0,
            sequence,
            node: start,
        });

        tracker.set_phase("init");
        let step = graph_step(
            tracker,
            format!("initialize distances, source {} is 0", indexed.label(start)),
            vec![start],
            || state(&dist, &finalized, &heap),
        );
        tracker.add_note(step, "all other nodes start at infinity");

        while let Some(Frontier { cost, node, .. }) = heap.pop() {
            let Some(flag) = done.get_mut(node) else {
                continue;
            };
            if *flag {
                continue;
            }
            *flag = true;
            finalized.push(node);

            tracker.set_phase(&format!("settle {}", indexed.label(node)));
            let step = graph_step(
                tracker,
                format!("settle {} at distance {cost}", indexed.label(node)),
                vec![node],
                || state(&dist, &finalized, &heap),
            );
            tracker.add_operation(step, OperationType::Access, vec![node], Vec::new(), "pop min");

            for neighbor in indexed.neighbors(node) {
                if done.get(neighbor.to).copied().unwrap_or(true) {
                    continue;
                }
                let candidate = cost + neighbor.weight;
                let current = dist.get(neighbor.to).copied().unwrap_or(Distance::Unreachable);
                let ordering = match current {
                    Distance::Finite(known) => candidate.total_cmp(&known),
                    Distance::Unreachable => Ordering::Less,
                };
                if ordering.is_lt() {
                    if let Some(d) = dist.get_mut(neighbor.to) {
                        *d = Distance::Finite(candidate);
                    }
                    if let Some(p) = previous.get_mut(neighbor.to) {
                        *p = Some(node);
                    }
                    sequence = sequence.saturating_add(1);
                    heap.push(Frontier {
                        cost: candidate,
                        sequence,
                        node: neighbor.to,
                    });
                    let step = graph_step(
                        tracker,
                        format!(
                            "relax {} -> {}: distance becomes {candidate}",
                            indexed.label(node),
                            indexed.label(neighbor.to)
                        ),
                        vec![node, neighbor.to],
                        || state(&dist, &finalized, &heap),
                    );
                    tracker.add_edge_comparison(step, node, neighbor.to, ordering);
                    tracker.add_operation(
                        step,
                        OperationType::Update,
                        vec![neighbor.to],
                        vec![Element::Float(candidate)],
                        "new tentative distance",
                    );
                } else {
                    let step = graph_step(
                        tracker,
                        format!(
                            "edge {} -> {} does not improve {}",
                            indexed.label(node),
                            indexed.label(neighbor.to),
                            indexed.label(neighbor.to)
                        ),
                        vec![node, neighbor.to],
                        || state(&dist, &finalized, &heap),
                    );
                    tracker.add_edge_comparison(step, node, neighbor.to, ordering);
                }
            }
        }

        tracker.set_phase("done");
        let step = graph_step(tracker, "shortest paths complete", finalized.clone(), || {
            state(&dist, &finalized, &heap)
        });
        tracker.add_note(step, format!("{} of {n} nodes reachable", finalized.len()));

        let paths = (0..n)
            .map(|target| {
                let distance = dist.get(target).copied().unwrap_or(Distance::Unreachable);
                let path = match distance {
                    Distance::Finite(_) => indexed.ids(route(&previous, start, target)),
                    Distance::Unreachable => Vec::new(),
                };
                (indexed.id(target).to_owned(), PathInfo { distance, path })
            })
            .collect();

        Ok(AlgorithmOutput::ShortestPaths(ShortestPathResult {
            distances: labels(&indexed, &dist),
            paths,
            start_node: indexed.id(start).to_owned(),
        }))
    }
}

fn labels(graph: &IndexedGraph<'_>, dist: &[Distance]) -> BTreeMap<String, Distance> {
    dist.iter()
        .enumerate()
        .map(|(i, d)| (graph.id(i).to_owned(), *d))
        .collect()
}

/// Walks predecessor links back from `target`.
fn route(previous: &[Option<usize>], start: usize, target: usize) -> Vec<usize> {
    let mut path = vec![target];
    let mut current = target;
    while current != start {
        match previous.get(current).copied().flatten() {
            Some(p) if path.len() <= previous.len() => {
                path.push(p);
                current = p;
            }
            _ => break,
        }
    }
    path.reverse();
    path
}

/// Heap entry. The ordering is reversed so [`BinaryHeap`] pops the cheapest
/// entry; equal costs pop in push order.
#[derive(Debug, Clone, Copy)]
struct Frontier {
    cost: f64,
    sequence: u64,
    node: usize,
}

impl Ord for Frontier {
    fn cmp(&self, other: &Self) -> Ordering {
        other
            .cost
            .total_cmp(&self.cost)
            .then_with(|| other.sequence.cmp(&self.sequence))
    }
}

impl PartialOrd for Frontier {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl PartialEq for Frontier {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other).is_eq()
    }
}

impl Eq for Frontier {}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::graph::testing;
    use algoviz_types::{GraphEdge, GraphKind};

    fn solve(graph: GraphData, params: &Parameters) -> Result<ShortestPathResult, AlgorithmError> {
        let input = AlgorithmInput::Graph(graph);
        match Dijkstra.execute(&input, params, &mut StepTracker::new())? {
            AlgorithmOutput::ShortestPaths(result) => Ok(result),
            _ => Err(AlgorithmError::UnsupportedType),
        }
    }

    #[test]
    fn finds_cheapest_distances() {
        let result = solve(testing::weighted(GraphKind::Directed), &Parameters::new());
        let result = result.unwrap_or_default();
        let expected = [("S", 0.0), ("B", 2.0), ("A", 3.0), ("C", 8.0), ("T", 10.0)];
        for (id, cost) in expected {
            assert_eq!(result.distances.get(id), Some(&Distance::Finite(cost)), "{id}");
        }
    }

    #[test]
    fn paths_follow_predecessors() {
        let result = solve(testing::weighted(GraphKind::Directed), &Parameters::new())
            .unwrap_or_default();
        let to_t = result.paths.get("T").map(|p| p.path.clone()).unwrap_or_default();
        assert_eq!(to_t, ["S", "B", "A", "C", "T"]);
    }

    #[test]
    fn unreachable_nodes_are_infinite_with_empty_path() {
        let graph = testing::graph(GraphKind::Directed, &["a", "b", "c"], &[("a", "b", 1.0)]);
        let result = solve(graph, &Parameters::new()).unwrap_or_default();
        assert_eq!(result.distances.get("c"), Some(&Distance::Unreachable));
        assert!(result.paths.get("c").is_some_and(|p| p.path.is_empty()));
    }

    #[test]
    fn undirected_graphs_are_accepted() {
        let result = solve(testing::weighted(GraphKind::Undirected), &testing::start("T"));
        assert!(result.is_ok());
        let result = result.unwrap_or_default();
        assert_eq!(result.start_node, "T");
        assert_eq!(result.distances.get("S"), Some(&Distance::Finite(10.0)));
    }

    #[test]
    fn negative_weights_are_rejected() {
        let mut graph = testing::graph(GraphKind::Directed, &["a", "b"], &[]);
        graph.edges.push(GraphEdge::new("a", "b", -1.0));
        let input = AlgorithmInput::Graph(graph);
        assert!(matches!(
            Dijkstra.validate_input(&input),
            Err(AlgorithmError::NegativeWeight { .. })
        ));
    }

    #[test]
    fn heap_pops_cheapest_then_oldest() {
        let mut heap = BinaryHeap::new();
        heap.push(Frontier { cost: 2.0, sequence: 0, node: 0 });
        heap.push(Frontier { cost: 1.0, sequence: 1, node: 1 });
        heap.push(Frontier { cost: 1.0, sequence: 2, node: 2 });
        let order: Vec<usize> = std::iter::from_fn(|| heap.pop().map(|f| f.node)).collect();
        assert_eq!(order, [1, 2, 0]);
    }
}

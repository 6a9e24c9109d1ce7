use std::cmp::Ordering;
use std::collections::VecDeque;

use algoviz_types::{
    AlgorithmInfo, AlgorithmInput, AlgorithmOutput, Category, Complexity, ComplexityBounds,
    Element, GraphData, GraphShape, GraphState, OperationType, ParameterSpec, TopologicalResult,
};

use super::{IndexedGraph, graph_step};
use crate::algorithm::{
    Algorithm, Capability, GraphAlgorithm, Parameters, Profile, choice_param, describe,
    run_graph, validate_graph,
};
use crate::error::AlgorithmError;
use crate::tracker::StepTracker;

const METHODS: &[&str] = &["kahn", "dfs"];

const PROFILE: Profile = Profile {
    id: "graph_topological_sort",
    name: "Topological Sort",
    category: Category::Graph,
    description: "Orders the nodes of a directed acyclic graph so every edge points \
                  forward, or reports the cycle that prevents it.",
    stable: false,
    in_place: false,
    adaptive: false,
};

/// Kahn's algorithm with a depth-first alternative.
#[derive(Debug, Clone, Copy, Default)]
pub struct TopologicalSort;

impl Algorithm for TopologicalSort {
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
            vec![ParameterSpec::choice(
                "method",
                "Indegree queue or depth-first finishing order",
                "kahn",
                METHODS,
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

impl GraphAlgorithm for TopologicalSort {
    fn graph_shape(&self) -> GraphShape {
        GraphShape::Directed
    }

    fn process_graph(
        &self,
        graph: &GraphData,
        params: &Parameters,
        tracker: &mut StepTracker,
    ) -> Result<AlgorithmOutput, AlgorithmError> {
        let method = choice_param(params, "method", METHODS, "kahn")?;
        let indexed = IndexedGraph::new(graph);
        let (order, cycle) = if method == "dfs" {
            depth_first(&indexed, tracker)
        } else {
            kahn(&indexed, tracker)
        };

        tracker.set_phase("done");
        let has_cycle = !cycle.is_empty();
        let message = if has_cycle {
            let step = graph_step(
                tracker,
                format!("cycle detected among {}", indexed.ids(cycle.iter().copied()).join(", ")),
                cycle.clone(),
                || GraphState {
                    visited: indexed.ids(order.iter().copied()),
                    frontier: indexed.ids(cycle.iter().copied()),
                    ..GraphState::default()
                },
            );
            tracker.add_note(step, "no topological order exists");
            "graph contains a cycle, no topological order exists"
        } else {
            let step = graph_step(tracker, "topological sort complete", order.clone(), || {
                GraphState {
                    visited: indexed.ids(order.iter().copied()),
                    ..GraphState::default()
                }
            });
            tracker.add_note(step, format!("order: {}", indexed.ids(order.iter().copied()).join(" -> ")));
            "topological sort complete"
        };

        Ok(AlgorithmOutput::Topological(TopologicalResult {
            processed_count: order.len(),
            topological_order: indexed.ids(order),
            is_dag: !has_cycle,
            total_nodes: indexed.len(),
            has_cycle,
            cycle_nodes: indexed.ids(cycle),
            message: message.to_owned(),
        }))
    }
}

/// Returns the emitted order and, on a cycle, the nodes left with incoming
/// edges.
fn kahn(graph: &IndexedGraph<'_>, tracker: &mut StepTracker) -> (Vec<usize>, Vec<usize>) {
    let n = graph.len();
    let mut indegree = vec![0_usize; n];
    for node in 0..n {
        for neighbor in graph.neighbors(node) {
            if let Some(d) = indegree.get_mut(neighbor.to) {
                *d = d.saturating_add(1);
            }
        }
    }

    let mut queue: VecDeque<usize> = (0..n)
        .filter(|&i| indegree.get(i).copied() == Some(0))
        .collect();
    let mut order = Vec::with_capacity(n);
    let state = |order: &[usize], queue: &VecDeque<usize>| GraphState {
        visited: graph.ids(order.iter().copied()),
        frontier: graph.ids(queue.iter().copied()),
        ..GraphState::default()
    };

    tracker.set_phase("init");
    let step = graph_step(
        tracker,
        format!("{} nodes have no incoming edges", queue.len()),
        queue.iter().copied().collect(),
        || state(&order, &queue),
    );
    tracker.add_note(step, "nodes with indegree zero seed the queue");

    while let Some(node) = queue.pop_front() {
        order.push(node);
        tracker.set_phase(&format!("emit {}", order.len()));
        let step = graph_step(
            tracker,
            format!("emit {}", graph.label(node)),
            vec![node],
            || state(&order, &queue),
        );
        tracker.add_operation(step, OperationType::Access, vec![node], Vec::new(), "dequeue");

        for neighbor in graph.neighbors(node) {
            let Some(d) = indegree.get_mut(neighbor.to) else {
                continue;
            };
            *d = d.saturating_sub(1);
            let remaining = *d;
            let released = remaining == 0;
            if released {
                queue.push_back(neighbor.to);
            }
            let step = graph_step(
                tracker,
                if released {
                    format!("{} has no remaining dependencies, enqueue", graph.label(neighbor.to))
                } else {
                    format!("{} still waits on {remaining} edges", graph.label(neighbor.to))
                },
                vec![node, neighbor.to],
                || state(&order, &queue),
            );
            tracker.add_edge_comparison(
                step,
                node,
                neighbor.to,
                if released { Ordering::Equal } else { Ordering::Greater },
            );
            tracker.add_operation(
                step,
                OperationType::Update,
                vec![neighbor.to],
                vec![Element::Int(i64::try_from(remaining).unwrap_or(i64::MAX))],
                "decrement indegree",
            );
            if released {
                tracker.add_operation(step, OperationType::Insert, vec![neighbor.to], Vec::new(), "enqueue");
            }
        }
    }

    let cycle = if order.len() < n {
        (0..n)
            .filter(|&i| indegree.get(i).copied().unwrap_or(0) > 0)
            .collect()
    } else {
        Vec::new()
    };
    (order, cycle)
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Color {
    White,
    Gray,
    Black,
}

/// Reverse finishing order of an iterative three-color walk. Stops at the
/// first back edge and returns the gray path it closes.
fn depth_first(graph: &IndexedGraph<'_>, tracker: &mut StepTracker) -> (Vec<usize>, Vec<usize>) {
    let n = graph.len();
    let mut color = vec![Color::White; n];
    let mut finished = Vec::with_capacity(n);
    let state = |finished: &[usize], stack: &[(usize, usize)]| GraphState {
        visited: graph.ids(finished.iter().rev().copied()),
        frontier: graph.ids(stack.iter().map(|&(node, _)| node)),
        ..GraphState::default()
    };

    tracker.set_phase("init");
    let step = graph_step(tracker, "all nodes start white", Vec::new(), || {
        state(&finished, &[])
    });
    tracker.add_note(step, "gray marks the current path, black marks finished nodes");

    for root in 0..n {
        if color.get(root) != Some(&Color::White) {
            continue;
        }
        let mut stack: Vec<(usize, usize)> = vec![(root, 0)];
        if let Some(c) = color.get_mut(root) {
            *c = Color::Gray;
        }
        tracker.set_phase(&format!("walk from {}", graph.label(root)));
        let step = graph_step(
            tracker,
            format!("enter {}", graph.label(root)),
            vec![root],
            || state(&finished, &stack),
        );
        tracker.add_operation(step, OperationType::Update, vec![root], Vec::new(), "mark gray");

        while let Some(top) = stack.last_mut() {
            let (node, next) = *top;
            let Some(neighbor) = graph.neighbors(node).get(next) else {
                stack.pop();
                if let Some(c) = color.get_mut(node) {
                    *c = Color::Black;
                }
                finished.push(node);
                let step = graph_step(
                    tracker,
                    format!("finish {}", graph.label(node)),
                    vec![node],
                    || state(&finished, &stack),
                );
                tracker.add_operation(step, OperationType::Update, vec![node], Vec::new(), "mark black");
                continue;
            };
            top.1 = next.saturating_add(1);
            let to = neighbor.to;

            match color.get(to).copied().unwrap_or(Color::Black) {
                Color::White => {
                    if let Some(c) = color.get_mut(to) {
                        *c = Color::Gray;
                    }
                    stack.push((to, 0));
                    let step = graph_step(
                        tracker,
                        format!("enter {} from {}", graph.label(to), graph.label(node)),
                        vec![node, to],
                        || state(&finished, &stack),
                    );
                    tracker.add_edge_comparison(step, node, to, Ordering::Less);
                    tracker.add_operation(step, OperationType::Update, vec![to], Vec::new(), "mark gray");
                }
                Color::Gray => {
                    let cycle: Vec<usize> = stack
                        .iter()
                        .map(|&(member, _)| member)
                        .skip_while(|&member| member != to)
                        .collect();
                    let step = graph_step(
                        tracker,
                        format!("back edge {} -> {}", graph.label(node), graph.label(to)),
                        vec![node, to],
                        || state(&finished, &stack),
                    );
                    tracker.add_edge_comparison(step, node, to, Ordering::Equal);
                    finished.reverse();
                    return (finished, cycle);
                }
                Color::Black => {
                    let step = graph_step(
                        tracker,
                        format!("{} is already finished", graph.label(to)),
                        vec![node, to],
                        || state(&finished, &stack),
                    );
                    tracker.add_edge_comparison(step, node, to, Ordering::Greater);
                }
            }
        }
    }

    finished.reverse();
    (finished, Vec::new())
}

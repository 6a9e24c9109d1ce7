//! Dataset generation and built-in presets.
//!
//! Generation is driven by a pattern name per data type. Passing a numeric
//! `seed` parameter makes the output reproducible.

use std::collections::HashSet;

use algoviz_core::Parameters;
use algoviz_types::{
    AlgorithmInput, ArrayMetadata, DataPreset, DataType, Element, GeneratedData, GraphData,
    GraphEdge, GraphKind, GraphNode,
};
use chrono::Utc;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use super::ServiceError;

/// Array patterns in the order they are documented.
pub const ARRAY_PATTERNS: &[&str] = &[
    "random",
    "sorted",
    "reversed",
    "nearly_sorted",
    "few_unique",
    "many_duplicates",
    "best_case",
    "worst_case",
    "average_case",
];

/// Graph patterns in the order they are documented.
pub const GRAPH_PATTERNS: &[&str] = &[
    "connected",
    "random",
    "complete",
    "chain",
    "star",
    "tree",
    "cycle",
    "grid",
];

/// Generates datasets and serves presets.
#[derive(Debug, Clone)]
pub struct DataService {
    max_data_size: usize,
    presets: Vec<DataPreset>,
}

impl DataService {
    /// Create a service accepting sizes up to `max_data_size`.
    pub fn new(max_data_size: usize) -> Self {
        Self {
            max_data_size,
            presets: build_presets(),
        }
    }

    /// Generate a dataset.
    ///
    /// `pattern` defaults to `random` for arrays and `connected` for graphs.
    ///
    /// # Errors
    ///
    /// - [`ServiceError::UnsupportedDataType`] unless `data_type` is `array`
    ///   or `graph`
    /// - [`ServiceError::DataSizeTooLarge`] unless `size` is in
    ///   `1..=max_data_size`
    /// - [`ServiceError::InvalidPattern`] for a pattern the type lacks
    pub fn generate(
        &self,
        data_type: &str,
        size: usize,
        pattern: Option<&str>,
        parameters: &Parameters,
    ) -> Result<GeneratedData, ServiceError> {
        let kind = DataType::parse(data_type.trim()).ok_or_else(|| {
            ServiceError::UnsupportedDataType {
                name: data_type.to_owned(),
            }
        })?;
        if size == 0 || size > self.max_data_size {
            return Err(ServiceError::DataSizeTooLarge {
                size,
                max: self.max_data_size,
            });
        }
        let (patterns, default) = match kind {
            DataType::Array => (ARRAY_PATTERNS, "random"),
            DataType::Graph => (GRAPH_PATTERNS, "connected"),
        };
        let pattern = match pattern.map(str::trim) {
            None | Some("") => default,
            Some(p) if patterns.contains(&p) => p,
            Some(p) => {
                return Err(ServiceError::InvalidPattern {
                    pattern: p.to_owned(),
                    data_type: kind.to_string(),
                });
            }
        };

        let mut rng = match parameters.get("seed").and_then(serde_json::Value::as_u64) {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_os_rng(),
        };

        let generated = match kind {
            DataType::Array => {
                let values = generate_array(size, pattern, &mut rng);
                let metadata = array_metadata(&values);
                GeneratedData {
                    kind,
                    size: values.len(),
                    pattern: pattern.to_owned(),
                    content: AlgorithmInput::Sequence(values.into_iter().map(Element::Int).collect()),
                    metadata,
                }
            }
            DataType::Graph => {
                let graph = generate_graph(size, pattern, &mut rng);
                GeneratedData {
                    kind,
                    size: graph.nodes.len(),
                    pattern: pattern.to_owned(),
                    content: AlgorithmInput::Graph(graph),
                    metadata: None,
                }
            }
        };
        tracing::debug!(%kind, size = generated.size, pattern, "dataset generated");
        Ok(generated)
    }

    /// Built-in presets, optionally restricted to one data type.
    pub fn presets(&self, filter: Option<DataType>) -> Vec<DataPreset> {
        self.presets
            .iter()
            .filter(|p| filter.is_none_or(|kind| p.data_type == kind))
            .cloned()
            .collect()
    }
}

// ---------------------------------------------------------------------------
// Arrays
// ---------------------------------------------------------------------------

fn to_value(i: usize) -> i64 {
    i64::try_from(i).unwrap_or(i64::MAX)
}

fn generate_array(size: usize, pattern: &str, rng: &mut impl Rng) -> Vec<i64> {
    let ascending = || (1..=size).map(to_value).collect::<Vec<_>>();
    match pattern {
        "sorted" | "best_case" => ascending(),
        "reversed" | "worst_case" => (1..=size).rev().map(to_value).collect(),
        "nearly_sorted" => {
            let mut values = ascending();
            let swaps = (size / 10).max(1);
            for _ in 0..swaps {
                let a = rng.random_range(0..size);
                let b = rng.random_range(0..size);
                values.swap(a, b);
            }
            values
        }
        "few_unique" => (0..size).map(|_| rng.random_range(1..=5)).collect(),
        "many_duplicates" => {
            let distinct = to_value((size / 10).max(2));
            (0..size).map(|_| rng.random_range(1..=distinct)).collect()
        }
        _ => (0..size).map(|_| rng.random_range(0..100)).collect(),
    }
}

fn array_metadata(values: &[i64]) -> Option<ArrayMetadata> {
    let min = values.iter().min()?;
    let max = values.iter().max()?;
    let distinct: HashSet<i64> = values.iter().copied().collect();
    let duplicates = values.len().saturating_sub(distinct.len());
    Some(ArrayMetadata {
        min_value: Element::Int(*min),
        max_value: Element::Int(*max),
        duplicates,
        sorted: values.windows(2).all(|w| w.first() <= w.get(1)),
        reversed: values.windows(2).all(|w| w.first() >= w.get(1)),
        unique: duplicates == 0,
    })
}

// ---------------------------------------------------------------------------
// Graphs
// ---------------------------------------------------------------------------

fn node_id(i: usize) -> String {
    format!("node_{i}")
}

fn random_weight(rng: &mut impl Rng) -> f64 {
    f64::from(rng.random_range(1_u8..=10))
}

struct EdgeSet {
    edges: Vec<GraphEdge>,
    seen: HashSet<(usize, usize)>,
}

impl EdgeSet {
    fn new() -> Self {
        Self {
            edges: Vec::new(),
            seen: HashSet::new(),
        }
    }

    /// Adds `from -> to` unless it is a self-loop or already present.
    fn add(&mut self, from: usize, to: usize, weight: f64) {
        if from != to && self.seen.insert((from, to)) {
            self.edges.push(GraphEdge::new(node_id(from), node_id(to), weight));
        }
    }
}

#[allow(clippy::arithmetic_side_effects)]
fn generate_graph(size: usize, pattern: &str, rng: &mut impl Rng) -> GraphData {
    let mut node_count = size;
    let mut kind = GraphKind::Directed;
    let mut edges = EdgeSet::new();
    let mut labels: Option<Vec<String>> = None;

    match pattern {
        "random" => {
            let attempts = size + rng.random_range(0..=size * size / 4);
            let attempts = attempts.min(size * size.saturating_sub(1) / 2);
            for _ in 0..attempts {
                let from = rng.random_range(0..size);
                let to = rng.random_range(0..size);
                let weight = random_weight(rng);
                edges.add(from, to, weight);
            }
        }
        "complete" => {
            kind = GraphKind::Undirected;
            for i in 0..size {
                for j in (i + 1)..size {
                    let weight = random_weight(rng);
                    edges.add(i, j, weight);
                }
            }
        }
        "chain" => {
            for i in 1..size {
                let weight = random_weight(rng);
                edges.add(i - 1, i, weight);
            }
        }
        "star" => {
            for i in 1..size {
                let weight = random_weight(rng);
                edges.add(0, i, weight);
            }
        }
        "tree" => {
            for i in 1..size {
                let weight = random_weight(rng);
                edges.add((i - 1) / 2, i, weight);
            }
        }
        "cycle" => {
            for i in 0..size {
                let weight = random_weight(rng);
                edges.add(i, (i + 1) % size, weight);
            }
        }
        "grid" => {
            kind = GraphKind::Undirected;
            if size < 4 {
                for i in 1..size {
                    edges.add(i - 1, i, 1.0);
                }
            } else {
                let side = size.isqrt();
                node_count = side * side;
                labels = Some(
                    (0..node_count)
                        .map(|i| format!("({},{})", i / side, i % side))
                        .collect(),
                );
                for i in 0..node_count {
                    let (row, col) = (i / side, i % side);
                    if col + 1 < side {
                        edges.add(i, i + 1, 1.0);
                    }
                    if row + 1 < side {
                        edges.add(i, i + side, 1.0);
                    }
                }
            }
        }
        _ => {
            for i in 1..size {
                let parent = rng.random_range(0..i);
                let weight = random_weight(rng);
                edges.add(parent, i, weight);
            }
            let half = size / 2;
            let extra = if half > 0 { rng.random_range(0..half) } else { 0 };
            for _ in 0..extra {
                let from = rng.random_range(0..size);
                let to = rng.random_range(0..size);
                let weight = random_weight(rng);
                edges.add(from, to, weight);
            }
        }
    }

    let nodes = (0..node_count)
        .map(|i| {
            let label = labels
                .as_ref()
                .and_then(|l| l.get(i).cloned())
                .unwrap_or_else(|| format!("Node {i}"));
            let mut node = GraphNode::new(node_id(i), label);
            node.value = Some(Element::Int(to_value(i)));
            node
        })
        .collect();

    GraphData {
        nodes,
        edges: edges.edges,
        kind,
    }
}

// ---------------------------------------------------------------------------
// Presets
// ---------------------------------------------------------------------------

fn ints(values: impl IntoIterator<Item = i64>) -> AlgorithmInput {
    AlgorithmInput::Sequence(values.into_iter().map(Element::Int).collect())
}

fn preset_graph(kind: GraphKind, nodes: &[(&str, &str)], edges: &[(&str, &str, f64)]) -> GraphData {
    GraphData {
        nodes: nodes
            .iter()
            .enumerate()
            .map(|(i, (id, label))| {
                let mut node = GraphNode::new(*id, *label);
                node.value = Some(Element::Int(to_value(i)));
                node
            })
            .collect(),
        edges: edges
            .iter()
            .map(|(from, to, weight)| GraphEdge::new(*from, *to, *weight))
            .collect(),
        kind,
    }
}

fn build_presets() -> Vec<DataPreset> {
    let created_at = Utc::now();
    let preset = |id: &str,
                  name: &str,
                  description: &str,
                  data_type: DataType,
                  pattern: &str,
                  data: AlgorithmInput,
                  tags: &[&str]| {
        let size = match &data {
            AlgorithmInput::Sequence(values) => values.len(),
            AlgorithmInput::Graph(graph) => graph.nodes.len(),
        };
        DataPreset {
            id: id.to_owned(),
            name: name.to_owned(),
            description: description.to_owned(),
            data_type,
            size,
            pattern: pattern.to_owned(),
            data,
            tags: tags.iter().map(|t| (*t).to_owned()).collect(),
            created_at,
        }
    };

    vec![
        preset(
            "small_random",
            "Small random array",
            "Ten random integers",
            DataType::Array,
            "random",
            ints([64, 34, 25, 12, 22, 11, 90, 5, 77, 30]),
            &["small", "random", "integer"],
        ),
        preset(
            "sorted_array",
            "Sorted array",
            "Fifteen integers in ascending order",
            DataType::Array,
            "sorted",
            ints(1..=15),
            &["sorted", "integer", "best_case"],
        ),
        preset(
            "reverse_sorted",
            "Reverse sorted array",
            "Fifteen integers in descending order",
            DataType::Array,
            "reversed",
            ints((1..=15).rev()),
            &["reversed", "integer", "worst_case"],
        ),
        preset(
            "simple_graph",
            "Simple undirected graph",
            "Four nodes joined in a square",
            DataType::Graph,
            "simple",
            AlgorithmInput::Graph(preset_graph(
                GraphKind::Undirected,
                &[("A", "A"), ("B", "B"), ("C", "C"), ("D", "D")],
                &[("A", "B", 1.0), ("B", "C", 1.0), ("C", "D", 1.0), ("D", "A", 1.0)],
            )),
            &["graph", "undirected", "simple"],
        ),
        preset(
            "weighted_graph",
            "Weighted directed graph",
            "Five nodes with weighted edges from a start to an end node",
            DataType::Graph,
            "weighted",
            AlgorithmInput::Graph(preset_graph(
                GraphKind::Directed,
                &[("S", "Start"), ("A", "A"), ("B", "B"), ("C", "C"), ("T", "End")],
                &[
                    ("S", "A", 4.0),
                    ("S", "B", 2.0),
                    ("A", "C", 3.0),
                    ("B", "A", 1.0),
                    ("B", "C", 5.0),
                    ("C", "T", 2.0),
                ],
            )),
            &["graph", "directed", "weighted"],
        ),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;
    use algoviz_core::{StepTracker, build_registry};
    use algoviz_types::{AlgorithmOutput, Distance};

    fn seeded(seed: u64) -> Parameters {
        let mut params = Parameters::new();
        params.insert("seed".to_owned(), seed.into());
        params
    }

    fn array(service: &DataService, size: usize, pattern: &str) -> Vec<Element> {
        match service.generate("array", size, Some(pattern), &seeded(7)) {
            Ok(GeneratedData {
                content: AlgorithmInput::Sequence(values),
                ..
            }) => values,
            _ => Vec::new(),
        }
    }

    fn graph(service: &DataService, size: usize, pattern: &str) -> GraphData {
        match service.generate("graph", size, Some(pattern), &seeded(7)) {
            Ok(GeneratedData {
                content: AlgorithmInput::Graph(graph),
                ..
            }) => graph,
            _ => GraphData::default(),
        }
    }

    #[test]
    fn sorted_and_reversed_arrays() {
        let service = DataService::new(100);
        let ints = |v: &[i64]| v.iter().copied().map(Element::Int).collect::<Vec<_>>();
        assert_eq!(array(&service, 4, "sorted"), ints(&[1, 2, 3, 4]));
        assert_eq!(array(&service, 4, "worst_case"), ints(&[4, 3, 2, 1]));
    }

    #[test]
    fn random_values_stay_in_range() {
        let service = DataService::new(1000);
        let values = array(&service, 500, "random");
        assert_eq!(values.len(), 500);
        assert!(values.iter().all(|v| matches!(v, Element::Int(n) if (0..100).contains(n))));
    }

    #[test]
    fn few_unique_uses_at_most_five_values() {
        let service = DataService::new(1000);
        let distinct: HashSet<String> = array(&service, 200, "few_unique")
            .iter()
            .map(ToString::to_string)
            .collect();
        assert!(distinct.len() <= 5);
    }

    #[test]
    fn metadata_describes_the_array() {
        let service = DataService::new(100);
        let generated = service.generate("array", 5, Some("sorted"), &Parameters::new());
        let metadata = generated.ok().and_then(|g| g.metadata);
        assert!(metadata.is_some_and(|m| m.sorted
            && !m.reversed
            && m.unique
            && m.min_value == Element::Int(1)
            && m.max_value == Element::Int(5)));
    }

    #[test]
    fn seed_makes_generation_reproducible() {
        let service = DataService::new(100);
        assert_eq!(array(&service, 50, "random"), array(&service, 50, "random"));
    }

    #[test]
    fn size_and_type_are_validated() {
        let service = DataService::new(10);
        let params = Parameters::new();
        assert!(matches!(
            service.generate("array", 0, None, &params),
            Err(ServiceError::DataSizeTooLarge { .. })
        ));
        assert!(matches!(
            service.generate("array", 11, None, &params),
            Err(ServiceError::DataSizeTooLarge { .. })
        ));
        assert!(matches!(
            service.generate("tree", 5, None, &params),
            Err(ServiceError::UnsupportedDataType { .. })
        ));
        assert!(matches!(
            service.generate("array", 5, Some("grid"), &params),
            Err(ServiceError::InvalidPattern { .. })
        ));
    }

    #[test]
    fn graph_patterns_have_expected_edge_counts() {
        let service = DataService::new(100);
        assert_eq!(graph(&service, 5, "chain").edges.len(), 4);
        assert_eq!(graph(&service, 5, "star").edges.len(), 4);
        assert_eq!(graph(&service, 5, "cycle").edges.len(), 5);
        assert_eq!(graph(&service, 5, "complete").edges.len(), 10);
        assert_eq!(graph(&service, 7, "tree").edges.len(), 6);
    }

    #[test]
    fn grid_truncates_to_square() {
        let service = DataService::new(100);
        let grid = graph(&service, 10, "grid");
        assert_eq!(grid.nodes.len(), 9);
        assert_eq!(grid.edges.len(), 12);
        assert_eq!(grid.kind, GraphKind::Undirected);
        assert_eq!(grid.nodes.get(4).map(|n| n.label.as_str()), Some("(1,1)"));
    }

    #[test]
    fn generated_graphs_pass_normalization() {
        let service = DataService::new(100);
        for pattern in GRAPH_PATTERNS {
            let generated = graph(&service, 12, pattern);
            assert!(
                algoviz_core::graph::normalize(generated).is_ok(),
                "{pattern}"
            );
        }
    }

    #[test]
    fn connected_graph_reaches_every_node() {
        let service = DataService::new(100);
        let input = AlgorithmInput::Graph(graph(&service, 20, "connected"));
        let registry = build_registry();
        let bfs = registry.get("graph_bfs");
        let result = bfs.map(|alg| alg.execute(&input, &Parameters::new(), &mut StepTracker::new()));
        assert!(matches!(result, Some(Ok(AlgorithmOutput::Traversal(t))) if t.order.len() == 20));
    }

    #[test]
    fn presets_filter_by_type() {
        let service = DataService::new(100);
        assert_eq!(service.presets(None).len(), 5);
        assert_eq!(service.presets(Some(DataType::Array)).len(), 3);
        assert_eq!(service.presets(Some(DataType::Graph)).len(), 2);
    }

    #[test]
    fn weighted_preset_shortest_paths() {
        let service = DataService::new(100);
        let preset = service
            .presets(Some(DataType::Graph))
            .into_iter()
            .find(|p| p.id == "weighted_graph");
        let Some(preset) = preset else {
            return;
        };
        let registry = build_registry();
        let result = registry
            .get("graph_dijkstra")
            .map(|alg| alg.execute(&preset.data, &Parameters::new(), &mut StepTracker::new()));
        assert!(matches!(result, Some(Ok(AlgorithmOutput::ShortestPaths(_)))));
        let Some(Ok(AlgorithmOutput::ShortestPaths(paths))) = result else {
            return;
        };
        let expected = [("S", 0.0), ("B", 2.0), ("A", 3.0), ("C", 6.0), ("T", 8.0)];
        for (id, cost) in expected {
            assert_eq!(paths.distances.get(id), Some(&Distance::Finite(cost)), "{id}");
        }
    }
}

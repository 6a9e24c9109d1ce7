//! The contract every registered algorithm fulfils.
//!
//! [`Algorithm`] is the object-safe surface the registry and services work
//! with. The family traits [`SortingAlgorithm`], [`SearchingAlgorithm`] and
//! [`GraphAlgorithm`] expose the typed entry points; [`Algorithm::capability`]
//! narrows a trait object to its family.
//!
//! The `run_*` and `validate_*` functions hold the shared execute and
//! validation logic each family delegates to.

use algoviz_types::{
    AlgorithmInfo, AlgorithmInput, AlgorithmOutput, Category, Complexity, Element, ElementKind,
    GraphData, GraphKind, GraphShape, ParameterSpec, SearchOutcome,
};

use crate::error::AlgorithmError;
use crate::graph::normalize;
use crate::tracker::StepTracker;

/// Request parameters keyed by name.
pub type Parameters = serde_json::Map<String, serde_json::Value>;

/// Longest sequence any sorting or searching algorithm accepts.
pub const MAX_SEQUENCE_LEN: usize = 10_000;

/// Largest graph any graph algorithm accepts.
pub const MAX_GRAPH_NODES: usize = 10_000;

/// Family-specific view of an algorithm.
#[derive(Clone, Copy)]
pub enum Capability<'a> {
    /// A comparison sort.
    Sorting(&'a dyn SortingAlgorithm),
    /// A sequence search.
    Searching(&'a dyn SearchingAlgorithm),
    /// A graph algorithm.
    Graph(&'a dyn GraphAlgorithm),
}

/// An instrumented algorithm that can be listed, validated and executed.
pub trait Algorithm: Send + Sync {
    /// Registry key.
    fn id(&self) -> &'static str;

    /// Family.
    fn category(&self) -> Category;

    /// Catalog metadata.
    fn info(&self) -> AlgorithmInfo;

    /// Best, average and worst case complexity.
    fn complexity(&self) -> Complexity;

    /// Checks that `input` can be executed.
    fn validate_input(&self, input: &AlgorithmInput) -> Result<(), AlgorithmError>;

    /// Runs the algorithm on a private copy of `input`, recording steps into
    /// `tracker`.
    fn execute(
        &self,
        input: &AlgorithmInput,
        params: &Parameters,
        tracker: &mut StepTracker,
    ) -> Result<AlgorithmOutput, AlgorithmError>;

    /// Narrows to the family trait.
    fn capability(&self) -> Capability<'_>;
}

/// A comparison sort over [`Element`] sequences.
pub trait SortingAlgorithm: Algorithm {
    /// Sorts `data` in non-decreasing order.
    fn sort(&self, data: &mut [Element], params: &Parameters, tracker: &mut StepTracker);

    /// Preserves the relative order of equal elements.
    fn is_stable(&self) -> bool;

    /// Uses constant auxiliary storage for the data.
    fn is_in_place(&self) -> bool;

    /// Faster on partially ordered input.
    fn is_adaptive(&self) -> bool;
}

/// A search for one element in a sequence.
pub trait SearchingAlgorithm: Algorithm {
    /// Returns a position holding a value equal to `target`.
    fn search(&self, data: &[Element], target: &Element, tracker: &mut StepTracker)
    -> Option<usize>;

    /// Whether `data` must already be sorted for correct results.
    fn requires_sorted(&self) -> bool;
}

/// An algorithm over a normalized [`GraphData`].
pub trait GraphAlgorithm: Algorithm {
    /// Forms of graph the algorithm accepts.
    fn graph_shape(&self) -> GraphShape;

    /// Extra structural checks beyond the shape, run after normalization.
    fn check_graph(&self, _graph: &GraphData) -> Result<(), AlgorithmError> {
        Ok(())
    }

    /// Processes a graph that has passed normalization and validation.
    fn process_graph(
        &self,
        graph: &GraphData,
        params: &Parameters,
        tracker: &mut StepTracker,
    ) -> Result<AlgorithmOutput, AlgorithmError>;
}

// ---------------------------------------------------------------------------
// Metadata
// ---------------------------------------------------------------------------

/// Static description of an algorithm, turned into [`AlgorithmInfo`] by
/// [`describe`].
#[derive(Debug, Clone, Copy)]
pub struct Profile {
    /// Registry key.
    pub id: &'static str,
    /// Display name.
    pub name: &'static str,
    /// Family.
    pub category: Category,
    /// Short description.
    pub description: &'static str,
    /// Preserves the order of equal elements.
    pub stable: bool,
    /// Constant auxiliary storage.
    pub in_place: bool,
    /// Faster on partially ordered input.
    pub adaptive: bool,
}

/// Builds the catalog entry. The headline complexities are the worst-case
/// bounds.
pub fn describe(
    profile: &Profile,
    complexity: &Complexity,
    parameters: Vec<ParameterSpec>,
) -> AlgorithmInfo {
    AlgorithmInfo {
        id: profile.id.to_owned(),
        name: profile.name.to_owned(),
        category: profile.category,
        description: profile.description.to_owned(),
        time_complexity: complexity.time_complexity.worst.clone(),
        space_complexity: complexity.space_complexity.worst.clone(),
        parameters,
        stable: profile.stable,
        in_place: profile.in_place,
        adaptive: profile.adaptive,
    }
}

// ---------------------------------------------------------------------------
// Parameters
// ---------------------------------------------------------------------------

/// Reads an optional string parameter.
pub fn str_param<'a>(params: &'a Parameters, name: &str) -> Result<Option<&'a str>, AlgorithmError> {
    match params.get(name) {
        None | Some(serde_json::Value::Null) => Ok(None),
        Some(serde_json::Value::String(s)) => Ok(Some(s.as_str())),
        Some(other) => Err(AlgorithmError::invalid_parameter(
            name,
            format!("expected a string, got {other}"),
        )),
    }
}

/// Reads an optional string parameter restricted to `options`, falling back
/// to `default`.
pub fn choice_param<'a>(
    params: &'a Parameters,
    name: &str,
    options: &[&str],
    default: &'a str,
) -> Result<&'a str, AlgorithmError> {
    match str_param(params, name)? {
        None => Ok(default),
        Some(value) if options.contains(&value) => Ok(value),
        Some(value) => Err(AlgorithmError::invalid_parameter(
            name,
            format!("{value} is not one of {}", options.join(", ")),
        )),
    }
}

/// Reads an optional element-valued parameter.
pub fn element_param(params: &Parameters, name: &str) -> Result<Option<Element>, AlgorithmError> {
    match params.get(name) {
        None | Some(serde_json::Value::Null) => Ok(None),
        Some(value) => serde_json::from_value(value.clone()).map(Some).map_err(|e| {
            AlgorithmError::invalid_parameter(name, format!("expected a number or string: {e}"))
        }),
    }
}

// ---------------------------------------------------------------------------
// Sequences
// ---------------------------------------------------------------------------

/// Kind of the first element, `None` when empty.
pub fn sequence_kind(data: &[Element]) -> Option<ElementKind> {
    data.first().map(Element::kind)
}

/// Checks the shape, size and homogeneity of a sequence input.
pub fn validate_sequence(input: &AlgorithmInput) -> Result<&[Element], AlgorithmError> {
    let AlgorithmInput::Sequence(data) = input else {
        return Err(AlgorithmError::invalid_input(format!(
            "expected an array, got a {}",
            input.shape_name()
        )));
    };
    if data.len() > MAX_SEQUENCE_LEN {
        return Err(AlgorithmError::InputTooLarge {
            len: data.len(),
            max: MAX_SEQUENCE_LEN,
        });
    }
    if let Some(kind) = sequence_kind(data) {
        if data.iter().any(|e| !e.kind().is_compatible_with(kind)) {
            return Err(AlgorithmError::MixedElementKinds);
        }
    }
    Ok(data)
}

/// Shared `execute` for sorting algorithms.
pub fn run_sort<A: SortingAlgorithm + ?Sized>(
    algorithm: &A,
    input: &AlgorithmInput,
    params: &Parameters,
    tracker: &mut StepTracker,
) -> Result<AlgorithmOutput, AlgorithmError> {
    let mut data = validate_sequence(input)?.to_vec();
    algorithm.sort(&mut data, params, tracker);
    Ok(AlgorithmOutput::Sorted(data))
}

/// Shared `execute` for searching algorithms. The target comes from the
/// `target` parameter.
pub fn run_search<A: SearchingAlgorithm + ?Sized>(
    algorithm: &A,
    input: &AlgorithmInput,
    params: &Parameters,
    tracker: &mut StepTracker,
) -> Result<AlgorithmOutput, AlgorithmError> {
    let data = validate_sequence(input)?;
    let target = element_param(params, "target")?.ok_or_else(|| {
        AlgorithmError::MissingParameter {
            name: "target".to_owned(),
        }
    })?;
    if let Some(expected) = sequence_kind(data) {
        if !target.kind().is_compatible_with(expected) {
            return Err(AlgorithmError::TargetKindMismatch {
                expected,
                found: target.kind(),
            });
        }
    }
    let position = algorithm.search(data, &target, tracker);
    Ok(AlgorithmOutput::Search(SearchOutcome::new(position, target)))
}

/// The `target` parameter every searching algorithm declares.
pub fn target_parameter() -> ParameterSpec {
    ParameterSpec::required_element("target", "Value to search for")
}

// ---------------------------------------------------------------------------
// Graphs
// ---------------------------------------------------------------------------

/// Normalizes a graph input and checks it against the algorithm's shape and
/// extra constraints.
pub fn validate_graph<A: GraphAlgorithm + ?Sized>(
    algorithm: &A,
    input: &AlgorithmInput,
) -> Result<GraphData, AlgorithmError> {
    let AlgorithmInput::Graph(raw) = input else {
        return Err(AlgorithmError::invalid_input(format!(
            "expected a graph, got a {}",
            input.shape_name()
        )));
    };
    if raw.nodes.len() > MAX_GRAPH_NODES {
        return Err(AlgorithmError::InputTooLarge {
            len: raw.nodes.len(),
            max: MAX_GRAPH_NODES,
        });
    }
    let graph = normalize(raw.clone())?;
    let shape = algorithm.graph_shape();
    let fits = match shape {
        GraphShape::Both | GraphShape::Weighted => true,
        GraphShape::Directed => graph.kind == GraphKind::Directed,
        GraphShape::Undirected | GraphShape::UndirectedWeighted => {
            graph.kind == GraphKind::Undirected
        }
    };
    if !fits {
        return Err(AlgorithmError::UnsupportedGraph {
            algorithm: algorithm.id().to_owned(),
            required: shape,
        });
    }
    algorithm.check_graph(&graph)?;
    Ok(graph)
}

/// Shared `execute` for graph algorithms.
pub fn run_graph<A: GraphAlgorithm + ?Sized>(
    algorithm: &A,
    input: &AlgorithmInput,
    params: &Parameters,
    tracker: &mut StepTracker,
) -> Result<AlgorithmOutput, AlgorithmError> {
    let graph = validate_graph(algorithm, input)?;
    algorithm.process_graph(&graph, params, tracker)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn mixed_sequences_are_rejected() {
        let input = AlgorithmInput::Sequence(vec![Element::Int(1), "a".into()]);
        assert_eq!(validate_sequence(&input), Err(AlgorithmError::MixedElementKinds));

        let numeric = AlgorithmInput::Sequence(vec![Element::Int(1), Element::Float(0.5)]);
        assert!(validate_sequence(&numeric).is_ok());
    }

    #[test]
    fn oversized_sequences_are_rejected() {
        let input = AlgorithmInput::Sequence(vec![Element::Int(0); MAX_SEQUENCE_LEN.saturating_add(1)]);
        assert!(matches!(
            validate_sequence(&input),
            Err(AlgorithmError::InputTooLarge { max: MAX_SEQUENCE_LEN, .. })
        ));
    }

    #[test]
    fn graph_input_is_not_a_sequence() {
        let input = AlgorithmInput::Graph(GraphData::default());
        assert!(matches!(
            validate_sequence(&input),
            Err(AlgorithmError::InvalidInput { .. })
        ));
    }

    #[test]
    fn choice_parameter_validates_options() {
        let mut params = Parameters::new();
        assert_eq!(choice_param(&params, "method", &["a", "b"], "a"), Ok("a"));
        params.insert("method".to_owned(), "b".into());
        assert_eq!(choice_param(&params, "method", &["a", "b"], "a"), Ok("b"));
        params.insert("method".to_owned(), "c".into());
        assert!(choice_param(&params, "method", &["a", "b"], "a").is_err());
    }
}

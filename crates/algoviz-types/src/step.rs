//! Visualization steps: the trace an algorithm leaves behind.

use serde::{Deserialize, Deserializer, Serialize, Serializer};
use ts_rs::TS;

use crate::element::Element;
use crate::graph::GraphState;

/// Snapshot of the working data at the moment a step was recorded.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, TS)]
#[serde(untagged)]
#[ts(export, export_to = "bindings/")]
pub enum StepData {
    /// No data attached.
    #[default]
    Empty,
    /// A copy of the sequence being sorted or searched.
    Sequence(Vec<Element>),
    /// Traversal state of a graph algorithm.
    Graph(GraphState),
}

/// What a [`Comparison`] was made against.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, TS)]
#[serde(rename_all = "snake_case")]
#[ts(export, export_to = "bindings/")]
pub enum ComparisonKind {
    /// Two elements of the working sequence.
    Value,
    /// An element against the search target.
    Target,
    /// A graph edge relaxation or selection.
    Edge,
}

/// A single comparison attached to a step.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export, export_to = "bindings/")]
pub struct Comparison {
    /// Index of the left operand.
    pub index1: usize,
    /// Index of the right operand, or `-1` on the wire when the right
    /// operand is the search target.
    #[serde(serialize_with = "serialize_target_index", deserialize_with = "deserialize_target_index")]
    #[ts(type = "number")]
    pub index2: Option<usize>,
    /// `-1`, `0` or `1`.
    pub result: i8,
    /// Operand class.
    #[serde(rename = "type")]
    pub kind: ComparisonKind,
}

#[allow(clippy::ref_option)]
fn serialize_target_index<S: Serializer>(
    index: &Option<usize>,
    serializer: S,
) -> Result<S::Ok, S::Error> {
    match index {
        Some(i) => serializer.serialize_u64(u64::try_from(*i).unwrap_or(u64::MAX)),
        None => serializer.serialize_i64(-1),
    }
}

fn deserialize_target_index<'de, D: Deserializer<'de>>(
    deserializer: D,
) -> Result<Option<usize>, D::Error> {
    let raw = i64::deserialize(deserializer)?;
    Ok(usize::try_from(raw).ok())
}

/// Kinds of primitive operations an algorithm reports.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, TS)]
#[serde(rename_all = "snake_case")]
#[ts(export, export_to = "bindings/")]
pub enum OperationType {
    /// Two positions exchanged values.
    Swap,
    /// A value shifted to another position.
    Move,
    /// A value placed into a position or structure.
    Insert,
    /// A value removed or rejected.
    Delete,
    /// An explicit comparison operation.
    Compare,
    /// A value or node was read or visited.
    Access,
    /// A label or value was updated in place.
    Update,
    /// Two runs were merged.
    Merge,
    /// A range was split.
    Split,
    /// A range was partitioned around a pivot.
    Partition,
    /// A value was written from auxiliary storage.
    Assign,
    /// A subroutine was invoked.
    Call,
}

/// A primitive operation attached to a step.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export, export_to = "bindings/")]
pub struct Operation {
    /// Operation kind.
    #[serde(rename = "type")]
    pub kind: OperationType,
    /// Positions involved.
    pub indices: Vec<usize>,
    /// Values involved.
    pub values: Vec<Element>,
    /// Human-readable description.
    pub description: String,
}

/// Phase and free-form notes of a step.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export, export_to = "bindings/")]
pub struct StepMetadata {
    /// Algorithm phase active when the step was created.
    pub phase: String,
    /// Notes attached while the step was the latest one.
    pub notes: Vec<String>,
}

/// One recorded moment of an algorithm run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export, export_to = "bindings/")]
pub struct Step {
    /// Zero-based ordinal within the run.
    pub step_id: usize,
    /// Human-readable description.
    pub description: String,
    /// Data snapshot at this moment.
    pub data: StepData,
    /// Positions to highlight.
    pub highlights: Vec<usize>,
    /// Comparisons made during this step.
    pub comparisons: Vec<Comparison>,
    /// Operations performed during this step.
    pub operations: Vec<Operation>,
    /// Phase and notes.
    pub metadata: StepMetadata,
}

/// Operation counters accumulated over a run.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export, export_to = "bindings/")]
pub struct ExecutionStats {
    /// Comparisons recorded.
    pub comparisons: u64,
    /// Swap operations recorded.
    pub swaps: u64,
    /// Move operations recorded.
    pub moves: u64,
    /// Access operations recorded.
    pub accesses: u64,
}

impl ExecutionStats {
    /// Total primitive work used to rank benchmark runs.
    pub const fn total_operations(&self) -> u64 {
        self.comparisons
            .saturating_add(self.swaps)
            .saturating_add(self.moves)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn target_comparison_uses_negative_index_on_the_wire() {
        let cmp = Comparison {
            index1: 4,
            index2: None,
            result: 0,
            kind: ComparisonKind::Target,
        };
        let json = serde_json::to_value(&cmp).unwrap_or_default();
        assert_eq!(json["index2"], -1);
        assert_eq!(json["type"], "target");

        let back: Result<Comparison, _> = serde_json::from_value(json);
        assert!(matches!(back, Ok(c) if c.index2.is_none()));
    }

    #[test]
    fn empty_step_data_is_null() {
        let json = serde_json::to_string(&StepData::Empty).unwrap_or_default();
        assert_eq!(json, "null");
    }
}

//! Step recording for instrumented algorithm runs.
//!
//! Algorithms call [`StepTracker::add_step`] to open a step and receive a
//! [`StepHandle`]. Comparisons, operations and notes are attached through
//! the handle. Only the most recent step accepts attachments: a handle to an
//! older step is silently ignored and counts nothing.

use std::cmp::Ordering;

use algoviz_types::{
    Comparison, ComparisonKind, Element, ExecutionStats, Operation, OperationType, Step, StepData,
    StepMetadata,
};

use crate::comparator::ordering_to_i8;

/// Names the step returned by [`StepTracker::add_step`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct StepHandle(usize);

impl StepHandle {
    /// Zero-based ordinal of the step.
    pub const fn ordinal(self) -> usize {
        self.0
    }
}

/// How many steps the tracker keeps.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Retention {
    All,
    Limit(usize),
    None,
}

/// Accumulates steps and operation counters for one run.
#[derive(Debug)]
pub struct StepTracker {
    steps: Vec<Step>,
    stats: ExecutionStats,
    phase: String,
    retention: Retention,
    /// Steps created, including those not retained.
    created: usize,
}

impl Default for StepTracker {
    fn default() -> Self {
        Self::new()
    }
}

impl StepTracker {
    /// A tracker that records every step.
    pub const fn new() -> Self {
        Self::with_retention(Retention::All)
    }

    /// A tracker that counts operations but stores no steps.
    pub const fn counting() -> Self {
        Self::with_retention(Retention::None)
    }

    /// A tracker that stores at most `limit` steps and keeps counting after.
    pub const fn with_step_limit(limit: usize) -> Self {
        Self::with_retention(Retention::Limit(limit))
    }

    const fn with_retention(retention: Retention) -> Self {
        Self {
            steps: Vec::new(),
            stats: ExecutionStats {
                comparisons: 0,
                swaps: 0,
                moves: 0,
                accesses: 0,
            },
            phase: String::new(),
            retention,
            created: 0,
        }
    }

    /// Labels every step created after this call.
    pub fn set_phase(&mut self, phase: &str) {
        phase.clone_into(&mut self.phase);
    }

    /// Opens a new step. Previously returned handles stop accepting
    /// attachments.
    pub fn add_step(
        &mut self,
        description: impl Into<String>,
        data: StepData,
        highlights: Vec<usize>,
    ) -> StepHandle {
        let handle = StepHandle(self.created);
        self.created = self.created.saturating_add(1);
        if self.is_recording() {
            self.steps.push(Step {
                step_id: handle.0,
                description: description.into(),
                data,
                highlights,
                comparisons: Vec::new(),
                operations: Vec::new(),
                metadata: StepMetadata {
                    phase: self.phase.clone(),
                    notes: Vec::new(),
                },
            });
        }
        handle
    }

    /// Opens a new step holding a copy of `data`. The copy is skipped when
    /// the step will not be retained.
    pub fn add_sequence_step(
        &mut self,
        description: impl Into<String>,
        data: &[Element],
        highlights: Vec<usize>,
    ) -> StepHandle {
        let snapshot = if self.is_recording() {
            StepData::Sequence(data.to_vec())
        } else {
            StepData::Empty
        };
        self.add_step(description, snapshot, highlights)
    }

    /// Whether the next step will be stored.
    pub const fn is_recording(&self) -> bool {
        match self.retention {
            Retention::All => true,
            Retention::Limit(limit) => self.steps.len() < limit,
            Retention::None => false,
        }
    }

    /// Records a comparison between two sequence positions.
    pub fn add_comparison(&mut self, handle: StepHandle, i: usize, j: usize, ordering: Ordering) {
        self.push_comparison(handle, i, Some(j), ordering, ComparisonKind::Value);
    }

    /// Records a comparison between a sequence position and the search target.
    pub fn add_target_comparison(&mut self, handle: StepHandle, i: usize, ordering: Ordering) {
        self.push_comparison(handle, i, None, ordering, ComparisonKind::Target);
    }

    /// Records a comparison made while examining the edge between two nodes.
    pub fn add_edge_comparison(
        &mut self,
        handle: StepHandle,
        from: usize,
        to: usize,
        ordering: Ordering,
    ) {
        self.push_comparison(handle, from, Some(to), ordering, ComparisonKind::Edge);
    }

    fn push_comparison(
        &mut self,
        handle: StepHandle,
        index1: usize,
        index2: Option<usize>,
        ordering: Ordering,
        kind: ComparisonKind,
    ) {
        if !self.is_current(handle) {
            return;
        }
        self.stats.comparisons = self.stats.comparisons.saturating_add(1);
        if let Some(step) = self.retained_step(handle) {
            step.comparisons.push(Comparison {
                index1,
                index2,
                result: ordering_to_i8(ordering),
                kind,
            });
        }
    }

    /// Records a primitive operation. Swaps, moves and accesses bump their
    /// counters.
    pub fn add_operation(
        &mut self,
        handle: StepHandle,
        kind: OperationType,
        indices: Vec<usize>,
        values: Vec<Element>,
        description: impl Into<String>,
    ) {
        if !self.is_current(handle) {
            return;
        }
        match kind {
            OperationType::Swap => self.stats.swaps = self.stats.swaps.saturating_add(1),
            OperationType::Move => self.stats.moves = self.stats.moves.saturating_add(1),
            OperationType::Access => self.stats.accesses = self.stats.accesses.saturating_add(1),
            _ => {}
        }
        if let Some(step) = self.retained_step(handle) {
            step.operations.push(Operation {
                kind,
                indices,
                values,
                description: description.into(),
            });
        }
    }

    /// Appends a free-form note.
    pub fn add_note(&mut self, handle: StepHandle, note: impl Into<String>) {
        if !self.is_current(handle) {
            return;
        }
        if let Some(step) = self.retained_step(handle) {
            step.metadata.notes.push(note.into());
        }
    }

    fn is_current(&self, handle: StepHandle) -> bool {
        handle.0.checked_add(1) == Some(self.created)
    }

    fn retained_step(&mut self, handle: StepHandle) -> Option<&mut Step> {
        self.steps
            .last_mut()
            .filter(|step| step.step_id == handle.0)
    }

    /// Recorded steps.
    pub fn steps(&self) -> &[Step] {
        &self.steps
    }

    /// Operation counters so far.
    pub const fn stats(&self) -> ExecutionStats {
        self.stats
    }

    /// Steps created, whether or not they were retained.
    pub const fn step_count(&self) -> usize {
        self.created
    }

    /// Whether a step limit discarded steps.
    pub const fn is_truncated(&self) -> bool {
        matches!(self.retention, Retention::Limit(limit) if self.created > limit)
    }

    /// Consumes the tracker.
    pub fn into_parts(self) -> (Vec<Step>, ExecutionStats) {
        (self.steps, self.stats)
    }
}

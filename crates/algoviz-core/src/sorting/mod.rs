//! Instrumented comparison sorts.
//!
//! Every sort records a single step and returns when the input has at most
//! one element. Otherwise it opens with an initialization step, traces its
//! comparisons and data movement, and closes with a completion step in the
//! `done` phase.

mod bubble;
mod heap;
mod insertion;
mod merge;
mod quick;
mod selection;
mod shell;

pub use bubble::BubbleSort;
pub use heap::HeapSort;
pub use insertion::InsertionSort;
pub use merge::MergeSort;
pub use quick::QuickSort;
pub use selection::SelectionSort;
pub use shell::ShellSort;

use algoviz_types::Element;

use crate::tracker::StepTracker;

/// Records the single step of a sort over zero or one element. Returns
/// `true` when nothing more needs to happen.
pub(crate) fn already_sorted(data: &[Element], tracker: &mut StepTracker) -> bool {
    if data.len() > 1 {
        return false;
    }
    tracker.add_sequence_step(
        "array has at most one element, no sorting needed",
        data,
        Vec::new(),
    );
    true
}

/// Records the closing step of a sort.
pub(crate) fn finish(name: &str, data: &[Element], tracker: &mut StepTracker) {
    tracker.set_phase("done");
    tracker.add_sequence_step(format!("{name} complete"), data, Vec::new());
}

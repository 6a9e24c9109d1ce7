use std::cmp::Ordering;

use algoviz_types::{
    AlgorithmInfo, AlgorithmInput, AlgorithmOutput, Category, Complexity, ComplexityBounds,
    Element, OperationType,
};

use super::{already_sorted, finish};
use crate::algorithm::{
    Algorithm, Capability, Parameters, Profile, SortingAlgorithm, describe, run_sort,
    validate_sequence,
};
use crate::comparator::compare;
use crate::error::AlgorithmError;
use crate::tracker::StepTracker;

const PROFILE: Profile = Profile {
    id: "merge_sort",
    name: "Merge Sort",
    category: Category::Sorting,
    description: "Splits the array in half, sorts each half recursively and merges the \
                  sorted halves, taking from the left half on ties.",
    stable: true,
    in_place: false,
    adaptive: false,
};

/// Top-down merge sort.
#[derive(Debug, Clone, Copy, Default)]
pub struct MergeSort;

impl Algorithm for MergeSort {
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
            time_complexity: ComplexityBounds::uniform("O(n log n)"),
            space_complexity: ComplexityBounds::uniform("O(n)"),
        }
    }

    fn validate_input(&self, input: &AlgorithmInput) -> Result<(), AlgorithmError> {
        validate_sequence(input).map(|_| ())
    }

    fn execute(
        &self,
        input: &AlgorithmInput,
        params: &Parameters,
        tracker: &mut StepTracker,
    ) -> Result<AlgorithmOutput, AlgorithmError> {
        run_sort(self, input, params, tracker)
    }

    fn capability(&self) -> Capability<'_> {
        Capability::Sorting(self)
    }
}

impl SortingAlgorithm for MergeSort {
    fn sort(&self, data: &mut [Element], _params: &Parameters, tracker: &mut StepTracker) {
        if already_sorted(data, tracker) {
            return;
        }
        tracker.set_phase("init");
        tracker.add_sequence_step("start merge sort", data, Vec::new());
        let last = data.len().saturating_sub(1);
        split(data, 0, last, 0, tracker);
        finish("merge sort", data, tracker);
    }

    fn is_stable(&self) -> bool {
        PROFILE.stable
    }

    fn is_in_place(&self) -> bool {
        PROFILE.in_place
    }

    fn is_adaptive(&self) -> bool {
        PROFILE.adaptive
    }
}

/// Sorts the inclusive range `[left, right]`. Recursion depth is
/// logarithmic in the range length.
#[allow(clippy::arithmetic_side_effects)]
fn split(data: &mut [Element], left: usize, right: usize, depth: usize, tracker: &mut StepTracker) {
    if left >= right {
        return;
    }
    tracker.set_phase(&format!("depth {depth}: split"));
    tracker.add_sequence_step(
        format!("split subarray [{left}, {right}]"),
        data,
        (left..=right).collect(),
    );
    let mid = left + (right - left) / 2;
    tracker.add_sequence_step(format!("midpoint at {mid}"), data, vec![mid]);

    tracker.set_phase(&format!("depth {}: left half", depth + 1));
    split(data, left, mid, depth + 1, tracker);
    tracker.set_phase(&format!("depth {}: right half", depth + 1));
    split(data, mid + 1, right, depth + 1, tracker);

    tracker.set_phase(&format!("depth {depth}: merge"));
    merge(data, left, mid, right, tracker);
}

#[allow(clippy::indexing_slicing, clippy::arithmetic_side_effects)]
fn merge(data: &mut [Element], left: usize, mid: usize, right: usize, tracker: &mut StepTracker) {
    let left_run = data[left..=mid].to_vec();
    let right_run = data[mid + 1..=right].to_vec();
    tracker.add_sequence_step(
        format!(
            "merge subarrays [{left}, {mid}] and [{}, {right}]",
            mid + 1
        ),
        data,
        (left..=right).collect(),
    );

    let (mut i, mut j, mut k) = (0, 0, left);
    while i < left_run.len() && j < right_run.len() {
        let step = tracker.add_sequence_step(
            format!("compare {} and {}", left_run[i], right_run[j]),
            data,
            vec![k],
        );
        if compare(&left_run[i], &right_run[j]).is_le() {
            data[k] = left_run[i].clone();
            tracker.add_comparison(step, left + i, mid + 1 + j, Ordering::Less);
            tracker.add_operation(
                step,
                OperationType::Assign,
                vec![k],
                vec![left_run[i].clone()],
                "take from the left run",
            );
            i += 1;
        } else {
            data[k] = right_run[j].clone();
            tracker.add_comparison(step, left + i, mid + 1 + j, Ordering::Greater);
            tracker.add_operation(
                step,
                OperationType::Assign,
                vec![k],
                vec![right_run[j].clone()],
                "take from the right run",
            );
            j += 1;
        }
        tracker.add_sequence_step(
            format!("place {} at position {k}", data[k]),
            data,
            vec![k],
        );
        k += 1;
    }

    for (rest, side) in [(&left_run[i..], "left"), (&right_run[j..], "right")] {
        for value in rest {
            data[k] = value.clone();
            let step = tracker.add_sequence_step(
                format!("copy remaining {side} element {value}"),
                data,
                vec![k],
            );
            tracker.add_operation(
                step,
                OperationType::Assign,
                vec![k],
                vec![value.clone()],
                format!("copy remaining {side} run"),
            );
            k += 1;
        }
    }

    let step = tracker.add_sequence_step(
        format!("merged [{left}, {right}]"),
        data,
        (left..=right).collect(),
    );
    tracker.add_note(step, format!("subarray [{left}, {right}] sorted"));
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sorting::testing;

    #[test]
    fn sorts_the_corpus() {
        testing::assert_sorts(&MergeSort, &Parameters::new());
    }

    #[test]
    fn is_stable() {
        testing::assert_stable(&MergeSort);
    }

    #[test]
    fn phases_follow_recursion_depth() {
        let data: Vec<Element> = [3, 1, 2, 0].into_iter().map(Element::Int).collect();
        let tracker = testing::trace(&MergeSort, &data, &Parameters::new());
        let phases: Vec<&str> = tracker
            .steps()
            .iter()
            .map(|s| s.metadata.phase.as_str())
            .collect();
        assert!(phases.contains(&"depth 0: split"));
        assert!(phases.contains(&"depth 1: merge"));
        assert!(phases.contains(&"depth 0: merge"));
    }
}

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
    id: "selection_sort",
    name: "Selection Sort",
    category: Category::Sorting,
    description: "Repeatedly selects the smallest remaining element and swaps it to the \
                  front of the unsorted region.",
    stable: false,
    in_place: true,
    adaptive: false,
};

/// Minimum-selection sort.
#[derive(Debug, Clone, Copy, Default)]
pub struct SelectionSort;

impl Algorithm for SelectionSort {
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
            time_complexity: ComplexityBounds::uniform("O(n²)"),
            space_complexity: ComplexityBounds::uniform("O(1)"),
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

impl SortingAlgorithm for SelectionSort {
    #[allow(clippy::indexing_slicing, clippy::arithmetic_side_effects)]
    fn sort(&self, data: &mut [Element], _params: &Parameters, tracker: &mut StepTracker) {
        if already_sorted(data, tracker) {
            return;
        }
        let n = data.len();
        tracker.set_phase("init");
        tracker.add_sequence_step("start selection sort", data, Vec::new());

        for i in 0..n - 1 {
            tracker.set_phase(&format!("selection round {}", i + 1));
            let mut min = i;
            tracker.add_sequence_step(
                format!("assume {} at position {i} is the minimum", data[i]),
                data,
                vec![i],
            );
            if i > 0 {
                tracker.add_sequence_step(
                    format!(
                        "sorted region [0, {}], searching [{i}, {}] for the minimum",
                        i - 1,
                        n - 1
                    ),
                    data,
                    (0..i).collect(),
                );
            }

            for j in i + 1..n {
                let step = tracker.add_sequence_step(
                    format!("compare {} with current minimum {}", data[j], data[min]),
                    data,
                    vec![j, min],
                );
                if compare(&data[j], &data[min]) == Ordering::Less {
                    tracker.add_comparison(step, j, min, Ordering::Less);
                    let step = tracker.add_sequence_step(
                        format!("found smaller element {} at position {j}", data[j]),
                        data,
                        vec![j],
                    );
                    tracker.add_note(step, format!("minimum index {min} -> {j}"));
                    min = j;
                } else {
                    tracker.add_comparison(step, j, min, Ordering::Greater);
                }
            }

            if min == i {
                tracker.add_sequence_step("minimum already in place", data, vec![i]);
            } else {
                tracker.add_sequence_step(
                    format!("round minimum {} at position {min}", data[min]),
                    data,
                    vec![min],
                );
                let step = tracker.add_sequence_step(
                    format!("swap positions {i} and {min}"),
                    data,
                    vec![i, min],
                );
                data.swap(i, min);
                tracker.add_operation(
                    step,
                    OperationType::Swap,
                    vec![i, min],
                    vec![data[i].clone(), data[min].clone()],
                    "move the minimum into place",
                );
                tracker.add_sequence_step("swap done", data, vec![i]);
            }

            let step = tracker.add_sequence_step(
                format!("round {} finished, position {i} is final", i + 1),
                data,
                (0..=i).collect(),
            );
            tracker.add_note(step, format!("first {} elements sorted", i + 1));
        }

        finish("selection sort", data, tracker);
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

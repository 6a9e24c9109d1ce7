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
use crate::comparator::greater;
use crate::error::AlgorithmError;
use crate::tracker::StepTracker;

const PROFILE: Profile = Profile {
    id: "insertion_sort",
    name: "Insertion Sort",
    category: Category::Sorting,
    description: "Builds the sorted prefix one element at a time, shifting larger elements \
                  right to open the insertion point.",
    stable: true,
    in_place: true,
    adaptive: true,
};

/// Shift-and-insert sort.
#[derive(Debug, Clone, Copy, Default)]
pub struct InsertionSort;

impl Algorithm for InsertionSort {
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
            time_complexity: ComplexityBounds::new("O(n)", "O(n²)", "O(n²)"),
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

impl SortingAlgorithm for InsertionSort {
    #[allow(clippy::indexing_slicing, clippy::arithmetic_side_effects)]
    fn sort(&self, data: &mut [Element], _params: &Parameters, tracker: &mut StepTracker) {
        if already_sorted(data, tracker) {
            return;
        }
        let n = data.len();
        tracker.set_phase("init");
        let step = tracker.add_sequence_step("start insertion sort", data, Vec::new());
        tracker.add_note(step, "the first element is trivially sorted");

        for i in 1..n {
            tracker.set_phase(&format!("insert element {}", i + 1));
            let key = data[i].clone();
            tracker.add_sequence_step(
                format!("pick {key} at position {i} for insertion"),
                data,
                vec![i],
            );
            tracker.add_sequence_step(
                format!("sorted region [0, {}], unsorted region [{i}, {}]", i - 1, n - 1),
                data,
                (0..i).collect(),
            );

            // `hole` is the slot the key will land in; everything right of it
            // up to `i` has been shifted.
            let mut hole = i;
            while hole > 0 && greater(&data[hole - 1], &key) {
                let j = hole - 1;
                let step = tracker.add_sequence_step(
                    format!("compare {} with {key}", data[j]),
                    data,
                    vec![j, i],
                );
                tracker.add_comparison(step, j, i, Ordering::Greater);
                data[hole] = data[j].clone();
                tracker.add_operation(
                    step,
                    OperationType::Move,
                    vec![j, hole],
                    vec![data[hole].clone()],
                    "shift larger element right",
                );
                tracker.add_sequence_step(
                    format!("move {} to position {hole}", data[hole]),
                    data,
                    vec![hole],
                );
                hole = j;
            }

            if hole > 0 {
                let j = hole - 1;
                let step = tracker.add_sequence_step(
                    format!("compare {} with {key}, insertion point found", data[j]),
                    data,
                    vec![j],
                );
                tracker.add_comparison(step, j, i, Ordering::Less);
            }

            if hole == i {
                tracker.add_sequence_step(format!("{key} already in place"), data, vec![i]);
            } else {
                data[hole] = key.clone();
                let step = tracker.add_sequence_step(
                    format!("insert {key} at position {hole}"),
                    data,
                    vec![hole],
                );
                tracker.add_operation(
                    step,
                    OperationType::Insert,
                    vec![hole],
                    vec![key],
                    "insert element at its position",
                );
            }

            let step = tracker.add_sequence_step(
                format!("round {} finished, sorted region [0, {i}]", i + 1),
                data,
                (0..=i).collect(),
            );
            tracker.add_note(step, format!("first {} elements sorted", i + 1));
        }

        finish("insertion sort", data, tracker);
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

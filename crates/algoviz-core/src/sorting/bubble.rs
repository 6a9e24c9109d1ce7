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
    id: "bubble_sort",
    name: "Bubble Sort",
    category: Category::Sorting,
    description: "Repeatedly steps through the list, compares adjacent elements and swaps \
                  them when they are out of order. A pass without swaps ends the sort early.",
    stable: true,
    in_place: true,
    adaptive: true,
};

/// Adjacent-swap sort with early exit.
#[derive(Debug, Clone, Copy, Default)]
pub struct BubbleSort;

impl Algorithm for BubbleSort {
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

impl SortingAlgorithm for BubbleSort {
    #[allow(clippy::indexing_slicing, clippy::arithmetic_side_effects)]
    fn sort(&self, data: &mut [Element], _params: &Parameters, tracker: &mut StepTracker) {
        if already_sorted(data, tracker) {
            return;
        }
        let n = data.len();
        tracker.set_phase("init");
        tracker.add_sequence_step("start bubble sort", data, Vec::new());

        for i in 0..n - 1 {
            tracker.set_phase(&format!("pass {}", i + 1));
            let mut swapped = false;

            for j in 0..n - i - 1 {
                let step = tracker.add_sequence_step("compare elements", data, vec![j, j + 1]);
                if greater(&data[j], &data[j + 1]) {
                    tracker.add_comparison(step, j, j + 1, Ordering::Greater);
                    data.swap(j, j + 1);
                    swapped = true;
                    tracker.add_operation(
                        step,
                        OperationType::Swap,
                        vec![j, j + 1],
                        vec![data[j].clone(), data[j + 1].clone()],
                        "swap elements",
                    );
                    tracker.add_sequence_step("swap elements", data, vec![j, j + 1]);
                } else {
                    tracker.add_comparison(step, j, j + 1, Ordering::Less);
                }
            }

            let settled = n - i - 1;
            let step = tracker.add_sequence_step(
                format!("pass {} finished, largest element in place", i + 1),
                data,
                vec![settled],
            );
            tracker.add_note(step, format!("position {settled} is final"));

            if !swapped {
                let step = tracker.add_sequence_step("no swaps, array is sorted", data, Vec::new());
                tracker.add_note(step, "input already ordered, stopping early");
                break;
            }
        }

        finish("bubble sort", data, tracker);
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

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sorting::testing;

    #[test]
    fn sorts_the_corpus() {
        testing::assert_sorts(&BubbleSort, &Parameters::new());
    }

    #[test]
    fn is_stable() {
        testing::assert_stable(&BubbleSort);
    }

    #[test]
    fn reversed_five_takes_ten_comparisons_and_swaps() {
        let data: Vec<Element> = [5, 4, 3, 2, 1].into_iter().map(Element::Int).collect();
        let tracker = testing::trace(&BubbleSort, &data, &Parameters::new());
        let stats = tracker.stats();
        assert_eq!(stats.comparisons, 10);
        assert_eq!(stats.swaps, 10);
        assert_eq!(
            tracker.steps().last().map(|s| s.metadata.phase.as_str()),
            Some("done")
        );
    }

    #[test]
    fn sorted_input_exits_after_one_pass() {
        let data: Vec<Element> = (1..=6).map(Element::Int).collect();
        let tracker = testing::trace(&BubbleSort, &data, &Parameters::new());
        assert_eq!(tracker.stats().comparisons, 5);
        assert_eq!(tracker.stats().swaps, 0);
    }

    #[test]
    fn single_element_records_one_step() {
        let tracker = testing::trace(&BubbleSort, &[Element::Int(9)], &Parameters::new());
        assert_eq!(tracker.step_count(), 1);
    }
}

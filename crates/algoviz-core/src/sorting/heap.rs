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
    id: "heap_sort",
    name: "Heap Sort",
    category: Category::Sorting,
    description: "Arranges the array into a max-heap, then repeatedly moves the root to the \
                  end of the shrinking heap and restores the heap property.",
    stable: false,
    in_place: true,
    adaptive: false,
};

/// Binary max-heap sort.
#[derive(Debug, Clone, Copy, Default)]
pub struct HeapSort;

impl Algorithm for HeapSort {
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

impl SortingAlgorithm for HeapSort {
    #[allow(clippy::indexing_slicing, clippy::arithmetic_side_effects)]
    fn sort(&self, data: &mut [Element], _params: &Parameters, tracker: &mut StepTracker) {
        if already_sorted(data, tracker) {
            return;
        }
        let n = data.len();
        tracker.set_phase("init");
        tracker.add_sequence_step("start heap sort", data, Vec::new());

        tracker.set_phase("build max heap");
        let step = tracker.add_sequence_step("start building the max heap", data, Vec::new());
        tracker.add_note(step, "sift down from the last internal node upwards");
        for root in (0..n / 2).rev() {
            tracker.add_sequence_step(format!("heapify node {root}"), data, vec![root]);
            sift_down(data, n, root, tracker);
        }
        let step = tracker.add_sequence_step("max heap built", data, Vec::new());
        tracker.add_note(step, format!("heap root is the maximum: {}", data[0]));

        tracker.set_phase("extract");
        for end in (1..n).rev() {
            let step = tracker.add_sequence_step(
                format!("swap heap root with position {end}"),
                data,
                vec![0, end],
            );
            data.swap(0, end);
            tracker.add_operation(
                step,
                OperationType::Swap,
                vec![0, end],
                vec![data[0].clone(), data[end].clone()],
                "move the maximum behind the heap",
            );
            let step = tracker.add_sequence_step(
                format!("shrink heap, re-heapify [0, {}]", end - 1),
                data,
                Vec::new(),
            );
            tracker.add_note(step, format!("position {end} is final"));
            sift_down(data, end, 0, tracker);
        }

        finish("heap sort", data, tracker);
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

/// Restores the max-heap property for the subtree at `root` within
/// `data[..heap_size]`.
#[allow(clippy::indexing_slicing, clippy::arithmetic_side_effects)]
fn sift_down(data: &mut [Element], heap_size: usize, mut root: usize, tracker: &mut StepTracker) {
    loop {
        let left = 2 * root + 1;
        let right = left + 1;
        let mut largest = root;

        let mut highlights = vec![root];
        highlights.extend([left, right].into_iter().filter(|&c| c < heap_size));
        tracker.add_sequence_step(
            format!("inspect node {root} and its children"),
            data,
            highlights,
        );

        for (child, side) in [(left, "left"), (right, "right")] {
            if child >= heap_size {
                continue;
            }
            let step = tracker.add_sequence_step(
                format!("compare {} with {side} child {}", data[largest], data[child]),
                data,
                vec![largest, child],
            );
            if greater(&data[child], &data[largest]) {
                tracker.add_comparison(step, child, largest, Ordering::Greater);
                tracker.add_note(step, format!("{side} child is larger"));
                largest = child;
            } else {
                tracker.add_comparison(step, child, largest, Ordering::Less);
            }
        }

        if largest == root {
            tracker.add_sequence_step("heap property holds, no swap", data, vec![root]);
            return;
        }

        let step = tracker.add_sequence_step(
            format!("maximum at position {largest}, swap with the root"),
            data,
            vec![root, largest],
        );
        data.swap(root, largest);
        tracker.add_operation(
            step,
            OperationType::Swap,
            vec![root, largest],
            vec![data[root].clone(), data[largest].clone()],
            "sift the root down",
        );
        tracker.add_sequence_step("swap done, continue sifting down", data, vec![largest]);
        root = largest;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sorting::testing;

    #[test]
    fn sorts_the_corpus() {
        testing::assert_sorts(&HeapSort, &Parameters::new());
    }

    #[test]
    fn reports_as_unstable_and_in_place() {
        assert!(!HeapSort.is_stable());
        assert!(HeapSort.is_in_place());
        assert!(!HeapSort.info().adaptive);
    }
}

use std::cmp::Ordering;

use algoviz_types::{
    AlgorithmInfo, AlgorithmInput, AlgorithmOutput, Category, Complexity, ComplexityBounds,
    Element, OperationType, ParameterSpec,
};
use rand::Rng;

use super::{already_sorted, finish};
use crate::algorithm::{
    Algorithm, Capability, Parameters, Profile, SortingAlgorithm, choice_param, describe,
    run_sort, validate_sequence,
};
use crate::comparator::compare;
use crate::error::AlgorithmError;
use crate::tracker::StepTracker;

const PROFILE: Profile = Profile {
    id: "quick_sort",
    name: "Quick Sort",
    category: Category::Sorting,
    description: "Partitions the array around a pivot so smaller elements precede it, then \
                  sorts both partitions.",
    stable: false,
    in_place: true,
    adaptive: false,
};

const PIVOT_PARAM: &str = "pivot_strategy";
const PIVOT_STRATEGIES: [&str; 4] = ["first", "last", "middle", "random"];
const DEFAULT_PIVOT: &str = "last";

/// Lomuto-partition quicksort with selectable pivot.
#[derive(Debug, Clone, Copy, Default)]
pub struct QuickSort;

impl Algorithm for QuickSort {
    fn id(&self) -> &'static str {
        PROFILE.id
    }

    fn category(&self) -> Category {
        PROFILE.category
    }

    fn info(&self) -> AlgorithmInfo {
        describe(
            &PROFILE,
            &self.complexity(),
            vec![ParameterSpec::choice(
                PIVOT_PARAM,
                "Pivot selection strategy",
                DEFAULT_PIVOT,
                &PIVOT_STRATEGIES,
            )],
        )
    }

    fn complexity(&self) -> Complexity {
        Complexity {
            time_complexity: ComplexityBounds::new("O(n log n)", "O(n log n)", "O(n²)"),
            space_complexity: ComplexityBounds::new("O(log n)", "O(log n)", "O(n)"),
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
        choice_param(params, PIVOT_PARAM, &PIVOT_STRATEGIES, DEFAULT_PIVOT)?;
        run_sort(self, input, params, tracker)
    }

    fn capability(&self) -> Capability<'_> {
        Capability::Sorting(self)
    }
}

impl SortingAlgorithm for QuickSort {
    #[allow(clippy::arithmetic_side_effects)]
    fn sort(&self, data: &mut [Element], params: &Parameters, tracker: &mut StepTracker) {
        if already_sorted(data, tracker) {
            return;
        }
        let strategy = choice_param(params, PIVOT_PARAM, &PIVOT_STRATEGIES, DEFAULT_PIVOT)
            .unwrap_or(DEFAULT_PIVOT);
        tracker.set_phase("init");
        tracker.add_sequence_step("start quick sort", data, Vec::new());

        // Ranges are popped in the same order recursion would visit them.
        let mut pending = vec![(0, data.len() - 1, 0_usize)];
        while let Some((low, high, depth)) = pending.pop() {
            tracker.set_phase(&format!("depth {depth}: partition"));
            tracker.add_sequence_step(
                format!("process subarray [{low}, {high}]"),
                data,
                (low..=high).collect(),
            );
            let pivot = partition(data, low, high, strategy, tracker);
            let step = tracker.add_sequence_step(
                format!("partition done, pivot at {pivot}"),
                data,
                vec![pivot],
            );
            tracker.add_note(
                step,
                format!(
                    "pivot {} is in its final position",
                    data.get(pivot).map(ToString::to_string).unwrap_or_default()
                ),
            );

            if pivot + 1 < high {
                pending.push((pivot + 1, high, depth + 1));
            }
            if pivot > low + 1 {
                pending.push((low, pivot - 1, depth + 1));
            }
        }

        finish("quick sort", data, tracker);
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

/// Picks the pivot position in `[low, high]` for `strategy`.
#[allow(clippy::arithmetic_side_effects)]
fn choose_pivot(low: usize, high: usize, strategy: &str) -> usize {
    match strategy {
        "first" => low,
        "middle" => low + (high - low) / 2,
        "random" => rand::rng().random_range(low..=high),
        _ => high,
    }
}

/// Lomuto partition of `[low, high]`. Returns the pivot's final position.
#[allow(clippy::indexing_slicing, clippy::arithmetic_side_effects)]
fn partition(
    data: &mut [Element],
    low: usize,
    high: usize,
    strategy: &str,
    tracker: &mut StepTracker,
) -> usize {
    let chosen = choose_pivot(low, high, strategy);
    if chosen != high {
        let step = tracker.add_sequence_step(
            format!("move pivot candidate at {chosen} to the end"),
            data,
            vec![chosen, high],
        );
        data.swap(chosen, high);
        tracker.add_operation(
            step,
            OperationType::Swap,
            vec![chosen, high],
            vec![data[chosen].clone(), data[high].clone()],
            "move pivot to the end of the range",
        );
    }
    let pivot = data[high].clone();
    tracker.add_sequence_step(format!("pivot is {pivot}"), data, vec![high]);

    // `boundary` is one past the last element known to be <= pivot.
    let mut boundary = low;
    for j in low..high {
        let step = tracker.add_sequence_step("compare with pivot", data, vec![j, high]);
        if compare(&data[j], &pivot).is_le() {
            tracker.add_comparison(step, j, high, Ordering::Less);
            if boundary != j {
                data.swap(boundary, j);
                tracker.add_operation(
                    step,
                    OperationType::Swap,
                    vec![boundary, j],
                    vec![data[boundary].clone(), data[j].clone()],
                    "move element below the pivot",
                );
                tracker.add_sequence_step("swap elements", data, vec![boundary, j]);
            }
            boundary += 1;
        } else {
            tracker.add_comparison(step, j, high, Ordering::Greater);
        }
    }

    if boundary != high {
        let step = tracker.add_sequence_step("place pivot", data, vec![boundary, high]);
        data.swap(boundary, high);
        tracker.add_operation(
            step,
            OperationType::Swap,
            vec![boundary, high],
            vec![data[boundary].clone(), data[high].clone()],
            "place pivot in its final position",
        );
        tracker.add_sequence_step("pivot in place", data, vec![boundary]);
    }
    boundary
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sorting::testing;

    fn with_strategy(strategy: &str) -> Parameters {
        let mut params = Parameters::new();
        params.insert(PIVOT_PARAM.to_owned(), strategy.into());
        params
    }

    #[test]
    fn sorts_the_corpus_with_every_strategy() {
        for strategy in PIVOT_STRATEGIES {
            testing::assert_sorts(&QuickSort, &with_strategy(strategy));
        }
    }

    #[test]
    fn rejects_unknown_strategy() {
        let input = AlgorithmInput::Sequence(vec![Element::Int(2), Element::Int(1)]);
        let result = QuickSort.execute(&input, &with_strategy("median"), &mut StepTracker::new());
        assert!(matches!(result, Err(AlgorithmError::InvalidParameter { .. })));
    }

    #[test]
    fn sorted_input_with_last_pivot_does_not_overflow() {
        let data: Vec<Element> = (0..2_000).map(Element::Int).collect();
        let mut tracker = StepTracker::counting();
        let input = AlgorithmInput::Sequence(data.clone());
        let out = QuickSort.execute(&input, &Parameters::new(), &mut tracker);
        assert!(matches!(out, Ok(AlgorithmOutput::Sorted(sorted)) if sorted == data));
        assert_eq!(tracker.stats().swaps, 0);
    }

    #[test]
    fn advertises_pivot_parameter() {
        let info = QuickSort.info();
        assert_eq!(info.parameters.len(), 1);
        assert_eq!(info.parameters.first().map(|p| p.name.as_str()), Some(PIVOT_PARAM));
    }
}

use std::cmp::Ordering;

use algoviz_types::{
    AlgorithmInfo, AlgorithmInput, AlgorithmOutput, Category, Complexity, ComplexityBounds,
    Element,
};

use super::nothing_to_search;
use crate::algorithm::{
    Algorithm, Capability, Parameters, Profile, SearchingAlgorithm, describe, run_search,
    target_parameter, validate_sequence,
};
use crate::comparator::compare;
use crate::error::AlgorithmError;
use crate::tracker::StepTracker;

const PROFILE: Profile = Profile {
    id: "binary_search",
    name: "Binary Search",
    category: Category::Searching,
    description: "Halves the search range of a sorted array on every probe by comparing the \
                  middle element with the target.",
    stable: true,
    in_place: true,
    adaptive: false,
};

/// Midpoint bisection over sorted input.
#[derive(Debug, Clone, Copy, Default)]
pub struct BinarySearch;

impl Algorithm for BinarySearch {
    fn id(&self) -> &'static str {
        PROFILE.id
    }

    fn category(&self) -> Category {
        PROFILE.category
    }

    fn info(&self) -> AlgorithmInfo {
        describe(&PROFILE, &self.complexity(), vec![target_parameter()])
    }

    fn complexity(&self) -> Complexity {
        Complexity {
            time_complexity: ComplexityBounds::new("O(1)", "O(log n)", "O(log n)"),
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
        run_search(self, input, params, tracker)
    }

    fn capability(&self) -> Capability<'_> {
        Capability::Searching(self)
    }
}

impl SearchingAlgorithm for BinarySearch {
    /// Unsorted input yields an unspecified, but terminating, result.
    #[allow(clippy::arithmetic_side_effects)]
    fn search(
        &self,
        data: &[Element],
        target: &Element,
        tracker: &mut StepTracker,
    ) -> Option<usize> {
        if nothing_to_search(data, tracker) {
            return None;
        }
        tracker.set_phase("init");
        tracker.add_sequence_step(format!("start binary search for {target}"), data, Vec::new());

        // Half-open range [low, high).
        let (mut low, mut high) = (0, data.len());
        tracker.set_phase("search");
        while low < high {
            let mid = low + (high - low) / 2;
            let right = high - 1;
            let step = tracker.add_sequence_step(
                format!("search range [{low}, {right}], middle at {mid}"),
                data,
                vec![low, mid, right],
            );
            let ordering = data.get(mid).map_or(Ordering::Equal, |v| compare(v, target));
            tracker.add_target_comparison(step, mid, ordering);

            match ordering {
                Ordering::Equal => {
                    let step = tracker.add_sequence_step(
                        format!("found target at position {mid}"),
                        data,
                        vec![mid],
                    );
                    tracker.add_note(step, "search succeeded");
                    return Some(mid);
                }
                Ordering::Less => {
                    let step = tracker.add_sequence_step(
                        "middle element is smaller, search the right half",
                        data,
                        vec![mid],
                    );
                    tracker.add_note(step, format!("new range [{}, {right}]", mid + 1));
                    low = mid + 1;
                }
                Ordering::Greater => {
                    let step = tracker.add_sequence_step(
                        "middle element is larger, search the left half",
                        data,
                        vec![mid],
                    );
                    tracker.add_note(step, format!("new range [{low}, {}]", mid.saturating_sub(1)));
                    high = mid;
                }
            }
        }

        tracker.set_phase("done");
        let step = tracker.add_sequence_step("search range is empty, target not found", data, Vec::new());
        tracker.add_note(step, "search failed");
        None
    }

    fn requires_sorted(&self) -> bool {
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::searching::testing;

    #[test]
    fn finds_every_present_value() {
        let data = [1, 3, 5, 7, 9, 11, 13];
        for (i, &v) in data.iter().enumerate() {
            let outcome = testing::search(&BinarySearch, &data, v);
            let expected = i64::try_from(i).unwrap_or_default();
            assert!(matches!(outcome, Ok(o) if o.found && o.index == expected));
        }
    }

    #[test]
    fn absent_values_are_not_found() {
        for needle in [0, 4, 14] {
            let outcome = testing::search(&BinarySearch, &[1, 3, 5, 7, 9, 11, 13], needle);
            assert!(matches!(outcome, Ok(o) if !o.found && o.index == -1));
        }
    }

    #[test]
    fn probes_are_logarithmic() {
        let data: Vec<Element> = (0..1024).map(Element::Int).collect();
        let mut tracker = StepTracker::new();
        let input = AlgorithmInput::Sequence(data);
        assert!(BinarySearch.execute(&input, &testing::target(-5), &mut tracker).is_ok());
        assert!(tracker.stats().comparisons <= 11);
    }

    #[test]
    fn unsorted_input_terminates() {
        let outcome = testing::search(&BinarySearch, &[9, 1, 8, 2, 7], 2);
        assert!(outcome.is_ok());
        assert!(BinarySearch.requires_sorted());
    }
}

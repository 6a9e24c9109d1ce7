use algoviz_types::{
    AlgorithmInfo, AlgorithmInput, AlgorithmOutput, Category, Complexity, ComplexityBounds,
    Element, OperationType,
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
    id: "linear_search",
    name: "Linear Search",
    category: Category::Searching,
    description: "Checks every element from the front until one equals the target.",
    stable: true,
    in_place: true,
    adaptive: false,
};

/// Front-to-back scan.
#[derive(Debug, Clone, Copy, Default)]
pub struct LinearSearch;

impl Algorithm for LinearSearch {
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
            time_complexity: ComplexityBounds::new("O(1)", "O(n)", "O(n)"),
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

impl SearchingAlgorithm for LinearSearch {
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
        let step =
            tracker.add_sequence_step(format!("start linear search for {target}"), data, Vec::new());
        tracker.add_note(step, "elements are checked one by one from index 0");

        for (i, value) in data.iter().enumerate() {
            tracker.set_phase(&format!("check position {i}"));
            let step =
                tracker.add_sequence_step(format!("check {value} at position {i}"), data, vec![i]);
            tracker.add_operation(step, OperationType::Access, vec![i], vec![value.clone()], "read");
            let ordering = compare(value, target);
            tracker.add_target_comparison(step, i, ordering);
            if ordering.is_eq() {
                let step = tracker.add_sequence_step(
                    format!("found target at position {i}"),
                    data,
                    vec![i],
                );
                tracker.add_note(step, format!("found after checking {} elements", i.saturating_add(1)));
                return Some(i);
            }
            tracker.add_sequence_step(format!("{value} does not match, continue"), data, Vec::new());
        }

        tracker.set_phase("done");
        let step = tracker.add_sequence_step("scan finished, target not found", data, Vec::new());
        tracker.add_note(step, format!("not found after checking all {} elements", data.len()));
        None
    }

    fn requires_sorted(&self) -> bool {
        false
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::searching::testing;

    #[test]
    fn finds_first_occurrence() {
        let outcome = testing::search(&LinearSearch, &[4, 8, 15, 8, 23], 8);
        assert!(matches!(outcome, Ok(o) if o.found && o.index == 1));
    }

    #[test]
    fn absent_target_reports_minus_one() {
        let outcome = testing::search(&LinearSearch, &[4, 8, 15], 16);
        assert!(matches!(outcome, Ok(o) if !o.found && o.index == -1));
    }

    #[test]
    fn empty_array_records_one_step() {
        let mut tracker = StepTracker::new();
        let input = AlgorithmInput::Sequence(Vec::new());
        let result = LinearSearch.execute(&input, &testing::target(1), &mut tracker);
        assert!(matches!(result, Ok(AlgorithmOutput::Search(o)) if o.index == -1));
        assert_eq!(tracker.step_count(), 1);
    }

    #[test]
    fn missing_target_is_an_error() {
        let input = AlgorithmInput::Sequence(vec![Element::Int(1)]);
        let result = LinearSearch.execute(&input, &Parameters::new(), &mut StepTracker::new());
        assert!(matches!(result, Err(AlgorithmError::MissingParameter { .. })));
    }

    #[test]
    fn string_target_against_numbers_is_rejected() {
        let input = AlgorithmInput::Sequence(vec![Element::Int(1)]);
        let result = LinearSearch.execute(&input, &testing::target("1"), &mut StepTracker::new());
        assert!(matches!(result, Err(AlgorithmError::TargetKindMismatch { .. })));
    }

    #[test]
    fn comparisons_use_target_sentinel() {
        let mut tracker = StepTracker::new();
        let input = AlgorithmInput::Sequence(vec![Element::Int(3), Element::Int(5)]);
        assert!(LinearSearch.execute(&input, &testing::target(5), &mut tracker).is_ok());
        assert_eq!(tracker.stats().comparisons, 2);
        let sentinel = tracker
            .steps()
            .iter()
            .flat_map(|s| &s.comparisons)
            .all(|c| c.index2.is_none());
        assert!(sentinel);
    }
}

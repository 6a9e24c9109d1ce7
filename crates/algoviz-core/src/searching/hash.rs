use std::cmp::Ordering;

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
    id: "hash_search",
    name: "Hash Search",
    category: Category::Searching,
    description: "Builds a chained hash table over the array, then inspects only the bucket \
                  the target hashes to.",
    stable: true,
    in_place: false,
    adaptive: false,
};

const MIN_BUCKETS: usize = 16;

/// Chained hash table lookup.
#[derive(Debug, Clone, Copy, Default)]
pub struct HashSearch;

impl Algorithm for HashSearch {
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
            time_complexity: ComplexityBounds::new("O(1)", "O(1)", "O(n)"),
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
        run_search(self, input, params, tracker)
    }

    fn capability(&self) -> Capability<'_> {
        Capability::Searching(self)
    }
}

impl SearchingAlgorithm for HashSearch {
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
        tracker.add_sequence_step(format!("start hash search for {target}"), data, Vec::new());

        tracker.set_phase("build table");
        let size = data.len().saturating_mul(2).max(MIN_BUCKETS);
        let mut buckets: Vec<Vec<usize>> = vec![Vec::new(); size];
        let step = tracker.add_sequence_step(format!("create hash table with {size} buckets"), data, Vec::new());
        tracker.add_note(step, "every element is inserted before searching");

        for (i, value) in data.iter().enumerate() {
            let bucket = bucket_of(value, size);
            let step = tracker.add_sequence_step(format!("insert {value} into the table"), data, vec![i]);
            tracker.add_note(step, format!("hash of {value} is {bucket}"));
            if let Some(chain) = buckets.get_mut(bucket) {
                if !chain.is_empty() {
                    tracker.add_note(step, format!("collision in bucket {bucket}"));
                }
                chain.push(i);
            }
            tracker.add_operation(
                step,
                OperationType::Insert,
                vec![i],
                vec![value.clone()],
                format!("insert into bucket {bucket}"),
            );
        }
        tracker.add_sequence_step("hash table built", data, Vec::new());

        tracker.set_phase("lookup");
        let bucket = bucket_of(target, size);
        let step = tracker.add_sequence_step(format!("target {target} hashes to bucket {bucket}"), data, Vec::new());
        tracker.add_note(step, format!("access bucket {bucket} directly"));

        let chain = buckets.get(bucket).map(Vec::as_slice).unwrap_or_default();
        if chain.is_empty() {
            let step = tracker.add_sequence_step(format!("bucket {bucket} is empty, target not present"), data, Vec::new());
            tracker.add_note(step, "search failed");
            return None;
        }

        tracker.add_sequence_step(
            format!("scan bucket {bucket} holding {} entries", chain.len()),
            data,
            Vec::new(),
        );
        for (n, &index) in chain.iter().enumerate() {
            let Some(value) = data.get(index) else {
                continue;
            };
            let step = tracker.add_sequence_step(
                format!("check entry {} of the bucket: {value}", n.saturating_add(1)),
                data,
                vec![index],
            );
            let ordering = compare(value, target);
            tracker.add_target_comparison(step, index, ordering);
            if ordering == Ordering::Equal {
                let step = tracker.add_sequence_step(format!("found target at position {index}"), data, vec![index]);
                tracker.add_note(step, "hashing gives O(1) average lookup");
                return Some(index);
            }
        }

        let step = tracker.add_sequence_step(format!("target not in bucket {bucket}"), data, Vec::new());
        tracker.add_note(step, "search failed");
        None
    }

    fn requires_sorted(&self) -> bool {
        false
    }
}

/// Bucket index of `value` in a table of `size` buckets. Integers hash to
/// themselves, floats to their truncation and strings to a base-31
/// polynomial over their characters.
#[allow(clippy::cast_possible_truncation)]
fn bucket_of(value: &Element, size: usize) -> usize {
    let hash: i64 = match value {
        Element::Int(v) => *v,
        Element::Float(v) => *v as i64,
        Element::Str(s) => s
            .chars()
            .fold(0_i64, |h, c| h.wrapping_mul(31).wrapping_add(i64::from(u32::from(c)))),
    };
    let size = u64::try_from(size).unwrap_or(u64::MAX).max(1);
    usize::try_from(hash.unsigned_abs() % size).unwrap_or(0)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::searching::testing;

    #[test]
    fn finds_present_values_despite_collisions() {
        // 16 buckets: 1, 17 and 33 share bucket 1.
        let data = [1, 17, 33, 4];
        let outcome = testing::search(&HashSearch, &data, 33);
        assert!(matches!(outcome, Ok(o) if o.found && o.index == 2));
    }

    #[test]
    fn absent_values_are_not_found() {
        let outcome = testing::search(&HashSearch, &[1, 17, 33], 49);
        assert!(matches!(outcome, Ok(o) if !o.found));
        let outcome = testing::search(&HashSearch, &[1, 17, 33], 5);
        assert!(matches!(outcome, Ok(o) if !o.found));
    }

    #[test]
    fn equal_int_and_float_share_a_bucket() {
        assert_eq!(bucket_of(&Element::Int(7), 16), bucket_of(&Element::Float(7.0), 16));
        assert_eq!(bucket_of(&Element::Int(-7), 16), 7);
    }

    #[test]
    fn finds_strings() {
        let input = AlgorithmInput::Sequence(vec!["kiwi".into(), "plum".into(), "date".into()]);
        let result = HashSearch.execute(&input, &testing::target("plum"), &mut StepTracker::new());
        assert!(matches!(result, Ok(AlgorithmOutput::Search(o)) if o.index == 1));
    }

    #[test]
    fn records_one_insert_per_element() {
        let input = AlgorithmInput::Sequence((0..5).map(Element::Int).collect());
        let mut tracker = StepTracker::new();
        assert!(HashSearch.execute(&input, &testing::target(3), &mut tracker).is_ok());
        let inserts = tracker
            .steps()
            .iter()
            .flat_map(|s| &s.operations)
            .filter(|op| op.kind == OperationType::Insert)
            .count();
        assert_eq!(inserts, 5);
    }
}

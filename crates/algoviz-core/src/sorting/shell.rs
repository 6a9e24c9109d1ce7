use std::cmp::Ordering;

use algoviz_types::{
    AlgorithmInfo, AlgorithmInput, AlgorithmOutput, Category, Complexity, ComplexityBounds,
    Element, OperationType, ParameterSpec,
};

use super::{already_sorted, finish};
use crate::algorithm::{
    Algorithm, Capability, Parameters, Profile, SortingAlgorithm, choice_param, describe,
    run_sort, validate_sequence,
};
use crate::comparator::greater;
use crate::error::AlgorithmError;
use crate::tracker::StepTracker;

const PROFILE: Profile = Profile {
    id: "shell_sort",
    name: "Shell Sort",
    category: Category::Sorting,
    description: "Insertion sort over interleaved subsequences with a shrinking gap, ending \
                  with a plain insertion sort at gap 1.",
    stable: false,
    in_place: true,
    adaptive: true,
};

const GAP_PARAM: &str = "gap_sequence";
const GAP_SEQUENCES: [&str; 3] = ["shell", "knuth", "sedgewick"];
const DEFAULT_GAPS: &str = "shell";

/// Diminishing-increment insertion sort.
#[derive(Debug, Clone, Copy, Default)]
pub struct ShellSort;

impl Algorithm for ShellSort {
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
                GAP_PARAM,
                "Gap sequence",
                DEFAULT_GAPS,
                &GAP_SEQUENCES,
            )],
        )
    }

    fn complexity(&self) -> Complexity {
        Complexity {
            time_complexity: ComplexityBounds::new("O(n log n)", "O(n^1.3)", "O(n²)"),
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
        choice_param(params, GAP_PARAM, &GAP_SEQUENCES, DEFAULT_GAPS)?;
        run_sort(self, input, params, tracker)
    }

    fn capability(&self) -> Capability<'_> {
        Capability::Sorting(self)
    }
}

impl SortingAlgorithm for ShellSort {
    #[allow(clippy::indexing_slicing, clippy::arithmetic_side_effects)]
    fn sort(&self, data: &mut [Element], params: &Parameters, tracker: &mut StepTracker) {
        if already_sorted(data, tracker) {
            return;
        }
        let n = data.len();
        let sequence = choice_param(params, GAP_PARAM, &GAP_SEQUENCES, DEFAULT_GAPS)
            .unwrap_or(DEFAULT_GAPS);
        tracker.set_phase("init");
        tracker.add_sequence_step("start shell sort", data, Vec::new());

        for gap in gaps(n, sequence) {
            tracker.set_phase(&format!("gap {gap}"));
            let step = tracker.add_sequence_step(format!("current gap: {gap}"), data, Vec::new());
            tracker.add_note(step, format!("insertion sort subsequences spaced {gap} apart"));

            for i in gap..n {
                let key = data[i].clone();
                tracker.add_sequence_step(
                    format!("process {key} at position {i}"),
                    data,
                    vec![i],
                );
                let chain: Vec<usize> = (0..=i / gap).map(|k| i - k * gap).collect();
                tracker.add_sequence_step(
                    format!("subsequence positions: {chain:?}"),
                    data,
                    chain,
                );

                let mut j = i;
                while j >= gap && greater(&data[j - gap], &key) {
                    let step = tracker.add_sequence_step(
                        format!("compare {} with {key} (gap {gap})", data[j - gap]),
                        data,
                        vec![j - gap, i],
                    );
                    tracker.add_comparison(step, j - gap, i, Ordering::Greater);
                    data[j] = data[j - gap].clone();
                    tracker.add_operation(
                        step,
                        OperationType::Move,
                        vec![j - gap, j],
                        vec![data[j].clone()],
                        "shift within the subsequence",
                    );
                    tracker.add_sequence_step(
                        format!("move {} to position {j}", data[j]),
                        data,
                        vec![j],
                    );
                    j -= gap;
                }

                if j >= gap {
                    let step = tracker.add_sequence_step(
                        format!("compare {} with {key}, insertion point found", data[j - gap]),
                        data,
                        vec![j - gap],
                    );
                    tracker.add_comparison(step, j - gap, i, Ordering::Less);
                }

                if j == i {
                    tracker.add_sequence_step(format!("{key} already in place"), data, vec![i]);
                } else {
                    data[j] = key.clone();
                    let step = tracker.add_sequence_step(
                        format!("insert {key} at position {j}"),
                        data,
                        vec![j],
                    );
                    tracker.add_operation(
                        step,
                        OperationType::Insert,
                        vec![j],
                        vec![key],
                        "insert into the subsequence",
                    );
                }
            }

            let step = tracker.add_sequence_step(format!("gap {gap} pass done"), data, Vec::new());
            tracker.add_note(step, format!("every subsequence with gap {gap} is sorted"));
        }

        finish("shell sort", data, tracker);
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

/// Gaps for an array of length `n`, largest first, always ending in 1.
#[allow(clippy::arithmetic_side_effects)]
fn gaps(n: usize, sequence: &str) -> Vec<usize> {
    match sequence {
        "knuth" => {
            let mut out = vec![1];
            let mut h = 1;
            while 3 * h + 1 <= n / 3 {
                h = 3 * h + 1;
                out.push(h);
            }
            out.reverse();
            out
        }
        "sedgewick" => {
            let mut out = vec![1];
            for k in 1_u32.. {
                let gap = 4_usize.pow(k) + 3 * 2_usize.pow(k - 1) + 1;
                if gap >= n {
                    break;
                }
                out.push(gap);
            }
            out.reverse();
            out
        }
        _ => {
            let mut out = Vec::new();
            let mut gap = n / 2;
            while gap > 0 {
                out.push(gap);
                gap /= 2;
            }
            out
        }
    }
}

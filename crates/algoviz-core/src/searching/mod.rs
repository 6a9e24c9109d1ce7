//! Instrumented sequence searches.
//!
//! Comparisons against the search target are recorded as target
//! comparisons, serialized with `index2 = -1`.

mod binary;
mod hash;
mod linear;

pub use binary::BinarySearch;
pub use hash::HashSearch;
pub use linear::LinearSearch;

use algoviz_types::Element;

use crate::tracker::StepTracker;

/// Records the single step of a search over an empty sequence. Returns
/// `true` when the search is over.
pub(crate) fn nothing_to_search(data: &[Element], tracker: &mut StepTracker) -> bool {
    if !data.is_empty() {
        return false;
    }
    tracker.add_sequence_step("array is empty, search finished", data, Vec::new());
    true
}

#[cfg(test)]
pub(crate) mod testing {
    //! Shared search helpers.

    use algoviz_types::{AlgorithmInput, AlgorithmOutput, Element, SearchOutcome};

    use crate::algorithm::{Algorithm, Parameters};
    use crate::error::AlgorithmError;
    use crate::tracker::StepTracker;

    /// Parameters carrying `target`.
    pub fn target(value: impl Into<Element>) -> Parameters {
        let mut params = Parameters::new();
        let value: Element = value.into();
        params.insert(
            "target".to_owned(),
            serde_json::to_value(value).unwrap_or_default(),
        );
        params
    }

    /// Runs a search over integers.
    pub fn search(
        algorithm: &dyn Algorithm,
        data: &[i64],
        needle: i64,
    ) -> Result<SearchOutcome, AlgorithmError> {
        let input = AlgorithmInput::Sequence(data.iter().copied().map(Element::Int).collect());
        match algorithm.execute(&input, &target(needle), &mut StepTracker::new())? {
            AlgorithmOutput::Search(outcome) => Ok(outcome),
            _ => Err(AlgorithmError::UnsupportedType),
        }
    }
}

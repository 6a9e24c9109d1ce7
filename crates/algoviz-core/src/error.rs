//! Errors returned by algorithm validation and execution.

use algoviz_types::{ElementKind, GraphShape};

/// Why an algorithm refused or failed to run.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum AlgorithmError {
    /// Input has the wrong shape or violates a precondition.
    #[error("invalid input: {reason}")]
    InvalidInput {
        /// What was wrong.
        reason: String,
    },

    /// Input is larger than the algorithm accepts.
    #[error("input too large: {len} exceeds the limit of {max}")]
    InputTooLarge {
        /// Elements or nodes supplied.
        len: usize,
        /// Largest accepted size.
        max: usize,
    },

    /// The sequence mixes strings with numbers.
    #[error("invalid input: sequence mixes strings and numbers")]
    MixedElementKinds,

    /// The search target cannot be compared with the sequence elements.
    #[error("invalid target: expected a {expected} value, got {found}")]
    TargetKindMismatch {
        /// Kind of the sequence elements.
        expected: ElementKind,
        /// Kind of the target.
        found: ElementKind,
    },

    /// A required parameter was not supplied.
    #[error("missing parameter: {name}")]
    MissingParameter {
        /// Parameter key.
        name: String,
    },

    /// A parameter value is unusable.
    #[error("invalid parameter {name}: {reason}")]
    InvalidParameter {
        /// Parameter key.
        name: String,
        /// What was wrong.
        reason: String,
    },

    /// A node id referenced by a parameter does not exist.
    #[error("unknown node: {id}")]
    UnknownNode {
        /// The id that was not found.
        id: String,
    },

    /// The graph's form is not one the algorithm accepts.
    #[error("{algorithm} requires a {required} graph")]
    UnsupportedGraph {
        /// Algorithm id.
        algorithm: String,
        /// Accepted form.
        required: GraphShape,
    },

    /// An edge weight is negative where only non-negative weights work.
    #[error("negative edge weight {weight} on {from} -> {to}")]
    NegativeWeight {
        /// Source node id.
        from: String,
        /// Target node id.
        to: String,
        /// The offending weight.
        weight: f64,
    },

    /// Graph structure failed normalization.
    #[error("malformed graph: {reason}")]
    MalformedGraph {
        /// What was wrong.
        reason: String,
    },

    /// Recursive traversal went deeper than allowed.
    #[error("recursion depth limit of {limit} exceeded")]
    RecursionLimit {
        /// Deepest permitted level.
        limit: usize,
    },

    /// The algorithm has no implementation for this data shape.
    #[error("unsupported algorithm type")]
    UnsupportedType,
}

impl AlgorithmError {
    /// Shorthand for [`AlgorithmError::InvalidInput`].
    pub fn invalid_input(reason: impl Into<String>) -> Self {
        Self::InvalidInput {
            reason: reason.into(),
        }
    }

    /// Shorthand for [`AlgorithmError::InvalidParameter`].
    pub fn invalid_parameter(name: &str, reason: impl Into<String>) -> Self {
        Self::InvalidParameter {
            name: name.to_owned(),
            reason: reason.into(),
        }
    }

    /// Shorthand for [`AlgorithmError::MalformedGraph`].
    pub fn malformed(reason: impl Into<String>) -> Self {
        Self::MalformedGraph {
            reason: reason.into(),
        }
    }
}

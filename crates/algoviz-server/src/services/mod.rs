//! Business logic behind the HTTP handlers.
//!
//! - [`visualization`] -- Runs algorithms with step tracing and keeps the
//!   resulting sessions.
//! - [`benchmark`] -- Background benchmark tests and cross-test comparison.
//! - [`data`] -- Dataset generation and presets.
//!
//! Every service returns [`ServiceError`], which the API layer maps to an
//! HTTP status.

pub mod benchmark;
pub mod data;
pub mod visualization;

use algoviz_core::AlgorithmError;

pub use benchmark::{BenchmarkRequest, BenchmarkService};
pub use data::DataService;
pub use visualization::VisualizationService;

/// Errors returned by the services.
#[derive(Debug, thiserror::Error)]
pub enum ServiceError {
    /// No algorithm is registered under the id.
    #[error("algorithm not found: {id}")]
    AlgorithmNotFound {
        /// Requested id.
        id: String,
    },

    /// The algorithm rejected its input or parameters.
    #[error(transparent)]
    Algorithm(#[from] AlgorithmError),

    /// No session exists with the id.
    #[error("session not found: {id}")]
    SessionNotFound {
        /// Requested session id.
        id: String,
    },

    /// The step id is not a non-negative integer.
    #[error("invalid step id: {raw}")]
    InvalidStepId {
        /// The unparsed value.
        raw: String,
    },

    /// The session has no step at the position.
    #[error("step {step_id} not found in session {session_id}")]
    StepNotFound {
        /// Session id.
        session_id: String,
        /// Requested step.
        step_id: usize,
    },

    /// The run exceeded its time budget.
    #[error("execution timed out after {secs}s")]
    ExecutionTimeout {
        /// Budget in seconds.
        secs: u64,
    },

    /// A benchmark named an unknown algorithm, or none at all.
    #[error("invalid algorithm selection: {reason}")]
    InvalidAlgorithm {
        /// What was wrong.
        reason: String,
    },

    /// A requested dataset size is zero or above the limit.
    #[error("data size {size} is outside 1..={max}")]
    DataSizeTooLarge {
        /// Requested size.
        size: usize,
        /// Largest accepted size.
        max: usize,
    },

    /// The data type is neither array nor graph.
    #[error("unsupported data type: {name}")]
    UnsupportedDataType {
        /// The requested type.
        name: String,
    },

    /// The pattern is unknown for the data type.
    #[error("invalid pattern {pattern} for {data_type} data")]
    InvalidPattern {
        /// Requested pattern.
        pattern: String,
        /// Data type it was requested for.
        data_type: String,
    },

    /// No benchmark test exists with the id.
    #[error("benchmark test not found: {id}")]
    TestNotFound {
        /// Requested test id.
        id: String,
    },

    /// A comparison needs at least two tests.
    #[error("at least 2 tests are required for comparison, got {count}")]
    NotEnoughTests {
        /// Tests supplied.
        count: usize,
    },

    /// A background task failed unexpectedly.
    #[error("internal error: {0}")]
    Internal(String),
}

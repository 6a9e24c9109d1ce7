//! Benchmark tests, per-run results and cross-test comparisons.

use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::dataset::DataType;

/// Lifecycle state of a benchmark test.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, TS)]
#[serde(rename_all = "snake_case")]
#[ts(export, export_to = "bindings/")]
pub enum BenchmarkStatus {
    /// Accepted, waiting for a worker slot.
    Pending,
    /// Runs in progress.
    Running,
    /// Every run finished.
    Completed,
    /// Stopped early, see the error field.
    Failed,
}

/// Measurement of one algorithm on one generated input.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export, export_to = "bindings/")]
pub struct BenchmarkResult {
    /// Owning test.
    pub test_id: String,
    /// Algorithm measured.
    pub algorithm_id: String,
    /// Display name of the algorithm.
    pub algorithm_name: String,
    /// Generated input size.
    pub data_size: usize,
    /// Generated input type.
    pub data_type: DataType,
    /// Repetition ordinal, starting at zero.
    pub run_index: usize,
    /// Wall-clock time in microseconds.
    pub execution_time: u64,
    /// Comparisons plus swaps plus moves.
    pub operations: u64,
    /// Comparisons recorded.
    pub comparisons: u64,
    /// Swaps recorded.
    pub swaps: u64,
    /// Whether the run returned without error.
    pub success: bool,
    /// Failure message.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[ts(optional)]
    pub error: Option<String>,
    /// Completion time of the run.
    pub timestamp: DateTime<Utc>,
}

/// A batch of benchmark runs.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export, export_to = "bindings/")]
pub struct BenchmarkTest {
    /// 16 hex characters.
    pub id: String,
    /// Display name.
    pub name: String,
    /// Algorithms under test.
    pub algorithm_ids: Vec<String>,
    /// Input sizes under test.
    pub data_sizes: Vec<usize>,
    /// Generated input type.
    pub data_type: DataType,
    /// Repetitions per algorithm and size.
    pub test_count: usize,
    /// Parameters passed to every run.
    #[ts(type = "Record<string, unknown>")]
    pub parameters: serde_json::Map<String, serde_json::Value>,
    /// Lifecycle state.
    pub status: BenchmarkStatus,
    /// Submission time.
    pub created_at: DateTime<Utc>,
    /// Time a worker picked the test up.
    pub started_at: Option<DateTime<Utc>>,
    /// Time the last run finished.
    pub completed_at: Option<DateTime<Utc>>,
    /// Results in execution order.
    pub results: Vec<BenchmarkResult>,
    /// Failure message.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[ts(optional)]
    pub error: Option<String>,
}

/// Aggregated runs of one algorithm at one size.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export, export_to = "bindings/")]
pub struct SizeSummary {
    /// Runs aggregated.
    pub run_count: usize,
    /// Mean time of successful runs, microseconds.
    pub avg_time: u64,
    /// Fastest successful run, microseconds.
    pub min_time: u64,
    /// Slowest successful run, microseconds.
    pub max_time: u64,
    /// Mean operation count of successful runs.
    pub avg_ops: u64,
    /// Fraction of runs that succeeded, between 0 and 1.
    pub success_rate: f64,
}

/// One algorithm's aggregated results across the compared tests.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export, export_to = "bindings/")]
pub struct AlgorithmComparison {
    /// Algorithm id.
    pub algorithm_id: String,
    /// Display name.
    pub algorithm_name: String,
    /// Summary per data size.
    pub results: BTreeMap<usize, SizeSummary>,
    /// Mean of the per-size average times, microseconds. Lower is better.
    pub overall_score: u64,
}

/// Headline of a comparison.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export, export_to = "bindings/")]
pub struct ComparisonSummary {
    /// Algorithm with the lowest overall score.
    pub best_time: Option<String>,
    /// Recommended algorithm.
    pub recommendation: Option<String>,
    /// Why it was recommended.
    pub reason: String,
}

/// Side-by-side view of several benchmark tests.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export, export_to = "bindings/")]
pub struct ComparisonResult {
    /// Tests compared.
    pub test_ids: Vec<String>,
    /// Distinct algorithm ids across the tests.
    pub algorithms: Vec<String>,
    /// Distinct data sizes across the tests.
    pub data_sizes: Vec<usize>,
    /// Per-algorithm aggregates, best score first.
    pub comparisons: Vec<AlgorithmComparison>,
    /// Headline.
    pub summary: ComparisonSummary,
    /// Time the comparison was computed.
    pub created_at: DateTime<Utc>,
}

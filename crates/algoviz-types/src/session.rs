//! Visualization sessions and execution results.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::io::{AlgorithmInput, AlgorithmOutput};
use crate::step::{ExecutionStats, Step};

/// Lifecycle state of a visualization session.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, TS)]
#[serde(rename_all = "snake_case")]
#[ts(export, export_to = "bindings/")]
pub enum SessionStatus {
    /// The algorithm is executing or the session was reset.
    Running,
    /// Execution finished and steps are available.
    Completed,
    /// Execution failed.
    Error,
    /// Execution was abandoned.
    Cancelled,
}

/// A stored algorithm run that clients can step through.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export, export_to = "bindings/")]
pub struct VisualizationSession {
    /// 32 hex characters.
    pub id: String,
    /// Algorithm that was executed.
    pub algorithm_id: String,
    /// Input as supplied.
    pub input_data: AlgorithmInput,
    /// Parameters as supplied.
    #[ts(type = "Record<string, unknown>")]
    pub parameters: serde_json::Map<String, serde_json::Value>,
    /// Recorded steps.
    pub steps: Vec<Step>,
    /// Lifecycle state.
    pub status: SessionStatus,
    /// Creation time.
    pub created_at: DateTime<Utc>,
    /// Completion time.
    pub completed_at: Option<DateTime<Utc>>,
    /// Failure message.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[ts(optional)]
    pub error: Option<String>,
}

/// Everything a client needs to replay an execution.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export, export_to = "bindings/")]
pub struct VisualizationResult {
    /// Session holding the steps.
    pub session_id: String,
    /// Algorithm that was executed.
    pub algorithm_id: String,
    /// Input as supplied.
    pub input_data: AlgorithmInput,
    /// Algorithm output.
    pub output_data: AlgorithmOutput,
    /// Recorded steps.
    pub steps: Vec<Step>,
    /// Number of steps the algorithm produced, including any not stored.
    pub total_steps: usize,
    /// Whether step storage hit its limit.
    pub truncated: bool,
    /// Wall-clock execution time in microseconds.
    pub execution_time: u64,
    /// Operation counters.
    pub statistics: ExecutionStats,
}

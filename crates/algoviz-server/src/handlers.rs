//! REST API endpoint handlers.
//!
//! Every handler delegates to a service on the shared [`AppState`] and
//! wraps the outcome in a `{success, ...}` envelope. Failures become
//! [`ApiError`] responses.
//!
//! # Endpoints
//!
//! | Method | Path | Description |
//! |--------|------|-------------|
//! | `GET` | `/api/health` | Liveness probe |
//! | `GET` | `/api/algorithms` | List all algorithms |
//! | `GET` | `/api/algorithms/category/:category` | List one family |
//! | `GET` | `/api/algorithms/info/:id` | Metadata plus complexity |
//! | `POST` | `/api/visualize/execute` | Run with step recording |
//! | `GET` | `/api/visualize/step/:session_id/:step_id` | One recorded step |
//! | `POST` | `/api/visualize/reset` | Clear a session |
//! | `POST` | `/api/benchmark/run` | Start a benchmark test |
//! | `GET` | `/api/benchmark/results/:test_id` | Test status and results |
//! | `POST` | `/api/benchmark/compare` | Compare tests |
//! | `POST` | `/api/data/generate` | Generate a dataset |
//! | `GET` | `/api/data/presets` | Built-in datasets (`?type=` filter) |

use std::sync::Arc;

use algoviz_core::Parameters;
use algoviz_types::{AlgorithmInfo, AlgorithmInput, Category, DataType};
use axum::Json;
use axum::extract::rejection::JsonRejection;
use axum::extract::{Path, Query, State};
use axum::response::IntoResponse;
use serde::Deserialize;
use serde_json::json;
use validator::Validate;

use crate::error::ApiError;
use crate::services::{BenchmarkRequest, ServiceError};
use crate::state::AppState;

// ---------------------------------------------------------------------------
// Request bodies and query parameters
// ---------------------------------------------------------------------------

/// Body of `POST /api/visualize/execute`.
#[derive(Debug, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct ExecuteRequest {
    /// Algorithm to run.
    #[validate(length(min = 1))]
    pub algorithm_id: String,
    /// Sequence or graph input.
    pub data: AlgorithmInput,
    /// Algorithm parameters.
    #[serde(default)]
    pub parameters: Parameters,
}

/// Body of `POST /api/visualize/reset`.
#[derive(Debug, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct ResetRequest {
    /// Session to clear.
    #[validate(length(min = 1))]
    pub session_id: String,
}

/// Body of `POST /api/benchmark/run`.
#[derive(Debug, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct RunBenchmarkRequest {
    /// Algorithms to measure.
    #[validate(length(min = 1))]
    pub algorithm_ids: Vec<String>,
    /// Input sizes.
    #[validate(length(min = 1))]
    pub data_sizes: Vec<usize>,
    /// `array` or `graph`.
    pub data_type: String,
    /// Repetitions per algorithm and size.
    pub test_count: Option<i64>,
    /// Parameters passed to every run.
    #[serde(default)]
    pub parameters: Parameters,
}

/// Body of `POST /api/benchmark/compare`.
#[derive(Debug, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct CompareRequest {
    /// Tests to compare.
    #[validate(length(min = 2))]
    pub test_ids: Vec<String>,
}

/// Body of `POST /api/data/generate`.
#[derive(Debug, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct GenerateRequest {
    /// `array` or `graph`.
    pub data_type: String,
    /// Number of elements or nodes.
    #[validate(range(min = 1))]
    pub size: usize,
    /// Generation pattern; the type's default when absent.
    pub pattern: Option<String>,
    /// Generation parameters such as `seed`.
    #[serde(default)]
    pub parameters: Parameters,
}

/// Query parameters for `GET /api/data/presets`.
#[derive(Debug, Deserialize)]
pub struct PresetsQuery {
    /// Restrict to `array` or `graph` presets.
    #[serde(rename = "type")]
    pub data_type: Option<String>,
}

/// Unwrap and validate a JSON body.
fn validated<T: Validate>(payload: Result<Json<T>, JsonRejection>) -> Result<T, ApiError> {
    let Json(body) = payload?;
    body.validate()?;
    Ok(body)
}

// ---------------------------------------------------------------------------
// GET /api/health
// ---------------------------------------------------------------------------

/// Report that the server is up.
pub async fn health() -> impl IntoResponse {
    Json(json!({
        "status": "ok",
        "message": "algorithm visualization backend is running",
    }))
}

// ---------------------------------------------------------------------------
// Algorithms
// ---------------------------------------------------------------------------

/// List every registered algorithm.
pub async fn list_algorithms(State(state): State<Arc<AppState>>) -> impl IntoResponse {
    let infos = state.registry.infos();
    Json(json!({
        "success": true,
        "count": infos.len(),
        "data": infos,
    }))
}

/// List the algorithms of one category. Unknown categories are rejected.
pub async fn algorithms_by_category(
    State(state): State<Arc<AppState>>,
    Path(category): Path<String>,
) -> Result<impl IntoResponse, ApiError> {
    let parsed = Category::parse(&category)
        .ok_or_else(|| ApiError::BadRequest(format!("unknown category: {category}")))?;
    let infos: Vec<AlgorithmInfo> = state
        .registry
        .by_category(parsed)
        .map(|algorithm| algorithm.info())
        .collect();
    Ok(Json(json!({
        "success": true,
        "category": parsed,
        "count": infos.len(),
        "data": infos,
    })))
}

/// Metadata and complexity bounds of one algorithm.
pub async fn algorithm_info(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
) -> Result<impl IntoResponse, ApiError> {
    let algorithm = state
        .registry
        .get(&id)
        .ok_or(ServiceError::AlgorithmNotFound { id })?;
    Ok(Json(json!({
        "success": true,
        "data": {
            "info": algorithm.info(),
            "complexity": algorithm.complexity(),
        },
    })))
}

// ---------------------------------------------------------------------------
// Visualization
// ---------------------------------------------------------------------------

/// Run an algorithm with step recording.
pub async fn execute(
    State(state): State<Arc<AppState>>,
    payload: Result<Json<ExecuteRequest>, JsonRejection>,
) -> Result<impl IntoResponse, ApiError> {
    let body = validated(payload)?;
    let result = state
        .visualization
        .execute(&body.algorithm_id, body.data, body.parameters)
        .await?;
    Ok(Json(json!({ "success": true, "data": result })))
}

/// Fetch one recorded step of a session.
pub async fn get_step(
    State(state): State<Arc<AppState>>,
    Path((session_id, step_id)): Path<(String, String)>,
) -> Result<impl IntoResponse, ApiError> {
    let step = state.visualization.step(&session_id, &step_id).await?;
    Ok(Json(json!({ "success": true, "data": step })))
}

/// Clear a session's steps so it can be replayed.
pub async fn reset(
    State(state): State<Arc<AppState>>,
    payload: Result<Json<ResetRequest>, JsonRejection>,
) -> Result<impl IntoResponse, ApiError> {
    let body = validated(payload)?;
    state.visualization.reset(&body.session_id).await?;
    Ok(Json(json!({
        "success": true,
        "message": format!("session {} reset", body.session_id),
    })))
}

// ---------------------------------------------------------------------------
// Benchmarks
// ---------------------------------------------------------------------------

/// Start a benchmark test in the background.
pub async fn run_benchmark(
    State(state): State<Arc<AppState>>,
    payload: Result<Json<RunBenchmarkRequest>, JsonRejection>,
) -> Result<impl IntoResponse, ApiError> {
    let body = validated(payload)?;
    let test_id = state
        .benchmark
        .run(BenchmarkRequest {
            algorithm_ids: body.algorithm_ids,
            data_sizes: body.data_sizes,
            data_type: body.data_type,
            test_count: body.test_count,
            parameters: body.parameters,
        })
        .await?;
    Ok(Json(json!({
        "success": true,
        "testId": test_id,
        "message": "benchmark started",
    })))
}

/// Status and results recorded so far for a test.
pub async fn benchmark_results(
    State(state): State<Arc<AppState>>,
    Path(test_id): Path<String>,
) -> Result<impl IntoResponse, ApiError> {
    let test = state.benchmark.results(&test_id).await?;
    Ok(Json(json!({ "success": true, "data": test })))
}

/// Compare the results of several tests.
pub async fn compare_benchmarks(
    State(state): State<Arc<AppState>>,
    payload: Result<Json<CompareRequest>, JsonRejection>,
) -> Result<impl IntoResponse, ApiError> {
    let body = validated(payload)?;
    let comparison = state.benchmark.compare(&body.test_ids).await?;
    Ok(Json(json!({ "success": true, "data": comparison })))
}

// ---------------------------------------------------------------------------
// Data
// ---------------------------------------------------------------------------

/// Generate a dataset.
pub async fn generate_data(
    State(state): State<Arc<AppState>>,
    payload: Result<Json<GenerateRequest>, JsonRejection>,
) -> Result<impl IntoResponse, ApiError> {
    let body = validated(payload)?;
    let generated = state.data.generate(
        &body.data_type,
        body.size,
        body.pattern.as_deref(),
        &body.parameters,
    )?;
    Ok(Json(json!({ "success": true, "data": generated })))
}

/// Built-in datasets, optionally filtered by `?type=`.
pub async fn presets(
    State(state): State<Arc<AppState>>,
    Query(query): Query<PresetsQuery>,
) -> Result<impl IntoResponse, ApiError> {
    let filter = match query.data_type.as_deref().map(str::trim) {
        None | Some("") => None,
        Some(name) => Some(DataType::parse(name).ok_or_else(|| {
            ServiceError::UnsupportedDataType {
                name: name.to_owned(),
            }
        })?),
    };
    let presets = state.data.presets(filter);
    Ok(Json(json!({
        "success": true,
        "count": presets.len(),
        "data": presets,
    })))
}

//! Axum router construction for the API.
//!
//! Assembles all routes into a single [`Router`] with CORS and request
//! tracing middleware.

use std::sync::Arc;

use axum::Router;
use axum::http::HeaderValue;
use axum::routing::{get, post};
use tower_http::cors::{AllowOrigin, Any, CorsLayer};
use tower_http::trace::TraceLayer;

use crate::handlers;
use crate::state::AppState;

/// Build the complete Axum router.
///
/// The router includes:
/// - `GET /api/health` -- liveness probe
/// - `GET /api/algorithms` -- every registered algorithm
/// - `GET /api/algorithms/category/{category}` -- algorithms in one family
/// - `GET /api/algorithms/info/{id}` -- metadata and complexity of one algorithm
/// - `POST /api/visualize/execute` -- run an algorithm and record its steps
/// - `GET /api/visualize/step/{session_id}/{step_id}` -- one recorded step
/// - `POST /api/visualize/reset` -- clear a session
/// - `POST /api/benchmark/run` -- start a benchmark test
/// - `GET /api/benchmark/results/{test_id}` -- benchmark progress and results
/// - `POST /api/benchmark/compare` -- aggregate several tests
/// - `POST /api/data/generate` -- generate a dataset
/// - `GET /api/data/presets` -- built-in datasets
///
/// In development any origin may call the API. Otherwise only the
/// configured origins are allowed.
pub fn build_router(state: Arc<AppState>) -> Router {
    let cors = cors_layer(&state);

    Router::new()
        .route("/api/health", get(handlers::health))
        // Algorithms
        .route("/api/algorithms", get(handlers::list_algorithms))
        .route(
            "/api/algorithms/category/{category}",
            get(handlers::algorithms_by_category),
        )
        .route("/api/algorithms/info/{id}", get(handlers::algorithm_info))
        // Visualization
        .route("/api/visualize/execute", post(handlers::execute))
        .route(
            "/api/visualize/step/{session_id}/{step_id}",
            get(handlers::get_step),
        )
        .route("/api/visualize/reset", post(handlers::reset))
        // Benchmarks
        .route("/api/benchmark/run", post(handlers::run_benchmark))
        .route(
            "/api/benchmark/results/{test_id}",
            get(handlers::benchmark_results),
        )
        .route("/api/benchmark/compare", post(handlers::compare_benchmarks))
        // Data
        .route("/api/data/generate", post(handlers::generate_data))
        .route("/api/data/presets", get(handlers::presets))
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

fn cors_layer(state: &AppState) -> CorsLayer {
    let layer = CorsLayer::new().allow_methods(Any).allow_headers(Any);
    if state.is_development() {
        return layer.allow_origin(Any);
    }

    let origins: Vec<HeaderValue> = state
        .allowed_origins
        .iter()
        .filter_map(|origin| {
            HeaderValue::from_str(origin)
                .inspect_err(|e| tracing::warn!(%origin, error = %e, "ignoring invalid CORS origin"))
                .ok()
        })
        .collect();
    layer.allow_origin(AllowOrigin::list(origins))
}

//! Integration tests for the API endpoints.
//!
//! Tests use Axum's `Router` directly via `tower::ServiceExt` without
//! starting a TCP server. This validates handler logic and routing
//! without needing a live network connection.

#![allow(clippy::unwrap_used)]

use std::sync::Arc;
use std::time::Duration;

use algoviz_server::router::build_router;
use algoviz_server::state::AppState;
use axum::Router;
use axum::body::Body;
use axum::http::{Request, StatusCode};
use serde_json::{Value, json};
use tower::ServiceExt;

fn make_router() -> Router {
    build_router(Arc::new(AppState::default()))
}

async fn body_to_json(body: Body) -> Value {
    let bytes = axum::body::to_bytes(body, usize::MAX).await.unwrap();
    serde_json::from_slice(&bytes).unwrap()
}

async fn get(router: &Router, uri: &str) -> (StatusCode, Value) {
    let response = router
        .clone()
        .oneshot(Request::get(uri).body(Body::empty()).unwrap())
        .await
        .unwrap();
    let status = response.status();
    (status, body_to_json(response.into_body()).await)
}

async fn post(router: &Router, uri: &str, body: &Value) -> (StatusCode, Value) {
    let response = router
        .clone()
        .oneshot(
            Request::post(uri)
                .header("content-type", "application/json")
                .body(Body::from(body.to_string()))
                .unwrap(),
        )
        .await
        .unwrap();
    let status = response.status();
    (status, body_to_json(response.into_body()).await)
}

// =========================================================================
// Catalog
// =========================================================================

#[tokio::test]
async fn test_health() {
    let (status, json) = get(&make_router(), "/api/health").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["status"], "ok");
}

#[tokio::test]
async fn test_list_algorithms() {
    let (status, json) = get(&make_router(), "/api/algorithms").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["success"], true);
    assert_eq!(json["count"], 16);
    assert_eq!(json["data"].as_array().unwrap().len(), 16);
}

#[tokio::test]
async fn test_algorithms_by_category() {
    let router = make_router();
    let (status, json) = get(&router, "/api/algorithms/category/searching").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["count"], 3);
    assert_eq!(json["category"], "searching");

    let (status, json) = get(&router, "/api/algorithms/category/tree").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["count"], 0);
}

#[tokio::test]
async fn test_unknown_category_is_bad_request() {
    let (status, json) = get(&make_router(), "/api/algorithms/category/quantum").await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(json["status"], 400);
    assert!(json["message"].as_str().unwrap().contains("quantum"));
}

#[tokio::test]
async fn test_algorithm_info() {
    let router = make_router();
    let (status, json) = get(&router, "/api/algorithms/info/merge_sort").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["data"]["info"]["id"], "merge_sort");
    assert!(json["data"]["complexity"]["timeComplexity"].is_object());

    let (status, json) = get(&router, "/api/algorithms/info/bogo_sort").await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(json["status"], 404);
}

// =========================================================================
// Visualization
// =========================================================================

#[tokio::test]
async fn test_execute_then_fetch_step_then_reset() {
    let router = make_router();
    let (status, json) = post(
        &router,
        "/api/visualize/execute",
        &json!({ "algorithmId": "bubble_sort", "data": [5, 1, 4, 2, 8] }),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["success"], true);
    let data = &json["data"];
    assert_eq!(data["outputData"], json!([1, 2, 4, 5, 8]));
    assert_eq!(data["truncated"], false);
    let total = data["totalSteps"].as_u64().unwrap();
    assert!(total > 0);
    assert_eq!(data["steps"].as_array().unwrap().len() as u64, total);

    let session_id = data["sessionId"].as_str().unwrap().to_owned();
    assert_eq!(session_id.len(), 32);

    let (status, json) = get(&router, &format!("/api/visualize/step/{session_id}/0")).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["data"]["stepId"], 0);

    let (status, _) = get(&router, &format!("/api/visualize/step/{session_id}/9999")).await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    let (status, _) = get(&router, &format!("/api/visualize/step/{session_id}/abc")).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let (status, json) = post(
        &router,
        "/api/visualize/reset",
        &json!({ "sessionId": session_id }),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["success"], true);

    let (status, _) = get(&router, &format!("/api/visualize/step/{session_id}/0")).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_execute_graph_algorithm() {
    let router = make_router();
    let graph = json!({
        "nodes": [{ "id": "A" }, { "id": "B" }, { "id": "C" }],
        "edges": [
            { "from": "A", "to": "B", "weight": 2 },
            { "from": "B", "to": "C", "weight": 3 },
            { "from": "A", "to": "C", "weight": 9 }
        ],
        "type": "directed"
    });
    let (status, json) = post(
        &router,
        "/api/visualize/execute",
        &json!({ "algorithmId": "graph_dijkstra", "data": graph }),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["data"]["outputData"]["distances"]["C"], 5.0);
}

#[tokio::test]
async fn test_execute_search_without_target_is_bad_request() {
    let (status, json) = post(
        &make_router(),
        "/api/visualize/execute",
        &json!({ "algorithmId": "linear_search", "data": [1, 2, 3] }),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(json["status"], 400);
}

#[tokio::test]
async fn test_execute_unknown_algorithm_is_not_found() {
    let (status, _) = post(
        &make_router(),
        "/api/visualize/execute",
        &json!({ "algorithmId": "bogo_sort", "data": [1] }),
    )
    .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_malformed_body_is_bad_request() {
    let (status, json) = post(
        &make_router(),
        "/api/visualize/execute",
        &json!({ "data": [1, 2] }),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(json["error"], "Bad Request");
}

#[tokio::test]
async fn test_reset_unknown_session_is_not_found() {
    let (status, _) = post(
        &make_router(),
        "/api/visualize/reset",
        &json!({ "sessionId": "missing" }),
    )
    .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

// =========================================================================
// Benchmarks
// =========================================================================

async fn wait_for_test(router: &Router, test_id: &str) -> Value {
    for _ in 0..500 {
        let (_, json) = get(router, &format!("/api/benchmark/results/{test_id}")).await;
        let status = json["data"]["status"].as_str().unwrap_or_default().to_owned();
        if status == "completed" || status == "failed" {
            return json;
        }
        tokio::time::sleep(Duration::from_millis(10)).await;
    }
    Value::Null
}

#[tokio::test]
async fn test_benchmark_run_results_and_compare() {
    let router = make_router();
    let request = |id: &str| {
        json!({
            "algorithmIds": [id],
            "dataSizes": [10, 20],
            "dataType": "array",
            "testCount": 2
        })
    };

    let (status, first) = post(&router, "/api/benchmark/run", &request("insertion_sort")).await;
    assert_eq!(status, StatusCode::OK);
    let first = first["testId"].as_str().unwrap().to_owned();
    assert_eq!(first.len(), 16);

    let (_, second) = post(&router, "/api/benchmark/run", &request("heap_sort")).await;
    let second = second["testId"].as_str().unwrap().to_owned();

    let done = wait_for_test(&router, &first).await;
    assert_eq!(done["data"]["status"], "completed");
    assert_eq!(done["data"]["results"].as_array().unwrap().len(), 4);
    wait_for_test(&router, &second).await;

    let (status, json) = post(
        &router,
        "/api/benchmark/compare",
        &json!({ "testIds": [first, second] }),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["data"]["comparisons"].as_array().unwrap().len(), 2);
    assert_eq!(json["data"]["dataSizes"], json!([10, 20]));
}

#[tokio::test]
async fn test_benchmark_validation() {
    let router = make_router();
    let (status, _) = post(
        &router,
        "/api/benchmark/run",
        &json!({ "algorithmIds": [], "dataSizes": [10], "dataType": "array" }),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let (status, _) = post(
        &router,
        "/api/benchmark/run",
        &json!({ "algorithmIds": ["quick_sort"], "dataSizes": [20000], "dataType": "array" }),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let (status, _) = post(
        &router,
        "/api/benchmark/compare",
        &json!({ "testIds": ["only-one"] }),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let (status, _) = get(&router, "/api/benchmark/results/nope").await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

// =========================================================================
// Data
// =========================================================================

#[tokio::test]
async fn test_generate_array() {
    let (status, json) = post(
        &make_router(),
        "/api/data/generate",
        &json!({ "dataType": "array", "size": 6, "pattern": "reversed" }),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["data"]["type"], "array");
    assert_eq!(json["data"]["content"], json!([6, 5, 4, 3, 2, 1]));
    assert_eq!(json["data"]["metadata"]["reversed"], true);
}

#[tokio::test]
async fn test_generate_graph_grid() {
    let (status, json) = post(
        &make_router(),
        "/api/data/generate",
        &json!({ "dataType": "graph", "size": 16, "pattern": "grid" }),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["data"]["size"], 16);
    assert_eq!(json["data"]["content"]["type"], "undirected");
    assert_eq!(json["data"]["content"]["edges"].as_array().unwrap().len(), 24);
}

#[tokio::test]
async fn test_generate_rejects_bad_input() {
    let router = make_router();
    let (status, _) = post(
        &router,
        "/api/data/generate",
        &json!({ "dataType": "array", "size": 0 }),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let (status, _) = post(
        &router,
        "/api/data/generate",
        &json!({ "dataType": "array", "size": 5, "pattern": "zigzag" }),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_presets() {
    let router = make_router();
    let (status, json) = get(&router, "/api/data/presets").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["count"], 5);

    let (_, json) = get(&router, "/api/data/presets?type=graph").await;
    assert_eq!(json["count"], 2);

    let (status, _) = get(&router, "/api/data/presets?type=matrix").await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

use super::*;
use crate::config::LimitsConfig;
use axum::body::Body;
use axum::http::Request;
use tower::ServiceExt;

fn test_state() -> AppState {
    AppState {
        interpreter: Arc::new(Interpreter::new(
            Arc::new(MockDriver::new()),
            Arc::new(MockVision::new()),
            LimitsConfig::default(),
        )),
    }
}

#[tokio::test]
async fn healthz_reports_healthy() {
    let response = healthz_handler().await;
    assert_eq!(response.0.get("status").unwrap(), "healthy");
}

#[tokio::test]
async fn metrics_renders_registered_families() {
    crate::telemetry::init("tapflow-http-test");
    let (status, body) = metrics_handler().await.unwrap();
    assert_eq!(status, StatusCode::OK);
    assert!(body.contains("script_requests_total"));
}

#[tokio::test]
async fn script_endpoint_runs_empty_script() {
    let app = build_router(test_state());
    let body = r#"{"steps": []}"#;
    let request = Request::builder()
        .method("POST")
        .uri("/script")
        .header("content-type", "application/json")
        .body(Body::from(body))
        .unwrap();
    let response = app.oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);
}

#[tokio::test]
async fn script_endpoint_rejects_missing_steps() {
    let app = build_router(test_state());
    let request = Request::builder()
        .method("POST")
        .uri("/script")
        .header("content-type", "application/json")
        .body(Body::from("{}"))
        .unwrap();
    let response = app.oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn script_endpoint_rejects_non_dict_step() {
    let app = build_router(test_state());
    let body = r#"{"steps": ["not-a-dict"]}"#;
    let request = Request::builder()
        .method("POST")
        .uri("/script")
        .header("content-type", "application/json")
        .body(Body::from(body))
        .unwrap();
    let response = app.oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn script_endpoint_rejects_non_object_variables() {
    let app = build_router(test_state());
    let body = r#"{"steps": [], "variables": [1, 2]}"#;
    let request = Request::builder()
        .method("POST")
        .uri("/script")
        .header("content-type", "application/json")
        .body(Body::from(body))
        .unwrap();
    let response = app.oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn script_runs_set_and_reports_result() {
    let app = build_router(test_state());
    let body = r#"{"steps": [{"action": "set", "key": "n", "value": 3}]}"#;
    let request = Request::builder()
        .method("POST")
        .uri("/script")
        .header("content-type", "application/json")
        .body(Body::from(body))
        .unwrap();
    let response = app.oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX).await.unwrap();
    let value: Value = serde_json::from_slice(&bytes).unwrap();
    assert_eq!(value["success"], true);
    assert_eq!(value["results"]["n"], "3");
}

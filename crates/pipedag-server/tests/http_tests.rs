//! Integration tests for the HTTP surface
//!
//! Drives the router in-process; no socket is opened.

use axum::body::Body;
use axum::http::{header, Method, Request, StatusCode};
use axum::Router;
use http_body_util::BodyExt;
use pipedag_core::Config;
use pretty_assertions::assert_eq;
use serde_json::{json, Value};
use tower::ServiceExt;

fn app() -> Router {
    pipedag_server::router(&Config::default()).unwrap()
}

async fn post_json(app: Router, body: &str) -> (StatusCode, Vec<u8>) {
    let request = Request::builder()
        .method(Method::POST)
        .uri("/pipelines/parse")
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(body.to_string()))
        .unwrap();

    let response = app.oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    (status, bytes.to_vec())
}

async fn parse(body: Value) -> Value {
    let (status, bytes) = post_json(app(), &body.to_string()).await;
    assert_eq!(status, StatusCode::OK);
    serde_json::from_slice(&bytes).unwrap()
}

#[tokio::test]
async fn ping() {
    let request = Request::builder().uri("/").body(Body::empty()).unwrap();
    let response = app().oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    let body: Value = serde_json::from_slice(&bytes).unwrap();
    assert_eq!(body, json!({ "Ping": "Pong" }));
}

#[tokio::test]
async fn empty_pipeline() {
    let body = parse(json!({ "nodes": [], "edges": [] })).await;
    assert_eq!(body, json!({ "num_nodes": 0, "num_edges": 0, "is_dag": true }));
}

#[tokio::test]
async fn chain_with_editor_metadata() {
    let body = parse(json!({
        "nodes": [
            { "id": "customInput-1", "type": "customInput", "position": { "x": 0, "y": 0 }, "data": { "inputName": "q" } },
            { "id": "llm-1", "type": "llm", "position": { "x": 200, "y": 0 }, "data": {} },
            { "id": "customOutput-1", "type": "customOutput" }
        ],
        "edges": [
            { "source": "customInput-1", "target": "llm-1", "id": "e1" },
            { "source": "llm-1", "target": "customOutput-1" }
        ]
    }))
    .await;

    assert_eq!(body, json!({ "num_nodes": 3, "num_edges": 2, "is_dag": true }));
}

#[tokio::test]
async fn cycle_is_reported() {
    let body = parse(json!({
        "nodes": [{ "id": "A", "type": "text" }, { "id": "B", "type": "text" }],
        "edges": [{ "source": "A", "target": "B" }, { "source": "B", "target": "A" }]
    }))
    .await;

    assert_eq!(body, json!({ "num_nodes": 2, "num_edges": 2, "is_dag": false }));
}

#[tokio::test]
async fn dangling_edge_is_reported() {
    let body = parse(json!({
        "nodes": [{ "id": "A", "type": "text" }],
        "edges": [{ "source": "A", "target": "B" }]
    }))
    .await;

    assert_eq!(body, json!({ "num_nodes": 1, "num_edges": 1, "is_dag": false }));
}

#[tokio::test]
async fn missing_edge_field_is_rejected() {
    let (status, _) = post_json(
        app(),
        r#"{"nodes": [{"id": "A", "type": "text"}], "edges": [{"source": "A"}]}"#,
    )
    .await;

    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
}

#[tokio::test]
async fn malformed_json_is_rejected() {
    let (status, _) = post_json(app(), r#"{"nodes": ["#).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn body_without_content_type_is_rejected() {
    let request = Request::builder()
        .method(Method::POST)
        .uri("/pipelines/parse")
        .body(Body::from(r#"{"nodes": [], "edges": []}"#))
        .unwrap();

    let response = app().oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::UNSUPPORTED_MEDIA_TYPE);
}

#[tokio::test]
async fn wrong_method_is_rejected() {
    let request = Request::builder()
        .uri("/pipelines/parse")
        .body(Body::empty())
        .unwrap();

    let response = app().oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::METHOD_NOT_ALLOWED);
}

#[tokio::test]
async fn preflight_from_allowed_origin() {
    let request = Request::builder()
        .method(Method::OPTIONS)
        .uri("/pipelines/parse")
        .header(header::ORIGIN, "http://localhost:3000")
        .header(header::ACCESS_CONTROL_REQUEST_METHOD, "POST")
        .header(header::ACCESS_CONTROL_REQUEST_HEADERS, "content-type")
        .body(Body::empty())
        .unwrap();

    let response = app().oneshot(request).await.unwrap();
    let headers = response.headers();

    assert_eq!(
        headers.get(header::ACCESS_CONTROL_ALLOW_ORIGIN).unwrap(),
        "http://localhost:3000"
    );
    assert_eq!(
        headers.get(header::ACCESS_CONTROL_ALLOW_CREDENTIALS).unwrap(),
        "true"
    );
    assert_eq!(
        headers.get(header::ACCESS_CONTROL_ALLOW_METHODS).unwrap(),
        "POST"
    );
}

#[tokio::test]
async fn other_origins_get_no_cors_headers() {
    let request = Request::builder()
        .uri("/")
        .header(header::ORIGIN, "http://evil.example")
        .body(Body::empty())
        .unwrap();

    let response = app().oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    assert!(response
        .headers()
        .get(header::ACCESS_CONTROL_ALLOW_ORIGIN)
        .is_none());
}

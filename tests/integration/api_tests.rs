//! API endpoint integration tests

use axum::{
    body::Body,
    http::{header, Request, StatusCode},
    Router,
};
use echo_docs_service::{api::routes::create_router, config::Settings, AppState};
use serde_json::{json, Value};
use std::sync::Arc;
use tower::ServiceExt;

fn create_test_app(settings: Settings) -> Router {
    let state = AppState::build(settings).expect("state builds");
    create_router(Arc::new(state))
}

async fn send(app: Router, request: Request<Body>) -> (StatusCode, Value) {
    let response = app.oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    (status, serde_json::from_slice(&bytes).unwrap())
}

fn get(uri: &str) -> Request<Body> {
    Request::builder().uri(uri).body(Body::empty()).unwrap()
}

fn json_request(method: &str, uri: &str, body: &str) -> Request<Body> {
    Request::builder()
        .method(method)
        .uri(uri)
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(body.to_string()))
        .unwrap()
}

const WIDGET: &str = r#"{"name": "widget", "value": "5"}"#;

#[tokio::test]
async fn test_process_echoes_query() {
    let app = create_test_app(Settings::default());
    let (status, body) = send(app, get("/process?param1=X&param2=Y")).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!({"message": "Recibido param1: X y param2: Y"}));
}

#[tokio::test]
async fn test_process_decodes_query_values() {
    let app = create_test_app(Settings::default());
    let (status, body) = send(app, get("/process?param1=hola%20mundo&param2=a%26b")).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(
        body["message"],
        "Recibido param1: hola mundo y param2: a&b"
    );
}

#[tokio::test]
async fn test_repeated_query_key_keeps_first_value() {
    let app = create_test_app(Settings::default());
    let (status, body) = send(app, get("/process?param1=a&param1=b&param2=c")).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["message"], "Recibido param1: a y param2: c");
}

#[tokio::test]
async fn test_process_missing_param() {
    let app = create_test_app(Settings::default());
    let (status, body) = send(app, get("/process?param1=X")).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["message"], "Recibido param1: X y param2: None");
}

#[tokio::test]
async fn test_configured_placeholder() {
    let mut settings = Settings::default();
    settings.api.absent_placeholder = "null".to_string();
    let app = create_test_app(settings);

    let (_, body) = send(app, get("/item")).await;
    assert_eq!(body["message"], "GET recibido param1: null y param2: null");
}

#[tokio::test]
async fn test_get_item() {
    let app = create_test_app(Settings::default());
    let (status, body) = send(app, get("/item?param1=a&param2=b")).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["message"], "GET recibido param1: a y param2: b");
}

#[tokio::test]
async fn test_post_item() {
    let app = create_test_app(Settings::default());
    let (status, body) = send(app, json_request("POST", "/item", WIDGET)).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!({"message": "POST recibido name: widget, value: 5"}));
}

#[tokio::test]
async fn test_put_item() {
    let app = create_test_app(Settings::default());
    let (status, body) = send(app, json_request("PUT", "/item", WIDGET)).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(
        body,
        json!({"message": "PUT actualizado name: widget, nuevo value: 5"})
    );
}

#[tokio::test]
async fn test_delete_item() {
    let app = create_test_app(Settings::default());
    let (status, body) = send(app, json_request("DELETE", "/item", WIDGET)).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(
        body,
        json!({"message": "DELETE eliminado name: widget, value: 5"})
    );
}

#[tokio::test]
async fn test_post_item_missing_and_null_fields() {
    let app = create_test_app(Settings::default());
    let (status, body) = send(app, json_request("POST", "/item", r#"{"value": null}"#)).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["message"], "POST recibido name: None, value: None");
}

#[tokio::test]
async fn test_post_item_numeric_value() {
    let app = create_test_app(Settings::default());
    let (_, body) = send(
        app,
        json_request("POST", "/item", r#"{"name": "widget", "value": 5}"#),
    )
    .await;

    assert_eq!(body["message"], "POST recibido name: widget, value: 5");
}

#[tokio::test]
async fn test_malformed_body_is_bad_request() {
    let app = create_test_app(Settings::default());
    let (status, body) = send(app, json_request("PUT", "/item", "{name: widget")).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body["error"].as_str().unwrap().contains("malformed JSON body"));
}

#[tokio::test]
async fn test_unknown_path_is_not_found() {
    let app = create_test_app(Settings::default());
    let (status, body) = send(app, get("/unknown-path")).await;

    assert_eq!(status, StatusCode::NOT_FOUND);
    assert!(body["error"].is_string());
}

#[tokio::test]
async fn test_wrong_method_is_not_allowed() {
    let app = create_test_app(Settings::default());
    let response = app
        .oneshot(json_request("POST", "/process", WIDGET))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::METHOD_NOT_ALLOWED);
    assert_eq!(response.headers().get(header::ALLOW).unwrap(), "GET");
}

#[tokio::test]
async fn test_unsupported_verb_on_item() {
    let app = create_test_app(Settings::default());
    let response = app
        .oneshot(json_request("PATCH", "/item", WIDGET))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::METHOD_NOT_ALLOWED);
    assert_eq!(
        response.headers().get(header::ALLOW).unwrap(),
        "GET, POST, PUT, DELETE"
    );
}

#[tokio::test]
async fn test_responses_are_json() {
    let app = create_test_app(Settings::default());
    let response = app.oneshot(get("/process")).await.unwrap();

    assert_eq!(
        response.headers().get(header::CONTENT_TYPE).unwrap(),
        "application/json"
    );
}

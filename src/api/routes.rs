//! HTTP route definitions

use crate::api::extract::Request;
use crate::api::handlers;
use crate::api::models::MessageResponse;
use crate::api::router::{HttpMethod, Route, RouteInput, RouteTableBuilder};
use crate::error::{AppError, Result};
use crate::AppState;
use axum::{
    body::Bytes,
    extract::{Query, Request as HttpRequest, State},
    http::{Method, StatusCode, Uri},
    middleware::{self, Next},
    response::{IntoResponse, Response},
    routing::get,
    Json, Router,
};
use std::collections::HashMap;
use std::sync::Arc;
use tower_http::trace::TraceLayer;

const QUERY_PARAMS: &[&str] = &["param1", "param2"];

/// Register the echo routes, in documentation order
pub fn register_routes(builder: &mut RouteTableBuilder) -> Result<()> {
    builder.register(
        Route::new(HttpMethod::Get, "/process", handlers::process, "process")
            .operation_id("process")
            .summary("Echo two query parameters")
            .input(RouteInput::Query(QUERY_PARAMS)),
    )?;
    builder.register(
        Route::new(HttpMethod::Get, "/item", handlers::get_item, "item")
            .summary("Echo item query parameters")
            .input(RouteInput::Query(QUERY_PARAMS)),
    )?;
    builder.register(
        Route::new(HttpMethod::Post, "/item", handlers::post_item, "item")
            .summary("Echo a created item")
            .input(RouteInput::JsonBody),
    )?;
    builder.register(
        Route::new(HttpMethod::Put, "/item", handlers::put_item, "item")
            .summary("Echo an updated item")
            .input(RouteInput::JsonBody),
    )?;
    builder.register(
        Route::new(HttpMethod::Delete, "/item", handlers::delete_item, "item")
            .summary("Echo a deleted item")
            .input(RouteInput::JsonBody),
    )?;
    Ok(())
}

/// Create the main application router
pub fn create_router(state: Arc<AppState>) -> Router {
    let swagger_ui = state.docs.serve_ui();
    let schema_path = state.docs.schema_path().to_string();

    let docs = Router::new()
        // OpenAPI document
        .route(&schema_path, get(swagger_json))
        // Swagger UI
        .merge(swagger_ui)
        .route_layer(middleware::from_fn(docs_errors));

    Router::new()
        .merge(docs)
        // Everything else goes through the route table
        .fallback(dispatch)
        .with_state(state)
        .layer(TraceLayer::new_for_http())
}

/// Serve the rendered OpenAPI document
async fn swagger_json(State(state): State<Arc<AppState>>) -> Response {
    state.docs.serve_schema()
}

/// Give misses under the documentation routes the same JSON error body as the API.
///
/// The docs routes only answer GET.
async fn docs_errors(request: HttpRequest, next: Next) -> Response {
    let method = request.method().as_str().to_string();
    let path = request.uri().path().to_string();
    let response = next.run(request).await;

    match response.status() {
        StatusCode::NOT_FOUND => AppError::NotFound { method, path }.into_response(),
        StatusCode::METHOD_NOT_ALLOWED => AppError::MethodNotAllowed {
            method,
            path,
            allowed: vec![HttpMethod::Get],
        }
        .into_response(),
        _ => response,
    }
}

/// Hand the request to the route table
async fn dispatch(
    State(state): State<Arc<AppState>>,
    method: Method,
    uri: Uri,
    Query(pairs): Query<Vec<(String, String)>>,
    body: Bytes,
) -> std::result::Result<Json<MessageResponse>, AppError> {
    // First occurrence of a repeated key wins
    let mut query = HashMap::new();
    for (key, value) in pairs {
        query.entry(key).or_insert(value);
    }

    let request = Request {
        method: HttpMethod::from_http(&method),
        method_name: method.as_str().to_string(),
        path: uri.path().to_string(),
        query,
        body: if body.is_empty() { None } else { Some(body) },
    };

    let response = state.routes.dispatch(&request)?;
    Ok(Json(response))
}

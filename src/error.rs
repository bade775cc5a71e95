//! Error types and HTTP error mapping

use crate::api::models::ErrorResponse;
use crate::api::router::HttpMethod;
use axum::{
    http::{header, HeaderValue, StatusCode},
    response::{IntoResponse, Response},
    Json,
};
use thiserror::Error;

/// Application-wide result alias
pub type Result<T> = std::result::Result<T, AppError>;

/// Errors raised while building the service or dispatching requests
#[derive(Debug, Error)]
pub enum AppError {
    #[error("no route for {method} {path}")]
    NotFound { method: String, path: String },

    #[error("method {method} not allowed for {path}")]
    MethodNotAllowed {
        method: String,
        path: String,
        allowed: Vec<HttpMethod>,
    },

    #[error("malformed JSON body: {0}")]
    MalformedBody(String),

    #[error("route {method} {path} is already registered")]
    DuplicateRoute { method: HttpMethod, path: String },

    #[error("configuration error: {0}")]
    Config(#[from] config::ConfigError),

    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

impl AppError {
    /// HTTP status code for this error
    pub fn status_code(&self) -> StatusCode {
        match self {
            AppError::NotFound { .. } => StatusCode::NOT_FOUND,
            AppError::MethodNotAllowed { .. } => StatusCode::METHOD_NOT_ALLOWED,
            AppError::MalformedBody(_) => StatusCode::BAD_REQUEST,
            AppError::DuplicateRoute { .. }
            | AppError::Config(_)
            | AppError::Serialization(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status_code();

        let message = if status.is_server_error() {
            tracing::error!(error = %self, "internal error");
            "internal server error".to_string()
        } else {
            tracing::warn!(error = %self, status = status.as_u16(), "request rejected");
            self.to_string()
        };

        let allow = match &self {
            AppError::MethodNotAllowed { allowed, .. } => {
                let joined = allowed
                    .iter()
                    .map(|m| m.as_str())
                    .collect::<Vec<_>>()
                    .join(", ");
                HeaderValue::from_str(&joined).ok()
            }
            _ => None,
        };

        let mut response = (status, Json(ErrorResponse { error: message })).into_response();
        if let Some(value) = allow {
            response.headers_mut().insert(header::ALLOW, value);
        }
        response
    }
}

//! Request parameter extraction
//!
//! Missing keys are never errors: every lookup returns a [`Param`] so the
//! caller decides how an absent value is rendered. The only failure is a
//! body that is present but cannot be read as a JSON object.

use crate::api::router::HttpMethod;
use crate::error::{AppError, Result};
use axum::body::Bytes;
use serde_json::{Map, Value};
use std::collections::HashMap;

/// An inbound request, reduced to what handlers can see
#[derive(Debug, Clone)]
pub struct Request {
    pub method: Option<HttpMethod>,
    /// Raw verb, kept for error messages when `method` is unsupported
    pub method_name: String,
    pub path: String,
    pub query: HashMap<String, String>,
    pub body: Option<Bytes>,
}

impl Request {
    pub fn new(method: HttpMethod, path: impl Into<String>) -> Self {
        Self {
            method: Some(method),
            method_name: method.as_str().to_string(),
            path: path.into(),
            query: HashMap::new(),
            body: None,
        }
    }

    /// Add a query parameter
    pub fn with_query(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.query.insert(key.into(), value.into());
        self
    }

    /// Attach a raw body; an empty body counts as no body
    pub fn with_body(mut self, body: impl Into<Bytes>) -> Self {
        let body = body.into();
        self.body = if body.is_empty() { None } else { Some(body) };
        self
    }
}

/// Result of a single parameter lookup
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Param {
    Present(String),
    Absent,
}

impl Param {
    /// Text form of the parameter, using `absent` when it was not supplied
    pub fn render<'a>(&'a self, absent: &'a str) -> &'a str {
        match self {
            Param::Present(value) => value,
            Param::Absent => absent,
        }
    }

    pub fn is_absent(&self) -> bool {
        matches!(self, Param::Absent)
    }
}

/// Parsed JSON object body. Empty when the request carried no body.
#[derive(Debug, Clone, Default)]
pub struct JsonBody(Map<String, Value>);

/// Look up a query string parameter
pub fn get_query_param(request: &Request, key: &str) -> Param {
    match request.query.get(key) {
        Some(value) => Param::Present(value.clone()),
        None => Param::Absent,
    }
}

/// Parse the request body as a JSON object
pub fn parse_json_body(request: &Request) -> Result<JsonBody> {
    let Some(bytes) = request.body.as_ref() else {
        return Ok(JsonBody::default());
    };

    match serde_json::from_slice::<Value>(bytes) {
        Ok(Value::Object(map)) => Ok(JsonBody(map)),
        Ok(other) => Err(AppError::MalformedBody(format!(
            "expected a JSON object, got {}",
            json_kind(&other)
        ))),
        Err(e) => Err(AppError::MalformedBody(e.to_string())),
    }
}

/// Look up a field of a JSON body.
///
/// Strings are returned verbatim, `null` counts as absent and any other value
/// is returned as compact JSON text.
pub fn get_json_field(body: &JsonBody, key: &str) -> Param {
    match body.0.get(key) {
        None | Some(Value::Null) => Param::Absent,
        Some(Value::String(s)) => Param::Present(s.clone()),
        Some(other) => Param::Present(other.to_string()),
    }
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}

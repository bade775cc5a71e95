//! Route registration and dispatch
//!
//! Routes are collected in a [`RouteTableBuilder`] while the service is
//! starting. [`RouteTableBuilder::finalize`] consumes the builder, freezing the
//! table and producing the matching [`ApiDescription`]. After that point the
//! table is read-only and safe to share between requests.

use crate::api::docs::ApiDescription;
use crate::api::extract::Request;
use crate::api::handlers::{HandlerContext, HandlerFn};
use crate::api::models::MessageResponse;
use crate::config::Settings;
use crate::error::{AppError, Result};
use axum::http::Method;
use serde::{Deserialize, Serialize};
use std::fmt;
use tracing::{debug, info};

/// HTTP methods a route can be registered under
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Deserialize, Serialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum HttpMethod {
    Get,
    Post,
    Put,
    Delete,
}

impl HttpMethod {
    pub fn as_str(&self) -> &'static str {
        match self {
            HttpMethod::Get => "GET",
            HttpMethod::Post => "POST",
            HttpMethod::Put => "PUT",
            HttpMethod::Delete => "DELETE",
        }
    }

    /// Map an `http` method; anything outside the supported set is `None`
    pub fn from_http(method: &Method) -> Option<Self> {
        match method.as_str() {
            "GET" => Some(HttpMethod::Get),
            "POST" => Some(HttpMethod::Post),
            "PUT" => Some(HttpMethod::Put),
            "DELETE" => Some(HttpMethod::Delete),
            _ => None,
        }
    }
}

impl fmt::Display for HttpMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// How a route receives its input, used for documentation
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RouteInput {
    /// Optional query string parameters
    Query(&'static [&'static str]),
    /// Optional fields of a JSON object body
    JsonBody,
}

/// A single (path, method) entry mapped to one handler
#[derive(Clone)]
pub struct Route {
    pub path: String,
    pub method: HttpMethod,
    pub tag: String,
    pub operation_id: String,
    pub summary: Option<String>,
    pub input: RouteInput,
    handler: HandlerFn,
}

impl Route {
    pub fn new(
        method: HttpMethod,
        path: impl Into<String>,
        handler: HandlerFn,
        tag: impl Into<String>,
    ) -> Self {
        let path = path.into();
        let operation_id = default_operation_id(method, &path);
        Self {
            path,
            method,
            tag: tag.into(),
            operation_id,
            summary: None,
            input: RouteInput::Query(&[]),
            handler,
        }
    }

    pub fn operation_id(mut self, operation_id: impl Into<String>) -> Self {
        self.operation_id = operation_id.into();
        self
    }

    pub fn summary(mut self, summary: impl Into<String>) -> Self {
        self.summary = Some(summary.into());
        self
    }

    pub fn input(mut self, input: RouteInput) -> Self {
        self.input = input;
        self
    }

    fn matches(&self, method: HttpMethod, path: &str) -> bool {
        self.method == method && self.path == path
    }
}

impl fmt::Debug for Route {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Route")
            .field("method", &self.method)
            .field("path", &self.path)
            .field("tag", &self.tag)
            .field("operation_id", &self.operation_id)
            .finish()
    }
}

/// "/item" + POST -> "post_item"
fn default_operation_id(method: HttpMethod, path: &str) -> String {
    let slug: String = path
        .trim_matches('/')
        .chars()
        .map(|c| if c.is_ascii_alphanumeric() { c } else { '_' })
        .collect();
    if slug.is_empty() {
        method.as_str().to_lowercase()
    } else {
        format!("{}_{}", method.as_str().to_lowercase(), slug)
    }
}

/// Accumulates routes during startup
#[derive(Debug, Default)]
pub struct RouteTableBuilder {
    routes: Vec<Route>,
}

impl RouteTableBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a route; each (path, method) pair may be registered once
    pub fn register(&mut self, route: Route) -> Result<()> {
        if self
            .routes
            .iter()
            .any(|existing| existing.matches(route.method, &route.path))
        {
            return Err(AppError::DuplicateRoute {
                method: route.method,
                path: route.path,
            });
        }

        info!(method = %route.method, path = %route.path, tag = %route.tag, "Registered route");
        self.routes.push(route);
        Ok(())
    }

    pub fn len(&self) -> usize {
        self.routes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.routes.is_empty()
    }

    /// Freeze the table and build the API description from it
    pub fn finalize(self, settings: &Settings) -> (RouteTable, ApiDescription) {
        let description = ApiDescription::build(&settings.docs, &self.routes);
        let table = RouteTable {
            routes: self.routes,
            absent: settings.api.absent_placeholder.clone(),
        };
        info!(routes = table.routes.len(), "Route table frozen");
        (table, description)
    }
}

/// Immutable route table used to dispatch requests
#[derive(Debug)]
pub struct RouteTable {
    routes: Vec<Route>,
    absent: String,
}

impl RouteTable {
    /// Routes in registration order
    pub fn routes(&self) -> &[Route] {
        &self.routes
    }

    /// Placeholder rendered for missing parameters
    pub fn absent_placeholder(&self) -> &str {
        &self.absent
    }

    /// Methods registered for `path`, in registration order
    pub fn allowed_methods(&self, path: &str) -> Vec<HttpMethod> {
        self.routes
            .iter()
            .filter(|route| route.path == path)
            .map(|route| route.method)
            .collect()
    }

    /// Run the handler registered for the request's (path, method)
    pub fn dispatch(&self, request: &Request) -> Result<MessageResponse> {
        let route = request.method.and_then(|method| {
            self.routes
                .iter()
                .find(|route| route.matches(method, &request.path))
        });

        let Some(route) = route else {
            let allowed = self.allowed_methods(&request.path);
            return Err(if allowed.is_empty() {
                AppError::NotFound {
                    method: request.method_name.clone(),
                    path: request.path.clone(),
                }
            } else {
                AppError::MethodNotAllowed {
                    method: request.method_name.clone(),
                    path: request.path.clone(),
                    allowed,
                }
            });
        };

        debug!(method = %route.method, path = %route.path, "Dispatching request");
        let message = (route.handler)(&HandlerContext::new(request, &self.absent))?;
        Ok(MessageResponse::new(message))
    }
}

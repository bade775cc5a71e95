//! Echo Docs Service
//!
//! A small HTTP service whose routes echo query parameters or JSON body
//! fields back as `{"message": ...}`, together with a generated OpenAPI
//! document and a Swagger UI to browse it.

pub mod api;
pub mod config;
pub mod error;

pub use error::{AppError, Result};

use crate::api::docs::DocsServer;
use crate::api::router::{RouteTable, RouteTableBuilder};
use crate::config::Settings;
use tracing::info;

/// Application state shared across all handlers.
///
/// Built once at startup and never mutated afterwards.
pub struct AppState {
    pub settings: Settings,
    pub routes: RouteTable,
    pub docs: DocsServer,
}

impl AppState {
    /// Register the standard routes, freeze them and render the documentation
    pub fn build(settings: Settings) -> Result<Self> {
        let mut builder = RouteTableBuilder::new();
        api::routes::register_routes(&mut builder)?;

        let (routes, description) = builder.finalize(&settings);
        let docs = DocsServer::new(description, &settings.docs)?;
        info!(
            routes = routes.routes().len(),
            schema_path = %docs.schema_path(),
            ui_path = %docs.ui_path(),
            "Application state ready"
        );

        Ok(Self {
            settings,
            routes,
            docs,
        })
    }
}

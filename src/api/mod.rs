//! API module - extraction, handlers, routing and documentation

pub mod docs;
pub mod extract;
pub mod handlers;
pub mod models;
pub mod router;
pub mod routes;

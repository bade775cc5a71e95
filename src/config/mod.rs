//! Configuration loading

pub mod settings;

pub use settings::{ApiConfig, DocsConfig, LoggingConfig, ServerConfig, Settings};

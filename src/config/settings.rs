//! Application settings and configuration management

use crate::error::{AppError, Result};
use config::{Config, Environment, File, FileFormat};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Default configuration file, relative to the working directory
pub const DEFAULT_CONFIG_PATH: &str = "config/service.yaml";

/// Prefix for environment overrides, e.g. `ECHO_DOCS__SERVER__PORT`
pub const ENV_PREFIX: &str = "ECHO_DOCS";

/// Root configuration structure
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct Settings {
    pub server: ServerConfig,
    pub logging: LoggingConfig,
    pub docs: DocsConfig,
    pub api: ApiConfig,
}

/// Server configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ServerConfig {
    #[serde(default = "default_host")]
    pub host: String,
    #[serde(default = "default_port")]
    pub port: u16,
}

fn default_host() -> String {
    "0.0.0.0".to_string()
}

fn default_port() -> u16 {
    5000
}

/// Logging configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct LoggingConfig {
    #[serde(default = "default_log_level")]
    pub level: String,
    /// "json" or "pretty"
    #[serde(default = "default_log_format")]
    pub format: String,
}

fn default_log_level() -> String {
    "info".to_string()
}

fn default_log_format() -> String {
    "json".to_string()
}

/// API documentation configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct DocsConfig {
    #[serde(default = "default_title")]
    pub title: String,
    #[serde(default = "default_version")]
    pub version: String,
    #[serde(default)]
    pub description: Option<String>,
    /// Where the OpenAPI document is served
    #[serde(default = "default_schema_path")]
    pub schema_path: String,
    /// Mount point of the Swagger UI
    #[serde(default = "default_ui_path")]
    pub ui_path: String,
}

fn default_title() -> String {
    "API de muestra".to_string()
}

fn default_version() -> String {
    "1.0.0".to_string()
}

fn default_schema_path() -> String {
    "/swagger.json".to_string()
}

fn default_ui_path() -> String {
    "/swagger-ui".to_string()
}

/// Request handling configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ApiConfig {
    /// Text substituted for parameters the client did not send
    #[serde(default = "default_absent_placeholder")]
    pub absent_placeholder: String,
}

fn default_absent_placeholder() -> String {
    "None".to_string()
}

impl Settings {
    /// Load settings from the default configuration file and environment variables
    pub fn load() -> Result<Self> {
        Self::load_from_path(DEFAULT_CONFIG_PATH)
    }

    /// Load settings from a specific configuration file path.
    ///
    /// A missing file is not an error; defaults and environment overrides still apply.
    pub fn load_from_path<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();

        let format = if path.extension().map_or(false, |ext| ext == "toml") {
            FileFormat::Toml
        } else {
            FileFormat::Yaml
        };

        let mut builder = Config::builder()
            .set_default("server.host", default_host())?
            .set_default("server.port", i64::from(default_port()))?
            .set_default("logging.level", default_log_level())?
            .set_default("logging.format", default_log_format())?
            .set_default("docs.title", default_title())?
            .set_default("docs.version", default_version())?
            .set_default("docs.schema_path", default_schema_path())?
            .set_default("docs.ui_path", default_ui_path())?
            .set_default("api.absent_placeholder", default_absent_placeholder())?;

        if path.exists() {
            builder = builder.add_source(File::from(path).format(format));
        }

        builder = builder.add_source(
            Environment::with_prefix(ENV_PREFIX)
                .separator("__")
                .try_parsing(true),
        );

        let settings: Settings = builder.build()?.try_deserialize()?;
        Ok(settings)
    }

    /// Validate the configuration
    pub fn validate(&self) -> Result<()> {
        if self.server.port == 0 {
            return Err(invalid("Server port cannot be 0"));
        }

        for (name, path) in [
            ("docs.schema_path", &self.docs.schema_path),
            ("docs.ui_path", &self.docs.ui_path),
        ] {
            if !path.starts_with('/') {
                return Err(invalid(format!("{} must start with '/': {}", name, path)));
            }
        }

        if self.docs.schema_path == self.docs.ui_path {
            return Err(invalid("docs.schema_path and docs.ui_path must differ"));
        }

        Ok(())
    }

    /// Address the HTTP listener binds to
    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.server.host, self.server.port)
    }
}

fn invalid(message: impl Into<String>) -> AppError {
    AppError::Config(config::ConfigError::Message(message.into()))
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            server: ServerConfig {
                host: default_host(),
                port: default_port(),
            },
            logging: LoggingConfig {
                level: default_log_level(),
                format: default_log_format(),
            },
            docs: DocsConfig::default(),
            api: ApiConfig {
                absent_placeholder: default_absent_placeholder(),
            },
        }
    }
}

impl Default for DocsConfig {
    fn default() -> Self {
        Self {
            title: default_title(),
            version: default_version(),
            description: None,
            schema_path: default_schema_path(),
            ui_path: default_ui_path(),
        }
    }
}

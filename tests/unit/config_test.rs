//! Unit tests for configuration module

use echo_docs_service::config::Settings;
use std::io::Write;

fn write_config(contents: &str, suffix: &str) -> tempfile::NamedTempFile {
    let mut file = tempfile::Builder::new()
        .suffix(suffix)
        .tempfile()
        .unwrap();
    file.write_all(contents.as_bytes()).unwrap();
    file.flush().unwrap();
    file
}

#[test]
fn test_default_settings() {
    let settings = Settings::default();

    assert_eq!(settings.server.host, "0.0.0.0");
    assert_eq!(settings.server.port, 5000);
    assert_eq!(settings.logging.level, "info");
    assert_eq!(settings.logging.format, "json");
    assert_eq!(settings.docs.title, "API de muestra");
    assert_eq!(settings.docs.version, "1.0.0");
    assert_eq!(settings.api.absent_placeholder, "None");
}

#[test]
fn test_settings_validation_valid() {
    assert!(Settings::default().validate().is_ok());
}

#[test]
fn test_settings_validation_invalid_port() {
    let mut settings = Settings::default();
    settings.server.port = 0;

    assert!(settings.validate().is_err());
}

#[test]
fn test_settings_validation_ui_path_without_slash() {
    let mut settings = Settings::default();
    settings.docs.ui_path = "swagger-ui".to_string();

    assert!(settings.validate().is_err());
}

#[test]
fn test_load_missing_file_uses_defaults() {
    let dir = tempfile::tempdir().unwrap();
    let settings = Settings::load_from_path(dir.path().join("absent.yaml")).unwrap();

    assert_eq!(settings.docs.schema_path, "/swagger.json");
    assert_eq!(settings.docs.ui_path, "/swagger-ui");
}

#[test]
fn test_load_yaml_overrides() {
    let file = write_config(
        r#"
server:
  port: 9090
docs:
  title: "Demo"
  description: "Echo routes"
api:
  absent_placeholder: "null"
"#,
        ".yaml",
    );

    let settings = Settings::load_from_path(file.path()).unwrap();
    assert_eq!(settings.server.port, 9090);
    assert_eq!(settings.server.host, "0.0.0.0");
    assert_eq!(settings.docs.title, "Demo");
    assert_eq!(settings.docs.description.as_deref(), Some("Echo routes"));
    assert_eq!(settings.docs.version, "1.0.0");
    assert_eq!(settings.api.absent_placeholder, "null");
}

#[test]
fn test_load_toml_file() {
    let file = write_config(
        r#"
[logging]
format = "pretty"
"#,
        ".toml",
    );

    let settings = Settings::load_from_path(file.path()).unwrap();
    assert_eq!(settings.logging.format, "pretty");
    assert_eq!(settings.logging.level, "info");
}

#[test]
fn test_load_invalid_file_fails() {
    let file = write_config("server: [not, a, map", ".yaml");
    assert!(Settings::load_from_path(file.path()).is_err());
}

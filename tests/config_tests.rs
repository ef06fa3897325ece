use nodequery::config::{Config, OutputFormat};
use std::fs;
use tempfile::TempDir;

#[test]
fn test_config_defaults() {
    let config = Config::default();

    assert_eq!(config.payload_field, "node");
    assert_eq!(config.children_field, "children");
    assert_eq!(config.output, OutputFormat::Plain);
    assert_eq!(config.log_filter, "warn");
}

#[test]
fn test_custom_config() {
    let config = Config {
        payload_field: "id".to_string(),
        children_field: "kids".to_string(),
        output: OutputFormat::Yaml,
        log_filter: "nodequery=debug".to_string(),
    };

    let fields = config.design_fields();
    assert_eq!(fields.payload, "id");
    assert_eq!(fields.children, "kids");
}

#[test]
fn test_save_and_load_round_trip() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("nested").join("config.toml");

    let config = Config {
        output: OutputFormat::Json,
        ..Config::default()
    };
    config.save_to(&path).unwrap();

    let contents = fs::read_to_string(&path).unwrap();
    assert!(contents.contains("output = \"json\""), "{}", contents);
    assert_eq!(Config::load_from(&path), config);
}

#[test]
fn test_missing_file_uses_defaults() {
    let dir = TempDir::new().unwrap();
    let config = Config::load_from(&dir.path().join("missing.toml"));
    assert_eq!(config, Config::default());
}

#[test]
fn test_invalid_file_uses_defaults() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("config.toml");
    fs::write(&path, "output = 42\n").unwrap();

    assert_eq!(Config::load_from(&path), Config::default());
}

#[test]
fn test_config_path_location() {
    if let Some(path) = Config::config_path() {
        assert!(path.ends_with(".config/nodequery/config.toml"));
    }
}

#[test]
fn test_try_load_reports_invalid_file() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("config.toml");
    fs::write(&path, "output = 42\n").unwrap();

    let err = Config::try_load_from(&path).unwrap_err();
    let message = format!("{:#}", err);
    assert!(message.contains("Invalid config file"), "{}", message);
    assert!(message.contains("config.toml"), "{}", message);
}

#[test]
fn test_try_load_missing_file_is_default() {
    let dir = TempDir::new().unwrap();
    let config = Config::try_load_from(&dir.path().join("missing.toml")).unwrap();
    assert_eq!(config, Config::default());
}

use bigboard::AppError;
use bigboard::config::{ConfigLoadResult, load_config_from};
use bigboard::lifecycle::ApplicationLifecycle;
use claims::*;
use std::path::PathBuf;
use std::time::Duration;
use tempfile::TempDir;

fn write_config(dir: &TempDir, content: &str) -> PathBuf {
    let path = dir.path().join("config.toml");
    std::fs::write(&path, content).unwrap();
    path
}

#[test]
fn test_file_values_are_loaded() {
    let dir = TempDir::new().unwrap();
    let path = write_config(
        &dir,
        r#"
settings_path = "/tmp/bigboard-test/settings.json"

[http]
base_url = "https://api.bigboard.test"
timeout_secs = 12

[channel]
connect_delay_ms = 0

[logging]
level = "debug"
file = "bigboard-test.log"
"#,
    );

    let ConfigLoadResult::Success(config) = load_config_from(Some(&path)) else {
        panic!("configuration should load");
    };

    assert_eq!(
        config.settings_path(),
        PathBuf::from("/tmp/bigboard-test/settings.json")
    );
    assert_eq!(config.http().base_url(), Some("https://api.bigboard.test"));
    assert_eq!(config.http().timeout(), Duration::from_secs(12));
    assert_eq!(config.channel().connect_delay(), Duration::ZERO);
    assert_eq!(config.logging().level(), "debug");
    assert_eq!(config.logging().file(), Some("bigboard-test.log"));
    assert_ok!(ApplicationLifecycle::validate_configuration(&config));
}

#[test]
fn test_empty_file_uses_defaults() {
    let dir = TempDir::new().unwrap();
    let path = write_config(&dir, "");

    let ConfigLoadResult::Success(config) = load_config_from(Some(&path)) else {
        panic!("configuration should load");
    };

    assert_none!(config.http().base_url());
    assert_eq!(config.http().timeout_secs(), 30);
    assert_eq!(config.channel().connect_delay_ms(), 250);
    assert_eq!(config.logging().level(), "info");
    assert_none!(config.logging().file());
}

#[test]
fn test_missing_explicit_file_is_a_load_error() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("absent.toml");

    let result = load_config_from(Some(&path));

    assert_matches!(result, ConfigLoadResult::LoadError(_));
}

#[test]
fn test_wrong_value_type_is_a_deserialize_error() {
    let dir = TempDir::new().unwrap();
    let path = write_config(&dir, "[http]\ntimeout_secs = \"soon\"\n");

    let result = load_config_from(Some(&path));

    assert_matches!(result, ConfigLoadResult::DeserializeError(_));
}

#[test]
fn test_out_of_range_values_fail_validation() {
    let dir = TempDir::new().unwrap();
    let path = write_config(
        &dir,
        r#"
[http]
base_url = "bigboard.test"
timeout_secs = 900

[logging]
level = "chatty"
"#,
    );
    let ConfigLoadResult::Success(config) = load_config_from(Some(&path)) else {
        panic!("configuration should load");
    };

    let result = ApplicationLifecycle::validate_configuration(&config);

    let Err(AppError::Config(message)) = result else {
        panic!("validation should fail with a configuration error");
    };
    assert!(message.contains("HTTP timeout out of range"));
    assert!(message.contains("HTTP base URL is not usable"));
    assert!(message.contains("Unknown log level"));
}

use bigboard::AppError;
use bigboard::config::{AppConfig, ConfigLoadResult, load_config_from};
use bigboard::lifecycle::{ApplicationLifecycle, TokenAction};
use claims::*;
use std::path::Path;
use std::time::Duration;
use tempfile::TempDir;

mod helpers {
    use super::*;

    /// Loads a configuration pointing the settings file at `settings_path`.
    pub fn create_config(dir: &TempDir, settings_path: &Path) -> AppConfig {
        let config_path = dir.path().join("config.toml");
        std::fs::write(
            &config_path,
            format!(
                "settings_path = '{}'\n\n[channel]\nconnect_delay_ms = 0\n",
                settings_path.display()
            ),
        )
        .unwrap();

        match load_config_from(Some(&config_path)) {
            ConfigLoadResult::Success(config) => *config,
            other => panic!("configuration should load: {other:?}"),
        }
    }

    pub fn read_settings(path: &Path) -> serde_json::Value {
        let content = std::fs::read_to_string(path).unwrap();
        serde_json::from_str(&content).unwrap()
    }

    pub fn position(text: &str, needle: &str) -> usize {
        text.find(needle)
            .unwrap_or_else(|| panic!("'{needle}' missing from output:\n{text}"))
    }
}

use helpers::*;

#[tokio::test]
async fn test_run_prints_labels_and_pages() {
    let dir = TempDir::new().unwrap();
    let settings_path = dir.path().join("settings.json");
    let config = create_config(&dir, &settings_path);
    let app = assert_ok!(ApplicationLifecycle::build(&config));
    assert!(!app.splash_hidden());
    let mut out = Vec::new();

    let result = app
        .run(
            TokenAction::Keep,
            &mut out,
            tokio::time::sleep(Duration::from_millis(300)),
        )
        .await;

    assert_ok!(result);
    let text = String::from_utf8(out).unwrap();
    assert!(position(&text, "Page: Splash") < position(&text, "Page: Home"));
    assert!(position(&text, "Connection: Connecting") < position(&text, "Connection: Connected"));
    assert!(!text.contains("Error:"));
    assert_eq!(read_settings(&settings_path)["Language"], "en");
}

#[tokio::test]
async fn test_token_is_stored_after_startup() {
    let dir = TempDir::new().unwrap();
    let settings_path = dir.path().join("settings.json");
    let config = create_config(&dir, &settings_path);
    let app = assert_ok!(ApplicationLifecycle::build(&config));
    let mut out = Vec::new();

    let result = app
        .run(
            TokenAction::Set("dXNlcjpwYXNz".to_string()),
            &mut out,
            tokio::time::sleep(Duration::from_millis(100)),
        )
        .await;

    assert_ok!(result);
    let settings = read_settings(&settings_path);
    assert_eq!(settings["AuthToken"], "dXNlcjpwYXNz");
    assert_eq!(settings["Language"], "en");
}

#[tokio::test]
async fn test_logout_clears_stored_token() {
    let dir = TempDir::new().unwrap();
    let settings_path = dir.path().join("settings.json");
    std::fs::write(&settings_path, r#"{ "AuthToken": "old", "Language": "fr" }"#).unwrap();
    let config = create_config(&dir, &settings_path);
    let app = assert_ok!(ApplicationLifecycle::build(&config));
    let mut out = Vec::new();

    let result = app
        .run(
            TokenAction::Clear,
            &mut out,
            tokio::time::sleep(Duration::from_millis(100)),
        )
        .await;

    assert_ok!(result);
    let settings = read_settings(&settings_path);
    assert!(settings.get("AuthToken").is_none());
    assert_eq!(settings["Language"], "fr");
}

#[tokio::test]
async fn test_settings_failure_ends_run_with_startup_error() {
    let dir = TempDir::new().unwrap();
    // A directory cannot be read as a settings file.
    let settings_path = dir.path().join("settings.json");
    std::fs::create_dir(&settings_path).unwrap();
    let config = create_config(&dir, &settings_path);
    let app = assert_ok!(ApplicationLifecycle::build(&config));
    let mut out = Vec::new();

    let result = tokio::time::timeout(
        Duration::from_secs(2),
        app.run(TokenAction::Keep, &mut out, std::future::pending::<()>()),
    )
    .await
    .expect("critical startup errors end the run");

    assert_matches!(result, Err(AppError::Startup(_)));
    let text = String::from_utf8(out).unwrap();
    assert!(text.contains("Error: BigBoard could not finish starting up."));
    assert!(!text.contains("Page: Home"));
    assert!(!text.contains("Connection:"));
}

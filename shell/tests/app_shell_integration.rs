use claims::*;
use futures_util::StreamExt;
use reqwest::Method;
use reqwest::header::AUTHORIZATION;
use shell::channel::{ChannelError, ConnectionState, InProcessChannel};
use shell::http::{HttpPipeline, RequestArg};
use shell::navigation::{Page, menu};
use shell::platform::ReadinessGate;
use shell::settings::{JsonFileSettingsStore, SettingsStore};
use shell::startup::StartupPhase;
use shell::translation::LanguageRegistry;
use shell::{AppShell, ShellParts};
use std::sync::Arc;
use std::time::Duration;
use tempfile::TempDir;

mod helpers {
    use super::*;

    pub struct Harness {
        pub shell: AppShell,
        pub gate: Arc<ReadinessGate>,
        pub channel: InProcessChannel,
        pub settings: Arc<JsonFileSettingsStore>,
        pub translator: Arc<LanguageRegistry>,
        // Held so the settings directory outlives the test body.
        pub _dir: TempDir,
    }

    pub struct SilentChrome;

    impl shell::platform::NativeChrome for SilentChrome {
        fn style_default_status_bar(&self) {}

        fn hide_splash(&self) {}
    }

    pub fn create_harness() -> Harness {
        let dir = TempDir::new().unwrap();
        let gate = Arc::new(ReadinessGate::new());
        let channel = InProcessChannel::new(Duration::from_millis(5));
        let settings = Arc::new(JsonFileSettingsStore::new(dir.path().join("settings.json")));
        let translator = Arc::new(LanguageRegistry::new());

        let shell = AppShell::new(
            ShellParts {
                platform: gate.clone(),
                chrome: Arc::new(SilentChrome),
                settings: settings.clone(),
                translator: translator.clone(),
                channel: Arc::new(channel.clone()),
            },
            HttpPipeline::new(reqwest::Client::new(), Some("https://bigboard.test".to_string())),
        );

        Harness {
            shell,
            gate,
            channel,
            settings,
            translator,
            _dir: dir,
        }
    }

    pub async fn wait_until<F: Fn() -> bool>(check: F) {
        let waited = tokio::time::timeout(Duration::from_secs(2), async {
            while !check() {
                tokio::time::sleep(Duration::from_millis(5)).await;
            }
        })
        .await;
        assert!(waited.is_ok(), "condition not reached in time");
    }
}

use helpers::*;

#[tokio::test]
async fn test_startup_connects_and_shows_home() {
    let harness = create_harness();
    let mut labels = assert_some!(harness.shell.take_connection_labels());
    assert_eq!(harness.shell.current_root(), Page::Splash);

    harness.gate.mark_ready();
    assert_ok!(harness.shell.initialize().await);

    assert_eq!(harness.shell.current_root(), Page::Home);
    assert_eq!(*harness.shell.startup_phase().borrow(), StartupPhase::Started);
    assert_eq!(labels.next().await.as_deref(), Some("Connecting"));
    assert_eq!(labels.next().await.as_deref(), Some("Connected"));
    assert_eq!(harness.channel.state(), ConnectionState::Connected);
}

#[tokio::test]
async fn test_default_language_is_persisted_to_file() {
    let harness = create_harness();
    harness.gate.mark_ready();

    assert_ok!(harness.shell.initialize().await);

    assert_eq!(harness.translator.registered(), vec!["en".to_string()]);
    assert_eq!(harness.translator.default_lang().as_deref(), Some("en"));
    assert_eq!(harness.translator.active().as_deref(), Some("en"));

    let content = std::fs::read_to_string(harness.settings.path()).unwrap();
    let json: serde_json::Value = serde_json::from_str(&content).unwrap();
    assert_eq!(json["Language"], "en");
}

#[tokio::test]
async fn test_labels_can_be_taken_once() {
    let harness = create_harness();

    assert_some!(harness.shell.take_connection_labels());
    assert_none!(harness.shell.take_connection_labels().map(|_| ()));
}

#[tokio::test]
async fn test_later_transitions_reach_the_labels() {
    let harness = create_harness();
    let mut labels = assert_some!(harness.shell.take_connection_labels());
    harness.gate.mark_ready();
    assert_ok!(harness.shell.initialize().await);
    assert_eq!(labels.next().await.as_deref(), Some("Connecting"));
    assert_eq!(labels.next().await.as_deref(), Some("Connected"));

    harness.channel.set_state(ConnectionState::Reconnecting);
    harness.channel.set_state(ConnectionState::Connected);

    assert_eq!(labels.next().await.as_deref(), Some("Reconnecting"));
    assert_eq!(labels.next().await.as_deref(), Some("Connected"));
}

#[tokio::test]
async fn test_requests_pick_up_token_set_after_startup() {
    let harness = create_harness();
    harness.gate.mark_ready();
    assert_ok!(harness.shell.initialize().await);
    let http = harness.shell.http();
    assert_eq!(http.interceptor_count(), 1);

    let before = assert_ok!(http.build(Method::GET, vec![RequestArg::url("boards")]));
    assert_none!(before.headers().get(AUTHORIZATION));

    assert_ok!(harness.shell.settings().set_auth_token("dXNlcjpwYXNz").await);
    let after = assert_ok!(http.build(Method::GET, vec![RequestArg::url("boards")]));

    assert_eq!(
        after.headers().get(AUTHORIZATION).unwrap(),
        "Basic dXNlcjpwYXNz"
    );
    assert_eq!(after.url().as_str(), "https://bigboard.test/boards");
}

#[tokio::test]
async fn test_menu_replaces_root() {
    let harness = create_harness();
    let mut roots = harness.shell.root_page();
    harness.gate.mark_ready();
    assert_ok!(harness.shell.initialize().await);

    let about = menu()
        .iter()
        .find(|entry| entry.page == Page::About)
        .unwrap();
    harness.shell.open_page(about);

    assert!(roots.has_changed().unwrap());
    assert_eq!(*roots.borrow_and_update(), Page::About);
    assert_eq!(harness.shell.menu().len(), 3);
}

#[tokio::test]
async fn test_sinks_stop_after_stream_failures() {
    let harness = create_harness();
    wait_until(|| harness.shell.active_sinks() == 2).await;

    harness.channel.fail_next_start("hub unreachable");
    harness.gate.mark_ready();
    assert_ok!(harness.shell.initialize().await);
    harness
        .channel
        .report_error(ChannelError::Transport("socket reset".to_string()));
    harness
        .channel
        .fail_errors(ChannelError::Closed("hub shut down".to_string()));

    wait_until(|| harness.shell.active_sinks() == 0).await;
    assert_eq!(harness.channel.state(), ConnectionState::Disconnected);
}

#[tokio::test]
async fn test_startup_waits_for_platform() {
    let harness = create_harness();

    let pending =
        tokio::time::timeout(Duration::from_millis(50), harness.shell.initialize()).await;

    assert!(pending.is_err());
    assert_eq!(harness.shell.current_root(), Page::Splash);
    assert!(!harness.channel.is_started());
    assert!(!harness.settings.path().exists());
}

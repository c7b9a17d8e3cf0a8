//! # BigBoard Shell Library
//!
//! Orchestration core of the BigBoard client application. This library
//! sequences one-time startup, adapts the real-time channel's connection
//! state into display labels, and attaches the stored credential to every
//! outgoing HTTP request.
//!
//! ## Modules
//!
//! - [`app_shell`] - Wires all shell components together for a host application
//! - [`channel`] - Real-time channel provider contract and an in-process implementation
//! - [`connection`] - Connection state adapter producing display labels
//! - [`consts`] - Shared constants such as the default language
//! - [`diagnostics`] - Passive log sinks for channel errors and start results
//! - [`http`] - Request pipeline, interceptors and the auth header interceptor
//! - [`navigation`] - Pages, the static menu and the root navigator
//! - [`platform`] - Platform readiness gate and native chrome contract
//! - [`settings`] - Persisted settings store contract and JSON file store
//! - [`startup`] - Startup orchestrator and its explicit phase machine
//! - [`taskpool`] - Task pool hosting long-lived background subscriptions
//! - [`translation`] - Translation service contract and language registry

pub mod app_shell;
pub mod channel;
pub mod connection;
pub mod consts;
pub mod diagnostics;
pub mod http;
pub mod navigation;
pub mod platform;
pub mod settings;
pub mod startup;
pub mod taskpool;
pub mod translation;

pub use app_shell::{AppShell, ShellParts};
pub use channel::{ChannelError, ChannelProvider, ConnectionState, InProcessChannel, StreamEvent};
pub use connection::ConnectionStateAdapter;
pub use http::{AuthHeaderInterceptor, HttpError, HttpPipeline, RequestArg, RequestOptions};
pub use navigation::{MenuEntry, Navigator, Page, RootNavigator};
pub use platform::{NativeChrome, Platform, ReadinessGate};
pub use settings::{JsonFileSettingsStore, Settings, SettingsError, SettingsStore};
pub use startup::{StartupCollaborators, StartupError, StartupOrchestrator, StartupPhase};
pub use translation::{LanguageRegistry, Translator};

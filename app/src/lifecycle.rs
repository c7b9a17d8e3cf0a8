//! Application lifecycle management
//!
//! Loads and validates configuration, assembles the shell from its
//! collaborators, runs startup and then echoes connection labels and root
//! page changes until shutdown is requested.

use crate::config::{self, AppConfig, ConfigLoadResult};
use crate::error::{AppError, AppResult, ContextualError, ErrorReporter};
use crate::platform::TerminalChrome;

use futures_util::StreamExt;
use log::{error, info};
use shell::channel::InProcessChannel;
use shell::http::HttpPipeline;
use shell::platform::ReadinessGate;
use shell::settings::JsonFileSettingsStore;
use shell::translation::LanguageRegistry;
use shell::{AppShell, ShellParts};
use std::future::Future;
use std::io::Write;
use std::path::Path;
use std::sync::Arc;
use tokio::sync::mpsc::{self, UnboundedReceiver};

/// What to do with the stored credential once startup has finished
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum TokenAction {
    #[default]
    Keep,
    Set(String),
    Clear,
}

/// Application initialization
pub struct ApplicationLifecycle;

impl ApplicationLifecycle {
    /// Load the application configuration once for the whole process
    pub fn load_configuration(path: Option<&Path>) -> AppResult<&'static AppConfig> {
        Self::config_from(config::init_config(path))
    }

    fn config_from(result: &ConfigLoadResult) -> AppResult<&AppConfig> {
        match result {
            ConfigLoadResult::Success(config) => Ok(config.as_ref()),
            ConfigLoadResult::LoadError(error) | ConfigLoadResult::DeserializeError(error) => {
                Err(AppError::Config(error.clone()))
            }
        }
    }

    /// Validate configuration, joining every violation into one error
    pub fn validate_configuration(config: &AppConfig) -> AppResult<()> {
        if let Err(validation_errors) = config.validate() {
            error!(
                "Configuration validation failed with {} errors",
                validation_errors.len()
            );
            for (i, validation_error) in validation_errors.iter().enumerate() {
                error!("Config validation error {}: {:?}", i + 1, validation_error);
            }

            let messages: Vec<String> = validation_errors
                .iter()
                .map(|e| e.user_message())
                .collect();
            return Err(AppError::Config(messages.join("\n\n")));
        }
        Ok(())
    }

    /// Assemble the shell and its collaborators.
    ///
    /// Must run inside a tokio runtime; the shell spawns its diagnostic
    /// sinks right away.
    pub fn build(config: &AppConfig) -> AppResult<BigBoardApp> {
        info!("Starting BigBoard");

        let http = HttpPipeline::with_timeout(
            config.http().base_url().map(str::to_string),
            config.http().timeout(),
        )?;

        let gate = Arc::new(ReadinessGate::new());
        let chrome = Arc::new(TerminalChrome::new());
        let settings_path = config.settings_path();
        info!("Using settings file {}", settings_path.display());

        let shell = AppShell::new(
            ShellParts {
                platform: gate.clone(),
                chrome: chrome.clone(),
                settings: Arc::new(JsonFileSettingsStore::new(settings_path)),
                translator: Arc::new(LanguageRegistry::new()),
                channel: Arc::new(InProcessChannel::new(config.channel().connect_delay())),
            },
            http,
        );

        let (tx, errors) = mpsc::unbounded_channel();
        Ok(BigBoardApp {
            shell,
            gate,
            chrome,
            reporter: ErrorReporter::new(tx),
            errors,
        })
    }
}

/// Assembled application, ready to run
pub struct BigBoardApp {
    shell: AppShell,
    gate: Arc<ReadinessGate>,
    chrome: Arc<TerminalChrome>,
    reporter: ErrorReporter,
    errors: UnboundedReceiver<ContextualError>,
}

impl BigBoardApp {
    pub fn shell(&self) -> &AppShell {
        &self.shell
    }

    pub fn reporter(&self) -> ErrorReporter {
        self.reporter.clone()
    }

    pub fn splash_hidden(&self) -> bool {
        self.chrome.splash_hidden()
    }

    /// Runs startup, then writes every connection label and root change to
    /// `out` until `shutdown` completes.
    ///
    /// # Errors
    ///
    /// Returns the error of the first critical report, e.g. a startup that
    /// could not load settings, or an I/O error writing to `out`.
    pub async fn run<W, S>(mut self, token: TokenAction, out: &mut W, shutdown: S) -> AppResult<()>
    where
        W: Write,
        S: Future<Output = ()>,
    {
        let mut labels = self
            .shell
            .take_connection_labels()
            .ok_or_else(|| AppError::Startup("connection labels were already taken".to_string()))?;
        let mut roots = self.shell.root_page();
        writeln!(out, "Page: {}", *roots.borrow_and_update())?;

        // A terminal is usable as soon as the process runs.
        self.gate.mark_ready();
        match self.shell.initialize().await {
            Ok(()) => self.apply_token_action(token).await,
            Err(e) => self.reporter.report_critical_and_exit(
                e.into(),
                "Startup",
                "initialize",
                "BigBoard could not finish starting up.",
            ),
        }

        tokio::pin!(shutdown);
        let mut labels_done = false;
        loop {
            tokio::select! {
                Some(report) = self.errors.recv() => {
                    writeln!(out, "Error: {}", report.user_message())?;
                    if report.is_critical() {
                        return Err(report.error);
                    }
                }
                label = labels.next(), if !labels_done => match label {
                    Some(label) => writeln!(out, "Connection: {label}")?,
                    None => labels_done = true,
                },
                Ok(()) = roots.changed() => {
                    writeln!(out, "Page: {}", *roots.borrow_and_update())?;
                }
                () = &mut shutdown => {
                    info!("Shutdown requested");
                    break;
                }
            }
            out.flush()?;
        }

        Ok(())
    }

    async fn apply_token_action(&self, token: TokenAction) {
        let settings = self.shell.settings();
        match token {
            TokenAction::Keep => {}
            TokenAction::Set(token) => match settings.set_auth_token(&token).await {
                Ok(()) => info!("Auth token stored"),
                Err(e) => self.reporter.report_simple(e.into(), "Settings", "set_auth_token"),
            },
            TokenAction::Clear => match settings.clear_auth_token().await {
                Ok(()) => info!("Auth token cleared"),
                Err(e) => self.reporter.report_warning(e.into(), "Settings", "clear_auth_token"),
            },
        }
    }
}

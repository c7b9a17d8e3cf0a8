//! Startup orchestration.
//!
//! Runs the one-time startup sequence as an explicit phase machine:
//!
//! ```text
//! Idle -> PlatformReady -> SettingsLoaded -> TranslationsReady -> Started
//!                      \-> Failed (settings could not be loaded)
//! ```
//!
//! Each step waits for the previous one. Nothing is retried and nothing
//! times out: a platform that never becomes ready keeps the orchestrator
//! waiting forever.

use crate::channel::ChannelProvider;
use crate::consts::LANG_EN;
use crate::navigation::{Navigator, Page};
use crate::platform::{NativeChrome, Platform};
use crate::settings::{SettingsError, SettingsStore};
use crate::translation::Translator;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use thiserror::Error;
use tokio::sync::watch;

/// Progress of the startup sequence.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum StartupPhase {
    Idle,
    PlatformReady,
    SettingsLoaded,
    TranslationsReady,
    /// Channel started and home view requested
    Started,
    /// Startup stopped for good; no later step will run
    Failed(String),
}

impl StartupPhase {
    pub fn is_terminal(&self) -> bool {
        matches!(self, StartupPhase::Started | StartupPhase::Failed(_))
    }
}

#[derive(Debug, Error)]
pub enum StartupError {
    #[error("Startup has already been initiated")]
    AlreadyInitialized,

    #[error("Settings could not be loaded: {0}")]
    SettingsInit(#[source] SettingsError),
}

/// Collaborators driven by the orchestrator.
#[derive(Clone)]
pub struct StartupCollaborators {
    pub platform: Arc<dyn Platform>,
    pub chrome: Arc<dyn NativeChrome>,
    pub settings: Arc<dyn SettingsStore>,
    pub translator: Arc<dyn Translator>,
    pub channel: Arc<dyn ChannelProvider>,
    pub navigator: Arc<dyn Navigator>,
}

/// Sequences platform readiness, settings, translations, channel start and
/// the first navigation.
pub struct StartupOrchestrator {
    collaborators: StartupCollaborators,
    phase_tx: watch::Sender<StartupPhase>,
    initiated: AtomicBool,
}

impl StartupOrchestrator {
    pub fn new(collaborators: StartupCollaborators) -> Self {
        let (phase_tx, _) = watch::channel(StartupPhase::Idle);
        Self {
            collaborators,
            phase_tx,
            initiated: AtomicBool::new(false),
        }
    }

    pub fn phase(&self) -> StartupPhase {
        self.phase_tx.borrow().clone()
    }

    pub fn subscribe(&self) -> watch::Receiver<StartupPhase> {
        self.phase_tx.subscribe()
    }

    /// Runs the startup sequence. Only the first call does anything.
    ///
    /// 1. wait for the platform
    /// 2. style the status bar and hide the splash screen
    /// 3. load settings
    /// 4. configure translations and pick the active language
    /// 5. start the real-time channel without waiting for it
    /// 6. navigate to the home view
    ///
    /// # Errors
    ///
    /// [`StartupError::AlreadyInitialized`] on every call after the first,
    /// [`StartupError::SettingsInit`] when settings fail to load; in that
    /// case the phase becomes [`StartupPhase::Failed`] and steps 4 to 6
    /// never run.
    pub async fn initialize(&self) -> Result<(), StartupError> {
        if self.initiated.swap(true, Ordering::SeqCst) {
            log::warn!("Startup requested more than once; ignoring");
            return Err(StartupError::AlreadyInitialized);
        }

        let c = &self.collaborators;
        log::info!("Waiting for platform readiness");
        c.platform.ready().await;
        self.advance(StartupPhase::PlatformReady);

        c.chrome.style_default_status_bar();
        c.chrome.hide_splash();

        if let Err(e) = c.settings.init().await {
            log::error!("Startup halted, settings could not be loaded: {e}");
            self.advance(StartupPhase::Failed(e.to_string()));
            return Err(StartupError::SettingsInit(e));
        }
        self.advance(StartupPhase::SettingsLoaded);

        self.setup_translations().await;
        self.advance(StartupPhase::TranslationsReady);

        c.channel.start();
        self.advance(StartupPhase::Started);

        c.navigator.set_root(Page::Home);
        Ok(())
    }

    async fn setup_translations(&self) {
        let c = &self.collaborators;
        c.translator.add_langs(&[LANG_EN]);
        c.translator.set_default_lang(LANG_EN);

        match c.settings.language().filter(|lang| !lang.is_empty()) {
            Some(lang) => c.translator.use_lang(&lang),
            None => {
                c.translator.use_lang(LANG_EN);
                if let Err(e) = c.settings.set_language(LANG_EN).await {
                    log::warn!("Failed to persist default language '{LANG_EN}': {e}");
                }
            }
        }
    }

    fn advance(&self, phase: StartupPhase) {
        log::info!("Startup phase -> {phase:?}");
        self.phase_tx.send_replace(phase);
    }
}

use crate::channel::ChannelProvider;
use crate::connection::ConnectionStateAdapter;
use crate::consts::SHELL_BACKGROUND_TASKS;
use crate::diagnostics;
use crate::http::{AuthHeaderInterceptor, HttpPipeline};
use crate::navigation::{self, MenuEntry, Navigator, Page, RootNavigator};
use crate::platform::{NativeChrome, Platform};
use crate::settings::SettingsStore;
use crate::startup::{StartupCollaborators, StartupError, StartupOrchestrator, StartupPhase};
use crate::taskpool::TaskPool;
use crate::translation::Translator;
use futures::stream::BoxStream;
use std::sync::Arc;
use tokio::sync::watch;

/// External collaborators the shell is assembled from.
#[derive(Clone)]
pub struct ShellParts {
    pub platform: Arc<dyn Platform>,
    pub chrome: Arc<dyn NativeChrome>,
    pub settings: Arc<dyn SettingsStore>,
    pub translator: Arc<dyn Translator>,
    pub channel: Arc<dyn ChannelProvider>,
}

/// The assembled application shell.
///
/// Construction registers the auth header interceptor on the HTTP pipeline,
/// subscribes the connection state adapter and spawns both diagnostic sinks,
/// all before startup can call `start` on the channel. Must be created
/// inside a tokio runtime.
///
/// # Examples
///
/// ```no_run
/// use shell::{AppShell, HttpPipeline, ShellParts};
///
/// # async fn example(parts: ShellParts) {
/// let shell = AppShell::new(parts, HttpPipeline::new(reqwest::Client::new(), None));
/// let mut labels = shell.take_connection_labels().expect("labels are taken once");
///
/// if let Err(e) = shell.initialize().await {
///     log::error!("Startup failed: {e}");
/// }
/// # }
/// ```
pub struct AppShell {
    orchestrator: StartupOrchestrator,
    http: Arc<HttpPipeline>,
    navigator: Arc<RootNavigator>,
    connection: ConnectionStateAdapter,
    settings: Arc<dyn SettingsStore>,
    // Keeps the diagnostic sinks alive for the shell's lifetime.
    tasks: TaskPool,
}

impl AppShell {
    pub fn new(parts: ShellParts, http: HttpPipeline) -> Self {
        http.add_interceptor(Arc::new(AuthHeaderInterceptor::new(parts.settings.clone())));

        let connection = ConnectionStateAdapter::subscribe(parts.channel.as_ref());

        let tasks = TaskPool::new(SHELL_BACKGROUND_TASKS);
        let errors = parts.channel.errors();
        tasks.execute("channel-error-sink", async move {
            let report = diagnostics::observe_errors(errors).await;
            log::debug!("Channel error stream ended: {report:?}");
        });
        let starting = parts.channel.starting();
        tasks.execute("channel-start-sink", async move {
            let report = diagnostics::observe_start_results(starting).await;
            log::debug!("Channel start stream ended: {report:?}");
        });

        let navigator = Arc::new(RootNavigator::new(Page::Splash));
        let orchestrator = StartupOrchestrator::new(StartupCollaborators {
            platform: parts.platform,
            chrome: parts.chrome,
            settings: parts.settings.clone(),
            translator: parts.translator,
            channel: parts.channel,
            navigator: navigator.clone(),
        });

        Self {
            orchestrator,
            http: Arc::new(http),
            navigator,
            connection,
            settings: parts.settings,
            tasks,
        }
    }

    /// Runs the startup sequence; see [`StartupOrchestrator::initialize`].
    pub async fn initialize(&self) -> Result<(), StartupError> {
        self.orchestrator.initialize().await
    }

    /// Display labels of the channel's connection state. Available once.
    pub fn take_connection_labels(&self) -> Option<BoxStream<'static, String>> {
        self.connection.take_labels()
    }

    pub fn startup_phase(&self) -> watch::Receiver<StartupPhase> {
        self.orchestrator.subscribe()
    }

    pub fn root_page(&self) -> watch::Receiver<Page> {
        self.navigator.subscribe()
    }

    pub fn current_root(&self) -> Page {
        self.navigator.root()
    }

    pub fn menu(&self) -> &'static [MenuEntry] {
        navigation::menu()
    }

    pub fn open_page(&self, entry: &MenuEntry) {
        self.navigator.open_page(entry);
    }

    pub fn http(&self) -> Arc<HttpPipeline> {
        self.http.clone()
    }

    pub fn settings(&self) -> Arc<dyn SettingsStore> {
        self.settings.clone()
    }

    /// Number of diagnostic sinks still observing their streams.
    pub fn active_sinks(&self) -> usize {
        self.tasks.running()
    }
}

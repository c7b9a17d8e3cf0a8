use super::{ChannelError, ChannelProvider, ConnectionState, StreamEvent};
use crate::consts::CHANNEL_EVENT_CAPACITY;
use futures::stream::{self, BoxStream};
use futures_util::StreamExt;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;
use tokio::sync::broadcast;
use tokio::sync::broadcast::error::RecvError;

struct ChannelInner {
    state_tx: broadcast::Sender<ConnectionState>,
    error_tx: broadcast::Sender<StreamEvent<ChannelError>>,
    start_tx: broadcast::Sender<StreamEvent<()>>,
    current: Mutex<ConnectionState>,
    pending_start_failure: Mutex<Option<String>>,
    started: AtomicBool,
    connect_delay: Duration,
}

impl ChannelInner {
    fn set_state(&self, state: ConnectionState) {
        if let Ok(mut current) = self.current.lock() {
            *current = state;
        }
        log::debug!("Channel state -> {state}");
        let _ = self.state_tx.send(state);
    }

    fn take_start_failure(&self) -> Option<String> {
        self.pending_start_failure
            .lock()
            .ok()
            .and_then(|mut pending| pending.take())
    }

    async fn connect(&self) {
        self.set_state(ConnectionState::Connecting);
        tokio::time::sleep(self.connect_delay).await;

        match self.take_start_failure() {
            Some(reason) => {
                self.started.store(false, Ordering::SeqCst);
                self.set_state(ConnectionState::Disconnected);
                let _ = self
                    .start_tx
                    .send(StreamEvent::Failure(ChannelError::StartFailed(reason)));
            }
            None => {
                self.set_state(ConnectionState::Connected);
                let _ = self.start_tx.send(StreamEvent::Value(()));
            }
        }
    }
}

/// Channel provider living inside the application process.
///
/// Backs every stream with a broadcast channel. `start` runs a connect
/// sequence (`Connecting`, a configurable delay, then `Connected`) on the
/// current tokio runtime. Hosts and tests drive further transitions through
/// [`set_state`](Self::set_state), [`report_error`](Self::report_error) and
/// friends.
#[derive(Clone)]
pub struct InProcessChannel {
    inner: Arc<ChannelInner>,
}

impl InProcessChannel {
    pub fn new(connect_delay: Duration) -> Self {
        let (state_tx, _) = broadcast::channel(CHANNEL_EVENT_CAPACITY);
        let (error_tx, _) = broadcast::channel(CHANNEL_EVENT_CAPACITY);
        let (start_tx, _) = broadcast::channel(CHANNEL_EVENT_CAPACITY);

        Self {
            inner: Arc::new(ChannelInner {
                state_tx,
                error_tx,
                start_tx,
                current: Mutex::new(ConnectionState::Disconnected),
                pending_start_failure: Mutex::new(None),
                started: AtomicBool::new(false),
                connect_delay,
            }),
        }
    }

    /// Current connection state.
    pub fn state(&self) -> ConnectionState {
        self.inner
            .current
            .lock()
            .map(|state| *state)
            .unwrap_or(ConnectionState::Disconnected)
    }

    pub fn is_started(&self) -> bool {
        self.inner.started.load(Ordering::SeqCst)
    }

    /// Emits a state transition. Repeated states are emitted again.
    pub fn set_state(&self, state: ConnectionState) {
        self.inner.set_state(state);
    }

    /// Reports a runtime error as an ordinary stream value.
    pub fn report_error(&self, error: ChannelError) {
        let _ = self.inner.error_tx.send(StreamEvent::Value(error));
    }

    /// Fails the error stream itself; subscribers see no further events.
    pub fn fail_errors(&self, error: ChannelError) {
        let _ = self.inner.error_tx.send(StreamEvent::Failure(error));
    }

    /// Makes the next `start` call end with a start failure.
    pub fn fail_next_start(&self, reason: impl Into<String>) {
        if let Ok(mut pending) = self.inner.pending_start_failure.lock() {
            *pending = Some(reason.into());
        }
    }
}

impl Default for InProcessChannel {
    fn default() -> Self {
        Self::new(Duration::ZERO)
    }
}

impl ChannelProvider for InProcessChannel {
    fn connection_state(&self) -> BoxStream<'static, ConnectionState> {
        receiver_stream(self.inner.state_tx.subscribe(), "connection state", |_| false)
    }

    fn errors(&self) -> BoxStream<'static, StreamEvent<ChannelError>> {
        receiver_stream(self.inner.error_tx.subscribe(), "errors", |event| {
            event.is_failure()
        })
    }

    fn starting(&self) -> BoxStream<'static, StreamEvent<()>> {
        receiver_stream(self.inner.start_tx.subscribe(), "starting", |event| {
            event.is_failure()
        })
    }

    fn start(&self) {
        if self.inner.started.swap(true, Ordering::SeqCst) {
            log::warn!("Channel start requested while already started; ignoring");
            return;
        }

        match tokio::runtime::Handle::try_current() {
            Ok(handle) => {
                let inner = self.inner.clone();
                handle.spawn(async move { inner.connect().await });
            }
            Err(e) => {
                self.inner.started.store(false, Ordering::SeqCst);
                let _ = self
                    .inner
                    .start_tx
                    .send(StreamEvent::Failure(ChannelError::StartFailed(format!(
                        "no async runtime available: {e}"
                    ))));
            }
        }
    }
}

/// Turns a broadcast receiver into a stream that ends when the sender is
/// gone or right after an event for which `is_terminal` holds.
fn receiver_stream<T>(
    rx: broadcast::Receiver<T>,
    name: &'static str,
    is_terminal: fn(&T) -> bool,
) -> BoxStream<'static, T>
where
    T: Clone + Send + 'static,
{
    stream::unfold(Some(rx), move |state| async move {
        let Some(mut rx) = state else {
            return None;
        };
        loop {
            match rx.recv().await {
                Ok(item) => {
                    let next = if is_terminal(&item) { None } else { Some(rx) };
                    return Some((item, next));
                }
                Err(RecvError::Lagged(skipped)) => {
                    log::warn!("Channel {name} stream lagged, {skipped} events dropped");
                }
                Err(RecvError::Closed) => return None,
            }
        }
    })
    .boxed()
}

//! Diagnostic sinks.
//!
//! Passive subscribers that log the channel's error and start-result streams.
//! They only log; nothing they observe reaches the caller.

use crate::channel::{ChannelError, StreamEvent};
use futures::Stream;
use futures_util::StreamExt;
use log::Level;

/// Counts of events a sink observed before its stream ended.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct SinkReport {
    pub values: usize,
    pub failures: usize,
}

impl SinkReport {
    fn record<T, E>(&mut self, event: &StreamEvent<T, E>) {
        match event {
            StreamEvent::Value(_) => self.values += 1,
            StreamEvent::Failure(_) => self.failures += 1,
        }
    }
}

/// Log level for an event on the error stream: errors emitted as ordinary
/// values are warnings, a failure of the stream itself is an error.
pub fn error_severity<T>(event: &StreamEvent<T>) -> Level {
    match event {
        StreamEvent::Value(_) => Level::Warn,
        StreamEvent::Failure(_) => Level::Error,
    }
}

/// Log level for an event on the start-result stream.
pub fn start_severity(event: &StreamEvent<()>) -> Level {
    match event {
        StreamEvent::Value(()) => Level::Info,
        StreamEvent::Failure(_) => Level::Warn,
    }
}

/// Logs every event of the channel's error stream until it ends.
pub async fn observe_errors<S>(errors: S) -> SinkReport
where
    S: Stream<Item = StreamEvent<ChannelError>>,
{
    let mut report = SinkReport::default();
    let mut errors = std::pin::pin!(errors);

    while let Some(event) = errors.next().await {
        report.record(&event);
        let level = error_severity(&event);
        match event {
            StreamEvent::Value(error) => log::log!(level, "Channel error: {error}"),
            StreamEvent::Failure(error) => log::log!(level, "Channel error stream failed: {error}"),
        }
    }

    report
}

/// Logs the outcome of every channel start until the stream ends.
pub async fn observe_start_results<S>(starting: S) -> SinkReport
where
    S: Stream<Item = StreamEvent<()>>,
{
    let mut report = SinkReport::default();
    let mut starting = std::pin::pin!(starting);

    while let Some(event) = starting.next().await {
        report.record(&event);
        let level = start_severity(&event);
        match event {
            StreamEvent::Value(()) => log::log!(level, "Real-time channel has been started"),
            StreamEvent::Failure(error) => {
                log::log!(level, "Real-time channel failed to start: {error}")
            }
        }
    }

    report
}

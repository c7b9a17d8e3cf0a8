//! Real-time channel provider contract.
//!
//! A channel provider owns the long-lived real-time connection and exposes
//! three independent event streams plus a `start` action. The shell never
//! drives the connection itself; it only starts it once and observes it.

pub mod errors;
pub mod in_process;

pub use errors::ChannelError;
pub use in_process::InProcessChannel;

use futures::stream::BoxStream;
use std::fmt;

/// Status of the real-time link.
///
/// Exactly one state is current at any time; transitions are delivered as a
/// stream of discrete events.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ConnectionState {
    Connecting,
    Connected,
    Reconnecting,
    Disconnected,
}

impl ConnectionState {
    /// Canonical display label, identical to the variant name.
    pub fn label(self) -> &'static str {
        match self {
            ConnectionState::Connecting => "Connecting",
            ConnectionState::Connected => "Connected",
            ConnectionState::Reconnecting => "Reconnecting",
            ConnectionState::Disconnected => "Disconnected",
        }
    }
}

impl fmt::Display for ConnectionState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// A single notification on a channel stream.
///
/// Providers signal both ordinary values and stream-level failures through
/// the same stream; consumers pattern-match on the tag. A `Failure` is the
/// last event a stream delivers.
#[derive(Clone, Debug, PartialEq)]
pub enum StreamEvent<T, E = ChannelError> {
    Value(T),
    Failure(E),
}

impl<T, E> StreamEvent<T, E> {
    pub fn is_failure(&self) -> bool {
        matches!(self, StreamEvent::Failure(_))
    }
}

/// Provider of the application's real-time channel.
///
/// Streams only deliver events emitted after the call that created them, so
/// consumers must subscribe before calling [`start`](ChannelProvider::start).
pub trait ChannelProvider: Send + Sync {
    /// Connection state transitions.
    fn connection_state(&self) -> BoxStream<'static, ConnectionState>;

    /// Runtime errors reported by the channel.
    fn errors(&self) -> BoxStream<'static, StreamEvent<ChannelError>>;

    /// Outcome of [`start`](ChannelProvider::start): a `Value` when the
    /// channel started, a `Failure` when it could not.
    fn starting(&self) -> BoxStream<'static, StreamEvent<()>>;

    /// Starts the connection without waiting for it to be established.
    fn start(&self);
}

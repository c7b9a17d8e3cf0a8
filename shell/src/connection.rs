//! Connection state adapter.
//!
//! Keeps the provider's [`ConnectionState`] enumeration out of UI bindings:
//! the UI consumes plain display labels instead.

use crate::channel::{ChannelProvider, ConnectionState};
use futures::Stream;
use futures::stream::BoxStream;
use futures_util::StreamExt;
use std::sync::Mutex;

/// Maps every upstream state to its label, one for one and in order.
pub fn label_stream<S>(upstream: S) -> BoxStream<'static, String>
where
    S: Stream<Item = ConnectionState> + Send + 'static,
{
    upstream.map(|state| state.label().to_string()).boxed()
}

/// Republishes a provider's connection states as display labels.
///
/// The adapter subscribes to the provider exactly once, at construction.
/// The resulting label stream is lazy, lives as long as the provider's
/// stream, and can be taken only once: there is no way to restart it.
pub struct ConnectionStateAdapter {
    labels: Mutex<Option<BoxStream<'static, String>>>,
}

impl ConnectionStateAdapter {
    pub fn subscribe(provider: &dyn ChannelProvider) -> Self {
        Self {
            labels: Mutex::new(Some(label_stream(provider.connection_state()))),
        }
    }

    /// Hands out the label stream; `None` once it has been taken.
    pub fn take_labels(&self) -> Option<BoxStream<'static, String>> {
        match self.labels.lock() {
            Ok(mut labels) => labels.take(),
            Err(poisoned) => poisoned.into_inner().take(),
        }
    }
}

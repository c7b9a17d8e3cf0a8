use thiserror::Error;

/// Errors reported by a real-time channel provider.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ChannelError {
    #[error("Channel failed to start: {0}")]
    StartFailed(String),

    #[error("Channel transport error: {0}")]
    Transport(String),

    #[error("Channel closed: {0}")]
    Closed(String),
}

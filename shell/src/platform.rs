use async_trait::async_trait;
use tokio::sync::watch;

/// Gate that resolves once the host platform and its plugins are usable.
#[async_trait]
pub trait Platform: Send + Sync {
    /// Completes when the platform is ready. May never complete.
    async fn ready(&self);
}

/// Native window chrome adjusted once the platform is ready.
pub trait NativeChrome: Send + Sync {
    fn style_default_status_bar(&self);

    fn hide_splash(&self);
}

/// [`Platform`] implementation opened explicitly by the host.
pub struct ReadinessGate {
    ready_tx: watch::Sender<bool>,
}

impl ReadinessGate {
    pub fn new() -> Self {
        let (ready_tx, _) = watch::channel(false);
        Self { ready_tx }
    }

    pub fn mark_ready(&self) {
        self.ready_tx.send_replace(true);
    }

    pub fn is_ready(&self) -> bool {
        *self.ready_tx.borrow()
    }
}

impl Default for ReadinessGate {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl Platform for ReadinessGate {
    async fn ready(&self) {
        let mut rx = self.ready_tx.subscribe();
        // The sender lives in `self`, so waiting can only end by readiness.
        let _ = rx.wait_for(|ready| *ready).await;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;
    use std::time::Duration;

    #[tokio::test]
    async fn test_ready_waits_until_marked() {
        let gate = Arc::new(ReadinessGate::new());

        let pending = tokio::time::timeout(Duration::from_millis(20), gate.ready()).await;
        assert!(pending.is_err());

        gate.mark_ready();
        let resolved = tokio::time::timeout(Duration::from_millis(200), gate.ready()).await;
        assert!(resolved.is_ok());
        assert!(gate.is_ready());
    }
}

//! The transport seam and the handle for one open subscription.

use async_trait::async_trait;
use devradar_common::{RadarError, SubscriptionKey};
use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use tokio_util::sync::CancellationToken;
use tracing::warn;

use super::types::TransportEvent;

/// Opens realtime subscriptions.
#[async_trait]
pub trait FeedTransport: Send + Sync {
    /// Open a subscription scoped to `key`. The returned subscription is
    /// live until [`Subscription::close`] is called or it is dropped.
    async fn open(&self, key: &SubscriptionKey) -> Result<Subscription, RadarError>;
}

/// One open subscription: its event stream plus what is needed to stop it.
pub struct Subscription {
    events: mpsc::Receiver<TransportEvent>,
    cancel: CancellationToken,
    task: Option<JoinHandle<()>>,
}

impl Subscription {
    pub fn new(events: mpsc::Receiver<TransportEvent>, cancel: CancellationToken) -> Self {
        Self {
            events,
            cancel,
            task: None,
        }
    }

    /// Attach the background task driving this subscription; `close` joins it.
    pub fn with_task(mut self, task: JoinHandle<()>) -> Self {
        self.task = Some(task);
        self
    }

    /// Next event, or `None` once the transport has stopped.
    pub async fn recv(&mut self) -> Option<TransportEvent> {
        self.events.recv().await
    }

    /// Stop the subscription and wait until its task has exited.
    pub async fn close(mut self) {
        self.cancel.cancel();
        self.events.close();
        if let Some(task) = self.task.take() {
            if let Err(e) = task.await {
                if !e.is_cancelled() {
                    warn!(error = %e, "Subscription task failed during teardown");
                }
            }
        }
    }
}

impl Drop for Subscription {
    fn drop(&mut self) {
        self.cancel.cancel();
    }
}

impl std::fmt::Debug for Subscription {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Subscription")
            .field("cancelled", &self.cancel.is_cancelled())
            .field("has_task", &self.task.is_some())
            .finish()
    }
}

//! In-memory fakes for the transport and search seams.

use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use devradar_common::{
    Coordinates, FilterTags, PresenceRecord, RadarError, Region, SubscriptionKey,
};
use tokio::sync::{mpsc, oneshot};
use tokio_util::sync::CancellationToken;

use crate::realtime::{FeedTransport, Subscription, TransportEvent};
use crate::search::SearchGateway;

pub(crate) fn record(id: &str, latitude: f64, longitude: f64) -> PresenceRecord {
    PresenceRecord {
        id: id.to_string(),
        github_username: format!("{id}-gh"),
        display_name: id.to_uppercase(),
        bio: None,
        avatar_url: format!("https://example.com/{id}.png"),
        tags: vec!["node".to_string()],
        coordinates: Coordinates {
            latitude,
            longitude,
        },
    }
}

pub(crate) fn region() -> Region {
    Region::new(-23.55, -46.63, 0.04, 0.04).unwrap()
}

pub(crate) fn key(tags: &str) -> SubscriptionKey {
    SubscriptionKey::new(region(), FilterTags::parse(tags))
}

// ---------------------------------------------------------------------------
// Transport
// ---------------------------------------------------------------------------

/// Test-side handle to one opened in-memory subscription.
#[derive(Clone)]
pub(crate) struct MemoryHandle {
    pub(crate) key: SubscriptionKey,
    sender: Arc<Mutex<Option<mpsc::Sender<TransportEvent>>>>,
    cancel: CancellationToken,
}

impl MemoryHandle {
    fn sender(&self) -> Option<mpsc::Sender<TransportEvent>> {
        self.sender.lock().unwrap().clone()
    }

    pub(crate) async fn send(&self, event: TransportEvent) {
        if let Some(sender) = self.sender() {
            let _ = sender.send(event).await;
        }
    }

    /// Returns whether the subscription could still receive the event.
    pub(crate) fn try_send(&self, event: TransportEvent) -> bool {
        self.sender()
            .map(|sender| sender.try_send(event).is_ok())
            .unwrap_or(false)
    }

    /// Simulate the transport task exiting.
    pub(crate) fn finish(&self) {
        self.sender.lock().unwrap().take();
    }

    pub(crate) fn is_closed(&self) -> bool {
        self.cancel.is_cancelled()
    }
}

#[derive(Default)]
struct MemoryInner {
    handles: Vec<MemoryHandle>,
    max_concurrent: usize,
    fail_next: Option<RadarError>,
}

/// Transport that hands out channel-backed subscriptions and records them.
#[derive(Clone, Default)]
pub(crate) struct MemoryTransport {
    inner: Arc<Mutex<MemoryInner>>,
}

impl MemoryTransport {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    pub(crate) fn into_dyn(self) -> Arc<dyn FeedTransport> {
        Arc::new(self)
    }

    pub(crate) fn latest(&self) -> MemoryHandle {
        self.inner
            .lock()
            .unwrap()
            .handles
            .last()
            .cloned()
            .expect("no subscription opened")
    }

    pub(crate) fn handles(&self) -> Vec<MemoryHandle> {
        self.inner.lock().unwrap().handles.clone()
    }

    pub(crate) fn opened_count(&self) -> usize {
        self.inner.lock().unwrap().handles.len()
    }

    pub(crate) fn active_count(&self) -> usize {
        self.inner
            .lock()
            .unwrap()
            .handles
            .iter()
            .filter(|h| !h.is_closed())
            .count()
    }

    pub(crate) fn max_concurrent(&self) -> usize {
        self.inner.lock().unwrap().max_concurrent
    }

    pub(crate) fn fail_next_open(&self, error: RadarError) {
        self.inner.lock().unwrap().fail_next = Some(error);
    }
}

#[async_trait]
impl FeedTransport for MemoryTransport {
    async fn open(&self, key: &SubscriptionKey) -> Result<Subscription, RadarError> {
        let mut inner = self.inner.lock().unwrap();
        if let Some(error) = inner.fail_next.take() {
            return Err(error);
        }
        let (tx, rx) = mpsc::channel(64);
        let cancel = CancellationToken::new();
        inner.handles.push(MemoryHandle {
            key: key.clone(),
            sender: Arc::new(Mutex::new(Some(tx))),
            cancel: cancel.clone(),
        });
        let active = inner.handles.iter().filter(|h| !h.is_closed()).count();
        inner.max_concurrent = inner.max_concurrent.max(active);
        Ok(Subscription::new(rx, cancel))
    }
}

// ---------------------------------------------------------------------------
// Search
// ---------------------------------------------------------------------------

/// A search the test has not answered yet.
pub(crate) struct PendingSearch {
    pub(crate) key: SubscriptionKey,
    reply: oneshot::Sender<Result<Vec<PresenceRecord>, RadarError>>,
}

impl PendingSearch {
    pub(crate) fn respond(self, result: Result<Vec<PresenceRecord>, RadarError>) {
        let _ = self.reply.send(result);
    }
}

/// Search gateway whose responses are supplied by the test, in any order.
pub(crate) struct ScriptedSearch {
    requests: mpsc::UnboundedSender<PendingSearch>,
}

impl ScriptedSearch {
    pub(crate) fn new() -> (Arc<dyn SearchGateway>, mpsc::UnboundedReceiver<PendingSearch>) {
        let (requests, rx) = mpsc::unbounded_channel();
        (Arc::new(Self { requests }), rx)
    }
}

#[async_trait]
impl SearchGateway for ScriptedSearch {
    async fn search(
        &self,
        region: &Region,
        tags: &FilterTags,
    ) -> Result<Vec<PresenceRecord>, RadarError> {
        let (reply, response) = oneshot::channel();
        let pending = PendingSearch {
            key: SubscriptionKey::new(*region, tags.clone()),
            reply,
        };
        if self.requests.send(pending).is_err() {
            return Err(RadarError::Network("search script dropped".into()));
        }
        response
            .await
            .unwrap_or_else(|_| Err(RadarError::Network("search script dropped".into())))
    }
}

//! The presence feed state machine.

use std::sync::Arc;

use devradar_common::{RadarError, SubscriptionKey};
use tracing::{debug, info, warn};

use crate::realtime::{FeedTransport, Subscription, TransportEvent};

use super::set::PresenceSet;
use super::types::{FeedEvent, FeedStatus, FeedUpdate};

struct ActiveSubscription {
    generation: u64,
    key: SubscriptionKey,
    status: FeedStatus,
    subscription: Subscription,
}

/// Presence feed client: `Disconnected → Connecting → Subscribed`.
///
/// Holds at most one subscription. [`connect`](Self::connect) tears the
/// current one down completely before opening the next, and every event is
/// stamped with its subscription's generation so nothing from a replaced
/// subscription can be merged.
pub struct PresenceFeed {
    transport: Arc<dyn FeedTransport>,
    active: Option<ActiveSubscription>,
    generation: u64,
}

impl PresenceFeed {
    pub fn new(transport: Arc<dyn FeedTransport>) -> Self {
        Self {
            transport,
            active: None,
            generation: 0,
        }
    }

    pub fn status(&self) -> FeedStatus {
        self.active
            .as_ref()
            .map_or(FeedStatus::Disconnected, |active| active.status)
    }

    /// Key of the current subscription, if any.
    pub fn key(&self) -> Option<&SubscriptionKey> {
        self.active.as_ref().map(|active| &active.key)
    }

    /// Generation of the current subscription, if any.
    pub fn generation(&self) -> Option<u64> {
        self.active.as_ref().map(|active| active.generation)
    }

    /// Replace the current subscription with one scoped to `key`.
    ///
    /// Returns the new subscription's generation. On failure the feed is
    /// left `Disconnected`.
    pub async fn connect(&mut self, key: SubscriptionKey) -> Result<u64, RadarError> {
        self.teardown().await;

        self.generation += 1;
        let generation = self.generation;
        info!(generation, region = %key.region, techs = %key.tags, "Opening presence subscription");

        let subscription = self.transport.open(&key).await?;
        self.active = Some(ActiveSubscription {
            generation,
            key,
            status: FeedStatus::Connecting,
            subscription,
        });
        Ok(generation)
    }

    /// Tear down the current subscription. Idempotent; returns whether
    /// anything was torn down.
    pub async fn disconnect(&mut self) -> bool {
        self.teardown().await
    }

    async fn teardown(&mut self) -> bool {
        let Some(active) = self.active.take() else {
            return false;
        };
        debug!(generation = active.generation, "Tearing down presence subscription");
        active.subscription.close().await;
        true
    }

    /// Wait for the next event of the current subscription.
    ///
    /// Pending forever while disconnected, so it can sit in a `select!`.
    /// Cancel safe.
    pub async fn next_event(&mut self) -> FeedEvent {
        match self.active.as_mut() {
            Some(active) => {
                let event = active.subscription.recv().await;
                FeedEvent {
                    generation: active.generation,
                    event,
                }
            }
            None => std::future::pending().await,
        }
    }

    /// Apply `event` to the feed state, merging presence into `records`.
    pub fn apply(&mut self, event: FeedEvent, records: &mut PresenceSet) -> FeedUpdate {
        let Some(active) = self
            .active
            .as_mut()
            .filter(|active| active.generation == event.generation)
        else {
            debug!(generation = event.generation, "Dropping event from replaced subscription");
            return FeedUpdate::Ignored;
        };

        match event.event {
            Some(TransportEvent::Connected) => {
                active.status = FeedStatus::Subscribed;
                info!(generation = active.generation, "Presence feed subscribed");
                FeedUpdate::Subscribed
            }
            Some(TransportEvent::Presence(record)) => {
                if active.status != FeedStatus::Subscribed {
                    debug!(id = %record.id, "Presence event before subscription confirmed");
                    return FeedUpdate::Ignored;
                }
                let id = record.id.clone();
                let upsert = records.upsert(record);
                debug!(id = %id, ?upsert, "Merged presence record");
                FeedUpdate::Merged { id, upsert }
            }
            Some(TransportEvent::Disconnected) => {
                active.status = FeedStatus::Connecting;
                warn!(generation = active.generation, "Presence feed lost, reconnecting");
                FeedUpdate::Reconnecting
            }
            Some(TransportEvent::Error(message)) => {
                warn!(message = %message, "Presence feed error");
                FeedUpdate::Error(message)
            }
            None => {
                info!(generation = active.generation, "Presence feed transport stopped");
                self.active = None;
                FeedUpdate::Closed
            }
        }
    }
}

//! State and event types for the presence feed.

use std::fmt;

use crate::realtime::TransportEvent;

use super::set::Upsert;

/// Lifecycle of the feed's single subscription.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FeedStatus {
    Disconnected,
    /// Opened; waiting for the transport to report the socket is up.
    Connecting,
    Subscribed,
}

impl fmt::Display for FeedStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            FeedStatus::Disconnected => "disconnected",
            FeedStatus::Connecting => "connecting",
            FeedStatus::Subscribed => "subscribed",
        })
    }
}

/// A transport event stamped with the generation of the subscription that
/// produced it.
#[derive(Debug, Clone, PartialEq)]
pub struct FeedEvent {
    pub generation: u64,
    /// `None` when the subscription's transport has stopped.
    pub event: Option<TransportEvent>,
}

/// What applying a [`FeedEvent`] did.
#[derive(Debug, Clone, PartialEq)]
pub enum FeedUpdate {
    Subscribed,
    Merged { id: String, upsert: Upsert },
    /// Socket lost; the transport is reconnecting.
    Reconnecting,
    /// The transport stopped; the feed is now disconnected.
    Closed,
    Error(String),
    /// Dropped: from an old subscription, or not subscribed yet.
    Ignored,
}

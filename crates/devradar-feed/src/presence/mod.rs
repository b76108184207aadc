//! Presence feed client.
//!
//! Owns at most one realtime subscription at a time, keyed by region and
//! filter tags, and merges the records it delivers into a [`PresenceSet`].
//! The transport itself is behind [`crate::realtime::FeedTransport`].

mod feed;
mod set;
mod types;

pub use feed::PresenceFeed;
pub use set::{PresenceSet, Upsert};
pub use types::{FeedEvent, FeedStatus, FeedUpdate};

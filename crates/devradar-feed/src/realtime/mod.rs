//! Realtime presence transport.
//!
//! A WebSocket client (`tokio-tungstenite`) that subscribes to presence
//! events for one region/tag key, sends heartbeats, and reconnects with
//! exponential backoff. The [`FeedTransport`] trait is the seam the
//! presence feed is written against.

mod client;
mod connection;
mod handler;
mod transport;
mod types;

pub use client::RealtimeClient;
pub use transport::{FeedTransport, Subscription};
pub use types::{RealtimeConfig, TransportEvent};

//! Realtime presence feed configuration.

use serde::{Deserialize, Serialize};

/// WebSocket presence feed settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct RealtimeSection {
    /// WebSocket endpoint; region and tags are appended as query parameters.
    pub url: String,
    /// Heartbeat interval in seconds.
    pub heartbeat_interval: u64,
    /// Reconnect delay (base) in seconds.
    pub reconnect_delay: u64,
    /// Maximum reconnect delay in seconds.
    pub max_reconnect_delay: u64,
    /// Handshake timeout in seconds.
    pub connect_timeout: u64,
}

impl Default for RealtimeSection {
    fn default() -> Self {
        Self {
            url: "ws://localhost:3333/realtime".into(),
            heartbeat_interval: 25,
            reconnect_delay: 1,
            max_reconnect_delay: 30,
            connect_timeout: 15,
        }
    }
}

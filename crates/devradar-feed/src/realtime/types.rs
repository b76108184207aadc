//! Configuration and event types for the realtime transport.

use devradar_common::{ConfigError, PresenceRecord, RadarError, SubscriptionKey};
use reqwest::Url;

// ---------------------------------------------------------------------------
// Configuration
// ---------------------------------------------------------------------------

/// Configuration for the realtime presence socket.
#[derive(Debug, Clone)]
pub struct RealtimeConfig {
    /// WebSocket endpoint, e.g. `wss://radar.example.com/realtime`.
    pub url: String,
    /// Heartbeat interval in seconds (default: 25).
    pub heartbeat_interval_secs: u64,
    /// Reconnect base delay in seconds.
    pub reconnect_delay_secs: u64,
    /// Maximum reconnect delay in seconds.
    pub max_reconnect_delay_secs: u64,
    /// Handshake timeout in seconds.
    pub connect_timeout_secs: u64,
}

impl Default for RealtimeConfig {
    fn default() -> Self {
        Self {
            url: "ws://localhost:3333/realtime".to_string(),
            heartbeat_interval_secs: 25,
            reconnect_delay_secs: 1,
            max_reconnect_delay_secs: 30,
            connect_timeout_secs: 15,
        }
    }
}

impl RealtimeConfig {
    /// Socket URL scoped to `key`: `?latitude=..&longitude=..&techs=..`.
    pub(crate) fn subscription_url(&self, key: &SubscriptionKey) -> Result<Url, RadarError> {
        let mut url = Url::parse(&self.url).map_err(|e| {
            ConfigError::ValidationError(format!("realtime url {:?}: {e}", self.url))
        })?;
        url.query_pairs_mut()
            .append_pair("latitude", &key.region.latitude().to_string())
            .append_pair("longitude", &key.region.longitude().to_string())
            .append_pair("techs", &key.tags.to_query());
        Ok(url)
    }
}

// ---------------------------------------------------------------------------
// Events
// ---------------------------------------------------------------------------

/// Events emitted by a transport for one subscription.
#[derive(Debug, Clone, PartialEq)]
pub enum TransportEvent {
    /// Socket established (first connect or after a reconnect).
    Connected,
    /// A developer matching the subscription appeared or changed.
    Presence(PresenceRecord),
    /// Socket lost; the transport is reconnecting.
    Disconnected,
    /// Connection or protocol failure. Not terminal.
    Error(String),
}

#[cfg(test)]
mod tests {
    use super::*;
    use devradar_common::{FilterTags, Region};

    #[test]
    fn subscription_url_carries_region_and_tags() {
        let config = RealtimeConfig::default();
        let key = SubscriptionKey::new(
            Region::new(-23.5, -46.25, 0.04, 0.04).unwrap(),
            FilterTags::parse("node, go"),
        );
        let url = config.subscription_url(&key).unwrap();
        let pairs: Vec<(String, String)> = url
            .query_pairs()
            .map(|(k, v)| (k.into_owned(), v.into_owned()))
            .collect();
        assert_eq!(
            pairs,
            vec![
                ("latitude".to_string(), "-23.5".to_string()),
                ("longitude".to_string(), "-46.25".to_string()),
                ("techs".to_string(), "go,node".to_string()),
            ]
        );
        assert_eq!(url.path(), "/realtime");
    }

    #[test]
    fn unparseable_url_is_config_error() {
        let config = RealtimeConfig {
            url: "not a url".into(),
            ..RealtimeConfig::default()
        };
        let key = SubscriptionKey::new(
            Region::new(0.0, 0.0, 0.04, 0.04).unwrap(),
            FilterTags::default(),
        );
        assert!(matches!(
            config.subscription_url(&key),
            Err(RadarError::Config(_))
        ));
    }
}

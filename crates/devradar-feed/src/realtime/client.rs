//! WebSocket implementation of [`FeedTransport`].

use async_trait::async_trait;
use devradar_common::{new_correlation_id, RadarError, SubscriptionKey};
use tokio::sync::mpsc;
use tokio_util::sync::CancellationToken;
use tracing::{info_span, Instrument};

use super::connection::connection_loop;
use super::transport::{FeedTransport, Subscription};
use super::types::RealtimeConfig;

/// Opens one WebSocket per subscription against the realtime endpoint.
#[derive(Debug, Clone)]
pub struct RealtimeClient {
    config: RealtimeConfig,
}

impl RealtimeClient {
    pub fn new(config: RealtimeConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &RealtimeConfig {
        &self.config
    }
}

#[async_trait]
impl FeedTransport for RealtimeClient {
    async fn open(&self, key: &SubscriptionKey) -> Result<Subscription, RadarError> {
        let url = self.config.subscription_url(key)?;
        let (event_tx, event_rx) = mpsc::channel(256);
        let cancel = CancellationToken::new();

        let span = info_span!("presence_feed", cid = %new_correlation_id(), techs = %key.tags);
        let task = tokio::spawn(
            connection_loop(self.config.clone(), url, event_tx, cancel.clone()).instrument(span),
        );

        Ok(Subscription::new(event_rx, cancel).with_task(task))
    }
}

//! reqwest implementation of [`SearchGateway`].

use std::time::Duration;

use async_trait::async_trait;
use devradar_common::{ConfigError, FilterTags, PresenceRecord, RadarError, Region};
use reqwest::Url;
use tracing::debug;

use crate::protocol::SearchResponse;

use super::gateway::SearchGateway;

/// Settings for [`HttpSearchGateway`].
#[derive(Debug, Clone)]
pub struct SearchGatewayConfig {
    /// Base URL of the API; `/search` is appended.
    pub base_url: String,
    pub timeout: Duration,
    pub connect_timeout: Duration,
}

impl Default for SearchGatewayConfig {
    fn default() -> Self {
        Self {
            base_url: "http://localhost:3333".to_string(),
            timeout: Duration::from_secs(10),
            connect_timeout: Duration::from_secs(5),
        }
    }
}

/// `GET {base_url}/search?latitude=..&longitude=..&techs=..`.
#[derive(Debug, Clone)]
pub struct HttpSearchGateway {
    http: reqwest::Client,
    search_url: Url,
}

impl HttpSearchGateway {
    pub fn new(config: SearchGatewayConfig) -> Result<Self, RadarError> {
        let base = config.base_url.trim_end_matches('/');
        let search_url = Url::parse(&format!("{base}/search")).map_err(|e| {
            ConfigError::ValidationError(format!("search base_url {:?}: {e}", config.base_url))
        })?;
        let http = reqwest::Client::builder()
            .connect_timeout(config.connect_timeout)
            .timeout(config.timeout)
            .build()
            .map_err(|e| RadarError::Network(format!("failed to build HTTP client: {e}")))?;
        Ok(Self { http, search_url })
    }

    pub fn search_url(&self) -> &Url {
        &self.search_url
    }
}

fn map_reqwest_error(e: reqwest::Error) -> RadarError {
    if e.is_timeout() {
        RadarError::Timeout
    } else if e.is_decode() {
        RadarError::Protocol(e.to_string())
    } else {
        RadarError::Network(e.to_string())
    }
}

#[async_trait]
impl SearchGateway for HttpSearchGateway {
    async fn search(
        &self,
        region: &Region,
        tags: &FilterTags,
    ) -> Result<Vec<PresenceRecord>, RadarError> {
        debug!(region = %region, techs = %tags, "Search request");

        let response = self
            .http
            .get(self.search_url.clone())
            .query(&[
                ("latitude", region.latitude().to_string()),
                ("longitude", region.longitude().to_string()),
                ("techs", tags.to_query()),
            ])
            .send()
            .await
            .map_err(map_reqwest_error)?;

        let status = response.status();
        if !status.is_success() {
            let text = response.text().await.unwrap_or_default();
            let text = text.chars().take(200).collect::<String>();
            return Err(RadarError::Network(format!("HTTP {status}: {text}")));
        }

        let body: SearchResponse = response.json().await.map_err(map_reqwest_error)?;
        let records = body.into_records()?;
        debug!(count = records.len(), "Search response");
        Ok(records)
    }
}

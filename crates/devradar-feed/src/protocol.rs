//! Wire types for the search endpoint and the realtime feed.
//!
//! Developers are serialized the way the backend stores them: Mongo-style
//! `_id` and a GeoJSON point whose coordinates are `[longitude, latitude]`.

use devradar_common::{Coordinates, PresenceRecord, RadarError};
use serde::{Deserialize, Serialize};

// ---------------------------------------------------------------------------
// Realtime event names
// ---------------------------------------------------------------------------

/// Event names carried in [`FeedMessage::event`].
pub mod events {
    /// Server → client: a developer matching the subscription appeared or changed.
    pub const NEW_DEV: &str = "new-dev";
    /// Client → server keepalive.
    pub const HEARTBEAT: &str = "heartbeat";
}

/// Envelope for every realtime message in either direction.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FeedMessage {
    pub event: String,
    #[serde(default)]
    pub payload: serde_json::Value,
}

impl FeedMessage {
    pub fn heartbeat() -> Self {
        Self {
            event: events::HEARTBEAT.to_string(),
            payload: serde_json::json!({}),
        }
    }
}

// ---------------------------------------------------------------------------
// Developer payloads
// ---------------------------------------------------------------------------

/// GeoJSON point.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GeoPoint {
    #[serde(rename = "type", default = "point_type")]
    pub kind: String,
    pub coordinates: Vec<f64>,
}

fn point_type() -> String {
    "Point".to_string()
}

/// A developer as sent by the backend.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DevPayload {
    #[serde(rename = "_id")]
    pub id: String,
    pub github_username: String,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub avatar_url: String,
    #[serde(default)]
    pub bio: Option<String>,
    #[serde(default)]
    pub techs: Vec<String>,
    pub location: GeoPoint,
}

impl TryFrom<DevPayload> for PresenceRecord {
    type Error = RadarError;

    fn try_from(dev: DevPayload) -> Result<Self, Self::Error> {
        let [longitude, latitude] = dev.location.coordinates[..] else {
            return Err(RadarError::Protocol(format!(
                "dev {} has {} coordinates, expected [longitude, latitude]",
                dev.id,
                dev.location.coordinates.len()
            )));
        };
        let coordinates = Coordinates::new(latitude, longitude)
            .map_err(|e| RadarError::Protocol(format!("dev {}: {e}", dev.id)))?;
        let display_name = dev
            .name
            .filter(|name| !name.trim().is_empty())
            .unwrap_or_else(|| dev.github_username.clone());

        Ok(PresenceRecord {
            id: dev.id,
            github_username: dev.github_username,
            display_name,
            bio: dev.bio,
            avatar_url: dev.avatar_url,
            tags: dev.techs,
            coordinates,
        })
    }
}

/// Body of `GET /search`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SearchResponse {
    #[serde(default)]
    pub devs: Vec<DevPayload>,
}

impl SearchResponse {
    /// Convert every developer, failing on the first malformed one.
    pub fn into_records(self) -> Result<Vec<PresenceRecord>, RadarError> {
        self.devs.into_iter().map(PresenceRecord::try_from).collect()
    }
}

use serde::{Deserialize, Serialize};

use super::geo::Coordinates;

/// A nearby developer as shown on the map. Identity is `id`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PresenceRecord {
    pub id: String,
    pub github_username: String,
    pub display_name: String,
    pub bio: Option<String>,
    pub avatar_url: String,
    pub tags: Vec<String>,
    pub coordinates: Coordinates,
}

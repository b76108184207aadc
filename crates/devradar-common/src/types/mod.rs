//! Domain types shared by the radar crates.

mod geo;
mod presence;
mod tags;

pub use geo::{Coordinates, Region, DEFAULT_REGION_DELTA};
pub use presence::PresenceRecord;
pub use tags::FilterTags;

use serde::{Deserialize, Serialize};

/// What a search or a realtime subscription is scoped to.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SubscriptionKey {
    pub region: Region,
    pub tags: FilterTags,
}

impl SubscriptionKey {
    pub fn new(region: Region, tags: FilterTags) -> Self {
        Self { region, tags }
    }
}

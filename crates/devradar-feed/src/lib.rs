pub mod location;
pub mod presence;
pub mod protocol;
pub mod radar;
pub mod realtime;
pub mod search;

#[cfg(test)]
mod testing;

pub use location::{
    Accuracy, FixedLocationProvider, LocationProvider, LocationTracker, Permission, TrackerConfig,
};
pub use presence::{FeedStatus, FeedUpdate, PresenceFeed, PresenceSet, Upsert};
pub use protocol::{DevPayload, FeedMessage, SearchResponse};
pub use radar::{Radar, RadarCommand, RadarHandle, RadarOptions, RadarSnapshot, RadarStatus};
pub use realtime::{FeedTransport, RealtimeClient, RealtimeConfig, Subscription, TransportEvent};
pub use search::{HttpSearchGateway, SearchGateway, SearchGatewayConfig};

pub mod errors;
pub mod id;
pub mod types;

pub use errors::{ConfigError, RadarError};
pub use id::{new_correlation_id, RequestCounter, RequestId};
pub use types::{Coordinates, FilterTags, PresenceRecord, Region, SubscriptionKey, DEFAULT_REGION_DELTA};

pub type Result<T> = std::result::Result<T, RadarError>;

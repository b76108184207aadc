use async_trait::async_trait;
use devradar_common::{FilterTags, PresenceRecord, RadarError, Region};

/// Issues one search for developers near `region` matching `tags`.
///
/// No retries: failures are returned to the caller as-is.
#[async_trait]
pub trait SearchGateway: Send + Sync {
    async fn search(
        &self,
        region: &Region,
        tags: &FilterTags,
    ) -> Result<Vec<PresenceRecord>, RadarError>;
}

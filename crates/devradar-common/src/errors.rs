use std::path::PathBuf;

use crate::id::RequestId;

#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ConfigError {
    #[error("config file not found: {0}")]
    FileNotFound(PathBuf),

    #[error("config parse error: {0}")]
    ParseError(String),

    #[error("config validation error: {0}")]
    ValidationError(String),
}

/// Errors surfaced by the radar core.
///
/// Kept `Clone` so the latest failure can ride along in published snapshots.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum RadarError {
    #[error("location permission denied")]
    PermissionDenied,

    #[error("location unavailable: {0}")]
    LocationUnavailable(String),

    #[error("network error: {0}")]
    Network(String),

    #[error("request timed out")]
    Timeout,

    /// A response to a superseded request. Dropped by the coordinator,
    /// never shown to the user.
    #[error("stale response for request {request} (latest is {latest})")]
    StaleResponse { request: RequestId, latest: RequestId },

    #[error("invalid region: {0}")]
    InvalidRegion(String),

    #[error("protocol error: {0}")]
    Protocol(String),

    #[error(transparent)]
    Config(#[from] ConfigError),
}

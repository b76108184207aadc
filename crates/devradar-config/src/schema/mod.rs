//! Configuration schema types for DevRadar.
//!
//! All structs use `serde(default)` so partial configs work correctly.

mod location;
mod logging;
mod realtime;
mod search;

pub use location::*;
pub use logging::*;
pub use realtime::*;
pub use search::*;

use serde::{Deserialize, Serialize};

/// Current config schema version.
pub const CONFIG_SCHEMA_VERSION: u32 = 1;

/// Root configuration for DevRadar.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct RadarConfig {
    pub search: SearchConfig,
    pub realtime: RealtimeSection,
    pub location: LocationConfig,
    pub logging: LoggingConfig,
}

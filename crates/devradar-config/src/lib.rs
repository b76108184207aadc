//! DevRadar configuration.
//!
//! TOML-based configuration with per-section defaults, so partial configs
//! work out of the box, plus validation of every numeric range and URL.
//!
//! # Quick Start
//!
//! ```rust,no_run
//! use devradar_config::{load_config, config_to_json};
//!
//! let config = load_config(None).expect("failed to load config");
//! let json = config_to_json(&config);
//! println!("{json}");
//! ```

pub mod schema;
pub mod toml_loader;
pub mod validation;

pub use schema::{
    LocationConfig, LoggingConfig, RadarConfig, RealtimeSection, SearchConfig,
    CONFIG_SCHEMA_VERSION,
};

use std::path::Path;

use devradar_common::ConfigError;

/// Load config from `path`, or from the platform default path when `None`.
///
/// The default path is created with a documented template if missing. An
/// explicit path that does not exist is an error.
pub fn load_config(path: Option<&Path>) -> Result<RadarConfig, ConfigError> {
    let config = match path {
        Some(path) => toml_loader::load_from_path(path)?,
        None => toml_loader::load_default()?,
    };
    validation::validate(&config)?;
    Ok(config)
}

/// Serialize a config to a pretty-printed JSON string.
pub fn config_to_json(config: &RadarConfig) -> String {
    serde_json::to_string_pretty(config)
        .unwrap_or_else(|e| format!("{{\"error\": \"failed to serialize config: {e}\"}}"))
}

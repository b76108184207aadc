//! Full configuration validation.
//!
//! Each section has its own check; this orchestrator calls them all and
//! collects errors into a single `ConfigError`.

mod helpers;


use crate::schema::RadarConfig;
use devradar_common::ConfigError;

use helpers::{validate_range, validate_range_f64, validate_url};

/// Run all validations on a config, collecting all errors.
pub fn validate(config: &RadarConfig) -> Result<(), ConfigError> {
    let mut errors: Vec<String> = Vec::new();

    validate_search(&mut errors, config);
    validate_realtime(&mut errors, config);
    validate_location(&mut errors, config);

    if config.logging.level.trim().is_empty() {
        errors.push("logging.level must not be empty".into());
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(ConfigError::ValidationError(errors.join("; ")))
    }
}

fn validate_search(errors: &mut Vec<String>, config: &RadarConfig) {
    validate_url(errors, "search.base_url", &config.search.base_url, &["http", "https"]);
    validate_range(errors, "search.timeout_secs", config.search.timeout_secs, 1, 300);
    validate_range(
        errors,
        "search.connect_timeout_secs",
        config.search.connect_timeout_secs,
        1,
        60,
    );
}

fn validate_realtime(errors: &mut Vec<String>, config: &RadarConfig) {
    let rt = &config.realtime;
    validate_url(errors, "realtime.url", &rt.url, &["ws", "wss"]);
    validate_range(errors, "realtime.heartbeat_interval", rt.heartbeat_interval, 1, 300);
    validate_range(errors, "realtime.reconnect_delay", rt.reconnect_delay, 1, 300);
    validate_range(errors, "realtime.max_reconnect_delay", rt.max_reconnect_delay, 1, 3600);
    validate_range(errors, "realtime.connect_timeout", rt.connect_timeout, 1, 120);
    if rt.reconnect_delay > rt.max_reconnect_delay {
        errors.push(format!(
            "realtime.reconnect_delay ({}) exceeds realtime.max_reconnect_delay ({})",
            rt.reconnect_delay, rt.max_reconnect_delay
        ));
    }
}

fn validate_location(errors: &mut Vec<String>, config: &RadarConfig) {
    let loc = &config.location;
    validate_range_f64(errors, "location.initial_delta", loc.initial_delta, 0.0001, 90.0);
    validate_range(errors, "location.debounce_ms", loc.debounce_ms, 0, 10_000);
    validate_range_f64(errors, "location.min_shift", loc.min_shift, 0.0, 1.0);
}

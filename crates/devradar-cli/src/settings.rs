//! Maps the loaded config onto the feed crate's settings.

use std::time::Duration;

use devradar_common::FilterTags;
use devradar_config::RadarConfig;
use devradar_feed::{Accuracy, RadarOptions, RealtimeConfig, SearchGatewayConfig, TrackerConfig};

pub fn search_gateway(config: &RadarConfig) -> SearchGatewayConfig {
    SearchGatewayConfig {
        base_url: config.search.base_url.clone(),
        timeout: Duration::from_secs(config.search.timeout_secs),
        connect_timeout: Duration::from_secs(config.search.connect_timeout_secs),
    }
}

pub fn realtime(config: &RadarConfig) -> RealtimeConfig {
    let section = &config.realtime;
    RealtimeConfig {
        url: section.url.clone(),
        heartbeat_interval_secs: section.heartbeat_interval,
        reconnect_delay_secs: section.reconnect_delay,
        max_reconnect_delay_secs: section.max_reconnect_delay,
        connect_timeout_secs: section.connect_timeout,
    }
}

pub fn radar_options(config: &RadarConfig, tags: FilterTags) -> RadarOptions {
    let location = &config.location;
    RadarOptions {
        tags,
        tracker: TrackerConfig {
            accuracy: if location.high_accuracy {
                Accuracy::High
            } else {
                Accuracy::Balanced
            },
            initial_delta: location.initial_delta,
            min_shift: location.min_shift,
        },
        debounce: Duration::from_millis(location.debounce_ms),
        search_on_move: location.search_on_move,
    }
}

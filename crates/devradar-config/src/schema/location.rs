use serde::{Deserialize, Serialize};

/// Location tracking and region-change behaviour.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LocationConfig {
    /// Ask the provider for a high-accuracy fix.
    pub high_accuracy: bool,
    /// Span of the initial region around the user's position, in degrees.
    pub initial_delta: f64,
    /// Quiet period before a region change is acted on, in milliseconds.
    pub debounce_ms: u64,
    /// Fraction of the current span a pan/zoom must exceed to count.
    pub min_shift: f64,
    /// Search again when the viewport settles somewhere new.
    pub search_on_move: bool,
}

impl Default for LocationConfig {
    fn default() -> Self {
        Self {
            high_accuracy: true,
            initial_delta: 0.04,
            debounce_ms: 400,
            min_shift: 0.1,
            search_on_move: true,
        }
    }
}

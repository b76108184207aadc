//! Location tracking: permission, initial fix, and debounced region changes.

mod provider;
mod tracker;

pub use provider::{Accuracy, FixedLocationProvider, LocationProvider, Permission};
pub use tracker::{spawn_debounced, LocationTracker, TrackerConfig};

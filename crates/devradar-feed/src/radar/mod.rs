//! Radar coordinator.
//!
//! Wires the location tracker, search gateway and presence feed together
//! on one event loop and publishes [`RadarSnapshot`]s for the display layer.

mod coordinator;
mod handle;
mod state;


pub use coordinator::{Radar, RadarOptions};
pub use handle::{RadarCommand, RadarHandle};
pub use state::{RadarSnapshot, RadarState, RadarStatus, SearchTicket};

//! Relay hub
//!
//! Owns all relay state and is the single entry point for transport events.

mod relay;
mod state;

pub use relay::{RelayHub, RelayStats};
pub use state::RelayState;

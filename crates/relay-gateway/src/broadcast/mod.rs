//! Room fan-out
//!
//! Delivers outbound envelopes to room members through the transport.

mod engine;

pub use engine::BroadcastEngine;

//! # relay-gateway
//!
//! WebSocket gateway and room relay engine.

pub mod broadcast;
pub mod connection;
pub mod handlers;
pub mod hub;
pub mod protocol;
pub mod server;


pub use hub::{RelayHub, RelayStats};
pub use server::{create_app, create_gateway_state, run, run_server, GatewayState};

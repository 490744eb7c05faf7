//! Domain entities - core relay objects

mod connection;
mod room;

pub use connection::Connection;
pub use room::{Room, RoomSettings};

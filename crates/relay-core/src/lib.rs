//! # relay-core
//!
//! Domain layer for the room relay: connection identities, room membership,
//! and the access rules for private rooms.
//! This crate has zero dependencies on infrastructure (sockets, web framework, etc.).

pub mod authorization;
pub mod directory;
pub mod entities;
pub mod error;
pub mod registry;
pub mod traits;
pub mod value_objects;

// Re-export commonly used types at crate root
pub use authorization::AuthorizationGuard;
pub use directory::{Departure, RoomDirectory};
pub use entities::{Connection, Room, RoomSettings};
pub use error::{DomainError, DomainResult};
pub use registry::ConnectionRegistry;
pub use traits::{Transport, TransportError};
pub use value_objects::{ConnectionHandle, ConnectionHandleGenerator, Visibility};

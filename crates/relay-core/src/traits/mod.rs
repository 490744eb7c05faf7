//! Ports - interfaces the domain needs from the outside

mod transport;

pub use transport::{Transport, TransportError};

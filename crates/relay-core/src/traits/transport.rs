//! Transport port
//!
//! The transport layer owns every socket. The relay hands it serialized
//! frames addressed by handle and never waits on delivery.

use thiserror::Error;

use crate::value_objects::ConnectionHandle;

/// Why a frame could not be handed to the transport
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum TransportError {
    /// No writable session behind this handle
    #[error("connection {0} is closed")]
    Closed(ConnectionHandle),

    /// The session's outbound queue is full
    #[error("connection {0} is not keeping up")]
    Full(ConnectionHandle),
}

/// Outbound half of the transport boundary
///
/// Implementations must not block: a slow or stuck peer returns an error
/// instead of stalling the caller.
pub trait Transport: Send + Sync {
    /// Queue one text frame for delivery to `handle`
    fn send(&self, handle: ConnectionHandle, frame: &str) -> Result<(), TransportError>;
}

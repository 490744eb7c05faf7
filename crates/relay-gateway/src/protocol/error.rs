//! Protocol decoding errors

use thiserror::Error;

/// Why an inbound frame could not become an envelope
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ProtocolError {
    /// Not a JSON object with a string `type`
    #[error("Malformed envelope: {0}")]
    Malformed(String),

    /// Well-formed, but the `type` is not one the relay handles
    #[error("Unknown message type: {0}")]
    UnknownType(String),

    /// Known `type` with missing, mistyped, or out-of-range fields
    #[error("Invalid {kind} payload: {reason}")]
    InvalidPayload { kind: &'static str, reason: String },
}

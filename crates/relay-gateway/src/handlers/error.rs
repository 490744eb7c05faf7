//! Handler error types

use crate::protocol::ProtocolError;
use relay_core::DomainError;
use thiserror::Error;
use tracing::Level;

/// Handler error type
#[derive(Debug, Error)]
pub enum HandlerError {
    /// Frame could not be decoded into an envelope
    #[error(transparent)]
    Protocol(#[from] ProtocolError),

    /// Domain rule rejected the request
    #[error(transparent)]
    Domain(#[from] DomainError),
}

impl HandlerError {
    /// Text of the `error` envelope owed to the sender, if any
    ///
    /// Malformed frames and faults tied to the connection itself get no reply.
    pub fn reply_text(&self) -> Option<String> {
        match self {
            Self::Protocol(ProtocolError::Malformed(_)) => None,
            Self::Domain(e) if e.is_defect() => None,
            Self::Protocol(e) => Some(e.to_string()),
            Self::Domain(e) => Some(e.to_string()),
        }
    }

    /// Level the rejection is logged at
    pub fn log_level(&self) -> Level {
        match self {
            Self::Domain(e) if e.is_defect() => Level::ERROR,
            Self::Domain(e) if e.is_authorization() => Level::INFO,
            Self::Domain(_) | Self::Protocol(_) => Level::DEBUG,
        }
    }

    /// Error code for logs
    pub fn code(&self) -> &'static str {
        match self {
            Self::Protocol(ProtocolError::Malformed(_)) => "MALFORMED_ENVELOPE",
            Self::Protocol(ProtocolError::UnknownType(_)) => "UNKNOWN_MESSAGE_TYPE",
            Self::Protocol(ProtocolError::InvalidPayload { .. }) => "INVALID_PAYLOAD",
            Self::Domain(e) => e.code(),
        }
    }
}

/// Handler result type
pub type HandlerResult<T> = Result<T, HandlerError>;

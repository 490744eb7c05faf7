//! Domain errors - error types for the domain layer

use thiserror::Error;

use crate::value_objects::ConnectionHandle;

/// Domain layer errors
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DomainError {
    // =========================================================================
    // Not Found Errors
    // =========================================================================
    #[error("Connection not found: {0}")]
    ConnectionNotFound(ConnectionHandle),

    #[error("Room not found: {0}")]
    RoomNotFound(String),

    // =========================================================================
    // Authorization Errors
    // =========================================================================
    #[error("Permission denied: {0}")]
    PermissionDenied(String),

    // =========================================================================
    // Invariant Violations
    // =========================================================================
    /// A live handle was registered twice. This is a defect in the transport
    /// layer, never something a client can trigger.
    #[error("Connection already registered: {0}")]
    DuplicateConnection(ConnectionHandle),
}

impl DomainError {
    /// Get an error code string for logs and error replies
    pub fn code(&self) -> &'static str {
        match self {
            Self::ConnectionNotFound(_) => "UNKNOWN_CONNECTION",
            Self::RoomNotFound(_) => "ROOM_NOT_FOUND",
            Self::PermissionDenied(_) => "PERMISSION_DENIED",
            Self::DuplicateConnection(_) => "DUPLICATE_CONNECTION",
        }
    }

    /// Check if this is an authorization error
    pub fn is_authorization(&self) -> bool {
        matches!(self, Self::PermissionDenied(_))
    }

    /// Check if this error signals a transport defect rather than bad input
    ///
    /// Handles are registered before their first frame and never reused, so
    /// neither case is reachable from client input.
    pub fn is_defect(&self) -> bool {
        matches!(
            self,
            Self::ConnectionNotFound(_) | Self::DuplicateConnection(_)
        )
    }
}

/// Result type for domain operations
pub type DomainResult<T> = Result<T, DomainError>;

//! Connection entity - one attached client

use crate::value_objects::ConnectionHandle;

/// Identity and room assignment of one live transport session
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Connection {
    pub handle: ConnectionHandle,
    /// Caller-supplied display name; empty until the first join
    pub display_name: String,
    /// Room this connection is currently a member of
    pub current_room: Option<String>,
}

impl Connection {
    /// Create an anonymous, unjoined connection
    pub fn new(handle: ConnectionHandle) -> Self {
        Self {
            handle,
            display_name: String::new(),
            current_room: None,
        }
    }

    /// Check if the caller has supplied a display name yet
    #[inline]
    pub fn has_identity(&self) -> bool {
        !self.display_name.is_empty()
    }

    /// Check if the connection is currently in a room
    #[inline]
    pub fn is_joined(&self) -> bool {
        self.current_room.is_some()
    }

    /// Check if the connection is in the given room
    pub fn is_in(&self, room_id: &str) -> bool {
        self.current_room.as_deref() == Some(room_id)
    }
}

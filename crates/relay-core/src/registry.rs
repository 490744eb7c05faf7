//! Connection registry
//!
//! Maps each live connection handle to its identity and room assignment.
//! The registry never touches room membership; keeping `current_room` in
//! step with the room directory is the caller's job.

use std::collections::HashMap;

use crate::entities::Connection;
use crate::error::{DomainError, DomainResult};
use crate::value_objects::ConnectionHandle;

/// Table of live connections keyed by handle
#[derive(Debug, Default)]
pub struct ConnectionRegistry {
    connections: HashMap<ConnectionHandle, Connection>,
}

impl ConnectionRegistry {
    /// Create an empty registry
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a new anonymous, unjoined connection
    ///
    /// Fails with `DuplicateConnection` if the handle is already live.
    pub fn register(&mut self, handle: ConnectionHandle) -> DomainResult<&Connection> {
        if self.connections.contains_key(&handle) {
            return Err(DomainError::DuplicateConnection(handle));
        }
        Ok(self
            .connections
            .entry(handle)
            .or_insert_with(|| Connection::new(handle)))
    }

    /// Record or overwrite the display name of a connection
    pub fn set_identity(&mut self, handle: ConnectionHandle, name: impl Into<String>) -> DomainResult<()> {
        let conn = self
            .connections
            .get_mut(&handle)
            .ok_or(DomainError::ConnectionNotFound(handle))?;
        conn.display_name = name.into();
        Ok(())
    }

    /// Point a connection at a room, or clear its room with `None`
    pub fn set_current_room(
        &mut self,
        handle: ConnectionHandle,
        room_id: Option<String>,
    ) -> DomainResult<()> {
        let conn = self
            .connections
            .get_mut(&handle)
            .ok_or(DomainError::ConnectionNotFound(handle))?;
        conn.current_room = room_id;
        Ok(())
    }

    /// Get the current record of a connection
    pub fn lookup(&self, handle: ConnectionHandle) -> Option<&Connection> {
        self.connections.get(&handle)
    }

    /// Get the display name of a connection
    pub fn display_name(&self, handle: ConnectionHandle) -> Option<&str> {
        self.connections.get(&handle).map(|c| c.display_name.as_str())
    }

    /// Delete a connection record
    ///
    /// The connection must already have been removed from its room.
    pub fn remove(&mut self, handle: ConnectionHandle) -> Option<Connection> {
        self.connections.remove(&handle)
    }

    /// Check if a handle is live
    pub fn contains(&self, handle: ConnectionHandle) -> bool {
        self.connections.contains_key(&handle)
    }

    /// Number of live connections
    pub fn len(&self) -> usize {
        self.connections.len()
    }

    /// Check if no connection is live
    pub fn is_empty(&self) -> bool {
        self.connections.is_empty()
    }

    /// Iterate over all live connections
    pub fn iter(&self) -> impl Iterator<Item = &Connection> {
        self.connections.values()
    }
}

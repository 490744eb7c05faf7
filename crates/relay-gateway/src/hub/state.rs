//! Shared relay state
//!
//! The registry and directory always change together under one lock, so a
//! connection's `current_room` and the room's member set never disagree.

use relay_core::{ConnectionHandle, ConnectionRegistry, RoomDirectory};

/// Connection registry and room directory guarded as one unit
#[derive(Debug, Default)]
pub struct RelayState {
    pub registry: ConnectionRegistry,
    pub directory: RoomDirectory,
}

impl RelayState {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Check the two-way membership invariants
    ///
    /// Every joined connection is listed by its room, every listed member is
    /// a live connection pointing back at that room, and no room is kept
    /// that is both public and empty.
    pub fn is_consistent(&self) -> bool {
        let forward = self.registry.iter().all(|conn| match &conn.current_room {
            Some(room_id) => self.directory.is_member(room_id, conn.handle),
            None => true,
        });

        let backward = self.directory.iter().all(|room| {
            room.should_retain()
                && room.members.iter().all(|handle| {
                    self.registry
                        .lookup(*handle)
                        .is_some_and(|conn| conn.is_in(&room.id))
                })
        });

        forward && backward
    }

    /// Room a connection is currently in
    pub fn current_room(&self, handle: ConnectionHandle) -> Option<&str> {
        self.registry
            .lookup(handle)
            .and_then(|conn| conn.current_room.as_deref())
    }
}

//! Room directory
//!
//! Maps room ids to their members and settings. A room lives in the
//! directory only while it has members or is private: a public room is
//! dropped the moment its last member leaves, while a private room keeps
//! its settings across empty periods.

use std::collections::{BTreeSet, HashMap};

use crate::entities::{Room, RoomSettings};
use crate::error::{DomainError, DomainResult};
use crate::value_objects::{ConnectionHandle, Visibility};

/// Outcome of removing a member from a room
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Departure {
    /// The handle was not a member (or the room does not exist)
    NotMember,
    /// Removed; other members remain
    Remaining(usize),
    /// Removed the last member of a public room, which was deleted
    RoomDeleted,
    /// Removed the last member of a private room; settings were kept
    RoomEmptied,
}

/// Directory of all known rooms
#[derive(Debug, Default)]
pub struct RoomDirectory {
    rooms: HashMap<String, Room>,
}

impl RoomDirectory {
    /// Create an empty directory
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Return the room with this id, creating it with the given visibility
    /// and an empty allow-list if absent
    ///
    /// Existing settings are never overwritten. A room created here with no
    /// members must receive one before the directory lock is released.
    pub fn ensure_room(&mut self, id: &str, visibility: Visibility) -> &mut Room {
        self.rooms.entry(id.to_string()).or_insert_with(|| {
            Room::new(
                id,
                RoomSettings {
                    visibility,
                    ..RoomSettings::default()
                },
            )
        })
    }

    /// Create the room or overwrite its settings, keeping current members
    pub fn put_settings(&mut self, id: &str, settings: RoomSettings) -> &Room {
        let room = self
            .rooms
            .entry(id.to_string())
            .or_insert_with(|| Room::new(id, RoomSettings::default()));
        room.settings = settings;
        room
    }

    /// Settings of a room, if it exists
    pub fn get_settings(&self, id: &str) -> Option<&RoomSettings> {
        self.rooms.get(id).map(|r| &r.settings)
    }

    /// Get a room
    pub fn get(&self, id: &str) -> Option<&Room> {
        self.rooms.get(id)
    }

    /// Add a handle to an existing room's member set
    pub fn add_member(&mut self, id: &str, handle: ConnectionHandle) -> DomainResult<()> {
        let room = self
            .rooms
            .get_mut(id)
            .ok_or_else(|| DomainError::RoomNotFound(id.to_string()))?;
        room.members.insert(handle);
        Ok(())
    }

    /// Remove a handle from a room's member set, deleting a public room
    /// that becomes empty
    pub fn remove_member(&mut self, id: &str, handle: ConnectionHandle) -> Departure {
        let Some(room) = self.rooms.get_mut(id) else {
            return Departure::NotMember;
        };

        if !room.members.remove(&handle) {
            return Departure::NotMember;
        }

        if !room.is_empty() {
            return Departure::Remaining(room.members.len());
        }

        if room.should_retain() {
            Departure::RoomEmptied
        } else {
            self.rooms.remove(id);
            Departure::RoomDeleted
        }
    }

    /// Members of a room in handle order; empty if the room is absent
    pub fn members(&self, id: &str) -> Vec<ConnectionHandle> {
        self.rooms
            .get(id)
            .map(|r| r.members.iter().copied().collect())
            .unwrap_or_default()
    }

    /// Check if a handle is in a room's member set
    pub fn is_member(&self, id: &str, handle: ConnectionHandle) -> bool {
        self.rooms
            .get(id)
            .is_some_and(|r| r.members.contains(&handle))
    }

    /// Replace a room's allow-list
    pub fn set_allow_list(&mut self, id: &str, names: BTreeSet<String>) -> DomainResult<()> {
        let room = self
            .rooms
            .get_mut(id)
            .ok_or_else(|| DomainError::RoomNotFound(id.to_string()))?;
        room.settings.allow_list = names;
        Ok(())
    }

    /// Check if a room exists
    pub fn contains(&self, id: &str) -> bool {
        self.rooms.contains_key(id)
    }

    /// Number of rooms in the directory
    pub fn len(&self) -> usize {
        self.rooms.len()
    }

    /// Check if no room exists
    pub fn is_empty(&self) -> bool {
        self.rooms.is_empty()
    }

    /// Iterate over all rooms
    pub fn iter(&self) -> impl Iterator<Item = &Room> {
        self.rooms.values()
    }
}

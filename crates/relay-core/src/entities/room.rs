//! Room entity - a named broadcast group

use std::collections::BTreeSet;

use crate::value_objects::{ConnectionHandle, Visibility};

/// Access settings of a room
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct RoomSettings {
    pub visibility: Visibility,
    /// Display names allowed to join and administer; only meaningful for
    /// private rooms
    pub allow_list: BTreeSet<String>,
}

impl RoomSettings {
    /// Settings of a freshly created public room
    pub fn public() -> Self {
        Self::default()
    }

    /// Private settings with the given allow-list
    pub fn private<I, S>(allowed: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            visibility: Visibility::Private,
            allow_list: allowed.into_iter().map(Into::into).collect(),
        }
    }

    /// Check if a display name is on the allow-list
    pub fn allows(&self, name: &str) -> bool {
        self.allow_list.contains(name)
    }
}

/// Room with its current members
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Room {
    pub id: String,
    /// Handles of joined connections, ordered by connect order
    pub members: BTreeSet<ConnectionHandle>,
    pub settings: RoomSettings,
}

impl Room {
    /// Create an empty room
    pub fn new(id: impl Into<String>, settings: RoomSettings) -> Self {
        Self {
            id: id.into(),
            members: BTreeSet::new(),
            settings,
        }
    }

    /// Check if the room has no members
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.members.is_empty()
    }

    #[inline]
    pub fn is_private(&self) -> bool {
        self.settings.visibility.is_private()
    }

    /// A room may stay in the directory only while it has members or is private
    #[inline]
    pub fn should_retain(&self) -> bool {
        !self.is_empty() || self.is_private()
    }
}

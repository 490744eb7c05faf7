//! Broadcast engine
//!
//! Best-effort fan-out: each envelope is serialized once and handed to the
//! transport for every member. A failed hand-off is logged and forgotten;
//! nothing here retries, waits, or evicts members.

use crate::protocol::OutboundEnvelope;
use relay_core::{ConnectionHandle, ConnectionRegistry, RoomDirectory, Transport};
use std::sync::Arc;

/// Delivers envelopes to rooms and single connections
pub struct BroadcastEngine {
    transport: Arc<dyn Transport>,
}

impl BroadcastEngine {
    /// Create an engine writing through the given transport
    pub fn new(transport: Arc<dyn Transport>) -> Self {
        Self { transport }
    }

    /// Send an envelope to every current member of a room
    ///
    /// Returns the number of members whose transport accepted the frame.
    pub fn broadcast(
        &self,
        directory: &RoomDirectory,
        room_id: &str,
        message: &OutboundEnvelope,
    ) -> usize {
        let members = directory.members(room_id);
        if members.is_empty() {
            return 0;
        }

        let Some(frame) = Self::encode(message) else {
            return 0;
        };

        let delivered = members
            .into_iter()
            .filter(|handle| self.deliver(*handle, &frame))
            .count();

        tracing::trace!(room_id = %room_id, delivered = delivered, "Envelope broadcast to room");

        delivered
    }

    /// Send an envelope to a single connection
    pub fn send_to(&self, handle: ConnectionHandle, message: &OutboundEnvelope) -> bool {
        Self::encode(message).is_some_and(|frame| self.deliver(handle, &frame))
    }

    /// Display names of a room's members, in handle order
    pub fn user_list_snapshot(
        registry: &ConnectionRegistry,
        directory: &RoomDirectory,
        room_id: &str,
    ) -> Vec<String> {
        directory
            .members(room_id)
            .into_iter()
            .filter_map(|handle| registry.display_name(handle).map(str::to_string))
            .collect()
    }

    /// Broadcast a fresh `userList` snapshot to a room
    pub fn broadcast_user_list(
        &self,
        registry: &ConnectionRegistry,
        directory: &RoomDirectory,
        room_id: &str,
    ) -> usize {
        let users = Self::user_list_snapshot(registry, directory, room_id);
        self.broadcast(directory, room_id, &OutboundEnvelope::user_list(users))
    }

    fn deliver(&self, handle: ConnectionHandle, frame: &str) -> bool {
        match self.transport.send(handle, frame) {
            Ok(()) => true,
            Err(e) => {
                tracing::debug!(handle = %handle, error = %e, "Dropped outbound frame");
                false
            }
        }
    }

    fn encode(message: &OutboundEnvelope) -> Option<String> {
        match message.to_json() {
            Ok(frame) => Some(frame),
            Err(e) => {
                tracing::error!(error = %e, "Failed to serialize outbound envelope");
                None
            }
        }
    }
}

impl std::fmt::Debug for BroadcastEngine {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("BroadcastEngine").finish_non_exhaustive()
    }
}

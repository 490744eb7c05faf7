//! Leave handler (also runs on disconnect)

use super::HandlerResult;
use crate::broadcast::BroadcastEngine;
use crate::hub::RelayState;
use crate::protocol::OutboundEnvelope;
use relay_core::{ConnectionHandle, Departure};

/// Handles `leave` messages and forced leaves
pub struct LeaveHandler;

impl LeaveHandler {
    /// Take a connection out of its current room
    ///
    /// No-op for an unjoined connection. Remaining members get a `system`
    /// notice and a fresh `userList`; the leaver gets nothing.
    pub fn handle(
        state: &mut RelayState,
        broadcaster: &BroadcastEngine,
        handle: ConnectionHandle,
    ) -> HandlerResult<()> {
        let Some(conn) = state.registry.lookup(handle) else {
            return Ok(());
        };
        let Some(room_id) = conn.current_room.clone() else {
            return Ok(());
        };
        let name = conn.display_name.clone();

        match state.directory.remove_member(&room_id, handle) {
            Departure::Remaining(remaining) => {
                broadcaster.broadcast(
                    &state.directory,
                    &room_id,
                    &OutboundEnvelope::system(format!("{name} left the room")),
                );
                broadcaster.broadcast_user_list(&state.registry, &state.directory, &room_id);

                tracing::debug!(
                    handle = %handle,
                    room_id = %room_id,
                    remaining = remaining,
                    "Connection left room"
                );
            }
            Departure::RoomDeleted => {
                tracing::debug!(room_id = %room_id, "Last member left, public room deleted");
            }
            Departure::RoomEmptied => {
                tracing::debug!(room_id = %room_id, "Last member left, private room kept");
            }
            Departure::NotMember => {
                tracing::warn!(
                    handle = %handle,
                    room_id = %room_id,
                    "Connection pointed at a room that did not list it"
                );
            }
        }

        state.registry.set_current_room(handle, None)?;
        Ok(())
    }
}

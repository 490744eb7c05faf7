//! Join handler

use super::{HandlerResult, LeaveHandler};
use crate::broadcast::BroadcastEngine;
use crate::hub::RelayState;
use crate::protocol::{JoinPayload, OutboundEnvelope};
use relay_core::{AuthorizationGuard, ConnectionHandle, DomainError, Visibility};

/// Handles `join` messages
pub struct JoinHandler;

impl JoinHandler {
    /// Move a connection into a room under the given display name
    ///
    /// The caller's current room is left first, notices included. A denied
    /// join therefore ends with the caller Unjoined. Joining the room the
    /// caller is already in only refreshes its display name.
    pub fn handle(
        state: &mut RelayState,
        broadcaster: &BroadcastEngine,
        handle: ConnectionHandle,
        payload: JoinPayload,
    ) -> HandlerResult<()> {
        let JoinPayload { username, room_id } = payload;

        let Some(conn) = state.registry.lookup(handle) else {
            return Err(DomainError::ConnectionNotFound(handle).into());
        };

        if conn.is_in(&room_id) {
            return Self::rename_in_place(state, broadcaster, handle, &room_id, username);
        }

        LeaveHandler::handle(state, broadcaster, handle)?;

        let allowed = state
            .directory
            .get_settings(&room_id)
            .is_none_or(|settings| AuthorizationGuard::can_join(settings, &username));

        if !allowed {
            tracing::info!(
                handle = %handle,
                room_id = %room_id,
                username = %username,
                "Join denied"
            );
            return Err(DomainError::PermissionDenied(format!(
                "{username} is not allowed to join room {room_id}"
            ))
            .into());
        }

        state.registry.set_identity(handle, username.as_str())?;
        state.directory.ensure_room(&room_id, Visibility::Public);
        state.directory.add_member(&room_id, handle)?;
        state.registry.set_current_room(handle, Some(room_id.clone()))?;

        tracing::info!(handle = %handle, room_id = %room_id, username = %username, "User joined room");

        broadcaster.broadcast(
            &state.directory,
            &room_id,
            &OutboundEnvelope::system(format!("{username} joined the room")),
        );
        broadcaster.broadcast_user_list(&state.registry, &state.directory, &room_id);

        Ok(())
    }

    fn rename_in_place(
        state: &mut RelayState,
        broadcaster: &BroadcastEngine,
        handle: ConnectionHandle,
        room_id: &str,
        username: String,
    ) -> HandlerResult<()> {
        if state.registry.display_name(handle) == Some(username.as_str()) {
            tracing::trace!(handle = %handle, room_id = %room_id, "Already in room");
            return Ok(());
        }

        state.registry.set_identity(handle, username)?;
        broadcaster.broadcast_user_list(&state.registry, &state.directory, room_id);
        Ok(())
    }
}

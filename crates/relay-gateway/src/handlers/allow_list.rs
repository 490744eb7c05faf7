//! Update-allow-list handler

use super::HandlerResult;
use crate::broadcast::BroadcastEngine;
use crate::hub::RelayState;
use crate::protocol::{OutboundEnvelope, UpdateAllowedUsersPayload};
use relay_core::{AuthorizationGuard, ConnectionHandle, DomainError};
use std::collections::BTreeSet;

/// Handles `updateAllowedUsers` messages
pub struct UpdateAllowListHandler;

impl UpdateAllowListHandler {
    /// Replace a room's allow-list; the caller always stays on it
    ///
    /// Unjoined connections have no identity yet and are ignored.
    pub fn handle(
        state: &mut RelayState,
        broadcaster: &BroadcastEngine,
        handle: ConnectionHandle,
        payload: UpdateAllowedUsersPayload,
    ) -> HandlerResult<()> {
        let Some(conn) = state.registry.lookup(handle) else {
            return Ok(());
        };
        if !conn.is_joined() {
            tracing::trace!(handle = %handle, "Allow-list update from unjoined connection ignored");
            return Ok(());
        }
        let caller = conn.display_name.clone();
        let UpdateAllowedUsersPayload {
            room_id,
            allowed_users,
        } = payload;

        let settings = state
            .directory
            .get_settings(&room_id)
            .ok_or_else(|| DomainError::RoomNotFound(room_id.clone()))?;

        if !AuthorizationGuard::can_administer(settings, &caller) {
            tracing::info!(
                handle = %handle,
                room_id = %room_id,
                username = %caller,
                "Allow-list update denied"
            );
            return Err(DomainError::PermissionDenied(format!(
                "{caller} may not change the allowed users of room {room_id}"
            ))
            .into());
        }

        let allow_list: BTreeSet<String> = allowed_users
            .into_iter()
            .chain([caller.clone()])
            .collect();
        let allowed = allow_list.len();
        state.directory.set_allow_list(&room_id, allow_list)?;

        tracing::info!(room_id = %room_id, username = %caller, allowed = allowed, "Allow-list updated");

        broadcaster.broadcast(
            &state.directory,
            &room_id,
            &OutboundEnvelope::system(format!("{caller} updated the allowed users")),
        );

        Ok(())
    }
}

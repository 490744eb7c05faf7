//! Create-private-room handler

use super::{HandlerResult, JoinHandler};
use crate::broadcast::BroadcastEngine;
use crate::hub::RelayState;
use crate::protocol::{CreatePrivateRoomPayload, JoinPayload};
use relay_core::{ConnectionHandle, DomainError, RoomSettings};

/// Handles `createPrivateRoom` messages
pub struct CreatePrivateRoomHandler;

impl CreatePrivateRoomHandler {
    /// Make a room private with the given allow-list plus the creator, then
    /// join the creator to it
    ///
    /// Existing settings are overwritten, public or private; current members
    /// are not evicted.
    pub fn handle(
        state: &mut RelayState,
        broadcaster: &BroadcastEngine,
        handle: ConnectionHandle,
        payload: CreatePrivateRoomPayload,
    ) -> HandlerResult<()> {
        let CreatePrivateRoomPayload {
            room_id,
            username,
            allowed_users,
        } = payload;

        if !state.registry.contains(handle) {
            return Err(DomainError::ConnectionNotFound(handle).into());
        }

        let settings =
            RoomSettings::private(allowed_users.into_iter().chain([username.clone()]));

        if let Some(previous) = state.directory.get_settings(&room_id) {
            if !previous.visibility.is_private() {
                tracing::warn!(
                    room_id = %room_id,
                    members = state.directory.members(&room_id).len(),
                    "Public room converted to private without evicting members"
                );
            }
        }

        tracing::info!(
            handle = %handle,
            room_id = %room_id,
            allowed = settings.allow_list.len(),
            "Private room created"
        );
        state.directory.put_settings(&room_id, settings);

        JoinHandler::handle(state, broadcaster, handle, JoinPayload { username, room_id })
    }
}

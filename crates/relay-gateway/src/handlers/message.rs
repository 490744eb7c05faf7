//! Message handler

use super::HandlerResult;
use crate::broadcast::BroadcastEngine;
use crate::hub::RelayState;
use crate::protocol::{OutboundEnvelope, SendMessagePayload};
use relay_core::ConnectionHandle;

/// Handles `message` messages
pub struct MessageHandler;

impl MessageHandler {
    /// Broadcast the sender's text to its current room, sender included
    pub fn handle(
        state: &mut RelayState,
        broadcaster: &BroadcastEngine,
        handle: ConnectionHandle,
        payload: SendMessagePayload,
    ) -> HandlerResult<()> {
        let Some(conn) = state.registry.lookup(handle) else {
            return Ok(());
        };
        let Some(room_id) = conn.current_room.as_deref() else {
            tracing::trace!(handle = %handle, "Message from unjoined connection ignored");
            return Ok(());
        };

        let envelope = OutboundEnvelope::message(conn.display_name.as_str(), payload.content);
        let delivered = broadcaster.broadcast(&state.directory, room_id, &envelope);

        tracing::trace!(handle = %handle, room_id = %room_id, delivered = delivered, "Message relayed");

        Ok(())
    }
}

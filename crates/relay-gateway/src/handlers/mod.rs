//! Message handlers
//!
//! Routes decoded client envelopes to their lifecycle handlers. Handlers run
//! with the relay state locked and either restore every invariant or change
//! nothing.

mod allow_list;
mod error;
mod join;
mod leave;
mod message;
mod private_room;

pub use allow_list::UpdateAllowListHandler;
pub use error::{HandlerError, HandlerResult};
pub use join::JoinHandler;
pub use leave::LeaveHandler;
pub use message::MessageHandler;
pub use private_room::CreatePrivateRoomHandler;

use crate::broadcast::BroadcastEngine;
use crate::hub::RelayState;
use crate::protocol::InboundEnvelope;
use relay_core::ConnectionHandle;

/// Dispatch incoming client envelopes to appropriate handlers
pub struct MessageRouter;

impl MessageRouter {
    /// Handle one decoded envelope from `handle`
    pub fn dispatch(
        state: &mut RelayState,
        broadcaster: &BroadcastEngine,
        handle: ConnectionHandle,
        envelope: InboundEnvelope,
    ) -> HandlerResult<()> {
        tracing::trace!(handle = %handle, kind = envelope.kind(), "Dispatching envelope");

        match envelope {
            InboundEnvelope::Join(payload) => JoinHandler::handle(state, broadcaster, handle, payload),
            InboundEnvelope::Message(payload) => {
                MessageHandler::handle(state, broadcaster, handle, payload)
            }
            InboundEnvelope::Leave => LeaveHandler::handle(state, broadcaster, handle),
            InboundEnvelope::CreatePrivateRoom(payload) => {
                CreatePrivateRoomHandler::handle(state, broadcaster, handle, payload)
            }
            InboundEnvelope::UpdateAllowedUsers(payload) => {
                UpdateAllowListHandler::handle(state, broadcaster, handle, payload)
            }
        }
    }
}

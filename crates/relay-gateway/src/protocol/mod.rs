//! Relay wire protocol
//!
//! One JSON object per text frame, discriminated by its `type` field.

mod error;
mod inbound;
mod outbound;

pub use error::ProtocolError;
pub use inbound::{
    CreatePrivateRoomPayload, InboundEnvelope, JoinPayload, SendMessagePayload,
    UpdateAllowedUsersPayload,
};
pub use outbound::{timestamp_now, OutboundEnvelope};

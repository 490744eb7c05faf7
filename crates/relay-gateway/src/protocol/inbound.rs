//! Inbound envelopes (client → relay)

use serde::Deserialize;
use serde_json::Value;
use validator::{Validate, ValidationError, ValidationErrors};

use super::ProtocolError;

/// A decoded, validated client message
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(tag = "type", rename_all = "camelCase")]
pub enum InboundEnvelope {
    Join(JoinPayload),
    Message(SendMessagePayload),
    Leave,
    CreatePrivateRoom(CreatePrivateRoomPayload),
    UpdateAllowedUsers(UpdateAllowedUsersPayload),
}

/// `join`: enter a room under a display name
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct JoinPayload {
    #[validate(length(min = 1, max = 32, message = "Username must be 1-32 characters"))]
    pub username: String,

    #[validate(length(min = 1, max = 64, message = "Room id must be 1-64 characters"))]
    pub room_id: String,
}

/// `message`: text for the sender's current room
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Validate)]
pub struct SendMessagePayload {
    #[validate(length(max = 2000, message = "Message must be at most 2000 characters"))]
    pub content: String,
}

/// `createPrivateRoom`: make a room private and join it
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct CreatePrivateRoomPayload {
    #[validate(length(min = 1, max = 64, message = "Room id must be 1-64 characters"))]
    pub room_id: String,

    #[validate(length(min = 1, max = 32, message = "Username must be 1-32 characters"))]
    pub username: String,

    #[validate(
        length(max = 100, message = "Too many allowed users"),
        custom(function = "validate_names")
    )]
    pub allowed_users: Vec<String>,
}

/// `updateAllowedUsers`: replace a private room's allow-list
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct UpdateAllowedUsersPayload {
    #[validate(length(min = 1, max = 64, message = "Room id must be 1-64 characters"))]
    pub room_id: String,

    #[validate(
        length(max = 100, message = "Too many allowed users"),
        custom(function = "validate_names")
    )]
    pub allowed_users: Vec<String>,
}

fn validate_names(names: &[String]) -> Result<(), ValidationError> {
    let valid = names
        .iter()
        .all(|name| (1..=32).contains(&name.chars().count()));

    if valid {
        Ok(())
    } else {
        let mut err = ValidationError::new("allowed_user_length");
        err.message = Some("Allowed user names must be 1-32 characters".into());
        Err(err)
    }
}

impl InboundEnvelope {
    /// Every `type` the relay understands
    pub const KINDS: [&'static str; 5] = [
        "join",
        "message",
        "leave",
        "createPrivateRoom",
        "updateAllowedUsers",
    ];

    /// Decode and validate one text frame
    ///
    /// Fails closed: nothing is dereferenced before the frame has matched
    /// the full schema of its `type`.
    pub fn decode(frame: &str) -> Result<Self, ProtocolError> {
        let value: Value =
            serde_json::from_str(frame).map_err(|e| ProtocolError::Malformed(e.to_string()))?;

        let raw_kind = value
            .get("type")
            .and_then(Value::as_str)
            .ok_or_else(|| ProtocolError::Malformed("missing string `type` field".to_string()))?;

        let Some(kind) = Self::KINDS.iter().copied().find(|k| *k == raw_kind) else {
            return Err(ProtocolError::UnknownType(raw_kind.to_string()));
        };

        let envelope: Self =
            serde_json::from_value(value).map_err(|e| ProtocolError::InvalidPayload {
                kind,
                reason: e.to_string(),
            })?;

        envelope
            .validate_payload()
            .map_err(|e| ProtocolError::InvalidPayload {
                kind,
                reason: e.to_string(),
            })?;

        Ok(envelope)
    }

    /// Wire name of this envelope's `type`
    pub fn kind(&self) -> &'static str {
        match self {
            Self::Join(_) => "join",
            Self::Message(_) => "message",
            Self::Leave => "leave",
            Self::CreatePrivateRoom(_) => "createPrivateRoom",
            Self::UpdateAllowedUsers(_) => "updateAllowedUsers",
        }
    }

    fn validate_payload(&self) -> Result<(), ValidationErrors> {
        match self {
            Self::Join(p) => p.validate(),
            Self::Message(p) => p.validate(),
            Self::Leave => Ok(()),
            Self::CreatePrivateRoom(p) => p.validate(),
            Self::UpdateAllowedUsers(p) => p.validate(),
        }
    }
}

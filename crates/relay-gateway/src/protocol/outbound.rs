//! Outbound envelopes (relay → client)

use chrono::{SecondsFormat, Utc};
use serde::{Deserialize, Serialize};

/// A message the relay sends to clients
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "camelCase")]
pub enum OutboundEnvelope {
    /// Room notice (joins, leaves, allow-list changes)
    System { content: String, timestamp: String },
    /// A member's chat message
    Message {
        username: String,
        content: String,
        timestamp: String,
    },
    /// Display names of the room's current members
    UserList { users: Vec<String> },
    /// Rejection addressed to the offending connection only
    Error { content: String, timestamp: String },
}

impl OutboundEnvelope {
    #[must_use]
    pub fn system(content: impl Into<String>) -> Self {
        Self::System {
            content: content.into(),
            timestamp: timestamp_now(),
        }
    }

    #[must_use]
    pub fn message(username: impl Into<String>, content: impl Into<String>) -> Self {
        Self::Message {
            username: username.into(),
            content: content.into(),
            timestamp: timestamp_now(),
        }
    }

    #[must_use]
    pub fn user_list(users: Vec<String>) -> Self {
        Self::UserList { users }
    }

    #[must_use]
    pub fn error(content: impl Into<String>) -> Self {
        Self::Error {
            content: content.into(),
            timestamp: timestamp_now(),
        }
    }

    /// Serialize to JSON string
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string(self)
    }

    /// Deserialize from JSON string
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }
}

/// Current time as RFC 3339 UTC with millisecond precision
pub fn timestamp_now() -> String {
    Utc::now().to_rfc3339_opts(SecondsFormat::Millis, true)
}

//! Frame builders for the relay protocol

use serde_json::{json, Value};
use std::sync::atomic::{AtomicU64, Ordering};

/// Counter for unique room names
static COUNTER: AtomicU64 = AtomicU64::new(1);

/// Room id that no other test uses
pub fn unique_room(prefix: &str) -> String {
    format!("{prefix}-{}", COUNTER.fetch_add(1, Ordering::SeqCst))
}

pub fn join(username: &str, room_id: &str) -> Value {
    json!({"type": "join", "username": username, "roomId": room_id})
}

pub fn message(content: &str) -> Value {
    json!({"type": "message", "content": content})
}

pub fn leave() -> Value {
    json!({"type": "leave"})
}

pub fn create_private_room(username: &str, room_id: &str, allowed_users: &[&str]) -> Value {
    json!({
        "type": "createPrivateRoom",
        "username": username,
        "roomId": room_id,
        "allowedUsers": allowed_users,
    })
}

pub fn update_allowed_users(room_id: &str, allowed_users: &[&str]) -> Value {
    json!({
        "type": "updateAllowedUsers",
        "roomId": room_id,
        "allowedUsers": allowed_users,
    })
}

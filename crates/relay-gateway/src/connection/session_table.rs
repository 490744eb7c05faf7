//! Session table
//!
//! Maps connection handles to the outbound queues of their WebSocket
//! writer tasks, using `DashMap` for thread-safe access.

use dashmap::DashMap;
use relay_core::{ConnectionHandle, Transport, TransportError};
use std::sync::Arc;
use tokio::sync::mpsc::{self, error::TrySendError};

/// Outbound queues of all live sessions
pub struct SessionTable {
    sessions: DashMap<ConnectionHandle, mpsc::Sender<String>>,
}

impl SessionTable {
    /// Create an empty session table
    #[must_use]
    pub fn new() -> Self {
        Self {
            sessions: DashMap::new(),
        }
    }

    /// Create an empty session table wrapped in Arc
    #[must_use]
    pub fn new_shared() -> Arc<Self> {
        Arc::new(Self::new())
    }

    /// Register the outbound queue of a session
    pub fn add_session(&self, handle: ConnectionHandle, sender: mpsc::Sender<String>) {
        self.sessions.insert(handle, sender);
        tracing::debug!(handle = %handle, "Session added");
    }

    /// Drop a session's queue; its writer task drains and exits
    pub fn remove_session(&self, handle: ConnectionHandle) -> bool {
        let removed = self.sessions.remove(&handle).is_some();
        if removed {
            tracing::debug!(handle = %handle, "Session removed");
        }
        removed
    }

    /// Check if a session exists
    pub fn has_session(&self, handle: ConnectionHandle) -> bool {
        self.sessions.contains_key(&handle)
    }

    /// Get the total number of live sessions
    pub fn session_count(&self) -> usize {
        self.sessions.len()
    }
}

impl Transport for SessionTable {
    fn send(&self, handle: ConnectionHandle, frame: &str) -> Result<(), TransportError> {
        let sender = self
            .sessions
            .get(&handle)
            .ok_or(TransportError::Closed(handle))?;

        sender.try_send(frame.to_string()).map_err(|e| match e {
            TrySendError::Full(_) => TransportError::Full(handle),
            TrySendError::Closed(_) => TransportError::Closed(handle),
        })
    }
}

impl Default for SessionTable {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for SessionTable {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SessionTable")
            .field("sessions", &self.sessions.len())
            .finish()
    }
}

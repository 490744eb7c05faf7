//! Relay hub
//!
//! Synchronous entry points for the three transport events. Every event
//! runs start to finish under one lock, so concurrent connections observe
//! each other's joins and leaves as indivisible steps.

use super::RelayState;
use crate::broadcast::BroadcastEngine;
use crate::handlers::{HandlerError, LeaveHandler, MessageRouter};
use crate::protocol::{InboundEnvelope, OutboundEnvelope};
use parking_lot::Mutex;
use relay_core::{ConnectionHandle, DomainResult, Transport};
use serde::Serialize;
use std::sync::Arc;
use tracing::Level;

/// Point-in-time relay counters
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct RelayStats {
    pub connections: usize,
    pub rooms: usize,
}

/// Room relay engine
pub struct RelayHub {
    state: Mutex<RelayState>,
    broadcaster: BroadcastEngine,
}

impl RelayHub {
    /// Create a hub delivering through the given transport
    pub fn new(transport: Arc<dyn Transport>) -> Self {
        Self {
            state: Mutex::new(RelayState::new()),
            broadcaster: BroadcastEngine::new(transport),
        }
    }

    /// Create a hub wrapped in Arc
    pub fn new_shared(transport: Arc<dyn Transport>) -> Arc<Self> {
        Arc::new(Self::new(transport))
    }

    /// A transport session opened
    ///
    /// Fails with `DuplicateConnection` if the handle is already live; the
    /// transport must then drop this session.
    pub fn on_connect(&self, handle: ConnectionHandle) -> DomainResult<()> {
        self.state.lock().registry.register(handle)?;
        tracing::debug!(handle = %handle, "Connection registered");
        Ok(())
    }

    /// A text frame arrived from a session
    pub fn on_frame(&self, handle: ConnectionHandle, frame: &str) {
        let result = InboundEnvelope::decode(frame)
            .map_err(HandlerError::from)
            .and_then(|envelope| {
                let mut state = self.state.lock();
                let result = MessageRouter::dispatch(&mut state, &self.broadcaster, handle, envelope);
                debug_assert!(state.is_consistent(), "relay state inconsistent after dispatch");
                result
            });

        if let Err(e) = result {
            self.reject(handle, &e);
        }
    }

    /// A transport session closed; runs the leave handler and forgets the
    /// connection
    pub fn on_disconnect(&self, handle: ConnectionHandle) {
        let mut state = self.state.lock();

        if let Err(e) = LeaveHandler::handle(&mut state, &self.broadcaster, handle) {
            tracing::warn!(handle = %handle, error = %e, "Leave on disconnect failed");
        }

        if state.registry.remove(handle).is_some() {
            tracing::debug!(handle = %handle, "Connection unregistered");
        }
    }

    /// Current counters
    pub fn stats(&self) -> RelayStats {
        let state = self.state.lock();
        RelayStats {
            connections: state.registry.len(),
            rooms: state.directory.len(),
        }
    }

    /// Run a closure against a consistent view of the state
    pub fn with_state<R>(&self, f: impl FnOnce(&RelayState) -> R) -> R {
        f(&*self.state.lock())
    }

    fn reject(&self, handle: ConnectionHandle, error: &HandlerError) {
        let level = error.log_level();
        if level == Level::ERROR {
            tracing::error!(handle = %handle, code = error.code(), error = %error, "Relay defect");
        } else if level == Level::INFO {
            tracing::info!(handle = %handle, code = error.code(), error = %error, "Request denied");
        } else {
            tracing::debug!(handle = %handle, code = error.code(), error = %error, "Request rejected");
        }

        if let Some(text) = error.reply_text() {
            self.broadcaster.send_to(handle, &OutboundEnvelope::error(text));
        }
    }
}

impl std::fmt::Debug for RelayHub {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let stats = self.stats();
        f.debug_struct("RelayHub")
            .field("connections", &stats.connections)
            .field("rooms", &stats.rooms)
            .finish()
    }
}

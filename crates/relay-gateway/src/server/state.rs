//! Gateway state
//!
//! Application state for the gateway server.

use crate::connection::SessionTable;
use crate::hub::RelayHub;
use relay_common::AppConfig;
use relay_core::ConnectionHandleGenerator;
use std::sync::Arc;

/// Gateway application state
///
/// Holds all shared dependencies for the gateway server.
#[derive(Clone)]
pub struct GatewayState {
    /// Relay engine
    hub: Arc<RelayHub>,
    /// Outbound queues, also the hub's transport
    sessions: Arc<SessionTable>,
    /// Source of connection handles
    handles: Arc<ConnectionHandleGenerator>,
    /// Application configuration
    config: Arc<AppConfig>,
}

impl GatewayState {
    /// Create a new gateway state
    pub fn new(hub: Arc<RelayHub>, sessions: Arc<SessionTable>, config: AppConfig) -> Self {
        Self {
            hub,
            sessions,
            handles: Arc::new(ConnectionHandleGenerator::new()),
            config: Arc::new(config),
        }
    }

    /// Get the relay hub
    pub fn hub(&self) -> &Arc<RelayHub> {
        &self.hub
    }

    /// Get the session table
    pub fn sessions(&self) -> &SessionTable {
        &self.sessions
    }

    /// Get the handle generator
    pub fn handles(&self) -> &ConnectionHandleGenerator {
        &self.handles
    }

    /// Get the application configuration
    pub fn config(&self) -> &AppConfig {
        &self.config
    }
}

impl std::fmt::Debug for GatewayState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GatewayState")
            .field("hub", &self.hub)
            .field("sessions", &self.sessions)
            .field("config", &"AppConfig")
            .finish()
    }
}

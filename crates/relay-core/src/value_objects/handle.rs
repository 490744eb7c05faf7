//! Connection handle - opaque key for one transport session
//!
//! Handles are slot keys into the connection registry. The transport layer
//! owns the socket behind a handle; the domain only ever holds the key.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::sync::atomic::{AtomicU64, Ordering};

/// Opaque identifier for a live transport session
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ConnectionHandle(u64);

impl ConnectionHandle {
    /// Create a handle from a raw value
    #[inline]
    pub const fn new(id: u64) -> Self {
        Self(id)
    }

    /// Get the inner value
    #[inline]
    pub const fn into_inner(self) -> u64 {
        self.0
    }
}

impl fmt::Display for ConnectionHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<u64> for ConnectionHandle {
    fn from(id: u64) -> Self {
        Self(id)
    }
}

/// Thread-safe generator of unique connection handles
///
/// Handles increase monotonically and are never reused within one process,
/// so a handle's ordering matches connect order.
#[derive(Debug)]
pub struct ConnectionHandleGenerator {
    next: AtomicU64,
}

impl ConnectionHandleGenerator {
    /// Create a generator whose first handle is `1`
    pub const fn new() -> Self {
        Self {
            next: AtomicU64::new(1),
        }
    }

    /// Allocate the next handle
    pub fn generate(&self) -> ConnectionHandle {
        ConnectionHandle(self.next.fetch_add(1, Ordering::Relaxed))
    }
}

impl Default for ConnectionHandleGenerator {
    fn default() -> Self {
        Self::new()
    }
}

//! Transport-side session management
//!
//! Owns the outbound queue of every live WebSocket session.

mod session_table;

pub use session_table::SessionTable;

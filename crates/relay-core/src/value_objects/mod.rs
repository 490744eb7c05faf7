//! Value objects - immutable types that represent domain concepts

mod handle;
mod visibility;

pub use handle::{ConnectionHandle, ConnectionHandleGenerator};
pub use visibility::Visibility;

//! Authorization guard
//!
//! Pure decisions over a snapshot of room settings.

use crate::entities::RoomSettings;
use crate::value_objects::Visibility;

/// Join and administration rules for rooms
pub struct AuthorizationGuard;

impl AuthorizationGuard {
    /// Public rooms admit anyone; private rooms admit allow-listed names only
    pub fn can_join(settings: &RoomSettings, caller: &str) -> bool {
        match settings.visibility {
            Visibility::Public => true,
            Visibility::Private => settings.allows(caller),
        }
    }

    /// Only allow-listed names may change the allow-list
    pub fn can_administer(settings: &RoomSettings, caller: &str) -> bool {
        settings.allows(caller)
    }
}

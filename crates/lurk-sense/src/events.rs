//! Sight notifications delivered to behavior controllers.
//!
//! Events are plain messages carrying the target's handle by value.  Nothing
//! about the target is borrowed: receivers re-resolve the handle through a
//! [`TargetResolver`][crate::TargetResolver] whenever they need a position,
//! so a handle going stale between emission and consumption is harmless.

use lurk_core::EntityId;

/// A discrete sight notification.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum SightEvent {
    /// The sensor started seeing `EntityId`.
    Gained(EntityId),
    /// The sensor stopped seeing `EntityId` (left the volume, became
    /// occluded, or despawned).
    Lost(EntityId),
}

impl SightEvent {
    /// The handle the event names.
    pub fn target(&self) -> EntityId {
        match *self {
            SightEvent::Gained(id) | SightEvent::Lost(id) => id,
        }
    }
}

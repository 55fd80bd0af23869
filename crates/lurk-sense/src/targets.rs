//! Lazy target-position resolution.

use lurk_core::{EntityId, Vec3};

/// Resolves an entity handle to its current world position.
///
/// Controllers store handles by value and call `resolve` every time a
/// position is needed.  `None` means the handle is stale (the entity was
/// despawned); callers treat that as "target unavailable" and fall back to
/// their default behavior rather than failing.
///
/// Implementations must be `Send + Sync` so many agents can resolve
/// concurrently against shared world state.
pub trait TargetResolver: Send + Sync {
    fn resolve(&self, target: EntityId) -> Option<Vec3>;
}

//! Entity registry: the world's handle → position store.

use rustc_hash::FxHashMap;

use lurk_core::{EntityId, Vec3};
use lurk_sense::TargetResolver;

/// Positions of all live entities, keyed by handle.
///
/// Handles are never reused within one registry's lifetime, so a handle held
/// by a behavior after its entity despawns simply stops resolving — there is
/// no notification and none is needed.
#[derive(Default)]
pub struct EntityRegistry {
    positions: FxHashMap<EntityId, Vec3>,
    next_id:   u32,
}

impl EntityRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add an entity and return its fresh handle.
    pub fn spawn(&mut self, position: Vec3) -> EntityId {
        let id = EntityId(self.next_id);
        self.next_id += 1;
        self.positions.insert(id, position);
        id
    }

    /// Remove an entity.  Outstanding handles become stale silently.
    /// Returns `false` if the handle was already stale.
    pub fn despawn(&mut self, id: EntityId) -> bool {
        self.positions.remove(&id).is_some()
    }

    /// Update an entity's position.  Returns `false` for stale handles.
    pub fn set_position(&mut self, id: EntityId, position: Vec3) -> bool {
        match self.positions.get_mut(&id) {
            Some(slot) => {
                *slot = position;
                true
            }
            None => false,
        }
    }

    /// Current position, or `None` for stale handles.
    pub fn position(&self, id: EntityId) -> Option<Vec3> {
        self.positions.get(&id).copied()
    }

    pub fn len(&self) -> usize {
        self.positions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.positions.is_empty()
    }

    /// Iterate all live (handle, position) pairs in unspecified order.
    pub fn iter(&self) -> impl Iterator<Item = (EntityId, Vec3)> + '_ {
        self.positions.iter().map(|(&id, &pos)| (id, pos))
    }
}

impl TargetResolver for EntityRegistry {
    fn resolve(&self, target: EntityId) -> Option<Vec3> {
        self.position(target)
    }
}

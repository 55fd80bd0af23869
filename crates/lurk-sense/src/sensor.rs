//! The line-of-sight sensor.

use log::debug;

use lurk_core::{EntityId, Vec3};
use lurk_nav::{CategoryMask, Occluder};

use crate::SightEvent;

/// Detection volume that emits [`SightEvent`]s on state changes.
///
/// A target is in sight when it is within `radius` of the observer and, if an
/// occluder mask is configured, the segment from observer to target is clear
/// of matching geometry.  `scan` diffs the in-sight set against the previous
/// call and emits `Gained`/`Lost` events for the changes only; a target that
/// disappears from the scanned list entirely (despawned) produces a `Lost`
/// event like any other exit.
pub struct SightSensor {
    radius:        f32,
    occluder_mask: Option<CategoryMask>,
    in_sight:      Vec<EntityId>,
}

impl SightSensor {
    /// Pure radius volume, no occlusion (a sphere trigger).
    pub fn new(radius: f32) -> Self {
        Self {
            radius,
            occluder_mask: None,
            in_sight: Vec::new(),
        }
    }

    /// Also require a clear segment to the target, treating obstacles whose
    /// category intersects `mask` as view blockers.
    pub fn with_occluders(mut self, mask: CategoryMask) -> Self {
        self.occluder_mask = Some(mask);
        self
    }

    /// The detection volume's radius.
    pub fn radius(&self) -> f32 {
        self.radius
    }

    /// Handles currently in sight (as of the last `scan`).
    pub fn in_sight(&self) -> &[EntityId] {
        &self.in_sight
    }

    /// Re-evaluate the volume and return the events for this tick.
    ///
    /// `targets` is the full list of candidate (handle, position) pairs this
    /// sensor watches; event order follows the order of that list, with
    /// losses reported before gains.
    pub fn scan(
        &mut self,
        observer:  Vec3,
        targets:   &[(EntityId, Vec3)],
        occluders: &dyn Occluder,
    ) -> Vec<SightEvent> {
        let mut now: Vec<EntityId> = Vec::new();
        for &(id, pos) in targets {
            if observer.distance(pos) >= self.radius {
                continue;
            }
            if let Some(mask) = self.occluder_mask {
                if occluders.segment_blocked(observer, pos, mask) {
                    continue;
                }
            }
            now.push(id);
        }

        let mut events = Vec::new();
        for &id in &self.in_sight {
            if !now.contains(&id) {
                debug!("sight lost: {id}");
                events.push(SightEvent::Lost(id));
            }
        }
        for &id in &now {
            if !self.in_sight.contains(&id) {
                debug!("sight gained: {id}");
                events.push(SightEvent::Gained(id));
            }
        }

        self.in_sight = now;
        events
    }
}

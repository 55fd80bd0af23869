//! Direct pursuit behavior.

use lurk_core::EntityId;
use lurk_nav::NavAgent;
use lurk_sense::TargetResolver;

/// Re-targets its agent at the tracked entity every tick.
///
/// The simplest possible pursuer: no patrol, no hiding, one destination
/// update per tick.  A stale or missing target leaves the agent's current
/// path untouched.
pub struct DirectChaser {
    target: Option<EntityId>,
}

impl DirectChaser {
    pub fn new(target: EntityId) -> Self {
        Self { target: Some(target) }
    }

    pub fn idle() -> Self {
        Self { target: None }
    }

    /// Swap the pursued entity.
    pub fn set_target(&mut self, target: Option<EntityId>) {
        self.target = target;
    }

    pub fn target(&self) -> Option<EntityId> {
        self.target
    }

    /// Issue this tick's destination, if the target resolves.
    pub fn tick(&self, targets: &dyn TargetResolver, nav: &mut dyn NavAgent) {
        if let Some(pos) = self.target.and_then(|id| targets.resolve(id)) {
            nav.set_destination(pos);
        }
    }
}

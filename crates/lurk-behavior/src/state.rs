//! Behavior state and the patrol route.

use std::fmt;

use lurk_core::Vec3;

// ── BehaviorState ─────────────────────────────────────────────────────────────

/// The controller's governing phase.  Exactly one is active at a time and
/// only the controller transitions between them.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum BehaviorState {
    /// Walking the patrol route, watching for the player.
    Patrolling,
    /// Hiding after detection, before giving chase.
    HidingPreChase,
    /// Actively pursuing the target.
    Chasing,
    /// Hiding again after the chase, before resuming patrol.
    HidingPostChase,
}

impl BehaviorState {
    /// Stable snake_case name, used in logs and output rows.
    pub fn name(self) -> &'static str {
        match self {
            BehaviorState::Patrolling      => "patrolling",
            BehaviorState::HidingPreChase  => "hiding_pre_chase",
            BehaviorState::Chasing         => "chasing",
            BehaviorState::HidingPostChase => "hiding_post_chase",
        }
    }
}

impl fmt::Display for BehaviorState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

// ── PatrolRoute ───────────────────────────────────────────────────────────────

/// An ordered, cyclic sequence of patrol waypoints.
///
/// The current index is owned by the controller and always stays in
/// `[0, len)` while the route is non-empty.  An empty route is valid:
/// patrolling then issues no destinations and the agent holds position.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct PatrolRoute {
    waypoints: Vec<Vec3>,
    current:   usize,
}

impl PatrolRoute {
    pub fn new(waypoints: Vec<Vec3>) -> Self {
        Self { waypoints, current: 0 }
    }

    /// A route with no waypoints (patrol becomes a no-op).
    pub fn empty() -> Self {
        Self::new(Vec::new())
    }

    pub fn len(&self) -> usize {
        self.waypoints.len()
    }

    pub fn is_empty(&self) -> bool {
        self.waypoints.is_empty()
    }

    /// Index of the waypoint currently being walked toward.
    pub fn current_index(&self) -> usize {
        self.current
    }

    /// The waypoint currently being walked toward, if the route is non-empty.
    pub fn current_waypoint(&self) -> Option<Vec3> {
        self.waypoints.get(self.current).copied()
    }

    /// Advance to the next waypoint (wrapping) and return it.
    pub fn advance(&mut self) -> Option<Vec3> {
        if self.waypoints.is_empty() {
            return None;
        }
        self.current = (self.current + 1) % self.waypoints.len();
        self.current_waypoint()
    }
}

//! Navigation agent trait and the default straight-line mover.

use lurk_core::Vec3;

/// The opaque mover every behavior drives.
///
/// The contract deliberately hides how paths are computed: a behavior issues
/// a destination, may clear it, and can read how far the agent still has to
/// go.  `remaining_distance` returns `f32::INFINITY` while no path is active,
/// so "am I there yet?" checks degrade safely when the path was reset.
pub trait NavAgent {
    /// Best-effort path request; no result is observed by callers.
    fn set_destination(&mut self, point: Vec3);

    /// Clear the current path; the agent becomes idle in place.
    fn reset_path(&mut self);

    /// Distance left to the current destination, or `f32::INFINITY` when the
    /// agent has no path.
    fn remaining_distance(&self) -> f32;

    /// The agent's current world position.
    fn position(&self) -> Vec3;
}

// ── SteeringAgent ─────────────────────────────────────────────────────────────

/// Constant-speed straight-line mover.
///
/// A real game plugs a navmesh pathfinder behind [`NavAgent`]; for the
/// behaviors in this workspace only the observable contract matters, and a
/// direct mover satisfies it.  The destination is kept after arrival (with a
/// remaining distance of zero) until it is replaced or reset, so arrival
/// checks like `remaining_distance() < 0.5` keep working.
#[derive(Clone, Debug)]
pub struct SteeringAgent {
    position:    Vec3,
    speed:       f32,
    destination: Option<Vec3>,
}

impl SteeringAgent {
    /// Create an idle agent at `position` moving at `speed` units/second.
    pub fn new(position: Vec3, speed: f32) -> Self {
        Self { position, speed, destination: None }
    }

    /// Integrate one frame of movement toward the destination.
    ///
    /// When the remaining distance is smaller than this frame's step, the
    /// agent snaps onto the destination instead of overshooting.
    pub fn advance(&mut self, dt_secs: f32) {
        let Some(dest) = self.destination else {
            return;
        };
        let offset = dest - self.position;
        let dist = offset.length();
        let step = self.speed * dt_secs;
        if dist <= step {
            self.position = dest;
        } else {
            self.position += offset / dist * step;
        }
    }

    /// The destination currently being steered toward, if any.
    pub fn destination(&self) -> Option<Vec3> {
        self.destination
    }

    /// Teleport the agent (initial placement; not a path request).
    pub fn place(&mut self, position: Vec3) {
        self.position = position;
    }
}

impl NavAgent for SteeringAgent {
    fn set_destination(&mut self, point: Vec3) {
        self.destination = Some(point);
    }

    fn reset_path(&mut self) {
        self.destination = None;
    }

    fn remaining_distance(&self) -> f32 {
        match self.destination {
            Some(dest) => self.position.distance(dest),
            None       => f32::INFINITY,
        }
    }

    fn position(&self) -> Vec3 {
        self.position
    }
}

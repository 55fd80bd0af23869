//! Door trigger volume: entry/exit counting.

use lurk_core::{EntityId, Vec3};
use lurk_nav::Rect;

/// What the trigger wants its door to do this tick.
#[derive(Copy, Clone, Debug, PartialEq)]
pub enum DoorCommand {
    /// The first agent entered; open away from them.
    Open { user_pos: Vec3 },
    /// The last agent left.
    Close,
}

/// Counts navigation agents inside a trigger volume and opens the door for
/// the first one in, closing it after the last one out.
pub struct DoorTrigger {
    volume: Rect,
    inside: Vec<EntityId>,
}

impl DoorTrigger {
    pub fn new(volume: Rect) -> Self {
        Self { volume, inside: Vec::new() }
    }

    /// Number of agents currently inside the volume.
    pub fn agents_in_range(&self) -> usize {
        self.inside.len()
    }

    /// Re-evaluate the volume against the watched agents.
    ///
    /// Emits at most one command per tick: `Open` on the 0 → n edge (with
    /// the position of the first agent found inside), `Close` on the n → 0
    /// edge.
    pub fn update(&mut self, agents: &[(EntityId, Vec3)]) -> Option<DoorCommand> {
        let was_occupied = !self.inside.is_empty();

        self.inside.clear();
        let mut first_pos = None;
        for &(id, pos) in agents {
            if self.volume.contains_xz(pos) {
                if first_pos.is_none() {
                    first_pos = Some(pos);
                }
                self.inside.push(id);
            }
        }

        match (was_occupied, first_pos) {
            (false, Some(user_pos)) => Some(DoorCommand::Open { user_pos }),
            (true, None)            => Some(DoorCommand::Close),
            _                       => None,
        }
    }
}

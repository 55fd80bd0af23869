//! Point-and-click player movement.

use log::debug;

use lurk_core::Ray;
use lurk_nav::NavAgent;

/// Maps click rays to navigation destinations.
///
/// The host turns a screen click into a world-space [`Ray`]; this helper
/// intersects it with the ground plane and hands the point to the player's
/// navigation agent.  A ray that misses the ground is ignored.
pub struct PointClickMover {
    ground_height: f32,
}

impl PointClickMover {
    pub fn new(ground_height: f32) -> Self {
        Self { ground_height }
    }

    /// Issue a destination for the clicked point.  Returns `true` if the ray
    /// hit the ground and a destination was set.
    pub fn click(&self, ray: Ray, nav: &mut dyn NavAgent) -> bool {
        match ray.intersect_ground(self.ground_height) {
            Some(point) => {
                debug!("click destination {point}");
                nav.set_destination(point);
                true
            }
            None => {
                debug!("click ray missed the ground plane");
                false
            }
        }
    }
}

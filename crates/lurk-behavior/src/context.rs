//! Read-only world services passed to every behavior callback.

use lurk_nav::{ObstacleQuery, SurfaceQuery};
use lurk_sense::TargetResolver;

/// The world services a controller reads during one tick.
///
/// All borrows are shared: many controllers can hold the same `BehaviorCtx`
/// concurrently (the services are `Send + Sync` by trait bound), which is
/// what allows the host loop to tick agents in parallel.  Nothing in the
/// context is mutated; controllers write only to themselves and to their own
/// navigation agent.
pub struct BehaviorCtx<'a> {
    /// Wall-clock seconds covered by this tick.
    pub dt_secs: f32,

    /// Navigable-surface sampling and edge queries.
    pub surface: &'a dyn SurfaceQuery,

    /// Spatial obstacle queries (concealment candidates).
    pub obstacles: &'a dyn ObstacleQuery,

    /// Lazy target-handle resolution.
    pub targets: &'a dyn TargetResolver,
}

impl<'a> BehaviorCtx<'a> {
    #[inline]
    pub fn new(
        dt_secs:   f32,
        surface:   &'a dyn SurfaceQuery,
        obstacles: &'a dyn ObstacleQuery,
        targets:   &'a dyn TargetResolver,
    ) -> Self {
        Self { dt_secs, surface, obstacles, targets }
    }
}

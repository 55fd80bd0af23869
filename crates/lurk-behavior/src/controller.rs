//! The enemy behavior controller.
//!
//! # State machine
//!
//! ```text
//!                 proximity / sight-gained
//!   Patrolling ───────────────────────────► HidingPreChase
//!       ▲                                        │ hide timer
//!       │ sight-lost (any phase)                 ▼
//!       │◄─────────────────────────────────  Chasing
//!       │                                        │ chase timer / target gone
//!       │ hide timer                             ▼
//!       └───────────────────────────────  HidingPostChase
//! ```
//!
//! Sight events may arrive at any point relative to a tick; the transition
//! function is total over {tick, sight-gained, sight-lost} so every
//! combination has a defined (possibly no-op) result.
//!
//! # Per-tick contract
//!
//! [`tick`][EnemyController::tick] issues at most one navigation destination:
//! either one sequence step fires (cadence boundary), or one patrol decision
//! runs (detection entry or waypoint advance).  Patrol checks read the state
//! as of the start of the tick, so a sequence finishing mid-tick cannot also
//! trigger a same-tick patrol command.

use log::{debug, warn};

use lurk_core::EntityId;
use lurk_nav::NavAgent;
use lurk_sense::SightEvent;

use crate::sequence::{SequenceTask, StepOutcome};
use crate::{BehaviorCtx, BehaviorResult, BehaviorState, PatrolRoute, TuningParameters};

/// An agent counts as arrived at its waypoint within this distance.
pub const WAYPOINT_ARRIVAL_DISTANCE: f32 = 0.5;

/// Patrol/hide/chase behavior for a single enemy agent.
///
/// The controller owns its patrol route and state; it reads world services
/// through [`BehaviorCtx`] and drives exactly one [`NavAgent`].  It never
/// holds references to the sighted entity — only a handle, re-resolved on
/// every use.
pub struct EnemyController {
    params:        TuningParameters,
    route:         PatrolRoute,
    state:         BehaviorState,
    /// The live tracked target (the last handle sight reported), if any.
    target:        Option<EntityId>,
    /// The in-flight hide/chase/hide task.  `None` while patrolling, and
    /// also in the stalled case where a mid-sequence sight-gained cancelled
    /// the task without restarting it.
    sequence:      Option<SequenceTask>,
    cadence_accum: f32,
    /// Set while the tick in which the sequence started is still in flight.
    /// The start step has already run; cadence time begins accumulating on
    /// the next tick (the coroutine's wait never resumed within the frame
    /// that started it).
    sequence_just_started: bool,
}

impl EnemyController {
    /// Create a controller in the `Patrolling` state.
    ///
    /// Fails if `params` is out of range.  Call [`start`](Self::start) once
    /// the navigation agent is placed to issue the first patrol destination.
    pub fn new(route: PatrolRoute, params: TuningParameters) -> BehaviorResult<Self> {
        params.validate()?;
        Ok(Self {
            params,
            route,
            state: BehaviorState::Patrolling,
            target: None,
            sequence: None,
            cadence_accum: 0.0,
            sequence_just_started: false,
        })
    }

    /// Pre-seed the tracked target handle (a level may wire the player in at
    /// spawn so proximity detection works before any sight event).
    pub fn with_tracked_target(mut self, target: EntityId) -> Self {
        self.target = Some(target);
        self
    }

    pub fn state(&self) -> BehaviorState {
        self.state
    }

    pub fn params(&self) -> &TuningParameters {
        &self.params
    }

    pub fn route(&self) -> &PatrolRoute {
        &self.route
    }

    /// The live tracked target handle, if any.
    pub fn tracked_target(&self) -> Option<EntityId> {
        self.target
    }

    /// Begin patrolling: issue the current waypoint as the destination.
    ///
    /// A no-op on an empty route (the agent holds position; this is a valid
    /// configuration, not an error).
    pub fn start(&mut self, nav: &mut dyn NavAgent) {
        if let Some(waypoint) = self.route.current_waypoint() {
            nav.set_destination(waypoint);
        }
    }

    // ── Event handling ────────────────────────────────────────────────────

    /// Consume one sight notification.
    ///
    /// May be called any number of times per tick, before or after
    /// [`tick`](Self::tick); the relative order within one host tick is
    /// unspecified and behaviors must not depend on it.
    pub fn handle_sight(
        &mut self,
        event: SightEvent,
        ctx:   &BehaviorCtx<'_>,
        nav:   &mut dyn NavAgent,
    ) {
        match event {
            SightEvent::Gained(id) => {
                if self.state == BehaviorState::Patrolling {
                    self.begin_sequence(id, ctx, nav);
                } else {
                    // Re-gained mid-sequence: cancel the task and update the
                    // handle, but do not restart.  The controller stays in
                    // its current phase with no running task until sight is
                    // lost again.
                    debug!("sight re-gained in {}; task cancelled, not restarted", self.state);
                    self.sequence = None;
                    self.target = Some(id);
                }
            }
            SightEvent::Lost(_) => {
                // Global "no longer sighted": the named handle is not checked
                // against the tracked one.
                self.target = None;
                if self.state != BehaviorState::Patrolling {
                    debug!("sight lost in {}; resuming patrol", self.state);
                    self.sequence = None;
                    self.resume_patrol(nav);
                }
            }
        }
    }

    // ── Tick ──────────────────────────────────────────────────────────────

    /// Advance one host tick.
    pub fn tick(&mut self, ctx: &BehaviorCtx<'_>, nav: &mut dyn NavAgent) {
        let patrolling_at_start = self.state == BehaviorState::Patrolling;

        // Cadence-driven sequence stepping.  The accumulator resets on each
        // step: a host tick longer than the cadence runs one step per tick
        // rather than bursting to catch up.  A sequence whose start step ran
        // this very tick does not accumulate yet.
        if self.sequence.is_some() && !self.sequence_just_started {
            self.cadence_accum += ctx.dt_secs;
            if self.cadence_accum >= self.params.update_cadence_secs {
                self.cadence_accum = 0.0;
                self.step_sequence(ctx, nav);
            }
        }

        // Proximity detection: the tracked target entering the sensor radius
        // triggers the sequence even without a sight event.
        if patrolling_at_start && self.state == BehaviorState::Patrolling {
            if let Some(id) = self.target {
                if let Some(target_pos) = ctx.targets.resolve(id) {
                    if nav.position().distance(target_pos) < self.params.detection_radius {
                        self.begin_sequence(id, ctx, nav);
                    }
                }
            }
        }

        // Waypoint arrival.  Checked every tick alongside proximity, but the
        // advance only applies while still patrolling.
        if patrolling_at_start
            && self.state == BehaviorState::Patrolling
            && !self.route.is_empty()
            && nav.remaining_distance() < WAYPOINT_ARRIVAL_DISTANCE
        {
            if let Some(next) = self.route.advance() {
                nav.set_destination(next);
            }
        }

        self.sequence_just_started = false;
    }

    // ── Internals ─────────────────────────────────────────────────────────

    /// Cancel any running task and start the hide/chase/hide sequence.
    ///
    /// The first hide step runs immediately, in the same tick (the coroutine
    /// body ran to its first yield synchronously on start).
    fn begin_sequence(&mut self, target: EntityId, ctx: &BehaviorCtx<'_>, nav: &mut dyn NavAgent) {
        debug!("target {target} detected; starting hide/chase sequence");
        self.sequence = None;
        nav.reset_path();
        self.target = Some(target);
        self.cadence_accum = 0.0;
        self.sequence_just_started = true;
        self.state = BehaviorState::HidingPreChase;

        let mut task = SequenceTask::new(target);
        match task.step(self.target, &self.params, ctx, nav) {
            StepOutcome::Continue => {
                self.state = task.state();
                self.sequence = Some(task);
            }
            StepOutcome::Finished => self.resume_patrol(nav),
            StepOutcome::Aborted => {
                warn!("captured target {target} unavailable; aborting to patrol");
                self.resume_patrol(nav);
            }
        }
    }

    /// Run one sequence step and apply its outcome.
    fn step_sequence(&mut self, ctx: &BehaviorCtx<'_>, nav: &mut dyn NavAgent) {
        let Some(mut task) = self.sequence.take() else {
            return;
        };
        match task.step(self.target, &self.params, ctx, nav) {
            StepOutcome::Continue => {
                self.state = task.state();
                self.sequence = Some(task);
            }
            StepOutcome::Finished => {
                debug!("hide/chase sequence complete; resuming patrol");
                self.resume_patrol(nav);
            }
            StepOutcome::Aborted => {
                warn!("captured target unavailable mid-hide; aborting to patrol");
                self.resume_patrol(nav);
            }
        }
    }

    /// Return to `Patrolling` and re-issue the current waypoint.
    fn resume_patrol(&mut self, nav: &mut dyn NavAgent) {
        self.state = BehaviorState::Patrolling;
        self.sequence = None;
        if let Some(waypoint) = self.route.current_waypoint() {
            nav.set_destination(waypoint);
        }
    }
}

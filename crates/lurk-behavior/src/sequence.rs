//! The hide → chase → hide sequence as an explicit resumable task.
//!
//! The original behavior ran this as a coroutine suspended between cadence
//! steps.  Here it is a plain struct holding the continuation point (phase +
//! timer); the controller steps it once per cadence boundary and drops it to
//! cancel.  Suspension points exist only between steps — a single step runs
//! to completion, bounded by the concealment search's candidate cap.

use lurk_core::EntityId;
use lurk_nav::NavAgent;

use crate::{cover, BehaviorCtx, BehaviorState, TuningParameters};

/// Where the sequence resumes on its next step.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
enum SeqPhase {
    HidePreChase,
    Chase,
    HidePostChase,
}

/// What a step did, as seen by the controller.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub(crate) enum StepOutcome {
    /// Sequence still running; step again at the next cadence boundary.
    Continue,
    /// The post-chase hide finished; resume patrolling.
    Finished,
    /// The captured target no longer resolves; abandon the sequence.
    Aborted,
}

/// The in-flight hide/chase/hide task.
///
/// Hide phases resolve the **captured** handle (snapshotted when the sequence
/// began); the chase phase resolves the controller's **live** handle.  Timers
/// advance by the cadence period per step, never by wall-clock deltas, so a
/// phase lasts `ceil(max_time / cadence)` steps exactly.
#[derive(Clone, Debug)]
pub(crate) struct SequenceTask {
    phase:    SeqPhase,
    timer:    f32,
    captured: EntityId,
}

impl SequenceTask {
    pub(crate) fn new(captured: EntityId) -> Self {
        Self {
            phase: SeqPhase::HidePreChase,
            timer: 0.0,
            captured,
        }
    }

    /// The behavior state corresponding to the current phase.
    pub(crate) fn state(&self) -> BehaviorState {
        match self.phase {
            SeqPhase::HidePreChase  => BehaviorState::HidingPreChase,
            SeqPhase::Chase         => BehaviorState::Chasing,
            SeqPhase::HidePostChase => BehaviorState::HidingPostChase,
        }
    }

    /// Run one cadence step.
    ///
    /// Phase handoffs happen here: when a timer expires the task falls
    /// through into the next phase and the new phase's first action runs in
    /// the same step (matching the coroutine, whose loops ran back-to-back
    /// within one resume).
    pub(crate) fn step(
        &mut self,
        live_target: Option<EntityId>,
        params:      &TuningParameters,
        ctx:         &BehaviorCtx<'_>,
        nav:         &mut dyn NavAgent,
    ) -> StepOutcome {
        loop {
            match self.phase {
                SeqPhase::HidePreChase | SeqPhase::HidePostChase => {
                    if self.timer >= params.max_hide_secs {
                        if self.phase == SeqPhase::HidePreChase {
                            self.phase = SeqPhase::Chase;
                            self.timer = 0.0;
                            continue;
                        }
                        return StepOutcome::Finished;
                    }

                    let Some(target_pos) = ctx.targets.resolve(self.captured) else {
                        return StepOutcome::Aborted;
                    };
                    if let Some(point) = cover::select_cover(
                        nav.position(),
                        target_pos,
                        params,
                        ctx.obstacles,
                        ctx.surface,
                    ) {
                        nav.set_destination(point);
                    }
                    // A failed pass keeps the previous destination; the next
                    // cadence tick retries naturally.
                    self.timer += params.update_cadence_secs;
                    return StepOutcome::Continue;
                }

                SeqPhase::Chase => {
                    if self.timer >= params.max_chase_secs {
                        self.phase = SeqPhase::HidePostChase;
                        self.timer = 0.0;
                        continue;
                    }

                    let live_pos = live_target.and_then(|id| ctx.targets.resolve(id));
                    let Some(target_pos) = live_pos else {
                        // Target gone mid-chase: fall back to cover early.
                        self.phase = SeqPhase::HidePostChase;
                        self.timer = 0.0;
                        continue;
                    };

                    nav.set_destination(target_pos);
                    self.timer += params.update_cadence_secs;
                    return StepOutcome::Continue;
                }
            }
        }
    }
}

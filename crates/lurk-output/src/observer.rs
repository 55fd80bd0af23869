//! `SimOutputObserver<W>` — bridges `SimObserver` to an `OutputWriter`.

use lurk_core::Tick;
use lurk_nav::NavAgent;
use lurk_sim::{EnemyAgent, SimObserver};
use lurk_world::EntityRegistry;

use crate::row::{AgentStateRow, TickSummaryRow};
use crate::writer::OutputWriter;
use crate::OutputError;

/// A [`SimObserver`] that writes agent state snapshots and tick summaries to
/// any [`OutputWriter`] backend.
///
/// Errors from the writer are stored internally because `SimObserver`
/// methods have no return value.  After `sim.run()` returns, check for
/// errors with [`take_error`][Self::take_error].
pub struct SimOutputObserver<W: OutputWriter> {
    writer:     W,
    last_error: Option<OutputError>,
}

impl<W: OutputWriter> SimOutputObserver<W> {
    pub fn new(writer: W) -> Self {
        Self {
            writer,
            last_error: None,
        }
    }

    /// Take the stored write error (if any) after `sim.run()` returns.
    ///
    /// Returns `None` if all writes succeeded.
    pub fn take_error(&mut self) -> Option<OutputError> {
        self.last_error.take()
    }

    /// Unwrap the inner writer (e.g. to inspect files after the sim).
    pub fn into_writer(self) -> W {
        self.writer
    }

    fn store_err(&mut self, result: crate::OutputResult<()>) {
        if let Err(e) = result {
            // Keep only the first error.
            if self.last_error.is_none() {
                self.last_error = Some(e);
            }
        }
    }
}

impl<W: OutputWriter> SimObserver for SimOutputObserver<W> {
    fn on_tick_end(&mut self, tick: Tick, sight_events: usize) {
        let row = TickSummaryRow {
            tick:         tick.0,
            sight_events: sight_events as u64,
        };
        let result = self.writer.write_tick_summary(&row);
        self.store_err(result);
    }

    fn on_snapshot(&mut self, tick: Tick, enemies: &[EnemyAgent], _registry: &EntityRegistry) {
        let rows: Vec<AgentStateRow> = enemies
            .iter()
            .map(|enemy| {
                let pos = enemy.nav.position();
                AgentStateRow {
                    agent_id: enemy.id.0,
                    tick:     tick.0,
                    state:    enemy.controller.state().name(),
                    x:        pos.x,
                    z:        pos.z,
                }
            })
            .collect();

        if !rows.is_empty() {
            let result = self.writer.write_states(&rows);
            self.store_err(result);
        }
    }

    fn on_sim_end(&mut self, _final_tick: Tick) {
        let result = self.writer.finish();
        self.store_err(result);
    }
}

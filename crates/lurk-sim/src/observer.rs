//! Simulation observer trait for progress reporting and data collection.

use lurk_core::Tick;
use lurk_world::EntityRegistry;

use crate::EnemyAgent;

/// Callbacks invoked by [`Sim::run`][crate::Sim::run] at key points in the
/// tick loop.
///
/// All methods have default no-op implementations so implementors only need
/// to override what they care about.
///
/// # Example — progress printer
///
/// ```rust,ignore
/// struct ProgressPrinter { interval: u64 }
///
/// impl SimObserver for ProgressPrinter {
///     fn on_tick_end(&mut self, tick: Tick, events: usize) {
///         if tick.0 % self.interval == 0 {
///             println!("tick {tick}: {events} sight events");
///         }
///     }
/// }
/// ```
pub trait SimObserver {
    /// Called at the very start of each tick, before any processing.
    fn on_tick_start(&mut self, _tick: Tick) {}

    /// Called at the end of each tick.
    ///
    /// `sight_events` is the number of sight notifications delivered to
    /// behavior controllers this tick.
    fn on_tick_end(&mut self, _tick: Tick, _sight_events: usize) {}

    /// Called at snapshot intervals (every `config.output_interval_ticks`
    /// ticks).
    ///
    /// Provides read-only access to the enemy roster and the registry so
    /// output writers can record a state snapshot without the sim knowing
    /// about any specific output format.
    fn on_snapshot(&mut self, _tick: Tick, _enemies: &[EnemyAgent], _registry: &EntityRegistry) {}

    /// Called once after the final tick completes.
    fn on_sim_end(&mut self, _final_tick: Tick) {}
}

/// A [`SimObserver`] that does nothing.  Use when you need to call `run` but
/// don't want progress callbacks.
pub struct NoopObserver;

impl SimObserver for NoopObserver {}

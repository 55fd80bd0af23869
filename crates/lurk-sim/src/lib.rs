//! `lurk-sim` — tick loop orchestrator for the lurk workspace.
//!
//! # Five-phase tick loop
//!
//! ```text
//! for tick in 0..config.total_ticks:
//!   ① Sense   — each enemy's sensor scans the player roster; its events
//!               are delivered to that enemy's controller.
//!   ② Behave  — every enemy controller ticks (parallel with the
//!               `parallel` feature; world services are read-only).
//!   ③ Move    — all steering agents integrate one frame.
//!   ④ Apply   — positions write back to the registry; door triggers and
//!               tweens run; carve toggles hit the surface.
//!   ⑤ Observe — on_tick_end + periodic on_snapshot.
//! ```
//!
//! Sight events are delivered before the same tick's proximity and arrival
//! checks as an implementation detail; behaviors must only rely on "each is
//! processed exactly once per tick", not on the relative order.
//!
//! # Cargo features
//!
//! | Feature    | Effect                                              |
//! |------------|-----------------------------------------------------|
//! | `parallel` | Runs the behave phase on Rayon's thread pool.       |
//!
//! # Quick-start
//!
//! ```rust,ignore
//! use lurk_core::SimConfig;
//! use lurk_sim::{EnemySpec, NoopObserver, SimBuilder};
//!
//! let mut sim = SimBuilder::new(SimConfig::default())
//!     .surface(surface)
//!     .obstacles(obstacles)
//!     .build()?;
//! let player = sim.add_player(spawn, 4.0);
//! sim.add_enemy(EnemySpec::new(post, 3.0, route).initial_target(player))?;
//! sim.run(&mut NoopObserver);
//! ```

pub mod builder;
pub mod error;
pub mod observer;
pub mod sim;

#[cfg(test)]
mod tests;

pub use builder::SimBuilder;
pub use error::{SimError, SimResult};
pub use observer::{NoopObserver, SimObserver};
pub use sim::{DoorUnit, EnemyAgent, EnemySpec, PlayerAgent, Sim};

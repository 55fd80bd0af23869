//! `lurk-world` — the world-side behaviors around the enemy AI.
//!
//! # Crate layout
//!
//! | Module       | Contents                                                |
//! |--------------|---------------------------------------------------------|
//! | [`registry`] | `EntityRegistry` — handle → position store + resolver   |
//! | [`door`]     | `Door` rotation tween + carve toggling                  |
//! | [`trigger`]  | `DoorTrigger` — entry/exit counter over a volume        |
//! | [`player`]   | `PointClickMover` — click ray → navigation destination  |
//! | [`chaser`]   | `DirectChaser` — trivial one-destination-per-tick chase |
//!
//! Doors and triggers are command-emitting: they never touch the walkable
//! surface or each other directly.  The host loop collects `DoorCommand`s
//! from triggers and `CarveCommand`s from doors and applies them during its
//! sequential apply phase, which keeps every query service read-only while
//! behaviors run.

pub mod chaser;
pub mod door;
pub mod player;
pub mod registry;
pub mod trigger;


pub use chaser::DirectChaser;
pub use door::{CarveCommand, Door};
pub use player::PointClickMover;
pub use registry::EntityRegistry;
pub use trigger::{DoorCommand, DoorTrigger};

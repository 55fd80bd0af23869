//! `lurk-sense` — sight events and the detection sensor.
//!
//! # Crate layout
//!
//! | Module      | Contents                                             |
//! |-------------|------------------------------------------------------|
//! | [`events`]  | `SightEvent` (`Gained`/`Lost` messages)              |
//! | [`targets`] | `TargetResolver` trait (lazy handle → position)      |
//! | [`sensor`]  | `SightSensor` (radius volume + optional occlusion)   |
//!
//! # Design notes
//!
//! Sight is delivered as *messages carrying handles*, never as borrowed
//! references to the sighted entity.  Receivers keep the handle by value and
//! re-resolve it lazily; a despawned target resolves to `None` instead of
//! dangling.  The sensor itself is stateful only in the minimal sense of
//! remembering last tick's in-sight set so it can emit edge-triggered events.

pub mod events;
pub mod sensor;
pub mod targets;


pub use events::SightEvent;
pub use sensor::SightSensor;
pub use targets::TargetResolver;

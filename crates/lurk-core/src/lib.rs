//! `lurk-core` — foundational types for the `lurk` game-AI workspace.
//!
//! This crate is a dependency of every other `lurk-*` crate.  It intentionally
//! has no `lurk-*` dependencies and minimal external ones (only `glam`, plus
//! optional `serde`).
//!
//! # What lives here
//!
//! | Module   | Contents                                      |
//! |----------|-----------------------------------------------|
//! | [`ids`]  | `EntityId`, `CarveId`                         |
//! | [`time`] | `Tick`, `FrameClock`, `SimConfig`             |
//! | [`math`] | yaw-angle helpers, `Ray`, `Vec3` re-export    |
//!
//! # Feature flags
//!
//! | Flag    | Effect                                              |
//! |---------|-----------------------------------------------------|
//! | `serde` | Adds `Serialize`/`Deserialize` to all public types. |

pub mod ids;
pub mod math;
pub mod time;


// ── Re-exports ────────────────────────────────────────────────────────────────

pub use glam::Vec3;
pub use ids::{CarveId, EntityId};
pub use math::{lerp_angle, wrap_degrees, Ray};
pub use time::{FrameClock, SimConfig, Tick};

//! `lurk-nav` — navigation primitives: the mover, the walkable surface, and
//! the obstacle index.
//!
//! # Crate layout
//!
//! | Module        | Contents                                                     |
//! |---------------|--------------------------------------------------------------|
//! | [`agent`]     | `NavAgent` trait, `SteeringAgent` straight-line mover        |
//! | [`surface`]   | `SurfaceQuery` trait, `WalkableSurface` + builder, `Rect`    |
//! | [`obstacles`] | `ObstacleQuery` trait, `ObstacleIndex` (R-tree) + builder,   |
//! |               | `CategoryMask`, segment occlusion test                       |
//!
//! # Design notes
//!
//! Behaviors depend only on the three traits (`NavAgent`, `SurfaceQuery`,
//! `ObstacleQuery`); the concrete types here are reference implementations
//! good enough to run and test a level without a real navmesh backend.  All
//! query types take `&self` and are `Send + Sync` so many agents can read
//! them concurrently.
//!
//! # Feature flags
//!
//! | Flag    | Effect                                            |
//! |---------|---------------------------------------------------|
//! | `serde` | Derives `Serialize`/`Deserialize` on data types.  |

pub mod agent;
pub mod obstacles;
pub mod surface;


pub use agent::{NavAgent, SteeringAgent};
pub use obstacles::{
    CategoryMask, ObstacleHit, ObstacleIndex, ObstacleIndexBuilder, ObstacleQuery, Occluder,
};
pub use surface::{EdgeHit, Rect, SurfaceQuery, WalkableSurface, WalkableSurfaceBuilder};

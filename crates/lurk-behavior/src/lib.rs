//! `lurk-behavior` — the enemy behavior controller and concealment search.
//!
//! # Crate layout
//!
//! | Module         | Contents                                                  |
//! |----------------|-----------------------------------------------------------|
//! | [`params`]     | `TuningParameters` + range validation                     |
//! | [`state`]      | `BehaviorState`, `PatrolRoute`                            |
//! | [`context`]    | `BehaviorCtx<'a>` — shared world services for one tick    |
//! | [`sequence`]   | the resumable hide/chase/hide task                        |
//! | [`controller`] | `EnemyController` — the state machine                     |
//! | [`cover`]      | `select_cover` — the concealment-point search             |
//! | [`error`]      | `BehaviorError`, `BehaviorResult<T>`                      |
//!
//! # Design notes
//!
//! The controller consumes three injected services (`SurfaceQuery`,
//! `ObstacleQuery`, `TargetResolver`) and drives one `NavAgent`.  Nothing in
//! this crate touches a concrete world type, which is what makes the whole
//! state machine testable against scripted fakes.
//!
//! Sight is consumed as by-value [`SightEvent`] messages; target positions
//! are re-resolved from handles on every use, so stale targets degrade to a
//! defined "unavailable" result instead of dangling.

pub mod context;
pub mod controller;
pub mod cover;
pub mod error;
pub mod params;
pub mod sequence;
pub mod state;


pub use context::BehaviorCtx;
pub use controller::{EnemyController, WAYPOINT_ARRIVAL_DISTANCE};
pub use cover::{select_cover, MAX_COVER_CANDIDATES, SURFACE_SAMPLE_RADIUS};
pub use error::{BehaviorError, BehaviorResult};
pub use params::TuningParameters;
pub use state::{BehaviorState, PatrolRoute};

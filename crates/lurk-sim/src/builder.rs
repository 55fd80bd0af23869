//! Fluent builder for constructing a [`Sim`].

use lurk_nav::{ObstacleIndex, ObstacleIndexBuilder, WalkableSurface, WalkableSurfaceBuilder};
use lurk_world::EntityRegistry;

use lurk_core::SimConfig;

use crate::{Sim, SimError, SimResult};

/// Fluent builder for [`Sim`].
///
/// # Required inputs
///
/// - [`SimConfig`] — total ticks, frame duration, output interval.
///
/// # Optional inputs (have defaults)
///
/// | Method          | Default                  |
/// |-----------------|--------------------------|
/// | `.surface(s)`   | empty walkable surface   |
/// | `.obstacles(o)` | empty obstacle index     |
///
/// Agents and doors are added to the built [`Sim`] afterwards:
///
/// ```rust,ignore
/// let mut sim = SimBuilder::new(config)
///     .surface(surface)
///     .obstacles(obstacles)
///     .build()?;
/// let player = sim.add_player(spawn, 4.0);
/// sim.add_enemy(EnemySpec::new(post, 3.0, route))?;
/// sim.run(&mut NoopObserver);
/// ```
pub struct SimBuilder {
    config:    SimConfig,
    surface:   Option<WalkableSurface>,
    obstacles: Option<ObstacleIndex>,
}

impl SimBuilder {
    pub fn new(config: SimConfig) -> Self {
        Self {
            config,
            surface:   None,
            obstacles: None,
        }
    }

    /// Supply the walkable surface.  Defaults to an empty surface, on which
    /// every sample query misses (concealment searches return nothing).
    pub fn surface(mut self, surface: WalkableSurface) -> Self {
        self.surface = Some(surface);
        self
    }

    /// Supply the obstacle index.  Defaults to an empty index.
    pub fn obstacles(mut self, obstacles: ObstacleIndex) -> Self {
        self.obstacles = Some(obstacles);
        self
    }

    /// Validate the configuration and produce an empty, ready-to-populate
    /// [`Sim`].
    pub fn build(self) -> SimResult<Sim> {
        if !self.config.dt_secs.is_finite() || self.config.dt_secs <= 0.0 {
            return Err(SimError::Config(format!(
                "dt_secs = {} must be positive and finite",
                self.config.dt_secs
            )));
        }

        Ok(Sim {
            clock:     self.config.make_clock(),
            config:    self.config,
            surface:   self.surface.unwrap_or_else(|| WalkableSurfaceBuilder::new().build()),
            obstacles: self.obstacles.unwrap_or_else(|| ObstacleIndexBuilder::new().build()),
            registry:  EntityRegistry::new(),
            enemies:   Vec::new(),
            players:   Vec::new(),
            doors:     Vec::new(),
        })
    }
}

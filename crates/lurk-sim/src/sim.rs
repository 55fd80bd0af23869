//! The `Sim` struct and its tick loop.

use lurk_behavior::{BehaviorCtx, EnemyController, PatrolRoute, TuningParameters};
use lurk_core::{EntityId, FrameClock, SimConfig, Tick, Vec3};
use lurk_nav::{CategoryMask, NavAgent, ObstacleIndex, SteeringAgent, WalkableSurface};
use lurk_sense::SightSensor;
use lurk_world::{Door, DoorCommand, DoorTrigger, EntityRegistry};

use crate::{SimObserver, SimResult};

// ── Roster types ──────────────────────────────────────────────────────────────

/// One enemy: its controller, mover, and sight sensor.
pub struct EnemyAgent {
    pub id:         EntityId,
    pub controller: EnemyController,
    pub nav:        SteeringAgent,
    pub sensor:     SightSensor,
}

/// One player-controlled agent.
pub struct PlayerAgent {
    pub id:  EntityId,
    pub nav: SteeringAgent,
}

/// A door paired with the trigger volume that drives it.
pub struct DoorUnit {
    pub door:    Door,
    pub trigger: DoorTrigger,
}

/// Everything needed to spawn one enemy.
///
/// The sight sensor is sized from `params.detection_radius` — the same
/// radius the controller uses for its proximity check, so the two detection
/// paths always agree.
pub struct EnemySpec {
    pub position:        Vec3,
    pub speed:           f32,
    pub route:           PatrolRoute,
    pub params:          TuningParameters,
    /// Pre-seed the controller's tracked target (enables proximity detection
    /// before any sight event fires).
    pub initial_target:  Option<EntityId>,
    /// Treat obstacles in these categories as view blockers for the sensor.
    /// `None` makes the sensor a pure radius volume.
    pub sight_occluders: Option<CategoryMask>,
}

impl EnemySpec {
    pub fn new(position: Vec3, speed: f32, route: PatrolRoute) -> Self {
        Self {
            position,
            speed,
            route,
            params: TuningParameters::default(),
            initial_target: None,
            sight_occluders: None,
        }
    }

    pub fn params(mut self, params: TuningParameters) -> Self {
        self.params = params;
        self
    }

    pub fn initial_target(mut self, target: EntityId) -> Self {
        self.initial_target = Some(target);
        self
    }

    pub fn sight_occluders(mut self, mask: CategoryMask) -> Self {
        self.sight_occluders = Some(mask);
        self
    }
}

// ── Sim ───────────────────────────────────────────────────────────────────────

/// The main simulation runner.
///
/// `Sim` owns the shared world services and every agent, and drives the
/// five-phase tick loop:
///
/// 1. **Sense**: each enemy's sensor scans the player roster and its events
///    are delivered to that enemy's controller.
/// 2. **Behave**: every enemy controller ticks (in parallel under the
///    `parallel` feature — services are read-only during this phase).
/// 3. **Move**: all steering agents integrate one frame.
/// 4. **Apply** (sequential): positions are written back to the registry;
///    door triggers and tweens run and carve toggles hit the surface.
/// 5. **Observe**: tick-end and periodic snapshot callbacks.
///
/// Create via [`SimBuilder`][crate::SimBuilder], then populate with
/// [`add_player`][Self::add_player], [`add_enemy`][Self::add_enemy], and
/// [`add_door`][Self::add_door].
pub struct Sim {
    /// Global configuration (total ticks, frame duration, output interval).
    pub config: SimConfig,

    /// Simulation clock — tracks the current tick.
    pub clock: FrameClock,

    /// Walkable surface (mutated only in the apply phase, by carve toggles).
    pub surface: WalkableSurface,

    /// Static obstacle index.
    pub obstacles: ObstacleIndex,

    /// Handle → position store; the target resolver for every behavior.
    pub registry: EntityRegistry,

    /// All enemies, ticked in roster order.
    pub enemies: Vec<EnemyAgent>,

    /// All player agents (the entities enemies watch for).
    pub players: Vec<PlayerAgent>,

    /// All doors with their triggers.
    pub doors: Vec<DoorUnit>,
}

impl Sim {
    // ── Roster management ─────────────────────────────────────────────────

    /// Spawn a player agent and return its handle.
    pub fn add_player(&mut self, position: Vec3, speed: f32) -> EntityId {
        let id = self.registry.spawn(position);
        self.players.push(PlayerAgent {
            id,
            nav: SteeringAgent::new(position, speed),
        });
        id
    }

    /// Spawn an enemy from `spec` and start it patrolling.
    ///
    /// Fails if the spec's tuning parameters are out of range.
    pub fn add_enemy(&mut self, spec: EnemySpec) -> SimResult<EntityId> {
        let id = self.registry.spawn(spec.position);
        let mut controller = EnemyController::new(spec.route, spec.params.clone())?;
        if let Some(target) = spec.initial_target {
            controller = controller.with_tracked_target(target);
        }

        let mut sensor = SightSensor::new(spec.params.detection_radius);
        if let Some(mask) = spec.sight_occluders {
            sensor = sensor.with_occluders(mask);
        }

        let mut nav = SteeringAgent::new(spec.position, spec.speed);
        controller.start(&mut nav);

        self.enemies.push(EnemyAgent { id, controller, nav, sensor });
        Ok(id)
    }

    /// Register a door and apply its initial carve state to the surface.
    pub fn add_door(&mut self, door: Door, trigger: DoorTrigger) {
        self.surface
            .set_carve_enabled(door.carve(), door.initial_carve_blocked());
        self.doors.push(DoorUnit { door, trigger });
    }

    /// Issue a navigation destination for a player (e.g. from a ground
    /// click).  Out-of-range indices are ignored.
    pub fn command_player(&mut self, index: usize, destination: Vec3) {
        if let Some(player) = self.players.get_mut(index) {
            player.nav.set_destination(destination);
        }
    }

    // ── Public API ────────────────────────────────────────────────────────

    /// Run the simulation from the current tick to `config.end_tick()`.
    ///
    /// Calls observer hooks at every tick boundary.  Use
    /// [`NoopObserver`][crate::NoopObserver] if you don't need callbacks.
    pub fn run<O: SimObserver>(&mut self, observer: &mut O) {
        loop {
            let now = self.clock.current_tick;
            if now >= self.config.end_tick() {
                break;
            }
            self.tick_once(now, observer);
        }
        observer.on_sim_end(self.clock.current_tick);
    }

    /// Run exactly `n` ticks from the current position (ignores `end_tick`).
    ///
    /// Useful for tests and incremental stepping.
    pub fn run_ticks<O: SimObserver>(&mut self, n: u64, observer: &mut O) {
        for _ in 0..n {
            let now = self.clock.current_tick;
            self.tick_once(now, observer);
        }
    }

    fn tick_once<O: SimObserver>(&mut self, now: Tick, observer: &mut O) {
        observer.on_tick_start(now);
        let events = self.process_tick();
        observer.on_tick_end(now, events);
        if self.config.output_interval_ticks > 0
            && now.0.is_multiple_of(self.config.output_interval_ticks)
        {
            observer.on_snapshot(now, &self.enemies, &self.registry);
        }
        self.clock.advance();
    }

    // ── Core tick processing ──────────────────────────────────────────────

    fn process_tick(&mut self) -> usize {
        let dt = self.config.dt_secs;

        // ── Phase 0: snapshot the player roster ───────────────────────────
        //
        // Sensors and triggers read positions as of the start of the tick,
        // so behavior never observes a half-updated world.
        let targets: Vec<(EntityId, Vec3)> = self
            .players
            .iter()
            .map(|p| (p.id, p.nav.position()))
            .collect();

        // ── Phases 1 + 2: sense and behave ────────────────────────────────
        //
        // Explicit field borrows so the borrow checker sees the shared
        // services as disjoint from the mutable enemy roster.
        let surface   = &self.surface;
        let obstacles = &self.obstacles;
        let registry  = &self.registry;

        let behave = |enemy: &mut EnemyAgent| -> usize {
            let events = enemy
                .sensor
                .scan(enemy.nav.position(), &targets, obstacles);
            let delivered = events.len();

            let ctx = BehaviorCtx::new(dt, surface, obstacles, registry);
            for event in events {
                enemy.controller.handle_sight(event, &ctx, &mut enemy.nav);
            }
            enemy.controller.tick(&ctx, &mut enemy.nav);
            delivered
        };

        #[cfg(not(feature = "parallel"))]
        let events_delivered: usize = self.enemies.iter_mut().map(behave).sum();

        #[cfg(feature = "parallel")]
        let events_delivered: usize = {
            use rayon::prelude::*;
            self.enemies.par_iter_mut().map(behave).sum()
        };

        // ── Phase 3: move ─────────────────────────────────────────────────
        for player in &mut self.players {
            player.nav.advance(dt);
        }
        for enemy in &mut self.enemies {
            enemy.nav.advance(dt);
        }

        // ── Phase 4: apply (sequential writes) ────────────────────────────
        for player in &self.players {
            self.registry.set_position(player.id, player.nav.position());
        }
        for enemy in &self.enemies {
            self.registry.set_position(enemy.id, enemy.nav.position());
        }

        let agents: Vec<(EntityId, Vec3)> = self
            .players
            .iter()
            .map(|p| (p.id, p.nav.position()))
            .chain(self.enemies.iter().map(|e| (e.id, e.nav.position())))
            .collect();

        for unit in &mut self.doors {
            if let Some(command) = unit.trigger.update(&agents) {
                match command {
                    DoorCommand::Open { user_pos } => unit.door.open(user_pos),
                    DoorCommand::Close => unit.door.close(),
                }
            }
            if let Some(carve) = unit.door.advance(dt) {
                self.surface.set_carve_enabled(carve.carve, carve.blocked);
            }
        }

        events_delivered
    }
}

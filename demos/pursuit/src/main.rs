//! pursuit — end-to-end demo for the lurk behavior workspace.
//!
//! A 40×40 yard with scattered crates, one patrolling enemy, one
//! point-and-click player, and a triggered door in the east wall.  The
//! player is walked around by a scripted click schedule; the enemy patrols,
//! spots them, hides behind crates, chases, hides again, and resumes patrol.
//! Behavior states and per-tick sight events are recorded to CSV.

use std::path::Path;
use std::time::Instant;

use anyhow::Result;
use log::info;
use rand::rngs::SmallRng;
use rand::{Rng, SeedableRng};

use lurk_behavior::{PatrolRoute, TuningParameters};
use lurk_core::{Ray, SimConfig, Tick, Vec3};
use lurk_nav::{CategoryMask, ObstacleIndexBuilder, Rect, WalkableSurfaceBuilder};
use lurk_output::{CsvWriter, SimOutputObserver};
use lurk_sim::{EnemySpec, Sim, SimBuilder, SimObserver};
use lurk_world::{Door, DoorTrigger, PointClickMover};

// ── Constants ─────────────────────────────────────────────────────────────────

const SEED:        u64 = 42;
const DT_SECS:     f32 = 0.25;
const TOTAL_TICKS: u64 = 1_200; // 5 simulated minutes
const CRATES:      usize = 6;
const HIDABLE:     CategoryMask = CategoryMask::bit(0);

const PLAYER_SPEED: f32 = 4.0;
const ENEMY_SPEED:  f32 = 3.5;

// ── Scripted input ────────────────────────────────────────────────────────────

/// A click the "player" makes at a given tick: a top-down ray at the yard.
fn click_at(x: f32, z: f32) -> Ray {
    Ray::new(Vec3::new(x, 20.0, z), Vec3::new(0.0, -1.0, 0.0))
}

/// (tick, click ray) — walks the player toward the patrol route, through the
/// east door, and back.
fn click_schedule() -> Vec<(Tick, Ray)> {
    vec![
        (Tick(20),  click_at(26.0, 20.0)), // wander toward the middle
        (Tick(200), click_at(30.0, 9.0)),  // cross the enemy's patrol leg
        (Tick(520), click_at(39.0, 20.0)), // head for the east doorway
        (Tick(700), click_at(50.0, 20.0)), // through the door
        (Tick(900), click_at(20.0, 35.0)), // come back inside
    ]
}

// ── Observer wrapper to count rows ────────────────────────────────────────────

struct CountingObserver<O: SimObserver> {
    inner:        O,
    state_rows:   usize,
    sight_events: usize,
}

impl<O: SimObserver> CountingObserver<O> {
    fn new(inner: O) -> Self {
        Self { inner, state_rows: 0, sight_events: 0 }
    }
}

impl<O: SimObserver> SimObserver for CountingObserver<O> {
    fn on_tick_start(&mut self, tick: Tick) {
        self.inner.on_tick_start(tick);
    }

    fn on_tick_end(&mut self, tick: Tick, sight_events: usize) {
        self.sight_events += sight_events;
        self.inner.on_tick_end(tick, sight_events);
    }

    fn on_snapshot(
        &mut self,
        tick:     Tick,
        enemies:  &[lurk_sim::EnemyAgent],
        registry: &lurk_world::EntityRegistry,
    ) {
        self.state_rows += enemies.len();
        self.inner.on_snapshot(tick, enemies, registry);
    }

    fn on_sim_end(&mut self, tick: Tick) {
        self.inner.on_sim_end(tick);
    }
}

// ── World construction ────────────────────────────────────────────────────────

fn build_sim() -> Result<Sim> {
    let mut rng = SmallRng::seed_from_u64(SEED);

    let mut surface = WalkableSurfaceBuilder::new();
    // Main yard plus an east corridor behind the door.
    surface.add_island(Rect::new(0.0, 0.0, 40.0, 40.0, 0.0));
    surface.add_island(Rect::new(40.0, 15.0, 60.0, 25.0, 0.0));
    let doorway = surface.add_carve(Rect::new(38.0, 18.0, 40.0, 22.0, 0.0));

    // Scatter crates over the yard's middle band; each crate both carves the
    // surface and lands in the obstacle index as hidable cover.
    let mut obstacles = ObstacleIndexBuilder::new();
    for i in 0..CRATES {
        let x = rng.gen_range(8.0..32.0);
        let z = rng.gen_range(12.0..28.0);
        let center = Vec3::new(x, 1.0, z);
        surface.add_carve(Rect::centered(Vec3::new(x, 0.0, z), 2.0, 2.0));
        obstacles.add_obstacle(center, Vec3::new(2.0, 2.0, 2.0), HIDABLE);
        info!("crate {i} at ({x:.1}, {z:.1})");
    }

    let config = SimConfig {
        dt_secs:               DT_SECS,
        total_ticks:           TOTAL_TICKS,
        output_interval_ticks: 4, // one snapshot per simulated second
    };

    let mut sim = SimBuilder::new(config)
        .surface(surface.build())
        .obstacles(obstacles.build())
        .build()?;

    // Door in the east wall, swinging away from whoever opens it.
    let door = Door::new(Vec3::new(39.0, 0.0, 20.0), Vec3::new(1.0, 0.0, 0.0), 0.0, doorway);
    let trigger = DoorTrigger::new(Rect::new(36.0, 16.0, 44.0, 24.0, 0.0));
    sim.add_door(door, trigger);

    // One player, one patrolling enemy.
    let player = sim.add_player(Vec3::new(20.0, 0.0, 36.0), PLAYER_SPEED);
    let route = PatrolRoute::new(vec![
        Vec3::new(8.0, 0.0, 8.0),
        Vec3::new(32.0, 0.0, 8.0),
        Vec3::new(32.0, 0.0, 32.0),
        Vec3::new(8.0, 0.0, 32.0),
    ]);
    sim.add_enemy(
        EnemySpec::new(Vec3::new(8.0, 0.0, 8.0), ENEMY_SPEED, route)
            .params(TuningParameters::default())
            .initial_target(player)
            .sight_occluders(HIDABLE),
    )?;

    Ok(sim)
}

// ── main ──────────────────────────────────────────────────────────────────────

fn main() -> Result<()> {
    env_logger::init();

    println!("=== pursuit — lurk behavior demo ===");
    println!("Ticks: {TOTAL_TICKS} ({:.0} s at {DT_SECS} s/tick)  |  Seed: {SEED}", TOTAL_TICKS as f32 * DT_SECS);
    println!();

    // 1. Build the world.
    let mut sim = build_sim()?;
    println!("World: {} entities, {} crates, 1 door", sim.registry.len(), CRATES);

    // 2. Set up CSV output.
    std::fs::create_dir_all("output/pursuit")?;
    let writer = CsvWriter::new(Path::new("output/pursuit"))?;
    let mut observer = CountingObserver::new(SimOutputObserver::new(writer));

    // 3. Run tick by tick, feeding the scripted clicks.
    let clicks = click_schedule();
    let mover = PointClickMover::new(0.0);
    let t0 = Instant::now();
    let mut next_click = 0;
    for _ in 0..TOTAL_TICKS {
        let now = sim.clock.current_tick;
        while next_click < clicks.len() && clicks[next_click].0 == now {
            let ray = clicks[next_click].1;
            mover.click(ray, &mut sim.players[0].nav);
            next_click += 1;
        }
        sim.run_ticks(1, &mut observer);
    }
    observer.on_sim_end(sim.clock.current_tick);
    let elapsed = t0.elapsed();

    if let Some(e) = observer.inner.take_error() {
        eprintln!("output error: {e}");
    }

    // 4. Summary.
    println!("Simulation complete in {:.3} s", elapsed.as_secs_f64());
    println!("  agent_states.csv  : {} rows", observer.state_rows);
    println!("  sight events total: {}", observer.sight_events);
    println!();

    println!("{:<8} {:<20} {:<10} {:<8}", "Enemy", "State", "Waypoint", "Pos");
    println!("{}", "-".repeat(50));
    for enemy in &sim.enemies {
        use lurk_nav::NavAgent;
        let pos = enemy.nav.position();
        println!(
            "{:<8} {:<20} {:<10} ({:.1}, {:.1})",
            enemy.id.0,
            enemy.controller.state().name(),
            enemy.controller.route().current_index(),
            pos.x,
            pos.z,
        );
    }
    println!(
        "Door: {}  |  doorway carved: {}",
        if sim.doors[0].door.is_open() { "open" } else { "closed" },
        sim.surface.carve_enabled(sim.doors[0].door.carve()),
    );

    Ok(())
}

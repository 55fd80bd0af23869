//! Integration tests for lurk-sim.
//!
//! These drive the full loop: sensor → controller → mover → registry →
//! doors, over real surface and obstacle geometry.

use lurk_behavior::{BehaviorState, PatrolRoute, TuningParameters};
use lurk_core::{SimConfig, Tick, Vec3};
use lurk_nav::{CategoryMask, NavAgent, ObstacleIndexBuilder, Rect, WalkableSurfaceBuilder};
use lurk_world::{Door, DoorTrigger};

use crate::{EnemySpec, NoopObserver, SimBuilder, SimObserver};

const HIDABLE: CategoryMask = CategoryMask::bit(0);

/// 0.25 s frames, aligned with the default behavior cadence.
fn quarter_second_config(total_ticks: u64) -> SimConfig {
    SimConfig {
        dt_secs:               0.25,
        total_ticks,
        output_interval_ticks: 1,
    }
}

/// Short phases for fast tests; cover is allowed close to the target.
fn fast_params() -> TuningParameters {
    TuningParameters {
        max_hide_secs:       1.0,
        max_chase_secs:      1.0,
        min_target_distance: 1.0,
        ..TuningParameters::default()
    }
}

/// 40×40 yard with one 2×2×2 crate at (10, 20), carved and indexed.
fn yard() -> (lurk_nav::WalkableSurface, lurk_nav::ObstacleIndex) {
    let mut sb = WalkableSurfaceBuilder::new();
    sb.add_island(Rect::new(0.0, 0.0, 40.0, 40.0, 0.0));
    sb.add_carve(Rect::new(9.0, 19.0, 11.0, 21.0, 0.0));

    let mut ob = ObstacleIndexBuilder::new();
    ob.add_obstacle(Vec3::new(10.0, 1.0, 20.0), Vec3::new(2.0, 2.0, 2.0), HIDABLE);

    (sb.build(), ob.build())
}

// ── Builder validation ────────────────────────────────────────────────────────

#[cfg(test)]
mod builder_tests {
    use super::*;

    #[test]
    fn builds_with_defaults() {
        let sim = SimBuilder::new(quarter_second_config(10)).build().unwrap();
        assert!(sim.enemies.is_empty());
        assert!(sim.registry.is_empty());
        assert_eq!(sim.clock.current_tick, Tick(0));
    }

    #[test]
    fn zero_dt_rejected() {
        let config = SimConfig { dt_secs: 0.0, ..quarter_second_config(10) };
        assert!(SimBuilder::new(config).build().is_err());
    }

    #[test]
    fn bad_enemy_params_rejected() {
        let mut sim = SimBuilder::new(quarter_second_config(10)).build().unwrap();
        let bad = TuningParameters { detection_radius: -1.0, ..TuningParameters::default() };
        let spec = EnemySpec::new(Vec3::ZERO, 3.0, PatrolRoute::empty()).params(bad);
        assert!(sim.add_enemy(spec).is_err());
    }
}

// ── Patrol ────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod patrol_tests {
    use super::*;

    #[test]
    fn enemy_walks_its_route_and_wraps() {
        let (surface, obstacles) = yard();
        let mut sim = SimBuilder::new(quarter_second_config(100))
            .surface(surface)
            .obstacles(obstacles)
            .build()
            .unwrap();

        // Speed 4 covers 1 unit per 0.25 s tick; the two posts are 5 apart.
        let route = PatrolRoute::new(vec![Vec3::new(5.0, 0.0, 5.0), Vec3::new(10.0, 0.0, 5.0)]);
        sim.add_enemy(EnemySpec::new(Vec3::new(5.0, 0.0, 5.0), 4.0, route)).unwrap();

        // Tick 1 arrives at the spawn waypoint and heads for the second.
        sim.run_ticks(1, &mut NoopObserver);
        assert_eq!(sim.enemies[0].controller.route().current_index(), 1);
        assert_eq!(
            sim.enemies[0].nav.destination(),
            Some(Vec3::new(10.0, 0.0, 5.0))
        );

        // Five more ticks covers the 5 units; the next arrival wraps back.
        sim.run_ticks(5, &mut NoopObserver);
        assert_eq!(sim.enemies[0].controller.route().current_index(), 0);
        assert_eq!(sim.enemies[0].controller.state(), BehaviorState::Patrolling);
    }

    #[test]
    fn empty_route_enemy_holds_position() {
        let mut sim = SimBuilder::new(quarter_second_config(50)).build().unwrap();
        sim.add_enemy(EnemySpec::new(Vec3::new(3.0, 0.0, 3.0), 4.0, PatrolRoute::empty()))
            .unwrap();
        sim.run_ticks(50, &mut NoopObserver);
        assert_eq!(sim.enemies[0].nav.position(), Vec3::new(3.0, 0.0, 3.0));
        assert_eq!(sim.enemies[0].controller.state(), BehaviorState::Patrolling);
    }
}

// ── Detection and recovery ────────────────────────────────────────────────────

#[cfg(test)]
mod detection_tests {
    use super::*;

    /// Observer that tallies delivered sight events.
    #[derive(Default)]
    struct EventTally {
        per_tick: Vec<usize>,
    }

    impl SimObserver for EventTally {
        fn on_tick_end(&mut self, _tick: Tick, sight_events: usize) {
            self.per_tick.push(sight_events);
        }
    }

    #[test]
    fn sighting_interrupts_patrol_and_loss_resumes_it() {
        let (surface, obstacles) = yard();
        let mut sim = SimBuilder::new(quarter_second_config(100))
            .surface(surface)
            .obstacles(obstacles)
            .build()
            .unwrap();

        // Stationary player 4 units from the enemy post (inside the 10-unit
        // sensor radius).
        sim.add_player(Vec3::new(24.0, 0.0, 5.0), 0.0);
        let route = PatrolRoute::new(vec![Vec3::new(20.0, 0.0, 5.0)]);
        sim.add_enemy(
            EnemySpec::new(Vec3::new(20.0, 0.0, 5.0), 3.0, route).params(fast_params()),
        )
        .unwrap();

        let mut tally = EventTally::default();
        sim.run_ticks(2, &mut tally);
        assert_eq!(tally.per_tick, vec![1, 0], "one Gained event, then steady state");
        assert_eq!(
            sim.enemies[0].controller.state(),
            BehaviorState::HidingPreChase
        );

        // The player blinks out of range: the sensor reports Lost and the
        // controller resumes patrol within the same tick.
        sim.players[0].nav.place(Vec3::new(200.0, 0.0, 5.0));
        sim.run_ticks(1, &mut tally);
        assert_eq!(tally.per_tick[2], 1, "one Lost event");
        assert_eq!(sim.enemies[0].controller.state(), BehaviorState::Patrolling);
    }

    #[test]
    fn enemy_takes_cover_behind_the_crate() {
        let (surface, obstacles) = yard();
        let mut sim = SimBuilder::new(quarter_second_config(100))
            .surface(surface)
            .obstacles(obstacles)
            .build()
            .unwrap();

        // Player north-east of the crate; enemy south of it.
        sim.add_player(Vec3::new(10.0, 0.0, 22.0), 0.0);
        let route = PatrolRoute::new(vec![Vec3::new(10.0, 0.0, 14.0)]);
        sim.add_enemy(
            EnemySpec::new(Vec3::new(10.0, 0.0, 14.0), 2.0, route).params(fast_params()),
        )
        .unwrap();

        sim.run_ticks(1, &mut NoopObserver);
        assert_eq!(
            sim.enemies[0].controller.state(),
            BehaviorState::HidingPreChase
        );
        // The concealment search lands on the crate carve's west edge.
        assert_eq!(
            sim.enemies[0].nav.destination(),
            Some(Vec3::new(9.0, 0.0, 20.0))
        );
    }
}

// ── Doors ─────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod door_tests {
    use super::*;

    #[test]
    fn door_opens_for_the_first_agent_and_closes_after_the_last() {
        let mut sb = WalkableSurfaceBuilder::new();
        sb.add_island(Rect::new(0.0, 0.0, 40.0, 40.0, 0.0));
        let doorway = sb.add_carve(Rect::new(19.0, 0.0, 21.0, 2.0, 0.0));

        let mut sim = SimBuilder::new(quarter_second_config(100))
            .surface(sb.build())
            .build()
            .unwrap();

        let door = Door::new(Vec3::new(20.0, 0.0, 1.0), Vec3::new(0.0, 0.0, 1.0), 0.0, doorway);
        let trigger = DoorTrigger::new(Rect::new(17.0, -2.0, 23.0, 4.0, 0.0));
        sim.add_door(door, trigger);
        assert!(sim.surface.carve_enabled(doorway), "closed door blocks the doorway");

        // A player standing in the trigger volume opens the door; the carve
        // clears once the 1-second swing completes (4 quarter-second ticks).
        sim.add_player(Vec3::new(20.0, 0.0, 3.0), 0.0);
        sim.run_ticks(3, &mut NoopObserver);
        assert!(sim.doors[0].door.is_open());
        assert!(sim.surface.carve_enabled(doorway), "swing not finished yet");

        sim.run_ticks(1, &mut NoopObserver);
        assert!(!sim.surface.carve_enabled(doorway), "open door stops carving");

        // The player leaves: the door closes and the carve comes back.
        sim.players[0].nav.place(Vec3::new(20.0, 0.0, 30.0));
        sim.run_ticks(5, &mut NoopObserver);
        assert!(!sim.doors[0].door.is_open());
        assert!(sim.surface.carve_enabled(doorway));
    }
}

// ── Observer plumbing ─────────────────────────────────────────────────────────

#[cfg(test)]
mod observer_tests {
    use super::*;

    #[derive(Default)]
    struct Counts {
        starts:    usize,
        ends:      usize,
        snapshots: usize,
        sim_ends:  usize,
    }

    impl SimObserver for Counts {
        fn on_tick_start(&mut self, _t: Tick) {
            self.starts += 1;
        }
        fn on_tick_end(&mut self, _t: Tick, _e: usize) {
            self.ends += 1;
        }
        fn on_snapshot(
            &mut self,
            _t: Tick,
            _enemies: &[crate::EnemyAgent],
            _registry: &lurk_world::EntityRegistry,
        ) {
            self.snapshots += 1;
        }
        fn on_sim_end(&mut self, _t: Tick) {
            self.sim_ends += 1;
        }
    }

    #[test]
    fn hooks_fire_once_per_tick() {
        let mut sim = SimBuilder::new(quarter_second_config(7)).build().unwrap();
        let mut counts = Counts::default();
        sim.run(&mut counts);
        assert_eq!(counts.starts, 7);
        assert_eq!(counts.ends, 7);
        assert_eq!(counts.snapshots, 7, "interval 1 snapshots every tick");
        assert_eq!(counts.sim_ends, 1);
        assert_eq!(sim.clock.current_tick, Tick(7));
    }

    #[test]
    fn snapshot_interval_thins_snapshots() {
        let config = SimConfig {
            output_interval_ticks: 3,
            ..quarter_second_config(7)
        };
        let mut sim = SimBuilder::new(config).build().unwrap();
        let mut counts = Counts::default();
        sim.run(&mut counts);
        // Ticks 0, 3, and 6 are multiples of the interval.
        assert_eq!(counts.snapshots, 3);
    }

    #[test]
    fn run_ticks_ignores_end_tick() {
        let mut sim = SimBuilder::new(quarter_second_config(2)).build().unwrap();
        sim.run_ticks(5, &mut NoopObserver);
        assert_eq!(sim.clock.current_tick, Tick(5));
    }
}

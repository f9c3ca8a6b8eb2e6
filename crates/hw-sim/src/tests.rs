//! Unit tests for hw-sim.

use std::collections::{HashSet, VecDeque};

use hw_agent::{SideLane, Vehicle};
use hw_behavior::{BehaviorModel, HighwayRules, Neighbor, RoadContext, StepOutcome};
use hw_core::{Cell, SimConfig, Tick, VehicleId};
use hw_grid::{Grid, GridError, GridResult, Occupancy};
use hw_schedule::ScheduleError;

use crate::{
    NoopObserver, SimBuilder, SimError, SimObserver, Simulation, SpawnRng, SpawnSource,
    TickSummary,
};

// ── Helpers ───────────────────────────────────────────────────────────────────

/// Replays fixed draws.  Once exhausted it never spawns and picks the centre.
#[derive(Default)]
struct Script {
    outcomes: VecDeque<u32>,
    lanes:    VecDeque<u32>,
    draws:    usize,
}

impl Script {
    fn new(outcomes: &[u32], lanes: &[u32]) -> Self {
        Self {
            outcomes: outcomes.iter().copied().collect(),
            lanes:    lanes.iter().copied().collect(),
            draws:    0,
        }
    }
}

impl SpawnSource for Script {
    fn outcome(&mut self) -> u32 {
        self.draws += 1;
        self.outcomes.pop_front().unwrap_or(4)
    }

    fn lane(&mut self, lanes: u32) -> u32 {
        self.lanes.pop_front().unwrap_or(lanes / 2)
    }

    fn preference(&mut self) -> SideLane {
        SideLane::Left
    }
}

fn config(length: u32, spawn_ticks: u32) -> SimConfig {
    SimConfig { length, spawn_ticks, ..SimConfig::default() }
}

fn scripted(config: SimConfig, script: Script) -> Simulation<Script> {
    SimBuilder::new(config, script, HighwayRules).build().unwrap()
}

fn steps<S: SpawnSource, B: BehaviorModel>(sim: &mut Simulation<S, B>, n: usize) -> Vec<TickSummary> {
    (0..n).map(|_| sim.step().unwrap()).collect()
}

/// Grid and roster agree, every live vehicle is in bounds, no cell is shared.
fn assert_consistent<S: SpawnSource, B: BehaviorModel>(sim: &Simulation<S, B>) {
    let grid = sim.grid();
    let mut seen = HashSet::new();
    for v in sim.scheduler().iter() {
        let Some(cell) = v.position else { continue };
        assert!(!grid.is_out_of_bounds(cell), "{} out of bounds at {cell}", v.id);
        assert!(seen.insert(cell), "{cell} held twice");
        assert_eq!(grid.occupant(cell), Some(v.id));
    }
    assert_eq!(seen.len(), grid.occupied_count());
    assert_eq!(seen.len(), sim.scheduler().live_count());
}

// ── Movement through the full loop ────────────────────────────────────────────

#[cfg(test)]
mod movement {
    use super::*;

    #[test]
    fn lone_vehicle_crosses_and_leaves_a_short_road() {
        let cfg = SimConfig { lanes: 3, max_speed: 2, ..config(10, 0) };
        let lone = Vehicle::new(VehicleId(900), 2, SideLane::Left);
        let mut sim = SimBuilder::new(cfg, Script::default(), HighwayRules)
            .initial_vehicles(vec![(lone, Cell::new(1, 0))])
            .build()
            .unwrap();

        sim.step().unwrap();
        assert_eq!(sim.scheduler().get(VehicleId(900)).unwrap().position, Some(Cell::new(1, 2)));

        let columns: Vec<_> = (0..3)
            .map(|_| {
                sim.step().unwrap();
                sim.scheduler().get(VehicleId(900)).unwrap().position.unwrap().column
            })
            .collect();
        assert_eq!(columns, vec![4, 6, 8]);

        let last = sim.step().unwrap();
        assert_eq!(last.exited, vec![VehicleId(900)]);
        assert_eq!(last.live, 0);
        assert!(!sim.scheduler().get(VehicleId(900)).unwrap().is_on_road());
        assert_eq!(sim.grid().occupied_count(), 0);
    }

    #[test]
    fn traffic_keeps_moving_after_spawning_ends() {
        let mut sim = scripted(config(30, 3), Script::new(&[0, 0, 0], &[0, 1, 2]));

        let spawning = steps(&mut sim, 3);
        let ids: Vec<_> = spawning.iter().map(|s| s.spawned).collect();
        assert_eq!(ids, vec![Some(VehicleId(3)), Some(VehicleId(2)), Some(VehicleId(1))]);
        assert_eq!(sim.remaining_spawn_ticks(), 0);

        let mut exited = Vec::new();
        for summary in steps(&mut sim, 20) {
            assert_eq!(summary.spawned, None);
            assert_eq!(summary.remaining_spawn_ticks, 0);
            exited.extend(summary.exited);
            assert_consistent(&sim);
        }
        exited.sort();
        assert_eq!(exited, vec![VehicleId(1), VehicleId(2), VehicleId(3)]);
        assert_eq!(sim.scheduler().len(), 3, "tombstones stay until pruned");
        assert_eq!(sim.prune_departed(), 3);
        assert!(sim.scheduler().is_empty());
    }

    #[test]
    fn long_seeded_run_holds_single_occupancy() {
        let cfg = SimConfig {
            length: 300,
            spawn_ticks: 250,
            locked_window: 80,
            brake_column: 150,
            ..SimConfig::default()
        };
        let mut sim = Simulation::from_config(cfg).unwrap();
        for _ in 0..400 {
            sim.step().unwrap();
            assert_consistent(&sim);
            assert!(sim.scheduler().iter().filter(|v| v.is_locked()).count() <= 1);
        }
        assert!(!sim.is_halted());
    }
}

// ── Spawn policy ──────────────────────────────────────────────────────────────

#[cfg(test)]
mod spawning {
    use super::*;

    #[test]
    fn first_tick_always_spawns() {
        let mut sim = scripted(config(1_000, 5), Script::new(&[4], &[0]));
        let summary = sim.step().unwrap();
        assert_eq!(summary.spawned, Some(VehicleId(5)));
        assert_eq!(summary.remaining_spawn_ticks, 4);
        // Spawned at the entry cell, then stepped in the same tick.
        let v = sim.scheduler().get(VehicleId(5)).unwrap();
        assert_eq!(v.position, Some(Cell::new(0, 4)));
        assert_eq!(v.speed, 4);
    }

    #[test]
    fn only_two_outcomes_spawn() {
        let mut sim = scripted(config(1_000, 6), Script::new(&[4, 2, 3, 1, 0, 4], &[0, 2, 1]));
        let ids: Vec<_> = steps(&mut sim, 6).into_iter().map(|s| s.spawned).collect();
        assert_eq!(
            ids,
            vec![Some(VehicleId(6)), None, None, Some(VehicleId(3)), Some(VehicleId(2)), None]
        );
        assert_eq!(sim.scheduler().get(VehicleId(3)).unwrap().position.unwrap().lane, 2);
        assert_eq!(sim.scheduler().get(VehicleId(2)).unwrap().position.unwrap().lane, 1);
    }

    #[test]
    fn countdown_stops_drawing_at_zero() {
        let mut sim = scripted(config(1_000, 2), Script::new(&[0, 0, 0, 0], &[]));
        steps(&mut sim, 5);
        assert_eq!(sim.remaining_spawn_ticks(), 0);
        assert_eq!(sim.source.draws, 2);
    }

    #[test]
    fn blocked_entry_skips_the_spawn() {
        let parked = Vehicle::new(VehicleId(900), 0, SideLane::Left).locked(0);
        let blocker = Vehicle::new(VehicleId(901), 0, SideLane::Left);
        let mut sim = SimBuilder::new(config(1_000, 3), Script::new(&[0, 0], &[0, 0]), HighwayRules)
            .initial_vehicles(vec![(parked, Cell::new(0, 1)), (blocker, Cell::new(0, 0))])
            .build()
            .unwrap();

        let summary = sim.step().unwrap();
        assert_eq!(summary.spawned, None);
        assert_eq!(summary.remaining_spawn_ticks, 2);
        assert_eq!(sim.scheduler().len(), 2);
        assert_consistent(&sim);
    }
}

// ── Locked selection ──────────────────────────────────────────────────────────

#[cfg(test)]
mod locked {
    use super::*;

    #[test]
    fn first_centre_spawn_inside_the_window_is_locked_once() {
        let cfg = SimConfig { locked_window: 4, ..config(1_000, 10) };
        let lanes = [0, 2, 0, 2, 0, 2, 0, 1, 1, 1];
        let mut sim = scripted(cfg, Script::new(&[0; 10], &lanes));

        let summaries = steps(&mut sim, 10);
        let flagged: Vec<_> = summaries
            .iter()
            .filter(|s| s.spawned_locked)
            .map(|s| (s.tick, s.spawned))
            .collect();
        assert_eq!(flagged, vec![(Tick(7), Some(VehicleId(3)))]);
        assert_eq!(sim.locked_vehicle(), Some(VehicleId(3)));

        let locked: Vec<_> = sim.scheduler().iter().filter(|v| v.is_locked()).collect();
        assert_eq!(locked.len(), 1);
        assert_eq!(locked[0].position.unwrap().lane, 1);
        assert!(!sim.scheduler().get(VehicleId(4)).unwrap().is_locked(), "side lane, not eligible");
        assert!(!sim.scheduler().get(VehicleId(2)).unwrap().is_locked(), "already assigned");
    }

    #[test]
    fn centre_spawns_before_the_window_are_not_locked() {
        let cfg = SimConfig { locked_window: 2, ..config(1_000, 6) };
        let mut sim = scripted(cfg, Script::new(&[0, 4, 4, 4, 4, 4], &[1]));
        steps(&mut sim, 6);
        assert_eq!(sim.locked_vehicle(), None);
        assert!(sim.scheduler().iter().all(|v| !v.is_locked()));
    }

    #[test]
    fn initial_locked_vehicle_blocks_a_second_lock() {
        let cfg = SimConfig { locked_window: 10, ..config(1_000, 10) };
        let early = Vehicle::new(VehicleId(1000), 4, SideLane::Left).locked(6);
        let mut sim = SimBuilder::new(cfg, Script::new(&[0; 10], &[1; 10]), HighwayRules)
            .initial_vehicles(vec![(early, Cell::new(1, 50))])
            .build()
            .unwrap();
        assert!(sim.spawner.locked_assigned());

        let summaries = steps(&mut sim, 10);
        assert!(summaries.iter().all(|s| !s.spawned_locked));
        assert!(summaries.iter().all(|s| s.spawned.is_some()), "centre entry is free every tick");
        assert_eq!(sim.locked_vehicle(), Some(VehicleId(1000)));

        let locked: Vec<_> = sim.scheduler().iter().filter(|v| v.is_locked()).map(|v| v.id).collect();
        assert_eq!(locked, vec![VehicleId(1000)]);
    }
}

// ── Observers ─────────────────────────────────────────────────────────────────

#[cfg(test)]
mod observing {
    use super::*;

    #[derive(Default)]
    struct Frames {
        starts: Vec<Tick>,
        frames: Vec<(Tick, Occupancy)>,
        ends:   Vec<TickSummary>,
        final_tick: Option<Tick>,
    }

    impl SimObserver for Frames {
        fn on_tick_start(&mut self, tick: Tick) {
            self.starts.push(tick);
        }

        fn on_occupancy(&mut self, tick: Tick, grid: &Grid) {
            assert_eq!(grid.occupancy(), grid.occupancy());
            self.frames.push((tick, grid.occupancy()));
        }

        fn on_tick_end(&mut self, summary: &TickSummary) {
            self.ends.push(summary.clone());
        }

        fn on_sim_end(&mut self, final_tick: Tick) {
            self.final_tick = Some(final_tick);
        }
    }

    #[test]
    fn occupancy_is_taken_after_spawning_and_before_moving() {
        let mut sim = scripted(config(50, 5), Script::new(&[0], &[2]));
        let mut obs = Frames::default();
        sim.step_observed(&mut obs).unwrap();

        let (tick, frame) = &obs.frames[0];
        assert_eq!(*tick, Tick(0));
        assert_eq!(frame.get(2, 0), 1);
        assert_eq!(frame.count(), 1);
        assert_eq!(sim.grid().occupancy().get(2, 0), 0, "moved after the frame");
    }

    #[test]
    fn run_stops_at_the_configured_end() {
        let cfg = SimConfig { total_ticks: 7, ..config(100, 3) };
        let mut sim = scripted(cfg, Script::default());
        let mut obs = Frames::default();
        sim.run(&mut obs).unwrap();

        assert_eq!(sim.current_tick(), Tick(7));
        assert_eq!(obs.starts, (0..7).map(Tick).collect::<Vec<_>>());
        assert_eq!(obs.ends.len(), 7);
        assert_eq!(obs.frames.len(), 7);
        assert_eq!(obs.final_tick, Some(Tick(7)));
    }

    #[test]
    fn run_ticks_ignores_the_configured_end() {
        let cfg = SimConfig { total_ticks: 2, ..config(100, 0) };
        let mut sim = scripted(cfg, Script::default());
        sim.run_ticks(5, &mut NoopObserver).unwrap();
        assert_eq!(sim.current_tick(), Tick(5));
    }
}

// ── Construction and failure ──────────────────────────────────────────────────

#[cfg(test)]
mod failure {
    use super::*;

    /// Shoves every vehicle one cell forward without looking.
    struct Shove;

    impl BehaviorModel for Shove {
        fn step(
            &self,
            vehicle:    &mut Vehicle,
            _neighbors: &[Neighbor],
            grid:       &mut Grid,
            _ctx:       &RoadContext,
        ) -> GridResult<StepOutcome> {
            let from = vehicle.position.unwrap();
            let to = from.ahead(1);
            grid.move_vehicle(vehicle, to)?;
            Ok(StepOutcome::Advanced { from, to })
        }
    }

    #[test]
    fn invalid_config_is_rejected() {
        let cfg = SimConfig { lanes: 4, ..SimConfig::default() };
        let err = SimBuilder::new(cfg, Script::default(), HighwayRules).build().err().unwrap();
        assert!(matches!(err, SimError::Config(_)));
    }

    #[test]
    fn overlapping_initial_vehicles_are_rejected() {
        let a = Vehicle::new(VehicleId(900), 1, SideLane::Left);
        let b = Vehicle::new(VehicleId(901), 1, SideLane::Left);
        let err = SimBuilder::new(config(50, 0), Script::default(), HighwayRules)
            .initial_vehicles(vec![(a, Cell::new(1, 3)), (b, Cell::new(1, 3))])
            .build()
            .err()
            .unwrap();
        assert!(matches!(err, SimError::Grid(GridError::OccupiedCell { .. })));
    }

    #[test]
    fn collision_halts_the_simulation() {
        let rear = Vehicle::new(VehicleId(900), 1, SideLane::Left);
        let front = Vehicle::new(VehicleId(901), 1, SideLane::Left);
        let mut sim = SimBuilder::new(config(50, 0), Script::default(), Shove)
            .initial_vehicles(vec![(rear, Cell::new(1, 3)), (front, Cell::new(1, 4))])
            .build()
            .unwrap();

        let err = sim.step().unwrap_err();
        let SimError::InvariantViolation { tick, source, dump } = err else {
            panic!("expected an invariant violation, got {err:?}");
        };
        assert_eq!(tick, Tick(0));
        assert_eq!(source.grid_error(), Some(&GridError::OccupiedCell {
            cell:     Cell::new(1, 4),
            occupant: VehicleId(901),
        }));
        assert!(dump.contains("VehicleId(900)"));
        assert!(dump.contains("VehicleId(901)"));
        assert!(sim.is_halted());
        assert!(matches!(sim.step(), Err(SimError::Halted)));
    }

    #[test]
    fn spawn_id_clash_halts_the_simulation() {
        let early = Vehicle::new(VehicleId(2), 1, SideLane::Left);
        let mut sim = SimBuilder::new(config(1_000, 3), Script::new(&[0, 0], &[0, 2]), HighwayRules)
            .initial_vehicles(vec![(early, Cell::new(1, 10))])
            .build()
            .unwrap();

        sim.step().unwrap();
        let err = sim.step().unwrap_err();
        assert!(matches!(
            err,
            SimError::InvariantViolation { source: ScheduleError::DuplicateVehicle(VehicleId(2)), .. }
        ));
        assert!(sim.is_halted());
    }
}

// ── Determinism ───────────────────────────────────────────────────────────────

#[cfg(test)]
mod determinism {
    use super::*;

    fn trace(seed: u64) -> (Vec<TickSummary>, Occupancy) {
        let cfg = SimConfig {
            seed,
            length: 200,
            spawn_ticks: 120,
            locked_window: 40,
            brake_column: 100,
            ..SimConfig::default()
        };
        let mut sim = Simulation::from_config(cfg).unwrap();
        let summaries = steps(&mut sim, 200);
        (summaries, sim.grid().occupancy())
    }

    #[test]
    fn same_seed_same_run() {
        assert_eq!(trace(11), trace(11));
    }

    #[test]
    fn explicit_stream_seeds_replay() {
        let run = |outcome_seed, lane_seed| {
            let source = SpawnRng::from_seeds(outcome_seed, lane_seed);
            let mut sim = SimBuilder::new(config(200, 50), source, HighwayRules).build().unwrap();
            steps(&mut sim, 60).into_iter().map(|s| s.spawned).collect::<Vec<_>>()
        };
        assert_eq!(run(1, 2), run(1, 2));
    }
}

//! The `Simulation` struct and its tick loop.

use std::fmt::Write as _;

use hw_behavior::{BehaviorModel, HighwayRules, RoadContext};
use hw_core::{SimClock, SimConfig, Tick, VehicleId};
use hw_grid::Grid;
use hw_schedule::{ScheduleError, Scheduler};
use tracing::{debug, error};

use crate::{
    NoopObserver, SimBuilder, SimError, SimObserver, SimResult, SpawnPolicy, SpawnRng,
    SpawnSource, TickSummary,
};

/// The main simulation runner.
///
/// Owns the grid, the scheduler (and through it every vehicle), the spawn
/// policy, and the random source.  Create via [`SimBuilder`] or
/// [`Simulation::from_config`].
pub struct Simulation<S: SpawnSource, B: BehaviorModel = HighwayRules> {
    /// Global configuration (road size, spawn window, thresholds, …).
    pub config: SimConfig,

    /// Current tick and run start time.
    pub clock: SimClock,

    pub(crate) grid:      Grid,
    pub(crate) scheduler: Scheduler,
    pub(crate) spawner:   SpawnPolicy,
    pub(crate) source:    S,
    pub(crate) behavior:  B,
    pub(crate) ctx:       RoadContext,
    pub(crate) locked:    Option<VehicleId>,
    pub(crate) halted:    bool,
}

impl Simulation<SpawnRng, HighwayRules> {
    /// The standard model: seeded spawn RNG and the highway rules.
    pub fn from_config(config: SimConfig) -> SimResult<Self> {
        let source = SpawnRng::new(config.seed);
        SimBuilder::new(config, source, HighwayRules).build()
    }
}

impl<S: SpawnSource, B: BehaviorModel> Simulation<S, B> {
    // ── Read access ───────────────────────────────────────────────────────

    #[inline]
    pub fn grid(&self) -> &Grid {
        &self.grid
    }

    #[inline]
    pub fn scheduler(&self) -> &Scheduler {
        &self.scheduler
    }

    #[inline]
    pub fn road(&self) -> &RoadContext {
        &self.ctx
    }

    #[inline]
    pub fn current_tick(&self) -> Tick {
        self.clock.current_tick
    }

    /// Ticks of spawning left; zero means no vehicle will ever be created again.
    #[inline]
    pub fn remaining_spawn_ticks(&self) -> u32 {
        self.spawner.remaining()
    }

    /// The locked vehicle, once chosen.
    #[inline]
    pub fn locked_vehicle(&self) -> Option<VehicleId> {
        self.locked
    }

    /// `true` after an invariant violation; every later tick fails.
    #[inline]
    pub fn is_halted(&self) -> bool {
        self.halted
    }

    // ── Tick loop ─────────────────────────────────────────────────────────

    /// Advance exactly one tick with no observer.
    pub fn step(&mut self) -> SimResult<TickSummary> {
        self.step_observed(&mut NoopObserver)
    }

    /// Advance exactly one tick, reporting to `observer`.
    pub fn step_observed<O: SimObserver>(&mut self, observer: &mut O) -> SimResult<TickSummary> {
        if self.halted {
            return Err(SimError::Halted);
        }
        let now = self.clock.current_tick;
        observer.on_tick_start(now);

        // ── Phase 1: spawn ────────────────────────────────────────────────
        let first_tick = self.clock.is_first_tick();
        let spawned = match self.spawner.apply(
            first_tick,
            &mut self.grid,
            &mut self.scheduler,
            &mut self.source,
        ) {
            Ok(s) => s,
            Err(e) => return Err(self.fail(now, e)),
        };
        if let Some(s) = spawned.filter(|s| s.locked) {
            self.locked = Some(s.id);
        }

        // ── Phase 2: occupancy snapshot ───────────────────────────────────
        observer.on_occupancy(now, &self.grid);

        // ── Phase 3: step every live vehicle ──────────────────────────────
        let report = match self.scheduler.step(&mut self.grid, &self.behavior, &self.ctx) {
            Ok(r) => r,
            Err(e) => return Err(self.fail(now, e)),
        };
        for id in &report.exited {
            debug!(%id, tick = %now, "vehicle left the road");
        }

        let summary = TickSummary {
            tick:                  now,
            spawned:               spawned.map(|s| s.id),
            spawned_locked:        spawned.is_some_and(|s| s.locked),
            live:                  self.scheduler.live_count(),
            lane_changes:          report.lane_changes,
            exited:                report.exited,
            remaining_spawn_ticks: self.spawner.remaining(),
        };
        observer.on_tick_end(&summary);

        self.clock.advance();
        Ok(summary)
    }

    /// Run exactly `n` ticks from the current position (ignores `total_ticks`).
    pub fn run_ticks<O: SimObserver>(&mut self, n: u64, observer: &mut O) -> SimResult<()> {
        for _ in 0..n {
            self.step_observed(observer)?;
        }
        Ok(())
    }

    /// Run from the current tick to `config.end_tick()`.
    pub fn run<O: SimObserver>(&mut self, observer: &mut O) -> SimResult<()> {
        while self.clock.current_tick < self.config.end_tick() {
            self.step_observed(observer)?;
        }
        observer.on_sim_end(self.clock.current_tick);
        Ok(())
    }

    /// Drop vehicles that have left the road from the roster.
    ///
    /// Returns how many were dropped.
    pub fn prune_departed(&mut self) -> usize {
        self.scheduler.prune_departed().len()
    }

    // ── Failure ───────────────────────────────────────────────────────────

    fn fail(&mut self, tick: Tick, source: ScheduleError) -> SimError {
        self.halted = true;
        let dump = self.dump_state();
        error!(%tick, error = %source, "invariant violated, simulation halted\n{dump}");
        SimError::InvariantViolation { tick, source, dump }
    }

    /// Every roster entry followed by the occupancy picture.
    pub fn dump_state(&self) -> String {
        let mut out = String::new();
        let _ = writeln!(
            out,
            "{} | remaining spawn ticks {} | roster {} ({} live)",
            self.clock,
            self.spawner.remaining(),
            self.scheduler.len(),
            self.scheduler.live_count(),
        );
        for v in self.scheduler.iter() {
            let at = v.position.map_or_else(|| "-".to_owned(), |c| c.to_string());
            let _ = writeln!(
                out,
                "  {} speed={} want_change={} mode={:?} at {at}",
                v.id, v.speed, v.want_change, v.mode
            );
        }
        let _ = write!(out, "{}", self.grid.occupancy());
        out
    }
}

//! Injectable randomness for the spawn policy.
//!
//! Every random draw the simulation makes goes through [`SpawnSource`].  The
//! production implementation, [`SpawnRng`], keeps the spawn-outcome draw and
//! the lane draw on two independently seeded streams so either can be
//! replayed on its own; tests substitute a scripted source.

use hw_agent::SideLane;
use hw_core::SimRng;

/// Size of the discrete spawn-outcome set.  Two of these outcomes spawn.
pub const SPAWN_OUTCOMES: u32 = 5;

/// Source of the spawn policy's random draws.
pub trait SpawnSource {
    /// Uniform outcome in `0..SPAWN_OUTCOMES`.
    fn outcome(&mut self) -> u32;

    /// Uniform lane in `0..lanes`.
    fn lane(&mut self, lanes: u32) -> u32;

    /// Lane-change tie-break side for a new vehicle.
    fn preference(&mut self) -> SideLane;
}

/// Seeded [`SpawnSource`] with separate outcome and lane streams.
pub struct SpawnRng {
    outcome: SimRng,
    lane:    SimRng,
}

impl SpawnRng {
    /// Derive both streams from one master seed.
    pub fn new(seed: u64) -> Self {
        let mut root = SimRng::new(seed);
        Self {
            outcome: root.child(1),
            lane:    root.child(2),
        }
    }

    /// Seed the two streams explicitly.
    pub fn from_seeds(outcome_seed: u64, lane_seed: u64) -> Self {
        Self {
            outcome: SimRng::new(outcome_seed),
            lane:    SimRng::new(lane_seed),
        }
    }
}

impl SpawnSource for SpawnRng {
    fn outcome(&mut self) -> u32 {
        self.outcome.gen_range(0..SPAWN_OUTCOMES)
    }

    fn lane(&mut self, lanes: u32) -> u32 {
        self.lane.gen_range(0..lanes)
    }

    fn preference(&mut self) -> SideLane {
        if self.lane.gen_bool(0.5) { SideLane::Left } else { SideLane::Right }
    }
}

impl<S: SpawnSource + ?Sized> SpawnSource for Box<S> {
    fn outcome(&mut self) -> u32 {
        (**self).outcome()
    }

    fn lane(&mut self, lanes: u32) -> u32 {
        (**self).lane(lanes)
    }

    fn preference(&mut self) -> SideLane {
        (**self).preference()
    }
}

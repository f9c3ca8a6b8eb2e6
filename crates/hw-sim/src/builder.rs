//! Fluent builder for constructing a [`Simulation`].

use hw_agent::Vehicle;
use hw_behavior::{BehaviorModel, RoadContext};
use hw_core::Cell;
use hw_grid::Grid;
use hw_schedule::Scheduler;

use crate::{SimResult, Simulation, SpawnPolicy, SpawnSource};

/// Fluent builder for [`Simulation<S, B>`].
///
/// # Required inputs
///
/// - [`SimConfig`][hw_core::SimConfig]: road size, seed, spawn window, …
/// - `S: SpawnSource`: e.g. [`SpawnRng`][crate::SpawnRng]
/// - `B: BehaviorModel`: e.g. [`HighwayRules`][hw_behavior::HighwayRules]
///
/// # Optional inputs
///
/// | Method                  | Default        |
/// |-------------------------|----------------|
/// | `.initial_vehicles(v)`  | empty road     |
///
/// # Example
///
/// ```rust,ignore
/// let mut sim = SimBuilder::new(config, SpawnRng::new(7), HighwayRules)
///     .initial_vehicles(vec![(Vehicle::new(VehicleId(900), 2, SideLane::Left), Cell::new(1, 0))])
///     .build()?;
/// ```
pub struct SimBuilder<S: SpawnSource, B: BehaviorModel> {
    config:   hw_core::SimConfig,
    source:   S,
    behavior: B,
    initial:  Vec<(Vehicle, Cell)>,
}

impl<S: SpawnSource, B: BehaviorModel> SimBuilder<S, B> {
    pub fn new(config: hw_core::SimConfig, source: S, behavior: B) -> Self {
        Self { config, source, behavior, initial: Vec::new() }
    }

    /// Vehicles on the road before the first tick, in creation order.
    ///
    /// Their ids must not collide with ids the spawn countdown will hand out
    /// (`1..=spawn_ticks`), or the spawn that reaches the same id fails.
    pub fn initial_vehicles(mut self, vehicles: Vec<(Vehicle, Cell)>) -> Self {
        self.initial = vehicles;
        self
    }

    /// Validate the config, build the grid, and place the initial vehicles.
    pub fn build(self) -> SimResult<Simulation<S, B>> {
        self.config.validate()?;

        let mut grid = Grid::new(self.config.lanes, self.config.length)?;
        let mut scheduler = Scheduler::new();
        for (mut vehicle, cell) in self.initial {
            grid.place(&mut vehicle, cell)?;
            scheduler.add(vehicle)?;
        }

        let mut spawner = SpawnPolicy::from_config(&self.config);
        let locked = scheduler.iter().find(|v| v.is_locked()).map(|v| v.id);
        if locked.is_some() {
            spawner.mark_locked_assigned();
        }

        Ok(Simulation {
            clock:     hw_core::SimClock::new(self.config.start_unix_secs),
            ctx:       RoadContext::from_config(&self.config),
            spawner,
            config:    self.config,
            grid,
            scheduler,
            source:    self.source,
            behavior:  self.behavior,
            locked,
            halted:    false,
        })
    }
}

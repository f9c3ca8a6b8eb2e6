//! Simulation observer trait for progress reporting and data collection.

use hw_core::Tick;
use hw_grid::Grid;

use crate::TickSummary;

/// Callbacks invoked by [`Simulation::step_observed`][crate::Simulation::step_observed]
/// at key points in the tick.
///
/// All methods have default no-op implementations so implementors only need to
/// override what they care about.
///
/// # Example: occupancy printer
///
/// ```rust,ignore
/// struct Printer;
///
/// impl SimObserver for Printer {
///     fn on_occupancy(&mut self, tick: Tick, grid: &Grid) {
///         println!("{tick}\n{}", grid.occupancy());
///     }
/// }
/// ```
pub trait SimObserver {
    /// Called at the very start of each tick, before spawning.
    fn on_tick_start(&mut self, _tick: Tick) {}

    /// Called once per tick after spawning and before any vehicle moves.
    ///
    /// Visualization collectors call `grid.occupancy()` here.
    fn on_occupancy(&mut self, _tick: Tick, _grid: &Grid) {}

    /// Called after every vehicle has stepped.
    fn on_tick_end(&mut self, _summary: &TickSummary) {}

    /// Called once by [`Simulation::run`][crate::Simulation::run] after the
    /// final tick.
    fn on_sim_end(&mut self, _final_tick: Tick) {}
}

/// A [`SimObserver`] that does nothing.
pub struct NoopObserver;

impl SimObserver for NoopObserver {}

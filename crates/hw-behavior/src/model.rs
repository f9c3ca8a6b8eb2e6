//! The `BehaviorModel` trait: the seam between scheduler and rules.

use hw_agent::Vehicle;
use hw_grid::{Grid, GridResult};

use crate::{Neighbor, RoadContext, StepOutcome};

/// Pluggable per-tick vehicle rule.
///
/// The scheduler calls [`scan_radius`][Self::scan_radius] first; if it returns
/// `Some(r)` it resolves every vehicle within Chebyshev distance `r` into a
/// [`Neighbor`] and then calls [`step`][Self::step] exactly once.
pub trait BehaviorModel {
    /// Radius of the neighbour scan for `vehicle`, or `None` if the rule
    /// ignores its neighbours.
    fn scan_radius(&self, _vehicle: &Vehicle, ctx: &RoadContext) -> Option<u32> {
        Some(ctx.radius)
    }

    /// Advance `vehicle` by one tick, moving it on `grid`.
    ///
    /// # Errors
    ///
    /// Any [`GridError`][hw_grid::GridError] is an invariant violation: rules
    /// pre-check their targets, so an occupied destination means a bug.
    fn step(
        &self,
        vehicle:   &mut Vehicle,
        neighbors: &[Neighbor],
        grid:      &mut Grid,
        ctx:       &RoadContext,
    ) -> GridResult<StepOutcome>;
}

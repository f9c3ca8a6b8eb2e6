//! The `Scheduler`: owns every vehicle and steps them in creation order.

use hw_agent::Vehicle;
use hw_behavior::{BehaviorModel, Neighbor, RoadContext};
use hw_core::{Cell, VehicleId};
use hw_grid::Grid;
use tracing::trace;

use crate::{ScheduleError, ScheduleResult, StepReport};

#[cfg(feature = "fx-hash")]
type SlotIndex = rustc_hash::FxHashMap<VehicleId, usize>;
#[cfg(not(feature = "fx-hash"))]
type SlotIndex = std::collections::HashMap<VehicleId, usize>;

/// Creation-ordered roster of vehicles.
///
/// `roster[i]` was added before `roster[i + 1]`; `index` maps ids back to
/// slots so neighbour scans (which yield ids) can read other vehicles' speeds.
#[derive(Default)]
pub struct Scheduler {
    roster:  Vec<Vehicle>,
    index:   SlotIndex,
    /// Reused neighbour buffer, cleared before each vehicle.
    scratch: Vec<Neighbor>,
}

impl Scheduler {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a vehicle.  It is stepped from the next `step` call onwards.
    pub fn add(&mut self, vehicle: Vehicle) -> ScheduleResult<()> {
        if self.index.contains_key(&vehicle.id) {
            return Err(ScheduleError::DuplicateVehicle(vehicle.id));
        }
        self.index.insert(vehicle.id, self.roster.len());
        self.roster.push(vehicle);
        Ok(())
    }

    /// Roster size, tombstones included.
    #[inline]
    pub fn len(&self) -> usize {
        self.roster.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.roster.is_empty()
    }

    /// Vehicles currently on the road.
    pub fn live_count(&self) -> usize {
        self.roster.iter().filter(|v| v.is_on_road()).count()
    }

    pub fn get(&self, id: VehicleId) -> Option<&Vehicle> {
        self.index.get(&id).map(|&slot| &self.roster[slot])
    }

    /// Mutable access for setup code.  Do not write `position` through this;
    /// go through the grid.
    pub fn get_mut(&mut self, id: VehicleId) -> Option<&mut Vehicle> {
        self.index.get(&id).map(|&slot| &mut self.roster[slot])
    }

    /// All vehicles in creation order, tombstones included.
    pub fn iter(&self) -> impl Iterator<Item = &Vehicle> + '_ {
        self.roster.iter()
    }

    /// Step every live vehicle exactly once, in creation order.
    ///
    /// # Errors
    ///
    /// Stops at the first failing vehicle.  Vehicles before it have moved;
    /// vehicles after it have not.
    pub fn step<B: BehaviorModel>(
        &mut self,
        grid:     &mut Grid,
        behavior: &B,
        ctx:      &RoadContext,
    ) -> ScheduleResult<StepReport> {
        // Explicit field borrows so the borrow checker sees disjoint access.
        let Self { roster, index, scratch } = self;
        let count = roster.len();
        let mut report = StepReport::default();

        for slot in 0..count {
            let Some(pos) = roster[slot].position else {
                continue;
            };

            scratch.clear();
            if let Some(radius) = behavior.scan_radius(&roster[slot], ctx) {
                resolve_neighbors(grid, roster, index, pos, radius, scratch)?;
            }

            let vehicle = &mut roster[slot];
            let outcome = behavior
                .step(vehicle, scratch, grid, ctx)
                .map_err(|source| ScheduleError::Step { vehicle: vehicle.id, source })?;
            report.record(vehicle.id, outcome);
        }

        trace!(
            stepped = report.stepped,
            exited = report.exited.len(),
            lane_changes = report.lane_changes,
            "scheduler step"
        );
        Ok(report)
    }

    /// Drop vehicles that have left the road, returning them in creation order.
    pub fn prune_departed(&mut self) -> Vec<Vehicle> {
        let (live, departed): (Vec<_>, Vec<_>) =
            std::mem::take(&mut self.roster).into_iter().partition(Vehicle::is_on_road);
        self.roster = live;
        self.index = self
            .roster
            .iter()
            .enumerate()
            .map(|(slot, v)| (v.id, slot))
            .collect();
        departed
    }
}

/// Resolve the grid scan around `pos` into `(cell, speed)` pairs.
fn resolve_neighbors(
    grid:   &Grid,
    roster: &[Vehicle],
    index:  &SlotIndex,
    pos:    Cell,
    radius: u32,
    out:    &mut Vec<Neighbor>,
) -> ScheduleResult<()> {
    for (cell, id) in grid.neighbors(pos, radius) {
        let slot = *index.get(&id).ok_or(ScheduleError::UnknownVehicle(id))?;
        out.push(Neighbor { cell, speed: roster[slot].speed });
    }
    Ok(())
}

//! Per-tick summary handed to observers.

use hw_core::{Tick, VehicleId};

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct TickSummary {
    pub tick:                  Tick,
    /// Vehicle created by this tick's spawn call, if any.
    pub spawned:               Option<VehicleId>,
    /// `true` if `spawned` is the locked vehicle.
    pub spawned_locked:        bool,
    /// Vehicles on the road after the tick.
    pub live:                  usize,
    pub lane_changes:          usize,
    /// Vehicles that left the road this tick.
    pub exited:                Vec<VehicleId>,
    /// Spawn countdown after the tick.
    pub remaining_spawn_ticks: u32,
}

//! Spawn policy and one-shot locked-vehicle selection.

use hw_agent::Vehicle;
use hw_core::{Cell, SimConfig, VehicleId};
use hw_grid::Grid;
use hw_schedule::{ScheduleError, ScheduleResult, Scheduler};
use tracing::{debug, info};

use crate::SpawnSource;

/// Outcomes of `SpawnSource::outcome` below this value spawn (2 of 5).
const SPAWNING_OUTCOMES: u32 = 2;

/// A vehicle created by the spawn policy.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct Spawned {
    pub id:     VehicleId,
    pub lane:   u32,
    pub locked: bool,
}

/// Rate-limited, randomized vehicle creation.
///
/// `remaining` counts down once per tick while positive; it is also the id
/// of the vehicle spawned on that tick.  At zero the policy goes quiet for
/// good, while vehicles already on the road keep moving.
#[derive(Clone, Debug)]
pub struct SpawnPolicy {
    remaining:       u32,
    locked_window:   u32,
    locked_assigned: bool,
    brake_countdown: i32,
    spawn_speed:     u32,
    center_lane:     u32,
    lanes:           u32,
}

impl SpawnPolicy {
    pub fn from_config(config: &SimConfig) -> Self {
        Self {
            remaining:       config.spawn_ticks,
            locked_window:   config.locked_window,
            locked_assigned: false,
            brake_countdown: config.brake_countdown,
            spawn_speed:     config.max_speed,
            center_lane:     config.center_lane(),
            lanes:           config.lanes,
        }
    }

    /// Ticks of spawning left.
    #[inline]
    pub fn remaining(&self) -> u32 {
        self.remaining
    }

    /// `true` once the locked vehicle has been chosen.
    #[inline]
    pub fn locked_assigned(&self) -> bool {
        self.locked_assigned
    }

    /// Record that a locked vehicle already exists, so no spawn is locked.
    pub fn mark_locked_assigned(&mut self) {
        self.locked_assigned = true;
    }

    /// Run the policy for one tick.
    ///
    /// `first_tick` forces a spawn regardless of the outcome draw.  A spawn
    /// whose entry cell is still occupied is skipped; the countdown moves on
    /// either way.
    pub fn apply<S: SpawnSource>(
        &mut self,
        first_tick: bool,
        grid:       &mut Grid,
        scheduler:  &mut Scheduler,
        source:     &mut S,
    ) -> ScheduleResult<Option<Spawned>> {
        if self.remaining == 0 {
            return Ok(None);
        }

        let roll = source.outcome();
        let mut spawned = None;
        if first_tick || roll < SPAWNING_OUTCOMES {
            let lane = source.lane(self.lanes);
            let preference = source.preference();
            let entry = Cell::new(lane, 0);

            if let Some(blocker) = grid.occupant(entry) {
                debug!(%entry, %blocker, remaining = self.remaining, "entry cell occupied, spawn skipped");
            } else {
                let id = VehicleId(self.remaining);
                if scheduler.get(id).is_some() {
                    return Err(ScheduleError::DuplicateVehicle(id));
                }
                let mut vehicle = Vehicle::new(id, self.spawn_speed, preference);
                let locked = self.should_lock(lane);
                if locked {
                    vehicle = vehicle.locked(self.brake_countdown);
                    self.locked_assigned = true;
                    info!(%id, lane, remaining = self.remaining, "locked vehicle designated");
                }
                grid.place(&mut vehicle, entry)
                    .map_err(|source| ScheduleError::Step { vehicle: id, source })?;
                scheduler.add(vehicle)?;
                debug!(%id, lane, "spawned");
                spawned = Some(Spawned { id, lane, locked });
            }
        }

        self.remaining -= 1;
        Ok(spawned)
    }

    fn should_lock(&self, lane: u32) -> bool {
        !self.locked_assigned && self.remaining <= self.locked_window && lane == self.center_lane
    }
}

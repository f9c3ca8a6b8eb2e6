//! Per-vehicle state.

use hw_core::{Cell, VehicleId};

/// Which side lane a vehicle leans towards when leaving the centre lane.
#[derive(Copy, Clone, PartialEq, Eq, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum SideLane {
    /// The lane just below the centre (lane 0 on a 3-lane road).
    Left,
    /// The lane just above the centre (lane 2 on a 3-lane road).
    Right,
}

impl SideLane {
    /// The other side.
    #[inline]
    pub fn opposite(self) -> SideLane {
        match self {
            SideLane::Left => SideLane::Right,
            SideLane::Right => SideLane::Left,
        }
    }

    /// Absolute lane index of this side relative to `center`.
    #[inline]
    pub fn lane(self, center: u32) -> u32 {
        match self {
            SideLane::Left => center - 1,
            SideLane::Right => center + 1,
        }
    }
}

/// Driving mode.
///
/// Exactly one vehicle per run is `Locked`: it ignores its neighbours and
/// brakes on a fixed script once it passes the brake column, modelling an
/// obstruction on the road.
#[derive(Copy, Clone, PartialEq, Eq, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum VehicleMode {
    Normal,
    Locked {
        /// Braking countdown.  Speed drops on even values down to 0, then the
        /// countdown parks at -1 and speed holds.
        step_stop: i32,
    },
}

/// One simulated vehicle.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Vehicle {
    pub id: VehicleId,

    /// Cells advanced per tick.
    pub speed: u32,

    /// Set when a slow leader makes the vehicle want to leave the centre lane.
    pub want_change: bool,

    /// Tie-break side for lane changes.
    pub preference: SideLane,

    pub mode: VehicleMode,

    /// Current cell, or `None` once the vehicle has left the road.
    ///
    /// Written only by `hw_grid::Grid`.
    pub position: Option<Cell>,
}

impl Vehicle {
    /// A normal vehicle that has not been placed yet.
    pub fn new(id: VehicleId, speed: u32, preference: SideLane) -> Self {
        Self {
            id,
            speed,
            want_change: false,
            preference,
            mode: VehicleMode::Normal,
            position: None,
        }
    }

    /// Builder-style switch into locked mode with the given brake countdown.
    pub fn locked(mut self, step_stop: i32) -> Self {
        self.mode = VehicleMode::Locked { step_stop };
        self
    }

    #[inline]
    pub fn is_locked(&self) -> bool {
        matches!(self.mode, VehicleMode::Locked { .. })
    }

    /// `true` while the vehicle occupies a grid cell.
    #[inline]
    pub fn is_on_road(&self) -> bool {
        self.position.is_some()
    }

    /// Lane for external consumers: `-1` once the vehicle has left the road.
    #[inline]
    pub fn export_lane(&self) -> i64 {
        self.position.map_or(-1, |c| i64::from(c.lane))
    }
}

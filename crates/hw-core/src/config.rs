//! Top-level simulation configuration.
//!
//! Typically loaded from a JSON file by the application crate (enable the
//! `serde` feature) and passed to `hw_sim::SimBuilder`.

use crate::{HwError, HwResult, Tick};

/// All tunables of one simulation run.
///
/// The spawn-rate knob `spawn_rate` is a steps-per-second scale factor: it
/// stretches the neighbour radius and the lane-change start column, so a run
/// at twice the rate keeps the same behaviour over twice as many cells.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct SimConfig {
    /// Number of parallel lanes.  Must be odd and at least 3.
    pub lanes: u32,

    /// Number of cells along the road.
    pub length: u32,

    /// Master RNG seed.  The same seed always produces identical runs.
    pub seed: u64,

    /// Ticks during which new vehicles may spawn.  Doubles as the id source:
    /// a vehicle spawned while the countdown reads `n` gets `VehicleId(n)`.
    pub spawn_ticks: u32,

    /// Steps-per-second scale factor.  Must be >= 1.
    pub spawn_rate: u32,

    /// Trailing window of the spawn countdown during which the locked vehicle
    /// may be chosen.
    pub locked_window: u32,

    /// Column past which the locked vehicle starts braking.
    pub brake_column: u32,

    /// Initial braking countdown of the locked vehicle.
    pub brake_countdown: i32,

    /// Speed floor for the locked vehicle while braking.
    pub locked_min_speed: u32,

    /// Free-flow speed of a normal vehicle, also the spawn speed.
    pub max_speed: u32,

    /// Neighbour radius at `spawn_rate == 1`.
    pub base_radius: u32,

    /// Minimum column for a lane change at `spawn_rate == 1`.
    pub base_lane_change_start: u32,

    /// Ticks the driver runs before stopping.  The engine itself has no end.
    pub total_ticks: u64,

    /// Unix timestamp recorded as the run's start time.
    pub start_unix_secs: i64,
}

impl Default for SimConfig {
    fn default() -> Self {
        Self {
            lanes:                  3,
            length:                 1_000,
            seed:                   42,
            spawn_ticks:            300,
            spawn_rate:             1,
            locked_window:          100,
            brake_column:           400,
            brake_countdown:        6,
            locked_min_speed:       0,
            max_speed:              4,
            base_radius:            5,
            base_lane_change_start: 20,
            total_ticks:            600,
            start_unix_secs:        0,
        }
    }
}

impl SimConfig {
    /// Reject configurations the movement rules cannot honour.
    pub fn validate(&self) -> HwResult<()> {
        if self.lanes < 3 || self.lanes % 2 == 0 {
            return Err(HwError::Config(format!(
                "lanes must be odd and >= 3, got {}",
                self.lanes
            )));
        }
        if self.length == 0 {
            return Err(HwError::Config("length must be positive".into()));
        }
        if self.spawn_rate == 0 {
            return Err(HwError::Config("spawn_rate must be >= 1".into()));
        }
        if self.max_speed == 0 {
            return Err(HwError::Config("max_speed must be positive".into()));
        }
        let radius = self.base_radius.checked_mul(self.spawn_rate).ok_or_else(|| {
            HwError::Config(format!(
                "base_radius {} x spawn_rate {} overflows",
                self.base_radius, self.spawn_rate
            ))
        })?;
        if self.base_lane_change_start.checked_mul(self.spawn_rate).is_none() {
            return Err(HwError::Config(format!(
                "base_lane_change_start {} x spawn_rate {} overflows",
                self.base_lane_change_start, self.spawn_rate
            )));
        }
        // A free-flowing vehicle must be able to see the cell it will land on.
        if radius <= self.max_speed {
            return Err(HwError::Config(format!(
                "neighbour radius {radius} must exceed max_speed {}",
                self.max_speed
            )));
        }
        if self.brake_countdown < 0 {
            return Err(HwError::Config("brake_countdown must be >= 0".into()));
        }
        Ok(())
    }

    /// Neighbour-scan radius, scaled by the spawn rate.
    ///
    /// Saturates on an unvalidated config; [`validate`](Self::validate)
    /// rejects the overflow.
    #[inline]
    pub fn radius(&self) -> u32 {
        self.base_radius.saturating_mul(self.spawn_rate)
    }

    /// First column at which a centre-lane vehicle may change lanes.
    #[inline]
    pub fn lane_change_start(&self) -> u32 {
        self.base_lane_change_start.saturating_mul(self.spawn_rate)
    }

    /// Index of the centre lane.
    #[inline]
    pub fn center_lane(&self) -> u32 {
        self.lanes / 2
    }

    /// The tick at which the driver stops (exclusive upper bound).
    #[inline]
    pub fn end_tick(&self) -> Tick {
        Tick(self.total_ticks)
    }
}

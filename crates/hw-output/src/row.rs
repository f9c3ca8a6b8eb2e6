//! Plain data row types handed to output backends.

use hw_agent::Vehicle;
use hw_grid::Occupancy;
use hw_sim::TickSummary;
use serde::{Deserialize, Serialize};

/// One vehicle as seen by an external poller.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct VehicleRecord {
    pub id:    u32,
    pub speed: u32,
    /// Current lane, or `-1` once the vehicle has left the road.
    pub lane:  i64,
}

impl From<&Vehicle> for VehicleRecord {
    fn from(v: &Vehicle) -> Self {
        Self { id: v.id.0, speed: v.speed, lane: v.export_lane() }
    }
}

/// One lane of one occupancy frame.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OccupancyRow {
    pub tick: u64,
    pub lane: u32,
    /// `0`/`1` per column, upstream first.
    pub bits: String,
}

impl OccupancyRow {
    /// Split a frame into per-lane rows.
    pub fn from_frame(tick: u64, frame: &Occupancy) -> Vec<OccupancyRow> {
        (0..frame.lanes)
            .map(|lane| OccupancyRow {
                tick,
                lane,
                bits: frame.row(lane).iter().map(|&c| if c == 1 { '1' } else { '0' }).collect(),
            })
            .collect()
    }
}

/// Summary statistics for one simulation tick.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TickSummaryRow {
    pub tick:                  u64,
    pub spawned:               Option<u32>,
    pub spawned_locked:        bool,
    pub live:                  u64,
    pub lane_changes:          u64,
    pub exited:                u64,
    pub remaining_spawn_ticks: u32,
}

impl From<&TickSummary> for TickSummaryRow {
    fn from(s: &TickSummary) -> Self {
        Self {
            tick:                  s.tick.0,
            spawned:               s.spawned.map(|id| id.0),
            spawned_locked:        s.spawned_locked,
            live:                  s.live as u64,
            lane_changes:          s.lane_changes as u64,
            exited:                s.exited.len() as u64,
            remaining_spawn_ticks: s.remaining_spawn_ticks,
        }
    }
}

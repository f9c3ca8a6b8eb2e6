//! In-memory occupancy frame collection.

use hw_core::Tick;
use hw_grid::{Grid, Occupancy};
use hw_sim::SimObserver;

/// Collects one [`Occupancy`] frame per tick, in tick order.
///
/// The frames are the input of any animation or heat-map renderer; the
/// recorder itself draws nothing.
#[derive(Debug, Default)]
pub struct OccupancyRecorder {
    frames: Vec<(Tick, Occupancy)>,
}

impl OccupancyRecorder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn frames(&self) -> &[(Tick, Occupancy)] {
        &self.frames
    }

    pub fn len(&self) -> usize {
        self.frames.len()
    }

    pub fn is_empty(&self) -> bool {
        self.frames.is_empty()
    }

    pub fn into_frames(self) -> Vec<(Tick, Occupancy)> {
        self.frames
    }
}

impl SimObserver for OccupancyRecorder {
    fn on_occupancy(&mut self, tick: Tick, grid: &Grid) {
        self.frames.push((tick, grid.occupancy()));
    }
}

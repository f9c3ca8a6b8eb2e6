//! Read-only road parameters passed to every behavior call.

use hw_core::SimConfig;

/// Road geometry and rule thresholds, resolved once from [`SimConfig`].
///
/// Scaled values (`radius`, `lane_change_start`) already include the spawn
/// rate factor, so rules never multiply by it themselves.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RoadContext {
    pub lanes:             u32,
    pub length:            u32,
    pub center_lane:       u32,
    /// Moore-neighbourhood scan radius.
    pub radius:            u32,
    /// Free-flow speed a normal vehicle recovers to.
    pub max_speed:         u32,
    /// Minimum column for leaving the centre lane.
    pub lane_change_start: u32,
    /// Column past which the locked vehicle brakes.
    pub brake_column:      u32,
    /// Speed floor of the locked vehicle.
    pub locked_min_speed:  u32,
}

impl RoadContext {
    pub fn from_config(config: &SimConfig) -> Self {
        Self {
            lanes:             config.lanes,
            length:            config.length,
            center_lane:       config.center_lane(),
            radius:            config.radius(),
            max_speed:         config.max_speed,
            lane_change_start: config.lane_change_start(),
            brake_column:      config.brake_column,
            locked_min_speed:  config.locked_min_speed,
        }
    }

    /// `true` for the two lanes directly beside the centre.
    #[inline]
    pub fn is_side_lane(&self, lane: u32) -> bool {
        lane + 1 == self.center_lane || lane == self.center_lane + 1
    }
}

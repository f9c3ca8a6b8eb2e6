//! Strongly typed vehicle identifier.
//!
//! Vehicle ids are ordinals handed out by the spawn countdown, so a newer
//! vehicle usually carries a *smaller* id than an older one.  Creation order
//! lives in the scheduler roster, not in the id.

use std::fmt;

/// Identifier of one simulated vehicle.
#[derive(Copy, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct VehicleId(pub u32);

impl VehicleId {
    /// Sentinel meaning "no vehicle", equivalent to `u32::MAX`.
    pub const INVALID: VehicleId = VehicleId(u32::MAX);

    /// The raw ordinal.
    #[inline(always)]
    pub fn get(self) -> u32 {
        self.0
    }
}

impl Default for VehicleId {
    /// Returns the `INVALID` sentinel so uninitialized ids are visibly invalid.
    #[inline(always)]
    fn default() -> Self {
        Self::INVALID
    }
}

impl fmt::Display for VehicleId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "VehicleId({})", self.0)
    }
}

impl From<VehicleId> for u32 {
    #[inline(always)]
    fn from(id: VehicleId) -> u32 {
        id.0
    }
}

//! Grid coordinates.

use std::fmt;

/// A `(lane, column)` coordinate on the road grid.
///
/// Lanes are numbered `0..lanes` across the road; columns increase
/// downstream from `0` (the spawn edge) to `length - 1` (the exit edge).
#[derive(Copy, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Debug, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Cell {
    pub lane:   u32,
    pub column: u32,
}

impl Cell {
    #[inline]
    pub const fn new(lane: u32, column: u32) -> Self {
        Self { lane, column }
    }

    /// Chebyshev (king-move) distance to `other`.
    #[inline]
    pub fn chebyshev(self, other: Cell) -> u32 {
        self.lane.abs_diff(other.lane).max(self.column.abs_diff(other.column))
    }

    /// The cell `n` columns downstream in the same lane.
    #[inline]
    pub fn ahead(self, n: u32) -> Cell {
        Cell { lane: self.lane, column: self.column.saturating_add(n) }
    }
}

impl fmt::Display for Cell {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.lane, self.column)
    }
}

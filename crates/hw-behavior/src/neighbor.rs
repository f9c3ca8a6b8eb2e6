//! Neighbour-scan results.

use hw_core::Cell;

/// Another vehicle seen by a neighbour scan: where it is and how fast it goes.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct Neighbor {
    pub cell:  Cell,
    pub speed: u32,
}

impl Neighbor {
    #[inline]
    pub fn new(lane: u32, column: u32, speed: u32) -> Self {
        Self { cell: Cell::new(lane, column), speed }
    }
}

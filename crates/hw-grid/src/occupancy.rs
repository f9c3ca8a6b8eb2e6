//! Binary occupancy frames.

use std::fmt;

/// A `lanes × length` array of 0/1 values, one per cell.
///
/// Produced by [`Grid::occupancy`][crate::Grid::occupancy] once per tick and
/// consumed by visualization collectors.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Occupancy {
    pub lanes:  u32,
    pub length: u32,
    /// Row-major: `cells[lane * length + column]`.
    pub cells:  Vec<u8>,
}

impl Occupancy {
    /// The 0/1 values of one lane, upstream to downstream.
    pub fn row(&self, lane: u32) -> &[u8] {
        let start = (lane * self.length) as usize;
        &self.cells[start..start + self.length as usize]
    }

    pub fn get(&self, lane: u32, column: u32) -> u8 {
        self.cells[(lane * self.length + column) as usize]
    }

    /// Number of occupied cells.
    pub fn count(&self) -> usize {
        self.cells.iter().filter(|&&c| c == 1).count()
    }
}

impl fmt::Display for Occupancy {
    /// One text row per lane, `#` for occupied and `.` for empty.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for lane in 0..self.lanes {
            let row: String = self
                .row(lane)
                .iter()
                .map(|&c| if c == 1 { '#' } else { '.' })
                .collect();
            writeln!(f, "{row}")?;
        }
        Ok(())
    }
}

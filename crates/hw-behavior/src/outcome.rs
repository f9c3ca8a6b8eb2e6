//! What a vehicle did during one call of its rule.

use hw_core::Cell;

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum StepOutcome {
    /// The vehicle has no grid position; nothing happened.
    Skipped,

    /// Stayed in its lane.  `from == to` when the speed is 0.
    Advanced { from: Cell, to: Cell },

    /// Moved one column forward into a side lane.
    ChangedLane { from: Cell, to: Cell },

    /// Would have passed the downstream bound and was taken off the grid.
    Exited { from: Cell },
}

impl StepOutcome {
    #[inline]
    pub fn is_exit(&self) -> bool {
        matches!(self, StepOutcome::Exited { .. })
    }
}

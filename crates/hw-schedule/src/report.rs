//! Per-tick stepping summary.

use hw_behavior::StepOutcome;
use hw_core::VehicleId;

/// What the scheduler did during one `step`.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct StepReport {
    /// Vehicles whose rule ran (live at the time of their turn).
    pub stepped:      usize,
    pub advanced:     usize,
    pub lane_changes: usize,
    /// Vehicles that left the road this tick, in stepping order.
    pub exited:       Vec<VehicleId>,
}

impl StepReport {
    pub(crate) fn record(&mut self, vehicle: VehicleId, outcome: StepOutcome) {
        match outcome {
            StepOutcome::Skipped => return,
            StepOutcome::Advanced { .. } => self.advanced += 1,
            StepOutcome::ChangedLane { .. } => self.lane_changes += 1,
            StepOutcome::Exited { .. } => self.exited.push(vehicle),
        }
        self.stepped += 1;
    }
}

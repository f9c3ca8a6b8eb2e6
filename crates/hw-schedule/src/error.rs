use hw_core::VehicleId;
use hw_grid::GridError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ScheduleError {
    #[error("{0} is already in the roster")]
    DuplicateVehicle(VehicleId),

    #[error("grid holds {0}, which is not in the roster")]
    UnknownVehicle(VehicleId),

    #[error("stepping {vehicle} failed: {source}")]
    Step {
        vehicle: VehicleId,
        #[source]
        source:  GridError,
    },
}

impl ScheduleError {
    /// The grid error behind a failed step, if any.
    pub fn grid_error(&self) -> Option<&GridError> {
        match self {
            ScheduleError::Step { source, .. } => Some(source),
            _ => None,
        }
    }
}

pub type ScheduleResult<T> = Result<T, ScheduleError>;

//! Grid error type.

use thiserror::Error;

use hw_core::{Cell, VehicleId};

/// Errors produced by `hw-grid`.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum GridError {
    #[error("cell {cell} is outside a {lanes}x{length} grid")]
    OutOfBounds { cell: Cell, lanes: u32, length: u32 },

    #[error("cell {cell} is already occupied by {occupant}")]
    OccupiedCell { cell: Cell, occupant: VehicleId },

    #[error("{0} has no grid position")]
    NotPlaced(VehicleId),

    #[error("{vehicle} is already placed at {at}")]
    AlreadyPlaced { vehicle: VehicleId, at: Cell },

    #[error("grid dimensions must be positive, got {lanes}x{length}")]
    InvalidDimensions { lanes: u32, length: u32 },
}

pub type GridResult<T> = Result<T, GridError>;

//! `hw-grid`: the road grid.
//!
//! # Crate layout
//!
//! | Module        | Contents                                             |
//! |---------------|------------------------------------------------------|
//! | [`grid`]      | `Grid` (placement, movement, removal, neighbours)    |
//! | [`occupancy`] | `Occupancy`: 0/1 frame for visualization             |
//! | [`error`]     | `GridError`, `GridResult<T>`                         |
//!
//! # Invariant
//!
//! Every cell holds at most one `VehicleId`, and a vehicle's `position`
//! equals the cell holding its id.  All mutators take `&mut Vehicle` and
//! update both sides together.

pub mod error;
pub mod grid;
pub mod occupancy;


pub use error::{GridError, GridResult};
pub use grid::Grid;
pub use occupancy::Occupancy;

//! The `Grid`: a dense lane × column array of optional vehicle ids.

use hw_agent::Vehicle;
use hw_core::{Cell, VehicleId};

use crate::{GridError, GridResult, Occupancy};

/// Fixed-size road grid with at most one vehicle per cell.
///
/// Storage is a flat row-major `Vec<Option<VehicleId>>`; the grid does not own
/// vehicles, it only records which id sits where.  The vehicle side of the
/// relation (`Vehicle::position`) is kept in step by every mutator.
#[derive(Clone, Debug)]
pub struct Grid {
    lanes:  u32,
    length: u32,
    cells:  Vec<Option<VehicleId>>,
}

impl Grid {
    /// An empty `lanes × length` grid.
    pub fn new(lanes: u32, length: u32) -> GridResult<Self> {
        if lanes == 0 || length == 0 {
            return Err(GridError::InvalidDimensions { lanes, length });
        }
        Ok(Self {
            lanes,
            length,
            cells: vec![None; lanes as usize * length as usize],
        })
    }

    #[inline]
    pub fn lanes(&self) -> u32 {
        self.lanes
    }

    #[inline]
    pub fn length(&self) -> u32 {
        self.length
    }

    // ── Queries ───────────────────────────────────────────────────────────

    /// `true` if `cell` lies outside `[0, lanes) × [0, length)`.
    #[inline]
    pub fn is_out_of_bounds(&self, cell: Cell) -> bool {
        cell.lane >= self.lanes || cell.column >= self.length
    }

    /// The vehicle in `cell`, or `None` if empty or out of bounds.
    #[inline]
    pub fn occupant(&self, cell: Cell) -> Option<VehicleId> {
        if self.is_out_of_bounds(cell) {
            return None;
        }
        self.cells[self.index(cell)]
    }

    #[inline]
    pub fn is_empty(&self, cell: Cell) -> bool {
        self.occupant(cell).is_none()
    }

    /// All vehicles within Chebyshev distance `radius` of `center`, excluding
    /// `center` itself, in lane-major then column order.
    ///
    /// The window is clipped to the grid, so cells past either end of the
    /// road are simply not visited.
    pub fn neighbors(
        &self,
        center: Cell,
        radius: u32,
    ) -> impl Iterator<Item = (Cell, VehicleId)> + '_ {
        let lane_lo = center.lane.saturating_sub(radius);
        let lane_hi = center.lane.saturating_add(radius).min(self.lanes - 1);
        let col_lo  = center.column.saturating_sub(radius);
        let col_hi  = center.column.saturating_add(radius).min(self.length - 1);

        (lane_lo..=lane_hi)
            .flat_map(move |lane| (col_lo..=col_hi).map(move |column| Cell::new(lane, column)))
            .filter(move |&cell| cell != center)
            .filter_map(move |cell| self.occupant(cell).map(|id| (cell, id)))
    }

    /// Number of occupied cells.
    pub fn occupied_count(&self) -> usize {
        self.cells.iter().filter(|c| c.is_some()).count()
    }

    /// Every `(cell, vehicle)` pair on the grid.
    pub fn iter_occupied(&self) -> impl Iterator<Item = (Cell, VehicleId)> + '_ {
        let length = self.length;
        self.cells.iter().enumerate().filter_map(move |(i, slot)| {
            slot.map(|id| (Cell::new(i as u32 / length, i as u32 % length), id))
        })
    }

    /// 0/1 occupancy frame of the whole grid.
    pub fn occupancy(&self) -> Occupancy {
        Occupancy {
            lanes:  self.lanes,
            length: self.length,
            cells:  self.cells.iter().map(|c| u8::from(c.is_some())).collect(),
        }
    }

    // ── Mutators ──────────────────────────────────────────────────────────

    /// Put an unplaced vehicle on `cell`.
    pub fn place(&mut self, vehicle: &mut Vehicle, cell: Cell) -> GridResult<()> {
        if let Some(at) = vehicle.position {
            return Err(GridError::AlreadyPlaced { vehicle: vehicle.id, at });
        }
        let idx = self.checked_index(cell)?;
        if let Some(occupant) = self.cells[idx] {
            return Err(GridError::OccupiedCell { cell, occupant });
        }
        self.cells[idx] = Some(vehicle.id);
        vehicle.position = Some(cell);
        Ok(())
    }

    /// Relocate a placed vehicle to `to`, clearing its old cell.
    ///
    /// Moving onto the vehicle's own cell is a no-op.
    pub fn move_vehicle(&mut self, vehicle: &mut Vehicle, to: Cell) -> GridResult<()> {
        let from = vehicle.position.ok_or(GridError::NotPlaced(vehicle.id))?;
        let to_idx = self.checked_index(to)?;
        if from == to {
            return Ok(());
        }
        if let Some(occupant) = self.cells[to_idx] {
            return Err(GridError::OccupiedCell { cell: to, occupant });
        }
        let from_idx = self.index(from);
        self.cells[from_idx] = None;
        self.cells[to_idx] = Some(vehicle.id);
        vehicle.position = Some(to);
        Ok(())
    }

    /// Take a vehicle off the grid, returning the cell it left.
    pub fn remove(&mut self, vehicle: &mut Vehicle) -> GridResult<Cell> {
        let from = vehicle.position.ok_or(GridError::NotPlaced(vehicle.id))?;
        let idx = self.index(from);
        self.cells[idx] = None;
        vehicle.position = None;
        Ok(from)
    }

    // ── Indexing ──────────────────────────────────────────────────────────

    #[inline]
    fn index(&self, cell: Cell) -> usize {
        cell.lane as usize * self.length as usize + cell.column as usize
    }

    fn checked_index(&self, cell: Cell) -> GridResult<usize> {
        if self.is_out_of_bounds(cell) {
            return Err(GridError::OutOfBounds {
                cell,
                lanes:  self.lanes,
                length: self.length,
            });
        }
        Ok(self.index(cell))
    }
}

//! The highway driving rules.
//!
//! # Normal vehicles
//!
//! ```text
//! scan neighbours within ctx.radius:
//!   leader    = nearest same-lane vehicle strictly ahead
//!   sympathy  = (side lane) a centre-lane vehicle at/ahead is slower than us
//!   tallies   = (centre lane) side-lane vehicles in columns [c-1, c+1]
//!
//! follow leader:   speed = min(leader.speed, gap - 1)
//!                  centre lane && speed <= 3  →  want_change
//! sympathy:        speed = min(speed, 3)
//!
//! c + speed off the road          →  exit
//! want_change && clear side lane  →  (side, c + 1), speed = 2
//! otherwise                       →  unconstrained? speed = max_speed
//!                                    advance speed cells (exit if off road)
//! ```
//!
//! The `gap - 1` cap keeps a follower off its leader's cell even when the
//! leader has not moved yet this tick.
//!
//! # Locked vehicle
//!
//! Ignores neighbour speeds.  Past `ctx.brake_column` it runs the braking
//! countdown (speed −1 on every even count down to 0), then advances.  Its run
//! is cut short by the first occupied cell ahead; its speed is not.

use hw_agent::{SideLane, Vehicle, VehicleMode};
use hw_core::Cell;
use hw_grid::{Grid, GridResult};
use tracing::trace;

use crate::{BehaviorModel, Neighbor, RoadContext, StepOutcome};

/// At or below this speed a centre-lane vehicle wants to leave the lane.
pub const WANT_CHANGE_SPEED: u32 = 3;

/// Side-lane speed cap while a slower vehicle is alongside in the centre.
pub const SYMPATHY_SPEED: u32 = 3;

/// Speed right after a lane change.
pub const LANE_CHANGE_SPEED: u32 = 2;

/// The normal and locked rules of the highway model.
#[derive(Copy, Clone, Debug, Default)]
pub struct HighwayRules;

impl BehaviorModel for HighwayRules {
    fn scan_radius(&self, vehicle: &Vehicle, ctx: &RoadContext) -> Option<u32> {
        match vehicle.mode {
            VehicleMode::Normal => Some(ctx.radius),
            VehicleMode::Locked { .. } => None,
        }
    }

    fn step(
        &self,
        vehicle:   &mut Vehicle,
        neighbors: &[Neighbor],
        grid:      &mut Grid,
        ctx:       &RoadContext,
    ) -> GridResult<StepOutcome> {
        match vehicle.mode {
            VehicleMode::Normal => step_normal(vehicle, neighbors, grid, ctx),
            VehicleMode::Locked { .. } => step_locked(vehicle, grid, ctx),
        }
    }
}

// ── Normal ────────────────────────────────────────────────────────────────────

/// What a neighbour scan tells a normal vehicle.
#[derive(Debug, Default)]
struct Scan {
    /// `(gap, speed)` of the nearest same-lane vehicle ahead.
    leader:   Option<(u32, u32)>,
    sympathy: bool,
    left:     u32,
    right:    u32,
}

impl Scan {
    fn tally(&self, side: SideLane) -> u32 {
        match side {
            SideLane::Left => self.left,
            SideLane::Right => self.right,
        }
    }
}

fn scan(vehicle: &Vehicle, pos: Cell, neighbors: &[Neighbor], ctx: &RoadContext) -> Scan {
    let center = ctx.center_lane;
    let in_center = pos.lane == center;
    let in_side = ctx.is_side_lane(pos.lane);
    let left_lane = SideLane::Left.lane(center);
    let right_lane = SideLane::Right.lane(center);

    let mut out = Scan::default();
    for n in neighbors {
        let cell = n.cell;

        if cell.lane == pos.lane && cell.column > pos.column {
            let gap = cell.column - pos.column;
            if out.leader.is_none_or(|(min_front, _)| gap < min_front) {
                out.leader = Some((gap, n.speed));
            }
        }

        if in_side && cell.lane == center && cell.column >= pos.column && n.speed < vehicle.speed {
            out.sympathy = true;
        }

        if in_center && cell.column + 1 >= pos.column && cell.column <= pos.column + 1 {
            if cell.lane == left_lane {
                out.left += 1;
            } else if cell.lane == right_lane {
                out.right += 1;
            }
        }
    }
    out
}

fn step_normal(
    vehicle:   &mut Vehicle,
    neighbors: &[Neighbor],
    grid:      &mut Grid,
    ctx:       &RoadContext,
) -> GridResult<StepOutcome> {
    let Some(pos) = vehicle.position else {
        return Ok(StepOutcome::Skipped);
    };
    let in_center = pos.lane == ctx.center_lane;
    let scan = scan(vehicle, pos, neighbors, ctx);

    if let Some((gap, leader_speed)) = scan.leader {
        let follow = leader_speed.min(gap - 1);
        if follow != vehicle.speed {
            vehicle.speed = follow;
        }
        if in_center && vehicle.speed <= WANT_CHANGE_SPEED {
            vehicle.want_change = true;
        }
    }
    if scan.sympathy {
        vehicle.speed = vehicle.speed.min(SYMPATHY_SPEED);
    }

    if grid.is_out_of_bounds(pos.ahead(vehicle.speed)) {
        grid.remove(vehicle)?;
        return Ok(StepOutcome::Exited { from: pos });
    }

    if vehicle.want_change && in_center && pos.column >= ctx.lane_change_start {
        if let Some(side) = pick_side(vehicle.preference, &scan) {
            let to = Cell::new(side.lane(ctx.center_lane), pos.column + 1);
            if !grid.is_out_of_bounds(to) {
                grid.move_vehicle(vehicle, to)?;
                vehicle.speed = LANE_CHANGE_SPEED;
                vehicle.want_change = false;
                trace!(vehicle = %vehicle.id, from = %pos, %to, "lane change");
                return Ok(StepOutcome::ChangedLane { from: pos, to });
            }
        }
    }

    if scan.leader.is_none() && !scan.sympathy {
        vehicle.speed = ctx.max_speed;
    }
    let speed = vehicle.speed;
    advance(vehicle, grid, pos, speed)
}

/// Preferred side if clear, else the other side if clear.
fn pick_side(preference: SideLane, scan: &Scan) -> Option<SideLane> {
    [preference, preference.opposite()]
        .into_iter()
        .find(|&side| scan.tally(side) == 0)
}

// ── Locked ────────────────────────────────────────────────────────────────────

fn step_locked(
    vehicle: &mut Vehicle,
    grid:    &mut Grid,
    ctx:     &RoadContext,
) -> GridResult<StepOutcome> {
    let Some(pos) = vehicle.position else {
        return Ok(StepOutcome::Skipped);
    };

    if pos.column > ctx.brake_column {
        if let VehicleMode::Locked { step_stop } = &mut vehicle.mode {
            if *step_stop >= 0 {
                if *step_stop % 2 == 0 && vehicle.speed > ctx.locked_min_speed {
                    vehicle.speed -= 1;
                }
                *step_stop -= 1;
                trace!(vehicle = %vehicle.id, step_stop = *step_stop, speed = vehicle.speed, "braking");
            }
        }
    }

    if grid.is_out_of_bounds(pos.ahead(vehicle.speed)) {
        grid.remove(vehicle)?;
        return Ok(StepOutcome::Exited { from: pos });
    }
    let run = clear_run(grid, pos, vehicle.speed);
    advance(vehicle, grid, pos, run)
}

/// How many of the next `max` cells ahead of `pos` can be driven through
/// before the first occupied one.
fn clear_run(grid: &Grid, pos: Cell, max: u32) -> u32 {
    (1..=max)
        .find(|&n| !grid.is_empty(pos.ahead(n)))
        .map_or(max, |blocked| blocked - 1)
}

// ── Shared ────────────────────────────────────────────────────────────────────

/// Move `cells` columns downstream, or exit if that leaves the road.
fn advance(
    vehicle: &mut Vehicle,
    grid:    &mut Grid,
    pos:     Cell,
    cells:   u32,
) -> GridResult<StepOutcome> {
    let to = pos.ahead(cells);
    if grid.is_out_of_bounds(to) {
        grid.remove(vehicle)?;
        return Ok(StepOutcome::Exited { from: pos });
    }
    grid.move_vehicle(vehicle, to)?;
    Ok(StepOutcome::Advanced { from: pos, to })
}

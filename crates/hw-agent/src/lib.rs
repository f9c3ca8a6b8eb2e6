//! `hw-agent`: the vehicle record.
//!
//! # Crate layout
//!
//! | Module      | Contents                                              |
//! |-------------|-------------------------------------------------------|
//! | [`vehicle`] | `Vehicle`, `VehicleMode`, `SideLane`                  |
//!
//! A vehicle's `position` is a mirror of its grid cell.  Only `hw-grid`
//! writes it, so the two never disagree.

pub mod vehicle;


pub use vehicle::{SideLane, Vehicle, VehicleMode};

//! `hw-core`: foundational types for the highway traffic simulation.
//!
//! This crate is a dependency of every other `hw-*` crate.  It has no `hw-*`
//! dependencies and minimal external ones (only `rand` and `thiserror`, plus
//! optional `serde`).
//!
//! # What lives here
//!
//! | Module       | Contents                                              |
//! |--------------|-------------------------------------------------------|
//! | [`ids`]      | `VehicleId`                                           |
//! | [`cell`]     | `Cell` grid coordinate, Chebyshev distance            |
//! | [`time`]     | `Tick`, `SimClock`                                    |
//! | [`config`]   | `SimConfig` and derived radius / thresholds           |
//! | [`rng`]      | `SimRng` (seeded global stream)                       |
//! | [`error`]    | `HwError`, `HwResult`                                 |
//!
//! # Feature flags
//!
//! | Flag    | Effect                                                     |
//! |---------|------------------------------------------------------------|
//! | `serde` | Adds `Serialize`/`Deserialize` to all public types.        |

pub mod cell;
pub mod config;
pub mod error;
pub mod ids;
pub mod rng;
pub mod time;


// ── Re-exports ────────────────────────────────────────────────────────────────

pub use cell::Cell;
pub use config::SimConfig;
pub use error::{HwError, HwResult};
pub use ids::VehicleId;
pub use rng::SimRng;
pub use time::{SimClock, Tick};

//! `hw-schedule`: the vehicle roster and its per-tick stepping.
//!
//! # Crate layout
//!
//! | Module        | Contents                                              |
//! |---------------|-------------------------------------------------------|
//! | [`scheduler`] | `Scheduler` (roster + `step`)                         |
//! | [`report`]    | `StepReport`: per-tick outcome counts                 |
//! | [`error`]     | `ScheduleError`, `ScheduleResult<T>`                  |
//!
//! # Iteration model
//!
//! ```text
//! count = roster.len()            // captured at tick start
//! for slot in 0..count:
//!     skip if roster[slot] has left the road
//!     neighbours = resolve grid scan → (cell, speed)   // shared borrow
//!     behavior.step(&mut roster[slot], &neighbours, grid)
//! ```
//!
//! Vehicles leaving the road become tombstones (`position = None`) and keep
//! their slot, so an exit mid-tick never shifts the slots of vehicles not yet
//! stepped.  Tombstones are dropped by [`Scheduler::prune_departed`].

pub mod error;
pub mod report;
pub mod scheduler;


pub use error::{ScheduleError, ScheduleResult};
pub use report::StepReport;
pub use scheduler::Scheduler;

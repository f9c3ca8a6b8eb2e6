//! `hw-behavior`: the per-tick vehicle rule.
//!
//! # Crate layout
//!
//! | Module       | Contents                                                   |
//! |--------------|------------------------------------------------------------|
//! | [`context`]  | `RoadContext`: read-only road parameters for every call    |
//! | [`neighbor`] | `Neighbor`: one `(cell, speed)` result of a neighbour scan |
//! | [`outcome`]  | `StepOutcome`: what a vehicle did this tick                |
//! | [`model`]    | `BehaviorModel` trait                                      |
//! | [`rules`]    | `HighwayRules`: the normal and locked driving rules        |
//!
//! # Design notes
//!
//! The scheduler resolves the neighbour scan into plain `Neighbor` values
//! *before* handing the vehicle out mutably, so a rule only ever sees
//! `&mut Vehicle` (itself), `&[Neighbor]` (everyone else, read-only) and
//! `&mut Grid`.  Grid errors propagate unchanged; running off the end of the
//! road is not an error but a `StepOutcome::Exited`.

pub mod context;
pub mod model;
pub mod neighbor;
pub mod outcome;
pub mod rules;


pub use context::RoadContext;
pub use model::BehaviorModel;
pub use neighbor::Neighbor;
pub use outcome::StepOutcome;
pub use rules::HighwayRules;

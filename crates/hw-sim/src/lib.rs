//! `hw-sim`: tick loop orchestrator for the highway traffic simulation.
//!
//! # Tick loop
//!
//! ```text
//! step():
//!   ① Spawn      while the spawn countdown is positive, roll 0..5; on two
//!                 outcomes (or on the very first tick) put a vehicle at
//!                 (random lane, 0).  The first centre-lane spawn inside the
//!                 trailing window becomes the locked vehicle.
//!   ② Occupancy  observers see the grid after spawning.
//!   ③ Schedule   every live vehicle steps once, in creation order.
//!   ④ Clock      advance to the next tick.
//! ```
//!
//! A grid error inside a tick is an invariant violation: the simulation dumps
//! its state, halts, and refuses further ticks.
//!
//! # Quick-start
//!
//! ```rust,ignore
//! use hw_core::SimConfig;
//! use hw_sim::{NoopObserver, Simulation};
//!
//! let mut sim = Simulation::from_config(SimConfig::default())?;
//! sim.run(&mut NoopObserver)?;
//! ```

pub mod builder;
pub mod error;
pub mod observer;
pub mod sim;
pub mod source;
pub mod spawn;
pub mod summary;

#[cfg(test)]
mod tests;

pub use builder::SimBuilder;
pub use error::{SimError, SimResult};
pub use observer::{NoopObserver, SimObserver};
pub use sim::Simulation;
pub use source::{SPAWN_OUTCOMES, SpawnRng, SpawnSource};
pub use spawn::{SpawnPolicy, Spawned};
pub use summary::TickSummary;

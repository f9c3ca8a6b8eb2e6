//! `hw-output`: everything that leaves the simulation.
//!
//! | Module       | Contents                                                  |
//! |--------------|-----------------------------------------------------------|
//! | [`export`]   | `VehicleExport`, `snapshot`, `poll` (export + step)       |
//! | [`frames`]   | `OccupancyRecorder`: in-memory occupancy frame sequence   |
//! | [`csv`]      | `CsvWriter`: `occupancy.csv`, `tick_summaries.csv`        |
//! | [`observer`] | `SimOutputObserver<W>`: drives any [`OutputWriter`]       |
//!
//! # Usage
//!
//! ```rust,ignore
//! use hw_output::{CsvWriter, SimOutputObserver};
//!
//! let writer = CsvWriter::new(Path::new("./output"))?;
//! let mut obs = SimOutputObserver::new(writer);
//! sim.run(&mut obs)?;
//! if let Some(e) = obs.take_error() {
//!     eprintln!("output error: {e}");
//! }
//! ```

pub mod csv;
pub mod error;
pub mod export;
pub mod frames;
pub mod observer;
pub mod row;
pub mod writer;


pub use csv::CsvWriter;
pub use error::{OutputError, OutputResult};
pub use export::{VehicleExport, poll, snapshot};
pub use frames::OccupancyRecorder;
pub use observer::SimOutputObserver;
pub use row::{OccupancyRow, TickSummaryRow, VehicleRecord};
pub use writer::OutputWriter;

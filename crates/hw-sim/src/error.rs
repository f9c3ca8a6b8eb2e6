use hw_core::{HwError, Tick};
use hw_grid::GridError;
use hw_schedule::ScheduleError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum SimError {
    #[error("simulation configuration error: {0}")]
    Config(String),

    #[error("grid setup failed: {0}")]
    Grid(#[from] GridError),

    #[error("roster setup failed: {0}")]
    Schedule(#[from] ScheduleError),

    /// A rule or the spawner tried to break single occupancy.  `dump` is the
    /// full roster and occupancy at the moment of failure.
    #[error("invariant violated at {tick}: {source}")]
    InvariantViolation {
        tick:   Tick,
        #[source]
        source: ScheduleError,
        dump:   String,
    },

    #[error("simulation halted after an invariant violation")]
    Halted,
}

impl From<HwError> for SimError {
    fn from(e: HwError) -> Self {
        SimError::Config(e.to_string())
    }
}

pub type SimResult<T> = Result<T, SimError>;

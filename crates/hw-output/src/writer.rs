//! The `OutputWriter` trait implemented by backend writers.

use crate::{OccupancyRow, OutputResult, TickSummaryRow};

/// Sink for per-tick simulation output.
///
/// Errors are returned here but swallowed by the observer; retrieve them with
/// [`SimOutputObserver::take_error`][crate::SimOutputObserver::take_error].
pub trait OutputWriter {
    /// Write the lanes of one occupancy frame.
    fn write_occupancy(&mut self, rows: &[OccupancyRow]) -> OutputResult<()>;

    /// Write one tick summary row.
    fn write_tick_summary(&mut self, row: &TickSummaryRow) -> OutputResult<()>;

    /// Flush and close all underlying file handles.
    ///
    /// Idempotent: safe to call more than once.
    fn finish(&mut self) -> OutputResult<()>;
}

//! CSV output backend.
//!
//! Creates two files in the configured output directory:
//! - `occupancy.csv`
//! - `tick_summaries.csv`

use std::fs::File;
use std::path::Path;

use csv::Writer;

use crate::writer::OutputWriter;
use crate::{OccupancyRow, OutputResult, TickSummaryRow};

/// Writes simulation output to two CSV files.
pub struct CsvWriter {
    occupancy: Writer<File>,
    summaries: Writer<File>,
    finished:  bool,
}

impl CsvWriter {
    /// Create the two CSV files in `dir` and write the header rows.
    pub fn new(dir: &Path) -> OutputResult<Self> {
        std::fs::create_dir_all(dir)?;

        let mut occupancy = Writer::from_path(dir.join("occupancy.csv"))?;
        occupancy.write_record(["tick", "lane", "cells"])?;

        let mut summaries = Writer::from_path(dir.join("tick_summaries.csv"))?;
        summaries.write_record([
            "tick",
            "spawned",
            "spawned_locked",
            "live",
            "lane_changes",
            "exited",
            "remaining_spawn_ticks",
        ])?;

        Ok(Self { occupancy, summaries, finished: false })
    }
}

impl OutputWriter for CsvWriter {
    fn write_occupancy(&mut self, rows: &[OccupancyRow]) -> OutputResult<()> {
        for row in rows {
            self.occupancy.write_record([
                row.tick.to_string(),
                row.lane.to_string(),
                row.bits.clone(),
            ])?;
        }
        Ok(())
    }

    fn write_tick_summary(&mut self, row: &TickSummaryRow) -> OutputResult<()> {
        self.summaries.write_record([
            row.tick.to_string(),
            row.spawned.map(|id| id.to_string()).unwrap_or_default(),
            (row.spawned_locked as u8).to_string(),
            row.live.to_string(),
            row.lane_changes.to_string(),
            row.exited.to_string(),
            row.remaining_spawn_ticks.to_string(),
        ])?;
        Ok(())
    }

    fn finish(&mut self) -> OutputResult<()> {
        if self.finished {
            return Ok(());
        }
        self.finished = true;
        self.occupancy.flush()?;
        self.summaries.flush()?;
        Ok(())
    }
}

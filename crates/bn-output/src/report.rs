//! CSV report backend.
//!
//! Creates two files in the configured output directory:
//! - `vehicle_waits.csv`
//! - `run_summaries.csv`

use std::fs::File;
use std::path::Path;

use csv::Writer;

use bn_core::RunConfig;
use bn_sim::{CompletedVehicle, RunSummary};

use crate::row::{RunSummaryRow, VehicleWaitRow};
use crate::OutputResult;

/// Writes wait records and run summaries to two CSV files.
pub struct CsvReporter {
    waits:     Writer<File>,
    summaries: Writer<File>,
    finished:  bool,
}

impl CsvReporter {
    /// Open (or create) the two CSV files in `dir` and write the header rows.
    pub fn new(dir: &Path) -> OutputResult<Self> {
        let mut waits = Writer::from_path(dir.join("vehicle_waits.csv"))?;
        waits.write_record([
            "vehicle_id", "direction", "arrival_ms", "queued_ms", "departed_ms", "wait_ms",
        ])?;

        let mut summaries = Writer::from_path(dir.join("run_summaries.csv"))?;
        summaries.write_record([
            "window_length_ms", "seed", "time_scale", "completed", "average_wait_ms",
            "max_wait_ms", "windows_north", "windows_south", "final_tick_ms",
        ])?;

        Ok(Self {
            waits,
            summaries,
            finished: false,
        })
    }

    /// Write a batch of wait rows.
    pub fn write_waits(&mut self, rows: &[VehicleWaitRow]) -> OutputResult<()> {
        for row in rows {
            self.waits.write_record(&[
                row.vehicle_id.to_string(),
                row.direction.to_string(),
                row.arrival_ms.to_string(),
                row.queued_ms.to_string(),
                row.departed_ms.to_string(),
                row.wait_ms.to_string(),
            ])?;
        }
        Ok(())
    }

    /// Write one run summary row.
    pub fn write_summary(&mut self, row: &RunSummaryRow) -> OutputResult<()> {
        self.summaries.write_record(&[
            row.window_length_ms.to_string(),
            row.seed.to_string(),
            row.time_scale.to_string(),
            row.completed.to_string(),
            row.average_wait_ms.to_string(),
            row.max_wait_ms.to_string(),
            row.windows_north.to_string(),
            row.windows_south.to_string(),
            row.final_tick_ms.to_string(),
        ])?;
        Ok(())
    }

    /// Convenience: write one whole run (summary row + all wait rows).
    pub fn write_run(
        &mut self,
        config:  &RunConfig,
        summary: &RunSummary,
        records: &[CompletedVehicle],
    ) -> OutputResult<()> {
        let rows: Vec<VehicleWaitRow> = records.iter().map(VehicleWaitRow::from).collect();
        self.write_waits(&rows)?;
        self.write_summary(&RunSummaryRow::new(config, summary))
    }

    /// Flush and close all underlying file handles.
    ///
    /// Idempotent — safe to call more than once.
    pub fn finish(&mut self) -> OutputResult<()> {
        if self.finished {
            return Ok(());
        }
        self.finished = true;
        self.waits.flush()?;
        self.summaries.flush()?;
        Ok(())
    }
}

//! CSV output backend.
//!
//! Creates two files in the configured output directory:
//! - `queue_lengths.csv`
//! - `customer_stages.csv`

use std::fs::File;
use std::path::Path;

use csv::Writer;

use crate::writer::OutputWriter;
use crate::{OutputResult, QueueLengthRow, StageRow};

/// Writes simulation output to two CSV files.
pub struct CsvWriter {
    queues:   Writer<File>,
    stages:   Writer<File>,
    finished: bool,
}

impl CsvWriter {
    /// Open (or create) the two CSV files in `dir` and write the header rows.
    pub fn new(dir: &Path) -> OutputResult<Self> {
        let mut queues = Writer::from_path(dir.join("queue_lengths.csv"))?;
        queues.write_record(["time", "queue", "length"])?;

        let mut stages = Writer::from_path(dir.join("customer_stages.csv"))?;
        stages.write_record(["time", "customer", "stage", "station", "course"])?;

        Ok(Self { queues, stages, finished: false })
    }
}

impl OutputWriter for CsvWriter {
    fn write_queue_length(&mut self, row: &QueueLengthRow) -> OutputResult<()> {
        self.queues.write_record(&[
            format!("{:.3}", row.time),
            row.queue.to_string(),
            row.len.to_string(),
        ])?;
        Ok(())
    }

    fn write_stage(&mut self, row: &StageRow) -> OutputResult<()> {
        self.stages.write_record(&[
            format!("{:.3}", row.time),
            row.customer.to_string(),
            row.kind().to_owned(),
            row.station().map(|s| s.to_string()).unwrap_or_default(),
            row.course().map(|c| c.to_string()).unwrap_or_default(),
        ])?;
        Ok(())
    }

    fn finish(&mut self) -> OutputResult<()> {
        if self.finished {
            return Ok(());
        }
        self.finished = true;
        self.queues.flush()?;
        self.stages.flush()?;
        Ok(())
    }
}

//! `SimOutputObserver<W>`: bridges `CafeObserver` to an `OutputWriter`.

use cafe_core::{ProcessId, SimTime};
use cafe_model::{CafeObserver, QueueId, RunSummary, Stage};

use crate::row::{QueueLengthRow, StageRow};
use crate::writer::OutputWriter;
use crate::{OutputError, OutputResult};

/// A [`CafeObserver`] that writes queue lengths and customer stages to any
/// [`OutputWriter`] backend.
///
/// Errors from the writer are stored internally because `CafeObserver`
/// methods have no return value.  After `sim.run()` returns, check for
/// errors with [`take_error`][Self::take_error].
pub struct SimOutputObserver<W: OutputWriter> {
    writer:     W,
    last_error: Option<OutputError>,
}

impl<W: OutputWriter> SimOutputObserver<W> {
    pub fn new(writer: W) -> Self {
        Self { writer, last_error: None }
    }

    /// Take the stored write error (if any) after `sim.run()` returns.
    ///
    /// Returns `None` if all writes succeeded.
    pub fn take_error(&mut self) -> Option<OutputError> {
        self.last_error.take()
    }

    /// Unwrap the inner writer (e.g. to inspect files after the run).
    pub fn into_writer(self) -> W {
        self.writer
    }

    fn store_err(&mut self, result: OutputResult<()>) {
        if let Err(e) = result {
            // Keep only the first error.
            if self.last_error.is_none() {
                self.last_error = Some(e);
            }
        }
    }
}

impl<W: OutputWriter> CafeObserver for SimOutputObserver<W> {
    fn on_queue_length(&mut self, time: SimTime, queue: QueueId, len: usize) {
        let row = QueueLengthRow { time: time.as_secs(), queue, len: len as u32 };
        let result = self.writer.write_queue_length(&row);
        self.store_err(result);
    }

    fn on_stage(&mut self, time: SimTime, customer: ProcessId, stage: Stage) {
        let row = StageRow { time: time.as_secs(), customer: customer.0, stage };
        let result = self.writer.write_stage(&row);
        self.store_err(result);
    }

    fn on_run_end(&mut self, _summary: &RunSummary) {
        let result = self.writer.finish();
        self.store_err(result);
    }
}

//! The `OutputWriter` trait implemented by backend writers.

use crate::{OutputResult, QueueLengthRow, StageRow};

/// Sink for simulation output rows.
///
/// All methods are infallible from the observer's perspective; errors are
/// stored internally and retrieved with [`SimOutputObserver::take_error`].
///
/// [`SimOutputObserver::take_error`]: crate::SimOutputObserver::take_error
pub trait OutputWriter {
    /// Write one queue-length change.
    fn write_queue_length(&mut self, row: &QueueLengthRow) -> OutputResult<()>;

    /// Write one customer stage.
    fn write_stage(&mut self, row: &StageRow) -> OutputResult<()>;

    /// Flush and close all underlying file handles.
    ///
    /// Idempotent: safe to call more than once.
    fn finish(&mut self) -> OutputResult<()>;
}

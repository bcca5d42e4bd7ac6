//! The `OutputWriter` trait implemented by state-vector writers.

use bb_sim::StateRow;

use crate::OutputResult;

/// A sink for state-vector rows.
///
/// [`SimOutputObserver`][crate::SimOutputObserver] calls these from inside
/// the run and keeps the first error for
/// [`take_error`][crate::SimOutputObserver::take_error].
pub trait OutputWriter {
    /// Write one row.
    fn write_row(&mut self, row: &StateRow) -> OutputResult<()>;

    /// Flush and close the underlying handle.
    ///
    /// Idempotent.
    fn finish(&mut self) -> OutputResult<()>;
}

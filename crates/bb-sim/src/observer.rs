//! Simulation observer trait for progress reporting and data collection.

use crate::StateRow;

/// Callbacks invoked by [`Sim::run`][crate::Sim::run].
///
/// All methods have default no-op implementations so implementors only need to
/// override what they care about.
///
/// # Example — progress printer
///
/// ```rust,ignore
/// struct ProgressPrinter { every: u64 }
///
/// impl SimObserver for ProgressPrinter {
///     fn on_row(&mut self, row: &StateRow) {
///         if row.index % self.every == 0 {
///             println!("{:>10.2}  {}", row.clock, row.event);
///         }
///     }
/// }
/// ```
pub trait SimObserver {
    /// Called once per dispatched event, with the snapshot taken after it.
    fn on_row(&mut self, _row: &StateRow) {}

    /// Called once after the end-of-simulation event was processed.
    fn on_sim_end(&mut self, _final_clock: f64, _rows: u64) {}
}

/// A [`SimObserver`] that does nothing.
pub struct NoopObserver;

impl SimObserver for NoopObserver {}

/// A [`SimObserver`] that keeps every row in memory.
#[derive(Debug, Default)]
pub struct RowCollector {
    pub rows: Vec<StateRow>,
}

impl RowCollector {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn into_rows(self) -> Vec<StateRow> {
        self.rows
    }
}

impl SimObserver for RowCollector {
    fn on_row(&mut self, row: &StateRow) {
        self.rows.push(row.clone());
    }
}

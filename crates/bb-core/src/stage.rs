//! The three service stages of the branch.

use std::fmt;

/// One of the branch's service points.
#[derive(Copy, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Stage {
    /// Cash counters where customers pay.
    Counter,
    /// Desk that updates expired invoices.
    UpdateDesk,
    /// Desk that issues reports.
    ReportDesk,
}

impl Stage {
    /// All stages in display order.
    pub const ALL: [Stage; 3] = [Stage::Counter, Stage::UpdateDesk, Stage::ReportDesk];

    /// Position in [`Stage::ALL`]; used to index per-stage arrays.
    #[inline]
    pub fn index(self) -> usize {
        match self {
            Stage::Counter    => 0,
            Stage::UpdateDesk => 1,
            Stage::ReportDesk => 2,
        }
    }

    /// Short snake-case label, used in column names and log fields.
    pub fn label(self) -> &'static str {
        match self {
            Stage::Counter    => "counter",
            Stage::UpdateDesk => "update",
            Stage::ReportDesk => "report",
        }
    }
}

impl fmt::Display for Stage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

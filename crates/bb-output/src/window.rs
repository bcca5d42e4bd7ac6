//! Row selection for display: the first rows, an optional middle slice, and
//! the last rows.

use std::ops::Range;

use bb_sim::StateRow;

/// Which rows of a state vector to show.
///
/// With the defaults, a run of at most 20 rows is shown whole; a longer one
/// shows rows `0..10`, then the middle slice (if any), then the last 10.
/// The middle slice is clipped so no row appears twice.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RowWindow {
    head:   usize,
    tail:   usize,
    middle: Option<Range<usize>>,
}

impl Default for RowWindow {
    fn default() -> Self {
        Self { head: 10, tail: 10, middle: None }
    }
}

impl RowWindow {
    pub fn new() -> Self {
        Self::default()
    }

    /// Also show `len` rows starting at index `start`.
    pub fn middle(mut self, start: usize, len: usize) -> Self {
        self.middle = Some(start..start.saturating_add(len));
        self
    }

    pub fn head(mut self, head: usize) -> Self {
        self.head = head;
        self
    }

    pub fn tail(mut self, tail: usize) -> Self {
        self.tail = tail;
        self
    }

    /// The selected rows with their indices, in order.
    pub fn select<'a>(&self, rows: &'a [StateRow]) -> Vec<(usize, &'a StateRow)> {
        self.ranges(rows.len())
            .into_iter()
            .flatten()
            .map(|i| (i, &rows[i]))
            .collect()
    }

    /// Disjoint, ascending index ranges for a vector of `len` rows.
    fn ranges(&self, len: usize) -> Vec<Range<usize>> {
        if len <= self.head + self.tail {
            return vec![0..len];
        }
        let tail_start = len - self.tail;
        let mut out = vec![0..self.head];
        if let Some(m) = &self.middle {
            let start = m.start.max(self.head);
            let end = m.end.min(tail_start);
            if start < end {
                out.push(start..end);
            }
        }
        out.push(tail_start..len);
        out
    }
}

//! Running statistics.
//!
//! Only counter completions touch these accumulators, and they never decrease
//! or reset during a run.

/// Running sums and count behind the reported averages.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Statistics {
    wait_sum:           f64,
    time_in_system_sum: f64,
    completed:          u64,
}

impl Statistics {
    pub fn new() -> Self {
        Self::default()
    }

    /// A customer finished paying and left after `time_in_system`.
    pub fn record_departure(&mut self, time_in_system: f64) {
        self.time_in_system_sum += time_in_system;
        self.completed += 1;
    }

    /// A queued customer reached a counter after waiting `waited`.
    pub fn record_wait(&mut self, waited: f64) {
        self.wait_sum += waited;
    }

    pub fn completed(&self) -> u64 {
        self.completed
    }

    pub fn snapshot(&self) -> StatsSnapshot {
        StatsSnapshot {
            wait_sum:           self.wait_sum,
            time_in_system_sum: self.time_in_system_sum,
            completed:          self.completed,
            avg_wait:           average(self.wait_sum, self.completed),
            avg_time_in_system: average(self.time_in_system_sum, self.completed),
        }
    }
}

/// The statistics columns of one state-vector row.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct StatsSnapshot {
    /// Cumulative counter wait time.
    pub wait_sum:           f64,
    /// Cumulative time in system of customers who left from a counter.
    pub time_in_system_sum: f64,
    /// Customers who finished at a counter.
    pub completed:          u64,
    /// `wait_sum / completed`, or `0` before the first completion.
    pub avg_wait:           f64,
    /// `time_in_system_sum / completed`, or `0` before the first completion.
    pub avg_time_in_system: f64,
}

#[inline]
fn average(sum: f64, count: u64) -> f64 {
    if count == 0 { 0.0 } else { sum / count as f64 }
}

//! `bb-sim` — discrete-event engine of the bank-branch simulation.
//!
//! # Event loop
//!
//! ```text
//! push Init(−1)
//! loop:
//!   ① pop the earliest event (FIFO among equal times), advance the clock
//!   ② dispatch:
//!        Init              → Arrival(0), EndOfSimulation(horizon)
//!        Arrival           → next Arrival (if ≤ horizon), route, admit
//!        ServiceCompletion → release, statistics, route onward, pull queue
//!        EndOfSimulation   → finish
//!   ③ snapshot the branch into a StateRow
//! until EndOfSimulation has been dispatched
//! ```
//!
//! The end-of-simulation event produces a row of its own, so the row count
//! equals the number of dispatched events, init and end included.
//!
//! # Quick-start
//!
//! ```rust,ignore
//! use bb_core::SimConfig;
//!
//! let output = bb_sim::run(SimConfig::default())?;
//! println!("{} rows", output.row_count());
//! ```

pub mod builder;
pub mod error;
pub mod observer;
pub mod row;
pub mod sim;
pub mod station;
pub mod stats;

#[cfg(test)]
mod tests;

use bb_core::{SimConfig, UniformSource};

pub use builder::SimBuilder;
pub use error::{SimError, SimResult};
pub use observer::{NoopObserver, RowCollector, SimObserver};
pub use row::{
    ArrivalDraw, EventLabel, EventTag, QueueLengths, ServerSnapshot, ServiceRecord,
    StageServers, StateRow,
};
pub use sim::{RunState, Sim};
pub use station::{Pulled, Station};
pub use stats::{Statistics, StatsSnapshot};

/// The ordered state vector of one run.
#[derive(Debug, Clone, PartialEq)]
pub struct SimOutput {
    pub rows: Vec<StateRow>,
}

impl SimOutput {
    pub fn row_count(&self) -> usize {
        self.rows.len()
    }

    pub fn last(&self) -> Option<&StateRow> {
        self.rows.last()
    }
}

/// Run one replication drawing from a `SimRng` seeded with `config.seed`.
pub fn run(config: SimConfig) -> SimResult<SimOutput> {
    collect(SimBuilder::new(config).build()?)
}

/// Run one replication drawing from `source`.
pub fn run_with_source<S: UniformSource>(config: SimConfig, source: S) -> SimResult<SimOutput> {
    collect(SimBuilder::new(config).source(source).build()?)
}

fn collect<S: UniformSource>(mut sim: Sim<S>) -> SimResult<SimOutput> {
    let mut collector = RowCollector::new();
    sim.run(&mut collector)?;
    Ok(SimOutput { rows: collector.into_rows() })
}

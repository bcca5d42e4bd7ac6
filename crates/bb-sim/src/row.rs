//! State-vector rows: one snapshot of the whole branch per dispatched event.
//!
//! The schema is fixed.  Per-server columns come from
//! [`StageServers::servers`], whose length is the configured capacity of the
//! stage, so renderers never synthesise field names.

use std::fmt;

use bb_core::Stage;
use bb_model::{RouteDraw, ServerPool};
use bb_variates::ServiceDraw;

use crate::StatsSnapshot;

/// Kind of the event a row records.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum EventTag {
    Init,
    Arrival,
    ServiceCompletion,
    EndOfSimulation,
}

impl EventTag {
    pub fn name(self) -> &'static str {
        match self {
            EventTag::Init              => "init",
            EventTag::Arrival           => "arrival",
            EventTag::ServiceCompletion => "service_completion",
            EventTag::EndOfSimulation   => "end_of_simulation",
        }
    }
}

/// Event description: kind plus customer number where applicable.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct EventLabel {
    pub tag:      EventTag,
    pub customer: Option<u32>,
}

impl fmt::Display for EventLabel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.customer {
            Some(id) => write!(f, "{} customer {}", self.tag.name(), id),
            None     => f.write_str(self.tag.name()),
        }
    }
}

/// Interarrival draw made while processing an arrival.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ArrivalDraw {
    pub rnd:          f64,
    pub interarrival: f64,
    /// `clock + interarrival`.
    pub next_arrival: f64,
    /// `false` when `next_arrival` falls past the horizon and was dropped.
    pub scheduled:    bool,
}

/// A service that started during this event.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ServiceRecord {
    pub slot:     u32,
    pub customer: u32,
    pub draw:     ServiceDraw,
    /// Scheduled completion time.
    pub ends_at:  f64,
}

/// Waiting-line lengths.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct QueueLengths {
    pub counter: usize,
    pub update:  usize,
    pub report:  usize,
}

impl QueueLengths {
    pub fn get(&self, stage: Stage) -> usize {
        match stage {
            Stage::Counter    => self.counter,
            Stage::UpdateDesk => self.update,
            Stage::ReportDesk => self.report,
        }
    }

    pub fn total(&self) -> usize {
        self.counter + self.update + self.report
    }
}

/// One server's state at the time of the row.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ServerSnapshot {
    pub slot:       u32,
    pub busy:       bool,
    pub customer:   Option<u32>,
    pub busy_until: Option<f64>,
}

/// Every server of one stage, in slot order.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct StageServers {
    pub stage:   Stage,
    pub servers: Vec<ServerSnapshot>,
}

impl StageServers {
    pub fn capture(pool: &ServerPool) -> Self {
        let servers = pool
            .iter()
            .map(|s| ServerSnapshot {
                slot:       s.id.slot,
                busy:       s.is_busy(),
                customer:   s.serving.map(u32::from),
                busy_until: s.busy_until.map(|t| t.value()),
            })
            .collect();
        Self { stage: pool.stage(), servers }
    }

    /// Configured capacity of the stage.
    pub fn total(&self) -> usize {
        self.servers.len()
    }

    pub fn busy_count(&self) -> usize {
        self.servers.iter().filter(|s| s.busy).count()
    }
}

/// One snapshot of the branch, taken after an event was processed.
///
/// Draw columns (`arrival`, `routing`, `counter`, `update`, `report`) are only
/// filled for what this event touched; queues, servers, and statistics are
/// always a full snapshot.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct StateRow {
    /// Dispatch order, starting at 0 for the init event.
    pub index:   u64,
    pub clock:   f64,
    pub event:   EventLabel,

    pub arrival: Option<ArrivalDraw>,
    pub routing: Option<RouteDraw>,
    pub counter: Option<ServiceRecord>,
    pub update:  Option<ServiceRecord>,
    pub report:  Option<ServiceRecord>,

    /// Second normal sample waiting for the next report-desk service.
    pub pending_report_sample: Option<f64>,

    pub queues:  QueueLengths,
    /// Counter, update desk, report desk, in that order.
    pub servers: Vec<StageServers>,
    pub stats:   StatsSnapshot,

    /// Customers who arrived and have not left.
    pub in_system: u32,
}

impl StateRow {
    /// The service record of `stage`, if a service started there.
    pub fn service(&self, stage: Stage) -> Option<&ServiceRecord> {
        match stage {
            Stage::Counter    => self.counter.as_ref(),
            Stage::UpdateDesk => self.update.as_ref(),
            Stage::ReportDesk => self.report.as_ref(),
        }
    }

    /// Server snapshots of `stage`.
    pub fn stage_servers(&self, stage: Stage) -> Option<&StageServers> {
        self.servers.iter().find(|s| s.stage == stage)
    }

    /// Busy servers across all stages.
    pub fn busy_servers(&self) -> usize {
        self.servers.iter().map(StageServers::busy_count).sum()
    }
}

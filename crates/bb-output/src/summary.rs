//! Aggregate figures over a finished run.

use std::fmt;

use bb_core::Stage;
use bb_sim::{EventTag, StateRow, StatsSnapshot};

/// Minutes per simulated hour; the clock runs in minutes.
const MINUTES_PER_HOUR: f64 = 60.0;

/// One `f64` per stage.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct StageFigures {
    pub counter: f64,
    pub update:  f64,
    pub report:  f64,
}

impl StageFigures {
    pub fn get(&self, stage: Stage) -> f64 {
        match stage {
            Stage::Counter    => self.counter,
            Stage::UpdateDesk => self.update,
            Stage::ReportDesk => self.report,
        }
    }

    fn from_fn(mut f: impl FnMut(Stage) -> f64) -> Self {
        Self {
            counter: f(Stage::Counter),
            update:  f(Stage::UpdateDesk),
            report:  f(Stage::ReportDesk),
        }
    }
}

/// Summary of a state vector.
#[derive(Debug, Clone, PartialEq)]
pub struct RunSummary {
    pub total_events:      usize,
    pub arrivals:          usize,
    pub completions:       usize,
    /// Unweighted mean of each waiting line over all rows.
    pub mean_queue:        StageFigures,
    /// Busy fraction of each stage's servers in the final row.
    pub final_utilisation: StageFigures,
    pub final_clock:       f64,
    pub final_stats:       StatsSnapshot,
    pub final_in_system:   u32,
    /// Events per simulated hour; `0` when the clock never passed zero.
    pub events_per_hour:   f64,
}

impl RunSummary {
    /// Summarise `rows`, or `None` when there are none.
    pub fn from_rows(rows: &[StateRow]) -> Option<Self> {
        let last = rows.last()?;
        let count_tag = |tag: EventTag| rows.iter().filter(|r| r.event.tag == tag).count();

        let n = rows.len() as f64;
        let mean_queue = StageFigures::from_fn(|stage| {
            rows.iter().map(|r| r.queues.get(stage) as f64).sum::<f64>() / n
        });
        let final_utilisation = StageFigures::from_fn(|stage| match last.stage_servers(stage) {
            Some(s) if s.total() > 0 => s.busy_count() as f64 / s.total() as f64,
            _ => 0.0,
        });
        let events_per_hour = if last.clock > 0.0 {
            n / (last.clock / MINUTES_PER_HOUR)
        } else {
            0.0
        };

        Some(Self {
            total_events: rows.len(),
            arrivals: count_tag(EventTag::Arrival),
            completions: count_tag(EventTag::ServiceCompletion),
            mean_queue,
            final_utilisation,
            final_clock: last.clock,
            final_stats: last.stats,
            final_in_system: last.in_system,
            events_per_hour,
        })
    }
}

impl fmt::Display for RunSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Events          : {} ({} arrivals, {} completions)",
            self.total_events, self.arrivals, self.completions)?;
        writeln!(f, "Final clock     : {:.4} ({:.2} events/h)", self.final_clock, self.events_per_hour)?;
        writeln!(f, "Completed       : {}  |  in system: {}",
            self.final_stats.completed, self.final_in_system)?;
        writeln!(f, "Avg wait        : {:.4}", self.final_stats.avg_wait)?;
        writeln!(f, "Avg time in sys : {:.4}", self.final_stats.avg_time_in_system)?;
        writeln!(f)?;
        writeln!(f, "{:<10} {:>12} {:>14}", "Stage", "Mean queue", "Final busy %")?;
        writeln!(f, "{}", "-".repeat(38))?;
        for stage in Stage::ALL {
            writeln!(
                f,
                "{:<10} {:>12.4} {:>14.1}",
                stage.label(),
                self.mean_queue.get(stage),
                self.final_utilisation.get(stage) * 100.0,
            )?;
        }
        Ok(())
    }
}

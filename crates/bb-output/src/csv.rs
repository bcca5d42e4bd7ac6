//! CSV output backend.
//!
//! Writes one file, `state_vector.csv`, with one record per dispatched
//! event.  The header is fixed once the server counts are known: every
//! server gets its own `<stage>_<n>_busy`, `<stage>_<n>_customer`, and
//! `<stage>_<n>_until` columns.  Absent values are written as empty fields.

use std::fs::File;
use std::io;
use std::path::Path;

use bb_core::{SimConfig, Stage};
use bb_sim::{ServiceRecord, StateRow};
use bb_variates::ServiceDraw;
use csv::Writer;

use crate::writer::OutputWriter;
use crate::{OutputError, OutputResult};

/// File name used by [`CsvWriter::create`].
pub const STATE_VECTOR_FILE: &str = "state_vector.csv";

/// Writes the state vector as CSV.
pub struct CsvWriter<W: io::Write = File> {
    inner:    Writer<W>,
    /// Servers per stage, indexed by `Stage::index()`.
    layout:   [usize; 3],
    rows:     u64,
    finished: bool,
}

impl CsvWriter<File> {
    /// Create `dir/state_vector.csv` and write the header row.
    pub fn create(dir: &Path, config: &SimConfig) -> OutputResult<Self> {
        Self::from_writer(File::create(dir.join(STATE_VECTOR_FILE))?, config)
    }
}

impl<W: io::Write> CsvWriter<W> {
    /// Wrap any writer and write the header row.
    pub fn from_writer(writer: W, config: &SimConfig) -> OutputResult<Self> {
        let layout = Stage::ALL.map(|s| config.server_count(s) as usize);
        let mut inner = Writer::from_writer(writer);
        inner.write_record(header(layout))?;
        Ok(Self { inner, layout, rows: 0, finished: false })
    }

    /// Records written so far, header excluded.
    pub fn rows_written(&self) -> u64 {
        self.rows
    }

    /// Flush and return the wrapped writer.
    pub fn into_inner(self) -> OutputResult<W> {
        self.inner.into_inner().map_err(|e| OutputError::Io(e.into_error()))
    }

    fn check_layout(&self, row: &StateRow) -> OutputResult<()> {
        for stage in Stage::ALL {
            let expected = self.layout[stage.index()];
            let found = row.stage_servers(stage).map_or(0, |s| s.total());
            if found != expected {
                return Err(OutputError::ServerLayout { row: row.index, stage, expected, found });
            }
        }
        Ok(())
    }
}

impl<W: io::Write> OutputWriter for CsvWriter<W> {
    fn write_row(&mut self, row: &StateRow) -> OutputResult<()> {
        self.check_layout(row)?;
        self.inner.write_record(record(row))?;
        self.rows += 1;
        Ok(())
    }

    fn finish(&mut self) -> OutputResult<()> {
        if self.finished {
            return Ok(());
        }
        self.finished = true;
        self.inner.flush()?;
        Ok(())
    }
}

// ── Schema ────────────────────────────────────────────────────────────────────

const SERVICE_FIELDS: [&str; 7] = ["server", "customer", "rnd1", "rnd2", "sample", "time", "end"];

fn header(layout: [usize; 3]) -> Vec<String> {
    let mut cols: Vec<String> = [
        "index", "clock", "event", "customer",
        "arrival_rnd", "interarrival", "next_arrival",
        "route_rnd1", "route_rnd2", "route",
    ]
    .into_iter()
    .map(str::to_owned)
    .collect();

    for stage in Stage::ALL {
        cols.extend(SERVICE_FIELDS.iter().map(|f| format!("{}_{f}", stage.label())));
    }
    cols.push("report_pending".to_owned());
    cols.extend(Stage::ALL.iter().map(|s| format!("{}_queue", s.label())));

    for stage in Stage::ALL {
        for slot in 1..=layout[stage.index()] {
            for field in ["busy", "customer", "until"] {
                cols.push(format!("{}_{slot}_{field}", stage.label()));
            }
        }
    }

    cols.extend(
        ["wait_sum", "time_in_system_sum", "completed", "avg_wait", "avg_time_in_system", "in_system"]
            .into_iter()
            .map(str::to_owned),
    );
    cols
}

fn record(row: &StateRow) -> Vec<String> {
    let mut out = vec![
        row.index.to_string(),
        row.clock.to_string(),
        row.event.tag.name().to_owned(),
        opt(row.event.customer),
        opt(row.arrival.map(|a| a.rnd)),
        opt(row.arrival.map(|a| a.interarrival)),
        opt(row.arrival.map(|a| a.next_arrival)),
        opt(row.routing.map(|r| r.rnd_expired)),
        opt(row.routing.and_then(|r| r.rnd_report)),
        row.routing.map(|r| r.route.label().to_owned()).unwrap_or_default(),
    ];

    for stage in Stage::ALL {
        push_service(&mut out, row.service(stage));
    }
    out.push(opt(row.pending_report_sample));
    out.extend(Stage::ALL.iter().map(|&s| row.queues.get(s).to_string()));

    for stage in &row.servers {
        for server in &stage.servers {
            out.push(u8::from(server.busy).to_string());
            out.push(opt(server.customer));
            out.push(opt(server.busy_until));
        }
    }

    let s = row.stats;
    out.extend([
        s.wait_sum.to_string(),
        s.time_in_system_sum.to_string(),
        s.completed.to_string(),
        s.avg_wait.to_string(),
        s.avg_time_in_system.to_string(),
        row.in_system.to_string(),
    ]);
    out
}

fn push_service(out: &mut Vec<String>, service: Option<&ServiceRecord>) {
    let Some(rec) = service else {
        out.extend(std::iter::repeat_n(String::new(), SERVICE_FIELDS.len()));
        return;
    };
    let (rnd1, rnd2) = match rec.draw {
        ServiceDraw::Single(v)       => (v.rnd, None),
        ServiceDraw::FreshNormal(p)  => (p.rnd1, Some(p.rnd2)),
        ServiceDraw::CachedNormal(c) => (c.rnd1, Some(c.rnd2)),
    };
    out.extend([
        rec.slot.to_string(),
        rec.customer.to_string(),
        rnd1.to_string(),
        opt(rnd2),
        rec.draw.raw().to_string(),
        rec.draw.duration().to_string(),
        rec.ends_at.to_string(),
    ]);
}

fn opt<T: ToString>(value: Option<T>) -> String {
    value.map(|v| v.to_string()).unwrap_or_default()
}

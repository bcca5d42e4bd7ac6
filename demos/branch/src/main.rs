//! branch — one replication of the bank-branch simulation.
//!
//! ```text
//! branch [config.json] [out_dir] [--middle START LEN]
//! ```
//!
//! Loads the configuration (defaults for any missing field, or entirely when
//! no file is given), runs until the horizon, writes `state_vector.csv` to
//! `out_dir` when given, and prints a window of rows plus the run summary.
//! Set `RUST_LOG=debug` to trace every dispatched event.

use std::fs;
use std::path::PathBuf;
use std::time::Instant;

use anyhow::{Context, Result};
use clap::Parser;
use tracing::info;
use tracing_subscriber::EnvFilter;

use bb_core::{SimConfig, Stage};
use bb_output::{CsvWriter, RowWindow, RunSummary, SimOutputObserver};
use bb_sim::{RowCollector, SimBuilder, SimObserver, StateRow};

#[derive(Parser)]
#[command(name = "branch")]
#[command(about = "Discrete-event simulation of a bank branch")]
struct Cli {
    /// JSON configuration; omitted fields take their defaults
    config: Option<PathBuf>,

    /// Directory for state_vector.csv; nothing is written when omitted
    out_dir: Option<PathBuf>,

    /// Also print LEN rows starting at START
    #[arg(long, num_args = 2, value_names = ["START", "LEN"])]
    middle: Option<Vec<usize>>,
}

// ── Observer fan-out ──────────────────────────────────────────────────────────

/// Keeps every row for the summary and streams them to the CSV if requested.
struct Recorder {
    rows:   RowCollector,
    output: Option<SimOutputObserver<CsvWriter>>,
}

impl SimObserver for Recorder {
    fn on_row(&mut self, row: &StateRow) {
        self.rows.on_row(row);
        if let Some(out) = &mut self.output {
            out.on_row(row);
        }
    }

    fn on_sim_end(&mut self, final_clock: f64, rows: u64) {
        if let Some(out) = &mut self.output {
            out.on_sim_end(final_clock, rows);
        }
    }
}

// ── main ──────────────────────────────────────────────────────────────────────

fn load_config(path: Option<&PathBuf>) -> Result<SimConfig> {
    let Some(path) = path else {
        return Ok(SimConfig::default());
    };
    let text = fs::read_to_string(path)
        .with_context(|| format!("reading {}", path.display()))?;
    serde_json::from_str(&text).with_context(|| format!("parsing {}", path.display()))
}

fn print_rows(rows: &[StateRow], window: &RowWindow) {
    println!(
        "{:>6} {:>12}  {:<32} {:>5} {:>5} {:>5} {:>5} {:>10} {:>10}",
        "#", "clock", "event", "q_cnt", "q_upd", "q_rep", "busy", "avg_wait", "avg_sys"
    );
    println!("{}", "-".repeat(100));
    let mut prev = None;
    for (i, row) in window.select(rows) {
        if prev.is_some_and(|p| p + 1 != i) {
            println!("{:>6}", "...");
        }
        prev = Some(i);
        println!(
            "{:>6} {:>12.4}  {:<32} {:>5} {:>5} {:>5} {:>5} {:>10.4} {:>10.4}",
            i,
            row.clock,
            row.event.to_string(),
            row.queues.get(Stage::Counter),
            row.queues.get(Stage::UpdateDesk),
            row.queues.get(Stage::ReportDesk),
            row.busy_servers(),
            row.stats.avg_wait,
            row.stats.avg_time_in_system,
        );
    }
    println!();
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_target(false)
        .init();

    let cli = Cli::parse();
    let config = load_config(cli.config.as_ref())?;

    println!("=== branch — bank-branch simulation ===");
    println!(
        "Horizon: {}  |  Counters: {}  |  Update desks: {}  |  Report desks: {}  |  Seed: {}",
        config.horizon,
        config.counter_count,
        config.update_desk_count,
        config.report_desk_count,
        config.seed,
    );
    println!();

    let output = match &cli.out_dir {
        Some(dir) => {
            fs::create_dir_all(dir).with_context(|| format!("creating {}", dir.display()))?;
            Some(SimOutputObserver::new(CsvWriter::create(dir, &config)?))
        }
        None => None,
    };
    let mut recorder = Recorder { rows: RowCollector::new(), output };

    let mut sim = SimBuilder::new(config).build()?;
    let t0 = Instant::now();
    sim.run(&mut recorder)?;
    info!(elapsed_ms = t0.elapsed().as_millis() as u64, "run complete");

    if let Some(out) = &mut recorder.output {
        if let Some(e) = out.take_error() {
            eprintln!("output error: {e}");
        } else if let Some(dir) = &cli.out_dir {
            println!(
                "Wrote {} rows to {}",
                out.writer().rows_written(),
                dir.join(bb_output::STATE_VECTOR_FILE).display()
            );
            println!();
        }
    }

    let rows = recorder.rows.into_rows();
    let window = match cli.middle.as_deref() {
        Some(&[start, len]) => RowWindow::new().middle(start, len),
        _ => RowWindow::new(),
    };
    print_rows(&rows, &window);

    if let Some(summary) = RunSummary::from_rows(&rows) {
        print!("{summary}");
    }
    Ok(())
}

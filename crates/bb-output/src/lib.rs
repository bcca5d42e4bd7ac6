//! `bb-output` — state-vector output for the bank-branch simulation.
//!
//! | Module     | Contents                                                     |
//! |------------|--------------------------------------------------------------|
//! | [`csv`]    | `CsvWriter`: `state_vector.csv`, one column per server       |
//! | [`observer`] | `SimOutputObserver`: drives any writer from `Sim::run`     |
//! | [`summary`]| `RunSummary`: aggregate figures over a finished run          |
//! | [`window`] | `RowWindow`: first / middle / last rows for display          |
//!
//! # Usage
//!
//! ```rust,ignore
//! use bb_output::{CsvWriter, SimOutputObserver};
//!
//! let writer = CsvWriter::create(Path::new("./output"), &config)?;
//! let mut obs = SimOutputObserver::new(writer);
//! sim.run(&mut obs)?;
//! if let Some(e) = obs.take_error() {
//!     eprintln!("output error: {e}");
//! }
//! ```

pub mod csv;
pub mod error;
pub mod observer;
pub mod summary;
pub mod window;
pub mod writer;


pub use csv::{CsvWriter, STATE_VECTOR_FILE};
pub use error::{OutputError, OutputResult};
pub use observer::SimOutputObserver;
pub use summary::{RunSummary, StageFigures};
pub use window::RowWindow;
pub use writer::OutputWriter;

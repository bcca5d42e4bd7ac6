//! `bb-core` — foundational types for the bank-branch discrete-event simulation.
//!
//! This crate is a dependency of every other `bb-*` crate.  It has no `bb-*`
//! dependencies and minimal external ones (only `rand` and `thiserror`, plus
//! optional `serde`).
//!
//! # What lives here
//!
//! | Module          | Contents                                              |
//! |-----------------|-------------------------------------------------------|
//! | [`ids`]         | `CustomerId`, `IdAllocator`                           |
//! | [`time`]        | `SimTime`                                             |
//! | [`stage`]       | `Stage` enum (counter, update desk, report desk)      |
//! | [`config`]      | `SimConfig` and its validation                        |
//! | [`rng`]         | `UniformSource`, `SimRng`, `SequenceSource`, `CountingSource` |
//! | [`error`]       | `CoreError`, `ConfigError`, `CoreResult`              |
//!
//! # Feature flags
//!
//! | Flag    | Effect                                                     |
//! |---------|------------------------------------------------------------|
//! | `serde` | Adds `Serialize`/`Deserialize` to all public types.        |

pub mod config;
pub mod error;
pub mod ids;
pub mod rng;
pub mod stage;
pub mod time;


// ── Re-exports ────────────────────────────────────────────────────────────────

pub use config::SimConfig;
pub use error::{ConfigError, CoreError, CoreResult};
pub use ids::{CustomerId, IdAllocator};
pub use rng::{CountingSource, SequenceSource, SimRng, UniformSource};
pub use stage::Stage;
pub use time::SimTime;

//! `bb-model` — the entities of the bank-branch simulation.
//!
//! # Crate layout
//!
//! | Module          | Contents                                                  |
//! |-----------------|-----------------------------------------------------------|
//! | [`customer`]    | `Customer`                                                |
//! | [`route`]       | `Route`, `RouteDraw`, `draw_route`                        |
//! | [`server`]      | `ServerId`, `Server`, `ServerPool`                        |
//! | [`queue`]       | `StationQueue` (FIFO waiting line of one stage)           |
//! | [`error`]       | `ModelError`, `ModelResult`                               |
//!
//! The types here hold state and enforce their own invariants (a busy server
//! cannot be occupied twice, a queue only holds customers of its stage) but
//! contain no scheduling logic; that lives in `bb-sim`.

pub mod customer;
pub mod error;
pub mod queue;
pub mod route;
pub mod server;


pub use customer::Customer;
pub use error::{ModelError, ModelResult};
pub use queue::StationQueue;
pub use route::{draw_route, Route, RouteDraw};
pub use server::{Server, ServerId, ServerPool};

//! `bb-events` — events and the pending-event queue.
//!
//! | Module          | Contents                                              |
//! |-----------------|-------------------------------------------------------|
//! | [`event`]       | `Event`, `EventKind`                                  |
//! | [`queue`]       | `EventQueue` (time-ordered, FIFO among equal times)   |
//! | [`error`]       | `EventError`, `EventResult`                           |

pub mod error;
pub mod event;
pub mod queue;

#[cfg(test)]
mod tests;

pub use error::{EventError, EventResult};
pub use event::{Event, EventKind};
pub use queue::EventQueue;

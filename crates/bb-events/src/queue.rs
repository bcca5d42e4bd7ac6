//! `EventQueue` — pending events ordered by time.
//!
//! # Ordering
//!
//! Events pop in non-decreasing time order.  Events that share a time pop in
//! the order they were inserted (FIFO).  That tie-break is part of the
//! model's observable behaviour: with a horizon of `0` the first arrival and
//! the end-of-simulation event both sit at `t = 0`, and the arrival, scheduled
//! first, is dispatched first.
//!
//! # Performance note
//!
//! `BTreeMap` gives O(log T) insert and pop where T = number of distinct
//! pending times.  The branch rarely holds more than a few dozen pending
//! events, so the constant is tiny.

use std::collections::{BTreeMap, VecDeque};

use bb_core::SimTime;

use crate::{Event, EventError, EventResult};

#[derive(Debug, Default)]
pub struct EventQueue {
    inner: BTreeMap<SimTime, VecDeque<Event>>,
    /// Cached total event count for O(1) `len()`.
    total: usize,
}

impl EventQueue {
    pub fn new() -> Self {
        Self::default()
    }

    /// Schedule `event`, behind any event already pending at the same time.
    pub fn push(&mut self, event: Event) {
        self.inner.entry(event.time).or_default().push_back(event);
        self.total += 1;
    }

    /// Remove and return the earliest event.
    pub fn pop_earliest(&mut self) -> EventResult<Event> {
        let mut slot = self.inner.first_entry().ok_or(EventError::Empty)?;
        let event = slot.get_mut().pop_front().ok_or(EventError::Empty)?;
        if slot.get().is_empty() {
            slot.remove();
        }
        self.total -= 1;
        Ok(event)
    }

    /// Time of the earliest pending event, or `None` if empty.
    pub fn next_time(&self) -> Option<SimTime> {
        self.inner.keys().next().copied()
    }

    /// Pending events in dispatch order.
    pub fn iter(&self) -> impl Iterator<Item = &Event> + '_ {
        self.inner.values().flatten()
    }

    pub fn len(&self) -> usize {
        self.total
    }

    pub fn is_empty(&self) -> bool {
        self.total == 0
    }

    /// Drop every pending event.
    pub fn clear(&mut self) {
        self.inner.clear();
        self.total = 0;
    }
}

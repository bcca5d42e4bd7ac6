//! The `Customer` entity.

use bb_core::{CustomerId, SimTime, Stage};

use crate::Route;

/// One customer visiting the branch.
///
/// A customer is either waiting in exactly one [`StationQueue`] or being
/// served by exactly one busy server (in which case it travels inside the
/// pending completion event).
///
/// [`StationQueue`]: crate::StationQueue
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Customer {
    pub id: CustomerId,

    /// Fixed at arrival.
    pub route: Route,

    /// When the customer entered the branch.
    pub system_arrival: SimTime,

    /// When the customer started waiting for its current stage.  Reset on
    /// every stage transfer.
    pub stage_arrival: SimTime,

    pub stage: Stage,

    /// `true` while in a queue, `false` while being served.
    pub waiting: bool,
}

impl Customer {
    /// A customer entering the branch at `now`, bound for its route's first
    /// stage.
    pub fn arrive(id: CustomerId, route: Route, now: SimTime) -> Self {
        Self {
            id,
            route,
            system_arrival: now,
            stage_arrival:  now,
            stage:          route.first_stage(),
            waiting:        false,
        }
    }

    /// Move to `stage`, restarting the wait clock at `now`.
    pub fn transfer(&mut self, stage: Stage, now: SimTime) {
        self.stage = stage;
        self.stage_arrival = now;
        self.waiting = false;
    }

    /// The stage after the current one, or `None` if the customer leaves.
    #[inline]
    pub fn next_stage(&self) -> Option<Stage> {
        self.route.after(self.stage)
    }

    /// Time spent waiting at the current stage up to `now`.
    #[inline]
    pub fn waited(&self, now: SimTime) -> f64 {
        now.since(self.stage_arrival)
    }

    /// Time spent in the branch up to `now`.
    #[inline]
    pub fn time_in_system(&self, now: SimTime) -> f64 {
        now.since(self.system_arrival)
    }
}

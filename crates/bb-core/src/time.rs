//! Simulation time model.
//!
//! # Design
//!
//! Time is continuous: a `SimTime` wraps an `f64` clock reading.  The event
//! queue needs a total order to key its map, so `SimTime` implements `Ord`
//! via `f64::total_cmp`.  Two rules keep that order meaningful:
//!
//! - NaN and infinities never become a `SimTime` (`SimTime::new` rejects them).
//! - `-0.0` is normalised to `0.0`, since `total_cmp` orders them apart.
//!
//! The only negative time in a run is [`SimTime::INIT`], the slot of the
//! initialisation event.

use std::cmp::Ordering;
use std::fmt;

use crate::{CoreError, CoreResult};

/// An absolute point on the simulation clock.
#[derive(Copy, Clone, Debug, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SimTime(f64);

impl SimTime {
    pub const ZERO: SimTime = SimTime(0.0);

    /// The time of the initialisation event, before the first arrival.
    pub const INIT: SimTime = SimTime(-1.0);

    /// Wrap a clock reading, rejecting non-finite values.
    pub fn new(value: f64) -> CoreResult<Self> {
        if !value.is_finite() {
            return Err(CoreError::NonFiniteTime(value));
        }
        // `0.0 == -0.0`, so this also folds negative zero.
        Ok(SimTime(if value == 0.0 { 0.0 } else { value }))
    }

    #[inline]
    pub fn value(self) -> f64 {
        self.0
    }

    /// The time `duration` after `self`.
    #[inline]
    pub fn after(self, duration: f64) -> CoreResult<SimTime> {
        SimTime::new(self.0 + duration)
    }

    /// Time elapsed from `earlier` to `self`.
    #[inline]
    pub fn since(self, earlier: SimTime) -> f64 {
        self.0 - earlier.0
    }
}

impl PartialEq for SimTime {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for SimTime {}

impl PartialOrd for SimTime {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for SimTime {
    fn cmp(&self, other: &Self) -> Ordering {
        self.0.total_cmp(&other.0)
    }
}

impl fmt::Display for SimTime {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "t={:.4}", self.0)
    }
}

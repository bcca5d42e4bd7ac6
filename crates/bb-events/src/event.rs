//! Simulation events.

use std::fmt;

use bb_core::{CustomerId, SimTime};
use bb_model::{Customer, ServerId};

/// What happens at an event's time.
#[derive(Debug, Clone, PartialEq)]
pub enum EventKind {
    /// Fires once, first, at [`SimTime::INIT`].  Schedules the first arrival
    /// and the end of the run.
    Init,

    /// A customer walks in.  Its route is drawn when the event is processed.
    Arrival { customer: CustomerId },

    /// `server` finishes serving `customer`.
    ServiceCompletion { customer: Customer, server: ServerId },

    /// Terminal event at the configured horizon.
    EndOfSimulation,
}

impl EventKind {
    /// Short snake-case name of the kind.
    pub fn name(&self) -> &'static str {
        match self {
            EventKind::Init                     => "init",
            EventKind::Arrival { .. }           => "arrival",
            EventKind::ServiceCompletion { .. } => "service_completion",
            EventKind::EndOfSimulation          => "end_of_simulation",
        }
    }

    /// The customer the event concerns, if any.
    pub fn customer(&self) -> Option<CustomerId> {
        match self {
            EventKind::Arrival { customer }              => Some(*customer),
            EventKind::ServiceCompletion { customer, .. } => Some(customer.id),
            EventKind::Init | EventKind::EndOfSimulation  => None,
        }
    }
}

/// A scheduled event.  Created when scheduled, consumed when dispatched.
#[derive(Debug, Clone, PartialEq)]
pub struct Event {
    pub time: SimTime,
    pub kind: EventKind,
}

impl Event {
    #[inline]
    pub fn new(time: SimTime, kind: EventKind) -> Self {
        Self { time, kind }
    }

    pub fn init() -> Self {
        Self::new(SimTime::INIT, EventKind::Init)
    }

    pub fn arrival(time: SimTime, customer: CustomerId) -> Self {
        Self::new(time, EventKind::Arrival { customer })
    }

    pub fn completion(time: SimTime, customer: Customer, server: ServerId) -> Self {
        Self::new(time, EventKind::ServiceCompletion { customer, server })
    }

    pub fn end_of_simulation(time: SimTime) -> Self {
        Self::new(time, EventKind::EndOfSimulation)
    }
}

impl fmt::Display for Event {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.kind {
            EventKind::ServiceCompletion { customer, server } => {
                write!(f, "{} {} at {} ({})", self.kind.name(), customer.id, server, self.time)
            }
            kind => match kind.customer() {
                Some(id) => write!(f, "{} {} ({})", kind.name(), id, self.time),
                None     => write!(f, "{} ({})", kind.name(), self.time),
            },
        }
    }
}

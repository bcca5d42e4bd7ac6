//! Per-stage queueing and server assignment.
//!
//! # Admission rule
//!
//! An incoming customer is served at once only when a server is idle **and**
//! the waiting line is empty.  If anyone is already waiting the newcomer joins
//! the back of the line, even if a server happens to be idle at that instant.
//! This keeps service strictly FIFO per stage.
//!
//! # Completion
//!
//! A finished server is released, then pulls the head of its own line (if
//! any) and starts a new service with a fresh sample.  The two halves are
//! separate calls so the driver can route the finished customer onward in
//! between.

use bb_core::{SimConfig, SimTime, Stage, UniformSource};
use bb_events::{Event, EventQueue};
use bb_model::{Customer, ServerId, ServerPool, StationQueue};
use bb_variates::ServiceTime;
use tracing::trace;

use crate::row::ServiceRecord;
use crate::SimResult;

/// A customer pulled from the line when a server freed up.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Pulled {
    pub record: ServiceRecord,
    /// How long the customer waited at this stage.
    pub waited: f64,
}

/// Queue, servers, and service-time sampler of one stage.
#[derive(Debug, Clone)]
pub struct Station {
    stage:   Stage,
    queue:   StationQueue,
    servers: ServerPool,
    service: ServiceTime,
}

impl Station {
    pub fn new(stage: Stage, config: &SimConfig) -> Self {
        Self {
            stage,
            queue:   StationQueue::new(stage),
            servers: ServerPool::new(stage, config.server_count(stage)),
            service: ServiceTime::for_stage(stage, config),
        }
    }

    #[inline]
    pub fn stage(&self) -> Stage {
        self.stage
    }

    pub fn queue(&self) -> &StationQueue {
        &self.queue
    }

    pub fn servers(&self) -> &ServerPool {
        &self.servers
    }

    pub fn service(&self) -> &ServiceTime {
        &self.service
    }

    /// Serve `customer` now, or put it at the back of the line.
    ///
    /// Returns the started service, or `None` if the customer was queued.
    pub fn admit<S: UniformSource>(
        &mut self,
        customer: Customer,
        now:      SimTime,
        source:   &mut S,
        events:   &mut EventQueue,
    ) -> SimResult<Option<ServiceRecord>> {
        match self.servers.first_idle() {
            Some(server) if self.queue.is_empty() => {
                self.start_service(server, customer, now, source, events).map(Some)
            }
            _ => {
                trace!(
                    stage = %self.stage,
                    customer = customer.id.get(),
                    queue = self.queue.len() + 1,
                    "customer queued"
                );
                self.queue.push(customer)?;
                Ok(None)
            }
        }
    }

    /// Free `server` after it finished with `customer`.
    pub fn release(&mut self, server: ServerId, customer: &Customer) -> SimResult<()> {
        self.servers.release(server, customer.id)?;
        Ok(())
    }

    /// Let the freed `server` take the head of the line.  Returns `None` and
    /// leaves the server idle when nobody is waiting.
    pub fn pull_next<S: UniformSource>(
        &mut self,
        server: ServerId,
        now:    SimTime,
        source: &mut S,
        events: &mut EventQueue,
    ) -> SimResult<Option<Pulled>> {
        let Some(next) = self.queue.pop() else {
            return Ok(None);
        };
        let waited = next.waited(now);
        let record = self.start_service(server, next, now, source, events)?;
        Ok(Some(Pulled { record, waited }))
    }

    fn start_service<S: UniformSource>(
        &mut self,
        server:   ServerId,
        customer: Customer,
        now:      SimTime,
        source:   &mut S,
        events:   &mut EventQueue,
    ) -> SimResult<ServiceRecord> {
        let draw = self.service.sample(source);
        let ends_at = now.after(draw.duration())?;
        self.servers.occupy(server, customer.id, ends_at)?;

        trace!(
            server = %server,
            customer = customer.id.get(),
            ends_at = ends_at.value(),
            "service started"
        );
        let record = ServiceRecord {
            slot:     server.slot,
            customer: customer.id.get(),
            draw,
            ends_at:  ends_at.value(),
        };
        events.push(Event::completion(ends_at, customer, server));
        Ok(record)
    }
}

//! The `Sim` struct and its event loop.

use bb_core::{CustomerId, IdAllocator, SimConfig, SimTime, Stage, UniformSource};
use bb_events::{Event, EventKind, EventQueue};
use bb_model::{draw_route, Customer, ModelError, RouteDraw, ServerId};
use bb_variates::{exponential, ServiceTime};
use tracing::{debug, info};

use crate::row::{
    ArrivalDraw, EventLabel, EventTag, QueueLengths, ServiceRecord, StageServers, StateRow,
};
use crate::station::Station;
use crate::{SimError, SimObserver, SimResult, Statistics};

/// Lifecycle of a run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RunState {
    /// Built, init event not yet dispatched.
    NotStarted,
    Running,
    /// The end-of-simulation event was dispatched; nothing else will be.
    Finished,
}

// ── Per-event draw columns ────────────────────────────────────────────────────

/// Draws made while processing one event, collected for its row.
///
/// Each stage starts at most one service per event: an arrival admits to one
/// stage, a completion admits onward to a different stage and pulls at its
/// own, so one slot per stage suffices.
#[derive(Default)]
struct EventDraws {
    arrival:  Option<ArrivalDraw>,
    routing:  Option<RouteDraw>,
    services: [Option<ServiceRecord>; 3],
}

// ── Sim ───────────────────────────────────────────────────────────────────────

/// The main simulation runner.
///
/// `Sim<S>` owns every piece of mutable state of one replication: the clock,
/// the pending events, the three stations, the statistics, and the uniform
/// source `S`.  Each call to [`step`][Sim::step] dispatches exactly one event:
///
/// 1. Pop the earliest event and advance the clock to its time.
/// 2. Dispatch by kind:
///    - `Init`            → schedule the first arrival at `0` and the end
///                          of the run at the horizon.
///    - `Arrival`         → schedule the next arrival (if within the
///                          horizon), draw the route, admit to its first stage.
///    - `ServiceCompletion` → release the server, update statistics at the
///                          counter, route the customer onward or let it
///                          leave, and let the server pull its line.
///    - `EndOfSimulation` → finish.
/// 3. Snapshot the branch into a [`StateRow`].
///
/// Create via [`SimBuilder`][crate::SimBuilder].
pub struct Sim<S: UniformSource> {
    /// Validated by the builder and read-only afterwards.  Stations copy
    /// their service parameters from it at construction.
    config:     SimConfig,
    source:     S,
    clock:      SimTime,
    state:      RunState,
    events:     EventQueue,
    /// Indexed by `Stage::index()`.
    stations:   [Station; 3],
    stats:      Statistics,
    ids:        IdAllocator,
    in_system:  u32,
    dispatched: u64,
}

impl<S: UniformSource> Sim<S> {
    /// Assemble a run with only the init event pending.  The config must
    /// already be validated; [`SimBuilder`][crate::SimBuilder] does that.
    pub(crate) fn new(config: SimConfig, source: S) -> Self {
        let stations = Stage::ALL.map(|stage| Station::new(stage, &config));
        let mut events = EventQueue::new();
        events.push(Event::init());

        Self {
            config,
            source,
            clock: SimTime::INIT,
            state: RunState::NotStarted,
            events,
            stations,
            stats: Statistics::new(),
            ids: IdAllocator::new(),
            in_system: 0,
            dispatched: 0,
        }
    }

    // ── Public API ────────────────────────────────────────────────────────

    /// Dispatch events until the end-of-simulation event has been processed.
    ///
    /// Calls `observer.on_row` once per event.
    pub fn run<O: SimObserver>(&mut self, observer: &mut O) -> SimResult<()> {
        info!(
            horizon = self.config.horizon,
            counters = self.config.counter_count,
            update_desks = self.config.update_desk_count,
            report_desks = self.config.report_desk_count,
            "simulation started"
        );
        while self.state != RunState::Finished {
            let row = self.step()?;
            observer.on_row(&row);
        }
        info!(
            clock = self.clock.value(),
            rows = self.dispatched,
            completed = self.stats.completed(),
            "simulation finished"
        );
        observer.on_sim_end(self.clock.value(), self.dispatched);
        Ok(())
    }

    /// Dispatch exactly one event and return its row.
    ///
    /// Fails with [`SimError::AlreadyFinished`] once the run is over; pending
    /// events past the horizon are never dispatched.
    pub fn step(&mut self) -> SimResult<StateRow> {
        if self.state == RunState::Finished {
            return Err(SimError::AlreadyFinished);
        }

        let event = self.events.pop_earliest()?;
        if event.time < self.clock {
            return Err(SimError::TimeWentBackwards { clock: self.clock, event: event.time });
        }
        self.clock = event.time;
        debug!(clock = self.clock.value(), event = %event, "dispatch");

        let label = EventLabel {
            tag:      tag_of(&event.kind),
            customer: event.kind.customer().map(CustomerId::get),
        };
        let mut draws = EventDraws::default();

        match event.kind {
            EventKind::Init => self.on_init()?,
            EventKind::Arrival { customer } => {
                self.require_running("arrival")?;
                self.on_arrival(customer, &mut draws)?;
            }
            EventKind::ServiceCompletion { customer, server } => {
                self.require_running("service_completion")?;
                self.on_completion(customer, server, &mut draws)?;
            }
            EventKind::EndOfSimulation => {
                self.require_running("end_of_simulation")?;
                self.state = RunState::Finished;
            }
        }

        let row = self.snapshot(label, draws);
        self.dispatched += 1;
        Ok(row)
    }

    /// The validated configuration this run was built with.
    pub fn config(&self) -> &SimConfig {
        &self.config
    }

    #[inline]
    pub fn clock(&self) -> SimTime {
        self.clock
    }

    #[inline]
    pub fn state(&self) -> RunState {
        self.state
    }

    pub fn station(&self, stage: Stage) -> &Station {
        &self.stations[stage.index()]
    }

    pub fn stats(&self) -> &Statistics {
        &self.stats
    }

    /// Events still waiting to be dispatched.
    pub fn pending_events(&self) -> &EventQueue {
        &self.events
    }

    /// Customers who arrived and have not left.
    #[inline]
    pub fn in_system(&self) -> u32 {
        self.in_system
    }

    /// Events dispatched so far, which is also the number of rows produced.
    #[inline]
    pub fn dispatched(&self) -> u64 {
        self.dispatched
    }

    /// Give back the uniform source, e.g. to inspect a counting source.
    pub fn into_source(self) -> S {
        self.source
    }

    // ── Event handlers ────────────────────────────────────────────────────

    fn on_init(&mut self) -> SimResult<()> {
        if self.state != RunState::NotStarted {
            return Err(SimError::DuplicateInit);
        }
        self.state = RunState::Running;

        // The arrival goes in first so it wins the tie when the horizon is 0.
        let first = self.ids.next_id();
        self.schedule(Event::arrival(SimTime::ZERO, first))?;
        let end = SimTime::new(self.config.horizon)?;
        self.schedule(Event::end_of_simulation(end))
    }

    fn on_arrival(&mut self, id: CustomerId, draws: &mut EventDraws) -> SimResult<()> {
        let interarrival = exponential(&mut self.source, self.config.mean_interarrival);
        let next_at = self.clock.after(interarrival.value)?;
        let scheduled = next_at.value() <= self.config.horizon;
        if scheduled {
            let next_id = self.ids.next_id();
            self.schedule(Event::arrival(next_at, next_id))?;
        }
        draws.arrival = Some(ArrivalDraw {
            rnd:          interarrival.rnd,
            interarrival: interarrival.value,
            next_arrival: next_at.value(),
            scheduled,
        });

        let routing = draw_route(
            &mut self.source,
            self.config.proportion_expired,
            self.config.proportion_to_report,
        );
        draws.routing = Some(routing);

        self.in_system += 1;
        let customer = Customer::arrive(id, routing.route, self.clock);
        self.admit(customer, draws)
    }

    fn on_completion(
        &mut self,
        customer: Customer,
        server:   ServerId,
        draws:    &mut EventDraws,
    ) -> SimResult<()> {
        let stage = server.stage;
        if customer.stage != stage {
            return Err(ModelError::StageMismatch {
                customer: customer.id,
                expected: stage,
                found:    customer.stage,
            }
            .into());
        }
        self.stations[stage.index()].release(server, &customer)?;

        if stage == Stage::Counter {
            self.stats.record_departure(customer.time_in_system(self.clock));
        }

        match customer.next_stage() {
            Some(next) => {
                let mut customer = customer;
                customer.transfer(next, self.clock);
                self.admit(customer, draws)?;
            }
            None => {
                self.in_system = self.in_system.checked_sub(1).ok_or(SimError::EmptySystem)?;
            }
        }

        let pulled = self.stations[stage.index()].pull_next(
            server,
            self.clock,
            &mut self.source,
            &mut self.events,
        )?;
        if let Some(pulled) = pulled {
            if stage == Stage::Counter {
                self.stats.record_wait(pulled.waited);
            }
            draws.services[stage.index()] = Some(pulled.record);
        }
        Ok(())
    }

    // ── Helpers ───────────────────────────────────────────────────────────

    fn admit(&mut self, customer: Customer, draws: &mut EventDraws) -> SimResult<()> {
        let stage = customer.stage;
        let started = self.stations[stage.index()].admit(
            customer,
            self.clock,
            &mut self.source,
            &mut self.events,
        )?;
        if started.is_some() {
            draws.services[stage.index()] = started;
        }
        Ok(())
    }

    fn schedule(&mut self, event: Event) -> SimResult<()> {
        if event.time < self.clock {
            return Err(SimError::ScheduledInPast { clock: self.clock, at: event.time });
        }
        self.events.push(event);
        Ok(())
    }

    fn require_running(&self, kind: &'static str) -> SimResult<()> {
        match self.state {
            RunState::Running => Ok(()),
            RunState::NotStarted => Err(SimError::NotStarted(kind)),
            RunState::Finished => Err(SimError::AlreadyFinished),
        }
    }

    fn snapshot(&self, event: EventLabel, draws: EventDraws) -> StateRow {
        let [counter, update, report] = draws.services;
        let queue_len = |stage: Stage| self.stations[stage.index()].queue().len();
        let pending_report_sample = match self.stations[Stage::ReportDesk.index()].service() {
            ServiceTime::PairedNormal { cache, .. } => cache.pending().map(|c| c.value),
            _ => None,
        };

        StateRow {
            index: self.dispatched,
            clock: self.clock.value(),
            event,
            arrival: draws.arrival,
            routing: draws.routing,
            counter,
            update,
            report,
            pending_report_sample,
            queues: QueueLengths {
                counter: queue_len(Stage::Counter),
                update:  queue_len(Stage::UpdateDesk),
                report:  queue_len(Stage::ReportDesk),
            },
            servers: self
                .stations
                .iter()
                .map(|s| StageServers::capture(s.servers()))
                .collect(),
            stats: self.stats.snapshot(),
            in_system: self.in_system,
        }
    }
}

fn tag_of(kind: &EventKind) -> EventTag {
    match kind {
        EventKind::Init                     => EventTag::Init,
        EventKind::Arrival { .. }           => EventTag::Arrival,
        EventKind::ServiceCompletion { .. } => EventTag::ServiceCompletion,
        EventKind::EndOfSimulation          => EventTag::EndOfSimulation,
    }
}

//! Integration tests for bb-sim.

use bb_core::{SequenceSource, SimConfig};

use crate::{run, run_with_source, SimOutput, StateRow};

// ── Helpers ───────────────────────────────────────────────────────────────────

fn test_config(horizon: f64) -> SimConfig {
    SimConfig { horizon, ..SimConfig::default() }
}

fn constant(u: f64) -> SequenceSource {
    SequenceSource::constant(u).unwrap()
}

fn seeded_run(seed: u64, horizon: f64) -> SimOutput {
    run(SimConfig { seed, ..test_config(horizon) }).unwrap()
}

/// Busy servers plus waiting customers, which must equal `in_system`.
fn accounted(row: &StateRow) -> usize {
    row.queues.total() + row.busy_servers()
}

// ── SimBuilder validation ─────────────────────────────────────────────────────

#[cfg(test)]
mod builder_tests {
    use bb_core::ConfigError;

    use super::*;
    use crate::{RunState, SimBuilder, SimError};

    #[test]
    fn builds_with_only_init_pending() {
        let sim = SimBuilder::new(test_config(100.0)).build().unwrap();
        assert_eq!(sim.state(), RunState::NotStarted);
        assert_eq!(sim.pending_events().len(), 1);
        assert_eq!(sim.dispatched(), 0);
    }

    #[test]
    fn built_sim_keeps_the_validated_config() {
        let cfg = SimConfig { counter_count: 2, mean_interarrival: 30.0, ..test_config(250.0) };
        let mut sim = SimBuilder::new(cfg.clone()).build().unwrap();
        assert_eq!(sim.config(), &cfg);
        assert_eq!(sim.station(bb_core::Stage::Counter).servers().len(), 2);

        sim.run(&mut crate::NoopObserver).unwrap();
        assert_eq!(sim.config(), &cfg);
        assert_eq!(sim.clock().value(), 250.0);
    }

    #[test]
    fn invalid_config_rejected_before_any_event() {
        let cfg = SimConfig { counter_count: 0, ..test_config(100.0) };
        let result = SimBuilder::new(cfg).build();
        assert!(matches!(
            result,
            Err(SimError::Config(ConfigError::NoServers(bb_core::Stage::Counter)))
        ));
    }

    #[test]
    fn run_surfaces_config_errors() {
        let cfg = SimConfig { proportion_expired: 1.5, ..test_config(100.0) };
        assert!(matches!(run(cfg), Err(SimError::Config(_))));
    }
}

// ── Basic run ─────────────────────────────────────────────────────────────────

#[cfg(test)]
mod run_tests {
    use super::*;
    use crate::{EventTag, NoopObserver, RunState, SimBuilder, SimError, SimObserver};

    /// With horizon 0: init, the first arrival, then the end event.
    #[test]
    fn zero_horizon_dispatches_three_events() {
        let out = seeded_run(42, 0.0);
        assert_eq!(out.row_count(), 3);

        let tags: Vec<EventTag> = out.rows.iter().map(|r| r.event.tag).collect();
        assert_eq!(tags, [EventTag::Init, EventTag::Arrival, EventTag::EndOfSimulation]);
        let clocks: Vec<f64> = out.rows.iter().map(|r| r.clock).collect();
        assert_eq!(clocks, [-1.0, 0.0, 0.0]);

        let last = out.last().unwrap();
        assert_eq!(last.queues.total(), 0);
        assert_eq!(last.in_system, 1);
        assert_eq!(last.busy_servers(), 1);
        assert!(!out.rows[1].arrival.unwrap().scheduled);
    }

    #[test]
    fn init_row_is_empty_snapshot() {
        let out = seeded_run(1, 100.0);
        let init = &out.rows[0];
        assert_eq!(init.index, 0);
        assert_eq!(init.event.to_string(), "init");
        assert!(init.arrival.is_none() && init.routing.is_none());
        assert_eq!(init.busy_servers(), 0);
        assert_eq!(init.servers.len(), 3);
        assert_eq!(init.stage_servers(bb_core::Stage::Counter).unwrap().total(), 4);
    }

    #[test]
    fn last_row_is_end_of_simulation_at_horizon() {
        let out = seeded_run(7, 2_000.0);
        let last = out.last().unwrap();
        assert_eq!(last.event.tag, EventTag::EndOfSimulation);
        assert_eq!(last.clock, 2_000.0);
        assert_eq!(out.rows.iter().filter(|r| r.event.tag == EventTag::EndOfSimulation).count(), 1);
    }

    #[test]
    fn clock_is_non_decreasing() {
        let out = seeded_run(42, 20_000.0);
        for pair in out.rows.windows(2) {
            assert!(pair[0].clock <= pair[1].clock, "{} > {}", pair[0].clock, pair[1].clock);
        }
    }

    #[test]
    fn rows_are_indexed_in_dispatch_order() {
        let out = seeded_run(3, 5_000.0);
        for (i, row) in out.rows.iter().enumerate() {
            assert_eq!(row.index, i as u64);
        }
    }

    #[test]
    fn busy_servers_never_exceed_capacity() {
        let cfg = SimConfig {
            counter_count:      1,
            mean_interarrival:  10.0,
            ..test_config(10_000.0)
        };
        let out = run(cfg).unwrap();
        for row in &out.rows {
            for stage in &row.servers {
                assert!(stage.busy_count() <= stage.total());
            }
        }
        // The overloaded single counter does build a line.
        assert!(out.rows.iter().any(|r| r.queues.counter > 1));
    }

    #[test]
    fn customers_are_conserved() {
        for seed in [1, 2, 3] {
            let out = seeded_run(seed, 20_000.0);
            for row in &out.rows {
                assert_eq!(accounted(row), row.in_system as usize, "row {}", row.index);
            }
        }
    }

    #[test]
    fn averages_match_sums() {
        let out = seeded_run(42, 20_000.0);
        for row in &out.rows {
            let s = row.stats;
            if s.completed == 0 {
                assert_eq!(s.avg_wait, 0.0);
                assert_eq!(s.avg_time_in_system, 0.0);
            } else {
                assert_eq!(s.avg_wait, s.wait_sum / s.completed as f64);
                assert_eq!(s.avg_time_in_system, s.time_in_system_sum / s.completed as f64);
            }
        }
        assert!(out.last().unwrap().stats.completed > 0);
    }

    #[test]
    fn statistics_never_decrease() {
        let out = seeded_run(9, 20_000.0);
        for pair in out.rows.windows(2) {
            let (a, b) = (pair[0].stats, pair[1].stats);
            assert!(a.wait_sum <= b.wait_sum);
            assert!(a.time_in_system_sum <= b.time_in_system_sum);
            assert!(a.completed <= b.completed);
        }
    }

    #[test]
    fn same_seed_same_rows() {
        assert_eq!(seeded_run(42, 10_000.0), seeded_run(42, 10_000.0));
    }

    #[test]
    fn different_seeds_differ() {
        assert_ne!(seeded_run(1, 10_000.0), seeded_run(2, 10_000.0));
    }

    #[test]
    fn arrivals_never_scheduled_past_horizon() {
        let horizon = 5_000.0;
        let out = seeded_run(11, horizon);
        let mut dropped = 0;
        for row in &out.rows {
            if row.event.tag == EventTag::Arrival {
                assert!(row.clock <= horizon);
            }
            if let Some(a) = row.arrival {
                assert_eq!(a.scheduled, a.next_arrival <= horizon);
                dropped += usize::from(!a.scheduled);
            }
        }
        assert_eq!(dropped, 1, "exactly the last arrival drops its successor");
    }

    #[test]
    fn arrival_ids_are_sequential() {
        let out = seeded_run(5, 5_000.0);
        let ids: Vec<u32> = out
            .rows
            .iter()
            .filter(|r| r.event.tag == EventTag::Arrival)
            .filter_map(|r| r.event.customer)
            .collect();
        let expected: Vec<u32> = (1..=ids.len() as u32).collect();
        assert_eq!(ids, expected);
    }

    #[test]
    fn step_after_finish_is_an_error() {
        let mut sim = SimBuilder::new(test_config(500.0)).build().unwrap();
        sim.run(&mut NoopObserver).unwrap();
        assert_eq!(sim.state(), RunState::Finished);
        assert!(matches!(sim.step(), Err(SimError::AlreadyFinished)));
    }

    /// Observer that counts rows and records the end callback.
    #[derive(Default)]
    struct Counter {
        rows:  u64,
        ended: Option<(f64, u64)>,
    }

    impl SimObserver for Counter {
        fn on_row(&mut self, _row: &StateRow) {
            self.rows += 1;
        }
        fn on_sim_end(&mut self, final_clock: f64, rows: u64) {
            self.ended = Some((final_clock, rows));
        }
    }

    #[test]
    fn observer_sees_every_row() {
        let mut sim = SimBuilder::new(test_config(3_000.0)).build().unwrap();
        let mut obs = Counter::default();
        sim.run(&mut obs).unwrap();
        assert_eq!(obs.rows, sim.dispatched());
        assert_eq!(obs.ended, Some((3_000.0, sim.dispatched())));
    }

    #[test]
    fn scripted_source_runs() {
        let out = run_with_source(test_config(1_000.0), constant(0.5)).unwrap();
        assert!(out.row_count() > 3);
    }
}

// ── Scenarios ─────────────────────────────────────────────────────────────────

#[cfg(test)]
mod scenario_tests {
    use bb_core::{CountingSource, SimRng, Stage};
    use bb_model::Route;
    use bb_variates::ServiceDraw;

    use super::*;
    use crate::EventTag;

    /// One counter, nobody with expired invoices, every uniform 0.5: service
    /// (27.5) is shorter than the interarrival time (≈41.59), so nobody waits.
    #[test]
    fn single_counter_never_builds_a_line() {
        let cfg = SimConfig {
            counter_count:      1,
            proportion_expired: 0.0,
            ..test_config(2_000.0)
        };
        let out = run_with_source(cfg, constant(0.5)).unwrap();

        for row in &out.rows {
            assert!(row.queues.counter <= 1);
            assert_eq!(row.queues.update + row.queues.report, 0);
            if let Some(r) = row.routing {
                assert_eq!(r.route, Route::Pay);
            }
            if let Some(c) = row.counter {
                assert_eq!(c.draw.duration(), 27.5);
            }
            assert!(row.update.is_none() && row.report.is_none());
        }

        let stats = out.last().unwrap().stats;
        assert!(stats.completed > 0);
        assert_eq!(stats.wait_sum, 0.0);
        assert!((stats.avg_time_in_system - 27.5).abs() < 1e-9);
    }

    /// Update-only customers go back to the counter with a fresh wait clock,
    /// and their time in system spans both stages.
    #[test]
    fn update_desk_routes_back_to_counter() {
        let cfg = SimConfig {
            proportion_expired:   1.0,
            proportion_to_report: 0.0,
            ..test_config(1_000.0)
        };
        let out = run_with_source(cfg, constant(0.5)).unwrap();

        // The first update completion admits customer 1 to a counter at once.
        let update_done = out
            .rows
            .iter()
            .find(|r| r.event.tag == EventTag::ServiceCompletion && r.counter.is_some())
            .unwrap();
        assert_eq!(update_done.event.customer, Some(1));
        assert_eq!(update_done.counter.unwrap().customer, 1);

        // Its counter completion records update (≈27.73) + counter (27.5).
        let paid = out.rows.iter().find(|r| r.stats.completed == 1).unwrap();
        assert_eq!(paid.event.customer, Some(1));
        let expected = -40.0 * 0.5f64.ln() + 27.5;
        assert!((paid.stats.time_in_system_sum - expected).abs() < 1e-9);
        assert_eq!(paid.stats.wait_sum, 0.0);
    }

    /// One counter, arrivals every 10·ln 2 ≈ 6.93, service 27.5: customer k
    /// (0-based) starts at 27.5·k and waits k·(27.5 − 10·ln 2).  Waits are
    /// recorded when the counter pulls each customer, so after 18 completions
    /// customers 1..=18 have contributed.
    #[test]
    fn counter_line_accumulates_exact_waits() {
        let cfg = SimConfig {
            counter_count:      1,
            proportion_expired: 0.0,
            mean_interarrival:  10.0,
            ..test_config(500.0)
        };
        let out = run_with_source(cfg, constant(0.5)).unwrap();
        let stats = out.last().unwrap().stats;

        let per_step = 27.5 - 10.0 * 2f64.ln();
        let expected = per_step * (1..=18).sum::<u32>() as f64;
        assert_eq!(stats.completed, 18);
        assert!((stats.wait_sum - expected).abs() < 1e-6, "{} vs {expected}", stats.wait_sum);
        assert!((stats.avg_wait - expected / 18.0).abs() < 1e-6);
        assert!(out.rows.iter().any(|r| r.queues.counter > 5));

        // The first wait lands on the first counter completion, at 27.5.
        let first = out.rows.iter().find(|r| r.stats.completed == 1).unwrap();
        assert_eq!(first.clock, 27.5);
        assert!((first.stats.wait_sum - per_step).abs() < 1e-9);
    }

    /// Waiting at the update and report desks never counts toward `wait_sum`.
    #[test]
    fn desk_lines_leave_wait_unchanged() {
        let cfg = SimConfig {
            proportion_expired:   1.0,
            proportion_to_report: 1.0,
            mean_interarrival:    5.0,
            update_service_mean:  4.0,
            report_service_mean:  60.0,
            ..test_config(2_000.0)
        };
        let out = run(cfg).unwrap();
        assert!(out.rows.iter().any(|r| r.queues.report > 1));
        for row in &out.rows {
            assert_eq!(row.stats.wait_sum, 0.0);
            assert_eq!(row.stats.completed, 0);
        }
    }

    /// Two consecutive report-desk services share one pair of uniforms.
    #[test]
    fn report_desk_consumes_one_pair_per_two_services() {
        let cfg = SimConfig {
            proportion_expired:   1.0,
            proportion_to_report: 1.0,
            ..test_config(20_000.0)
        };
        let mut source = CountingSource::new(SimRng::new(42));
        let out = run_with_source(cfg, &mut source).unwrap();

        let mut expected_draws = 0u64;
        let mut report_draws = Vec::new();
        for row in &out.rows {
            if row.arrival.is_some() {
                expected_draws += 3; // interarrival + two routing draws
            }
            if row.update.is_some() {
                expected_draws += 1;
            }
            assert!(row.counter.is_none(), "report customers never pay here");
            if let Some(r) = row.report {
                if matches!(r.draw, ServiceDraw::FreshNormal(_)) {
                    expected_draws += 2;
                }
                report_draws.push(r.draw);
            }
        }
        assert_eq!(source.draws(), expected_draws);
        assert!(report_draws.len() >= 4);

        // Fresh, cached, fresh, cached, …; each cached value is the previous
        // pair's second sample.
        for (i, draw) in report_draws.iter().enumerate() {
            match (i % 2, draw) {
                (0, ServiceDraw::FreshNormal(_)) => {}
                (1, ServiceDraw::CachedNormal(cached)) => {
                    let ServiceDraw::FreshNormal(pair) = report_draws[i - 1] else {
                        unreachable!()
                    };
                    assert_eq!(cached.value, pair.second);
                    assert_eq!((cached.rnd1, cached.rnd2), (pair.rnd1, pair.rnd2));
                }
                _ => panic!("report draw {i} out of order: {draw:?}"),
            }
        }
    }

    #[test]
    fn report_customers_leave_after_report_desk() {
        let cfg = SimConfig {
            proportion_expired:   1.0,
            proportion_to_report: 1.0,
            ..test_config(5_000.0)
        };
        let out = run(cfg).unwrap();
        assert!(out.rows.iter().all(|r| r.stats.completed == 0));
        let report_busy = |r: &StateRow| r.stage_servers(Stage::ReportDesk).unwrap().busy_count();
        assert!(out.rows.iter().any(|r| report_busy(r) > 0));
        for row in &out.rows {
            assert_eq!(accounted(row), row.in_system as usize);
        }
    }
}

// ── Station admission ─────────────────────────────────────────────────────────

#[cfg(test)]
mod station_tests {
    use bb_core::{CustomerId, SimTime, Stage};
    use bb_events::{EventKind, EventQueue};
    use bb_model::{Customer, Route, ServerId};

    use super::*;
    use crate::Station;

    fn t(v: f64) -> SimTime {
        SimTime::new(v).unwrap()
    }

    fn payer(id: u32, at: f64) -> Customer {
        Customer::arrive(CustomerId(id), Route::Pay, t(at))
    }

    /// A newcomer joins a non-empty line even while a server is idle.
    #[test]
    fn newcomer_never_jumps_the_line() {
        let cfg = SimConfig { counter_count: 2, ..SimConfig::default() };
        let mut station = Station::new(Stage::Counter, &cfg);
        let mut events = EventQueue::new();
        let mut src = constant(0.5);

        assert!(station.admit(payer(1, 0.0), t(0.0), &mut src, &mut events).unwrap().is_some());
        assert!(station.admit(payer(2, 1.0), t(1.0), &mut src, &mut events).unwrap().is_some());
        assert!(station.admit(payer(3, 2.0), t(2.0), &mut src, &mut events).unwrap().is_none());
        assert_eq!(events.len(), 2);

        // Free counter 1 without pulling: one idle server, one waiting customer.
        let s1 = ServerId::new(Stage::Counter, 1);
        station.release(s1, &payer(1, 0.0)).unwrap();
        assert_eq!(station.servers().first_idle(), Some(s1));

        assert!(station.admit(payer(4, 3.0), t(3.0), &mut src, &mut events).unwrap().is_none());
        assert_eq!(station.queue().len(), 2);

        // The freed server takes customer 3, who waited 10.
        let pulled = station.pull_next(s1, t(12.0), &mut src, &mut events).unwrap().unwrap();
        assert_eq!(pulled.record.customer, 3);
        assert_eq!(pulled.waited, 10.0);
        assert_eq!(pulled.record.ends_at, 39.5);
        assert_eq!(station.queue().iter().next().unwrap().id, CustomerId(4));
    }

    #[test]
    fn completion_event_targets_the_assigned_server() {
        let cfg = SimConfig::default();
        let mut station = Station::new(Stage::Counter, &cfg);
        let mut events = EventQueue::new();
        let mut src = constant(0.5);

        let record = station
            .admit(payer(1, 5.0), t(5.0), &mut src, &mut events)
            .unwrap()
            .unwrap();
        assert_eq!(record.slot, 1);
        assert_eq!(record.ends_at, 32.5);

        let event = events.pop_earliest().unwrap();
        assert_eq!(event.time, t(32.5));
        match event.kind {
            EventKind::ServiceCompletion { customer, server } => {
                assert_eq!(customer.id, CustomerId(1));
                assert!(!customer.waiting);
                assert_eq!(server, ServerId::new(Stage::Counter, 1));
            }
            other => panic!("unexpected event {other:?}"),
        }
    }

    #[test]
    fn pull_with_empty_line_leaves_server_idle() {
        let cfg = SimConfig::default();
        let mut station = Station::new(Stage::UpdateDesk, &cfg);
        let mut events = EventQueue::new();
        let mut src = constant(0.5);
        let c = Customer::arrive(CustomerId(1), Route::Update, t(0.0));

        station.admit(c.clone(), t(0.0), &mut src, &mut events).unwrap();
        let s1 = ServerId::new(Stage::UpdateDesk, 1);
        station.release(s1, &c).unwrap();
        assert!(station.pull_next(s1, t(30.0), &mut src, &mut events).unwrap().is_none());
        assert_eq!(station.servers().busy_count(), 0);
    }

    #[test]
    fn releasing_an_idle_server_is_fatal() {
        let cfg = SimConfig::default();
        let mut station = Station::new(Stage::Counter, &cfg);
        let err = station.release(ServerId::new(Stage::Counter, 1), &payer(1, 0.0));
        assert!(matches!(err, Err(crate::SimError::Model(_))));
    }
}

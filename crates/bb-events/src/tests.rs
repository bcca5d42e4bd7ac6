//! Unit tests for bb-events.

#[cfg(test)]
mod queue {
    use bb_core::{CustomerId, SimTime, Stage};
    use bb_model::{Customer, Route, ServerId};

    use crate::{Event, EventError, EventKind, EventQueue};

    fn t(v: f64) -> SimTime {
        SimTime::new(v).unwrap()
    }

    #[test]
    fn empty_queue_pop_fails() {
        let mut q = EventQueue::new();
        assert_eq!(q.pop_earliest(), Err(EventError::Empty));
        assert_eq!(q.next_time(), None);
    }

    #[test]
    fn pops_in_time_order() {
        let mut q = EventQueue::new();
        q.push(Event::arrival(t(30.0), CustomerId(3)));
        q.push(Event::end_of_simulation(t(100.0)));
        q.push(Event::init());
        q.push(Event::arrival(t(5.0), CustomerId(1)));
        assert_eq!(q.len(), 4);
        assert_eq!(q.next_time(), Some(SimTime::INIT));

        let times: Vec<f64> = std::iter::from_fn(|| q.pop_earliest().ok())
            .map(|e| e.time.value())
            .collect();
        assert_eq!(times, [-1.0, 5.0, 30.0, 100.0]);
        assert!(q.is_empty());
    }

    /// Equal-time events pop in insertion order (FIFO tie-break).
    #[test]
    fn equal_times_pop_fifo() {
        let mut q = EventQueue::new();
        q.push(Event::arrival(t(0.0), CustomerId(1)));
        q.push(Event::end_of_simulation(t(0.0)));
        q.push(Event::arrival(t(0.0), CustomerId(2)));

        assert_eq!(q.pop_earliest().unwrap().kind, EventKind::Arrival { customer: CustomerId(1) });
        assert_eq!(q.pop_earliest().unwrap().kind, EventKind::EndOfSimulation);
        assert_eq!(q.pop_earliest().unwrap().kind, EventKind::Arrival { customer: CustomerId(2) });
    }

    #[test]
    fn negative_zero_shares_slot_with_zero() {
        let mut q = EventQueue::new();
        q.push(Event::arrival(t(0.0), CustomerId(1)));
        q.push(Event::arrival(t(-0.0), CustomerId(2)));
        let order: Vec<_> = q.iter().filter_map(|e| e.kind.customer()).collect();
        assert_eq!(order, [CustomerId(1), CustomerId(2)]);
    }

    #[test]
    fn completion_event_carries_customer_and_server() {
        let customer = Customer::arrive(CustomerId(8), Route::Pay, t(2.0));
        let server = ServerId::new(Stage::Counter, 2);
        let event = Event::completion(t(29.5), customer, server);
        assert_eq!(event.kind.customer(), Some(CustomerId(8)));
        assert_eq!(event.kind.name(), "service_completion");
        assert!(event.to_string().starts_with("service_completion customer 8 at counter 2"));
    }

    #[test]
    fn clear_empties_queue() {
        let mut q = EventQueue::new();
        q.push(Event::arrival(t(1.0), CustomerId(1)));
        q.push(Event::arrival(t(2.0), CustomerId(2)));
        q.clear();
        assert!(q.is_empty());
        assert_eq!(q.len(), 0);
    }
}

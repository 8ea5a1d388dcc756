//! Tests for the announcement gate.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex, Weak};

use routeforge_core::{RouteForgeError, VehicleRoutingSolution};

use super::SolverEvents;

fn counting_events() -> (SolverEvents, Arc<AtomicUsize>) {
    let count = Arc::new(AtomicUsize::new(0));
    let seen = Arc::clone(&count);
    let events = SolverEvents::new(
        Some(Arc::new(move |_solution: VehicleRoutingSolution| {
            seen.fetch_add(1, Ordering::SeqCst);
        })),
        None,
    );
    (events, count)
}

#[test]
fn closed_gate_discards_solutions() {
    let (events, count) = counting_events();

    assert!(!events.announce_best(VehicleRoutingSolution::default()));
    assert_eq!(count.load(Ordering::SeqCst), 0);
}

#[test]
fn open_gate_delivers_until_closed() {
    let (events, count) = counting_events();
    events.open();

    assert!(events.announce_best(VehicleRoutingSolution::default()));
    events.close();
    assert!(!events.announce_best(VehicleRoutingSolution::default()));

    assert_eq!(count.load(Ordering::SeqCst), 1);
}

#[test]
fn failure_reaches_callback_and_is_kept() {
    let reported = Arc::new(Mutex::new(Vec::new()));
    let sink = Arc::clone(&reported);
    let events = SolverEvents::new(
        None,
        Some(Arc::new(move |err: &RouteForgeError| {
            sink.lock().unwrap().push(err.to_string());
        })),
    );

    events.fail(RouteForgeError::InternalInvariant("boom".into()));

    assert_eq!(reported.lock().unwrap().len(), 1);
    assert_eq!(
        events.failure(),
        Some(RouteForgeError::InternalInvariant("boom".into()))
    );
    assert!(events.take_failure().is_some());
    assert!(events.failure().is_none());
}

#[test]
fn failure_is_recorded_before_the_callback_runs() {
    let seen = Arc::new(Mutex::new(Vec::new()));
    let sink = Arc::clone(&seen);
    let events = Arc::new_cyclic(|weak: &Weak<SolverEvents>| {
        let weak = weak.clone();
        SolverEvents::new(
            None,
            Some(Arc::new(move |_err: &RouteForgeError| {
                let recorded = weak.upgrade().and_then(|events| events.failure());
                sink.lock().unwrap().push(recorded);
            })),
        )
    });

    events.fail(RouteForgeError::InternalInvariant("early".into()));

    assert_eq!(
        *seen.lock().unwrap(),
        vec![Some(RouteForgeError::InternalInvariant("early".into()))]
    );
}

#[test]
fn open_clears_previous_failure() {
    let events = SolverEvents::default();
    events.fail(RouteForgeError::InternalInvariant("old".into()));

    events.open();

    assert!(events.failure().is_none());
}

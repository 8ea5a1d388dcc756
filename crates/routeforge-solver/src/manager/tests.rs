use std::sync::mpsc;
use std::sync::{Arc, Mutex};
use std::time::Duration;

use routeforge_config::{ConfigError, SolverConfig};
use routeforge_core::{PlanningSolution, RouteForgeError, VehicleRoutingSolution};
use routeforge_test::builders::{planning_visit, sample_solution, visit_location};
use routeforge_test::{init_test_logging, ManhattanMatrix};

use super::{RoutingSolver, SolverManager, SolverStatus};
use crate::realtime::FactChange;

fn quick_config() -> SolverConfig {
    SolverConfig::default()
        .with_random_seed(42)
        .with_late_acceptance_size(10)
        .with_unimproved_step_count_limit(Some(100))
        .with_idle_wait_millis(5)
}

#[test]
fn lifecycle_follows_start_and_stop() {
    let mut manager = SolverManager::builder()
        .with_config(quick_config())
        .build()
        .unwrap();
    assert_eq!(manager.status(), SolverStatus::Idle);

    manager.start(VehicleRoutingSolution::default()).unwrap();
    assert_eq!(manager.status(), SolverStatus::Running);

    manager.stop().unwrap();
    assert_eq!(manager.status(), SolverStatus::Idle);
}

#[test]
fn start_while_running_is_rejected() {
    let mut manager = SolverManager::builder()
        .with_config(quick_config())
        .build()
        .unwrap();
    manager.start(VehicleRoutingSolution::default()).unwrap();

    let err = manager.start(VehicleRoutingSolution::default()).unwrap_err();

    assert!(matches!(err, RouteForgeError::InvalidState(_)));
    assert!(manager.status().is_running());
}

#[test]
fn stop_when_idle_is_a_no_op() {
    let mut manager = SolverManager::builder().build().unwrap();

    assert!(manager.stop().is_ok());
    assert!(manager.stop().is_ok());
}

#[test]
fn fact_changes_need_a_running_solver() {
    let mut manager = SolverManager::builder().build().unwrap();

    let err = manager
        .add_fact_change(FactChange::RemoveVisit { visit_id: 1 })
        .unwrap_err();

    assert!(matches!(err, RouteForgeError::InvalidState(_)));
}

#[test]
fn invalid_config_fails_the_build() {
    let result = SolverManager::builder()
        .with_config(SolverConfig::default().with_late_acceptance_size(0))
        .build();

    assert!(matches!(result, Err(ConfigError::Invalid(_))));
}

#[test]
fn best_solutions_reflect_fact_changes() {
    init_test_logging();
    let matrix = ManhattanMatrix::new();
    let (tx, rx) = mpsc::channel();
    let mut manager = SolverManager::builder()
        .with_config(quick_config())
        .on_best_solution(move |solution: VehicleRoutingSolution| {
            let _ = tx.send(solution);
        })
        .build()
        .unwrap();

    manager.start(sample_solution(&matrix)).unwrap();
    let visit = planning_visit(&matrix, &visit_location(5, 2.0, 2.0));
    manager.add_fact_change(FactChange::AddVisit(visit)).unwrap();

    let routed = loop {
        let solution = rx
            .recv_timeout(Duration::from_secs(10))
            .expect("solver announced no solution with the new visit");
        if solution.visit_index(5).is_some() && solution.is_initialized() {
            break solution;
        }
    };
    manager.stop().unwrap();

    assert_eq!(routed.assigned_count(), 4);
    assert!(routed.score.is_some_and(|score| score.hard() == 0));
    // Nothing is delivered once stop has returned.
    while rx.try_recv().is_ok() {}
    std::thread::sleep(Duration::from_millis(20));
    assert!(rx.try_recv().is_err());
}

#[test]
fn fatal_change_surfaces_on_next_calls() {
    init_test_logging();
    let matrix = ManhattanMatrix::new();
    let reported = Arc::new(Mutex::new(Vec::new()));
    let sink = Arc::clone(&reported);
    let mut manager = SolverManager::builder()
        .with_config(quick_config())
        .on_error(move |err: &RouteForgeError| sink.lock().unwrap().push(err.clone()))
        .build()
        .unwrap();
    manager.start(sample_solution(&matrix)).unwrap();

    manager
        .add_fact_change(FactChange::RemoveVehicle { vehicle_id: 77 })
        .unwrap();
    while manager.failure().is_none() {
        std::thread::sleep(Duration::from_millis(2));
    }

    let err = manager
        .add_fact_change(FactChange::RemoveVisit { visit_id: 2 })
        .unwrap_err();
    assert!(err.is_fatal());
    assert!(matches!(manager.stop(), Err(RouteForgeError::InternalInvariant(_))));
    assert_eq!(manager.status(), SolverStatus::Idle);
    assert_eq!(reported.lock().unwrap().len(), 1);
}

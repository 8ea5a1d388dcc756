//! The optimizer driving the real background solver.

use std::time::{Duration, Instant};

use routeforge::{
    publish_best_solutions, RouteOptimizer, RoutingPlan, SolverConfig, SolverManager, SolverState,
};
use routeforge_test::builders::{depot_location, vehicle, visit_location};
use routeforge_test::{init_test_logging, InMemoryLocationRepository, ManhattanMatrix, RecordingPublisher};

fn wait_for_plan(
    publisher: &RecordingPublisher,
    predicate: impl Fn(&RoutingPlan) -> bool,
) -> RoutingPlan {
    let deadline = Instant::now() + Duration::from_secs(10);
    loop {
        if let Some(plan) = publisher.plans().into_iter().rev().find(|p| predicate(p)) {
            return plan;
        }
        assert!(Instant::now() < deadline, "no matching plan was published");
        std::thread::sleep(Duration::from_millis(5));
    }
}

#[test]
fn solver_routes_every_visit_and_follows_changes() {
    init_test_logging();
    let publisher = RecordingPublisher::new();
    let repository = InMemoryLocationRepository::new();
    let matrix = ManhattanMatrix::new();
    let config = SolverConfig::default()
        .with_random_seed(17)
        .with_late_acceptance_size(20)
        .with_unimproved_step_count_limit(Some(200))
        .with_idle_wait_millis(5)
        .with_visit_demand(2);
    let visit_demand = config.visit_demand;
    let solver = SolverManager::builder()
        .with_config(config)
        .on_best_solution(publish_best_solutions(publisher.clone()))
        .build()
        .unwrap();
    let mut optimizer =
        RouteOptimizer::new(solver, publisher.clone(), repository.clone(), matrix.clone())
            .with_visit_demand(visit_demand);

    let depot = depot_location(1, 0.0, 0.0);
    repository.insert(depot.clone());
    optimizer.add_location(&depot, matrix.row_for(&depot)).unwrap();
    optimizer.add_vehicle(&vehicle(100, 10, 1)).unwrap();
    optimizer.add_vehicle(&vehicle(101, 10, 1)).unwrap();
    for (id, lat, lon) in [(2, 0.0, 1.0), (3, 0.0, 2.0), (4, 1.0, 1.0)] {
        let visit = visit_location(id, lat, lon);
        optimizer.add_location(&visit, matrix.row_for(&visit)).unwrap();
    }
    assert_eq!(optimizer.solver_state(), SolverState::Running);
    assert!(optimizer.visits().iter().all(|v| v.demand() == 2));

    let routed = wait_for_plan(&publisher, |plan| {
        let routed: usize = plan.routes.iter().map(|r| r.visit_ids.len()).sum();
        routed == 3 && plan.score.is_some_and(|s| s.hard() == 0)
    });
    // Depot to (0,1), (0,2), (1,1) and back is the optimum.
    assert!(routed.distance.millis() >= 6000);

    optimizer
        .remove_location(&visit_location(3, 0.0, 2.0))
        .unwrap();
    let shrunk = wait_for_plan(&publisher, |plan| {
        let routed: usize = plan.routes.iter().map(|r| r.visit_ids.len()).sum();
        !plan.visit_ids.contains(&3) && routed == 2
    });
    assert!(shrunk.routes.iter().all(|r| !r.visit_ids.contains(&3)));

    optimizer.remove_all_vehicles().unwrap();
    assert_eq!(optimizer.solver_state(), SolverState::Idle);
    let last = publisher.last().unwrap();
    assert!(last.vehicle_ids.is_empty());
    assert!(last.routes.is_empty());
}

use std::collections::HashMap;
use std::sync::Arc;

use super::*;

fn row(entries: &[(LocationId, i64)]) -> Arc<dyn DistanceMatrixRow> {
    let map: HashMap<LocationId, Distance> = entries
        .iter()
        .map(|&(id, ms)| (id, Distance::of_millis(ms)))
        .collect();
    Arc::new(map)
}

fn location(id: LocationId, kind: LocationType, entries: &[(LocationId, i64)]) -> PlanningLocation {
    PlanningLocation::new(id, kind, Coordinates::new(0.0, 0.0), row(entries))
}

// Depot 1 and visits 2, 3 on a line: 1 -(10)- 2 -(5)- 3.
fn line_problem() -> VehicleRoutingSolution {
    let depot = PlanningDepot::new(location(1, LocationType::Depot, &[(2, 10), (3, 15)]));
    let v2 = PlanningVisit::new(location(2, LocationType::Visit, &[(1, 10), (3, 5)]));
    let v3 = PlanningVisit::with_demand(location(3, LocationType::Visit, &[(1, 15), (2, 5)]), 4);
    let vehicle = PlanningVehicle::new(100, "Vehicle 1", 10, depot.clone());
    VehicleRoutingSolution::from_facts(vec![depot], vec![vehicle], vec![v2, v3])
}

#[test]
fn location_equality_ignores_description() {
    let a = Location::with_description(7, LocationType::Visit, Coordinates::new(1.0, 2.0), "a");
    let b = Location::with_description(7, LocationType::Visit, Coordinates::new(3.0, 4.0), "b");
    let depot = Location::new(7, LocationType::Depot, Coordinates::new(1.0, 2.0));

    assert_eq!(a, b);
    assert_ne!(a, depot);
    assert_eq!(a.to_string(), "Location [id=7, description=a]");
    assert_eq!(depot.to_string(), "Location [id=7]");
}

#[test]
fn vehicle_keeps_its_initial_location_across_capacity_changes() {
    let start = Location::new(40, LocationType::Vehicle, Coordinates::new(0.1, 0.1));
    let vehicle = Vehicle::new(3, "Vehicle 3", 5, 1).with_location(start.clone());

    let resized = vehicle.with_capacity(8);

    assert_eq!(resized.location(), Some(&start));
    assert_eq!(resized.location().map(Location::kind), Some(LocationType::Vehicle));
    assert_eq!(resized.depot_id(), 1);
    assert!(Vehicle::new(4, "Vehicle 4", 5, 1).location().is_none());
}

#[test]
fn fact_kind_displays_its_name() {
    assert_eq!(FactKind::Depot.to_string(), "Depot");
    assert_eq!(FactKind::Vehicle.to_string(), "Vehicle");
}

#[test]
fn distance_map_answers_zero_for_its_origin() {
    let map = DistanceMap::new(1, row(&[(2, 10)]));

    assert_eq!(map.distance_to_id(1), Some(Distance::ZERO));
    assert_eq!(map.distance_to_id(2), Some(Distance::of_millis(10)));
    assert_eq!(map.distance_to_id(3), None);
}

#[test]
fn negative_distance_is_clamped() {
    assert_eq!(Distance::of_millis(-5), Distance::ZERO);
    let total: Distance = [3, 4].iter().map(|&ms| Distance::of_millis(ms)).sum();
    assert_eq!(total.millis(), 7);
}

#[test]
fn route_distance_returns_to_depot() {
    let mut solution = line_problem();
    solution.vehicles[0].visits_mut().extend([2, 3]);

    let vehicle = &solution.vehicles[0];
    assert_eq!(solution.route_distance(vehicle).millis(), 10 + 5 + 15);
    assert_eq!(solution.vehicle_demand(vehicle), 5);
    assert_eq!(solution.total_cost().unreachable_legs, 0);
}

#[test]
fn empty_route_costs_nothing() {
    let solution = line_problem();
    assert_eq!(solution.total_distance(), Distance::ZERO);
    assert_eq!(solution.unassigned_visit_ids(), vec![2, 3]);
    assert!(!solution.is_initialized());
}

#[test]
fn missing_matrix_cell_counts_as_unreachable() {
    let depot = PlanningDepot::new(location(1, LocationType::Depot, &[]));
    let visit = PlanningVisit::new(location(2, LocationType::Visit, &[(1, 10)]));
    let mut vehicle = PlanningVehicle::new(100, "Vehicle 1", 10, depot.clone());
    vehicle.visits_mut().push(2);
    let solution = VehicleRoutingSolution::from_facts(vec![depot], vec![vehicle], vec![visit]);

    let cost = solution.total_cost();
    assert_eq!(cost.unreachable_legs, 1);
    assert_eq!(cost.distance.millis(), 10);
}

#[test]
fn shadow_variables_follow_routes() {
    let mut solution = line_problem();
    solution.vehicles[0].visits_mut().extend([3, 2]);
    solution.update_shadow_variables();

    let v2 = solution.visit(2).unwrap();
    let v3 = solution.visit(3).unwrap();
    assert_eq!(v3.vehicle_id(), Some(100));
    assert_eq!(v3.previous_location_id(), Some(1));
    assert_eq!(v2.previous_location_id(), Some(3));
    assert!(solution.verify_consistency().is_ok());
    assert!(solution.is_initialized());

    solution.vehicles[0].take_visits();
    assert!(solution.verify_consistency().is_err());
    solution.update_shadow_variables();
    assert!(solution.verify_consistency().is_ok());
    assert!(solution.visit(2).unwrap().vehicle_id().is_none());
}

#[test]
fn consistency_rejects_duplicate_and_unknown_visits() {
    let mut solution = line_problem();
    solution.vehicles[0].visits_mut().extend([2, 2]);
    solution.update_shadow_variables();
    assert!(matches!(
        solution.verify_consistency(),
        Err(crate::RouteForgeError::InternalInvariant(_))
    ));

    let mut solution = line_problem();
    solution.vehicles[0].visits_mut().push(99);
    assert!(solution.verify_consistency().is_err());
}

#[test]
fn plan_skips_vehicles_without_visits() {
    let mut solution = line_problem();
    let depot = solution.depots[0].clone();
    solution
        .vehicles
        .push(PlanningVehicle::new(200, "Vehicle 2", 10, depot));
    solution.vehicles[0].visits_mut().push(2);

    let plan = RoutingPlan::from_solution(&solution);
    assert_eq!(plan.vehicle_ids, vec![100, 200]);
    assert_eq!(plan.depot_ids, vec![1]);
    assert_eq!(plan.visit_ids, vec![2, 3]);
    assert_eq!(plan.routes.len(), 1);
    assert_eq!(plan.route_of(100).map(|r| r.visit_ids.clone()), Some(vec![2]));
    assert!(plan.route_of(200).is_none());
    assert_eq!(plan.distance.millis(), 20);
}

#[test]
fn plan_of_lonely_vehicle_is_empty_of_routes() {
    let depot = PlanningDepot::new(location(1, LocationType::Depot, &[]));
    let vehicle = PlanningVehicle::new(1, "V1", 10, depot);
    let solution = VehicleRoutingSolution::from_facts(vec![], vec![vehicle], vec![]);

    let plan = RoutingPlan::from_solution(&solution);
    assert!(plan.routes.is_empty());
    assert_eq!(plan.distance, Distance::ZERO);
    assert!(plan.depot_ids.is_empty());
}

#[test]
fn closures_publish_plans() {
    use std::sync::Mutex;

    let seen = Arc::new(Mutex::new(Vec::new()));
    let sink = Arc::clone(&seen);
    let publisher = move |plan: RoutingPlan| sink.lock().unwrap().push(plan);

    publisher.publish(RoutingPlan::empty());
    assert_eq!(seen.lock().unwrap().len(), 1);
}

#[cfg(feature = "serde")]
#[test]
fn plan_serializes_for_subscribers() {
    use crate::score::HardSoftScore;

    let plan = RoutingPlan {
        distance: Distance::of_millis(1500),
        vehicle_ids: vec![1],
        depot_ids: vec![2],
        visit_ids: vec![3],
        routes: vec![ShallowRoute {
            vehicle_id: 1,
            depot_id: 2,
            visit_ids: vec![3],
        }],
        score: Some(HardSoftScore::of(0, -1500)),
    };

    let json = serde_json::to_value(&plan).unwrap();
    assert_eq!(json["distance"], 1500);
    assert_eq!(json["routes"][0]["visit_ids"], serde_json::json!([3]));

    let back: RoutingPlan = serde_json::from_value(json).unwrap();
    assert_eq!(back, plan);
}

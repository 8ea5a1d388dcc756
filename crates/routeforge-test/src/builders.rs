//! Builders for domain and planning entities.

use routeforge_core::{
    Coordinates, Location, LocationId, LocationType, PlanningDepot, PlanningLocation,
    PlanningVehicle, PlanningVisit, Vehicle, VehicleId, VehicleRoutingSolution,
};

use crate::matrix::ManhattanMatrix;

pub fn depot_location(id: LocationId, latitude: f64, longitude: f64) -> Location {
    Location::with_description(
        id,
        LocationType::Depot,
        Coordinates::new(latitude, longitude),
        format!("Depot {id}"),
    )
}

pub fn visit_location(id: LocationId, latitude: f64, longitude: f64) -> Location {
    Location::with_description(
        id,
        LocationType::Visit,
        Coordinates::new(latitude, longitude),
        format!("Visit {id}"),
    )
}

pub fn vehicle(id: VehicleId, capacity: i32, depot_id: LocationId) -> Vehicle {
    Vehicle::new(id, format!("Vehicle {id}"), capacity, depot_id)
}

pub fn planning_location(matrix: &ManhattanMatrix, location: &Location) -> PlanningLocation {
    PlanningLocation::from_location(location, matrix.row_for(location))
}

pub fn planning_depot(matrix: &ManhattanMatrix, location: &Location) -> PlanningDepot {
    PlanningDepot::new(planning_location(matrix, location))
}

pub fn planning_visit(matrix: &ManhattanMatrix, location: &Location) -> PlanningVisit {
    PlanningVisit::new(planning_location(matrix, location))
}

pub fn planning_vehicle(id: VehicleId, capacity: i32, depot: PlanningDepot) -> PlanningVehicle {
    PlanningVehicle::new(id, format!("Vehicle {id}"), capacity, depot)
}

/// Depot 1 at the origin, visits 2, 3 and 4 around it, vehicles 10 and 11
/// (capacity 10) based at the depot. No routes assigned.
pub fn sample_solution(matrix: &ManhattanMatrix) -> VehicleRoutingSolution {
    let depot = planning_depot(matrix, &depot_location(1, 0.0, 0.0));
    let visits = vec![
        planning_visit(matrix, &visit_location(2, 0.0, 1.0)),
        planning_visit(matrix, &visit_location(3, 0.0, 2.0)),
        planning_visit(matrix, &visit_location(4, 1.0, 1.0)),
    ];
    let vehicles = vec![
        planning_vehicle(10, 10, depot.clone()),
        planning_vehicle(11, 10, depot.clone()),
    ];
    VehicleRoutingSolution::from_facts(vec![depot], vehicles, visits)
}

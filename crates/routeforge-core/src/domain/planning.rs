//! Solver-facing copies of the domain entities.
//!
//! Planning entities are cheap to clone and are cloned freely: the
//! orchestrator keeps one set, the solver's working copy another, and
//! every fact change carries its own. They are matched up by id only.

use std::fmt;
use std::sync::Arc;

use super::distance::{Distance, DistanceMap, DistanceMatrixRow};
use super::location::{Coordinates, Location, LocationType, Vehicle};
use super::traits::PlanningId;
use super::{LocationId, VehicleId};

/// Demand of a visit when nothing else is known about it.
pub const DEFAULT_VISIT_DEMAND: i32 = 1;

/// A location together with the distance lookup from it.
#[derive(Debug, Clone)]
pub struct PlanningLocation {
    id: LocationId,
    kind: LocationType,
    coordinates: Coordinates,
    distance_map: DistanceMap,
}

impl PlanningLocation {
    pub fn new(
        id: LocationId,
        kind: LocationType,
        coordinates: Coordinates,
        row: Arc<dyn DistanceMatrixRow>,
    ) -> Self {
        Self {
            id,
            kind,
            coordinates,
            distance_map: DistanceMap::new(id, row),
        }
    }

    pub fn from_location(location: &Location, row: Arc<dyn DistanceMatrixRow>) -> Self {
        Self::new(location.id(), location.kind(), location.coordinates(), row)
    }

    pub fn id(&self) -> LocationId {
        self.id
    }

    pub fn kind(&self) -> LocationType {
        self.kind
    }

    pub fn coordinates(&self) -> Coordinates {
        self.coordinates
    }

    pub fn distance_map(&self) -> &DistanceMap {
        &self.distance_map
    }

    pub fn distance_to(&self, other: &PlanningLocation) -> Option<Distance> {
        self.distance_map.distance_to(other)
    }

    pub fn distance_to_id(&self, other: LocationId) -> Option<Distance> {
        self.distance_map.distance_to_id(other)
    }
}

impl PartialEq for PlanningLocation {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id && self.kind == other.kind
    }
}

impl Eq for PlanningLocation {}

/// A depot: start and end point of every route that belongs to it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlanningDepot {
    location: PlanningLocation,
}

impl PlanningDepot {
    pub fn new(location: PlanningLocation) -> Self {
        Self { location }
    }

    pub fn id(&self) -> LocationId {
        self.location.id
    }

    pub fn location(&self) -> &PlanningLocation {
        &self.location
    }
}

impl PlanningId for PlanningDepot {
    type Id = LocationId;

    fn planning_id(&self) -> LocationId {
        self.location.id
    }
}

impl fmt::Display for PlanningDepot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "PlanningDepot [id={}]", self.id())
    }
}

/// A customer stop that must be served by exactly one vehicle.
///
/// `vehicle_id` and `previous_location_id` are shadow variables: they are
/// recomputed from the vehicles' route lists and never set by callers.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlanningVisit {
    location: PlanningLocation,
    demand: i32,
    vehicle_id: Option<VehicleId>,
    previous_location_id: Option<LocationId>,
}

impl PlanningVisit {
    pub fn new(location: PlanningLocation) -> Self {
        Self::with_demand(location, DEFAULT_VISIT_DEMAND)
    }

    pub fn with_demand(location: PlanningLocation, demand: i32) -> Self {
        Self {
            location,
            demand,
            vehicle_id: None,
            previous_location_id: None,
        }
    }

    pub fn id(&self) -> LocationId {
        self.location.id
    }

    pub fn location(&self) -> &PlanningLocation {
        &self.location
    }

    pub fn demand(&self) -> i32 {
        self.demand
    }

    pub fn vehicle_id(&self) -> Option<VehicleId> {
        self.vehicle_id
    }

    pub fn previous_location_id(&self) -> Option<LocationId> {
        self.previous_location_id
    }

    pub fn is_assigned(&self) -> bool {
        self.vehicle_id.is_some()
    }

    pub(crate) fn set_shadows(
        &mut self,
        vehicle_id: Option<VehicleId>,
        previous_location_id: Option<LocationId>,
    ) {
        self.vehicle_id = vehicle_id;
        self.previous_location_id = previous_location_id;
    }
}

impl PlanningId for PlanningVisit {
    type Id = LocationId;

    fn planning_id(&self) -> LocationId {
        self.location.id
    }
}

impl fmt::Display for PlanningVisit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "PlanningVisit [id={}]", self.id())
    }
}

/// A vehicle and the route it drives.
///
/// The home depot is fixed at construction. `visits` is the planning list
/// variable: visit ids in driving order, starting and ending at the depot.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlanningVehicle {
    id: VehicleId,
    name: String,
    capacity: i32,
    depot: PlanningDepot,
    visits: Vec<LocationId>,
}

impl PlanningVehicle {
    pub fn new(id: VehicleId, name: impl Into<String>, capacity: i32, depot: PlanningDepot) -> Self {
        Self {
            id,
            name: name.into(),
            capacity,
            depot,
            visits: Vec::new(),
        }
    }

    /// Builds the planning copy of a domain vehicle with its resolved depot.
    pub fn from_vehicle(vehicle: &Vehicle, depot: PlanningDepot) -> Self {
        Self::new(vehicle.id(), vehicle.name(), vehicle.capacity(), depot)
    }

    pub fn id(&self) -> VehicleId {
        self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn capacity(&self) -> i32 {
        self.capacity
    }

    pub fn set_capacity(&mut self, capacity: i32) {
        self.capacity = capacity;
    }

    pub fn depot(&self) -> &PlanningDepot {
        &self.depot
    }

    pub fn visits(&self) -> &[LocationId] {
        &self.visits
    }

    pub fn visits_mut(&mut self) -> &mut Vec<LocationId> {
        &mut self.visits
    }

    /// Returns the route with every visit removed.
    pub fn take_visits(&mut self) -> Vec<LocationId> {
        std::mem::take(&mut self.visits)
    }
}

impl PlanningId for PlanningVehicle {
    type Id = VehicleId;

    fn planning_id(&self) -> VehicleId {
        self.id
    }
}

impl fmt::Display for PlanningVehicle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "PlanningVehicle [id={}, name={}]", self.id, self.name)
    }
}

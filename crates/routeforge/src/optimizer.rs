//! The route optimizer: canonical facts plus solver lifecycle.

use std::fmt;
use std::sync::Arc;

use routeforge_core::domain::DEFAULT_VISIT_DEMAND;
use routeforge_core::{
    DistanceMatrix, DistanceMatrixRow, FactKind, Location, LocationId, LocationRepository,
    LocationType, PlanningDepot, PlanningLocation, PlanningVehicle, PlanningVisit, Result,
    RouteForgeError, RoutePublisher, RoutingPlan, Vehicle, VehicleId, VehicleRoutingSolution,
};
use routeforge_solver::{FactChange, RoutingSolver};
use tracing::{debug, info};

use crate::lifecycle::{FactCounts, SolverState, Transition};

/// Keeps the authoritative depots, vehicles and visits and decides, on every
/// change, whether the solver starts, stops, receives a fact change, or
/// nothing runs and the new state is published directly.
///
/// A vehicle only reaches the solver once its home depot is one of the
/// depots. Until then it is kept and published but does not count towards
/// solvability.
///
/// Each method takes `&mut self`, so a call's mutation and its solver
/// decision happen as one step. Failed calls leave the collections as they
/// were, except for fatal solver errors, which end solving.
pub struct RouteOptimizer<S, P, R, M> {
    solver: S,
    publisher: P,
    repository: R,
    distance_matrix: M,
    depots: Vec<PlanningDepot>,
    vehicles: Vec<PlanningVehicle>,
    visits: Vec<PlanningVisit>,
    visit_demand: i32,
}

impl<S, P, R, M> RouteOptimizer<S, P, R, M>
where
    S: RoutingSolver,
    P: RoutePublisher,
    R: LocationRepository,
    M: DistanceMatrix,
{
    pub fn new(solver: S, publisher: P, repository: R, distance_matrix: M) -> Self {
        Self {
            solver,
            publisher,
            repository,
            distance_matrix,
            depots: Vec::new(),
            vehicles: Vec::new(),
            visits: Vec::new(),
            visit_demand: DEFAULT_VISIT_DEMAND,
        }
    }

    /// Demand given to visits added from now on.
    pub fn with_visit_demand(mut self, demand: i32) -> Self {
        self.visit_demand = demand;
        self
    }

    pub fn set_visit_demand(&mut self, demand: i32) {
        self.visit_demand = demand;
    }

    /// Adds a depot or a visit. Locations of any other kind are added as
    /// visits.
    ///
    /// # Errors
    ///
    /// `Conflict` if a location with the same id is already known. Fatal
    /// solver errors are passed through.
    pub fn add_location(
        &mut self,
        location: &Location,
        distance_row: Arc<dyn DistanceMatrixRow>,
    ) -> Result<()> {
        let planning_location = PlanningLocation::from_location(location, distance_row);
        match location.kind() {
            LocationType::Depot => {
                self.ensure_new_location(FactKind::Depot, location.id())?;
                let depot = PlanningDepot::new(planning_location);
                debug!(depot_id = depot.id(), "Adding depot");
                self.depots.push(depot.clone());
                let mut changes = vec![FactChange::AddDepot(depot)];
                changes.extend(
                    self.vehicles
                        .iter()
                        .filter(|v| v.depot().id() == location.id())
                        .cloned()
                        .map(FactChange::AddVehicle),
                );
                self.apply(changes)
            }
            LocationType::Visit | LocationType::Vehicle => {
                self.ensure_new_location(FactKind::Visit, location.id())?;
                let visit = PlanningVisit::with_demand(planning_location, self.visit_demand);
                debug!(visit_id = visit.id(), demand = visit.demand(), "Adding visit");
                self.visits.push(visit.clone());
                self.apply(vec![FactChange::AddVisit(visit)])
            }
        }
    }

    /// Removes a depot or a visit. Removing a vehicle-kind location does
    /// nothing.
    ///
    /// # Errors
    ///
    /// `NotFound` if no such depot or visit exists, `Conflict` if a vehicle
    /// still has the depot as its home.
    pub fn remove_location(&mut self, location: &Location) -> Result<()> {
        let id = location.id();
        match location.kind() {
            LocationType::Visit => {
                let index = self
                    .visits
                    .iter()
                    .position(|v| v.id() == id)
                    .ok_or_else(|| RouteForgeError::not_found(FactKind::Visit, id))?;
                debug!(visit_id = id, "Removing visit");
                self.visits.remove(index);
                self.apply(vec![FactChange::RemoveVisit { visit_id: id }])
            }
            LocationType::Depot => {
                let index = self
                    .depots
                    .iter()
                    .position(|d| d.id() == id)
                    .ok_or_else(|| RouteForgeError::not_found(FactKind::Depot, id))?;
                if let Some(vehicle) = self.vehicles.iter().find(|v| v.depot().id() == id) {
                    return Err(RouteForgeError::Conflict(format!(
                        "depot still in use: {} has vehicle [id={}] assigned",
                        location,
                        vehicle.id()
                    )));
                }
                debug!(depot_id = id, "Removing depot");
                self.depots.remove(index);
                self.apply(vec![FactChange::RemoveDepot { depot_id: id }])
            }
            LocationType::Vehicle => {
                debug!(location_id = id, "Ignoring removal of vehicle location");
                Ok(())
            }
        }
    }

    /// Adds a vehicle, resolving its home depot through the repository. The
    /// solver only sees it once that depot has been added as a location.
    ///
    /// # Errors
    ///
    /// `NotFound` if the repository does not know the home depot, `Conflict`
    /// if the vehicle id is already used. Distance matrix failures are passed
    /// through.
    pub fn add_vehicle(&mut self, vehicle: &Vehicle) -> Result<()> {
        if self.vehicle_position(vehicle.id()).is_some() {
            return Err(RouteForgeError::Conflict(format!(
                "{vehicle} already exists"
            )));
        }
        let depot_location = self
            .repository
            .find(vehicle.depot_id())
            .ok_or_else(|| RouteForgeError::not_found(FactKind::Depot, vehicle.depot_id()))?;
        let row = self.distance_matrix.distance_matrix_row(&depot_location)?;
        let depot = PlanningDepot::new(PlanningLocation::from_location(&depot_location, row));
        let planning_vehicle = PlanningVehicle::from_vehicle(vehicle, depot);

        let routable = self.has_depot(vehicle.depot_id());
        debug!(
            vehicle_id = vehicle.id(),
            depot_id = vehicle.depot_id(),
            routable,
            "Adding vehicle"
        );
        self.vehicles.push(planning_vehicle.clone());
        let changes = if routable {
            vec![FactChange::AddVehicle(planning_vehicle)]
        } else {
            Vec::new()
        };
        self.apply(changes)
    }

    /// # Errors
    ///
    /// `NotFound` if the vehicle is unknown.
    pub fn remove_vehicle(&mut self, vehicle: &Vehicle) -> Result<()> {
        let id = vehicle.id();
        let index = self
            .vehicle_position(id)
            .ok_or_else(|| RouteForgeError::not_found(FactKind::Vehicle, id))?;
        debug!(vehicle_id = id, "Removing vehicle");
        let removed = self.vehicles.remove(index);
        let changes = if self.has_depot(removed.depot().id()) {
            vec![FactChange::RemoveVehicle { vehicle_id: id }]
        } else {
            Vec::new()
        };
        self.apply(changes)
    }

    /// Sets a known vehicle's capacity to `vehicle.capacity()`.
    ///
    /// # Errors
    ///
    /// `NotFound` if the vehicle is unknown.
    pub fn change_capacity(&mut self, vehicle: &Vehicle) -> Result<()> {
        let id = vehicle.id();
        let index = self
            .vehicle_position(id)
            .ok_or_else(|| RouteForgeError::not_found(FactKind::Vehicle, id))?;
        debug!(vehicle_id = id, capacity = vehicle.capacity(), "Changing capacity");
        self.vehicles[index].set_capacity(vehicle.capacity());
        let changes = if self.has_depot(self.vehicles[index].depot().id()) {
            vec![FactChange::ChangeVehicleCapacity {
                vehicle_id: id,
                capacity: vehicle.capacity(),
            }]
        } else {
            Vec::new()
        };
        self.apply(changes)
    }

    /// Stops the solver and forgets every depot and visit.
    pub fn remove_all_locations(&mut self) -> Result<()> {
        let stopped = self.solver.stop();
        self.depots.clear();
        self.visits.clear();
        info!("Removed all locations");
        self.publish();
        stopped
    }

    /// Stops the solver and forgets every vehicle.
    pub fn remove_all_vehicles(&mut self) -> Result<()> {
        let stopped = self.solver.stop();
        self.vehicles.clear();
        info!("Removed all vehicles");
        self.publish();
        stopped
    }

    pub fn solver_state(&self) -> SolverState {
        self.solver.status()
    }

    /// Counts only vehicles whose home depot is among the depots.
    pub fn fact_counts(&self) -> FactCounts {
        let routable = self.routable_vehicles().count();
        FactCounts::new(self.depots.len(), routable, self.visits.len())
    }

    pub fn depots(&self) -> &[PlanningDepot] {
        &self.depots
    }

    pub fn vehicles(&self) -> &[PlanningVehicle] {
        &self.vehicles
    }

    pub fn visits(&self) -> &[PlanningVisit] {
        &self.visits
    }

    /// The plan built from the canonical collections, including vehicles
    /// still waiting for their home depot. It carries no routes: those only
    /// come from the solver.
    pub fn current_plan(&self) -> RoutingPlan {
        RoutingPlan::from_solution(&VehicleRoutingSolution::from_facts(
            self.depots.clone(),
            self.vehicles.clone(),
            self.visits.clone(),
        ))
    }

    pub fn solver(&self) -> &S {
        &self.solver
    }

    pub fn publisher(&self) -> &P {
        &self.publisher
    }

    /// Runs the lifecycle transition for the current facts. `changes` are
    /// only submitted if the solver was running and keeps running; they are
    /// empty when the call touched nothing the solver knows about.
    fn apply(&mut self, changes: Vec<FactChange>) -> Result<()> {
        let counts = self.fact_counts();
        let transition = Transition::between(self.solver.status(), counts.is_solvable());
        debug!(?transition, %counts, changes = changes.len(), "Solver transition");
        match transition {
            Transition::Publish => {
                self.publish();
                Ok(())
            }
            Transition::Start => {
                info!(%counts, "Problem is solvable, starting solver");
                self.solver.start(self.snapshot())
            }
            Transition::Stop => {
                info!(%counts, "Problem is no longer solvable, stopping solver");
                let stopped = self.solver.stop();
                self.publish();
                stopped
            }
            Transition::Submit => changes
                .into_iter()
                .try_for_each(|change| self.solver.add_fact_change(change)),
        }
    }

    /// The problem handed to the solver on start.
    fn snapshot(&self) -> VehicleRoutingSolution {
        VehicleRoutingSolution::from_facts(
            self.depots.clone(),
            self.routable_vehicles().cloned().collect(),
            self.visits.clone(),
        )
    }

    fn routable_vehicles(&self) -> impl Iterator<Item = &PlanningVehicle> {
        self.vehicles.iter().filter(|v| self.has_depot(v.depot().id()))
    }

    fn has_depot(&self, id: LocationId) -> bool {
        self.depots.iter().any(|d| d.id() == id)
    }

    fn publish(&self) {
        self.publisher.publish(self.current_plan());
    }

    fn vehicle_position(&self, id: VehicleId) -> Option<usize> {
        self.vehicles.iter().position(|v| v.id() == id)
    }

    fn ensure_new_location(&self, kind: FactKind, id: LocationId) -> Result<()> {
        let known = self.depots.iter().any(|d| d.id() == id)
            || self.visits.iter().any(|v| v.id() == id);
        if known {
            return Err(RouteForgeError::Conflict(format!(
                "{kind} [id={id}] already exists"
            )));
        }
        Ok(())
    }
}

impl<S, P, R, M> fmt::Debug for RouteOptimizer<S, P, R, M>
where
    S: RoutingSolver,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RouteOptimizer")
            .field("state", &self.solver.status())
            .field("depots", &self.depots.len())
            .field("vehicles", &self.vehicles.len())
            .field("visits", &self.visits.len())
            .field("visit_demand", &self.visit_demand)
            .finish()
    }
}

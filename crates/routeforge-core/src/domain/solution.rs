//! The vehicle routing planning solution.

use std::collections::{HashMap, HashSet};

use super::distance::Distance;
use super::planning::{PlanningDepot, PlanningLocation, PlanningVehicle, PlanningVisit};
use super::traits::PlanningSolution;
use super::{LocationId, VehicleId};
use crate::error::{Result, RouteForgeError};
use crate::score::HardSoftScore;

/// Travel cost of one route.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct RouteCost {
    pub distance: Distance,
    /// Legs the distance matrix could not price.
    pub unreachable_legs: u32,
}

/// Depots, vehicles and visits of one routing problem, plus the routes
/// assigned so far.
///
/// Used both as the snapshot that starts the solver and as the solver's
/// working copy.
#[derive(Debug, Clone, Default)]
pub struct VehicleRoutingSolution {
    pub depots: Vec<PlanningDepot>,
    pub vehicles: Vec<PlanningVehicle>,
    pub visits: Vec<PlanningVisit>,
    pub score: Option<HardSoftScore>,
}

impl VehicleRoutingSolution {
    /// Builds an unsolved snapshot from the given facts.
    pub fn from_facts(
        depots: Vec<PlanningDepot>,
        vehicles: Vec<PlanningVehicle>,
        visits: Vec<PlanningVisit>,
    ) -> Self {
        Self {
            depots,
            vehicles,
            visits,
            score: None,
        }
    }

    pub fn depot_index(&self, id: LocationId) -> Option<usize> {
        self.depots.iter().position(|d| d.id() == id)
    }

    pub fn vehicle_index(&self, id: VehicleId) -> Option<usize> {
        self.vehicles.iter().position(|v| v.id() == id)
    }

    pub fn visit_index(&self, id: LocationId) -> Option<usize> {
        self.visits.iter().position(|v| v.id() == id)
    }

    pub fn visit(&self, id: LocationId) -> Option<&PlanningVisit> {
        self.visits.iter().find(|v| v.id() == id)
    }

    /// Visits that appear on no vehicle's route, in collection order.
    pub fn unassigned_visit_ids(&self) -> Vec<LocationId> {
        let routed: HashSet<LocationId> = self
            .vehicles
            .iter()
            .flat_map(|v| v.visits().iter().copied())
            .collect();
        self.visits
            .iter()
            .map(PlanningVisit::id)
            .filter(|id| !routed.contains(id))
            .collect()
    }

    /// Number of visits that appear on some route.
    pub fn assigned_count(&self) -> usize {
        self.vehicles.iter().map(|v| v.visits().len()).sum()
    }

    fn locations_by_id(&self) -> HashMap<LocationId, &PlanningLocation> {
        self.visits
            .iter()
            .map(|v| (v.id(), v.location()))
            .collect()
    }

    /// Cost of driving `vehicle`'s route: depot, each visit in order, back to the depot.
    pub fn route_cost(&self, vehicle: &PlanningVehicle) -> RouteCost {
        self.route_cost_with(vehicle, &self.locations_by_id())
    }

    fn route_cost_with(
        &self,
        vehicle: &PlanningVehicle,
        locations: &HashMap<LocationId, &PlanningLocation>,
    ) -> RouteCost {
        let mut cost = RouteCost::default();
        if vehicle.visits().is_empty() {
            return cost;
        }

        let depot = vehicle.depot().location();
        let mut previous = depot;
        for id in vehicle.visits() {
            let Some(&location) = locations.get(id) else {
                cost.unreachable_legs += 1;
                continue;
            };
            match previous.distance_to(location) {
                Some(d) => cost.distance += d,
                None => cost.unreachable_legs += 1,
            }
            previous = location;
        }
        match previous.distance_to(depot) {
            Some(d) => cost.distance += d,
            None => cost.unreachable_legs += 1,
        }
        cost
    }

    pub fn route_distance(&self, vehicle: &PlanningVehicle) -> Distance {
        self.route_cost(vehicle).distance
    }

    /// Summed cost of every route.
    pub fn total_cost(&self) -> RouteCost {
        let locations = self.locations_by_id();
        self.vehicles
            .iter()
            .map(|v| self.route_cost_with(v, &locations))
            .fold(RouteCost::default(), |acc, c| RouteCost {
                distance: acc.distance + c.distance,
                unreachable_legs: acc.unreachable_legs + c.unreachable_legs,
            })
    }

    pub fn total_distance(&self) -> Distance {
        self.total_cost().distance
    }

    /// Summed demand of the visits on `vehicle`'s route.
    pub fn vehicle_demand(&self, vehicle: &PlanningVehicle) -> i64 {
        vehicle
            .visits()
            .iter()
            .filter_map(|id| self.visit(*id))
            .map(|v| i64::from(v.demand()))
            .sum()
    }

    /// Recomputes every visit's `vehicle_id` and `previous_location_id`
    /// from the vehicles' route lists.
    pub fn update_shadow_variables(&mut self) {
        let index: HashMap<LocationId, usize> = self
            .visits
            .iter()
            .enumerate()
            .map(|(i, v)| (v.id(), i))
            .collect();

        for visit in &mut self.visits {
            visit.set_shadows(None, None);
        }
        for vehicle in &self.vehicles {
            let mut previous = vehicle.depot().id();
            for id in vehicle.visits() {
                if let Some(&i) = index.get(id) {
                    self.visits[i].set_shadows(Some(vehicle.id()), Some(previous));
                }
                previous = *id;
            }
        }
    }

    /// Refreshes the shadow variables touched by one vehicle's route.
    ///
    /// Visits that still claim the vehicle but left its route are cleared.
    pub fn update_vehicle_shadows(&mut self, vehicle_index: usize) {
        let Some(vehicle) = self.vehicles.get(vehicle_index) else {
            return;
        };
        let vehicle_id = vehicle.id();
        let mut previous = vehicle.depot().id();
        let mut shadows: HashMap<LocationId, LocationId> = HashMap::new();
        for &id in vehicle.visits() {
            shadows.insert(id, previous);
            previous = id;
        }

        for visit in &mut self.visits {
            if let Some(&prev) = shadows.get(&visit.id()) {
                visit.set_shadows(Some(vehicle_id), Some(prev));
            } else if visit.vehicle_id() == Some(vehicle_id) {
                visit.set_shadows(None, None);
            }
        }
    }

    /// Checks that routes only reference known visits, that no visit is
    /// routed twice, and that shadow variables agree with the routes.
    pub fn verify_consistency(&self) -> Result<()> {
        let mut seen = HashSet::new();
        for vehicle in &self.vehicles {
            let mut previous = vehicle.depot().id();
            for &id in vehicle.visits() {
                let visit = self.visit(id).ok_or_else(|| {
                    RouteForgeError::InternalInvariant(format!(
                        "route of vehicle [{}] references unknown visit [{}]",
                        vehicle.id(),
                        id
                    ))
                })?;
                if !seen.insert(id) {
                    return Err(RouteForgeError::InternalInvariant(format!(
                        "visit [{id}] is routed more than once"
                    )));
                }
                if visit.vehicle_id() != Some(vehicle.id())
                    || visit.previous_location_id() != Some(previous)
                {
                    return Err(RouteForgeError::InternalInvariant(format!(
                        "shadow variables of visit [{id}] are stale"
                    )));
                }
                previous = id;
            }
        }
        for visit in &self.visits {
            if !seen.contains(&visit.id()) && visit.is_assigned() {
                return Err(RouteForgeError::InternalInvariant(format!(
                    "unrouted visit [{}] still claims vehicle {:?}",
                    visit.id(),
                    visit.vehicle_id()
                )));
            }
        }
        Ok(())
    }
}

impl PlanningSolution for VehicleRoutingSolution {
    type Score = HardSoftScore;

    fn score(&self) -> Option<HardSoftScore> {
        self.score
    }

    fn set_score(&mut self, score: Option<HardSoftScore>) {
        self.score = score;
    }

    fn is_initialized(&self) -> bool {
        self.assigned_count() == self.visits.len()
    }
}

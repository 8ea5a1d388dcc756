//! Publishable snapshot of a routing problem.

use super::distance::Distance;
use super::solution::VehicleRoutingSolution;
use super::{LocationId, VehicleId};
use crate::score::HardSoftScore;

/// One vehicle's route reduced to ids.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ShallowRoute {
    pub vehicle_id: VehicleId,
    pub depot_id: LocationId,
    pub visit_ids: Vec<LocationId>,
}

/// What subscribers see after every change: the facts, the routes driven
/// over them and the total travel distance.
///
/// Only vehicles with at least one visit contribute a route.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct RoutingPlan {
    pub distance: Distance,
    pub vehicle_ids: Vec<VehicleId>,
    pub depot_ids: Vec<LocationId>,
    pub visit_ids: Vec<LocationId>,
    pub routes: Vec<ShallowRoute>,
    pub score: Option<HardSoftScore>,
}

impl RoutingPlan {
    pub fn empty() -> Self {
        Self::default()
    }

    pub fn from_solution(solution: &VehicleRoutingSolution) -> Self {
        let routes = solution
            .vehicles
            .iter()
            .filter(|v| !v.visits().is_empty())
            .map(|v| ShallowRoute {
                vehicle_id: v.id(),
                depot_id: v.depot().id(),
                visit_ids: v.visits().to_vec(),
            })
            .collect();

        Self {
            distance: solution.total_distance(),
            vehicle_ids: solution.vehicles.iter().map(|v| v.id()).collect(),
            depot_ids: solution.depots.iter().map(|d| d.id()).collect(),
            visit_ids: solution.visits.iter().map(|v| v.id()).collect(),
            routes,
            score: solution.score,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.vehicle_ids.is_empty() && self.depot_ids.is_empty() && self.visit_ids.is_empty()
    }

    pub fn route_of(&self, vehicle_id: VehicleId) -> Option<&ShallowRoute> {
        self.routes.iter().find(|r| r.vehicle_id == vehicle_id)
    }
}

impl From<&VehicleRoutingSolution> for RoutingPlan {
    fn from(solution: &VehicleRoutingSolution) -> Self {
        Self::from_solution(solution)
    }
}

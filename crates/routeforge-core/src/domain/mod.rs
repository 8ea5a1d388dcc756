//! Domain model for incremental vehicle routing.
//!
//! Two layers live here:
//! - Domain entities ([`Location`], [`Vehicle`]) as handed over by the service layer
//! - Planning entities ([`PlanningDepot`], [`PlanningVisit`], [`PlanningVehicle`]) that
//!   the solver works on, each carrying the distance lookup it needs
//!
//! [`VehicleRoutingSolution`] aggregates the planning entities and is both the
//! snapshot handed to the solver at start and the solver's working copy.
//! [`RoutingPlan`] is the publishable view derived from it.

mod distance;
mod location;
mod plan;
mod planning;
mod ports;
mod solution;
mod traits;

#[cfg(test)]
mod tests;

pub use distance::{Distance, DistanceMap, DistanceMatrixRow};
pub use location::{Coordinates, Location, LocationType, Vehicle};
pub use plan::{RoutingPlan, ShallowRoute};
pub use planning::{PlanningDepot, PlanningLocation, PlanningVehicle, PlanningVisit, DEFAULT_VISIT_DEMAND};
pub use ports::{DistanceMatrix, LocationRepository, RoutePublisher};
pub use solution::{RouteCost, VehicleRoutingSolution};
pub use traits::{FactKind, PlanningId, PlanningSolution};

/// Identifier of a location; unique across depots, visits and vehicle locations.
pub type LocationId = i64;

/// Identifier of a vehicle.
pub type VehicleId = i64;

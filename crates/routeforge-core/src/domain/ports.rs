//! Collaborators the optimizer talks to but does not implement.

use std::sync::Arc;

use super::distance::DistanceMatrixRow;
use super::location::Location;
use super::plan::RoutingPlan;
use super::LocationId;
use crate::error::Result;

/// Read access to persisted locations.
pub trait LocationRepository: Send + Sync {
    fn find(&self, id: LocationId) -> Option<Location>;
}

/// Source of distance matrix rows.
pub trait DistanceMatrix: Send + Sync {
    /// Returns the live row whose origin is `location`.
    fn distance_matrix_row(&self, location: &Location) -> Result<Arc<dyn DistanceMatrixRow>>;
}

/// Receives every routing plan the optimizer or the solver produces.
pub trait RoutePublisher: Send + Sync {
    fn publish(&self, plan: RoutingPlan);
}

impl<F> RoutePublisher for F
where
    F: Fn(RoutingPlan) + Send + Sync,
{
    fn publish(&self, plan: RoutingPlan) {
        self(plan)
    }
}

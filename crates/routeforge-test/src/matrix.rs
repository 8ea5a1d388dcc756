//! Coordinate-based distance matrix.

use std::collections::HashMap;
use std::fmt;
use std::sync::{Arc, PoisonError, RwLock};

use routeforge_core::{
    Coordinates, Distance, DistanceMatrix, DistanceMatrixRow, Location, LocationId, Result,
};

type Registry = Arc<RwLock<HashMap<LocationId, Coordinates>>>;

/// Distance matrix where one degree of latitude or longitude takes one
/// second to drive, measured Manhattan-style.
///
/// Every location a row is requested for is registered, and rows handed out
/// earlier see it immediately. Locations never registered are unreachable.
#[derive(Debug, Clone, Default)]
pub struct ManhattanMatrix {
    registry: Registry,
}

impl ManhattanMatrix {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers `location` and returns its row.
    pub fn row_for(&self, location: &Location) -> Arc<dyn DistanceMatrixRow> {
        self.registry
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .insert(location.id(), location.coordinates());
        Arc::new(ManhattanRow {
            origin: location.coordinates(),
            registry: Arc::clone(&self.registry),
        })
    }

    pub fn len(&self) -> usize {
        self.registry
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl DistanceMatrix for ManhattanMatrix {
    fn distance_matrix_row(&self, location: &Location) -> Result<Arc<dyn DistanceMatrixRow>> {
        Ok(self.row_for(location))
    }
}

/// Travel time between two coordinates.
pub fn manhattan(from: Coordinates, to: Coordinates) -> Distance {
    let degrees = (from.latitude - to.latitude).abs() + (from.longitude - to.longitude).abs();
    Distance::of_millis((degrees * 1000.0).round() as i64)
}

struct ManhattanRow {
    origin: Coordinates,
    registry: Registry,
}

impl DistanceMatrixRow for ManhattanRow {
    fn distance_to(&self, to: LocationId) -> Option<Distance> {
        let registry = self.registry.read().unwrap_or_else(PoisonError::into_inner);
        registry.get(&to).map(|&c| manhattan(self.origin, c))
    }
}

impl fmt::Debug for ManhattanRow {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ManhattanRow")
            .field("origin", &self.origin)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use routeforge_core::LocationType;

    #[test]
    fn rows_see_later_locations() {
        let matrix = ManhattanMatrix::new();
        let a = Location::new(1, LocationType::Depot, Coordinates::new(0.0, 0.0));
        let b = Location::new(2, LocationType::Visit, Coordinates::new(1.0, 2.0));

        let row = matrix.row_for(&a);
        assert_eq!(row.distance_to(2), None);

        matrix.row_for(&b);
        assert_eq!(row.distance_to(2), Some(Distance::of_millis(3000)));
        assert_eq!(matrix.len(), 2);
    }
}

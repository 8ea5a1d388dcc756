//! In-memory location repository.

use std::collections::HashMap;
use std::sync::{Arc, Mutex, PoisonError};

use routeforge_core::{Location, LocationId, LocationRepository};

/// A [`LocationRepository`] backed by a shared map. Clones share storage.
#[derive(Debug, Clone, Default)]
pub struct InMemoryLocationRepository {
    locations: Arc<Mutex<HashMap<LocationId, Location>>>,
}

impl InMemoryLocationRepository {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_locations(locations: impl IntoIterator<Item = Location>) -> Self {
        let repository = Self::new();
        for location in locations {
            repository.insert(location);
        }
        repository
    }

    pub fn insert(&self, location: Location) {
        self.locations
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .insert(location.id(), location);
    }

    pub fn remove(&self, id: LocationId) -> Option<Location> {
        self.locations
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .remove(&id)
    }
}

impl LocationRepository for InMemoryLocationRepository {
    fn find(&self, id: LocationId) -> Option<Location> {
        self.locations
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .get(&id)
            .cloned()
    }
}

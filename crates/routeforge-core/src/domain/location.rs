//! Domain entities handed to the optimizer by the service layer.

use std::fmt;
use std::hash::{Hash, Hasher};

use super::{LocationId, VehicleId};

/// Role a location plays in the routing problem.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum LocationType {
    Depot,
    Visit,
    Vehicle,
}

/// Latitude and longitude in decimal degrees.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Coordinates {
    pub latitude: f64,
    pub longitude: f64,
}

impl Coordinates {
    pub const fn new(latitude: f64, longitude: f64) -> Self {
        Self {
            latitude,
            longitude,
        }
    }
}

impl fmt::Display for Coordinates {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}, {}]", self.latitude, self.longitude)
    }
}

/// A geographic point of interest.
///
/// Two locations are equal when they share id and kind; coordinates and
/// description are informational.
#[derive(Debug, Clone)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Location {
    id: LocationId,
    kind: LocationType,
    coordinates: Coordinates,
    description: String,
}

impl Location {
    pub fn new(id: LocationId, kind: LocationType, coordinates: Coordinates) -> Self {
        Self::with_description(id, kind, coordinates, String::new())
    }

    pub fn with_description(
        id: LocationId,
        kind: LocationType,
        coordinates: Coordinates,
        description: impl Into<String>,
    ) -> Self {
        Self {
            id,
            kind,
            coordinates,
            description: description.into(),
        }
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

    pub fn description(&self) -> &str {
        &self.description
    }

    /// Id, description and coordinates in one line.
    pub fn full_description(&self) -> String {
        format!("[{}]: {} {}", self.id, self.description, self.coordinates)
    }
}

impl PartialEq for Location {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id && self.kind == other.kind
    }
}

impl Eq for Location {}

impl Hash for Location {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.id.hash(state);
        self.kind.hash(state);
    }
}

impl fmt::Display for Location {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.description.is_empty() {
            write!(f, "Location [id={}]", self.id)
        } else {
            write!(
                f,
                "Location [id={}, description={}]",
                self.id, self.description
            )
        }
    }
}

/// A vehicle as known to the service layer.
///
/// The home depot is referenced by id and resolved through a
/// [`LocationRepository`](super::LocationRepository) when the vehicle is
/// handed to the optimizer. A vehicle may also carry the location it starts
/// from, usually a [`LocationType::Vehicle`] point.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Vehicle {
    id: VehicleId,
    name: String,
    capacity: i32,
    depot_id: LocationId,
    location: Option<Location>,
}

impl Vehicle {
    pub fn new(id: VehicleId, name: impl Into<String>, capacity: i32, depot_id: LocationId) -> Self {
        Self {
            id,
            name: name.into(),
            capacity,
            depot_id,
            location: None,
        }
    }

    /// Sets the initial location.
    pub fn with_location(mut self, location: Location) -> Self {
        self.location = Some(location);
        self
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

    pub fn depot_id(&self) -> LocationId {
        self.depot_id
    }

    pub fn location(&self) -> Option<&Location> {
        self.location.as_ref()
    }

    /// Returns a copy with a different capacity.
    pub fn with_capacity(&self, capacity: i32) -> Self {
        Self {
            capacity,
            ..self.clone()
        }
    }
}

impl fmt::Display for Vehicle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Vehicle [id={}, name={}]", self.id, self.name)
    }
}

//! RouteForge Core - Core types and traits for incremental route optimization
//!
//! This crate provides the fundamental abstractions for RouteForge:
//! - Score types for representing solution quality
//! - Domain entities (locations, vehicles) and their solver-facing planning copies
//! - Distance lookups adapted from distance matrix rows
//! - The publishable routing plan snapshot
//! - Collaborator ports (location repository, distance matrix, publisher)

pub mod domain;
pub mod error;
pub mod score;

pub use domain::{
    Coordinates, Distance, DistanceMap, DistanceMatrix, DistanceMatrixRow, FactKind, Location,
    LocationId, LocationRepository, LocationType, PlanningDepot, PlanningId, PlanningLocation,
    PlanningSolution, PlanningVehicle, PlanningVisit, RoutePublisher, RoutingPlan, ShallowRoute,
    Vehicle, VehicleId, VehicleRoutingSolution,
};
pub use error::{Result, RouteForgeError};
pub use score::{HardSoftScore, Score};

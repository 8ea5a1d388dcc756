//! Score directors and vehicle routing score calculation for RouteForge.
//!
//! - [`ScoreDirector`] - owns the working solution and is notified around every change
//! - [`SimpleScoreDirector`] - full recalculation with a cached score
//! - [`RecordingScoreDirector`] - undo tracking and change-event log around another director
//! - [`routing`] - the hard/soft score of a [`VehicleRoutingSolution`](routeforge_core::VehicleRoutingSolution)

pub mod director;
pub mod routing;

pub use director::{
    DirectorEvent, RecordingScoreDirector, ScoreDirector, ShadowVariableSupport,
    SimpleScoreDirector,
};
pub use routing::{calculate_routing_score, routing_director, RoutingScoreDirector};

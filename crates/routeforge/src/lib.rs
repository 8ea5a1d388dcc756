//! RouteForge - Incremental Vehicle Routing in Rust
//!
//! Feed depots, vehicles and visits to a [`RouteOptimizer`] one at a time.
//! It keeps the authoritative view of the problem, starts the background
//! solver as soon as the problem is solvable, hands it every later change
//! as an ordered fact change, and stops it when the problem empties out.
//! Subscribers receive [`RoutingPlan`]s through a [`RoutePublisher`].
//!
//! # Example
//!
//! ```rust
//! use std::sync::Arc;
//! use routeforge::prelude::*;
//! use routeforge::publisher::publish_best_solutions;
//!
//! # fn main() -> Result<()> {
//! # use std::collections::HashMap;
//! # #[derive(Default)]
//! # struct Repository(HashMap<i64, Location>);
//! # impl LocationRepository for Repository {
//! #     fn find(&self, id: i64) -> Option<Location> { self.0.get(&id).cloned() }
//! # }
//! # struct Matrix;
//! # impl DistanceMatrix for Matrix {
//! #     fn distance_matrix_row(&self, _: &Location) -> Result<Arc<dyn DistanceMatrixRow>> {
//! #         Ok(Arc::new(HashMap::<i64, Distance>::new()))
//! #     }
//! # }
//! let publisher = BroadcastPublisher::default();
//! let mut plans = publisher.subscribe();
//! let solver = SolverManager::builder()
//!     .on_best_solution(publish_best_solutions(publisher.clone()))
//!     .build()
//!     .expect("default config is valid");
//!
//! let mut optimizer = RouteOptimizer::new(solver, publisher, Repository::default(), Matrix);
//! let depot = Location::new(1, LocationType::Depot, Coordinates::new(50.0, 14.0));
//! optimizer.add_location(&depot, Arc::new(HashMap::<i64, Distance>::new()))?;
//!
//! assert_eq!(plans.try_recv().unwrap().depot_ids, vec![1]);
//! assert_eq!(optimizer.solver_state(), SolverState::Idle);
//! # Ok(())
//! # }
//! ```

pub mod lifecycle;
pub mod optimizer;
pub mod publisher;

pub use lifecycle::{FactCounts, SolverState, Transition};
pub use optimizer::RouteOptimizer;
pub use publisher::{publish_best_solutions, BroadcastPublisher};

// Domain types
pub use routeforge_core::{
    Coordinates, Distance, DistanceMatrix, DistanceMatrixRow, Location, LocationRepository,
    LocationType, RoutePublisher, RoutingPlan, ShallowRoute, Vehicle,
};

// Errors
pub use routeforge_core::{Result, RouteForgeError};

// Score types
pub use routeforge_core::score::{HardSoftScore, Score};

// Solver
pub use routeforge_config::{EnvironmentMode, SolverConfig};
pub use routeforge_solver::{FactChange, RoutingSolver, SolverManager, SolverStatus};

/// Score calculation, for inspecting solutions delivered by the solver.
pub use routeforge_scoring::calculate_routing_score;

pub mod prelude {
    pub use super::{
        BroadcastPublisher, Coordinates, Distance, DistanceMatrix, DistanceMatrixRow,
        HardSoftScore, Location, LocationRepository, LocationType, Result, RouteForgeError,
        RouteOptimizer, RoutePublisher, RoutingPlan, Score, SolverConfig, SolverManager,
        SolverState, Vehicle,
    };
}

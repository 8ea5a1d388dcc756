//! Solver lifecycle management.
//!
//! The orchestrator drives a solver through the [`RoutingSolver`] seam:
//! start it with a snapshot, feed it fact changes, stop it. [`SolverManager`]
//! is the implementation backed by a background [`SolvingLoop`](crate::solving_loop::SolvingLoop).
//!
//! # Example
//!
//! ```
//! use std::sync::mpsc;
//! use routeforge_config::SolverConfig;
//! use routeforge_core::VehicleRoutingSolution;
//! use routeforge_solver::{RoutingSolver, SolverManager, SolverStatus};
//!
//! let (tx, _rx) = mpsc::channel();
//! let mut manager = SolverManager::builder()
//!     .with_config(SolverConfig::default().with_random_seed(1))
//!     .on_best_solution(move |solution: VehicleRoutingSolution| {
//!         let _ = tx.send(solution.score);
//!     })
//!     .build()
//!     .unwrap();
//!
//! manager.start(VehicleRoutingSolution::default()).unwrap();
//! assert_eq!(manager.status(), SolverStatus::Running);
//!
//! manager.stop().unwrap();
//! assert_eq!(manager.status(), SolverStatus::Idle);
//! ```

mod builder;
mod solver_manager;

#[cfg(test)]
mod tests;

pub use builder::SolverManagerBuilder;
pub use solver_manager::SolverManager;

use std::fmt;

use routeforge_core::{Result, VehicleRoutingSolution};

use crate::realtime::FactChange;

/// Whether a solver is currently solving.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum SolverStatus {
    #[default]
    Idle,
    Running,
}

impl SolverStatus {
    pub fn is_running(self) -> bool {
        self == SolverStatus::Running
    }
}

impl fmt::Display for SolverStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SolverStatus::Idle => f.write_str("Idle"),
            SolverStatus::Running => f.write_str("Running"),
        }
    }
}

/// A solver the route optimizer can start, feed and stop.
///
/// Implementations own their working copy: the snapshot passed to
/// [`start`](Self::start) and the fact changes that follow are the only way
/// the problem reaches them.
pub trait RoutingSolver: Send {
    /// Starts solving `snapshot` in the background.
    ///
    /// # Errors
    ///
    /// [`RouteForgeError::InvalidState`](routeforge_core::RouteForgeError::InvalidState)
    /// if already running.
    fn start(&mut self, snapshot: VehicleRoutingSolution) -> Result<()>;

    /// Stops solving and waits for the background work to end.
    ///
    /// A no-op when idle. Returns the error that ended solving early, if any.
    fn stop(&mut self) -> Result<()>;

    /// Queues a fact change for the running solver. Never blocks.
    ///
    /// # Errors
    ///
    /// `InvalidState` when idle, or the fatal error that ended solving.
    fn add_fact_change(&mut self, change: FactChange) -> Result<()>;

    fn status(&self) -> SolverStatus;
}

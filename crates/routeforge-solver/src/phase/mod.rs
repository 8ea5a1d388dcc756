//! Solver phases
//!
//! The solving loop runs two phases on every iteration:
//! - CheapestInsertionPhase: routes every unassigned visit
//! - LocalSearchPhase: one late-acceptance step over list moves

pub mod construction;
pub mod localsearch;

use std::fmt::Debug;

use routeforge_core::VehicleRoutingSolution;
use routeforge_scoring::ScoreDirector;

use crate::scope::SolverScope;

/// A phase of the solving process.
///
/// Phases are executed by the solving loop between fact changes. Each has
/// its own strategy for constructing or improving routes.
pub trait Phase<D: ScoreDirector<VehicleRoutingSolution>>: Send + Debug {
    /// Runs this phase once against the working solution.
    ///
    /// Returns false when the phase found nothing to do.
    fn solve(&mut self, solver_scope: &mut SolverScope<VehicleRoutingSolution, D>) -> bool;

    /// Returns the name of this phase type.
    fn phase_type_name(&self) -> &'static str;
}

pub use construction::CheapestInsertionPhase;
pub use localsearch::{Acceptor, LateAcceptanceAcceptor, LocalSearchPhase};

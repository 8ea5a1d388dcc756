//! When the solver runs.
//!
//! The solver runs exactly while the problem is solvable: at least one
//! depot, one visit and one vehicle whose home depot is among the depots.
//! Vehicles waiting for their home depot stay out of the solver until that
//! depot is added. Every orchestrator call recomputes
//! [`FactCounts`] after mutating its collections and turns the pair
//! (current state, solvable) into a single [`Transition`].

use std::fmt;

pub use routeforge_solver::SolverStatus as SolverState;

/// Sizes of the canonical collections.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct FactCounts {
    pub depots: usize,
    /// Vehicles whose home depot is in the depot collection.
    pub vehicles: usize,
    pub visits: usize,
}

impl FactCounts {
    pub fn new(depots: usize, vehicles: usize, visits: usize) -> Self {
        Self {
            depots,
            vehicles,
            visits,
        }
    }

    pub fn is_solvable(&self) -> bool {
        self.vehicles > 0 && self.depots > 0 && self.visits > 0
    }
}

impl fmt::Display for FactCounts {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} depots, {} vehicles, {} visits",
            self.depots, self.vehicles, self.visits
        )
    }
}

/// What an orchestrator call does with the solver after mutating its facts.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Transition {
    /// Idle and staying idle: publish the canonical snapshot.
    Publish,
    /// Idle to Running: start with the full snapshot.
    Start,
    /// Running to Idle: stop, then publish.
    Stop,
    /// Running and staying so: submit the call's fact change.
    Submit,
}

impl Transition {
    pub fn between(state: SolverState, solvable: bool) -> Self {
        match (state, solvable) {
            (SolverState::Idle, false) => Transition::Publish,
            (SolverState::Idle, true) => Transition::Start,
            (SolverState::Running, false) => Transition::Stop,
            (SolverState::Running, true) => Transition::Submit,
        }
    }
}

//! The background solving loop.

use std::sync::Arc;

use routeforge_config::SolverConfig;
use routeforge_core::{PlanningSolution, VehicleRoutingSolution};
use routeforge_scoring::ScoreDirector;
use tracing::{debug, error, info};

use crate::event::SolverEvents;
use crate::phase::{CheapestInsertionPhase, LocalSearchPhase, Phase};
use crate::realtime::{FactChange, FactChangeReceiver, WaitOutcome};
use crate::scope::SolverScope;

/// Runs on the solver thread until terminated, disconnected, or failed.
///
/// Every iteration applies the pending fact changes in submission order,
/// routes unassigned visits, takes one local search step and announces any
/// new best solution. A loop that stops improving parks on the change
/// channel instead of spinning.
pub struct SolvingLoop<D: ScoreDirector<VehicleRoutingSolution>> {
    scope: SolverScope<VehicleRoutingSolution, D>,
    construction: CheapestInsertionPhase,
    local_search: LocalSearchPhase,
    receiver: FactChangeReceiver,
    events: Arc<SolverEvents>,
    config: SolverConfig,
}

impl<D: ScoreDirector<VehicleRoutingSolution>> SolvingLoop<D> {
    pub fn new(
        scope: SolverScope<VehicleRoutingSolution, D>,
        receiver: FactChangeReceiver,
        events: Arc<SolverEvents>,
        config: SolverConfig,
    ) -> Self {
        let local_search = LocalSearchPhase::new(config.late_acceptance_size);
        Self {
            scope,
            construction: CheapestInsertionPhase::new(),
            local_search,
            receiver,
            events,
            config,
        }
    }

    /// Solves until told to stop. Returns the best solution of the last
    /// problem version.
    pub fn run(mut self) -> VehicleRoutingSolution {
        {
            let solution = self.scope.working_solution();
            info!(
                depots = solution.depots.len(),
                vehicles = solution.vehicles.len(),
                visits = solution.visits.len(),
                "Solving started"
            );
        }
        self.scope.start_solving();
        self.scope.reset_best_solution();
        self.announce();

        while !self.receiver.is_terminate_early_requested() {
            let pending = self.receiver.drain_pending();
            if !self.apply_changes(pending) {
                break;
            }

            self.construction.solve(&mut self.scope);
            let moved = self.local_search.solve(&mut self.scope);
            self.announce();

            if moved && !self.unimproved_limit_reached() {
                continue;
            }
            match self.receiver.wait(self.config.idle_wait()) {
                WaitOutcome::Change(change) => {
                    let mut changes = vec![change];
                    changes.extend(self.receiver.drain_pending());
                    if !self.apply_changes(changes) {
                        break;
                    }
                }
                WaitOutcome::Timeout => {}
                WaitOutcome::Disconnected => break,
            }
        }

        info!(
            steps = self.scope.total_step_count(),
            best_score = ?self.scope.best_score(),
            elapsed = ?self.scope.elapsed(),
            "Solving ended"
        );
        self.scope.take_best_or_working_solution()
    }

    fn unimproved_limit_reached(&self) -> bool {
        self.config
            .unimproved_step_count_limit
            .map_or(false, |limit| self.scope.unimproved_step_count() >= limit)
    }

    /// Applies changes in order. Returns false if the loop must end.
    fn apply_changes(&mut self, changes: Vec<FactChange>) -> bool {
        if changes.is_empty() {
            return true;
        }
        let count = changes.len();
        for change in changes {
            let mut result = change.apply(self.scope.score_director_mut());
            if result.is_ok() && self.config.asserts_consistency() {
                result = self.scope.working_solution().verify_consistency();
            }
            if let Err(err) = result {
                error!(change = %change, error = %err, "Fact change failed, solving stops");
                self.events.fail(err);
                return false;
            }
        }

        self.scope.reset_best_solution();
        self.local_search.reset();
        debug!(
            count,
            initialized = self.scope.working_solution().is_initialized(),
            "Fact changes applied"
        );
        self.announce();
        true
    }

    fn announce(&mut self) {
        if let Some(best) = self.scope.take_best_if_changed() {
            self.events.announce_best(best.clone());
        }
    }
}

#[cfg(test)]
#[path = "solving_loop_tests.rs"]
mod tests;

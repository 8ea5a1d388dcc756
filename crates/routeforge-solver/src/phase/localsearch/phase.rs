//! LocalSearchPhase - one late acceptance step per call.

use std::fmt;

use routeforge_core::{HardSoftScore, VehicleRoutingSolution};
use routeforge_scoring::{RecordingScoreDirector, ScoreDirector};
use tracing::trace;

use super::{Acceptor, LateAcceptanceAcceptor};
use crate::heuristic::RandomListMoveSelector;
use crate::phase::Phase;
use crate::scope::SolverScope;

/// Improves routed solutions one random move at a time.
///
/// Each call to [`Phase::solve`] draws one doable move, scores it, and keeps
/// it if the acceptor agrees. Rejected moves are undone. The acceptor's
/// history restarts after [`reset`](Self::reset), which the solving loop
/// calls whenever facts change.
pub struct LocalSearchPhase {
    acceptor: LateAcceptanceAcceptor<VehicleRoutingSolution>,
    selector: RandomListMoveSelector,
    last_step_score: Option<HardSoftScore>,
}

impl LocalSearchPhase {
    pub fn new(late_acceptance_size: usize) -> Self {
        Self {
            acceptor: LateAcceptanceAcceptor::new(late_acceptance_size),
            selector: RandomListMoveSelector::default(),
            last_step_score: None,
        }
    }

    pub fn reset(&mut self) {
        self.last_step_score = None;
    }
}

impl fmt::Debug for LocalSearchPhase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LocalSearchPhase")
            .field("acceptor", &self.acceptor)
            .field("last_step_score", &self.last_step_score)
            .finish()
    }
}

impl<D: ScoreDirector<VehicleRoutingSolution>> Phase<D> for LocalSearchPhase {
    fn solve(&mut self, solver_scope: &mut SolverScope<VehicleRoutingSolution, D>) -> bool {
        let last_step_score = match self.last_step_score {
            Some(score) => score,
            None => {
                let score = solver_scope.calculate_score();
                self.acceptor.phase_started(&score);
                self.last_step_score = Some(score);
                score
            }
        };

        let selected = {
            let (solution, rng) = solver_scope.working_solution_and_rng();
            self.selector.select(solution, rng)
        };
        let Some(mv) = selected else {
            return false;
        };

        let (move_score, accepted) = {
            let mut recording = RecordingScoreDirector::new(solver_scope.score_director_mut());
            mv.do_move(&mut recording);
            let score = recording.calculate_score();
            let accepted = self.acceptor.is_accepted(&last_step_score, &score);
            if accepted {
                recording.commit();
            } else {
                recording.undo_changes();
            }
            (score, accepted)
        };
        trace!(%mv, %move_score, accepted, "Move evaluated");

        let improved = if accepted {
            self.acceptor.step_ended(&move_score);
            self.last_step_score = Some(move_score);
            solver_scope.update_best_solution()
        } else {
            false
        };
        solver_scope.record_step(improved);
        true
    }

    fn phase_type_name(&self) -> &'static str {
        "LocalSearch"
    }
}

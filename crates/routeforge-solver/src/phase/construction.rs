//! Cheapest insertion construction heuristic.

use routeforge_core::VehicleRoutingSolution;
use routeforge_scoring::{RecordingScoreDirector, ScoreDirector};
use tracing::debug;

use super::Phase;
use crate::heuristic::ListMove;
use crate::scope::SolverScope;

/// Inserts each unassigned visit, in collection order, at the position of
/// whichever route yields the best score.
#[derive(Debug, Default, Clone, Copy)]
pub struct CheapestInsertionPhase;

impl CheapestInsertionPhase {
    pub fn new() -> Self {
        Self
    }

    fn best_insertion<D>(visit_id: i64, director: &mut D) -> Option<ListMove>
    where
        D: ScoreDirector<VehicleRoutingSolution>,
    {
        let route_lens: Vec<usize> = director
            .working_solution()
            .vehicles
            .iter()
            .map(|v| v.visits().len())
            .collect();

        let mut best = None;
        for (vehicle, len) in route_lens.into_iter().enumerate() {
            for position in 0..=len {
                let candidate = ListMove::Assign {
                    visit_id,
                    vehicle,
                    position,
                };
                let mut recording = RecordingScoreDirector::new(&mut *director);
                candidate.do_move(&mut recording);
                let score = recording.calculate_score();
                recording.undo_changes();

                if best.as_ref().map_or(true, |(_, b)| score > *b) {
                    best = Some((candidate, score));
                }
            }
        }
        best.map(|(mv, _)| mv)
    }
}

impl<D: ScoreDirector<VehicleRoutingSolution>> Phase<D> for CheapestInsertionPhase {
    fn solve(&mut self, solver_scope: &mut SolverScope<VehicleRoutingSolution, D>) -> bool {
        let unassigned = solver_scope.working_solution().unassigned_visit_ids();
        if unassigned.is_empty() || solver_scope.working_solution().vehicles.is_empty() {
            return false;
        }

        for &visit_id in &unassigned {
            let director = solver_scope.score_director_mut();
            if let Some(mv) = Self::best_insertion(visit_id, director) {
                mv.do_move(director);
            }
        }

        let score = solver_scope.calculate_score();
        debug!(inserted = unassigned.len(), %score, "Construction finished");
        solver_scope.update_best_solution();
        true
    }

    fn phase_type_name(&self) -> &'static str {
        "CheapestInsertion"
    }
}

#[cfg(test)]
mod tests {
    use routeforge_core::PlanningSolution;
    use routeforge_scoring::routing_director;
    use routeforge_test::builders::sample_solution;
    use routeforge_test::ManhattanMatrix;

    use super::*;

    #[test]
    fn routes_every_visit() {
        let matrix = ManhattanMatrix::new();
        let mut scope = SolverScope::with_seed(routing_director(sample_solution(&matrix)), 0);
        let mut phase = CheapestInsertionPhase::new();

        assert!(phase.solve(&mut scope));
        let solution = scope.working_solution();
        assert!(solution.is_initialized());
        assert!(solution.verify_consistency().is_ok());
        // One loop through all three visits is cheapest.
        assert_eq!(solution.total_distance().millis(), 6000);
        assert!(scope.best_solution().is_some());
    }

    #[test]
    fn nothing_to_do_when_all_routed() {
        let matrix = ManhattanMatrix::new();
        let mut solution = sample_solution(&matrix);
        solution.vehicles[0].visits_mut().extend([2, 3, 4]);
        let mut scope = SolverScope::with_seed(routing_director(solution), 0);

        assert!(!CheapestInsertionPhase::new().solve(&mut scope));
    }

    #[test]
    fn nothing_to_do_without_vehicles() {
        let matrix = ManhattanMatrix::new();
        let mut solution = sample_solution(&matrix);
        solution.vehicles.clear();
        let mut scope = SolverScope::with_seed(routing_director(solution), 0);

        assert!(!CheapestInsertionPhase::new().solve(&mut scope));
    }
}

//! Simple score director with full recalculation.

use std::fmt;

use routeforge_core::FactKind;

use super::shadow::ShadowVariableSupport;
use super::traits::ScoreDirector;

/// A score director that recalculates the full score each time it is asked
/// after a change, and returns the cached score otherwise.
///
/// Shadow variables are refreshed per entity after list changes and
/// wholesale when variable listeners are triggered.
pub struct SimpleScoreDirector<S: ShadowVariableSupport, C> {
    working_solution: S,
    score_calculator: C,
    score_dirty: bool,
    cached_score: Option<S::Score>,
}

impl<S, C> SimpleScoreDirector<S, C>
where
    S: ShadowVariableSupport,
    C: Fn(&S) -> S::Score + Send + Sync,
{
    /// Creates a new SimpleScoreDirector.
    ///
    /// Shadow variables of `solution` are brought up to date immediately.
    pub fn new(mut solution: S, score_calculator: C) -> Self {
        solution.update_all_shadows();
        SimpleScoreDirector {
            working_solution: solution,
            score_calculator,
            score_dirty: true,
            cached_score: None,
        }
    }

    /// Consumes the director and returns the working solution.
    pub fn into_working_solution(self) -> S {
        self.working_solution
    }

    fn mark_dirty(&mut self) {
        self.score_dirty = true;
    }
}

impl<S, C> ScoreDirector<S> for SimpleScoreDirector<S, C>
where
    S: ShadowVariableSupport,
    C: Fn(&S) -> S::Score + Send + Sync,
{
    fn working_solution(&self) -> &S {
        &self.working_solution
    }

    fn working_solution_mut(&mut self) -> &mut S {
        self.mark_dirty();
        &mut self.working_solution
    }

    fn calculate_score(&mut self) -> S::Score {
        if !self.score_dirty {
            if let Some(ref score) = self.cached_score {
                return *score;
            }
        }

        let score = (self.score_calculator)(&self.working_solution);
        self.working_solution.set_score(Some(score));
        self.cached_score = Some(score);
        self.score_dirty = false;
        score
    }

    fn clone_working_solution(&self) -> S {
        self.working_solution.clone()
    }

    fn before_problem_fact_added(&mut self, _kind: FactKind, _id: i64) {
        self.mark_dirty();
    }

    fn before_problem_fact_removed(&mut self, _kind: FactKind, _id: i64) {
        self.mark_dirty();
    }

    fn before_entity_added(&mut self, _kind: FactKind, _id: i64) {
        self.mark_dirty();
    }

    fn before_entity_removed(&mut self, _kind: FactKind, _id: i64) {
        self.mark_dirty();
    }

    fn before_problem_property_changed(&mut self, _kind: FactKind, _id: i64) {
        self.mark_dirty();
    }

    fn before_list_variable_changed(&mut self, _entity_index: usize) {
        self.mark_dirty();
    }

    fn after_list_variable_changed(&mut self, entity_index: usize) {
        self.working_solution.update_entity_shadows(entity_index);
    }

    fn trigger_variable_listeners(&mut self) {
        self.working_solution.update_all_shadows();
        self.mark_dirty();
    }

    fn reset(&mut self) {
        self.mark_dirty();
        self.cached_score = None;
    }
}

impl<S: ShadowVariableSupport, C> fmt::Debug for SimpleScoreDirector<S, C> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SimpleScoreDirector")
            .field("score_dirty", &self.score_dirty)
            .field("cached_score", &self.cached_score)
            .finish_non_exhaustive()
    }
}

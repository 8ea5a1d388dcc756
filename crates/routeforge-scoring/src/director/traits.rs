// Score director trait definition.

use routeforge_core::{FactKind, PlanningSolution};

// The score director manages solution state and score calculation.
//
// It is responsible for:
// - Maintaining the working solution
// - Calculating scores
// - Being told before and after every structural change, so derived state
//   (cached score, shadow variables) can follow
//
// Every mutation of the working solution goes through a before/after pair.
// Hooks default to no-ops; directors override the ones they care about.
pub trait ScoreDirector<S: PlanningSolution>: Send {
    // Returns a reference to the working solution.
    fn working_solution(&self) -> &S;

    // Returns a mutable reference to the working solution.
    fn working_solution_mut(&mut self) -> &mut S;

    // Calculates and returns the current score.
    fn calculate_score(&mut self) -> S::Score;

    // Clones the working solution.
    fn clone_working_solution(&self) -> S;

    fn before_problem_fact_added(&mut self, _kind: FactKind, _id: i64) {}

    fn after_problem_fact_added(&mut self, _kind: FactKind, _id: i64) {}

    fn before_problem_fact_removed(&mut self, _kind: FactKind, _id: i64) {}

    fn after_problem_fact_removed(&mut self, _kind: FactKind, _id: i64) {}

    fn before_entity_added(&mut self, _kind: FactKind, _id: i64) {}

    fn after_entity_added(&mut self, _kind: FactKind, _id: i64) {}

    fn before_entity_removed(&mut self, _kind: FactKind, _id: i64) {}

    fn after_entity_removed(&mut self, _kind: FactKind, _id: i64) {}

    // Called before a non-planning attribute of a fact changes (e.g. capacity).
    fn before_problem_property_changed(&mut self, _kind: FactKind, _id: i64) {}

    fn after_problem_property_changed(&mut self, _kind: FactKind, _id: i64) {}

    // Called before the list variable of the entity at `entity_index` changes.
    fn before_list_variable_changed(&mut self, entity_index: usize);

    // Called after the list variable of the entity at `entity_index` changed.
    fn after_list_variable_changed(&mut self, entity_index: usize);

    // Triggers shadow variable listeners to update derived values.
    fn trigger_variable_listeners(&mut self);

    // Resets the score director state.
    fn reset(&mut self) {}

    // Registers a typed undo closure.
    //
    // Called by moves after applying changes to enable automatic undo.
    // Default implementation does nothing (for non-recording directors).
    fn register_undo(&mut self, _undo: Box<dyn FnOnce(&mut S) + Send>) {}
}

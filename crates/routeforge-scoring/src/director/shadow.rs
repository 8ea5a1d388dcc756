// Shadow variable support for solutions with derived per-entity values.

use routeforge_core::PlanningSolution;

// Trait for solutions that maintain shadow variables.
//
// Shadow variables are derived values that depend on planning variables.
// When a planning variable changes, the corresponding shadow variables
// must be updated before constraint evaluation.
//
// # Entity-Level Updates
//
// When the list variable of entity N changes, only entity N's shadows are
// refreshed. Structural changes (facts added or removed) refresh everything.
pub trait ShadowVariableSupport: PlanningSolution {
    // Updates shadow variables for the entity at `entity_index`.
    fn update_entity_shadows(&mut self, entity_index: usize);

    // Updates shadow variables for all entities.
    fn update_all_shadows(&mut self);
}

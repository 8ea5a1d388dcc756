// Recording score director for undo tracking and change auditing.
//
// The `RecordingScoreDirector` wraps an existing score director, stores
// typed undo closures registered by moves, and logs every change
// notification it forwards:
//
// ```text
// let mut recording = RecordingScoreDirector::new(&mut inner_sd);
// mv.do_move(&mut recording);   // move registers its undo closure
// let score = recording.calculate_score();
// recording.undo_changes();     // undo closures run in reverse order
// ```

use routeforge_core::{FactKind, PlanningSolution};

use super::ScoreDirector;

/// A change notification observed by a [`RecordingScoreDirector`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DirectorEvent {
    BeforeProblemFactAdded(FactKind, i64),
    AfterProblemFactAdded(FactKind, i64),
    BeforeProblemFactRemoved(FactKind, i64),
    AfterProblemFactRemoved(FactKind, i64),
    BeforeEntityAdded(FactKind, i64),
    AfterEntityAdded(FactKind, i64),
    BeforeEntityRemoved(FactKind, i64),
    AfterEntityRemoved(FactKind, i64),
    BeforeProblemPropertyChanged(FactKind, i64),
    AfterProblemPropertyChanged(FactKind, i64),
    BeforeListVariableChanged(usize),
    AfterListVariableChanged(usize),
    VariableListenersTriggered,
}

/// A score director wrapper that stores typed undo closures and an event log.
///
/// # Example
///
/// ```
/// use routeforge_core::VehicleRoutingSolution;
/// use routeforge_scoring::{routing_director, RecordingScoreDirector, ScoreDirector};
///
/// let mut sd = routing_director(VehicleRoutingSolution::default());
/// let mut recording = RecordingScoreDirector::new(&mut sd);
///
/// recording.working_solution_mut().score = None;
/// recording.register_undo(Box::new(|s: &mut VehicleRoutingSolution| s.score = None));
/// assert_eq!(recording.change_count(), 1);
///
/// recording.undo_changes();
/// assert!(recording.is_empty());
/// ```
pub struct RecordingScoreDirector<'a, S: PlanningSolution> {
    inner: &'a mut dyn ScoreDirector<S>,
    undo_stack: Vec<Box<dyn FnOnce(&mut S) + Send>>,
    // Entities whose list variable changed during this step.
    modified_entities: Vec<usize>,
    events: Vec<DirectorEvent>,
}

impl<'a, S: PlanningSolution> RecordingScoreDirector<'a, S> {
    pub fn new(inner: &'a mut dyn ScoreDirector<S>) -> Self {
        Self {
            inner,
            undo_stack: Vec::with_capacity(8),
            modified_entities: Vec::with_capacity(4),
            events: Vec::new(),
        }
    }

    /// Undoes all recorded changes in reverse order.
    ///
    /// Modified entities get a fresh before/after pair around the restore so
    /// their shadows and the cached score follow.
    pub fn undo_changes(&mut self) {
        for &entity_index in &self.modified_entities {
            self.inner.before_list_variable_changed(entity_index);
        }

        while let Some(undo) = self.undo_stack.pop() {
            undo(self.inner.working_solution_mut());
        }

        for entity_index in self.modified_entities.drain(..) {
            self.inner.after_list_variable_changed(entity_index);
        }
    }

    /// Forgets recorded undo closures without running them.
    pub fn commit(&mut self) {
        self.undo_stack.clear();
        self.modified_entities.clear();
    }

    pub fn change_count(&self) -> usize {
        self.undo_stack.len()
    }

    pub fn is_empty(&self) -> bool {
        self.undo_stack.is_empty()
    }

    /// Every change notification forwarded so far, oldest first.
    pub fn events(&self) -> &[DirectorEvent] {
        &self.events
    }

    pub fn take_events(&mut self) -> Vec<DirectorEvent> {
        std::mem::take(&mut self.events)
    }
}

impl<S: PlanningSolution> ScoreDirector<S> for RecordingScoreDirector<'_, S> {
    fn working_solution(&self) -> &S {
        self.inner.working_solution()
    }

    fn working_solution_mut(&mut self) -> &mut S {
        self.inner.working_solution_mut()
    }

    fn calculate_score(&mut self) -> S::Score {
        self.inner.calculate_score()
    }

    fn clone_working_solution(&self) -> S {
        self.inner.clone_working_solution()
    }

    fn before_problem_fact_added(&mut self, kind: FactKind, id: i64) {
        self.events.push(DirectorEvent::BeforeProblemFactAdded(kind, id));
        self.inner.before_problem_fact_added(kind, id);
    }

    fn after_problem_fact_added(&mut self, kind: FactKind, id: i64) {
        self.inner.after_problem_fact_added(kind, id);
        self.events.push(DirectorEvent::AfterProblemFactAdded(kind, id));
    }

    fn before_problem_fact_removed(&mut self, kind: FactKind, id: i64) {
        self.events.push(DirectorEvent::BeforeProblemFactRemoved(kind, id));
        self.inner.before_problem_fact_removed(kind, id);
    }

    fn after_problem_fact_removed(&mut self, kind: FactKind, id: i64) {
        self.inner.after_problem_fact_removed(kind, id);
        self.events.push(DirectorEvent::AfterProblemFactRemoved(kind, id));
    }

    fn before_entity_added(&mut self, kind: FactKind, id: i64) {
        self.events.push(DirectorEvent::BeforeEntityAdded(kind, id));
        self.inner.before_entity_added(kind, id);
    }

    fn after_entity_added(&mut self, kind: FactKind, id: i64) {
        self.inner.after_entity_added(kind, id);
        self.events.push(DirectorEvent::AfterEntityAdded(kind, id));
    }

    fn before_entity_removed(&mut self, kind: FactKind, id: i64) {
        self.events.push(DirectorEvent::BeforeEntityRemoved(kind, id));
        self.inner.before_entity_removed(kind, id);
    }

    fn after_entity_removed(&mut self, kind: FactKind, id: i64) {
        self.inner.after_entity_removed(kind, id);
        self.events.push(DirectorEvent::AfterEntityRemoved(kind, id));
    }

    fn before_problem_property_changed(&mut self, kind: FactKind, id: i64) {
        self.events
            .push(DirectorEvent::BeforeProblemPropertyChanged(kind, id));
        self.inner.before_problem_property_changed(kind, id);
    }

    fn after_problem_property_changed(&mut self, kind: FactKind, id: i64) {
        self.inner.after_problem_property_changed(kind, id);
        self.events
            .push(DirectorEvent::AfterProblemPropertyChanged(kind, id));
    }

    fn before_list_variable_changed(&mut self, entity_index: usize) {
        self.events
            .push(DirectorEvent::BeforeListVariableChanged(entity_index));
        self.inner.before_list_variable_changed(entity_index);
    }

    fn after_list_variable_changed(&mut self, entity_index: usize) {
        self.inner.after_list_variable_changed(entity_index);
        self.events
            .push(DirectorEvent::AfterListVariableChanged(entity_index));

        if !self.modified_entities.contains(&entity_index) {
            self.modified_entities.push(entity_index);
        }
    }

    fn trigger_variable_listeners(&mut self) {
        self.inner.trigger_variable_listeners();
        self.events.push(DirectorEvent::VariableListenersTriggered);
    }

    fn reset(&mut self) {
        self.inner.reset();
        self.undo_stack.clear();
        self.modified_entities.clear();
    }

    fn register_undo(&mut self, undo: Box<dyn FnOnce(&mut S) + Send>) {
        self.undo_stack.push(undo);
    }
}

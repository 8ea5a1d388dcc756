use routeforge_core::{FactKind, HardSoftScore, PlanningSolution, VehicleRoutingSolution};
use routeforge_test::builders::sample_solution;
use routeforge_test::ManhattanMatrix;

use super::*;
use crate::routing::{calculate_routing_score, routing_director};

fn assigned(matrix: &ManhattanMatrix) -> VehicleRoutingSolution {
    let mut solution = sample_solution(matrix);
    solution.vehicles[0].visits_mut().extend([2, 3]);
    solution.vehicles[1].visits_mut().push(4);
    solution
}

#[test]
fn new_director_refreshes_shadows() {
    let matrix = ManhattanMatrix::new();
    let director = routing_director(assigned(&matrix));

    let solution = director.working_solution();
    assert_eq!(solution.visit(3).and_then(|v| v.previous_location_id()), Some(2));
    assert_eq!(solution.visit(4).and_then(|v| v.vehicle_id()), Some(11));
    assert!(solution.verify_consistency().is_ok());
}

#[test]
fn score_is_cached_until_a_change() {
    let matrix = ManhattanMatrix::new();
    let mut director = routing_director(assigned(&matrix));

    let first = director.calculate_score();
    assert_eq!(director.working_solution().score(), Some(first));
    assert_eq!(director.calculate_score(), first);

    director.before_list_variable_changed(1);
    director.working_solution_mut().vehicles[1].take_visits();
    director.after_list_variable_changed(1);

    let second = director.calculate_score();
    assert!(second > first);
    assert!(director.working_solution().visit(4).unwrap().vehicle_id().is_none());
}

#[test]
fn overflow_is_a_hard_penalty() {
    let matrix = ManhattanMatrix::new();
    let mut solution = assigned(&matrix);
    solution.vehicles[0].set_capacity(1);

    let score = calculate_routing_score(&solution);
    assert_eq!(score.hard(), -1);
    assert!(score.soft() < 0);
}

#[test]
fn empty_routes_score_zero() {
    let matrix = ManhattanMatrix::new();
    let score = calculate_routing_score(&sample_solution(&matrix));
    assert_eq!(score, HardSoftScore::ZERO);
}

#[test]
fn recording_director_undoes_in_reverse_order() {
    let matrix = ManhattanMatrix::new();
    let mut inner = routing_director(assigned(&matrix));
    let before = inner.calculate_score();

    {
        let mut recording = RecordingScoreDirector::new(&mut inner);
        recording.before_list_variable_changed(0);
        let removed = recording.working_solution_mut().vehicles[0].visits_mut().remove(0);
        recording.after_list_variable_changed(0);
        recording.register_undo(Box::new(move |s: &mut VehicleRoutingSolution| {
            s.vehicles[0].visits_mut().insert(0, removed)
        }));

        assert_ne!(recording.calculate_score(), before);
        recording.undo_changes();
        assert!(recording.is_empty());
    }

    assert_eq!(inner.working_solution().vehicles[0].visits(), &[2, 3]);
    assert_eq!(inner.calculate_score(), before);
    assert!(inner.working_solution().verify_consistency().is_ok());
}

#[test]
fn recording_director_logs_hooks_in_order() {
    let matrix = ManhattanMatrix::new();
    let mut inner = routing_director(assigned(&matrix));
    let mut recording = RecordingScoreDirector::new(&mut inner);

    recording.before_problem_property_changed(FactKind::Vehicle, 10);
    recording.after_problem_property_changed(FactKind::Vehicle, 10);
    recording.trigger_variable_listeners();

    assert_eq!(
        recording.events(),
        &[
            DirectorEvent::BeforeProblemPropertyChanged(FactKind::Vehicle, 10),
            DirectorEvent::AfterProblemPropertyChanged(FactKind::Vehicle, 10),
            DirectorEvent::VariableListenersTriggered,
        ]
    );
    assert_eq!(recording.take_events().len(), 3);
    assert!(recording.events().is_empty());
}

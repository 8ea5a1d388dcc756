//! ListMove - changes to the route list of one or two vehicles.

use std::fmt;

use routeforge_core::{LocationId, VehicleRoutingSolution};
use routeforge_scoring::ScoreDirector;

/// A change to the vehicles' route lists.
///
/// Positions are indices into `PlanningVehicle::visits`. For `Relocate`,
/// `to_position` is the index in the destination list after the visit has
/// been removed from its source.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ListMove {
    /// Inserts an unassigned visit into a route.
    Assign {
        visit_id: LocationId,
        vehicle: usize,
        position: usize,
    },
    /// Moves one visit within a route or to another route.
    Relocate {
        from_vehicle: usize,
        from_position: usize,
        to_vehicle: usize,
        to_position: usize,
    },
    /// Reverses `visits[start..=end]` of one route (2-opt).
    Reverse {
        vehicle: usize,
        start: usize,
        end: usize,
    },
}

impl ListMove {
    /// Returns true if this move can be executed on `solution` and changes it.
    pub fn is_doable(&self, solution: &VehicleRoutingSolution) -> bool {
        let route_len = |i: usize| solution.vehicles.get(i).map(|v| v.visits().len());
        match *self {
            ListMove::Assign {
                visit_id,
                vehicle,
                position,
            } => {
                route_len(vehicle).is_some_and(|len| position <= len)
                    && solution.visit(visit_id).is_some_and(|v| !v.is_assigned())
            }
            ListMove::Relocate {
                from_vehicle,
                from_position,
                to_vehicle,
                to_position,
            } => {
                let (Some(from_len), Some(to_len)) = (route_len(from_vehicle), route_len(to_vehicle))
                else {
                    return false;
                };
                if from_position >= from_len {
                    return false;
                }
                if from_vehicle == to_vehicle {
                    to_position < from_len && to_position != from_position
                } else {
                    to_position <= to_len
                }
            }
            ListMove::Reverse {
                vehicle,
                start,
                end,
            } => route_len(vehicle).is_some_and(|len| start < end && end < len),
        }
    }

    /// Executes this move through `director` and registers its undo.
    ///
    /// The move must be doable.
    pub fn do_move(&self, director: &mut dyn ScoreDirector<VehicleRoutingSolution>) {
        match *self {
            ListMove::Assign {
                visit_id,
                vehicle,
                position,
            } => {
                director.before_list_variable_changed(vehicle);
                director.working_solution_mut().vehicles[vehicle]
                    .visits_mut()
                    .insert(position, visit_id);
                director.after_list_variable_changed(vehicle);

                director.register_undo(Box::new(move |s: &mut VehicleRoutingSolution| {
                    s.vehicles[vehicle].visits_mut().remove(position);
                }));
            }
            ListMove::Relocate {
                from_vehicle,
                from_position,
                to_vehicle,
                to_position,
            } => {
                director.before_list_variable_changed(from_vehicle);
                if to_vehicle != from_vehicle {
                    director.before_list_variable_changed(to_vehicle);
                }

                let solution = director.working_solution_mut();
                let visit_id = solution.vehicles[from_vehicle].visits_mut().remove(from_position);
                solution.vehicles[to_vehicle]
                    .visits_mut()
                    .insert(to_position, visit_id);

                director.after_list_variable_changed(from_vehicle);
                if to_vehicle != from_vehicle {
                    director.after_list_variable_changed(to_vehicle);
                }

                director.register_undo(Box::new(move |s: &mut VehicleRoutingSolution| {
                    let visit_id = s.vehicles[to_vehicle].visits_mut().remove(to_position);
                    s.vehicles[from_vehicle]
                        .visits_mut()
                        .insert(from_position, visit_id);
                }));
            }
            ListMove::Reverse {
                vehicle,
                start,
                end,
            } => {
                director.before_list_variable_changed(vehicle);
                director.working_solution_mut().vehicles[vehicle].visits_mut()[start..=end].reverse();
                director.after_list_variable_changed(vehicle);

                director.register_undo(Box::new(move |s: &mut VehicleRoutingSolution| {
                    s.vehicles[vehicle].visits_mut()[start..=end].reverse();
                }));
            }
        }
    }

    /// Vehicle indices whose route this move touches.
    pub fn vehicle_indices(&self) -> Vec<usize> {
        match *self {
            ListMove::Assign { vehicle, .. } | ListMove::Reverse { vehicle, .. } => vec![vehicle],
            ListMove::Relocate {
                from_vehicle,
                to_vehicle,
                ..
            } if from_vehicle == to_vehicle => vec![from_vehicle],
            ListMove::Relocate {
                from_vehicle,
                to_vehicle,
                ..
            } => vec![from_vehicle, to_vehicle],
        }
    }
}

impl fmt::Display for ListMove {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match *self {
            ListMove::Assign {
                visit_id,
                vehicle,
                position,
            } => write!(f, "assign {visit_id} -> {vehicle}[{position}]"),
            ListMove::Relocate {
                from_vehicle,
                from_position,
                to_vehicle,
                to_position,
            } => write!(
                f,
                "{from_vehicle}[{from_position}] -> {to_vehicle}[{to_position}]"
            ),
            ListMove::Reverse {
                vehicle,
                start,
                end,
            } => write!(f, "reverse {vehicle}[{start}..={end}]"),
        }
    }
}

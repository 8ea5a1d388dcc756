//! Atomic changes to the solver's working solution.

use std::fmt;

use routeforge_core::{
    FactKind, LocationId, PlanningDepot, PlanningVehicle, PlanningVisit, Result, RouteForgeError,
    VehicleId, VehicleRoutingSolution,
};
use routeforge_scoring::ScoreDirector;
use tracing::debug;

/// A change to the routing problem, applied by the solving loop between
/// steps.
///
/// Additions carry their own copy of the fact; removals and updates carry
/// only the id and look the working copy up by it. Every variant brackets
/// its mutation with the director's before/after hooks and finishes with
/// [`ScoreDirector::trigger_variable_listeners`].
#[derive(Debug, Clone)]
pub enum FactChange {
    AddDepot(PlanningDepot),
    RemoveDepot { depot_id: LocationId },
    AddVehicle(PlanningVehicle),
    RemoveVehicle { vehicle_id: VehicleId },
    AddVisit(PlanningVisit),
    RemoveVisit { visit_id: LocationId },
    ChangeVehicleCapacity { vehicle_id: VehicleId, capacity: i32 },
}

impl FactChange {
    pub fn kind(&self) -> FactKind {
        match self {
            FactChange::AddDepot(_) | FactChange::RemoveDepot { .. } => FactKind::Depot,
            FactChange::AddVisit(_) | FactChange::RemoveVisit { .. } => FactKind::Visit,
            FactChange::AddVehicle(_)
            | FactChange::RemoveVehicle { .. }
            | FactChange::ChangeVehicleCapacity { .. } => FactKind::Vehicle,
        }
    }

    /// Id of the fact this change targets.
    pub fn target_id(&self) -> i64 {
        match self {
            FactChange::AddDepot(depot) => depot.id(),
            FactChange::RemoveDepot { depot_id } => *depot_id,
            FactChange::AddVehicle(vehicle) => vehicle.id(),
            FactChange::RemoveVehicle { vehicle_id } => *vehicle_id,
            FactChange::AddVisit(visit) => visit.id(),
            FactChange::RemoveVisit { visit_id } => *visit_id,
            FactChange::ChangeVehicleCapacity { vehicle_id, .. } => *vehicle_id,
        }
    }

    fn name(&self) -> &'static str {
        match self {
            FactChange::AddDepot(_) => "AddDepot",
            FactChange::RemoveDepot { .. } => "RemoveDepot",
            FactChange::AddVehicle(_) => "AddVehicle",
            FactChange::RemoveVehicle { .. } => "RemoveVehicle",
            FactChange::AddVisit(_) => "AddVisit",
            FactChange::RemoveVisit { .. } => "RemoveVisit",
            FactChange::ChangeVehicleCapacity { .. } => "ChangeVehicleCapacity",
        }
    }

    /// Applies this change to the director's working solution.
    ///
    /// # Errors
    ///
    /// [`RouteForgeError::InternalInvariant`] when the working copy does not
    /// contain the targeted fact (or already contains a fact being added).
    /// The working solution is left untouched in that case.
    pub fn apply(&self, director: &mut dyn ScoreDirector<VehicleRoutingSolution>) -> Result<()> {
        debug!(change = %self, "Applying fact change");
        match self {
            FactChange::AddDepot(depot) => {
                let id = depot.id();
                ensure_absent(director.working_solution().depot_index(id), FactKind::Depot, id)?;
                director.before_problem_fact_added(FactKind::Depot, id);
                director.working_solution_mut().depots.push(depot.clone());
                director.after_problem_fact_added(FactKind::Depot, id);
            }
            FactChange::RemoveDepot { depot_id } => {
                let id = *depot_id;
                let index = look_up(director.working_solution().depot_index(id), FactKind::Depot, id)?;
                director.before_problem_fact_removed(FactKind::Depot, id);
                remove_checked(&mut director.working_solution_mut().depots, index, |d| d.id() == id)?;
                director.after_problem_fact_removed(FactKind::Depot, id);
            }
            FactChange::AddVehicle(vehicle) => {
                let id = vehicle.id();
                ensure_absent(director.working_solution().vehicle_index(id), FactKind::Vehicle, id)?;
                let mut vehicle = vehicle.clone();
                vehicle.take_visits();
                director.before_entity_added(FactKind::Vehicle, id);
                director.working_solution_mut().vehicles.push(vehicle);
                director.after_entity_added(FactKind::Vehicle, id);
            }
            FactChange::RemoveVehicle { vehicle_id } => {
                let id = *vehicle_id;
                let index =
                    look_up(director.working_solution().vehicle_index(id), FactKind::Vehicle, id)?;

                // Release the route to the unassigned pool first.
                director.before_list_variable_changed(index);
                let released = director.working_solution_mut().vehicles[index].take_visits();
                director.after_list_variable_changed(index);
                debug!(vehicle_id = id, released = released.len(), "Released route of removed vehicle");

                director.before_entity_removed(FactKind::Vehicle, id);
                remove_checked(&mut director.working_solution_mut().vehicles, index, |v| v.id() == id)?;
                director.after_entity_removed(FactKind::Vehicle, id);
            }
            FactChange::AddVisit(visit) => {
                let id = visit.id();
                ensure_absent(director.working_solution().visit_index(id), FactKind::Visit, id)?;
                director.before_entity_added(FactKind::Visit, id);
                director.working_solution_mut().visits.push(visit.clone());
                director.after_entity_added(FactKind::Visit, id);
            }
            FactChange::RemoveVisit { visit_id } => {
                let id = *visit_id;
                let index = look_up(director.working_solution().visit_index(id), FactKind::Visit, id)?;

                let routed = director
                    .working_solution()
                    .vehicles
                    .iter()
                    .enumerate()
                    .find_map(|(vi, v)| v.visits().iter().position(|&x| x == id).map(|p| (vi, p)));
                if let Some((vehicle_index, position)) = routed {
                    director.before_list_variable_changed(vehicle_index);
                    director.working_solution_mut().vehicles[vehicle_index]
                        .visits_mut()
                        .remove(position);
                    director.after_list_variable_changed(vehicle_index);
                }

                director.before_entity_removed(FactKind::Visit, id);
                remove_checked(&mut director.working_solution_mut().visits, index, |v| v.id() == id)?;
                director.after_entity_removed(FactKind::Visit, id);
            }
            FactChange::ChangeVehicleCapacity {
                vehicle_id,
                capacity,
            } => {
                let id = *vehicle_id;
                let index =
                    look_up(director.working_solution().vehicle_index(id), FactKind::Vehicle, id)?;
                director.before_problem_property_changed(FactKind::Vehicle, id);
                director.working_solution_mut().vehicles[index].set_capacity(*capacity);
                director.after_problem_property_changed(FactKind::Vehicle, id);
            }
        }

        director.trigger_variable_listeners();
        Ok(())
    }
}

impl fmt::Display for FactChange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} [id={}]", self.name(), self.target_id())
    }
}

fn look_up(index: Option<usize>, kind: FactKind, id: i64) -> Result<usize> {
    index.ok_or_else(|| {
        RouteForgeError::InternalInvariant(format!(
            "look-up of working copy failed for {kind} [id={id}]"
        ))
    })
}

fn ensure_absent(index: Option<usize>, kind: FactKind, id: i64) -> Result<()> {
    match index {
        None => Ok(()),
        Some(_) => Err(RouteForgeError::InternalInvariant(format!(
            "working copy already contains {kind} [id={id}]"
        ))),
    }
}

fn remove_checked<T>(list: &mut Vec<T>, index: usize, matches: impl Fn(&T) -> bool) -> Result<T> {
    if list.get(index).is_some_and(matches) {
        Ok(list.remove(index))
    } else {
        Err(RouteForgeError::InternalInvariant(format!(
            "working list does not contain the element at index {index}"
        )))
    }
}

#[cfg(test)]
#[path = "fact_change_tests.rs"]
mod tests;

//! Hard/soft score of a vehicle routing solution.
//!
//! Hard level: capacity overflow summed over vehicles, plus one point per
//! leg the distance matrix cannot price. Soft level: total travel time in
//! milliseconds. Both are penalties.

use routeforge_core::{HardSoftScore, VehicleRoutingSolution};
use tracing::trace;

use crate::director::{ShadowVariableSupport, SimpleScoreDirector};

/// The score director used for routing: full recalculation of
/// [`calculate_routing_score`].
pub type RoutingScoreDirector =
    SimpleScoreDirector<VehicleRoutingSolution, fn(&VehicleRoutingSolution) -> HardSoftScore>;

pub fn calculate_routing_score(solution: &VehicleRoutingSolution) -> HardSoftScore {
    let overflow: i64 = solution
        .vehicles
        .iter()
        .map(|v| (solution.vehicle_demand(v) - i64::from(v.capacity())).max(0))
        .sum();
    let cost = solution.total_cost();
    let score = HardSoftScore::of_penalties(
        overflow + i64::from(cost.unreachable_legs),
        cost.distance.millis(),
    );
    trace!(%score, overflow, unreachable = cost.unreachable_legs, "Routing score calculated");
    score
}

/// Creates a routing score director over `solution`.
pub fn routing_director(solution: VehicleRoutingSolution) -> RoutingScoreDirector {
    SimpleScoreDirector::new(
        solution,
        calculate_routing_score as fn(&VehicleRoutingSolution) -> HardSoftScore,
    )
}

impl ShadowVariableSupport for VehicleRoutingSolution {
    fn update_entity_shadows(&mut self, entity_index: usize) {
        self.update_vehicle_shadows(entity_index);
    }

    fn update_all_shadows(&mut self) {
        self.update_shadow_variables();
    }
}

//! Random selection of list moves for local search.

use rand::Rng;
use routeforge_core::VehicleRoutingSolution;

use super::ListMove;

/// Picks a random doable relocate or reverse move.
#[derive(Debug, Clone, Copy)]
pub struct RandomListMoveSelector {
    max_attempts: usize,
}

impl RandomListMoveSelector {
    pub fn new(max_attempts: usize) -> Self {
        Self {
            max_attempts: max_attempts.max(1),
        }
    }

    /// Returns a doable move, or `None` when nothing can move (or every
    /// attempt drew a no-op).
    pub fn select<R: Rng + ?Sized>(
        &self,
        solution: &VehicleRoutingSolution,
        rng: &mut R,
    ) -> Option<ListMove> {
        let routed: Vec<usize> = solution
            .vehicles
            .iter()
            .enumerate()
            .filter(|(_, v)| !v.visits().is_empty())
            .map(|(i, _)| i)
            .collect();
        if routed.is_empty() {
            return None;
        }

        for _ in 0..self.max_attempts {
            let vehicle = routed[rng.random_range(0..routed.len())];
            let len = solution.vehicles[vehicle].visits().len();

            let candidate = if len >= 2 && rng.random_bool(0.5) {
                let start = rng.random_range(0..len - 1);
                let end = rng.random_range(start + 1..len);
                ListMove::Reverse {
                    vehicle,
                    start,
                    end,
                }
            } else {
                let to_vehicle = rng.random_range(0..solution.vehicles.len());
                let to_len = solution.vehicles[to_vehicle].visits().len();
                // Within one route the list is one shorter after removal.
                let max_position = if to_vehicle == vehicle { len - 1 } else { to_len };
                ListMove::Relocate {
                    from_vehicle: vehicle,
                    from_position: rng.random_range(0..len),
                    to_vehicle,
                    to_position: rng.random_range(0..=max_position),
                }
            };

            if candidate.is_doable(solution) {
                return Some(candidate);
            }
        }
        None
    }
}

impl Default for RandomListMoveSelector {
    fn default() -> Self {
        Self::new(16)
    }
}

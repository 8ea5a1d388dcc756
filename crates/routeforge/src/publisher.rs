//! Publishers for routing plans.

use routeforge_core::{RoutePublisher, RoutingPlan, VehicleRoutingSolution};
use tokio::sync::broadcast;
use tracing::trace;

/// Fans plans out to any number of async subscribers.
///
/// Slow subscribers lag and lose the oldest plans rather than blocking the
/// publisher. Publishing with no subscribers drops the plan.
///
/// # Example
///
/// ```
/// use routeforge::publisher::BroadcastPublisher;
/// use routeforge_core::{RoutePublisher, RoutingPlan};
///
/// let publisher = BroadcastPublisher::new(16);
/// let mut plans = publisher.subscribe();
///
/// publisher.publish(RoutingPlan::empty());
/// assert!(plans.try_recv().unwrap().is_empty());
/// ```
#[derive(Debug, Clone)]
pub struct BroadcastPublisher {
    sender: broadcast::Sender<RoutingPlan>,
}

impl BroadcastPublisher {
    pub fn new(capacity: usize) -> Self {
        let (sender, _) = broadcast::channel(capacity.max(1));
        Self { sender }
    }

    pub fn subscribe(&self) -> broadcast::Receiver<RoutingPlan> {
        self.sender.subscribe()
    }

    pub fn subscriber_count(&self) -> usize {
        self.sender.receiver_count()
    }
}

impl Default for BroadcastPublisher {
    fn default() -> Self {
        Self::new(64)
    }
}

impl RoutePublisher for BroadcastPublisher {
    fn publish(&self, plan: RoutingPlan) {
        if self.sender.send(plan).is_err() {
            trace!("Plan dropped: no subscribers");
        }
    }
}

/// Adapts a publisher into a best-solution callback for a solver manager.
///
/// ```
/// use routeforge::publisher::{publish_best_solutions, BroadcastPublisher};
/// use routeforge_solver::SolverManager;
///
/// let publisher = BroadcastPublisher::default();
/// let manager = SolverManager::builder()
///     .on_best_solution(publish_best_solutions(publisher.clone()))
///     .build()
///     .unwrap();
/// # drop(manager);
/// ```
pub fn publish_best_solutions<P>(publisher: P) -> impl Fn(VehicleRoutingSolution) + Send + Sync
where
    P: RoutePublisher + 'static,
{
    move |solution: VehicleRoutingSolution| publisher.publish(RoutingPlan::from_solution(&solution))
}

#[cfg(test)]
mod tests {
    use routeforge_test::builders::sample_solution;
    use routeforge_test::{ManhattanMatrix, RecordingPublisher};

    use super::*;

    #[tokio::test]
    async fn subscribers_receive_every_plan() {
        let publisher = BroadcastPublisher::new(4);
        let mut first = publisher.subscribe();
        let mut second = publisher.subscribe();
        assert_eq!(publisher.subscriber_count(), 2);

        publisher.publish(RoutingPlan::empty());

        assert!(first.recv().await.unwrap().is_empty());
        assert!(second.recv().await.unwrap().is_empty());
    }

    #[test]
    fn publishing_without_subscribers_is_harmless() {
        BroadcastPublisher::default().publish(RoutingPlan::empty());
    }

    #[test]
    fn best_solutions_become_plans() {
        let matrix = ManhattanMatrix::new();
        let publisher = RecordingPublisher::new();
        let callback = publish_best_solutions(publisher.clone());

        let mut solution = sample_solution(&matrix);
        solution.vehicles[0].visits_mut().extend([2, 3, 4]);
        callback(solution);

        let plan = publisher.last().unwrap();
        assert_eq!(plan.routes.len(), 1);
        assert_eq!(plan.routes[0].visit_ids, vec![2, 3, 4]);
        assert_eq!(plan.distance.millis(), 6000);
    }
}

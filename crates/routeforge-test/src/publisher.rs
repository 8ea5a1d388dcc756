//! Publisher that keeps every plan it receives.

use std::sync::{Arc, Mutex, PoisonError};

use routeforge_core::{RoutePublisher, RoutingPlan};

/// Records published plans. Clones share the same record.
#[derive(Debug, Clone, Default)]
pub struct RecordingPublisher {
    plans: Arc<Mutex<Vec<RoutingPlan>>>,
}

impl RecordingPublisher {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn plans(&self) -> Vec<RoutingPlan> {
        self.plans
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    pub fn count(&self) -> usize {
        self.plans
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .len()
    }

    pub fn last(&self) -> Option<RoutingPlan> {
        self.plans
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .last()
            .cloned()
    }

    pub fn clear(&self) {
        self.plans
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clear();
    }
}

impl RoutePublisher for RecordingPublisher {
    fn publish(&self, plan: RoutingPlan) {
        self.plans
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push(plan);
    }
}

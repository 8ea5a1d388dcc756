//! Best-solution and error notifications for a solving run.
//!
//! The solving loop announces every new best solution through
//! [`SolverEvents`]. Announcements only reach the callback while the gate is
//! open: the manager closes it at the start of `stop`, so a solution found by
//! a loop that is already being stopped is discarded instead of delivered
//! after the caller believes solving has ended.
//!
//! The gate lock is held while the callback runs. A callback must therefore
//! not call back into the manager's `stop`.

use std::fmt;
use std::sync::{Arc, Mutex, PoisonError};

use routeforge_core::{RouteForgeError, VehicleRoutingSolution};
use tracing::warn;

/// Callback receiving each new best solution.
pub type BestSolutionCallback = Arc<dyn Fn(VehicleRoutingSolution) + Send + Sync>;

/// Callback receiving the error that ended a solving loop.
pub type ErrorCallback = Arc<dyn Fn(&RouteForgeError) + Send + Sync>;

/// Shared between the manager and its solving thread.
pub struct SolverEvents {
    gate: Mutex<bool>,
    on_best_solution: Option<BestSolutionCallback>,
    on_error: Option<ErrorCallback>,
    failure: Mutex<Option<RouteForgeError>>,
}

impl SolverEvents {
    pub fn new(
        on_best_solution: Option<BestSolutionCallback>,
        on_error: Option<ErrorCallback>,
    ) -> Self {
        Self {
            gate: Mutex::new(false),
            on_best_solution,
            on_error,
            failure: Mutex::new(None),
        }
    }

    /// Opens the gate and forgets any failure of a previous run.
    pub fn open(&self) {
        *self.gate.lock().unwrap_or_else(PoisonError::into_inner) = true;
        *self.failure.lock().unwrap_or_else(PoisonError::into_inner) = None;
    }

    /// Closes the gate. Waits for an announcement in progress to finish.
    pub fn close(&self) {
        *self.gate.lock().unwrap_or_else(PoisonError::into_inner) = false;
    }

    pub fn is_open(&self) -> bool {
        *self.gate.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Delivers a best solution if the gate is open.
    ///
    /// Returns true if the solution reached the callback.
    pub fn announce_best(&self, solution: VehicleRoutingSolution) -> bool {
        let gate = self.gate.lock().unwrap_or_else(PoisonError::into_inner);
        if !*gate {
            warn!(
                score = ?solution.score,
                "Best solution discarded: solver is stopping"
            );
            return false;
        }
        match &self.on_best_solution {
            Some(callback) => {
                callback(solution);
                true
            }
            None => false,
        }
    }

    /// Records the error that ended the loop, then reports it. The failure is
    /// already visible through [`failure`](Self::failure) when the callback
    /// runs.
    pub fn fail(&self, error: RouteForgeError) {
        *self.failure.lock().unwrap_or_else(PoisonError::into_inner) = Some(error.clone());
        if let Some(callback) = &self.on_error {
            callback(&error);
        }
    }

    pub fn failure(&self) -> Option<RouteForgeError> {
        self.failure
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    pub fn take_failure(&self) -> Option<RouteForgeError> {
        self.failure
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .take()
    }
}

impl Default for SolverEvents {
    fn default() -> Self {
        Self::new(None, None)
    }
}

impl fmt::Debug for SolverEvents {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SolverEvents")
            .field("open", &self.is_open())
            .field("has_best_solution_callback", &self.on_best_solution.is_some())
            .field("has_error_callback", &self.on_error.is_some())
            .field("failure", &self.failure())
            .finish()
    }
}

#[cfg(test)]
#[path = "event_tests.rs"]
mod tests;

//! SolverManager implementation.

use std::fmt;
use std::sync::Arc;
use std::thread::{self, JoinHandle};

use routeforge_config::SolverConfig;
use routeforge_core::{Result, RouteForgeError, VehicleRoutingSolution};
use routeforge_scoring::routing_director;
use tracing::{debug, info, warn};

use super::{RoutingSolver, SolverStatus};
use crate::event::SolverEvents;
use crate::realtime::{FactChange, FactChangeResult, SolverHandle};
use crate::scope::SolverScope;
use crate::solving_loop::SolvingLoop;

/// Runs one [`SolvingLoop`] at a time on a dedicated thread.
pub struct SolverManager {
    config: SolverConfig,
    events: Arc<SolverEvents>,
    handle: Option<SolverHandle>,
    worker: Option<JoinHandle<VehicleRoutingSolution>>,
}

impl SolverManager {
    pub fn builder() -> super::SolverManagerBuilder {
        super::SolverManagerBuilder::new()
    }

    pub(crate) fn new(config: SolverConfig, events: Arc<SolverEvents>) -> Self {
        Self {
            config,
            events,
            handle: None,
            worker: None,
        }
    }

    pub fn config(&self) -> &SolverConfig {
        &self.config
    }

    /// Returns the error that ended the current run, if any.
    pub fn failure(&self) -> Option<RouteForgeError> {
        self.events.failure()
    }
}

impl RoutingSolver for SolverManager {
    fn start(&mut self, snapshot: VehicleRoutingSolution) -> Result<()> {
        if self.worker.is_some() {
            return Err(RouteForgeError::InvalidState(
                "solver is already running".to_string(),
            ));
        }

        info!(
            depots = snapshot.depots.len(),
            vehicles = snapshot.vehicles.len(),
            visits = snapshot.visits.len(),
            "Starting solver"
        );
        self.events.open();
        let (handle, receiver) = SolverHandle::new();
        handle.set_solving(true);

        let director = routing_director(snapshot);
        let scope = match self.config.random_seed {
            Some(seed) => SolverScope::with_seed(director, seed),
            None => SolverScope::new(director),
        };
        let solving_loop =
            SolvingLoop::new(scope, receiver, Arc::clone(&self.events), self.config.clone());

        let worker = thread::Builder::new()
            .name("routeforge-solver".to_string())
            .spawn(move || solving_loop.run())
            .map_err(|err| {
                self.events.close();
                RouteForgeError::InvalidState(format!("cannot spawn solver thread: {err}"))
            })?;

        self.handle = Some(handle);
        self.worker = Some(worker);
        Ok(())
    }

    fn stop(&mut self) -> Result<()> {
        let Some(worker) = self.worker.take() else {
            return Ok(());
        };

        // Close first: nothing found from here on reaches the callback.
        self.events.close();
        if let Some(handle) = self.handle.take() {
            handle.terminate_early();
            handle.set_solving(false);
        }

        let best = worker.join().map_err(|_| {
            RouteForgeError::InternalInvariant("solver thread panicked".to_string())
        })?;
        info!(score = ?best.score, "Solver stopped");

        match self.events.take_failure() {
            Some(err) => Err(err),
            None => Ok(()),
        }
    }

    fn add_fact_change(&mut self, change: FactChange) -> Result<()> {
        let Some(handle) = &self.handle else {
            return Err(RouteForgeError::InvalidState(
                "solver is not running".to_string(),
            ));
        };
        if let Some(err) = self.events.failure() {
            return Err(err);
        }

        debug!(change = %change, "Submitting fact change");
        match handle.submit(change) {
            FactChangeResult::Queued => Ok(()),
            FactChangeResult::SolverNotRunning => Err(RouteForgeError::InvalidState(
                "solver is not running".to_string(),
            )),
            FactChangeResult::Disconnected => Err(self.events.failure().unwrap_or_else(|| {
                RouteForgeError::InternalInvariant("solving loop ended unexpectedly".to_string())
            })),
        }
    }

    fn status(&self) -> SolverStatus {
        if self.worker.is_some() {
            SolverStatus::Running
        } else {
            SolverStatus::Idle
        }
    }
}

impl Drop for SolverManager {
    fn drop(&mut self) {
        if let Err(err) = self.stop() {
            warn!(error = %err, "Solver ended with an error");
        }
    }
}

impl fmt::Debug for SolverManager {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SolverManager")
            .field("config", &self.config)
            .field("status", &self.status())
            .field("events", &self.events)
            .finish()
    }
}

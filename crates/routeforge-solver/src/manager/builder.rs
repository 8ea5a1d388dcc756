//! Builder for [`SolverManager`].

use std::sync::Arc;

use routeforge_config::{ConfigError, SolverConfig};
use routeforge_core::{RouteForgeError, VehicleRoutingSolution};

use super::SolverManager;
use crate::event::{BestSolutionCallback, ErrorCallback, SolverEvents};

/// Collects the configuration and callbacks of a [`SolverManager`].
#[derive(Default)]
pub struct SolverManagerBuilder {
    config: SolverConfig,
    on_best_solution: Option<BestSolutionCallback>,
    on_error: Option<ErrorCallback>,
}

impl SolverManagerBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_config(mut self, config: SolverConfig) -> Self {
        self.config = config;
        self
    }

    /// Receives every new best solution, in discovery order, on the solver
    /// thread.
    pub fn on_best_solution<F>(mut self, callback: F) -> Self
    where
        F: Fn(VehicleRoutingSolution) + Send + Sync + 'static,
    {
        self.on_best_solution = Some(Arc::new(callback));
        self
    }

    /// Receives the fatal error that ended a solving loop.
    pub fn on_error<F>(mut self, callback: F) -> Self
    where
        F: Fn(&RouteForgeError) + Send + Sync + 'static,
    {
        self.on_error = Some(Arc::new(callback));
        self
    }

    /// Builds the manager.
    ///
    /// # Errors
    ///
    /// [`ConfigError::Invalid`] if the configuration fails validation.
    pub fn build(self) -> Result<SolverManager, ConfigError> {
        self.config.validate()?;
        let events = SolverEvents::new(self.on_best_solution, self.on_error);
        Ok(SolverManager::new(self.config, Arc::new(events)))
    }
}

impl std::fmt::Debug for SolverManagerBuilder {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SolverManagerBuilder")
            .field("config", &self.config)
            .field("has_best_solution_callback", &self.on_best_solution.is_some())
            .field("has_error_callback", &self.on_error.is_some())
            .finish()
    }
}

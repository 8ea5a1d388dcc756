//! Configuration system for RouteForge.
//!
//! Load solver configuration from TOML or YAML to tune the background
//! solving loop without code changes.
//!
//! # Examples
//!
//! ```
//! use routeforge_config::SolverConfig;
//! use std::time::Duration;
//!
//! let config = SolverConfig::from_toml_str(r#"
//!     random_seed = 7
//!     late_acceptance_size = 50
//!     idle_wait_millis = 250
//! "#).unwrap();
//!
//! assert_eq!(config.random_seed, Some(7));
//! assert_eq!(config.idle_wait(), Duration::from_millis(250));
//! // Unlisted fields keep their defaults
//! assert_eq!(config.unimproved_step_count_limit, Some(10_000));
//! ```
//!
//! Use default config when file is missing:
//!
//! ```
//! use routeforge_config::SolverConfig;
//!
//! let config = SolverConfig::load("routeforge.toml").unwrap_or_default();
//! ```

use std::path::Path;
use std::time::Duration;

use routeforge_core::domain::DEFAULT_VISIT_DEMAND;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Configuration error
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("TOML parse error: {0}")]
    Toml(#[from] toml::de::Error),

    #[error("YAML parse error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    #[error("Invalid configuration: {0}")]
    Invalid(String),
}

/// Main solver configuration.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "snake_case", default)]
pub struct SolverConfig {
    /// Environment mode affecting reproducibility and assertions.
    pub environment_mode: EnvironmentMode,

    /// Random seed for reproducible results.
    pub random_seed: Option<u64>,

    /// Length of the late acceptance history.
    pub late_acceptance_size: usize,

    /// Local search steps without a new best solution before the loop
    /// parks and waits for fact changes. `None` never parks.
    pub unimproved_step_count_limit: Option<u64>,

    /// How long a parked loop waits for a fact change before resuming.
    pub idle_wait_millis: u64,

    /// Demand assigned to newly added visits.
    pub visit_demand: i32,
}

impl Default for SolverConfig {
    fn default() -> Self {
        Self {
            environment_mode: EnvironmentMode::default(),
            random_seed: None,
            late_acceptance_size: 400,
            unimproved_step_count_limit: Some(10_000),
            idle_wait_millis: 100,
            visit_demand: DEFAULT_VISIT_DEMAND,
        }
    }
}

impl SolverConfig {
    /// Creates a new default configuration.
    pub fn new() -> Self {
        Self::default()
    }

    /// Loads configuration from a TOML file.
    ///
    /// # Errors
    ///
    /// Returns error if file doesn't exist, contains invalid TOML, or fails
    /// [`validate`](Self::validate).
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let config = Self::from_toml_file(path)?;
        config.validate()?;
        Ok(config)
    }

    /// Loads configuration from a TOML file.
    pub fn from_toml_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path)?;
        Self::from_toml_str(&contents)
    }

    /// Parses configuration from a TOML string.
    pub fn from_toml_str(s: &str) -> Result<Self, ConfigError> {
        Ok(toml::from_str(s)?)
    }

    /// Loads configuration from a YAML file.
    pub fn from_yaml_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path)?;
        Self::from_yaml_str(&contents)
    }

    /// Parses configuration from a YAML string.
    pub fn from_yaml_str(s: &str) -> Result<Self, ConfigError> {
        Ok(serde_yaml::from_str(s)?)
    }

    pub fn with_environment_mode(mut self, mode: EnvironmentMode) -> Self {
        self.environment_mode = mode;
        self
    }

    /// Sets the random seed.
    pub fn with_random_seed(mut self, seed: u64) -> Self {
        self.random_seed = Some(seed);
        self
    }

    pub fn with_late_acceptance_size(mut self, size: usize) -> Self {
        self.late_acceptance_size = size;
        self
    }

    pub fn with_unimproved_step_count_limit(mut self, limit: Option<u64>) -> Self {
        self.unimproved_step_count_limit = limit;
        self
    }

    pub fn with_idle_wait_millis(mut self, millis: u64) -> Self {
        self.idle_wait_millis = millis;
        self
    }

    pub fn with_visit_demand(mut self, demand: i32) -> Self {
        self.visit_demand = demand;
        self
    }

    pub fn idle_wait(&self) -> Duration {
        Duration::from_millis(self.idle_wait_millis)
    }

    /// Rejects values the solving loop cannot run with.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.late_acceptance_size == 0 {
            return Err(ConfigError::Invalid(
                "late_acceptance_size must be positive".to_string(),
            ));
        }
        if self.idle_wait_millis == 0 {
            return Err(ConfigError::Invalid(
                "idle_wait_millis must be positive".to_string(),
            ));
        }
        if self.visit_demand < 0 {
            return Err(ConfigError::Invalid(format!(
                "visit_demand must not be negative, got {}",
                self.visit_demand
            )));
        }
        Ok(())
    }

    /// Returns true when every fact change should be followed by a full
    /// consistency check of the working solution.
    pub fn asserts_consistency(&self) -> bool {
        self.environment_mode == EnvironmentMode::FullAssert
    }
}

/// Environment mode affecting solver behavior.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum EnvironmentMode {
    /// Non-reproducible mode with minimal overhead.
    #[default]
    NonReproducible,

    /// Reproducible mode with deterministic behavior.
    Reproducible,

    /// Full assert mode: the working solution is verified after every fact change.
    FullAssert,
}

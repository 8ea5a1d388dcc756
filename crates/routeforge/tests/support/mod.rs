//! Shared fixtures for the optimizer integration tests.

#![allow(dead_code)]

use routeforge::{RouteOptimizer, RoutingSolver, SolverStatus};
use routeforge_core::{Location, Result, RouteForgeError, VehicleRoutingSolution};
use routeforge_solver::FactChange;
use routeforge_test::builders::{depot_location, visit_location};
use routeforge_test::{InMemoryLocationRepository, ManhattanMatrix, RecordingPublisher};

/// A call the optimizer made on its solver.
#[derive(Debug, Clone)]
pub enum SolverCall {
    Start(VehicleRoutingSolution),
    Stop,
    Change(FactChange),
}

/// Solver double that records calls and follows the start/stop contract.
#[derive(Debug, Default)]
pub struct RecordingSolver {
    calls: Vec<SolverCall>,
    running: bool,
}

impl RecordingSolver {
    pub fn calls(&self) -> &[SolverCall] {
        &self.calls
    }

    pub fn start_count(&self) -> usize {
        self.calls
            .iter()
            .filter(|c| matches!(c, SolverCall::Start(_)))
            .count()
    }

    pub fn stop_count(&self) -> usize {
        self.calls
            .iter()
            .filter(|c| matches!(c, SolverCall::Stop))
            .count()
    }

    pub fn changes(&self) -> Vec<&FactChange> {
        self.calls
            .iter()
            .filter_map(|c| match c {
                SolverCall::Change(change) => Some(change),
                _ => None,
            })
            .collect()
    }

    pub fn last_snapshot(&self) -> Option<&VehicleRoutingSolution> {
        self.calls.iter().rev().find_map(|c| match c {
            SolverCall::Start(snapshot) => Some(snapshot),
            _ => None,
        })
    }
}

impl RoutingSolver for RecordingSolver {
    fn start(&mut self, snapshot: VehicleRoutingSolution) -> Result<()> {
        if self.running {
            return Err(RouteForgeError::InvalidState("already running".into()));
        }
        self.running = true;
        self.calls.push(SolverCall::Start(snapshot));
        Ok(())
    }

    fn stop(&mut self) -> Result<()> {
        if self.running {
            self.running = false;
            self.calls.push(SolverCall::Stop);
        }
        Ok(())
    }

    fn add_fact_change(&mut self, change: FactChange) -> Result<()> {
        if !self.running {
            return Err(RouteForgeError::InvalidState("not running".into()));
        }
        self.calls.push(SolverCall::Change(change));
        Ok(())
    }

    fn status(&self) -> SolverStatus {
        if self.running {
            SolverStatus::Running
        } else {
            SolverStatus::Idle
        }
    }
}

pub type TestOptimizer =
    RouteOptimizer<RecordingSolver, RecordingPublisher, InMemoryLocationRepository, ManhattanMatrix>;

/// An optimizer over a recording solver, with handles to its collaborators.
pub struct Fixture {
    pub optimizer: TestOptimizer,
    pub publisher: RecordingPublisher,
    pub repository: InMemoryLocationRepository,
    pub matrix: ManhattanMatrix,
}

impl Fixture {
    pub fn new() -> Self {
        routeforge_test::init_test_logging();
        let publisher = RecordingPublisher::new();
        let repository = InMemoryLocationRepository::new();
        let matrix = ManhattanMatrix::new();
        let optimizer = RouteOptimizer::new(
            RecordingSolver::default(),
            publisher.clone(),
            repository.clone(),
            matrix.clone(),
        );
        Self {
            optimizer,
            publisher,
            repository,
            matrix,
        }
    }

    pub fn solver(&self) -> &RecordingSolver {
        self.optimizer.solver()
    }

    /// Stores the depot in the repository and adds it to the optimizer.
    pub fn add_depot(&mut self, id: i64, latitude: f64, longitude: f64) -> Location {
        let location = depot_location(id, latitude, longitude);
        self.repository.insert(location.clone());
        let row = self.matrix.row_for(&location);
        self.optimizer.add_location(&location, row).unwrap();
        location
    }

    pub fn add_visit(&mut self, id: i64, latitude: f64, longitude: f64) -> Location {
        let location = visit_location(id, latitude, longitude);
        self.repository.insert(location.clone());
        let row = self.matrix.row_for(&location);
        self.optimizer.add_location(&location, row).unwrap();
        location
    }
}

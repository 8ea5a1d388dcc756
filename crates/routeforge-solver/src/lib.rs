//! RouteForge Solver Engine
//!
//! This crate provides the background solver behind the route optimizer:
//! - Fact changes and the channel that carries them to a running solver
//! - Phases (cheapest insertion construction, late acceptance local search)
//! - List moves over vehicle routes
//! - The solving loop and the `SolverManager` that runs it on a thread
//! - Best-solution and error notifications

pub mod event;
pub mod heuristic;
pub mod manager;
pub mod phase;
pub mod realtime;
pub mod scope;
pub mod solving_loop;

pub use event::{BestSolutionCallback, ErrorCallback, SolverEvents};
pub use heuristic::{ListMove, RandomListMoveSelector};
pub use manager::{RoutingSolver, SolverManager, SolverManagerBuilder, SolverStatus};
pub use phase::{Acceptor, CheapestInsertionPhase, LateAcceptanceAcceptor, LocalSearchPhase, Phase};
pub use realtime::{FactChange, FactChangeReceiver, FactChangeResult, SolverHandle, WaitOutcome};
pub use scope::SolverScope;
pub use solving_loop::SolvingLoop;

//! Real-time planning support.
//!
//! Fact changes are submitted while the solver is running and applied by
//! the solving loop between steps, strictly in submission order. The
//! working solution is never touched from outside the loop.
//!
//! # Example
//!
//! ```
//! use routeforge_solver::realtime::{FactChange, FactChangeResult, SolverHandle};
//!
//! let (handle, receiver) = SolverHandle::new();
//! handle.set_solving(true);
//!
//! let result = handle.submit(FactChange::RemoveVisit { visit_id: 7 });
//! assert_eq!(result, FactChangeResult::Queued);
//! assert_eq!(receiver.drain_pending().len(), 1);
//! ```

mod fact_change;
mod solver_handle;

pub use fact_change::FactChange;
pub use solver_handle::{FactChangeReceiver, FactChangeResult, SolverHandle, WaitOutcome};

//! Core domain traits

use std::fmt;
use std::hash::Hash;

use crate::score::Score;

/// Marker trait for planning solutions.
///
/// A planning solution represents both the problem definition and the
/// (potentially partial) solution. It contains:
/// - Problem facts: depots and vehicle attributes
/// - Planning entities: visits and the vehicles' route lists
/// - Score: The quality of the current solution
///
/// Planning solutions must be `Send + Sync` so a snapshot can be handed
/// to the background solving loop.
pub trait PlanningSolution: Clone + Send + Sync + 'static {
    /// The score type used to evaluate this solution.
    type Score: Score;

    /// Returns the current score of this solution, if calculated.
    fn score(&self) -> Option<Self::Score>;

    /// Sets the score of this solution.
    fn set_score(&mut self, score: Option<Self::Score>);

    /// Returns true if every planning entity has been assigned.
    fn is_initialized(&self) -> bool {
        true
    }
}

/// Trait for unique identification of entities and facts.
///
/// Used for looking up working copies during solving. The working copy
/// never shares references with the canonical collections, so ids are
/// the only way to find "the same" fact on the other side.
///
/// # Example
///
/// ```
/// use routeforge_core::PlanningId;
///
/// struct Stop {
///     id: i64,
/// }
///
/// impl PlanningId for Stop {
///     type Id = i64;
///     fn planning_id(&self) -> i64 { self.id }
/// }
/// ```
pub trait PlanningId {
    /// The type of the unique identifier.
    type Id: Eq + Hash + Copy + fmt::Debug + Send + Sync + 'static;

    /// Returns the unique identifier for this object.
    ///
    /// This must never return a value that changes during solving.
    fn planning_id(&self) -> Self::Id;
}

/// Category of a fact held by the canonical collections and the working copy.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FactKind {
    Depot,
    Visit,
    Vehicle,
}

impl FactKind {
    pub fn as_str(self) -> &'static str {
        match self {
            FactKind::Depot => "Depot",
            FactKind::Visit => "Visit",
            FactKind::Vehicle => "Vehicle",
        }
    }
}

impl fmt::Display for FactKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

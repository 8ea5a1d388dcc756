//! Error types for RouteForge

use thiserror::Error;

use crate::domain::FactKind;

/// Main error type for RouteForge operations
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RouteForgeError {
    /// A caller referenced an id that is absent from the relevant collection.
    #[error("{kind} [id={id}] not found")]
    NotFound { kind: FactKind, id: i64 },

    /// Structurally valid but disallowed operation.
    #[error("Conflict: {0}")]
    Conflict(String),

    /// The solver's working copy no longer agrees with the canonical collections.
    ///
    /// Always fatal: the solving loop that raised it has stopped.
    #[error("Internal invariant violated: {0}")]
    InternalInvariant(String),

    /// Invalid operation for current solver state
    #[error("Invalid state: {0}")]
    InvalidState(String),

    /// The distance matrix could not provide a row or a cell.
    #[error("Distance from location [{from}] to location [{to}] is unavailable")]
    DistanceUnavailable { from: i64, to: i64 },
}

impl RouteForgeError {
    pub fn not_found(kind: FactKind, id: i64) -> Self {
        RouteForgeError::NotFound { kind, id }
    }

    /// Returns true for errors that leave the solver unusable.
    pub fn is_fatal(&self) -> bool {
        matches!(self, RouteForgeError::InternalInvariant(_))
    }
}

/// Result type alias for RouteForge operations
pub type Result<T> = std::result::Result<T, RouteForgeError>;

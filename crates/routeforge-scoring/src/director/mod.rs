//! Score director implementations.
//!
//! The score director manages solution state and score calculation.
//!
//! # Score Director Types
//!
//! - [`SimpleScoreDirector`] - Full recalculation (baseline)
//! - [`RecordingScoreDirector`] - Undo tracking and event log wrapper

mod shadow;
mod simple;
mod traits;

pub mod recording;

#[cfg(test)]
mod tests;

pub use recording::{DirectorEvent, RecordingScoreDirector};
pub use shadow::ShadowVariableSupport;
pub use simple::SimpleScoreDirector;
pub use traits::ScoreDirector;

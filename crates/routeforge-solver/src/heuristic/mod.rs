//! Moves over the vehicles' route lists and the selector that picks them.
//!
//! Undo is handled by `RecordingScoreDirector`, not by moves returning undo data.

mod list_move;
mod selector;

pub use list_move::ListMove;
pub use selector::RandomListMoveSelector;

//! Local search: late acceptance over random list moves.

mod acceptor;
mod phase;

pub use acceptor::{Acceptor, LateAcceptanceAcceptor};
pub use phase::LocalSearchPhase;

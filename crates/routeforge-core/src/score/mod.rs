//! Score types for comparing routing plans.
//!
//! Hard levels count capacity overflow and unreachable legs, soft levels
//! count travelled distance.

mod hard_soft;
mod traits;


pub use hard_soft::HardSoftScore;
pub use traits::Score;

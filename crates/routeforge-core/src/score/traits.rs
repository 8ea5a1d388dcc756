//! The Score trait.

use std::fmt::{Debug, Display};

/// Quality of a planning solution. Higher is better.
///
/// Scores are small immutable values: phases copy them freely and compare
/// them with the total order.
pub trait Score: Copy + Debug + Display + Default + Send + Sync + Ord + 'static {
    /// Returns true if no hard constraint is broken.
    fn is_feasible(&self) -> bool;

    /// Returns true if this score is strictly better than `other`.
    fn is_better_than(&self, other: &Self) -> bool {
        self > other
    }
}

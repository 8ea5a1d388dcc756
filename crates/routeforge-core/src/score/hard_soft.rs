//! HardSoftScore - hard constraint penalties ahead of travel distance.

use std::cmp::Ordering;
use std::fmt;

use super::traits::Score;

/// A score with separate hard and soft levels, compared hard level first.
///
/// For vehicle routing the hard level penalizes capacity overflow and legs
/// the distance matrix cannot price; the soft level is the negated travel
/// distance.
///
/// # Examples
///
/// ```
/// use routeforge_core::HardSoftScore;
///
/// let overloaded = HardSoftScore::of(-1, -100);
/// let long_route = HardSoftScore::of(0, -200);
///
/// // Feasible plans are always better than infeasible ones
/// assert!(long_route > overloaded);
///
/// let short_route = HardSoftScore::of_penalties(0, 50);
/// assert!(short_route > long_route);
/// ```
#[derive(Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct HardSoftScore {
    hard: i64,
    soft: i64,
}

impl HardSoftScore {
    pub const ZERO: HardSoftScore = HardSoftScore { hard: 0, soft: 0 };

    #[inline]
    pub const fn of(hard: i64, soft: i64) -> Self {
        HardSoftScore { hard, soft }
    }

    #[inline]
    pub const fn of_hard(hard: i64) -> Self {
        HardSoftScore { hard, soft: 0 }
    }

    #[inline]
    pub const fn of_soft(soft: i64) -> Self {
        HardSoftScore { hard: 0, soft }
    }

    /// Builds a score from non-negative penalty totals, negating both.
    pub fn of_penalties(hard_penalty: i64, soft_penalty: i64) -> Self {
        HardSoftScore {
            hard: hard_penalty.saturating_neg(),
            soft: soft_penalty.saturating_neg(),
        }
    }

    #[inline]
    pub const fn hard(&self) -> i64 {
        self.hard
    }

    #[inline]
    pub const fn soft(&self) -> i64 {
        self.soft
    }
}

impl Score for HardSoftScore {
    fn is_feasible(&self) -> bool {
        self.hard >= 0
    }
}

impl Ord for HardSoftScore {
    fn cmp(&self, other: &Self) -> Ordering {
        self.hard
            .cmp(&other.hard)
            .then_with(|| self.soft.cmp(&other.soft))
    }
}

impl PartialOrd for HardSoftScore {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl fmt::Debug for HardSoftScore {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "HardSoftScore({}, {})", self.hard, self.soft)
    }
}

impl fmt::Display for HardSoftScore {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}hard/{}soft", self.hard, self.soft)
    }
}

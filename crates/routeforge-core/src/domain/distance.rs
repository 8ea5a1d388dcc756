//! Travel distances between locations.

use std::collections::HashMap;
use std::fmt;
use std::iter::Sum;
use std::ops::{Add, AddAssign};
use std::sync::Arc;

use super::planning::PlanningLocation;
use super::LocationId;

/// Travel time between two locations in milliseconds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Distance(i64);

impl Distance {
    pub const ZERO: Distance = Distance(0);

    /// Creates a distance from a millisecond count.
    ///
    /// Negative inputs are clamped to zero.
    pub const fn of_millis(millis: i64) -> Self {
        if millis < 0 {
            Distance(0)
        } else {
            Distance(millis)
        }
    }

    pub const fn millis(self) -> i64 {
        self.0
    }
}

impl Add for Distance {
    type Output = Distance;

    fn add(self, rhs: Distance) -> Distance {
        Distance(self.0.saturating_add(rhs.0))
    }
}

impl AddAssign for Distance {
    fn add_assign(&mut self, rhs: Distance) {
        *self = *self + rhs;
    }
}

impl Sum for Distance {
    fn sum<I: Iterator<Item = Distance>>(iter: I) -> Distance {
        iter.fold(Distance::ZERO, Add::add)
    }
}

impl fmt::Display for Distance {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}ms", self.0)
    }
}

/// One origin's row of the distance matrix.
///
/// Rows are live: once the matrix learns about a new location, rows handed
/// out earlier must answer for it too.
pub trait DistanceMatrixRow: Send + Sync + fmt::Debug {
    /// Distance from this row's origin to `to`, or `None` if unknown.
    fn distance_to(&self, to: LocationId) -> Option<Distance>;
}

impl DistanceMatrixRow for HashMap<LocationId, Distance> {
    fn distance_to(&self, to: LocationId) -> Option<Distance> {
        self.get(&to).copied()
    }
}

/// Distance lookup attached to a planning location.
#[derive(Clone)]
pub struct DistanceMap {
    origin: LocationId,
    row: Arc<dyn DistanceMatrixRow>,
}

impl DistanceMap {
    pub fn new(origin: LocationId, row: Arc<dyn DistanceMatrixRow>) -> Self {
        Self { origin, row }
    }

    pub fn origin(&self) -> LocationId {
        self.origin
    }

    /// Distance to another planning location. Distance to self is zero.
    pub fn distance_to(&self, location: &PlanningLocation) -> Option<Distance> {
        self.distance_to_id(location.id())
    }

    pub fn distance_to_id(&self, to: LocationId) -> Option<Distance> {
        if to == self.origin {
            return Some(Distance::ZERO);
        }
        self.row.distance_to(to)
    }
}

impl fmt::Debug for DistanceMap {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DistanceMap")
            .field("origin", &self.origin)
            .finish_non_exhaustive()
    }
}

//! The result of a routing query.

use gn_core::GridPos;

/// Ordered waypoints from (but excluding) the start cell to (and including)
/// the end cell.
///
/// Direct searches produce 4-connected cell sequences; smoothed routes may
/// skip cells between waypoints that have line of sight.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Route {
    pub waypoints: Vec<GridPos>,
}

impl Route {
    pub fn new(waypoints: Vec<GridPos>) -> Self {
        Self { waypoints }
    }

    /// `true` if start and end were the same cell.
    #[inline]
    pub fn is_trivial(&self) -> bool {
        self.waypoints.is_empty()
    }

    /// Number of waypoints (equals step count for unsmoothed routes).
    #[inline]
    pub fn len(&self) -> usize {
        self.waypoints.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.waypoints.is_empty()
    }

    #[inline]
    pub fn first(&self) -> Option<GridPos> {
        self.waypoints.first().copied()
    }

    #[inline]
    pub fn last(&self) -> Option<GridPos> {
        self.waypoints.last().copied()
    }

    /// `true` if every consecutive pair, starting from `start`, is one
    /// cardinal step apart.
    pub fn is_contiguous_from(&self, start: GridPos) -> bool {
        let mut prev = start;
        for &p in &self.waypoints {
            if !prev.is_adjacent(p) {
                return false;
            }
            prev = p;
        }
        true
    }

    pub fn into_waypoints(self) -> Vec<GridPos> {
        self.waypoints
    }
}

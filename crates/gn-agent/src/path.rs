//! A planned route an agent is currently walking.

use gn_core::GridPos;

/// Waypoints plus the index of the one being walked toward.
///
/// The stretch between two consecutive waypoints is a *leg*.  A leg starts
/// at its anchor: the cell the path was attached from for the first leg,
/// the previous waypoint after that.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ActivePath {
    pub waypoints: Vec<GridPos>,
    cursor:        usize,
    anchor:        GridPos,
}

impl ActivePath {
    /// A path walked from `origin` through `waypoints`.
    pub fn new(origin: GridPos, waypoints: Vec<GridPos>) -> Self {
        Self { waypoints, cursor: 0, anchor: origin }
    }

    /// Waypoint currently being walked toward, `None` once complete.
    #[inline]
    pub fn next_waypoint(&self) -> Option<GridPos> {
        self.waypoints.get(self.cursor).copied()
    }

    /// Start of the current leg.
    #[inline]
    pub fn anchor(&self) -> GridPos {
        self.anchor
    }

    /// Move the cursor past the current waypoint, which becomes the anchor.
    #[inline]
    pub fn advance(&mut self) {
        if let Some(&reached) = self.waypoints.get(self.cursor) {
            self.anchor = reached;
            self.cursor += 1;
        }
    }

    #[inline]
    pub fn is_complete(&self) -> bool {
        self.cursor >= self.waypoints.len()
    }

    #[inline]
    pub fn cursor(&self) -> usize {
        self.cursor
    }

    /// Waypoints not yet reached, including the current one.
    pub fn remaining(&self) -> &[GridPos] {
        &self.waypoints[self.cursor.min(self.waypoints.len())..]
    }

    /// Final waypoint.
    #[inline]
    pub fn goal(&self) -> Option<GridPos> {
        self.waypoints.last().copied()
    }

    /// The cell to enter next when standing on `here`.
    ///
    /// Follows the rasterized line of the current leg, which is the line a
    /// line-of-sight check would have verified.  Off that line (the agent
    /// was moved by something else) it falls back to one per-axis sign step.
    pub fn next_cell(&self, here: GridPos) -> Option<GridPos> {
        let target = self.next_waypoint()?;
        let mut leg = self.anchor.line_to(target);
        if leg.any(|c| c == here) {
            if let Some(next) = leg.next() {
                return Some(next);
            }
        }
        Some(here.step_toward(target))
    }
}

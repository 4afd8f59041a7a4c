//! Line-of-sight string-pulling.

use gn_core::GridPos;
use gn_grid::GridMap;

/// `true` if every cell on the Bresenham line from `from` to `to`,
/// endpoints included, is walkable.
pub fn line_of_sight(grid: &GridMap, from: GridPos, to: GridPos) -> bool {
    from.line_to(to).all(|c| grid.is_walkable(c))
}

/// Removes waypoints that a straight line can skip.
///
/// From each anchor the furthest later waypoint with line of sight becomes
/// the next anchor.  Output keeps the first and last waypoints, is never
/// longer than the input, and is a fixed point of `smooth`.
#[derive(Debug, Default, Clone, Copy)]
pub struct PathSmoother;

impl PathSmoother {
    pub fn smooth(&self, grid: &GridMap, waypoints: &[GridPos]) -> Vec<GridPos> {
        if waypoints.len() <= 2 {
            return waypoints.to_vec();
        }

        let last = waypoints.len() - 1;
        let mut out = Vec::with_capacity(waypoints.len());
        out.push(waypoints[0]);

        let mut anchor = 0;
        while anchor < last {
            let from = waypoints[anchor];
            // Adjacent cells of a search result always see each other; the
            // fallback only matters for hand-built input.
            let next = (anchor + 1..=last)
                .rev()
                .find(|&j| line_of_sight(grid, from, waypoints[j]))
                .unwrap_or(anchor + 1);
            out.push(waypoints[next]);
            anchor = next;
        }
        out
    }
}

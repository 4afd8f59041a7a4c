//! Routing trait and default A* implementation.
//!
//! # Pluggability
//!
//! The planner and scheduler call routing via the [`Router`] trait, so the
//! plain search, the memoizing [`PathCache`](crate::PathCache), and any
//! application-specific engine are interchangeable.  `route` takes
//! `&mut self` because memoizing implementations mutate on lookup.
//!
//! # Cost model
//!
//! Every 4-directional step costs 1.  The per-cell `movement_cost` stored on
//! the grid is not consulted; the Manhattan heuristic is therefore admissible
//! and consistent, and the first time the goal is popped its cost is optimal.

use std::cmp::Reverse;
use std::collections::BinaryHeap;

use gn_core::GridPos;
use gn_grid::GridMap;

use crate::{PathError, PathResult, Route};

// ── Router trait ──────────────────────────────────────────────────────────────

/// Pluggable routing engine.
pub trait Router: Send {
    /// Compute a route from `from` to `to`.
    ///
    /// `from == to` yields an empty route, not an error.
    ///
    /// # Errors
    ///
    /// - [`PathError::OutOfBounds`] / [`PathError::Unwalkable`] if either
    ///   endpoint cannot be stood on.  No search is performed.
    /// - [`PathError::NoRoute`] if the endpoints are disconnected.
    fn route(&mut self, grid: &GridMap, from: GridPos, to: GridPos) -> PathResult<Route>;
}

// ── AStarRouter ───────────────────────────────────────────────────────────────

/// Uncached 4-directional A* with unit step cost and Manhattan heuristic.
///
/// Stateless; scratch arrays are allocated per query.
#[derive(Debug, Default, Clone, Copy)]
pub struct AStarRouter;

impl Router for AStarRouter {
    fn route(&mut self, grid: &GridMap, from: GridPos, to: GridPos) -> PathResult<Route> {
        astar(grid, from, to)
    }
}

/// Reject endpoints that cannot be stood on.
pub(crate) fn check_endpoint(grid: &GridMap, pos: GridPos) -> PathResult<()> {
    if !grid.in_bounds(pos) {
        return Err(PathError::OutOfBounds(pos));
    }
    if !grid.is_walkable(pos) {
        return Err(PathError::Unwalkable(pos));
    }
    Ok(())
}

// ── A* internals ──────────────────────────────────────────────────────────────

const NO_PREV: usize = usize::MAX;

fn astar(grid: &GridMap, from: GridPos, to: GridPos) -> PathResult<Route> {
    check_endpoint(grid, from)?;
    check_endpoint(grid, to)?;
    if from == to {
        return Ok(Route::default());
    }

    let (Some(start), Some(goal)) = (grid.index(from), grid.index(to)) else {
        return Err(PathError::NoRoute { from, to });
    };

    let n = grid.cell_count();
    // g[v] = best known step count to reach v.
    let mut g      = vec![u32::MAX; n];
    // prev[v] = index that reached v; NO_PREV for unreached cells.
    let mut prev   = vec![NO_PREV; n];
    let mut closed = vec![false; n];

    g[start] = 0;

    // Min-heap on (f, seq, idx).  `seq` is the insertion counter: among equal
    // f the earliest-inserted entry is expanded first, which keeps results
    // independent of heap internals.
    let mut heap: BinaryHeap<Reverse<(u32, u64, usize)>> = BinaryHeap::new();
    let mut seq: u64 = 0;
    heap.push(Reverse((from.manhattan(to), seq, start)));

    while let Some(Reverse((_, _, idx))) = heap.pop() {
        if idx == goal {
            return Ok(reconstruct(grid, &prev, start, goal));
        }
        if closed[idx] {
            continue;
        }
        closed[idx] = true;

        let pos    = grid.pos_of(idx);
        let next_g = g[idx] + 1;

        for nb in grid.walkable_neighbors(pos) {
            let Some(ni) = grid.index(nb) else { continue };
            if closed[ni] || next_g >= g[ni] {
                continue;
            }
            g[ni]    = next_g;
            prev[ni] = idx;
            seq += 1;
            heap.push(Reverse((next_g + nb.manhattan(to), seq, ni)));
        }
    }

    Err(PathError::NoRoute { from, to })
}

/// Walk `prev` back from `goal`; the start cell is not included.
fn reconstruct(grid: &GridMap, prev: &[usize], start: usize, goal: usize) -> Route {
    let mut waypoints = Vec::new();
    let mut cur = goal;
    while cur != start && cur != NO_PREV {
        waypoints.push(grid.pos_of(cur));
        cur = prev[cur];
    }
    waypoints.reverse();
    Route::new(waypoints)
}

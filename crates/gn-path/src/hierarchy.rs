//! Two-level planning over fixed-size square chunks.
//!
//! # Chunk graph
//!
//! Built once from a grid snapshot.  For each chunk and each of its four
//! neighbors the link is open iff the cell on the departing chunk's edge
//! facing the neighbor, at the edge's midpoint, is walkable.  One sample per
//! edge means a blocked midpoint with an open edge elsewhere reads as
//! closed.  The graph is never refreshed after later terrain edits.
//!
//! # Query resolution
//!
//! Same or adjacent chunks go straight to the wrapped [`Router`].  Otherwise
//! the chunk route is a greedy walk (all horizontal steps, then vertical) and
//! detailed segments are chained through the exit point of every consecutive
//! chunk pair:
//!
//! ```text
//! start → exit(c0,c1) → exit(c1,c2) → … → exit(cn-1,cn) → end
//! ```
//!
//! Results are heuristic routes, not shortest paths.  A failed segment fails
//! the whole query even when a true route exists.

use gn_core::GridPos;
use gn_grid::GridMap;
use tracing::debug;

use crate::router::check_endpoint;
use crate::{PathError, PathResult, Route, Router};

// ── ChunkPos ──────────────────────────────────────────────────────────────────

/// Chunk coordinates: `(cell.x / size, cell.y / size)`.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ChunkPos {
    pub x: i32,
    pub y: i32,
}

impl ChunkPos {
    #[inline]
    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    /// `true` if the chunks share an edge.
    #[inline]
    pub fn is_adjacent(self, other: ChunkPos) -> bool {
        (self.x - other.x).abs() + (self.y - other.y).abs() == 1
    }
}

impl std::fmt::Display for ChunkPos {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "[{}, {}]", self.x, self.y)
    }
}

/// Link order inside a chunk's flag array: +x, +y, -x, -y.
const LINK_DIRS: [(i32, i32); 4] = [(1, 0), (0, 1), (-1, 0), (0, -1)];

fn link_slot(from: ChunkPos, to: ChunkPos) -> Option<usize> {
    let d = (to.x - from.x, to.y - from.y);
    LINK_DIRS.iter().position(|&l| l == d)
}

// ── HierarchicalPlanner ───────────────────────────────────────────────────────

/// Chunk partition plus precomputed inter-chunk connectivity.
#[derive(Debug, Clone)]
pub struct HierarchicalPlanner {
    chunk_size: i32,
    chunks_x:   i32,
    chunks_y:   i32,
    /// Row-major by chunk; one flag per [`LINK_DIRS`] entry.  Links that
    /// would leave the chunk grid are `false`.
    links:      Vec<[bool; 4]>,
}

impl HierarchicalPlanner {
    /// Partition `grid` into `chunk_size`-sided chunks and test every link.
    ///
    /// # Errors
    ///
    /// [`PathError::InvalidChunkSize`] if `chunk_size` is 0 or does not fit
    /// in an `i32`.
    pub fn new(grid: &GridMap, chunk_size: u32) -> PathResult<Self> {
        let size = i32::try_from(chunk_size)
            .ok()
            .filter(|&s| s > 0)
            .ok_or(PathError::InvalidChunkSize(chunk_size))?;

        let chunks_x = (grid.width() + size - 1) / size;
        let chunks_y = (grid.height() + size - 1) / size;

        let mut planner = Self { chunk_size: size, chunks_x, chunks_y, links: Vec::new() };
        planner.links = planner.build_links(grid);

        debug!(
            chunk_size,
            chunks_x,
            chunks_y,
            open_links = planner.links.iter().flatten().filter(|&&l| l).count(),
            "chunk graph built"
        );
        Ok(planner)
    }

    #[cfg(not(feature = "parallel"))]
    fn build_links(&self, grid: &GridMap) -> Vec<[bool; 4]> {
        (0..self.chunk_count()).map(|i| self.chunk_links(grid, i)).collect()
    }

    #[cfg(feature = "parallel")]
    fn build_links(&self, grid: &GridMap) -> Vec<[bool; 4]> {
        use rayon::prelude::*;
        (0..self.chunk_count()).into_par_iter().map(|i| self.chunk_links(grid, i)).collect()
    }

    fn chunk_links(&self, grid: &GridMap, idx: usize) -> [bool; 4] {
        let chunk = self.chunk_at(idx);
        let mut flags = [false; 4];
        for (slot, &(dx, dy)) in LINK_DIRS.iter().enumerate() {
            let nb = ChunkPos::new(chunk.x + dx, chunk.y + dy);
            if self.contains_chunk(nb) {
                flags[slot] = grid.is_walkable(self.border_sample(chunk, nb));
            }
        }
        flags
    }

    /// Midpoint of `a`'s edge facing `b`.  May fall outside the grid for a
    /// partial chunk on the far border, in which case the link reads closed.
    fn border_sample(&self, a: ChunkPos, b: ChunkPos) -> GridPos {
        let s = self.chunk_size;
        let mid_x = a.x * s + s / 2;
        let mid_y = a.y * s + s / 2;
        if a.x == b.x {
            let y = if a.y < b.y { (a.y + 1) * s - 1 } else { a.y * s };
            GridPos::new(mid_x, y)
        } else {
            let x = if a.x < b.x { (a.x + 1) * s - 1 } else { a.x * s };
            GridPos::new(x, mid_y)
        }
    }

    // ── Chunk geometry ────────────────────────────────────────────────────

    #[inline]
    pub fn chunk_size(&self) -> u32 {
        self.chunk_size as u32
    }

    /// Chunk-grid dimensions `(chunks_x, chunks_y)`.
    #[inline]
    pub fn chunk_dims(&self) -> (i32, i32) {
        (self.chunks_x, self.chunks_y)
    }

    #[inline]
    pub fn chunk_count(&self) -> usize {
        self.chunks_x as usize * self.chunks_y as usize
    }

    /// Chunk containing `pos`.  Meaningful for in-bounds positions.
    #[inline]
    pub fn chunk_of(&self, pos: GridPos) -> ChunkPos {
        ChunkPos::new(pos.x.div_euclid(self.chunk_size), pos.y.div_euclid(self.chunk_size))
    }

    #[inline]
    pub fn contains_chunk(&self, c: ChunkPos) -> bool {
        c.x >= 0 && c.x < self.chunks_x && c.y >= 0 && c.y < self.chunks_y
    }

    fn chunk_index(&self, c: ChunkPos) -> Option<usize> {
        self.contains_chunk(c).then(|| c.y as usize * self.chunks_x as usize + c.x as usize)
    }

    fn chunk_at(&self, idx: usize) -> ChunkPos {
        let w = self.chunks_x as usize;
        ChunkPos::new((idx % w) as i32, (idx / w) as i32)
    }

    /// Precomputed link state from `a` toward adjacent chunk `b`.
    ///
    /// `None` if either chunk is outside the chunk grid or they are not
    /// adjacent.
    pub fn is_connected(&self, a: ChunkPos, b: ChunkPos) -> Option<bool> {
        let idx = self.chunk_index(a)?;
        let slot = link_slot(a, b)?;
        if !self.contains_chunk(b) {
            return None;
        }
        Some(self.links[idx][slot])
    }

    /// Greedy chunk walk from `from` to `to`, excluding `from`: every
    /// horizontal step first, then every vertical one.
    pub fn chunk_route(&self, from: ChunkPos, to: ChunkPos) -> Vec<ChunkPos> {
        let mut route = Vec::new();
        let mut cur = from;
        let sx = (to.x - from.x).signum();
        while cur.x != to.x {
            cur.x += sx;
            route.push(cur);
        }
        let sy = (to.y - from.y).signum();
        while cur.y != to.y {
            cur.y += sy;
            route.push(cur);
        }
        route
    }

    /// Crossing cell for leaving `from` toward adjacent chunk `to`.
    ///
    /// Midpoint of `from`'s facing edge, clamped into the grid.  If that cell
    /// is blocked, the first walkable cell on Manhattan rings of radius
    /// `1..chunk_size` around it; failing that, the clamped midpoint itself.
    pub fn exit_point(&self, grid: &GridMap, from: ChunkPos, to: ChunkPos) -> GridPos {
        let s = self.chunk_size;
        let (x, y) = if from.x < to.x {
            ((from.x + 1) * s - 1, from.y * s + s / 2)
        } else if from.x > to.x {
            (from.x * s, from.y * s + s / 2)
        } else if from.y < to.y {
            (from.x * s + s / 2, (from.y + 1) * s - 1)
        } else {
            (from.x * s + s / 2, from.y * s)
        };
        let base = GridPos::new(x.clamp(0, grid.width() - 1), y.clamp(0, grid.height() - 1));

        if grid.is_walkable(base) {
            return base;
        }
        for r in 1..s {
            for dx in -r..=r {
                for dy in -r..=r {
                    if dx.abs() + dy.abs() != r {
                        continue;
                    }
                    let p = base.offset(dx, dy);
                    if grid.is_walkable(p) {
                        return p;
                    }
                }
            }
        }
        base
    }

    // ── Query ─────────────────────────────────────────────────────────────

    /// Route from `start` to `end`, computing every detailed segment with
    /// `router` (typically the shared [`PathCache`](crate::PathCache)).
    ///
    /// # Errors
    ///
    /// - [`PathError::OutOfBounds`] / [`PathError::Unwalkable`] for a bad
    ///   endpoint, before any search.
    /// - [`PathError::NoRoute`] for `(start, end)` if any segment fails.
    pub fn find_path<R: Router + ?Sized>(
        &self,
        grid: &GridMap,
        router: &mut R,
        start: GridPos,
        end: GridPos,
    ) -> PathResult<Route> {
        check_endpoint(grid, start)?;
        check_endpoint(grid, end)?;

        let sc = self.chunk_of(start);
        let ec = self.chunk_of(end);
        if sc == ec || sc.is_adjacent(ec) {
            return router.route(grid, start, end);
        }

        let mut chunks = vec![sc];
        chunks.extend(self.chunk_route(sc, ec));

        let mut stops: Vec<GridPos> =
            chunks.windows(2).map(|w| self.exit_point(grid, w[0], w[1])).collect();
        stops.push(end);

        let mut waypoints = Vec::new();
        let mut cur = start;
        for stop in stops {
            if stop == cur {
                continue;
            }
            match router.route(grid, cur, stop) {
                Ok(seg) => {
                    waypoints.extend(seg.waypoints);
                    cur = stop;
                }
                Err(e) => {
                    debug!(%start, %end, segment_from = %cur, segment_to = %stop, error = %e,
                        "hierarchical segment failed");
                    return Err(PathError::NoRoute { from: start, to: end });
                }
            }
        }
        Ok(Route::new(waypoints))
    }
}

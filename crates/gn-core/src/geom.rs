//! Integer grid coordinates.

use std::fmt;

/// A cell coordinate on the occupancy grid.
///
/// Signed so that neighbor arithmetic near the border (`x - 1` at `x = 0`)
/// yields an out-of-bounds coordinate instead of wrapping.
#[derive(Copy, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Debug, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct GridPos {
    pub x: i32,
    pub y: i32,
}

impl GridPos {
    /// The four cardinal offsets in neighbor-enumeration order:
    /// up, right, down, left.
    pub const CARDINALS: [GridPos; 4] = [
        GridPos { x: 0, y: 1 },
        GridPos { x: 1, y: 0 },
        GridPos { x: 0, y: -1 },
        GridPos { x: -1, y: 0 },
    ];

    #[inline]
    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    /// `self + (dx, dy)`.
    #[inline]
    pub fn offset(self, dx: i32, dy: i32) -> GridPos {
        GridPos::new(self.x + dx, self.y + dy)
    }

    /// Manhattan (L1) distance, the admissible A* heuristic for
    /// 4-directional unit-cost movement.
    #[inline]
    pub fn manhattan(self, other: GridPos) -> u32 {
        self.x.abs_diff(other.x) + self.y.abs_diff(other.y)
    }

    /// Straight-line distance in cells.
    #[inline]
    pub fn euclidean(self, other: GridPos) -> f32 {
        let dx = (self.x - other.x) as f32;
        let dy = (self.y - other.y) as f32;
        (dx * dx + dy * dy).sqrt()
    }

    /// `true` if `other` is exactly one cardinal step away.
    #[inline]
    pub fn is_adjacent(self, other: GridPos) -> bool {
        self.manhattan(other) == 1
    }

    /// Per-axis sign of `other - self`, i.e. one step toward `other`
    /// (diagonal when both axes differ).
    #[inline]
    pub fn step_toward(self, other: GridPos) -> GridPos {
        self.offset((other.x - self.x).signum(), (other.y - self.y).signum())
    }

    /// Bresenham rasterization of the segment to `other`, both endpoints
    /// included.
    #[inline]
    pub fn line_to(self, other: GridPos) -> Line {
        Line::new(self, other)
    }
}

// ── Line ──────────────────────────────────────────────────────────────────────

/// Iterator over the cells of an integer line segment, start first.
///
/// Consecutive cells differ by at most one on each axis.  The sequence for
/// `a → b` is deterministic but not necessarily the reverse of `b → a`.
#[derive(Clone, Debug)]
pub struct Line {
    cur:  GridPos,
    end:  GridPos,
    dx:   i32,
    dy:   i32,
    sx:   i32,
    sy:   i32,
    err:  i32,
    done: bool,
}

impl Line {
    fn new(from: GridPos, to: GridPos) -> Self {
        let dx = (to.x - from.x).abs();
        let dy = (to.y - from.y).abs();
        Self {
            cur: from,
            end: to,
            dx,
            dy,
            sx: if from.x < to.x { 1 } else { -1 },
            sy: if from.y < to.y { 1 } else { -1 },
            err: dx - dy,
            done: false,
        }
    }
}

impl Iterator for Line {
    type Item = GridPos;

    fn next(&mut self) -> Option<GridPos> {
        if self.done {
            return None;
        }
        let out = self.cur;
        if out == self.end {
            self.done = true;
            return Some(out);
        }
        let e2 = 2 * self.err;
        if e2 > -self.dy {
            self.err -= self.dy;
            self.cur.x += self.sx;
        }
        if e2 < self.dx {
            self.err += self.dx;
            self.cur.y += self.sy;
        }
        Some(out)
    }
}

impl fmt::Display for GridPos {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.x, self.y)
    }
}

impl From<(i32, i32)> for GridPos {
    #[inline]
    fn from((x, y): (i32, i32)) -> Self {
        GridPos::new(x, y)
    }
}

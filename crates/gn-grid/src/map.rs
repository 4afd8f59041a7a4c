//! The occupancy grid.
//!
//! # Data layout
//!
//! Cells are stored row-major in a single `Vec<Cell>`: the cell at `(x, y)`
//! lives at index `y * width + x`.  Dimensions are fixed at construction and
//! never change for the lifetime of the map, which is what lets downstream
//! caches key on coordinates alone.

use gn_core::GridPos;
use tracing::trace;

use crate::{Cell, FeatureType, GridError, GridResult, TerrainType};

/// Record of one effective walkability change.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct CellChange {
    pub pos: GridPos,
    /// The new walkability value.
    pub walkable: bool,
    /// Grid revision after the change was applied.
    pub revision: u64,
}

/// Fixed-size `width × height` grid of [`Cell`]s.
pub struct GridMap {
    width:    i32,
    height:   i32,
    cells:    Vec<Cell>,
    /// Bumped once per effective walkability change.
    revision: u64,
    /// Changes not yet drained by the presentation layer.
    changes:  Vec<CellChange>,
}

impl GridMap {
    /// Create a fully walkable grid.
    ///
    /// # Errors
    ///
    /// [`GridError::InvalidDimensions`] if either side is not positive.
    pub fn new(width: i32, height: i32) -> GridResult<Self> {
        if width <= 0 || height <= 0 {
            return Err(GridError::InvalidDimensions { width, height });
        }
        let mut cells = Vec::with_capacity(width as usize * height as usize);
        for y in 0..height {
            for x in 0..width {
                cells.push(Cell::open(GridPos::new(x, y)));
            }
        }
        Ok(Self { width, height, cells, revision: 0, changes: Vec::new() })
    }

    // ── Dimensions ────────────────────────────────────────────────────────

    #[inline]
    pub fn width(&self) -> i32 {
        self.width
    }

    #[inline]
    pub fn height(&self) -> i32 {
        self.height
    }

    /// Total number of cells (`width * height`).
    #[inline]
    pub fn cell_count(&self) -> usize {
        self.cells.len()
    }

    // ── Queries ───────────────────────────────────────────────────────────

    #[inline]
    pub fn in_bounds(&self, pos: GridPos) -> bool {
        pos.x >= 0 && pos.x < self.width && pos.y >= 0 && pos.y < self.height
    }

    /// `false` for out-of-bounds coordinates.
    #[inline]
    pub fn is_walkable(&self, pos: GridPos) -> bool {
        self.index(pos).is_some_and(|i| self.cells[i].walkable)
    }

    /// The cell at `pos`, or `None` if out of bounds.
    #[inline]
    pub fn cell(&self, pos: GridPos) -> Option<&Cell> {
        self.index(pos).map(|i| &self.cells[i])
    }

    /// Row-major index of `pos`, or `None` if out of bounds.
    #[inline]
    pub fn index(&self, pos: GridPos) -> Option<usize> {
        if self.in_bounds(pos) {
            Some(pos.y as usize * self.width as usize + pos.x as usize)
        } else {
            None
        }
    }

    /// Inverse of [`index`](Self::index).  `idx` must be `< cell_count()`.
    #[inline]
    pub fn pos_of(&self, idx: usize) -> GridPos {
        let w = self.width as usize;
        GridPos::new((idx % w) as i32, (idx / w) as i32)
    }

    /// Walkable cardinal neighbors of `pos`, in up/right/down/left order.
    pub fn walkable_neighbors(&self, pos: GridPos) -> impl Iterator<Item = GridPos> + '_ {
        GridPos::CARDINALS
            .into_iter()
            .map(move |d| pos.offset(d.x, d.y))
            .filter(|&n| self.is_walkable(n))
    }

    /// Number of walkable cells.
    pub fn walkable_count(&self) -> usize {
        self.cells.iter().filter(|c| c.walkable).count()
    }

    // ── Revision tracking ─────────────────────────────────────────────────

    /// Monotonic counter of effective walkability changes since creation.
    #[inline]
    pub fn revision(&self) -> u64 {
        self.revision
    }

    /// Take every change recorded since the last drain, oldest first.
    pub fn drain_changes(&mut self) -> Vec<CellChange> {
        std::mem::take(&mut self.changes)
    }

    /// Changes recorded but not yet drained.
    pub fn pending_changes(&self) -> &[CellChange] {
        &self.changes
    }

    /// Forget setup edits so a freshly loaded map starts at revision 0.
    pub(crate) fn reset_tracking(&mut self) {
        self.revision = 0;
        self.changes.clear();
    }

    // ── Mutation ──────────────────────────────────────────────────────────

    /// Set the walkability of `pos`.
    ///
    /// Returns `Ok(true)` if the value actually changed, in which case the
    /// revision is bumped and a [`CellChange`] is recorded.  Setting a cell
    /// to its current value is a no-op.
    ///
    /// # Errors
    ///
    /// [`GridError::OutOfBounds`] if `pos` is outside the grid.
    pub fn set_walkable(&mut self, pos: GridPos, walkable: bool) -> GridResult<bool> {
        let idx = self.index(pos).ok_or(GridError::OutOfBounds(pos))?;
        let cell = &mut self.cells[idx];
        if cell.walkable == walkable {
            return Ok(false);
        }
        cell.walkable = walkable;
        self.revision += 1;
        self.changes.push(CellChange { pos, walkable, revision: self.revision });
        trace!(%pos, walkable, revision = self.revision, "cell walkability changed");
        Ok(true)
    }

    /// Tag `pos` with a terrain type.  Never affects walkability.
    pub fn set_terrain(&mut self, pos: GridPos, terrain: TerrainType) -> GridResult<()> {
        let idx = self.index(pos).ok_or(GridError::OutOfBounds(pos))?;
        self.cells[idx].terrain = terrain;
        Ok(())
    }

    /// Tag `pos` with a feature.  Never affects walkability; callers that
    /// want a wall to block also call [`set_walkable`](Self::set_walkable).
    pub fn set_feature(&mut self, pos: GridPos, feature: FeatureType) -> GridResult<()> {
        let idx = self.index(pos).ok_or(GridError::OutOfBounds(pos))?;
        self.cells[idx].feature = feature;
        Ok(())
    }

    /// Set the stored movement cost of `pos`.
    pub fn set_movement_cost(&mut self, pos: GridPos, cost: f32) -> GridResult<()> {
        let idx = self.index(pos).ok_or(GridError::OutOfBounds(pos))?;
        self.cells[idx].movement_cost = cost;
        Ok(())
    }
}

impl std::fmt::Debug for GridMap {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GridMap")
            .field("width", &self.width)
            .field("height", &self.height)
            .field("revision", &self.revision)
            .finish_non_exhaustive()
    }
}

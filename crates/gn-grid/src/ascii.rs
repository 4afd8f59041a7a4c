//! ASCII grid loader.
//!
//! # Format
//!
//! One text line per row; line 0 is `y = 0`.  Leading/trailing blank lines
//! and surrounding whitespace on each line are ignored.
//!
//! | Char | Meaning                                   |
//! |------|-------------------------------------------|
//! | `.`  | open, walkable                            |
//! | `#`  | wall (`FeatureType::Wall`, not walkable)  |
//! | `~`  | water (`TerrainType::Water`, not walkable)|
//! | `T`  | tree (`FeatureType::Tree`, not walkable)  |
//!
//! ```
//! use gn_core::GridPos;
//! use gn_grid::GridMap;
//!
//! let grid = GridMap::from_ascii("
//!     ...
//!     .#.
//!     ...
//! ").unwrap();
//! assert_eq!(grid.width(), 3);
//! assert!(!grid.is_walkable(GridPos::new(1, 1)));
//! ```

use gn_core::GridPos;

use crate::{FeatureType, GridError, GridMap, GridResult, TerrainType};

impl GridMap {
    /// Parse a grid from text.  All rows must have the same length.
    ///
    /// The returned map has revision 0 and an empty change buffer: the
    /// initial layout is world-generation input, not an edit.
    pub fn from_ascii(text: &str) -> GridResult<GridMap> {
        let rows: Vec<&str> = text
            .lines()
            .map(str::trim)
            .filter(|l| !l.is_empty())
            .collect();

        let height = rows.len() as i32;
        let width = rows.first().map_or(0, |r| r.chars().count()) as i32;
        let mut grid = GridMap::new(width, height)?;

        for (y, row) in rows.iter().enumerate() {
            if row.chars().count() as i32 != width {
                return Err(GridError::Parse(format!(
                    "row {y} has {} cells, expected {width}",
                    row.chars().count()
                )));
            }
            for (x, ch) in row.chars().enumerate() {
                let pos = GridPos::new(x as i32, y as i32);
                match ch {
                    '.' => {}
                    '#' => {
                        grid.set_walkable(pos, false)?;
                        grid.set_feature(pos, FeatureType::Wall)?;
                    }
                    '~' => {
                        grid.set_walkable(pos, false)?;
                        grid.set_terrain(pos, TerrainType::Water)?;
                    }
                    'T' => {
                        grid.set_walkable(pos, false)?;
                        grid.set_feature(pos, FeatureType::Tree)?;
                    }
                    other => {
                        return Err(GridError::Parse(format!(
                            "unexpected character {other:?} at {pos}"
                        )));
                    }
                }
            }
        }

        grid.reset_tracking();
        Ok(grid)
    }

    /// Render walkability back to text (`.` / `#`), one line per row.
    pub fn to_ascii(&self) -> String {
        let mut out = String::with_capacity((self.width() as usize + 1) * self.height() as usize);
        for y in 0..self.height() {
            for x in 0..self.width() {
                out.push(if self.is_walkable(GridPos::new(x, y)) { '.' } else { '#' });
            }
            out.push('\n');
        }
        out
    }
}

//! Per-cell data.
//!
//! Only `walkable` is consumed by search.  `terrain`, `feature` and
//! `movement_cost` are carried for presentation and world-generation
//! collaborators; search currently treats every step as cost 1.

use gn_core::GridPos;

/// Ground type of a cell.
#[derive(Copy, Clone, PartialEq, Eq, Hash, Debug, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum TerrainType {
    #[default]
    Grass,
    Dirt,
    Stone,
    Sand,
    Water,
    Snow,
    Mud,
}

impl TerrainType {
    pub fn as_str(self) -> &'static str {
        match self {
            TerrainType::Grass => "grass",
            TerrainType::Dirt  => "dirt",
            TerrainType::Stone => "stone",
            TerrainType::Sand  => "sand",
            TerrainType::Water => "water",
            TerrainType::Snow  => "snow",
            TerrainType::Mud   => "mud",
        }
    }
}

impl std::fmt::Display for TerrainType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Object standing on a cell.
#[derive(Copy, Clone, PartialEq, Eq, Hash, Debug, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum FeatureType {
    #[default]
    None,
    Wall,
    Tree,
    Rock,
    Door,
    Stairs,
}

impl FeatureType {
    pub fn as_str(self) -> &'static str {
        match self {
            FeatureType::None   => "none",
            FeatureType::Wall   => "wall",
            FeatureType::Tree   => "tree",
            FeatureType::Rock   => "rock",
            FeatureType::Door   => "door",
            FeatureType::Stairs => "stairs",
        }
    }
}

impl std::fmt::Display for FeatureType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One grid cell.  Owned exclusively by [`GridMap`][crate::GridMap];
/// callers get `&Cell` and mutate through the map so walkability changes are
/// always tracked.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Cell {
    pub pos: GridPos,
    pub walkable: bool,
    /// Stored but not used by search (uniform step cost).
    pub movement_cost: f32,
    pub terrain: TerrainType,
    pub feature: FeatureType,
}

impl Cell {
    /// An open grass cell with unit movement cost.
    pub fn open(pos: GridPos) -> Self {
        Self {
            pos,
            walkable:      true,
            movement_cost: 1.0,
            terrain:       TerrainType::Grass,
            feature:       FeatureType::None,
        }
    }
}

//! `gn-grid`: the occupancy grid the planner searches over.
//!
//! # Crate layout
//!
//! | Module     | Contents                                                      |
//! |------------|---------------------------------------------------------------|
//! | [`cell`]   | `Cell`, `TerrainType`, `FeatureType`                          |
//! | [`map`]    | `GridMap` (row-major cells, revision counter, change buffer)  |
//! | [`ascii`]  | `GridMap::from_ascii` text loader for fixtures and demos      |
//! | [`error`]  | `GridError`, `GridResult<T>`                                  |
//!
//! # Change tracking
//!
//! Every effective walkability flip bumps [`GridMap::revision`] and appends a
//! [`CellChange`] to an internal buffer.  Path caches compare revisions to
//! detect staleness; presentation code drains the buffer with
//! [`GridMap::drain_changes`].
//!
//! # Feature flags
//!
//! | Flag    | Effect                                                       |
//! |---------|--------------------------------------------------------------|
//! | `serde` | Derives `Serialize`/`Deserialize` on public types.           |

pub mod ascii;
pub mod cell;
pub mod error;
pub mod map;


pub use cell::{Cell, FeatureType, TerrainType};
pub use error::{GridError, GridResult};
pub use map::{CellChange, GridMap};

//! `gn-core`: foundational types for the `gridnav` path-planning engine.
//!
//! This crate is a dependency of every other `gn-*` crate.  It intentionally
//! has no `gn-*` dependencies and minimal external ones (only `rand` and
//! `thiserror`, plus optional `serde`).
//!
//! # What lives here
//!
//! | Module       | Contents                                               |
//! |--------------|--------------------------------------------------------|
//! | [`ids`]      | `AgentId`                                              |
//! | [`geom`]     | `GridPos`, distances, `Line` (Bresenham rasterization) |
//! | [`time`]     | `Tick`, `SimClock`                                     |
//! | [`config`]   | `SimConfig`, `PlannerConfig`                           |
//! | [`rng`]      | `SimRng` (seeded, reproducible)                        |
//! | [`error`]    | `CoreError`, `CoreResult`                              |
//!
//! # Feature flags
//!
//! | Flag    | Effect                                                     |
//! |---------|------------------------------------------------------------|
//! | `serde` | Adds `Serialize`/`Deserialize` to all public value types.  |

pub mod config;
pub mod error;
pub mod geom;
pub mod ids;
pub mod rng;
pub mod time;


// ── Re-exports ────────────────────────────────────────────────────────────────

pub use config::{PlannerConfig, SimConfig};
pub use error::{CoreError, CoreResult};
pub use geom::{GridPos, Line};
pub use ids::AgentId;
pub use rng::SimRng;
pub use time::{SimClock, Tick};

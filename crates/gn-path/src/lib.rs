//! `gn-path`: shortest-path search, caching, and long-range planning.
//!
//! # Crate layout
//!
//! | Module        | Contents                                                      |
//! |---------------|---------------------------------------------------------------|
//! | [`route`]     | `Route`: waypoints excluding the start, including the end     |
//! | [`router`]    | `Router` trait, `AStarRouter` (4-directional, unit cost)      |
//! | [`cache`]     | `PathCache<R>`: memoizing `Router` wrapper, `CacheStats`      |
//! | [`hierarchy`] | `HierarchicalPlanner`, `ChunkPos`: chunk-level routing        |
//! | [`smooth`]    | `PathSmoother`, `line_of_sight`: string-pulling               |
//! | [`navigator`] | `Navigator`: cache + hierarchy + smoother behind one call     |
//! | [`error`]     | `PathError`, `PathResult<T>`                                  |
//!
//! # Composition
//!
//! Everything that produces a route implements or consumes [`Router`]:
//!
//! ```text
//! AStarRouter ──wrapped by──▶ PathCache ──segments for──▶ HierarchicalPlanner
//!                                  │                              │
//!                                  └────────── Navigator ◀────────┘ ──▶ PathSmoother
//! ```
//!
//! # Feature flags
//!
//! | Flag       | Effect                                                     |
//! |------------|------------------------------------------------------------|
//! | `parallel` | Builds the chunk connectivity graph with Rayon.            |
//! | `serde`    | Derives `Serialize`/`Deserialize` on public value types.   |

pub mod cache;
pub mod error;
pub mod hierarchy;
pub mod navigator;
pub mod route;
pub mod router;
pub mod smooth;


pub use cache::{CacheStats, PathCache};
pub use error::{PathError, PathResult};
pub use hierarchy::{ChunkPos, HierarchicalPlanner};
pub use navigator::{Navigator, Strategy};
pub use route::Route;
pub use router::{AStarRouter, Router};
pub use smooth::{PathSmoother, line_of_sight};

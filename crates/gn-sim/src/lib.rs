//! `gn-sim`: tick loop orchestrator for the `gridnav` engine.
//!
//! # Tick loop
//!
//! ```text
//! for tick in 0..config.total_ticks:
//!   ① Events:    rotate the two event buffers; record cell changes made
//!                since the previous tick; deliver everything due now.
//!   ② Schedule:  RequestScheduler::process: enqueue agents that need a
//!                path, plan up to the per-tick cap, defer the rest.
//!   ③ Movement:  every agent with a path steps one cell.
//!   ④ Emit:      attached / failed / blocked outcomes go into the
//!                next-tick buffer.
//!   ⑤ Summary:   SimObserver::on_tick_end.
//! ```
//!
//! Terrain edits go through [`Sim::set_walkable`], which invalidates the
//! path cache before returning.
//!
//! # Cargo features
//!
//! | Feature    | Effect                                                 |
//! |------------|--------------------------------------------------------|
//! | `parallel` | Builds the chunk connectivity graph with Rayon.        |
//! | `serde`    | Derives `Serialize`/`Deserialize` across all crates.   |
//!
//! # Quick-start
//!
//! ```rust,ignore
//! use gn_agent::AgentStoreBuilder;
//! use gn_core::{GridPos, SimConfig};
//! use gn_grid::GridMap;
//! use gn_sim::{NoopObserver, SimBuilder};
//!
//! let grid = GridMap::new(64, 64)?;
//! let agents = AgentStoreBuilder::new()
//!     .agent(GridPos::new(0, 0), GridPos::new(60, 40))
//!     .build();
//! let mut sim = SimBuilder::new(SimConfig::default(), grid).agents(agents).build()?;
//! sim.run(&mut NoopObserver)?;
//! ```

pub mod builder;
pub mod error;
pub mod events;
pub mod observer;
pub mod sim;


pub use builder::SimBuilder;
pub use error::{SimError, SimResult};
pub use events::{EventBuffers, SimEvent};
pub use observer::{NoopObserver, SimObserver};
pub use sim::{Sim, TickSummary};

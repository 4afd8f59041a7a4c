//! `gn-agent`: Structure-of-Arrays agent storage for the `gridnav` engine.
//!
//! # Crate layout
//!
//! | Module        | Contents                                                    |
//! |---------------|-------------------------------------------------------------|
//! | [`store`]     | `AgentStore` (position / destination / alive / pending SoA) |
//! | [`path`]      | `ActivePath`: waypoints, cursor and leg anchor              |
//! | [`movement`]  | One-cell-per-tick waypoint following, `MovementReport`      |
//! | [`builder`]   | `AgentStoreBuilder` (fluent construction)                   |
//! | [`loader`]    | CSV population loader                                       |
//! | [`error`]     | `AgentError`, `AgentResult<T>`                              |
//!
//! # Feature flags
//!
//! | Flag    | Effect                                                        |
//! |---------|---------------------------------------------------------------|
//! | `serde` | Derives `Serialize`/`Deserialize` on public value types.      |

pub mod builder;
pub mod error;
pub mod loader;
pub mod movement;
pub mod path;
pub mod store;

#[cfg(test)]
mod tests;

pub use builder::AgentStoreBuilder;
pub use error::{AgentError, AgentResult};
pub use loader::{load_agents_csv, load_agents_reader};
pub use movement::{MovementReport, StepOutcome, step_agent, step_all};
pub use path::ActivePath;
pub use store::AgentStore;

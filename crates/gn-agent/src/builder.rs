//! Fluent builder for constructing an `AgentStore` in one step.
//!
//! # Usage
//!
//! ```rust
//! use gn_agent::AgentStoreBuilder;
//! use gn_core::GridPos;
//!
//! let store = AgentStoreBuilder::with_capacity(2)
//!     .agent(GridPos::new(0, 0), GridPos::new(5, 5))
//!     .idle_agent(GridPos::new(3, 1))
//!     .build();
//!
//! assert_eq!(store.count, 2);
//! assert!(store.needs_path(gn_core::AgentId(0)));
//! assert!(!store.needs_path(gn_core::AgentId(1)));
//! ```

use gn_core::GridPos;

use crate::AgentStore;

/// Fluent builder for [`AgentStore`].
///
/// Agents receive IDs in the order they are added.
pub struct AgentStoreBuilder {
    store: AgentStore,
}

impl AgentStoreBuilder {
    pub fn new() -> Self {
        Self::with_capacity(0)
    }

    /// Pre-allocate SoA arrays for `capacity` agents.
    pub fn with_capacity(capacity: usize) -> Self {
        Self { store: AgentStore::with_capacity(capacity) }
    }

    /// Add an agent at `position` that wants to reach `destination`.
    pub fn agent(mut self, position: GridPos, destination: GridPos) -> Self {
        self.store.spawn(position, destination);
        self
    }

    /// Add an agent with no pending destination.
    pub fn idle_agent(self, position: GridPos) -> Self {
        self.agent(position, position)
    }

    /// Add every `(position, destination)` pair in order.
    pub fn agents<I>(mut self, agents: I) -> Self
    where
        I: IntoIterator<Item = (GridPos, GridPos)>,
    {
        for (pos, dest) in agents {
            self.store.spawn(pos, dest);
        }
        self
    }

    pub fn build(self) -> AgentStore {
        self.store
    }
}

impl Default for AgentStoreBuilder {
    fn default() -> Self {
        Self::new()
    }
}

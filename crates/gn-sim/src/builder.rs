//! Fluent builder for constructing a [`Sim`].

use gn_agent::AgentStore;
use gn_core::SimConfig;
use gn_grid::GridMap;
use gn_sched::RequestScheduler;

use crate::{EventBuffers, Sim, SimError, SimResult};

/// Fluent builder for [`Sim`].
///
/// # Required inputs
///
/// - [`SimConfig`]: total ticks, seed, tick interval, planner tunables
/// - [`GridMap`]: the world, fully set up
///
/// # Optional inputs (have defaults)
///
/// | Method          | Default                 |
/// |-----------------|-------------------------|
/// | `.agents(s)`    | Empty `AgentStore`      |
///
/// Walkability edits made to the grid before [`build`](Self::build) are
/// world setup, not terrain changes: they are discarded rather than reported
/// as [`SimEvent::CellChanged`](crate::SimEvent::CellChanged).
///
/// # Example
///
/// ```rust,ignore
/// let mut sim = SimBuilder::new(config, grid)
///     .agents(store)
///     .build()?;
/// sim.run(&mut NoopObserver)?;
/// ```
pub struct SimBuilder {
    config: SimConfig,
    grid:   GridMap,
    agents: Option<AgentStore>,
}

impl SimBuilder {
    pub fn new(config: SimConfig, grid: GridMap) -> Self {
        Self { config, grid, agents: None }
    }

    /// Supply the initial agent population.
    pub fn agents(mut self, agents: AgentStore) -> Self {
        self.agents = Some(agents);
        self
    }

    /// Validate inputs, build the planner, and return a ready-to-run [`Sim`].
    ///
    /// # Errors
    ///
    /// - [`SimError::Config`] if the configuration is invalid.
    /// - [`SimError::InvalidPosition`] if a live agent stands outside the
    ///   grid or on an unwalkable cell, or wants to go outside the grid.
    pub fn build(self) -> SimResult<Sim> {
        self.config.validate()?;

        let mut grid = self.grid;
        let agents = self.agents.unwrap_or_default();

        // ── Validate agent placement ──────────────────────────────────────
        for agent in agents.live_agents() {
            let pos = agents.position[agent.index()];
            if !grid.is_walkable(pos) {
                return Err(SimError::InvalidPosition(pos));
            }
            let dest = agents.destination[agent.index()];
            if !grid.in_bounds(dest) {
                return Err(SimError::InvalidPosition(dest));
            }
        }

        grid.drain_changes();
        let scheduler = RequestScheduler::new(&grid, &self.config.planner)?;

        Ok(Sim {
            clock: self.config.make_clock(),
            config: self.config,
            grid,
            agents,
            scheduler,
            events: EventBuffers::new(),
        })
    }
}

//! Core agent storage.

use gn_core::{AgentId, GridPos};
use rustc_hash::FxHashMap;

use crate::{ActivePath, AgentError, AgentResult};

/// Structure-of-Arrays storage for all agent state.
///
/// Every `Vec` field has exactly `count` elements; the `AgentId` value is the
/// index into all of them:
///
/// ```ignore
/// let here = store.position[agent.index()];  // O(1), cache-friendly
/// ```
///
/// Removed agents keep their slot with `alive == false`, so IDs are never
/// reused within one store.  Active paths are sparse: only agents currently
/// following a route have an entry.
#[derive(Debug, Default)]
pub struct AgentStore {
    /// Number of agent slots, alive or not.  Equals the length of every SoA `Vec`.
    pub count: usize,

    /// Current cell.
    pub position: Vec<GridPos>,

    /// Desired cell.  Equal to `position` when the agent is idle.
    pub destination: Vec<GridPos>,

    /// `false` once the agent has been removed.
    pub alive: Vec<bool>,

    /// A path request for this agent is queued or in flight.
    pub pending: Vec<bool>,

    /// Sparse `AgentId → ActivePath` for agents following a route.
    paths: FxHashMap<AgentId, ActivePath>,
}

impl AgentStore {
    pub(crate) fn with_capacity(capacity: usize) -> Self {
        Self {
            count:       0,
            position:    Vec::with_capacity(capacity),
            destination: Vec::with_capacity(capacity),
            alive:       Vec::with_capacity(capacity),
            pending:     Vec::with_capacity(capacity),
            paths:       FxHashMap::default(),
        }
    }

    /// `true` if there are no agent slots.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.count == 0
    }

    /// Number of agents not yet removed.
    pub fn live_count(&self) -> usize {
        self.alive.iter().filter(|&&a| a).count()
    }

    /// Every `AgentId` in ascending index order, removed ones included.
    pub fn agent_ids(&self) -> impl Iterator<Item = AgentId> + '_ {
        (0..self.count as u32).map(AgentId)
    }

    /// Live agents in ascending index order.
    pub fn live_agents(&self) -> impl Iterator<Item = AgentId> + '_ {
        self.agent_ids().filter(|a| self.alive[a.index()])
    }

    #[inline]
    pub fn is_alive(&self, agent: AgentId) -> bool {
        self.alive.get(agent.index()).copied().unwrap_or(false)
    }

    /// `Ok` if `agent` refers to a live slot.
    pub fn check(&self, agent: AgentId) -> AgentResult<()> {
        if self.is_alive(agent) { Ok(()) } else { Err(AgentError::UnknownAgent(agent)) }
    }

    // ── Lifecycle ─────────────────────────────────────────────────────────

    /// Append a new agent and return its ID.
    pub fn spawn(&mut self, position: GridPos, destination: GridPos) -> AgentId {
        let id = AgentId(self.count as u32);
        self.position.push(position);
        self.destination.push(destination);
        self.alive.push(true);
        self.pending.push(false);
        self.count += 1;
        id
    }

    /// Mark `agent` dead and drop its path and pending marker.
    ///
    /// The caller is responsible for cancelling any queued request.
    pub fn remove(&mut self, agent: AgentId) -> AgentResult<()> {
        self.check(agent)?;
        let i = agent.index();
        self.alive[i] = false;
        self.pending[i] = false;
        self.paths.remove(&agent);
        Ok(())
    }

    // ── Destinations ──────────────────────────────────────────────────────

    /// Change where `agent` wants to go.  Any active path toward the old
    /// destination is discarded.
    pub fn set_destination(&mut self, agent: AgentId, destination: GridPos) -> AgentResult<()> {
        self.check(agent)?;
        let i = agent.index();
        if self.destination[i] != destination {
            self.destination[i] = destination;
            self.paths.remove(&agent);
        }
        Ok(())
    }

    /// Give up on the current destination: it becomes the current position.
    pub fn reset_destination(&mut self, agent: AgentId) -> AgentResult<()> {
        self.check(agent)?;
        let i = agent.index();
        self.destination[i] = self.position[i];
        Ok(())
    }

    /// Live, not at its destination, no path attached, no request pending.
    pub fn needs_path(&self, agent: AgentId) -> bool {
        let i = agent.index();
        self.is_alive(agent)
            && self.position[i] != self.destination[i]
            && !self.pending[i]
            && !self.paths.contains_key(&agent)
    }

    // ── Paths ─────────────────────────────────────────────────────────────

    /// Attach `path`, replacing any previous one.
    pub fn attach_path(&mut self, agent: AgentId, path: ActivePath) -> AgentResult<()> {
        self.check(agent)?;
        self.paths.insert(agent, path);
        Ok(())
    }

    /// Remove and return the active path, if any.
    pub fn detach_path(&mut self, agent: AgentId) -> Option<ActivePath> {
        self.paths.remove(&agent)
    }

    #[inline]
    pub fn path(&self, agent: AgentId) -> Option<&ActivePath> {
        self.paths.get(&agent)
    }

    #[inline]
    pub fn path_mut(&mut self, agent: AgentId) -> Option<&mut ActivePath> {
        self.paths.get_mut(&agent)
    }

    #[inline]
    pub fn has_path(&self, agent: AgentId) -> bool {
        self.paths.contains_key(&agent)
    }

    /// Number of agents currently following a path.
    pub fn active_path_count(&self) -> usize {
        self.paths.len()
    }

    // ── Pending marker ────────────────────────────────────────────────────

    #[inline]
    pub fn is_pending(&self, agent: AgentId) -> bool {
        self.pending.get(agent.index()).copied().unwrap_or(false)
    }

    pub fn set_pending(&mut self, agent: AgentId, pending: bool) -> AgentResult<()> {
        self.check(agent)?;
        self.pending[agent.index()] = pending;
        Ok(())
    }
}

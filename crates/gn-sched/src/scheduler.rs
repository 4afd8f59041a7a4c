//! The per-tick entry point for path planning.
//!
//! # Tick phases
//!
//! 1. **Scan**: every live agent away from its destination with no path and
//!    no outstanding request is enqueued (FIFO) and marked pending.
//! 2. **Service**: up to `max_requests_per_tick` requests are dequeued and
//!    planned from the agent's position and destination at that moment.
//!    Success attaches the route; failure (including an empty route) resets
//!    the agent's destination to its position.  There is no automatic retry.
//! 3. **Defer**: anything still queued waits for the next tick in arrival
//!    order.

use gn_agent::{ActivePath, AgentStore};
use gn_core::{AgentId, GridPos, PlannerConfig};
use gn_grid::GridMap;
use gn_path::{Navigator, PathResult, Route};
use tracing::{debug, trace};

use crate::{PathRequest, RequestQueue, RequestState, SchedError, SchedResult};

/// What one call to [`RequestScheduler::process`] did.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct TickReport {
    /// Requests added by this tick's scan.
    pub enqueued: usize,
    /// Requests dequeued and planned (never more than the per-tick cap).
    pub serviced: usize,
    /// Agents that received a path, in service order.
    pub attached: Vec<AgentId>,
    /// Agents whose request failed, in service order.
    pub failed:   Vec<AgentId>,
    /// Requests left queued for later ticks.
    pub deferred: usize,
}

/// Owns the planner and the request FIFO.
#[derive(Debug)]
pub struct RequestScheduler {
    navigator:    Navigator,
    queue:        RequestQueue,
    max_per_tick: usize,
}

impl RequestScheduler {
    /// Build the planner for `grid`.
    ///
    /// # Errors
    ///
    /// [`SchedError::Config`] if `config` fails validation.
    pub fn new(grid: &GridMap, config: &PlannerConfig) -> SchedResult<Self> {
        config.validate()?;
        Ok(Self {
            navigator:    Navigator::new(grid, config)?,
            queue:        RequestQueue::new(),
            max_per_tick: config.max_requests_per_tick,
        })
    }

    // ── Requests ──────────────────────────────────────────────────────────

    /// Queue a request for `agent` toward its destination.
    ///
    /// Returns `Ok(false)` without queuing if the agent already has an
    /// active path, already has a request queued or in flight, or is
    /// already at its destination.
    ///
    /// # Errors
    ///
    /// [`SchedError::UnknownAgent`] if `agent` is not a live agent.
    pub fn enqueue(&mut self, store: &mut AgentStore, agent: AgentId) -> SchedResult<bool> {
        if !store.is_alive(agent) {
            return Err(SchedError::UnknownAgent(agent));
        }
        let i = agent.index();
        let (start, destination) = (store.position[i], store.destination[i]);
        if start == destination || store.has_path(agent) {
            return Ok(false);
        }
        if !self.queue.enqueue(PathRequest { agent, start, destination }) {
            return Ok(false);
        }
        store.set_pending(agent, true)?;
        Ok(true)
    }

    /// Drop `agent`'s queued request and clear its pending marker.
    ///
    /// Returns `true` if a queued request was removed.
    pub fn cancel(&mut self, store: &mut AgentStore, agent: AgentId) -> bool {
        let removed = self.queue.cancel(agent);
        if removed && store.is_alive(agent) {
            store.pending[agent.index()] = false;
        }
        removed
    }

    #[inline]
    pub fn state(&self, agent: AgentId) -> RequestState {
        self.queue.state(agent)
    }

    // ── Tick ──────────────────────────────────────────────────────────────

    /// Run one tick: scan, service up to the cap, defer the rest.
    pub fn process(&mut self, store: &mut AgentStore, grid: &GridMap) -> SchedResult<TickReport> {
        let mut report = TickReport::default();

        let needy: Vec<AgentId> = store.live_agents().filter(|&a| store.needs_path(a)).collect();
        for agent in needy {
            if self.enqueue(store, agent)? {
                report.enqueued += 1;
            }
        }

        while report.serviced < self.max_per_tick {
            let Some(request) = self.queue.dequeue() else { break };
            let agent = request.agent;
            if !store.is_alive(agent) {
                // Removed without cancelling; nothing to plan for.
                self.queue.finish(agent, RequestState::Absent);
                continue;
            }
            let i = agent.index();
            store.pending[i] = false;

            // Plan from where the agent stands now, not where it was queued.
            let (start, destination) = (store.position[i], store.destination[i]);
            if start == destination {
                self.queue.finish(agent, RequestState::Absent);
                continue;
            }
            report.serviced += 1;

            match self.plan(grid, start, destination) {
                Ok(route) if !route.is_empty() => {
                    trace!(%agent, waypoints = route.len(), "path attached");
                    store.attach_path(agent, ActivePath::new(start, route.into_waypoints()))?;
                    self.queue.finish(agent, RequestState::Attached);
                    report.attached.push(agent);
                }
                outcome => {
                    if let Err(e) = outcome {
                        trace!(%agent, error = %e, "path request failed");
                    }
                    store.reset_destination(agent)?;
                    self.queue.finish(agent, RequestState::Failed);
                    report.failed.push(agent);
                }
            }
        }

        report.deferred = self.queue.len();
        debug!(
            enqueued = report.enqueued,
            serviced = report.serviced,
            attached = report.attached.len(),
            failed = report.failed.len(),
            deferred = report.deferred,
            "scheduler tick"
        );
        Ok(report)
    }

    // ── Planning surface ──────────────────────────────────────────────────

    /// Full pipeline (strategy choice, search, smoothing) without touching
    /// any agent.
    pub fn plan(&mut self, grid: &GridMap, start: GridPos, end: GridPos) -> PathResult<Route> {
        self.navigator.plan(grid, start, end)
    }

    /// Cached direct search.
    pub fn find_path(&mut self, grid: &GridMap, start: GridPos, end: GridPos) -> PathResult<Route> {
        self.navigator.find_path(grid, start, end)
    }

    /// Drop every cached route.  Call after any walkability change.
    pub fn invalidate_cache(&mut self) {
        self.navigator.invalidate_cache();
    }

    pub fn navigator(&self) -> &Navigator {
        &self.navigator
    }

    pub fn queue(&self) -> &RequestQueue {
        &self.queue
    }

    #[inline]
    pub fn max_per_tick(&self) -> usize {
        self.max_per_tick
    }
}

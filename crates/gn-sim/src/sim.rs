//! The `Sim` struct and its tick loop.

use gn_agent::{AgentStore, MovementReport, step_all};
use gn_core::{AgentId, GridPos, SimClock, SimConfig, Tick};
use gn_grid::GridMap;
use gn_path::{PathResult, Route};
use gn_sched::{RequestScheduler, TickReport};
use tracing::{debug, info};

use crate::{EventBuffers, SimError, SimEvent, SimObserver, SimResult};

/// Everything one tick did, handed to [`SimObserver::on_tick_end`].
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct TickSummary {
    /// Events delivered at the start of the tick.
    pub events_delivered: usize,
    pub schedule:         TickReport,
    pub movement:         MovementReport,
}

// ── Sim ───────────────────────────────────────────────────────────────────────

/// The main simulation runner.
///
/// Owns the grid, the agents, the request scheduler (and through it the
/// planner and path cache), the clock and the event buffers.  All mutation
/// of shared planning state happens on the caller's thread, one tick at a
/// time.
///
/// Create via [`SimBuilder`][crate::SimBuilder].
pub struct Sim {
    /// Global configuration (total ticks, seed, tick interval, planner).
    pub config: SimConfig,

    /// Simulation clock: current tick and elapsed time.
    pub clock: SimClock,

    pub(crate) grid:      GridMap,
    pub(crate) agents:    AgentStore,
    pub(crate) scheduler: RequestScheduler,
    pub(crate) events:    EventBuffers,
}

impl Sim {
    // ── Public API ────────────────────────────────────────────────────────

    /// Run the simulation from the current tick to `config.end_tick()`.
    ///
    /// Events still buffered after the last tick are delivered before
    /// [`SimObserver::on_sim_end`].
    pub fn run<O: SimObserver>(&mut self, observer: &mut O) -> SimResult<()> {
        info!(
            from = %self.clock.current_tick,
            to = %self.config.end_tick(),
            agents = self.agents.live_count(),
            "simulation started"
        );
        while self.clock.current_tick < self.config.end_tick() {
            self.step(observer)?;
        }

        let last = self.clock.current_tick;
        self.deliver_events(last, observer);
        observer.on_sim_end(last);
        info!(
            final_tick = %last,
            elapsed_ms = self.clock.elapsed_ms(),
            cache = ?self.scheduler.navigator().cache_stats(),
            "simulation finished"
        );
        Ok(())
    }

    /// Run exactly `n` ticks from the current position (ignores `end_tick`).
    ///
    /// Useful for tests and incremental stepping.
    pub fn run_ticks<O: SimObserver>(&mut self, n: u64, observer: &mut O) -> SimResult<()> {
        for _ in 0..n {
            self.step(observer)?;
        }
        Ok(())
    }

    /// Process one tick and advance the clock.
    pub fn step<O: SimObserver>(&mut self, observer: &mut O) -> SimResult<TickSummary> {
        let now = self.clock.current_tick;
        observer.on_tick_start(now);
        let summary = self.process_tick(now, observer)?;
        observer.on_tick_end(now, &summary);
        self.clock.advance();
        Ok(summary)
    }

    #[inline]
    pub fn now(&self) -> Tick {
        self.clock.current_tick
    }

    pub fn grid(&self) -> &GridMap {
        &self.grid
    }

    pub fn agents(&self) -> &AgentStore {
        &self.agents
    }

    pub fn scheduler(&self) -> &RequestScheduler {
        &self.scheduler
    }

    // ── Terrain ───────────────────────────────────────────────────────────

    /// Set the walkability of `pos`.
    ///
    /// If the value changed, the path cache is cleared before this returns
    /// and a [`SimEvent::CellChanged`] is delivered at the next tick start.
    /// Agents already walking through `pos` discover the wall when they try
    /// to step onto it.
    pub fn set_walkable(&mut self, pos: GridPos, walkable: bool) -> SimResult<bool> {
        let changed = self.grid.set_walkable(pos, walkable)?;
        if changed {
            self.scheduler.invalidate_cache();
        }
        Ok(changed)
    }

    // ── Agents ────────────────────────────────────────────────────────────

    /// Add an agent standing on `position` and heading for `destination`.
    pub fn spawn_agent(&mut self, position: GridPos, destination: GridPos) -> SimResult<AgentId> {
        if !self.grid.is_walkable(position) {
            return Err(SimError::InvalidPosition(position));
        }
        if !self.grid.in_bounds(destination) {
            return Err(SimError::InvalidPosition(destination));
        }
        Ok(self.agents.spawn(position, destination))
    }

    /// Remove `agent`, cancelling any queued request.
    pub fn remove_agent(&mut self, agent: AgentId) -> SimResult<()> {
        self.scheduler.cancel(&mut self.agents, agent);
        self.agents.remove(agent)?;
        self.events.emit_now(SimEvent::AgentRemoved(agent));
        Ok(())
    }

    /// Send `agent` somewhere new.  A queued request or active path for the
    /// old destination is dropped; the agent is re-requested next tick.
    pub fn set_destination(&mut self, agent: AgentId, destination: GridPos) -> SimResult<()> {
        if !self.grid.in_bounds(destination) {
            return Err(SimError::InvalidPosition(destination));
        }
        self.agents.check(agent)?;
        self.scheduler.cancel(&mut self.agents, agent);
        self.agents.set_destination(agent, destination)?;
        Ok(())
    }

    /// Cached direct search over the current grid.
    pub fn find_path(&mut self, start: GridPos, end: GridPos) -> PathResult<Route> {
        self.scheduler.find_path(&self.grid, start, end)
    }

    // ── Core tick processing ──────────────────────────────────────────────

    fn process_tick<O: SimObserver>(&mut self, now: Tick, observer: &mut O) -> SimResult<TickSummary> {
        // ── Phase 1: events ───────────────────────────────────────────────
        let events_delivered = self.deliver_events(now, observer);

        // ── Phase 2: schedule ─────────────────────────────────────────────
        let schedule = self.scheduler.process(&mut self.agents, &self.grid)?;

        // ── Phase 3: movement ─────────────────────────────────────────────
        let movement = step_all(&mut self.agents, &self.grid);

        // ── Phase 4: emit outcomes for the next tick ──────────────────────
        for &agent in &schedule.attached {
            let waypoints = self.agents.path(agent).map_or(0, |p| p.waypoints.len());
            self.events.emit_next(SimEvent::PathAttached { agent, waypoints });
        }
        for &agent in &schedule.failed {
            self.events.emit_next(SimEvent::PathFailed { agent });
        }
        for &agent in &movement.blocked {
            self.events.emit_next(SimEvent::PathBlocked { agent });
        }

        debug!(
            tick = %now,
            attached = schedule.attached.len(),
            failed = schedule.failed.len(),
            moved = movement.moved,
            blocked = movement.blocked.len(),
            "tick processed"
        );
        Ok(TickSummary { events_delivered, schedule, movement })
    }

    /// Rotate the buffers, fold in pending grid changes and deliver.
    fn deliver_events<O: SimObserver>(&mut self, now: Tick, observer: &mut O) -> usize {
        self.events.rotate();
        for change in self.grid.drain_changes() {
            self.events.emit_now(SimEvent::CellChanged(change));
        }
        let due = self.events.take_current();
        for event in &due {
            observer.on_event(now, event);
        }
        due.len()
    }
}

impl std::fmt::Debug for Sim {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Sim")
            .field("now", &self.clock.current_tick)
            .field("grid", &self.grid)
            .field("agents", &self.agents.live_count())
            .field("queued", &self.scheduler.queue().len())
            .finish_non_exhaustive()
    }
}

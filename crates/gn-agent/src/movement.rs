//! Waypoint following: one cell per agent per tick.
//!
//! An agent standing on its current waypoint advances the cursor; when the
//! last waypoint has been reached the path is detached.  Otherwise it takes
//! the next cell of the current leg's rasterized line (see
//! [`ActivePath::next_cell`](crate::ActivePath::next_cell)).  A blocked step
//! discards the path; the destination is left alone so the agent is
//! re-requested on the next tick.

use gn_core::AgentId;
use gn_grid::GridMap;

use crate::AgentStore;

/// What one movement step did for one agent.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum StepOutcome {
    /// Dead or no active path.
    Idle,
    /// Stepped one cell toward the current waypoint.
    Moved,
    /// Reached the final waypoint; the path was detached.
    Arrived,
    /// The next cell was not walkable; the path was discarded.
    Blocked,
}

/// Aggregated outcomes of [`step_all`].
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct MovementReport {
    pub moved:   usize,
    pub arrived: Vec<AgentId>,
    pub blocked: Vec<AgentId>,
}

/// Advance one agent along its active path.
pub fn step_agent(store: &mut AgentStore, grid: &GridMap, agent: AgentId) -> StepOutcome {
    if !store.is_alive(agent) {
        return StepOutcome::Idle;
    }
    let i = agent.index();
    let here = store.position[i];

    let Some(path) = store.path_mut(agent) else {
        return StepOutcome::Idle;
    };
    if path.next_waypoint() == Some(here) {
        path.advance();
    }
    let Some(target) = path.next_cell(here) else {
        store.detach_path(agent);
        return StepOutcome::Arrived;
    };

    if grid.is_walkable(target) {
        store.position[i] = target;
        StepOutcome::Moved
    } else {
        store.detach_path(agent);
        StepOutcome::Blocked
    }
}

/// Step every live agent with an active path, in ascending ID order.
pub fn step_all(store: &mut AgentStore, grid: &GridMap) -> MovementReport {
    let walking: Vec<AgentId> = store.live_agents().filter(|&a| store.has_path(a)).collect();
    let mut report = MovementReport::default();
    for agent in walking {
        match step_agent(store, grid, agent) {
            StepOutcome::Moved => report.moved += 1,
            StepOutcome::Arrived => report.arrived.push(agent),
            StepOutcome::Blocked => report.blocked.push(agent),
            StepOutcome::Idle => {}
        }
    }
    report
}

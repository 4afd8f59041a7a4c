//! Closed event set and the two-phase delivery buffers.
//!
//! Events raised while a tick is running go into the *next* buffer and are
//! delivered at the start of the following tick.  Events raised between
//! ticks (an agent removed by the application, a terrain edit) go into the
//! *current* buffer and are delivered at the start of the next tick as well,
//! after anything already deferred.  Both buffers preserve insertion order.

use gn_core::AgentId;
use gn_grid::CellChange;

/// Everything the simulation reports to observers.
#[derive(Clone, Debug, PartialEq)]
pub enum SimEvent {
    /// A cell's walkability changed.
    CellChanged(CellChange),
    /// A planned path was attached to `agent`.
    PathAttached { agent: AgentId, waypoints: usize },
    /// Planning failed; `agent`'s destination was reset to its position.
    PathFailed { agent: AgentId },
    /// `agent`'s next step was blocked and its path discarded.
    PathBlocked { agent: AgentId },
    /// `agent` was removed from the simulation.
    AgentRemoved(AgentId),
}

#[derive(Debug, Default)]
pub struct EventBuffers {
    current: Vec<SimEvent>,
    next:    Vec<SimEvent>,
}

impl EventBuffers {
    pub fn new() -> Self {
        Self::default()
    }

    /// Queue for the current delivery round.
    pub fn emit_now(&mut self, event: SimEvent) {
        self.current.push(event);
    }

    /// Queue for the delivery round after the current one.
    pub fn emit_next(&mut self, event: SimEvent) {
        self.next.push(event);
    }

    /// Promote deferred events: the current buffer becomes everything from
    /// `next` followed by whatever was already current.
    pub fn rotate(&mut self) {
        let mut due = std::mem::take(&mut self.next);
        due.append(&mut self.current);
        self.current = due;
    }

    /// Take the current buffer for delivery.
    pub fn take_current(&mut self) -> Vec<SimEvent> {
        std::mem::take(&mut self.current)
    }

    /// Total events waiting in either buffer.
    pub fn len(&self) -> usize {
        self.current.len() + self.next.len()
    }

    pub fn is_empty(&self) -> bool {
        self.current.is_empty() && self.next.is_empty()
    }
}

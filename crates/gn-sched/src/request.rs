//! Per-agent request lifecycle.

use gn_core::{AgentId, GridPos};

/// Where an agent's path request stands.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum RequestState {
    /// No request has been made, or a queued one was cancelled.
    #[default]
    Absent,
    /// Waiting in the FIFO.
    Queued,
    /// Dequeued this tick and being planned.
    InFlight,
    /// Planning succeeded and the path was attached to the agent.
    Attached,
    /// Planning failed and the agent's destination was reset.
    Failed,
}

impl RequestState {
    /// `true` while a request is queued or being planned.  A new request for
    /// the same agent is rejected in these states.
    #[inline]
    pub fn is_outstanding(self) -> bool {
        matches!(self, RequestState::Queued | RequestState::InFlight)
    }
}

/// A snapshot of what an agent asked for at enqueue time.
///
/// Servicing re-reads the agent's position and destination, so `start` and
/// `destination` are only a record of the request as queued.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct PathRequest {
    pub agent:       AgentId,
    pub start:       GridPos,
    pub destination: GridPos,
}

//! `RequestQueue`: FIFO of path requests with one outstanding entry per agent.
//!
//! States are kept in a dense `Vec` indexed by `AgentId`, grown on demand as
//! new agents appear, so duplicate checks are O(1).  Cancellation is the only
//! out-of-order removal and is O(queue length).

use std::collections::VecDeque;

use gn_core::AgentId;

use crate::{PathRequest, RequestState};

#[derive(Debug, Default)]
pub struct RequestQueue {
    pending: VecDeque<PathRequest>,
    states:  Vec<RequestState>,
}

impl RequestQueue {
    pub fn new() -> Self {
        Self::default()
    }

    /// Lifecycle state of `agent`; `Absent` for agents never seen.
    #[inline]
    pub fn state(&self, agent: AgentId) -> RequestState {
        self.states.get(agent.index()).copied().unwrap_or_default()
    }

    fn set_state(&mut self, agent: AgentId, state: RequestState) {
        let i = agent.index();
        if i >= self.states.len() {
            self.states.resize(i + 1, RequestState::Absent);
        }
        self.states[i] = state;
    }

    /// Append `request` unless its agent already has one queued or in flight.
    ///
    /// Returns `true` if the request was queued.
    pub fn enqueue(&mut self, request: PathRequest) -> bool {
        if self.state(request.agent).is_outstanding() {
            return false;
        }
        self.set_state(request.agent, RequestState::Queued);
        self.pending.push_back(request);
        true
    }

    /// Take the oldest request and mark it in flight.
    pub fn dequeue(&mut self) -> Option<PathRequest> {
        let request = self.pending.pop_front()?;
        self.set_state(request.agent, RequestState::InFlight);
        Some(request)
    }

    /// Record how an in-flight request ended.
    pub fn finish(&mut self, agent: AgentId, outcome: RequestState) {
        self.set_state(agent, outcome);
    }

    /// Drop `agent`'s queued request, if any.  Returns `true` if one was
    /// removed.  In-flight requests cannot be cancelled.
    pub fn cancel(&mut self, agent: AgentId) -> bool {
        if self.state(agent) != RequestState::Queued {
            return false;
        }
        self.pending.retain(|r| r.agent != agent);
        self.set_state(agent, RequestState::Absent);
        true
    }

    /// Number of queued requests.
    #[inline]
    pub fn len(&self) -> usize {
        self.pending.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.pending.is_empty()
    }

    /// Queued requests, oldest first.
    pub fn iter(&self) -> impl Iterator<Item = &PathRequest> + '_ {
        self.pending.iter()
    }
}

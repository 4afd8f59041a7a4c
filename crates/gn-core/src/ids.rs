//! Agent identifiers.

use std::fmt;

/// Index of an agent in the agent store's columns.
///
/// IDs are handed out densely from 0 and never reused: a removed agent keeps
/// its slot, so an ID doubles as a `Vec` index for per-agent state anywhere
/// in the engine (request states, positions, pending markers).
#[derive(Copy, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct AgentId(pub u32);

impl AgentId {
    #[inline(always)]
    pub fn index(self) -> usize {
        self.0 as usize
    }
}

impl fmt::Display for AgentId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

impl From<AgentId> for usize {
    #[inline(always)]
    fn from(id: AgentId) -> usize {
        id.index()
    }
}

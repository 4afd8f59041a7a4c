use thiserror::Error;

use gn_core::{AgentId, GridPos};

#[derive(Debug, Error)]
pub enum AgentError {
    #[error("agent {0} does not exist or has been removed")]
    UnknownAgent(AgentId),

    #[error("agent position {0} is outside the grid")]
    OutOfBounds(GridPos),

    #[error("agent CSV parse error: {0}")]
    Parse(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

pub type AgentResult<T> = Result<T, AgentError>;

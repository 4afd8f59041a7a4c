use thiserror::Error;

use gn_agent::AgentError;
use gn_core::{AgentId, CoreError};
use gn_path::PathError;

#[derive(Debug, Error)]
pub enum SchedError {
    #[error("agent {0} does not exist or has been removed")]
    UnknownAgent(AgentId),

    #[error("configuration error: {0}")]
    Config(#[from] CoreError),

    #[error("planner setup error: {0}")]
    Path(#[from] PathError),

    #[error(transparent)]
    Agent(#[from] AgentError),
}

pub type SchedResult<T> = Result<T, SchedError>;

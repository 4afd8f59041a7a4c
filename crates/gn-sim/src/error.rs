use gn_agent::AgentError;
use gn_core::{CoreError, GridPos};
use gn_grid::GridError;
use gn_sched::SchedError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum SimError {
    #[error("simulation configuration error: {0}")]
    Config(#[from] CoreError),

    #[error("agent cannot stand on {0}: outside the grid or not walkable")]
    InvalidPosition(GridPos),

    #[error("grid error: {0}")]
    Grid(#[from] GridError),

    #[error("agent error: {0}")]
    Agent(#[from] AgentError),

    #[error("scheduler error: {0}")]
    Sched(#[from] SchedError),
}

pub type SimResult<T> = Result<T, SimError>;

//! CSV population loader.
//!
//! # CSV format
//!
//! One row per agent.  `agent_id` values must be exactly `0..n` (any row
//! order); they become the `AgentId`s of the returned store.
//!
//! ```csv
//! agent_id,x,y,dest_x,dest_y
//! 0,1,1,40,12
//! 1,5,30,5,30
//! ```
//!
//! An agent whose destination equals its position starts idle.  Positions
//! must lie inside the grid and be walkable; destinations only need to lie
//! inside the grid (an unreachable one fails at planning time).

use std::io::Read;
use std::path::Path;

use serde::Deserialize;

use gn_core::GridPos;
use gn_grid::GridMap;
use rustc_hash::FxHashMap;
use tracing::debug;

use crate::{AgentError, AgentResult, AgentStore, AgentStoreBuilder};

// ── CSV record ────────────────────────────────────────────────────────────────

#[derive(Deserialize)]
struct AgentRecord {
    agent_id: u32,
    x:        i32,
    y:        i32,
    dest_x:   i32,
    dest_y:   i32,
}

// ── Public API ────────────────────────────────────────────────────────────────

/// Load an [`AgentStore`] from a CSV file, validating against `grid`.
pub fn load_agents_csv(path: &Path, grid: &GridMap) -> AgentResult<AgentStore> {
    let file = std::fs::File::open(path)?;
    load_agents_reader(file, grid)
}

/// Like [`load_agents_csv`] but accepts any `Read` source.
pub fn load_agents_reader<R: Read>(reader: R, grid: &GridMap) -> AgentResult<AgentStore> {
    let mut csv_reader = csv::Reader::from_reader(reader);
    let mut by_id: FxHashMap<u32, (GridPos, GridPos)> = FxHashMap::default();

    for result in csv_reader.deserialize::<AgentRecord>() {
        let row = result.map_err(|e| AgentError::Parse(e.to_string()))?;
        let pos  = GridPos::new(row.x, row.y);
        let dest = GridPos::new(row.dest_x, row.dest_y);

        if !grid.in_bounds(pos) {
            return Err(AgentError::OutOfBounds(pos));
        }
        if !grid.is_walkable(pos) {
            return Err(AgentError::Parse(format!(
                "agent {} starts on unwalkable cell {pos}",
                row.agent_id
            )));
        }
        if !grid.in_bounds(dest) {
            return Err(AgentError::OutOfBounds(dest));
        }
        if by_id.insert(row.agent_id, (pos, dest)).is_some() {
            return Err(AgentError::Parse(format!("duplicate agent_id {}", row.agent_id)));
        }
    }

    let count = by_id.len();
    let mut builder = AgentStoreBuilder::with_capacity(count);
    for i in 0..count as u32 {
        let (pos, dest) = by_id.remove(&i).ok_or_else(|| {
            AgentError::Parse(format!("agent_id values must be 0..{count}; {i} is missing"))
        })?;
        builder = builder.agent(pos, dest);
    }

    debug!(agents = count, "agent population loaded");
    Ok(builder.build())
}

//! small: runnable demo for the gridnav path-planning engine.
//!
//! Scatters seeded random walls over a 96×64 grid, loads a handful of
//! agents from an embedded CSV and runs the tick loop.  Halfway through, a
//! wall is dropped across the middle of the map so agents have to replan.
//!
//! ```text
//! cargo run -p small                      # defaults
//! cargo run -p small -- config.json       # SimConfig override
//! RUST_LOG=gn_path=debug cargo run -p small
//! ```
//!
//! A config override is a JSON `SimConfig`; `planner` may be omitted:
//!
//! ```json
//! { "tick_interval_ms": 100, "total_ticks": 400, "seed": 7,
//!   "planner": { "cache_capacity": 500, "chunk_size": 16,
//!                "max_requests_per_tick": 4, "hierarchical_threshold": 20.0,
//!                "smooth_paths": true } }
//! ```

use std::fs::File;
use std::io::{BufReader, Cursor};
use std::time::Instant;

use anyhow::{Context, Result};
use tracing::info;
use tracing_subscriber::EnvFilter;

use gn_agent::load_agents_reader;
use gn_core::{AgentId, GridPos, SimConfig, SimRng, Tick};
use gn_grid::GridMap;
use gn_sim::{SimBuilder, SimEvent, SimObserver, TickSummary};

// ── Constants ─────────────────────────────────────────────────────────────────

const GRID_WIDTH:     i32 = 96;
const GRID_HEIGHT:    i32 = 64;
const WALL_DENSITY:   f64 = 0.18;
const TOTAL_TICKS:    u64 = 300;
const REPORT_EVERY:   u64 = 50;

// ── Agents CSV ────────────────────────────────────────────────────────────────

// Start cells are cleared after the walls are placed, so every row loads.
const AGENTS_CSV: &str = "\
agent_id,x,y,dest_x,dest_y\n\
0,2,2,90,60\n\
1,90,2,4,58\n\
2,10,32,85,32\n\
3,48,4,48,60\n\
4,5,60,60,5\n\
5,30,30,36,34\n\
6,70,50,70,50\n\
7,1,40,94,12\n\
";

// ── Observer ──────────────────────────────────────────────────────────────────

/// Tallies delivered events and prints a line every `REPORT_EVERY` ticks.
#[derive(Default)]
struct ProgressPrinter {
    attached:  usize,
    failed:    usize,
    blocked:   usize,
    changed:   usize,
    arrived:   usize,
    planned:   usize,
}

impl SimObserver for ProgressPrinter {
    fn on_event(&mut self, _tick: Tick, event: &SimEvent) {
        match event {
            SimEvent::PathAttached { .. } => self.attached += 1,
            SimEvent::PathFailed { .. } => self.failed += 1,
            SimEvent::PathBlocked { .. } => self.blocked += 1,
            SimEvent::CellChanged(_) => self.changed += 1,
            SimEvent::AgentRemoved(_) => {}
        }
    }

    fn on_tick_end(&mut self, tick: Tick, summary: &TickSummary) {
        self.planned += summary.schedule.serviced;
        self.arrived += summary.movement.arrived.len();
        if tick.0 % REPORT_EVERY == 0 {
            println!(
                "{tick:>6}  moved {:>3}  queued {:>3}  attached {:>4}  failed {:>3}  blocked {:>3}",
                summary.movement.moved,
                summary.schedule.deferred,
                self.attached,
                self.failed,
                self.blocked,
            );
        }
    }

    fn on_sim_end(&mut self, final_tick: Tick) {
        println!("{final_tick:>6}  done");
    }
}

// ── Setup ─────────────────────────────────────────────────────────────────────

fn load_config() -> Result<SimConfig> {
    let Some(path) = std::env::args().nth(1) else {
        return Ok(SimConfig { total_ticks: TOTAL_TICKS, ..SimConfig::default() });
    };
    let file = File::open(&path).with_context(|| format!("opening config {path}"))?;
    let config: SimConfig = serde_json::from_reader(BufReader::new(file))
        .with_context(|| format!("parsing config {path}"))?;
    info!(%path, "loaded config override");
    Ok(config)
}

fn random_walls(rng: &mut SimRng) -> Result<GridMap> {
    let mut grid = GridMap::new(GRID_WIDTH, GRID_HEIGHT)?;
    for y in 0..GRID_HEIGHT {
        for x in 0..GRID_WIDTH {
            if rng.gen_bool(WALL_DENSITY) {
                grid.set_walkable(GridPos::new(x, y), false)?;
            }
        }
    }
    Ok(grid)
}

/// Clear every start and destination cell named in the embedded CSV.
fn clear_agent_cells(grid: &mut GridMap) -> Result<()> {
    for line in AGENTS_CSV.lines().skip(1) {
        let v: Vec<i32> = line.split(',').map(str::parse).collect::<Result<_, _>>()?;
        if let [_, x, y, dx, dy] = v[..] {
            grid.set_walkable(GridPos::new(x, y), true)?;
            grid.set_walkable(GridPos::new(dx, dy), true)?;
        }
    }
    Ok(())
}

// ── main ──────────────────────────────────────────────────────────────────────

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let config = load_config()?;
    println!("=== small: gridnav path planning ===");
    println!(
        "Grid: {GRID_WIDTH}×{GRID_HEIGHT}  |  Ticks: {}  |  Seed: {}  |  Cap: {}/tick",
        config.total_ticks, config.seed, config.planner.max_requests_per_tick
    );

    // 1. World.
    let mut rng = SimRng::new(config.seed);
    let mut grid = random_walls(&mut rng)?;
    clear_agent_cells(&mut grid)?;
    println!("Walkable cells: {} / {}", grid.walkable_count(), grid.cell_count());

    // 2. Agents.
    let agents = load_agents_reader(Cursor::new(AGENTS_CSV), &grid)?;
    let agent_count = agents.count;
    println!("Loaded {agent_count} agents");
    println!();

    // 3. Sim.
    let mut sim = SimBuilder::new(config.clone(), grid).agents(agents).build()?;
    let mut obs = ProgressPrinter::default();

    // 4. Run the first half, drop a wall across the middle, run the rest.
    let t0 = Instant::now();
    let half = config.total_ticks / 2;
    sim.run_ticks(half, &mut obs)?;

    let mid = GRID_WIDTH / 2;
    for y in 0..GRID_HEIGHT - 8 {
        sim.set_walkable(GridPos::new(mid, y), false)?;
    }
    info!(column = mid, tick = %sim.now(), "wall dropped");

    sim.run(&mut obs)?;
    let elapsed = t0.elapsed();

    // 5. Summary.
    let stats = sim.scheduler().navigator().cache_stats();
    println!();
    println!("Simulation complete in {:.3} s", elapsed.as_secs_f64());
    println!("  requests planned : {}", obs.planned);
    println!("  arrivals         : {}", obs.arrived);
    println!("  cells changed    : {}", obs.changed);
    println!(
        "  cache            : {} hits, {} misses, {} evictions, {} invalidations ({:.1}% hit rate)",
        stats.hits,
        stats.misses,
        stats.evictions,
        stats.invalidations,
        stats.hit_rate() * 100.0
    );
    println!();

    // 6. Final positions.
    let agents = sim.agents();
    println!("{:<8} {:<12} {:<12} {:<8}", "Agent", "Position", "Destination", "Status");
    println!("{}", "-".repeat(44));
    for i in 0..agent_count {
        let id = AgentId(i as u32);
        let (pos, dest) = (agents.position[i], agents.destination[i]);
        let status = if agents.has_path(id) {
            "walking"
        } else if pos == dest {
            "idle"
        } else {
            "waiting"
        };
        println!("{:<8} {:<12} {:<12} {:<8}", i, pos.to_string(), dest.to_string(), status);
    }

    Ok(())
}

//! Simulation and planner configuration.
//!
//! Typically built in code or loaded from JSON by the application crate
//! (with the `serde` feature) and handed to `gn-sim`'s builder, which calls
//! [`PlannerConfig::validate`] once before anything is constructed.

use crate::{CoreError, CoreResult, SimClock, Tick};

// ── PlannerConfig ─────────────────────────────────────────────────────────────

/// Tunables for caching, hierarchical routing, and admission control.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct PlannerConfig {
    /// Maximum number of memoized `(start, end)` results.  `0` disables
    /// caching entirely.
    pub cache_capacity: usize,

    /// Side length, in cells, of one square chunk of the hierarchical planner.
    pub chunk_size: u32,

    /// Admission cap: path searches serviced per tick.
    pub max_requests_per_tick: usize,

    /// Requests whose Euclidean start→end distance is strictly greater than
    /// this (in cells) go through the hierarchical planner.
    pub hierarchical_threshold: f32,

    /// Run the line-of-sight smoother on every planned path.
    pub smooth_paths: bool,
}

impl Default for PlannerConfig {
    fn default() -> Self {
        Self {
            cache_capacity:         1_000,
            chunk_size:             16,
            max_requests_per_tick:  20,
            hierarchical_threshold: 20.0,
            smooth_paths:           true,
        }
    }
}

impl PlannerConfig {
    /// Reject values the planner cannot operate with.
    pub fn validate(&self) -> CoreResult<()> {
        if self.chunk_size == 0 {
            return Err(CoreError::Config("chunk_size must be at least 1".into()));
        }
        if self.max_requests_per_tick == 0 {
            return Err(CoreError::Config(
                "max_requests_per_tick must be at least 1".into(),
            ));
        }
        if !self.hierarchical_threshold.is_finite() || self.hierarchical_threshold < 0.0 {
            return Err(CoreError::Config(format!(
                "hierarchical_threshold must be a non-negative number, got {}",
                self.hierarchical_threshold
            )));
        }
        Ok(())
    }
}

// ── SimConfig ─────────────────────────────────────────────────────────────────

/// Top-level simulation configuration.
#[derive(Clone, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SimConfig {
    /// Milliseconds of simulated time per tick.
    pub tick_interval_ms: u32,

    /// Total ticks to simulate with `Sim::run`.
    pub total_ticks: u64,

    /// Master RNG seed.  The same seed always produces identical worlds.
    pub seed: u64,

    /// Planner tunables.
    #[cfg_attr(feature = "serde", serde(default))]
    pub planner: PlannerConfig,
}

impl Default for SimConfig {
    fn default() -> Self {
        Self {
            tick_interval_ms: 100,
            total_ticks:      1_000,
            seed:             42,
            planner:          PlannerConfig::default(),
        }
    }
}

impl SimConfig {
    /// The tick at which the simulation ends (exclusive upper bound).
    #[inline]
    pub fn end_tick(&self) -> Tick {
        Tick(self.total_ticks)
    }

    /// Construct a `SimClock` pre-configured for this run.
    pub fn make_clock(&self) -> SimClock {
        SimClock::new(self.tick_interval_ms)
    }

    pub fn validate(&self) -> CoreResult<()> {
        if self.tick_interval_ms == 0 {
            return Err(CoreError::Config("tick_interval_ms must be at least 1".into()));
        }
        self.planner.validate()
    }
}

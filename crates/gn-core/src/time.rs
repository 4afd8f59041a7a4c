//! Discrete time: ticks and the fixed interval each one stands for.
//!
//! The planning core never reads wall-clock time.  One `Tick` is one pass
//! of the scheduler and the movement step; the interval only matters to
//! callers converting ticks to simulated milliseconds:
//!
//!   elapsed_ms = tick * tick_interval_ms

use std::fmt;

/// Absolute tick counter, starting at 0.
#[derive(Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Debug, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Tick(pub u64);

impl Tick {
    pub const ZERO: Tick = Tick(0);

    #[inline]
    pub fn next(self) -> Tick {
        Tick(self.0 + 1)
    }
}

impl fmt::Display for Tick {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "T{}", self.0)
    }
}

// ── SimClock ──────────────────────────────────────────────────────────────────

/// The current tick plus the stable interval handed to time-scaled code.
#[derive(Clone, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SimClock {
    /// Milliseconds of simulated time per tick.
    pub tick_interval_ms: u32,
    /// Advanced once per loop iteration by the tick driver.
    pub current_tick: Tick,
}

impl SimClock {
    pub fn new(tick_interval_ms: u32) -> Self {
        Self { tick_interval_ms, current_tick: Tick::ZERO }
    }

    #[inline]
    pub fn advance(&mut self) {
        self.current_tick = self.current_tick.next();
    }

    /// Simulated milliseconds since tick 0.
    #[inline]
    pub fn elapsed_ms(&self) -> u64 {
        self.current_tick.0 * u64::from(self.tick_interval_ms)
    }
}

impl fmt::Display for SimClock {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} (+{} ms)", self.current_tick, self.elapsed_ms())
    }
}

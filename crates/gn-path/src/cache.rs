//! Memoizing router wrapper.
//!
//! [`PathCache`] keys results on the literal `(start, end)` pair and evicts
//! the oldest insertion once `capacity` is reached.  Entries are tied to the
//! grid revision they were computed against: the first lookup after any
//! walkability change drops every entry, so a stale route is never served.
//! Owners that observe edits directly can also call
//! [`invalidate`](PathCache::invalidate) eagerly.

use std::collections::VecDeque;

use gn_core::GridPos;
use gn_grid::GridMap;
use rustc_hash::FxHashMap;
use tracing::debug;

use crate::{AStarRouter, PathResult, Route, Router};

/// Running counters, never reset by invalidation.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct CacheStats {
    pub hits:          u64,
    pub misses:        u64,
    pub evictions:     u64,
    /// Number of times a non-empty cache was cleared.
    pub invalidations: u64,
}

impl CacheStats {
    /// Fraction of lookups served from the cache; `0.0` before any lookup.
    pub fn hit_rate(&self) -> f64 {
        let total = self.hits + self.misses;
        if total == 0 { 0.0 } else { self.hits as f64 / total as f64 }
    }
}

/// FIFO-evicting cache in front of another [`Router`].
pub struct PathCache<R: Router = AStarRouter> {
    inner:    R,
    entries:  FxHashMap<(GridPos, GridPos), Vec<GridPos>>,
    /// Keys in insertion order; front is evicted first.
    order:    VecDeque<(GridPos, GridPos)>,
    capacity: usize,
    /// Grid revision and dimensions the entries were computed against.
    revision: u64,
    dims:     (i32, i32),
    stats:    CacheStats,
}

impl<R: Router> PathCache<R> {
    /// Wrap `inner`.  A capacity of 0 disables storage; every lookup misses.
    pub fn new(inner: R, capacity: usize) -> Self {
        Self {
            inner,
            entries: FxHashMap::default(),
            order: VecDeque::with_capacity(capacity.min(4096)),
            capacity,
            revision: 0,
            dims: (0, 0),
            stats: CacheStats::default(),
        }
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    #[inline]
    pub fn capacity(&self) -> usize {
        self.capacity
    }

    #[inline]
    pub fn stats(&self) -> CacheStats {
        self.stats
    }

    /// `true` if a result for exactly `(start, end)` is stored.
    pub fn contains(&self, start: GridPos, end: GridPos) -> bool {
        self.entries.contains_key(&(start, end))
    }

    pub fn inner(&self) -> &R {
        &self.inner
    }

    /// Drop every entry.
    pub fn invalidate(&mut self) {
        if self.entries.is_empty() {
            return;
        }
        debug!(dropped = self.entries.len(), "path cache invalidated");
        self.entries.clear();
        self.order.clear();
        self.stats.invalidations += 1;
    }

    /// Clear if `grid` has changed since entries were stored.
    fn sync(&mut self, grid: &GridMap) {
        let dims = (grid.width(), grid.height());
        if self.revision != grid.revision() || self.dims != dims {
            self.invalidate();
            self.revision = grid.revision();
            self.dims = dims;
        }
    }

    fn insert(&mut self, key: (GridPos, GridPos), waypoints: Vec<GridPos>) {
        if self.capacity == 0 {
            return;
        }
        if self.entries.len() >= self.capacity {
            while let Some(oldest) = self.order.pop_front() {
                if self.entries.remove(&oldest).is_some() {
                    self.stats.evictions += 1;
                    break;
                }
            }
        }
        self.entries.insert(key, waypoints);
        self.order.push_back(key);
    }
}

impl<R: Router> Router for PathCache<R> {
    fn route(&mut self, grid: &GridMap, from: GridPos, to: GridPos) -> PathResult<Route> {
        self.sync(grid);

        let key = (from, to);
        if let Some(waypoints) = self.entries.get(&key) {
            self.stats.hits += 1;
            return Ok(Route::new(waypoints.clone()));
        }

        self.stats.misses += 1;
        let route = self.inner.route(grid, from, to)?;
        self.insert(key, route.waypoints.clone());
        Ok(route)
    }
}

impl<R: Router> std::fmt::Debug for PathCache<R> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PathCache")
            .field("len", &self.entries.len())
            .field("capacity", &self.capacity)
            .field("revision", &self.revision)
            .field("stats", &self.stats)
            .finish_non_exhaustive()
    }
}

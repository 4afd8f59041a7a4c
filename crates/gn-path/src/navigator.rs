//! One entry point over cache, hierarchy, and smoother.

use gn_core::{GridPos, PlannerConfig};
use gn_grid::GridMap;
use tracing::trace;

use crate::{
    AStarRouter, CacheStats, HierarchicalPlanner, PathCache, PathResult, PathSmoother, Route,
    Router,
};

/// Which planner a query was routed to.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Strategy {
    /// Single cached A* over the full grid.
    Direct,
    /// Chunk route with stitched cached segments.
    Hierarchical,
}

/// Owns the shared [`PathCache`], the [`HierarchicalPlanner`] built for one
/// grid, and the [`PathSmoother`].
///
/// The hierarchical planner routes its segments through the same cache as
/// direct queries, so a terrain edit invalidates both at once.
#[derive(Debug)]
pub struct Navigator {
    cache:     PathCache<AStarRouter>,
    hierarchy: HierarchicalPlanner,
    smoother:  PathSmoother,
    threshold: f32,
    smooth:    bool,
}

impl Navigator {
    /// Build the chunk graph for `grid` and an empty cache.
    ///
    /// `config` is expected to be validated already; a zero chunk size is
    /// still reported as [`PathError::InvalidChunkSize`](crate::PathError).
    pub fn new(grid: &GridMap, config: &PlannerConfig) -> PathResult<Self> {
        Ok(Self {
            cache:     PathCache::new(AStarRouter, config.cache_capacity),
            hierarchy: HierarchicalPlanner::new(grid, config.chunk_size)?,
            smoother:  PathSmoother,
            threshold: config.hierarchical_threshold,
            smooth:    config.smooth_paths,
        })
    }

    /// Cached direct search.  The route is unsmoothed and 4-connected.
    pub fn find_path(&mut self, grid: &GridMap, start: GridPos, end: GridPos) -> PathResult<Route> {
        self.cache.route(grid, start, end)
    }

    /// Hierarchical iff the straight-line distance exceeds the threshold.
    pub fn strategy_for(&self, start: GridPos, end: GridPos) -> Strategy {
        if start.euclidean(end) > self.threshold {
            Strategy::Hierarchical
        } else {
            Strategy::Direct
        }
    }

    /// Full planning pipeline: pick a strategy, search, then smooth if
    /// enabled.
    pub fn plan(&mut self, grid: &GridMap, start: GridPos, end: GridPos) -> PathResult<Route> {
        let strategy = self.strategy_for(start, end);
        let route = match strategy {
            Strategy::Direct => self.cache.route(grid, start, end)?,
            Strategy::Hierarchical => self.hierarchy.find_path(grid, &mut self.cache, start, end)?,
        };
        trace!(%start, %end, ?strategy, len = route.len(), "route planned");

        if self.smooth {
            Ok(Route::new(self.smoother.smooth(grid, &route.waypoints)))
        } else {
            Ok(route)
        }
    }

    /// Drop every cached route.  Call after any walkability change.
    pub fn invalidate_cache(&mut self) {
        self.cache.invalidate();
    }

    pub fn cache(&self) -> &PathCache<AStarRouter> {
        &self.cache
    }

    pub fn cache_stats(&self) -> CacheStats {
        self.cache.stats()
    }

    pub fn hierarchy(&self) -> &HierarchicalPlanner {
        &self.hierarchy
    }
}

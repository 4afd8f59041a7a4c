//! Unit tests for gn-sched.

#[cfg(test)]
mod helpers {
    use gn_agent::{AgentStore, AgentStoreBuilder};
    use gn_core::{GridPos, PlannerConfig};
    use gn_grid::GridMap;

    use crate::RequestScheduler;

    pub fn p(x: i32, y: i32) -> GridPos {
        GridPos::new(x, y)
    }

    pub fn scheduler(grid: &GridMap, cap: usize) -> RequestScheduler {
        let config = PlannerConfig { max_requests_per_tick: cap, ..PlannerConfig::default() };
        RequestScheduler::new(grid, &config).unwrap()
    }

    /// `n` agents on row 0 each heading three cells down.
    pub fn column_walkers(n: i32) -> AgentStore {
        AgentStoreBuilder::with_capacity(n as usize)
            .agents((0..n).map(|x| (p(x, 0), p(x, 3))))
            .build()
    }
}

#[cfg(test)]
mod queue {
    use gn_core::{AgentId, GridPos};

    use crate::{PathRequest, RequestQueue, RequestState};

    fn req(id: u32) -> PathRequest {
        PathRequest { agent: AgentId(id), start: GridPos::new(0, 0), destination: GridPos::new(1, 1) }
    }

    #[test]
    fn fifo_order_and_states() {
        let mut q = RequestQueue::new();
        assert!(q.enqueue(req(2)));
        assert!(q.enqueue(req(0)));
        assert_eq!(q.state(AgentId(2)), RequestState::Queued);
        assert_eq!(q.state(AgentId(9)), RequestState::Absent);

        let first = q.dequeue().unwrap();
        assert_eq!(first.agent, AgentId(2));
        assert_eq!(q.state(AgentId(2)), RequestState::InFlight);
        assert_eq!(q.dequeue().unwrap().agent, AgentId(0));
        assert!(q.dequeue().is_none());
    }

    #[test]
    fn duplicate_enqueue_rejected_while_outstanding() {
        let mut q = RequestQueue::new();
        assert!(q.enqueue(req(1)));
        assert!(!q.enqueue(req(1)));
        assert_eq!(q.len(), 1);

        q.dequeue();
        // In flight: still rejected.
        assert!(!q.enqueue(req(1)));

        q.finish(AgentId(1), RequestState::Failed);
        assert!(q.enqueue(req(1)));
    }

    #[test]
    fn cancel_only_touches_queued() {
        let mut q = RequestQueue::new();
        q.enqueue(req(0));
        q.enqueue(req(1));
        q.enqueue(req(2));
        assert!(q.cancel(AgentId(1)));
        assert!(!q.cancel(AgentId(1)));
        assert_eq!(q.state(AgentId(1)), RequestState::Absent);
        let order: Vec<_> = q.iter().map(|r| r.agent).collect();
        assert_eq!(order, vec![AgentId(0), AgentId(2)]);

        q.dequeue();
        assert!(!q.cancel(AgentId(0)));
    }
}

#[cfg(test)]
mod scheduler {
    use gn_agent::{AgentStoreBuilder, step_all};
    use gn_core::{AgentId, PlannerConfig};
    use gn_grid::GridMap;

    use super::helpers::*;
    use crate::{RequestScheduler, RequestState, SchedError};

    #[test]
    fn invalid_config_rejected() {
        let grid = GridMap::new(8, 8).unwrap();
        let config = PlannerConfig { max_requests_per_tick: 0, ..PlannerConfig::default() };
        assert!(matches!(RequestScheduler::new(&grid, &config), Err(SchedError::Config(_))));
    }

    #[test]
    fn never_services_more_than_cap() {
        let grid = GridMap::new(40, 10).unwrap();
        let mut store = column_walkers(30);
        let mut sched = scheduler(&grid, 5);

        let report = sched.process(&mut store, &grid).unwrap();
        assert_eq!(report.enqueued, 30);
        assert_eq!(report.serviced, 5);
        assert_eq!(report.deferred, 25);
        assert_eq!(store.active_path_count(), 5);
    }

    #[test]
    fn excess_is_deferred_in_arrival_order() {
        let grid = GridMap::new(40, 10).unwrap();
        let mut store = column_walkers(12);
        let mut sched = scheduler(&grid, 5);

        let first = sched.process(&mut store, &grid).unwrap();
        assert_eq!(first.attached, (0..5).map(AgentId).collect::<Vec<_>>());

        let second = sched.process(&mut store, &grid).unwrap();
        // Still pending, so not enqueued again.
        assert_eq!(second.enqueued, 0);
        assert_eq!(second.attached, (5..10).map(AgentId).collect::<Vec<_>>());

        let third = sched.process(&mut store, &grid).unwrap();
        assert_eq!(third.attached, vec![AgentId(10), AgentId(11)]);
        assert_eq!(third.deferred, 0);
    }

    #[test]
    fn duplicate_enqueue_is_noop() {
        let grid = GridMap::new(10, 10).unwrap();
        let mut store = column_walkers(1);
        let mut sched = scheduler(&grid, 5);
        let a = AgentId(0);

        assert!(sched.enqueue(&mut store, a).unwrap());
        assert!(!sched.enqueue(&mut store, a).unwrap());
        assert_eq!(sched.queue().len(), 1);
        assert_eq!(sched.state(a), RequestState::Queued);
        assert!(store.is_pending(a));

        let report = sched.process(&mut store, &grid).unwrap();
        assert_eq!(report.enqueued, 0);
        assert_eq!(report.serviced, 1);
    }

    #[test]
    fn idle_agent_is_not_enqueued() {
        let grid = GridMap::new(10, 10).unwrap();
        let mut store = AgentStoreBuilder::new().idle_agent(p(3, 3)).build();
        let mut sched = scheduler(&grid, 5);
        assert!(!sched.enqueue(&mut store, AgentId(0)).unwrap());
        assert_eq!(sched.process(&mut store, &grid).unwrap().enqueued, 0);
    }

    #[test]
    fn unknown_agent_is_an_error() {
        let grid = GridMap::new(10, 10).unwrap();
        let mut store = column_walkers(1);
        let mut sched = scheduler(&grid, 5);
        assert!(matches!(
            sched.enqueue(&mut store, AgentId(5)),
            Err(SchedError::UnknownAgent(AgentId(5)))
        ));
    }

    #[test]
    fn disconnected_target_resets_destination() {
        let grid = GridMap::from_ascii(
            "
            .......
            ..###..
            ..#.#..
            ..###..
            .......
            ",
        )
        .unwrap();
        let mut store = AgentStoreBuilder::new().agent(p(0, 0), p(3, 2)).build();
        let mut sched = scheduler(&grid, 5);
        let a = AgentId(0);

        let report = sched.process(&mut store, &grid).unwrap();
        assert_eq!(report.failed, vec![a]);
        assert!(report.attached.is_empty());
        assert_eq!(store.destination[0], store.position[0]);
        assert_eq!(sched.state(a), RequestState::Failed);
        assert!(!store.is_pending(a));
        assert!(!store.has_path(a));

        // No automatic retry.
        let next = sched.process(&mut store, &grid).unwrap();
        assert_eq!(next.enqueued, 0);
    }

    #[test]
    fn unwalkable_destination_fails_the_same_way() {
        let mut grid = GridMap::new(6, 6).unwrap();
        grid.set_walkable(p(5, 5), false).unwrap();
        let mut store = AgentStoreBuilder::new().agent(p(0, 0), p(5, 5)).build();
        let mut sched = scheduler(&grid, 5);
        let report = sched.process(&mut store, &grid).unwrap();
        assert_eq!(report.failed, vec![AgentId(0)]);
        assert_eq!(store.destination[0], p(0, 0));
    }

    #[test]
    fn attached_path_ends_at_destination() {
        let grid = GridMap::new(100, 100).unwrap();
        let mut store = AgentStoreBuilder::new()
            .agent(p(1, 1), p(6, 4))
            .agent(p(2, 2), p(90, 70))
            .build();
        let mut sched = scheduler(&grid, 5);
        let report = sched.process(&mut store, &grid).unwrap();
        assert_eq!(report.attached.len(), 2);
        assert_eq!(store.path(AgentId(0)).unwrap().goal(), Some(p(6, 4)));
        assert_eq!(store.path(AgentId(1)).unwrap().goal(), Some(p(90, 70)));
        assert_eq!(sched.state(AgentId(1)), RequestState::Attached);
    }

    #[test]
    fn cancel_clears_queue_entry_and_marker() {
        let grid = GridMap::new(10, 10).unwrap();
        let mut store = column_walkers(3);
        let mut sched = scheduler(&grid, 5);
        for i in 0..3 {
            sched.enqueue(&mut store, AgentId(i)).unwrap();
        }
        assert!(sched.cancel(&mut store, AgentId(1)));
        assert!(!store.is_pending(AgentId(1)));
        assert_eq!(sched.state(AgentId(1)), RequestState::Absent);

        // The cancelled agent still needs a path, so the scan re-queues it
        // behind the others.
        let report = sched.process(&mut store, &grid).unwrap();
        assert_eq!(report.attached, vec![AgentId(0), AgentId(2), AgentId(1)]);
    }

    #[test]
    fn removed_agent_does_not_consume_the_cap() {
        let grid = GridMap::new(10, 10).unwrap();
        let mut store = column_walkers(3);
        let mut sched = scheduler(&grid, 2);
        for i in 0..3 {
            sched.enqueue(&mut store, AgentId(i)).unwrap();
        }
        store.remove(AgentId(0)).unwrap();

        let report = sched.process(&mut store, &grid).unwrap();
        assert_eq!(report.serviced, 2);
        assert_eq!(report.attached, vec![AgentId(1), AgentId(2)]);
        assert_eq!(sched.state(AgentId(0)), RequestState::Absent);
    }

    #[test]
    fn blocked_agent_is_requested_again() {
        let grid = GridMap::new(10, 10).unwrap();
        let mut store = column_walkers(1);
        let mut sched = scheduler(&grid, 5);
        let a = AgentId(0);
        sched.process(&mut store, &grid).unwrap();
        assert!(store.has_path(a));

        store.detach_path(a);
        let report = sched.process(&mut store, &grid).unwrap();
        assert_eq!(report.enqueued, 1);
        assert_eq!(report.attached, vec![a]);
    }

    #[test]
    fn agent_with_a_path_is_not_requeued() {
        let grid = GridMap::new(4, 12).unwrap();
        let mut store = AgentStoreBuilder::new().agent(p(0, 0), p(0, 9)).build();
        let mut sched = scheduler(&grid, 5);
        let a = AgentId(0);
        sched.process(&mut store, &grid).unwrap();
        assert!(store.has_path(a));

        assert!(!sched.enqueue(&mut store, a).unwrap());
        assert!(!store.is_pending(a));
        assert!(sched.queue().is_empty());
    }

    #[test]
    fn replan_starts_where_the_agent_stands() {
        let grid = GridMap::new(4, 12).unwrap();
        let mut store = AgentStoreBuilder::new().agent(p(0, 0), p(0, 9)).build();
        let mut sched = scheduler(&grid, 5);
        let a = AgentId(0);
        sched.process(&mut store, &grid).unwrap();
        for _ in 0..4 {
            step_all(&mut store, &grid);
        }
        assert_eq!(store.position[0], p(0, 4));

        store.detach_path(a);
        let report = sched.process(&mut store, &grid).unwrap();
        assert_eq!(report.attached, vec![a]);
        let path = store.path(a).unwrap();
        assert_eq!(path.anchor(), p(0, 4));
        assert_eq!(path.goal(), Some(p(0, 9)));
    }

    #[test]
    fn deferred_request_uses_position_at_service_time() {
        let grid = GridMap::new(10, 10).unwrap();
        let mut store = column_walkers(2);
        let mut sched = scheduler(&grid, 1);
        let b = AgentId(1);

        let first = sched.process(&mut store, &grid).unwrap();
        assert_eq!(first.deferred, 1);
        assert_eq!(sched.queue().iter().next().unwrap().start, p(1, 0));

        // Moved and retargeted while waiting in the queue.
        store.position[1] = p(1, 1);
        store.set_destination(b, p(6, 1)).unwrap();
        let second = sched.process(&mut store, &grid).unwrap();
        assert_eq!(second.attached, vec![b]);
        let path = store.path(b).unwrap();
        assert_eq!(path.anchor(), p(1, 1));
        assert_eq!(path.goal(), Some(p(6, 1)));
    }

    #[test]
    fn deferred_agent_already_home_is_dropped_quietly() {
        let grid = GridMap::new(10, 10).unwrap();
        let mut store = column_walkers(2);
        let mut sched = scheduler(&grid, 1);
        sched.process(&mut store, &grid).unwrap();

        store.position[1] = p(1, 3);
        let report = sched.process(&mut store, &grid).unwrap();
        assert_eq!(report.serviced, 0);
        assert!(report.failed.is_empty());
        assert_eq!(sched.state(AgentId(1)), RequestState::Absent);
        assert!(!store.is_pending(AgentId(1)));
    }

    #[test]
    fn find_path_is_exposed_and_cached() {
        let grid = GridMap::new(10, 10).unwrap();
        let mut sched = scheduler(&grid, 5);
        let route = sched.find_path(&grid, p(0, 0), p(4, 4)).unwrap();
        assert_eq!(route.len(), 8);
        sched.find_path(&grid, p(0, 0), p(4, 4)).unwrap();
        assert_eq!(sched.navigator().cache_stats().hits, 1);
        sched.invalidate_cache();
        assert!(sched.navigator().cache().is_empty());
    }
}

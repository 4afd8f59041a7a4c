//! Unit tests for gn-agent.

#[cfg(test)]
mod store {
    use gn_core::{AgentId, GridPos};

    use crate::{ActivePath, AgentError, AgentStoreBuilder};

    fn p(x: i32, y: i32) -> GridPos {
        GridPos::new(x, y)
    }

    #[test]
    fn builder_assigns_sequential_ids() {
        let store = AgentStoreBuilder::new()
            .agent(p(0, 0), p(3, 3))
            .agents([(p(1, 1), p(2, 2)), (p(4, 4), p(4, 4))])
            .build();
        assert_eq!(store.count, 3);
        assert_eq!(store.position[1], p(1, 1));
        assert_eq!(store.destination[2], p(4, 4));
        assert_eq!(store.agent_ids().collect::<Vec<_>>(), vec![AgentId(0), AgentId(1), AgentId(2)]);
    }

    #[test]
    fn needs_path_rules() {
        let mut store = AgentStoreBuilder::new()
            .agent(p(0, 0), p(3, 3))
            .idle_agent(p(1, 1))
            .build();
        let (walker, idle) = (AgentId(0), AgentId(1));

        assert!(store.needs_path(walker));
        assert!(!store.needs_path(idle));

        store.set_pending(walker, true).unwrap();
        assert!(!store.needs_path(walker));
        store.set_pending(walker, false).unwrap();

        store.attach_path(walker, ActivePath::new(p(0, 0), vec![p(1, 0)])).unwrap();
        assert!(!store.needs_path(walker));
        store.detach_path(walker);
        assert!(store.needs_path(walker));
    }

    #[test]
    fn remove_clears_state_and_keeps_slot() {
        let mut store = AgentStoreBuilder::new().agent(p(0, 0), p(2, 0)).build();
        let a = AgentId(0);
        store.attach_path(a, ActivePath::new(p(0, 0), vec![p(1, 0), p(2, 0)])).unwrap();
        store.set_pending(a, true).unwrap();

        store.remove(a).unwrap();
        assert!(!store.is_alive(a));
        assert!(!store.has_path(a));
        assert!(!store.is_pending(a));
        assert!(!store.needs_path(a));
        assert_eq!(store.count, 1);
        assert_eq!(store.live_count(), 0);
        assert!(matches!(store.remove(a), Err(AgentError::UnknownAgent(_))));
    }

    #[test]
    fn unknown_ids_are_errors_not_panics() {
        let mut store = AgentStoreBuilder::new().build();
        let ghost = AgentId(7);
        assert!(store.set_destination(ghost, p(1, 1)).is_err());
        assert!(store.reset_destination(ghost).is_err());
        assert!(store.attach_path(ghost, ActivePath::default()).is_err());
        assert!(!store.needs_path(ghost));
        assert!(!store.is_pending(ghost));
    }

    #[test]
    fn new_destination_drops_old_path() {
        let mut store = AgentStoreBuilder::new().agent(p(0, 0), p(2, 0)).build();
        let a = AgentId(0);
        store.attach_path(a, ActivePath::new(p(0, 0), vec![p(1, 0), p(2, 0)])).unwrap();

        // Same destination keeps the path.
        store.set_destination(a, p(2, 0)).unwrap();
        assert!(store.has_path(a));

        store.set_destination(a, p(0, 3)).unwrap();
        assert!(!store.has_path(a));
        assert_eq!(store.destination[0], p(0, 3));
    }

    #[test]
    fn reset_destination_makes_agent_idle() {
        let mut store = AgentStoreBuilder::new().agent(p(2, 2), p(9, 9)).build();
        store.reset_destination(AgentId(0)).unwrap();
        assert_eq!(store.destination[0], p(2, 2));
        assert!(!store.needs_path(AgentId(0)));
    }

    #[test]
    fn spawn_after_build() {
        let mut store = AgentStoreBuilder::new().idle_agent(p(0, 0)).build();
        let id = store.spawn(p(1, 1), p(2, 2));
        assert_eq!(id, AgentId(1));
        assert_eq!(store.live_agents().count(), 2);
    }
}

#[cfg(test)]
mod path {
    use gn_core::GridPos;

    use crate::ActivePath;

    #[test]
    fn cursor_walks_to_completion() {
        let mut path = ActivePath::new(GridPos::new(0, 0), vec![GridPos::new(1, 0), GridPos::new(2, 0)]);
        assert_eq!(path.next_waypoint(), Some(GridPos::new(1, 0)));
        assert_eq!(path.goal(), Some(GridPos::new(2, 0)));
        path.advance();
        assert_eq!(path.remaining(), &[GridPos::new(2, 0)]);
        path.advance();
        assert!(path.is_complete());
        assert_eq!(path.next_waypoint(), None);
        // Advancing past the end is harmless.
        path.advance();
        assert_eq!(path.cursor(), 2);
        assert!(path.remaining().is_empty());
    }

    #[test]
    fn empty_path_is_complete() {
        assert!(ActivePath::default().is_complete());
    }

    #[test]
    fn reached_waypoint_becomes_anchor() {
        let mut path = ActivePath::new(GridPos::new(0, 0), vec![GridPos::new(4, 0), GridPos::new(4, 4)]);
        assert_eq!(path.anchor(), GridPos::new(0, 0));
        path.advance();
        assert_eq!(path.anchor(), GridPos::new(4, 0));
        assert_eq!(path.next_cell(GridPos::new(4, 0)), Some(GridPos::new(4, 1)));
    }

    #[test]
    fn next_cell_off_the_leg_steps_toward_waypoint() {
        let path = ActivePath::new(GridPos::new(0, 0), vec![GridPos::new(4, 0)]);
        assert_eq!(path.next_cell(GridPos::new(2, 0)), Some(GridPos::new(3, 0)));
        assert_eq!(path.next_cell(GridPos::new(1, 2)), Some(GridPos::new(2, 1)));
        assert_eq!(ActivePath::default().next_cell(GridPos::new(1, 1)), None);
    }
}

#[cfg(test)]
mod movement {
    use gn_core::{AgentId, GridPos};
    use gn_grid::GridMap;

    use crate::{ActivePath, AgentStoreBuilder, StepOutcome, step_agent, step_all};

    fn p(x: i32, y: i32) -> GridPos {
        GridPos::new(x, y)
    }

    #[test]
    fn walks_waypoints_then_arrives() {
        let grid = GridMap::new(5, 5).unwrap();
        let mut store = AgentStoreBuilder::new().agent(p(0, 0), p(2, 0)).build();
        let a = AgentId(0);
        store.attach_path(a, ActivePath::new(p(0, 0), vec![p(1, 0), p(2, 0)])).unwrap();

        assert_eq!(step_agent(&mut store, &grid, a), StepOutcome::Moved);
        assert_eq!(store.position[0], p(1, 0));
        assert_eq!(step_agent(&mut store, &grid, a), StepOutcome::Moved);
        assert_eq!(store.position[0], p(2, 0));
        assert_eq!(step_agent(&mut store, &grid, a), StepOutcome::Arrived);
        assert!(!store.has_path(a));
        assert_eq!(step_agent(&mut store, &grid, a), StepOutcome::Idle);
    }

    #[test]
    fn long_legs_follow_the_rasterized_line() {
        let grid = GridMap::new(6, 6).unwrap();
        let mut store = AgentStoreBuilder::new().agent(p(0, 0), p(3, 2)).build();
        let a = AgentId(0);
        store.attach_path(a, ActivePath::new(p(0, 0), vec![p(3, 2)])).unwrap();

        step_agent(&mut store, &grid, a);
        assert_eq!(store.position[0], p(1, 1));
        step_agent(&mut store, &grid, a);
        assert_eq!(store.position[0], p(2, 1));
        step_agent(&mut store, &grid, a);
        assert_eq!(store.position[0], p(3, 2));
    }

    #[test]
    fn blocked_step_discards_path_but_keeps_destination() {
        let mut grid = GridMap::new(5, 5).unwrap();
        let mut store = AgentStoreBuilder::new().agent(p(0, 0), p(3, 0)).build();
        let a = AgentId(0);
        store.attach_path(a, ActivePath::new(p(0, 0), vec![p(1, 0), p(2, 0), p(3, 0)])).unwrap();

        grid.set_walkable(p(1, 0), false).unwrap();
        assert_eq!(step_agent(&mut store, &grid, a), StepOutcome::Blocked);
        assert_eq!(store.position[0], p(0, 0));
        assert!(!store.has_path(a));
        assert_eq!(store.destination[0], p(3, 0));
        assert!(store.needs_path(a));
    }

    #[test]
    fn step_all_reports_in_id_order() {
        let mut grid = GridMap::new(5, 5).unwrap();
        grid.set_walkable(p(4, 3), false).unwrap();
        let mut store = AgentStoreBuilder::new()
            .agent(p(0, 0), p(1, 0))
            .agent(p(4, 4), p(4, 2))
            .agent(p(2, 2), p(2, 3))
            .idle_agent(p(3, 3))
            .build();
        store.attach_path(AgentId(0), ActivePath::new(p(0, 0), vec![p(1, 0)])).unwrap();
        store.attach_path(AgentId(1), ActivePath::new(p(4, 4), vec![p(4, 3), p(4, 2)])).unwrap();
        store.attach_path(AgentId(2), ActivePath::new(p(2, 2), vec![])).unwrap();

        let report = step_all(&mut store, &grid);
        assert_eq!(report.moved, 1);
        assert_eq!(report.blocked, vec![AgentId(1)]);
        assert_eq!(report.arrived, vec![AgentId(2)]);
    }
}

#[cfg(test)]
mod loader {
    use std::io::Cursor;

    use gn_core::{AgentId, GridPos};
    use gn_grid::GridMap;

    use crate::{AgentError, load_agents_reader};

    #[test]
    fn loads_rows_in_any_order() {
        let grid = GridMap::new(10, 10).unwrap();
        let csv = "agent_id,x,y,dest_x,dest_y\n1,2,2,2,2\n0,0,0,9,9\n";
        let store = load_agents_reader(Cursor::new(csv), &grid).unwrap();
        assert_eq!(store.count, 2);
        assert_eq!(store.position[0], GridPos::new(0, 0));
        assert_eq!(store.destination[0], GridPos::new(9, 9));
        assert!(store.needs_path(AgentId(0)));
        assert!(!store.needs_path(AgentId(1)));
    }

    #[test]
    fn gap_in_ids_rejected() {
        let grid = GridMap::new(10, 10).unwrap();
        let csv = "agent_id,x,y,dest_x,dest_y\n0,0,0,1,1\n2,0,0,1,1\n";
        assert!(matches!(load_agents_reader(Cursor::new(csv), &grid), Err(AgentError::Parse(_))));
    }

    #[test]
    fn duplicate_id_rejected() {
        let grid = GridMap::new(10, 10).unwrap();
        let csv = "agent_id,x,y,dest_x,dest_y\n0,0,0,1,1\n0,1,1,2,2\n";
        assert!(load_agents_reader(Cursor::new(csv), &grid).is_err());
    }

    #[test]
    fn out_of_bounds_and_unwalkable_starts_rejected() {
        let mut grid = GridMap::new(4, 4).unwrap();
        grid.set_walkable(GridPos::new(1, 1), false).unwrap();

        let oob = "agent_id,x,y,dest_x,dest_y\n0,5,0,1,1\n";
        assert!(matches!(
            load_agents_reader(Cursor::new(oob), &grid),
            Err(AgentError::OutOfBounds(p)) if p == GridPos::new(5, 0)
        ));

        let walled = "agent_id,x,y,dest_x,dest_y\n0,1,1,2,2\n";
        assert!(load_agents_reader(Cursor::new(walled), &grid).is_err());
    }

    #[test]
    fn malformed_row_is_parse_error() {
        let grid = GridMap::new(4, 4).unwrap();
        let csv = "agent_id,x,y,dest_x,dest_y\n0,a,0,1,1\n";
        assert!(matches!(load_agents_reader(Cursor::new(csv), &grid), Err(AgentError::Parse(_))));
    }
}

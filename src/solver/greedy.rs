use smallvec::SmallVec;

use crate::error::ConfigError;
use crate::{solver::GridSolver, Cell, ObstacleGrid, SearchConfig, N_SMALLVEC_SIZE};

/// Greedy best-first search: the frontier is ordered purely by Manhattan distance to the goal.
/// Always finds a path when one exists, but not necessarily the shortest.
#[derive(Clone, Debug, Default)]
pub struct GreedySolver {
    config: SearchConfig,
}

impl GreedySolver {
    pub fn new() -> GreedySolver {
        GreedySolver::default()
    }

    /// Builds a solver from a validated configuration, so builder-made settings are held to the
    /// same rules as ones loaded from TOML.
    pub fn with_config(config: SearchConfig) -> Result<GreedySolver, ConfigError> {
        config.validate()?;
        Ok(GreedySolver { config })
    }
}

impl GridSolver for GreedySolver {
    type Successors = SmallVec<[Cell; N_SMALLVEC_SIZE]>;

    fn config(&self) -> &SearchConfig {
        &self.config
    }

    fn heuristic(&self, p1: &Cell, p2: &Cell) -> u32 {
        p1.manhattan_distance(p2)
    }

    fn successors(&self, grid: &ObstacleGrid, node: &Cell) -> Self::Successors {
        grid.neighborhood_cells(node)
    }
}

#[cfg(test)]
mod tests {
    use std::sync::atomic::{AtomicBool, Ordering};

    use super::*;
    use crate::observer::{CancelFlag, ExpansionRecorder};
    use crate::{is_valid_path, ConfigError, SearchError};

    fn cell(row: i32, col: i32) -> Cell {
        Cell::new(row, col)
    }

    /// Asserts that the case in which start and goal are equal is handled correctly.
    #[test]
    fn equal_start_goal() {
        let grid = ObstacleGrid::with_dimensions(1, 1).unwrap();
        let solver = GreedySolver::new();
        let path = solver
            .get_path_single_goal(&grid, cell(0, 0), cell(0, 0))
            .unwrap()
            .unwrap();
        assert_eq!(path, vec![cell(0, 0)]);
    }

    /// Asserts that a 4 step solution is found around the centre obstacle.
    #[test]
    fn solve_simple_problem() {
        // |S  |
        // | # |
        // |  G|
        let mut grid = ObstacleGrid::with_dimensions(3, 3).unwrap();
        grid.set_blocked(&cell(1, 1), true).unwrap();
        let solver = GreedySolver::new();
        let path = solver
            .get_path_single_goal(&grid, cell(0, 0), cell(2, 2))
            .unwrap()
            .unwrap();
        // Down and right tie at distance 3; down was discovered first.
        assert_eq!(
            path,
            vec![cell(0, 0), cell(1, 0), cell(2, 0), cell(2, 1), cell(2, 2)]
        );
        assert_eq!(solver.get_path_cost(&path), 4);
    }

    /// The wall forces a detour through the only gap on the right.
    #[test]
    fn detour_around_wall() {
        // |S...|
        // |###.|
        // |G...|
        // |....|
        let grid = ObstacleGrid::from_rows(&[
            vec![false, false, false, false],
            vec![true, true, true, false],
            vec![false, false, false, false],
            vec![false, false, false, false],
        ])
        .unwrap();
        let solver = GreedySolver::new();
        let path = solver
            .get_path_single_goal(&grid, cell(0, 0), cell(2, 0))
            .unwrap()
            .unwrap();
        assert!(is_valid_path(&path));
        assert_eq!(
            path,
            vec![
                cell(0, 0),
                cell(0, 1),
                cell(0, 2),
                cell(0, 3),
                cell(1, 3),
                cell(2, 3),
                cell(2, 2),
                cell(2, 1),
                cell(2, 0)
            ]
        );
    }

    #[test]
    fn observer_skips_endpoints_by_default() {
        let grid = ObstacleGrid::with_dimensions(1, 4).unwrap();
        let solver = GreedySolver::new();
        let mut recorder = ExpansionRecorder::default();
        let path = solver
            .get_path_observed(&grid, cell(0, 0), cell(0, 3), &mut recorder)
            .unwrap()
            .unwrap();
        assert_eq!(path.len(), 4);
        assert_eq!(recorder.expanded, vec![cell(0, 1), cell(0, 2)]);

        let solver =
            GreedySolver::with_config(SearchConfig::new().with_notify_endpoints(true)).unwrap();
        let trace = solver.trace(&grid, cell(0, 0), cell(0, 3)).unwrap();
        assert_eq!(trace.expanded, vec![cell(0, 0), cell(0, 1), cell(0, 2)]);
        assert_eq!(trace.path, Some(path));
    }

    /// The observer only watches: results are identical with and without one.
    #[test]
    fn observer_does_not_change_result() {
        let mut grid = ObstacleGrid::with_dimensions(6, 6).unwrap();
        for c in 0..5 {
            grid.set_blocked(&cell(3, c), true).unwrap();
        }
        let solver = GreedySolver::new();
        let plain = solver
            .get_path_single_goal(&grid, cell(0, 0), cell(5, 0))
            .unwrap();
        let mut count = 0;
        let observed = solver
            .get_path_observed(&grid, cell(0, 0), cell(5, 0), &mut |_: Cell| count += 1)
            .unwrap();
        assert_eq!(plain, observed);
        assert!(count > 0);
    }

    #[test]
    fn out_of_bounds_fails_fast() {
        let grid = ObstacleGrid::with_dimensions(5, 5).unwrap();
        let solver = GreedySolver::new();
        assert_eq!(
            solver.get_path_single_goal(&grid, cell(0, 0), cell(5, 0)),
            Err(SearchError::OutOfBounds {
                cell: cell(5, 0),
                rows: 5,
                cols: 5
            })
        );
        assert!(matches!(
            solver.get_path_single_goal(&grid, cell(-1, 0), cell(0, 0)),
            Err(SearchError::OutOfBounds { .. })
        ));
    }

    /// A blocked start is still expanded; a blocked goal is never discovered.
    #[test]
    fn blocked_endpoints_are_not_rejected() {
        let mut grid = ObstacleGrid::with_dimensions(3, 3).unwrap();
        grid.set_blocked(&cell(0, 0), true).unwrap();
        let solver = GreedySolver::new();
        let path = solver
            .get_path_single_goal(&grid, cell(0, 0), cell(2, 2))
            .unwrap();
        assert_eq!(path.map(|p| p.len()), Some(5));
        let path = solver
            .get_path_single_goal(&grid, cell(2, 2), cell(0, 0))
            .unwrap();
        assert_eq!(path, None);
        let path = solver
            .get_path_single_goal(&grid, cell(0, 0), cell(0, 0))
            .unwrap();
        assert_eq!(path, Some(vec![cell(0, 0)]));
    }

    #[test]
    fn expansion_limit() {
        let grid = ObstacleGrid::with_dimensions(1, 10).unwrap();
        let solver =
            GreedySolver::with_config(SearchConfig::new().with_max_expansions(3)).unwrap();
        assert_eq!(
            solver.get_path_single_goal(&grid, cell(0, 0), cell(0, 9)),
            Err(SearchError::ExpansionLimit { limit: 3 })
        );
        // Three expansions are enough to reach a goal three steps away.
        assert!(solver
            .get_path_single_goal(&grid, cell(0, 0), cell(0, 3))
            .unwrap()
            .is_some());
    }

    #[test]
    fn zero_expansion_budget_is_rejected() {
        let err = GreedySolver::with_config(SearchConfig::new().with_max_expansions(0)).unwrap_err();
        assert!(matches!(err, ConfigError::Invalid(_)));
        assert!(GreedySolver::with_config(SearchConfig::new().with_max_expansions(1)).is_ok());
    }

    #[test]
    fn cancel_flag_stops_search() {
        let grid = ObstacleGrid::with_dimensions(4, 4).unwrap();
        let solver = GreedySolver::new();
        let flag = AtomicBool::new(true);
        let mut observer = CancelFlag::new(&flag, ExpansionRecorder::default());
        assert_eq!(
            solver.get_path_observed(&grid, cell(0, 0), cell(3, 3), &mut observer),
            Err(SearchError::Cancelled { expanded: 1 })
        );
        assert!(observer.into_inner().expanded.is_empty());
    }

    /// The flag is polled after every expansion, so raising it mid-search stops right there.
    #[test]
    fn cancel_flag_raised_during_search() {
        let grid = ObstacleGrid::with_dimensions(1, 10).unwrap();
        let solver = GreedySolver::new();
        let flag = AtomicBool::new(false);
        let mut seen = Vec::new();
        let mut observer = CancelFlag::new(&flag, |cell: Cell| {
            seen.push(cell);
            if seen.len() == 2 {
                flag.store(true, Ordering::Relaxed);
            }
        });
        // The start is expanded unreported, then (0, 1) and (0, 2) before the flag is seen.
        assert_eq!(
            solver.get_path_observed(&grid, cell(0, 0), cell(0, 9), &mut observer),
            Err(SearchError::Cancelled { expanded: 3 })
        );
        assert_eq!(seen, vec![cell(0, 1), cell(0, 2)]);
    }

    #[test]
    fn component_precheck_skips_exploration() {
        let grid = ObstacleGrid::from_rows(&[
            vec![false, false, false],
            vec![true, true, true],
            vec![false, false, false],
        ])
        .unwrap();
        let solver =
            GreedySolver::with_config(SearchConfig::new().with_component_precheck(true)).unwrap();
        let trace = solver.trace(&grid, cell(0, 0), cell(2, 0)).unwrap();
        assert_eq!(trace.path, None);
        assert!(trace.expanded.is_empty());

        let trace = GreedySolver::new()
            .trace(&grid, cell(0, 0), cell(2, 0))
            .unwrap();
        assert_eq!(trace.path, None);
        assert_eq!(trace.expanded, vec![cell(0, 1), cell(0, 2)]);
    }
}

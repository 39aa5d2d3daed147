//! # grid_navigation
//!
//! Greedy [best-first search](https://en.wikipedia.org/wiki/Best-first_search) on a
//! 4-connected obstacle grid. The frontier is ranked by the
//! [Manhattan distance](https://en.wikipedia.org/wiki/Taxicab_geometry) to the goal alone, so a
//! path is found whenever one exists but it is not guaranteed to be the shortest. Expansions can
//! be observed as they happen, e.g. to animate the search.
//!
//! ```
//! use grid_navigation::{search, Cell, ObstacleGrid};
//!
//! let mut grid = ObstacleGrid::with_dimensions(3, 3).unwrap();
//! grid.set_blocked(&Cell::new(1, 1), true).unwrap();
//! let path = search(&grid, Cell::new(0, 0), Cell::new(2, 2)).unwrap().unwrap();
//! assert_eq!(path.len(), 5);
//! ```
mod best_first;
pub mod cell;
pub mod config;
pub mod error;
pub mod map;
pub mod obstacle_grid;
pub mod observer;
pub mod solver;

use itertools::Itertools;

pub use cell::Cell;
pub use config::SearchConfig;
pub use error::{ConfigError, MapError, SearchError};
pub use obstacle_grid::ObstacleGrid;
pub use observer::SearchObserver;
pub use solver::{greedy::GreedySolver, GridSolver, SearchTrace};

/// Inline capacity of neighbour lists; a cell has at most four neighbours on a 4-grid.
pub const N_SMALLVEC_SIZE: usize = 4;

/// Estimated distance between two cells, used only to rank the frontier.
pub fn heuristic(a: &Cell, b: &Cell) -> u32 {
    a.manhattan_distance(b)
}

/// Searches from `start` to `goal` with the default [GreedySolver]. `Ok(None)` means the goal is
/// unreachable; out-of-bounds endpoints are an error.
pub fn search(
    grid: &ObstacleGrid,
    start: Cell,
    goal: Cell,
) -> Result<Option<Vec<Cell>>, SearchError> {
    GreedySolver::new().get_path_single_goal(grid, start, goal)
}

/// Like [search], reporting every expanded cell between the endpoints to `observer`.
pub fn search_observed<O: SearchObserver>(
    grid: &ObstacleGrid,
    start: Cell,
    goal: Cell,
    observer: &mut O,
) -> Result<Option<Vec<Cell>>, SearchError> {
    GreedySolver::new().get_path_observed(grid, start, goal, observer)
}

/// Whether consecutive cells are 4-adjacent and no cell repeats. Empty paths are invalid.
pub fn is_valid_path(path: &[Cell]) -> bool {
    !path.is_empty()
        && path.iter().tuple_windows().all(|(a, b)| a.is_adjacent(b))
        && path.iter().all_unique()
}

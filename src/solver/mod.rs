use log::{debug, info, warn};
use std::ops::ControlFlow;

use crate::best_first::best_first;
use crate::observer::{ExpansionRecorder, NoOpObserver, SearchObserver};
use crate::{Cell, ObstacleGrid, SearchConfig, SearchError};

pub mod greedy;

/// Path and expansion order of a single search, for callers that replay the exploration
/// afterwards instead of observing it live.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SearchTrace {
    pub path: Option<Vec<Cell>>,
    pub expanded: Vec<Cell>,
}

pub trait GridSolver {
    type Successors: IntoIterator<Item = Cell>;

    fn config(&self) -> &SearchConfig;

    /// Ranks a cell on the frontier; lower is explored first.
    fn heuristic(&self, p1: &Cell, p2: &Cell) -> u32;

    fn successors(&self, grid: &ObstacleGrid, node: &Cell) -> Self::Successors;

    /// Number of unit steps along a path.
    fn get_path_cost(&self, path: &[Cell]) -> u32 {
        path.windows(2)
            .map(|w| w[0].manhattan_distance(&w[1]))
            .sum()
    }

    /// Computes a path from start to goal. `Ok(None)` means the goal cannot be reached.
    fn get_path_single_goal(
        &self,
        grid: &ObstacleGrid,
        start: Cell,
        goal: Cell,
    ) -> Result<Option<Vec<Cell>>, SearchError> {
        self.get_path_observed(grid, start, goal, &mut NoOpObserver)
    }

    /// Like [get_path_single_goal](Self::get_path_single_goal) but also returns every
    /// expansion in order.
    fn trace(
        &self,
        grid: &ObstacleGrid,
        start: Cell,
        goal: Cell,
    ) -> Result<SearchTrace, SearchError> {
        let mut recorder = ExpansionRecorder::default();
        let path = self.get_path_observed(grid, start, goal, &mut recorder)?;
        Ok(SearchTrace {
            path,
            expanded: recorder.expanded,
        })
    }

    /// Computes a path from start to goal while reporting expansions to `observer`. The start
    /// cell is only reported when [SearchConfig::notify_endpoints] is set; the goal is never
    /// expanded and so never reported.
    fn get_path_observed<O: SearchObserver>(
        &self,
        grid: &ObstacleGrid,
        start: Cell,
        goal: Cell,
        observer: &mut O,
    ) -> Result<Option<Vec<Cell>>, SearchError> {
        grid.check_bounds(&start)?;
        grid.check_bounds(&goal)?;
        let config = self.config();

        // A blocked start is still expanded, so only a free start can be judged by components.
        if config.component_precheck
            && !grid.components_dirty()
            && start != goal
            && !grid.is_blocked(&start)
            && grid.unreachable(&start, &goal)
        {
            info!("{} is not reachable from {}", goal, start);
            return Ok(None);
        }

        debug!("Searching from {} to {}", start, goal);
        let mut expansions = 0;
        let exploration = best_first(
            &start,
            |node| self.successors(grid, node),
            |node| self.heuristic(node, &goal),
            |node| *node == goal,
            |node| {
                if let Some(limit) = config.max_expansions {
                    if expansions >= limit {
                        return ControlFlow::Break(SearchError::ExpansionLimit { limit });
                    }
                }
                expansions += 1;
                if config.notify_endpoints || *node != start {
                    observer.on_expand(*node);
                }
                if observer.should_stop() {
                    return ControlFlow::Break(SearchError::Cancelled {
                        expanded: expansions,
                    });
                }
                ControlFlow::Continue(())
            },
        )
        .inspect_err(|e| warn!("Search from {} to {} aborted: {}", start, goal, e))?;

        match &exploration.path {
            Some(path) => debug!(
                "Found path of {} steps after {} expansions",
                path.len() - 1,
                exploration.expanded
            ),
            None => debug!(
                "No path from {} to {} after {} expansions ({} cells discovered)",
                start, goal, exploration.expanded, exploration.discovered
            ),
        }
        Ok(exploration.path)
    }
}

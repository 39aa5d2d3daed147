use core::fmt;
use grid_util::grid::{BoolGrid, ValueGrid};
use log::debug;
use petgraph::unionfind::UnionFind;
use rand::Rng;
use smallvec::SmallVec;

use crate::cell::Cell;
use crate::error::SearchError;
use crate::N_SMALLVEC_SIZE;

/// [ObstacleGrid] stores whether each cell is blocked ([true]) or free ([false]) in a [BoolGrid],
/// and tracks 4-connected components of the free cells in a [UnionFind] structure so that
/// unreachable start/goal pairs can be recognised without searching.
#[derive(Clone, Debug)]
pub struct ObstacleGrid {
    grid: BoolGrid,
    components: UnionFind<usize>,
    components_dirty: bool,
    rows: usize,
    cols: usize,
}

impl ObstacleGrid {
    /// Creates a grid of the given size in which every cell is free.
    pub fn with_dimensions(rows: usize, cols: usize) -> Result<ObstacleGrid, SearchError> {
        if rows == 0 || cols == 0 {
            return Err(SearchError::EmptyGrid);
        }
        let mut grid = ObstacleGrid {
            grid: BoolGrid::new(cols, rows, false),
            components: UnionFind::new(rows * cols),
            components_dirty: false,
            rows,
            cols,
        };
        grid.generate_components();
        Ok(grid)
    }

    /// Builds a grid from row-major blocked flags, one inner [Vec] per row. Every row must be as
    /// long as the first one.
    pub fn from_rows(rows: &[Vec<bool>]) -> Result<ObstacleGrid, SearchError> {
        let cols = rows.first().map_or(0, Vec::len);
        if let Some(row) = rows.iter().position(|r| r.len() != cols) {
            return Err(SearchError::Ragged {
                row,
                expected: cols,
                found: rows[row].len(),
            });
        }
        let mut grid = ObstacleGrid::with_dimensions(rows.len(), cols)?;
        for (r, row) in rows.iter().enumerate() {
            for (c, &blocked) in row.iter().enumerate() {
                if blocked {
                    grid.grid.set_point(Cell::new(r as i32, c as i32).into(), true);
                }
            }
        }
        grid.generate_components();
        Ok(grid)
    }

    pub fn rows(&self) -> usize {
        self.rows
    }

    pub fn cols(&self) -> usize {
        self.cols
    }

    /// Whether cells were blocked since the components were last generated. While set, the
    /// components may join cells that are no longer connected.
    pub fn components_dirty(&self) -> bool {
        self.components_dirty
    }

    pub fn in_bounds(&self, cell: &Cell) -> bool {
        cell.row >= 0
            && cell.col >= 0
            && (cell.row as usize) < self.rows
            && (cell.col as usize) < self.cols
    }

    /// Fails with [SearchError::OutOfBounds] if the cell is not on the grid.
    pub fn check_bounds(&self, cell: &Cell) -> Result<(), SearchError> {
        if self.in_bounds(cell) {
            Ok(())
        } else {
            Err(SearchError::OutOfBounds {
                cell: *cell,
                rows: self.rows,
                cols: self.cols,
            })
        }
    }

    /// Out-of-bounds cells count as blocked.
    pub fn is_blocked(&self, cell: &Cell) -> bool {
        !self.in_bounds(cell) || self.grid.get_point((*cell).into())
    }

    pub fn can_move_to(&self, cell: &Cell) -> bool {
        !self.is_blocked(cell)
    }

    /// Free, in-bounds neighbours of a cell in the order up, down, left, right.
    pub fn neighborhood_cells(&self, cell: &Cell) -> SmallVec<[Cell; N_SMALLVEC_SIZE]> {
        cell.neumann_neighborhood()
            .into_iter()
            .filter(|n| self.can_move_to(n))
            .collect()
    }

    fn get_ix(&self, cell: &Cell) -> usize {
        cell.row as usize * self.cols + cell.col as usize
    }

    /// Updates a cell. Joins newly connected components and flags the components as dirty if
    /// they are (potentially) broken apart into multiple.
    pub fn set_blocked(&mut self, cell: &Cell, blocked: bool) -> Result<(), SearchError> {
        self.check_bounds(cell)?;
        if blocked {
            if !self.is_blocked(cell) {
                self.components_dirty = true;
            }
        } else {
            let ix = self.get_ix(cell);
            for n in self.neighborhood_cells(cell) {
                let n_ix = self.get_ix(&n);
                self.components.union(ix, n_ix);
            }
        }
        self.grid.set_point((*cell).into(), blocked);
        Ok(())
    }

    pub fn free_cells(&self) -> impl Iterator<Item = Cell> + '_ {
        self.cells().filter(move |c| !self.is_blocked(c))
    }

    pub fn cells(&self) -> impl Iterator<Item = Cell> {
        let cols = self.cols as i32;
        (0..self.rows as i32).flat_map(move |r| (0..cols).map(move |c| Cell::new(r, c)))
    }

    /// Blocks up to `count` randomly chosen free cells and returns how many were placed. Never
    /// places more obstacles than there are free cells.
    pub fn scatter_obstacles<R: Rng>(&mut self, count: usize, rng: &mut R) -> usize {
        let target = count.min(self.free_cells().count());
        let mut placed = 0;
        while placed < target {
            let cell = Cell::new(
                rng.gen_range(0..self.rows) as i32,
                rng.gen_range(0..self.cols) as i32,
            );
            if !self.is_blocked(&cell) {
                self.grid.set_point(cell.into(), true);
                placed += 1;
            }
        }
        if placed > 0 {
            self.components_dirty = true;
        }
        placed
    }

    /// Checks if start and goal are on the same component.
    pub fn reachable(&self, start: &Cell, goal: &Cell) -> bool {
        !self.unreachable(start, goal)
    }

    /// Checks if start and goal are not on the same component. Blocked and out-of-bounds cells
    /// are unreachable from anywhere but themselves.
    pub fn unreachable(&self, start: &Cell, goal: &Cell) -> bool {
        if start == goal {
            return !self.in_bounds(start);
        }
        if self.is_blocked(start) || self.is_blocked(goal) {
            return true;
        }
        !self
            .components
            .equiv(self.get_ix(start), self.get_ix(goal))
    }

    /// Regenerates the components if they are marked as dirty.
    pub fn update(&mut self) {
        if self.components_dirty {
            debug!("Components are dirty: regenerating components");
            self.generate_components();
        }
    }

    /// Generates a new [UnionFind] structure and links up free neighbours to the same components.
    pub fn generate_components(&mut self) {
        self.components = UnionFind::new(self.rows * self.cols);
        self.components_dirty = false;
        for cell in self.cells() {
            if self.is_blocked(&cell) {
                continue;
            }
            let ix = self.get_ix(&cell);
            // Linking downwards and rightwards covers every edge once.
            for n in [
                Cell::new(cell.row + 1, cell.col),
                Cell::new(cell.row, cell.col + 1),
            ] {
                if self.can_move_to(&n) {
                    let n_ix = self.get_ix(&n);
                    self.components.union(ix, n_ix);
                }
            }
        }
    }
}

impl fmt::Display for ObstacleGrid {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        for r in 0..self.rows as i32 {
            let line = (0..self.cols as i32)
                .map(|c| {
                    if self.is_blocked(&Cell::new(r, c)) {
                        '#'
                    } else {
                        '.'
                    }
                })
                .collect::<String>();
            writeln!(f, "{}", line)?;
        }
        Ok(())
    }
}

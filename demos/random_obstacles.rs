use grid_navigation::map::render_map;
use grid_navigation::{Cell, GreedySolver, GridSolver, ObstacleGrid};
use rand::prelude::*;

// Mirrors the interactive flow: a random grid with a fixed number of obstacles, random free start
// and goal cells, then the search with every expansion printed as it happens.

const MIN_DIMENSION: usize = 5;
const MAX_DIMENSION: usize = 30;
const INITIAL_OBSTACLES: usize = 30;

fn main() {
    let seed = std::env::args()
        .nth(1)
        .and_then(|s| s.parse::<u64>().ok())
        .unwrap_or(0);
    let mut rng = StdRng::seed_from_u64(seed);
    let rows = rng.gen_range(MIN_DIMENSION..=MAX_DIMENSION);
    let cols = rng.gen_range(MIN_DIMENSION..=MAX_DIMENSION);
    let mut grid = ObstacleGrid::with_dimensions(rows, cols).unwrap();
    grid.scatter_obstacles(INITIAL_OBSTACLES, &mut rng);
    grid.update();

    let free: Vec<Cell> = grid.free_cells().collect();
    let start = *free.choose(&mut rng).unwrap();
    let goal = *free.choose(&mut rng).unwrap();
    println!("{rows}x{cols} grid, start {start}, goal {goal}");

    let solver = GreedySolver::new();
    let mut expanded = Vec::new();
    let path = solver
        .get_path_observed(&grid, start, goal, &mut |c: Cell| {
            println!("expanding {c}");
            expanded.push(c);
        })
        .unwrap();
    match &path {
        Some(path) => println!("Path found, length: {} steps.", path.len()),
        None => println!("No path found to the goal."),
    }
    println!(
        "{}",
        render_map(&grid, Some(start), Some(goal), path.as_deref(), &expanded)
    );
}

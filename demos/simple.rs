use grid_navigation::map::{parse_map, render_map};
use grid_navigation::observer::ExpansionRecorder;
use grid_navigation::{GreedySolver, GridSolver};

// In this example a path is found on a 3x3 grid with shape
//  ___
// |S  |
// | # |
// |  G|
//  ___
// where
// - # marks an obstacle
// - S marks the start
// - G marks the goal
//
// Cells have a 4-neighborhood

fn main() {
    let scenario = parse_map("S..\n.#.\n..G\n").expect("valid map");
    let (start, goal) = (scenario.start.unwrap(), scenario.goal.unwrap());
    println!("{}", scenario.grid);
    let solver = GreedySolver::new();
    let mut recorder = ExpansionRecorder::default();
    let path = solver
        .get_path_observed(&scenario.grid, start, goal, &mut recorder)
        .unwrap()
        .unwrap();
    println!("Path:");
    for c in &path {
        println!("{}", c);
    }
    println!(
        "{}",
        render_map(
            &scenario.grid,
            Some(start),
            Some(goal),
            Some(path.as_slice()),
            &recorder.expanded
        )
    );
}

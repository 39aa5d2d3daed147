//! Text maps. Two layouts are read:
//!
//! - plain ASCII, one line per row: `.` free, `#` `@` `O` `T` `W` blocked, `S` start and `G`
//!   goal (both free);
//! - [Moving AI](https://movingai.com/benchmarks/formats.html) `.map` files, recognised by their
//!   `type` header line. There `.`, `G` and `S` are passable terrain and everything else blocks.

use crate::error::{MapError, SearchError};
use crate::{Cell, ObstacleGrid};

/// A grid with the optional start and goal markers found on it.
#[derive(Clone, Debug)]
pub struct Scenario {
    pub grid: ObstacleGrid,
    pub start: Option<Cell>,
    pub goal: Option<Cell>,
}

/// Parses either layout. Blank lines before and after the map are ignored; a blank line inside
/// it is an empty row and so rejected as [MapError::Ragged].
pub fn parse_map(text: &str) -> Result<Scenario, MapError> {
    let mut lines: Vec<&str> = text.lines().map(str::trim_end).collect();
    let first = lines.iter().position(|l| !l.is_empty()).unwrap_or(lines.len());
    let last = lines.iter().rposition(|l| !l.is_empty()).map_or(first, |ix| ix + 1);
    lines.truncate(last);
    lines.drain(..first);
    if lines.first().is_some_and(|l| l.starts_with("type")) {
        parse_moving_ai(&lines)
    } else {
        parse_ascii(&lines)
    }
}

fn parse_ascii(lines: &[&str]) -> Result<Scenario, MapError> {
    let mut start = None;
    let mut goal = None;
    let mut blocked = Vec::with_capacity(lines.len());
    for (r, line) in lines.iter().enumerate() {
        let mut row = Vec::with_capacity(line.len());
        for (c, tile) in line.chars().enumerate() {
            let cell = Cell::new(r as i32, c as i32);
            let is_blocked = match tile {
                '.' => false,
                '#' | '@' | 'O' | 'T' | 'W' => true,
                'S' => {
                    place_marker(&mut start, cell, 'S')?;
                    false
                }
                'G' => {
                    place_marker(&mut goal, cell, 'G')?;
                    false
                }
                _ => return Err(MapError::UnknownTile { tile, row: r, col: c }),
            };
            row.push(is_blocked);
        }
        blocked.push(row);
    }
    Ok(Scenario {
        grid: build_grid(&blocked)?,
        start,
        goal,
    })
}

fn place_marker(slot: &mut Option<Cell>, cell: Cell, marker: char) -> Result<(), MapError> {
    if slot.replace(cell).is_some() {
        return Err(MapError::DuplicateMarker { marker });
    }
    Ok(())
}

fn parse_moving_ai(lines: &[&str]) -> Result<Scenario, MapError> {
    let header_value = |line: Option<&&str>, key: &str| -> Result<usize, MapError> {
        line.and_then(|l| l.split_once(' '))
            .filter(|(k, _)| *k == key)
            .and_then(|(_, v)| v.trim().parse::<usize>().ok())
            .ok_or_else(|| MapError::Header(format!("expected `{key} <number>`")))
    };
    let height = header_value(lines.get(1), "height")?;
    let width = header_value(lines.get(2), "width")?;
    if lines.get(3).map(|l| l.trim()) != Some("map") {
        return Err(MapError::Header("expected `map`".to_owned()));
    }
    let rows = &lines[4..];
    if rows.len() != height {
        return Err(MapError::Header(format!(
            "declared height {height} but found {} rows",
            rows.len()
        )));
    }
    let blocked = rows
        .iter()
        .map(|l| l.chars().map(|t| !matches!(t, '.' | 'G' | 'S')).collect())
        .collect::<Vec<Vec<bool>>>();
    if let Some(row) = blocked.iter().position(|r| r.len() != width) {
        return Err(MapError::Ragged {
            row,
            expected: width,
            found: blocked[row].len(),
        });
    }
    Ok(Scenario {
        grid: build_grid(&blocked)?,
        start: None,
        goal: None,
    })
}

fn build_grid(blocked: &[Vec<bool>]) -> Result<ObstacleGrid, MapError> {
    if blocked.is_empty() {
        return Err(MapError::Empty);
    }
    ObstacleGrid::from_rows(blocked).map_err(|err| match err {
        SearchError::Ragged {
            row,
            expected,
            found,
        } => MapError::Ragged {
            row,
            expected,
            found,
        },
        err => MapError::Grid(err),
    })
}

/// Draws the grid with `#` for obstacles, `*` for the path, `+` for expanded cells and the
/// endpoints as `S` and `G`. Later layers win: endpoints over path over expansions.
pub fn render_map(
    grid: &ObstacleGrid,
    start: Option<Cell>,
    goal: Option<Cell>,
    path: Option<&[Cell]>,
    expanded: &[Cell],
) -> String {
    let mut canvas: Vec<Vec<char>> = (0..grid.rows() as i32)
        .map(|r| {
            (0..grid.cols() as i32)
                .map(|c| {
                    if grid.is_blocked(&Cell::new(r, c)) {
                        '#'
                    } else {
                        '.'
                    }
                })
                .collect()
        })
        .collect();
    let mut paint = |cell: &Cell, tile: char| {
        if grid.in_bounds(cell) {
            canvas[cell.row as usize][cell.col as usize] = tile;
        }
    };
    expanded.iter().for_each(|c| paint(c, '+'));
    path.unwrap_or_default().iter().for_each(|c| paint(c, '*'));
    if let Some(start) = start {
        paint(&start, 'S');
    }
    if let Some(goal) = goal {
        paint(&goal, 'G');
    }
    canvas
        .into_iter()
        .map(|row| row.into_iter().collect::<String>() + "\n")
        .collect()
}

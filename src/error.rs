use thiserror::Error;

use crate::cell::Cell;

/// Reasons a search could not run to completion. An unreachable goal is not among them: that
/// is reported as `Ok(None)`.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum SearchError {
    #[error("cell {cell} lies outside the {rows}x{cols} grid")]
    OutOfBounds { cell: Cell, rows: usize, cols: usize },

    #[error("grid dimensions must be positive")]
    EmptyGrid,

    #[error("row {row} has {found} cells, expected {expected}")]
    Ragged {
        row: usize,
        expected: usize,
        found: usize,
    },

    #[error("search exceeded the limit of {limit} expansions")]
    ExpansionLimit { limit: usize },

    #[error("search was cancelled after {expanded} expansions")]
    Cancelled { expanded: usize },
}

/// Configuration error
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("TOML parse error: {0}")]
    Toml(#[from] toml::de::Error),

    #[error("Invalid configuration: {0}")]
    Invalid(String),
}

/// Errors raised while reading a text map.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum MapError {
    #[error("map contains no rows")]
    Empty,

    #[error("malformed map header: {0}")]
    Header(String),

    #[error("row {row} has {found} tiles, expected {expected}")]
    Ragged {
        row: usize,
        expected: usize,
        found: usize,
    },

    #[error("unknown tile {tile:?} at row {row}, column {col}")]
    UnknownTile { tile: char, row: usize, col: usize },

    #[error("marker {marker:?} appears more than once")]
    DuplicateMarker { marker: char },

    #[error(transparent)]
    Grid(#[from] SearchError),
}

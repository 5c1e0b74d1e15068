//! Error types for solving and layout parsing.

use thiserror::Error;

use crate::pieces::Position;

/// Reasons a puzzle is rejected before any search starts.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigError {
    #[error("board must have at least one column and one row, got {columns}x{rows}")]
    EmptyBoard { columns: usize, rows: usize },

    #[error("goal {goal:?} lies outside the {columns}x{rows} board")]
    GoalOutOfBounds {
        goal: Position,
        columns: usize,
        rows: usize,
    },

    #[error("expected at most one general, found {0}")]
    MultipleGenerals(usize),

    #[error("piece {index} ({label}) at {position:?} does not fit inside the board")]
    PieceOutOfBounds {
        index: usize,
        label: String,
        position: Position,
    },

    #[error("piece {index} ({label}) overlaps another piece")]
    Overlap { index: usize, label: String },
}

/// Outcome of a search that did not produce a path.
#[derive(Debug, Error)]
pub enum SolveError {
    #[error("invalid puzzle: {0}")]
    InvalidConfiguration(#[from] ConfigError),

    #[error("no solution after exploring {expanded} boards")]
    NoSolution { expanded: usize },

    #[error("search cancelled")]
    Cancelled,

    #[error("failed to start solver thread: {0}")]
    Spawn(#[from] std::io::Error),
}

/// Problems found while reading a text layout.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum LayoutError {
    #[error("layout is empty")]
    Empty,

    #[error("row {row} has {found} cells, expected {expected}")]
    RaggedRow {
        row: usize,
        expected: usize,
        found: usize,
    },

    #[error("piece '{label}' is not a filled 1x1, 1x2, 2x1 or 2x2 rectangle")]
    UnsupportedShape { label: char },
}

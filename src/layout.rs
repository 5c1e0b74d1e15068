//! Text layouts: reading puzzles from character grids and printing boards.
//!
//! A layout is one line per row. `.` marks an empty cell; any other
//! character labels a piece, and all cells sharing a label must form one
//! filled rectangle whose size picks the shape:
//!
//! ```text
//! ABBC
//! ABBC
//! DEEF
//! DGHF
//! I..J
//! ```
//!
//! Printed boards number pieces instead of using labels: `1`-`9`, then
//! `A`, `B`, ... for the tenth piece onward.

use crate::board::Board;
use crate::error::LayoutError;
use crate::pieces::{Piece, PieceType};

/// A parsed puzzle: board size and pieces in reading order.
#[derive(Clone, Debug)]
pub struct Layout {
    pub columns: usize,
    pub rows: usize,
    pub pieces: Vec<Piece>,
}

/// Extent of one label while scanning.
struct Extent {
    label: char,
    min: (i32, i32),
    max: (i32, i32),
    cells: i32,
}

/// Parses a character grid into pieces. Blank lines around the grid and
/// surrounding whitespace on each line are ignored.
pub fn parse(text: &str) -> Result<Layout, LayoutError> {
    let lines: Vec<Vec<char>> = text
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .map(|line| line.chars().collect())
        .collect();

    let columns = lines.first().map(Vec::len).ok_or(LayoutError::Empty)?;
    let mut extents: Vec<Extent> = Vec::new();

    for (y, line) in lines.iter().enumerate() {
        if line.len() != columns {
            return Err(LayoutError::RaggedRow {
                row: y,
                expected: columns,
                found: line.len(),
            });
        }
        for (x, &label) in line.iter().enumerate() {
            if label == '.' {
                continue;
            }
            let cell = (x as i32, y as i32);
            match extents.iter_mut().find(|extent| extent.label == label) {
                Some(extent) => {
                    extent.min = (extent.min.0.min(cell.0), extent.min.1.min(cell.1));
                    extent.max = (extent.max.0.max(cell.0), extent.max.1.max(cell.1));
                    extent.cells += 1;
                }
                None => extents.push(Extent {
                    label,
                    min: cell,
                    max: cell,
                    cells: 1,
                }),
            }
        }
    }

    let pieces = extents
        .into_iter()
        .map(|extent| {
            let width = extent.max.0 - extent.min.0 + 1;
            let height = extent.max.1 - extent.min.1 + 1;
            PieceType::from_footprint(width, height)
                .filter(|_| extent.cells == width * height)
                .map(|kind| Piece::new(extent.label.to_string(), kind, extent.min))
                .ok_or(LayoutError::UnsupportedShape {
                    label: extent.label,
                })
        })
        .collect::<Result<Vec<_>, _>>()?;

    Ok(Layout {
        columns,
        rows: lines.len(),
        pieces,
    })
}

/// Display character for a piece index.
fn piece_char(index: usize) -> char {
    let number = index + 1;
    match number {
        1..=9 => char::from(b'0' + number as u8),
        10..=35 => char::from(b'A' + (number - 10) as u8),
        _ => '#',
    }
}

/// Renders `pieces` on a `columns x rows` grid, one line per row.
pub fn format(pieces: &[Piece], columns: usize, rows: usize) -> String {
    let mut grid = vec!['.'; columns * rows];
    for (index, piece) in pieces.iter().enumerate() {
        for (x, y) in piece.cells() {
            if (0..columns as i32).contains(&x) && (0..rows as i32).contains(&y) {
                grid[y as usize * columns + x as usize] = piece_char(index);
            }
        }
    }

    let mut output = String::with_capacity((columns + 1) * rows);
    for row in grid.chunks(columns.max(1)) {
        output.extend(row);
        output.push('\n');
    }
    output
}

/// Renders one board.
pub fn format_board(board: &Board) -> String {
    format(board.pieces(), board.columns(), board.rows())
}

/// Renders a solution path step by step.
pub fn format_path(path: &[Board]) -> String {
    let mut output = String::new();
    for board in path {
        output.push_str(&format!("Step {}:\n", board.step()));
        output.push_str(&format_board(board));
        output.push('\n');
    }
    output
}

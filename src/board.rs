//! Board state: occupancy grid, piece list and search bookkeeping.
//!
//! The grid carries a one-cell border on every side so that neighbour
//! lookups never leave the array. Board-local coordinate `(x, y)` lives at
//! grid cell `(x + 1, y + 1)`. Each cell holds `BORDER`, `EMPTY`, or the
//! 1-based index of the piece covering it.

use crate::config::Direction;
use crate::pieces::{Piece, PieceType, Position};

/// Grid value of a border sentinel.
pub const BORDER: i32 = -1;
/// Grid value of an empty cell.
pub const EMPTY: i32 = 0;

/// One reachable configuration of the puzzle.
///
/// A board owns its grid and pieces outright. `parent` is an index into the
/// solver's board arena, not a reference, so boards can be cloned freely.
#[derive(Clone, Debug)]
pub struct Board {
    columns: usize,
    rows: usize,
    grid: Vec<i32>,
    pieces: Vec<Piece>,
    pub(crate) step: u32,
    pub(crate) hash: u64,
    pub(crate) mirror_hash: u64,
    pub(crate) parent: Option<usize>,
}

impl Board {
    /// An empty `columns x rows` board surrounded by border cells.
    pub fn empty(columns: usize, rows: usize) -> Self {
        let width = columns + 2;
        let height = rows + 2;
        let mut grid = vec![EMPTY; width * height];

        for gy in 0..height {
            for gx in 0..width {
                if gx == 0 || gy == 0 || gx == width - 1 || gy == height - 1 {
                    grid[gy * width + gx] = BORDER;
                }
            }
        }

        Self {
            columns,
            rows,
            grid,
            pieces: Vec::new(),
            step: 0,
            hash: 0,
            mirror_hash: 0,
            parent: None,
        }
    }

    /// Builds a board holding `pieces`, which must already be validated.
    pub fn with_pieces(columns: usize, rows: usize, pieces: Vec<Piece>) -> Self {
        let mut board = Self::empty(columns, rows);
        for (index, piece) in pieces.iter().enumerate() {
            board.place(piece.kind, piece.position, index);
        }
        board.pieces = pieces;
        board
    }

    #[inline]
    pub fn columns(&self) -> usize {
        self.columns
    }

    #[inline]
    pub fn rows(&self) -> usize {
        self.rows
    }

    #[inline]
    pub fn pieces(&self) -> &[Piece] {
        &self.pieces
    }

    /// Logical steps from the initial board.
    #[inline]
    pub fn step(&self) -> u32 {
        self.step
    }

    #[inline]
    pub fn hash(&self) -> u64 {
        self.hash
    }

    #[inline]
    pub fn mirror_hash(&self) -> u64 {
        self.mirror_hash
    }

    /// Arena index of the board this one was derived from.
    #[inline]
    pub fn parent(&self) -> Option<usize> {
        self.parent
    }

    /// Grid index of a board-local coordinate. Accepts the border ring.
    #[inline(always)]
    fn grid_index(&self, (x, y): Position) -> usize {
        let width = self.columns + 2;
        (y + 1) as usize * width + (x + 1) as usize
    }

    /// Raw grid value at a board-local coordinate (`-1..=columns`, `-1..=rows`).
    #[inline]
    pub fn cell(&self, position: Position) -> i32 {
        self.grid[self.grid_index(position)]
    }

    /// Index of the piece covering `position`, if any.
    pub fn piece_at(&self, position: Position) -> Option<usize> {
        match self.cell(position) {
            value if value > EMPTY => Some((value - 1) as usize),
            _ => None,
        }
    }

    /// Zobrist cell state at `position`: 0 for empty, the piece tag otherwise.
    #[inline]
    pub fn cell_state(&self, position: Position) -> usize {
        self.piece_at(position)
            .and_then(|index| self.pieces.get(index))
            .map_or(0, |piece| piece.kind.tag())
    }

    fn fill(&mut self, kind: PieceType, anchor: Position, value: i32) {
        for cell in kind.cells(anchor) {
            let index = self.grid_index(cell);
            self.grid[index] = value;
        }
    }

    /// Marks the footprint of `kind` at `anchor` as owned by `piece_index`.
    pub fn place(&mut self, kind: PieceType, anchor: Position, piece_index: usize) {
        self.fill(kind, anchor, piece_index as i32 + 1);
    }

    /// Clears the footprint of `kind` at `anchor` back to `EMPTY`.
    pub fn remove(&mut self, kind: PieceType, anchor: Position) {
        self.fill(kind, anchor, EMPTY);
    }

    /// True when every cell the piece would cover after one step in
    /// `direction` is empty or already its own.
    pub fn can_move(&self, piece_index: usize, direction: Direction) -> bool {
        let Some(piece) = self.pieces.get(piece_index) else {
            return false;
        };
        let own = piece_index as i32 + 1;
        let (dx, dy) = direction.delta();

        piece.cells().all(|(x, y)| {
            let target = self.cell((x + dx, y + dy));
            target == EMPTY || target == own
        })
    }

    /// True when the general sits on the goal cell.
    #[inline]
    pub fn goal_reached(&self, general_index: usize, goal: Position) -> bool {
        self.pieces
            .get(general_index)
            .is_some_and(|piece| piece.position == goal)
    }

    /// Returns a copy of this board with one piece shifted a cell.
    ///
    /// Hashes, step and parent are carried over unchanged; the caller is
    /// expected to overwrite them. The move must be legal.
    pub fn moved(&self, piece_index: usize, direction: Direction) -> Board {
        let mut next = self.clone();
        let piece = next.pieces[piece_index].translated(direction.delta());

        next.remove(piece.kind, self.pieces[piece_index].position);
        next.place(piece.kind, piece.position, piece_index);
        next.pieces[piece_index] = piece;
        next
    }
}

//! Zobrist fingerprints of boards and of their left-right reflections.
//!
//! The table holds one random key per `(column, row, cell state)`. A board's
//! hash XORs the key of every interior cell. The mirror hash reads each
//! column from its reflected position while indexing the table by the
//! unreflected column, so it equals the hash of the flipped board.
//!
//! After a move only the cells under the moving piece change, which lets
//! `delta_hash` update a hash in at most eight table lookups per side.

use rand::{Rng, SeedableRng};
use rand_xoshiro::Xoshiro256PlusPlus;

use crate::board::Board;
use crate::config::Direction;
use crate::pieces::CELL_STATES;

/// Random key table for a fixed board size.
pub struct Zobrist {
    columns: usize,
    rows: usize,
    /// Flattened `[column][row][state]`.
    keys: Vec<u64>,
}

impl Zobrist {
    /// Fills the table from `rng`. Keys are drawn from `1..=i64::MAX` so
    /// that no key is the XOR identity.
    pub fn new<R: Rng>(columns: usize, rows: usize, rng: &mut R) -> Self {
        let keys = (0..columns * rows * CELL_STATES)
            .map(|_| rng.random_range(1..=i64::MAX as u64))
            .collect();
        Self {
            columns,
            rows,
            keys,
        }
    }

    /// Reproducible table for tests and seeded runs.
    pub fn seeded(columns: usize, rows: usize, seed: u64) -> Self {
        let mut rng = Xoshiro256PlusPlus::seed_from_u64(seed);
        Self::new(columns, rows, &mut rng)
    }

    #[inline(always)]
    fn key(&self, column: i32, row: i32, state: usize) -> u64 {
        let index = (column as usize * self.rows + row as usize) * CELL_STATES + state;
        self.keys[index]
    }

    /// Table column used for board column `x`.
    #[inline(always)]
    fn column(&self, x: i32, mirrored: bool) -> i32 {
        if mirrored {
            self.columns as i32 - 1 - x
        } else {
            x
        }
    }

    /// Hashes every interior cell of `board` from scratch.
    pub fn full_hash(&self, board: &Board, mirrored: bool) -> u64 {
        let mut hash = 0;
        for column in 0..self.columns as i32 {
            for row in 0..self.rows as i32 {
                let x = self.column(column, mirrored);
                hash ^= self.key(column, row, board.cell_state((x, row)));
            }
        }
        hash
    }

    /// Hash of the board that results from moving `piece_index` one cell in
    /// `direction`, derived from the current hash of `board`.
    ///
    /// Each covered cell toggles a `(piece, empty)` key pair: the old cells
    /// flip from piece to empty and the new cells from empty to piece. Cells
    /// covered both before and after toggle twice and cancel out.
    pub fn delta_hash(
        &self,
        board: &Board,
        piece_index: usize,
        direction: Direction,
        mirrored: bool,
    ) -> u64 {
        let piece = &board.pieces()[piece_index];
        let state = piece.kind.tag();
        let mut hash = if mirrored {
            board.mirror_hash()
        } else {
            board.hash()
        };

        // in the reflected layout the piece moves the other way horizontally
        let (dx, dy) = if mirrored {
            direction.mirrored().delta()
        } else {
            direction.delta()
        };

        for (x, y) in piece.cells() {
            let column = self.column(x, mirrored);
            hash ^= self.pair(column, y, state);
            hash ^= self.pair(column + dx, y + dy, state);
        }
        hash
    }

    #[inline(always)]
    fn pair(&self, column: i32, row: i32, state: usize) -> u64 {
        self.key(column, row, state) ^ self.key(column, row, 0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::DIRECTIONS;
    use crate::pieces::{standard_pieces, Piece, PieceType};

    fn hashed(zobrist: &Zobrist, mut board: Board) -> Board {
        board.hash = zobrist.full_hash(&board, false);
        board.mirror_hash = zobrist.full_hash(&board, true);
        board
    }

    /// Mirrors every piece across the vertical axis.
    fn reflect(pieces: &[Piece], columns: usize) -> Vec<Piece> {
        pieces
            .iter()
            .map(|piece| {
                let (x, y) = piece.position;
                let (width, _) = piece.footprint();
                Piece::new(piece.label.clone(), piece.kind, (columns as i32 - x - width, y))
            })
            .collect()
    }

    #[test]
    fn test_keys_are_nonzero_and_positive() {
        let zobrist = Zobrist::seeded(4, 5, 7);
        assert_eq!(zobrist.keys.len(), 4 * 5 * CELL_STATES);
        assert!(zobrist.keys.iter().all(|&key| key != 0 && key <= i64::MAX as u64));
    }

    #[test]
    fn test_seeded_tables_are_reproducible() {
        let a = Zobrist::seeded(4, 5, 42);
        let b = Zobrist::seeded(4, 5, 42);
        let c = Zobrist::seeded(4, 5, 43);
        assert_eq!(a.keys, b.keys);
        assert_ne!(a.keys, c.keys);
    }

    #[test]
    fn test_mirror_hash_matches_reflected_board() {
        let zobrist = Zobrist::seeded(4, 5, 1);
        let pieces = standard_pieces();
        // shift one soldier so the layout is not symmetric
        let mut asymmetric = pieces.clone();
        asymmetric[9] = asymmetric[9].translated((-1, 0));

        let board = Board::with_pieces(4, 5, asymmetric.clone());
        let reflected = Board::with_pieces(4, 5, reflect(&asymmetric, 4));

        assert_eq!(
            zobrist.full_hash(&board, true),
            zobrist.full_hash(&reflected, false)
        );
        assert_ne!(
            zobrist.full_hash(&board, false),
            zobrist.full_hash(&reflected, false)
        );
    }

    #[test]
    fn test_delta_matches_full_hash_for_every_legal_move() {
        let zobrist = Zobrist::seeded(4, 5, 99);
        let mut frontier = vec![hashed(&zobrist, Board::with_pieces(4, 5, standard_pieces()))];

        // walk a few plies so every piece shape gets to move
        for _ in 0..6 {
            let mut next = Vec::new();
            for board in &frontier {
                for piece_index in 0..board.pieces().len() {
                    for direction in DIRECTIONS {
                        if !board.can_move(piece_index, direction) {
                            continue;
                        }
                        let mut moved = board.moved(piece_index, direction);
                        for mirrored in [false, true] {
                            let delta = zobrist.delta_hash(board, piece_index, direction, mirrored);
                            assert_eq!(
                                delta,
                                zobrist.full_hash(&moved, mirrored),
                                "piece {piece_index} {direction:?} mirrored={mirrored}"
                            );
                        }
                        moved.hash = zobrist.delta_hash(board, piece_index, direction, false);
                        moved.mirror_hash = zobrist.delta_hash(board, piece_index, direction, true);
                        next.push(moved);
                    }
                }
            }
            next.truncate(64);
            frontier = next;
        }
    }

    #[test]
    fn test_delta_for_each_shape_on_open_board() {
        let zobrist = Zobrist::seeded(5, 5, 3);
        for kind in PieceType::ALL {
            let board = hashed(
                &zobrist,
                Board::with_pieces(5, 5, vec![Piece::new("p", kind, (1, 1))]),
            );
            for direction in DIRECTIONS {
                assert!(board.can_move(0, direction));
                let moved = board.moved(0, direction);
                for mirrored in [false, true] {
                    assert_eq!(
                        zobrist.delta_hash(&board, 0, direction, mirrored),
                        zobrist.full_hash(&moved, mirrored),
                        "{kind:?} {direction:?} mirrored={mirrored}"
                    );
                }
            }
        }
    }

    #[test]
    fn test_move_and_back_restores_hash() {
        let zobrist = Zobrist::seeded(4, 5, 5);
        let board = hashed(&zobrist, Board::with_pieces(4, 5, standard_pieces()));
        let mut moved = board.moved(9, Direction::Left);
        moved.hash = zobrist.delta_hash(&board, 9, Direction::Left, false);
        assert_ne!(moved.hash, board.hash);
        assert_eq!(zobrist.delta_hash(&moved, 9, Direction::Right, false), board.hash);
    }
}

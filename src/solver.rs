//! Breadth-first shortest-path search.
//!
//! Key points:
//! - Boards live in one append-only arena that doubles as the BFS queue;
//!   a read cursor walks it and nothing is ever evicted, so parent indices
//!   stay valid for path reconstruction
//! - Zobrist hashes are updated incrementally per move and deduplicated in
//!   an FxHashSet
//! - With mirror exclusion a board and its reflection share one node
//! - A second slide of the same piece is recorded as its own board at the
//!   same step, so a two-cell slide costs one logical step

use std::sync::atomic::{AtomicBool, Ordering};

use log::{debug, info};
use rand::Rng;
use rustc_hash::FxHashSet;

use crate::board::Board;
use crate::config::{Configuration, Direction};
use crate::error::SolveError;
use crate::pieces::Piece;
use crate::zobrist::Zobrist;

/// Counters of one search run.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct SearchStats {
    /// Boards taken off the queue.
    pub expanded: usize,
    /// Boards appended to the arena, the initial one included.
    pub discovered: usize,
}

/// A shortest path, one board per logical step, initial board first.
#[derive(Clone, Debug)]
pub struct Solution {
    pub path: Vec<Board>,
    pub stats: SearchStats,
}

impl Solution {
    /// Logical steps from the initial board to the goal.
    pub fn steps(&self) -> u32 {
        self.path.last().map_or(0, Board::step)
    }
}

/// Solves `pieces` under `config` on the calling thread.
pub fn solve(pieces: &[Piece], config: &Configuration) -> Result<Solution, SolveError> {
    let never = AtomicBool::new(false);
    Search::new(pieces.to_vec(), config.clone())?.run(&never)
}

/// State of one search: configuration, hash table, arena and visited set.
pub(crate) struct Search {
    config: Configuration,
    zobrist: Zobrist,
    boards: Vec<Board>,
    visited: FxHashSet<u64>,
    general: Option<usize>,
    /// Mirror exclusion as actually applied.
    exclude_mirror: bool,
}

impl Search {
    /// Validates the puzzle and seeds the arena with the initial board.
    pub(crate) fn new(pieces: Vec<Piece>, config: Configuration) -> Result<Self, SolveError> {
        let general = config.validate(&pieces)?;

        let exclude_mirror = config.exclude_mirror_states && config.goal_is_symmetric();
        if config.exclude_mirror_states && !exclude_mirror {
            debug!("goal {:?} is off-centre, keeping mirror boards", config.goal);
        }

        let seed = config.seed.unwrap_or_else(|| rand::rng().random());
        debug!("zobrist table {}x{} seed {seed:#x}", config.columns, config.rows);
        let zobrist = Zobrist::seeded(config.columns, config.rows, seed);

        let mut root = Board::with_pieces(config.columns, config.rows, pieces);
        root.hash = zobrist.full_hash(&root, false);
        root.mirror_hash = zobrist.full_hash(&root, true);

        Ok(Self {
            config,
            zobrist,
            boards: vec![root],
            visited: FxHashSet::default(),
            general,
            exclude_mirror,
        })
    }

    /// Runs until the goal is dequeued, the arena is exhausted, or `cancel`
    /// is raised. The flag is polled once per dequeued board.
    pub(crate) fn run(mut self, cancel: &AtomicBool) -> Result<Solution, SolveError> {
        info!(
            "solving {}x{} board with {} pieces, goal {:?}",
            self.config.columns,
            self.config.rows,
            self.boards[0].pieces().len(),
            self.config.goal
        );

        let mut cursor = 0;
        while cursor < self.boards.len() {
            if cancel.load(Ordering::Relaxed) {
                debug!("search cancelled after {cursor} boards");
                return Err(SolveError::Cancelled);
            }

            let current = cursor;
            cursor += 1;
            self.mark_visited(current);

            if self.is_goal(current) {
                let stats = self.stats(cursor);
                let path = self.path_to(current);
                info!(
                    "solved in {} steps ({} expanded, {} discovered)",
                    self.boards[current].step(),
                    stats.expanded,
                    stats.discovered
                );
                return Ok(Solution { path, stats });
            }

            self.expand(current);
        }

        info!("no solution after {cursor} boards");
        Err(SolveError::NoSolution { expanded: cursor })
    }

    fn stats(&self, expanded: usize) -> SearchStats {
        SearchStats {
            expanded,
            discovered: self.boards.len(),
        }
    }

    fn is_goal(&self, index: usize) -> bool {
        self.general
            .is_some_and(|general| self.boards[index].goal_reached(general, self.config.goal))
    }

    fn mark_visited(&mut self, index: usize) {
        let board = &self.boards[index];
        self.visited.insert(board.hash());
        if self.exclude_mirror {
            self.visited.insert(board.mirror_hash());
        }
    }

    /// Appends every unseen successor of `index`.
    ///
    /// A second slide of the same piece keeps the step of the first slide
    /// and hangs off it, so the physical chain survives for path
    /// reconstruction. When the first slide lands on a known board the
    /// second is still tried, hanging directly off `index` instead.
    fn expand(&mut self, index: usize) {
        let piece_count = self.boards[index].pieces().len();
        for piece_index in 0..piece_count {
            for &first in self.config.directions() {
                let Some(mut once) = self.successor(&self.boards[index], piece_index, first) else {
                    continue;
                };
                once.parent = Some(index);

                let twice: Vec<Board> = self
                    .config
                    .second_move_directions(first)
                    .filter_map(|second| self.successor(&once, piece_index, second))
                    .collect();

                let step = once.step;
                let origin = if self.is_new(&once) {
                    self.push(once)
                } else {
                    index
                };

                for mut next in twice {
                    next.step = step;
                    next.parent = Some(origin);
                    if self.is_new(&next) {
                        self.push(next);
                    }
                }
            }
        }
    }

    /// The board after sliding one piece a cell, with fresh hashes and the
    /// step after `board`. `None` when the slide is blocked.
    fn successor(&self, board: &Board, piece_index: usize, direction: Direction) -> Option<Board> {
        if !board.can_move(piece_index, direction) {
            return None;
        }

        let mut next = board.moved(piece_index, direction);
        next.hash = self.zobrist.delta_hash(board, piece_index, direction, false);
        next.mirror_hash = self.zobrist.delta_hash(board, piece_index, direction, true);
        next.step = board.step + 1;
        Some(next)
    }

    fn is_new(&self, board: &Board) -> bool {
        !self.visited.contains(&board.hash())
            && !(self.exclude_mirror && self.visited.contains(&board.mirror_hash()))
    }

    /// Appends `board` to the arena and marks it visited right away, so a
    /// sibling expansion cannot enqueue it twice.
    fn push(&mut self, board: Board) -> usize {
        let index = self.boards.len();
        self.boards.push(board);
        self.mark_visited(index);
        index
    }

    /// Walks parent links back to the root, keeping one board per logical
    /// step, and returns the boards root first.
    fn path_to(&self, goal: usize) -> Vec<Board> {
        let mut path = Vec::new();
        let mut cursor = Some(goal);

        while let Some(index) = cursor {
            let board = &self.boards[index];
            path.push(board.clone());
            cursor = match board.parent() {
                Some(parent) if self.boards[parent].step() == board.step() => {
                    self.boards[parent].parent()
                }
                parent => parent,
            };
        }

        path.reverse();
        path
    }
}

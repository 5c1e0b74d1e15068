//! Huarong Dao Solver Library
//!
//! Finds the shortest sequence of moves that brings the general (the 2x2
//! piece) to the exit of a sliding-block board. A piece sliding two cells
//! in one go counts as a single step.

pub mod board;
pub mod config;
pub mod engine;
pub mod error;
pub mod layout;
pub mod pieces;
pub mod solver;
pub mod zobrist;

pub use board::Board;
pub use config::{Configuration, Direction};
pub use engine::{Engine, SolveHandle};
pub use error::{ConfigError, LayoutError, SolveError};
pub use pieces::{standard_pieces, Piece, PieceType, Position};
pub use solver::{solve, SearchStats, Solution};

//! Solve parameters and move directions.

use log::debug;

use crate::error::ConfigError;
use crate::pieces::{Piece, PieceType, Position, STANDARD_COLUMNS, STANDARD_GOAL, STANDARD_ROWS};

/// One of the four orthogonal sliding directions.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Direction {
    Down,
    Right,
    Up,
    Left,
}

/// Iteration order of move generation. Opposite directions sit two apart.
pub const DIRECTIONS: [Direction; 4] = [
    Direction::Down,
    Direction::Right,
    Direction::Up,
    Direction::Left,
];

impl Direction {
    /// Cell offset `(dx, dy)`, y pointing down.
    #[inline]
    pub const fn delta(self) -> (i32, i32) {
        match self {
            Direction::Down => (0, 1),
            Direction::Right => (1, 0),
            Direction::Up => (0, -1),
            Direction::Left => (-1, 0),
        }
    }

    #[inline]
    pub const fn reverse(self) -> Direction {
        match self {
            Direction::Down => Direction::Up,
            Direction::Right => Direction::Left,
            Direction::Up => Direction::Down,
            Direction::Left => Direction::Right,
        }
    }

    /// The same move seen on the left-right reflected board.
    #[inline]
    pub const fn mirrored(self) -> Direction {
        match self {
            Direction::Right => Direction::Left,
            Direction::Left => Direction::Right,
            other => other,
        }
    }
}

/// Immutable parameters of one solve.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Configuration {
    pub columns: usize,
    pub rows: usize,
    /// Cell the general's top-left corner must reach.
    pub goal: Position,
    /// Treat a board and its left-right reflection as the same node.
    pub exclude_mirror_states: bool,
    /// Let the second half of a double move turn (but never reverse).
    pub allow_different_direction_double_move: bool,
    /// Seed for the Zobrist table; `None` draws a fresh one per run.
    pub seed: Option<u64>,
}

impl Default for Configuration {
    fn default() -> Self {
        Self::standard()
    }
}

impl Configuration {
    /// The classic 4x5 board with the exit at the bottom centre.
    pub const fn standard() -> Self {
        Self {
            columns: STANDARD_COLUMNS,
            rows: STANDARD_ROWS,
            goal: STANDARD_GOAL,
            exclude_mirror_states: true,
            allow_different_direction_double_move: false,
            seed: None,
        }
    }

    pub fn with_size(mut self, columns: usize, rows: usize) -> Self {
        self.columns = columns;
        self.rows = rows;
        self
    }

    pub fn with_goal(mut self, goal: Position) -> Self {
        self.goal = goal;
        self
    }

    pub fn with_mirror_exclusion(mut self, exclude: bool) -> Self {
        self.exclude_mirror_states = exclude;
        self
    }

    pub fn with_different_direction_double_move(mut self, allow: bool) -> Self {
        self.allow_different_direction_double_move = allow;
        self
    }

    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Move directions, in generation order.
    #[inline]
    pub fn directions(&self) -> &'static [Direction; 4] {
        &DIRECTIONS
    }

    /// True when the goal maps onto itself under a left-right reflection.
    /// Only then is a board interchangeable with its mirror image.
    pub fn goal_is_symmetric(&self) -> bool {
        let (width, _) = PieceType::General.footprint();
        2 * self.goal.0 as i64 + width as i64 == self.columns as i64
    }

    /// Directions tried for the second half of a double move that started
    /// with `first`.
    pub fn second_move_directions(&self, first: Direction) -> impl Iterator<Item = Direction> {
        let any = self.allow_different_direction_double_move;
        DIRECTIONS
            .into_iter()
            .filter(move |&second| if any { second != first.reverse() } else { second == first })
    }

    /// Checks `pieces` against this configuration.
    ///
    /// Returns the index of the general, or `None` when the layout has no
    /// general at all (such a puzzle can be searched but never solved).
    pub fn validate(&self, pieces: &[Piece]) -> Result<Option<usize>, ConfigError> {
        if self.columns == 0 || self.rows == 0 {
            return Err(ConfigError::EmptyBoard {
                columns: self.columns,
                rows: self.rows,
            });
        }

        let (goal_x, goal_y) = self.goal;
        if goal_x < 0
            || goal_y < 0
            || goal_x as usize >= self.columns
            || goal_y as usize >= self.rows
        {
            return Err(ConfigError::GoalOutOfBounds {
                goal: self.goal,
                columns: self.columns,
                rows: self.rows,
            });
        }

        let generals: Vec<usize> = pieces
            .iter()
            .enumerate()
            .filter(|(_, piece)| piece.kind == PieceType::General)
            .map(|(index, _)| index)
            .collect();
        if generals.len() > 1 {
            return Err(ConfigError::MultipleGenerals(generals.len()));
        }

        for (index, piece) in pieces.iter().enumerate() {
            if !piece.fits(self.columns, self.rows, &[]) {
                return Err(ConfigError::PieceOutOfBounds {
                    index,
                    label: piece.label.clone(),
                    position: piece.position,
                });
            }
            if pieces[..index].iter().any(|other| piece.intersects(other)) {
                return Err(ConfigError::Overlap {
                    index,
                    label: piece.label.clone(),
                });
            }
        }

        if generals.is_empty() {
            debug!("layout has no general, the goal cannot be reached");
        }
        Ok(generals.first().copied())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pieces::standard_pieces;

    #[test]
    fn test_reverse_is_two_steps_apart() {
        for (i, direction) in DIRECTIONS.iter().enumerate() {
            assert_eq!(direction.reverse(), DIRECTIONS[(i + 2) % 4]);
            let (dx, dy) = direction.delta();
            let (rx, ry) = direction.reverse().delta();
            assert_eq!((dx + rx, dy + ry), (0, 0));
        }
    }

    #[test]
    fn test_mirrored_negates_horizontal_component() {
        for direction in DIRECTIONS {
            let (dx, dy) = direction.delta();
            assert_eq!(direction.mirrored().delta(), (-dx, dy));
        }
    }

    #[test]
    fn test_second_move_directions() {
        let same = Configuration::standard();
        let second: Vec<_> = same.second_move_directions(Direction::Right).collect();
        assert_eq!(second, vec![Direction::Right]);

        let turning = Configuration::standard().with_different_direction_double_move(true);
        let second: Vec<_> = turning.second_move_directions(Direction::Right).collect();
        assert_eq!(second, vec![Direction::Down, Direction::Right, Direction::Up]);
    }

    #[test]
    fn test_goal_symmetry() {
        assert!(Configuration::standard().goal_is_symmetric());
        assert!(!Configuration::standard().with_goal((0, 3)).goal_is_symmetric());
        assert!(!Configuration::standard().with_size(5, 5).goal_is_symmetric());
    }

    #[test]
    fn test_standard_layout_validates() {
        let config = Configuration::standard();
        assert_eq!(config.validate(&standard_pieces()), Ok(Some(1)));
    }

    #[test]
    fn test_rejects_goal_outside_board() {
        let config = Configuration::standard().with_goal((4, 0));
        assert!(matches!(
            config.validate(&standard_pieces()),
            Err(ConfigError::GoalOutOfBounds { .. })
        ));
    }

    #[test]
    fn test_rejects_empty_board() {
        let config = Configuration::standard().with_size(0, 5);
        assert!(matches!(
            config.validate(&[]),
            Err(ConfigError::EmptyBoard { .. })
        ));
    }

    #[test]
    fn test_rejects_second_general() {
        let pieces = vec![
            Piece::new("a", PieceType::General, (0, 0)),
            Piece::new("b", PieceType::General, (2, 0)),
        ];
        assert_eq!(
            Configuration::standard().validate(&pieces),
            Err(ConfigError::MultipleGenerals(2))
        );
    }

    #[test]
    fn test_rejects_overlap_and_out_of_bounds() {
        let overlapping = vec![
            Piece::new("g", PieceType::General, (1, 0)),
            Piece::new("s", PieceType::Soldier, (2, 1)),
        ];
        assert!(matches!(
            Configuration::standard().validate(&overlapping),
            Err(ConfigError::Overlap { index: 1, .. })
        ));

        let outside = vec![Piece::new("h", PieceType::CommanderHorizontal, (3, 0))];
        assert!(matches!(
            Configuration::standard().validate(&outside),
            Err(ConfigError::PieceOutOfBounds { index: 0, .. })
        ));
    }

    #[test]
    fn test_missing_general_is_allowed() {
        let pieces = vec![Piece::new("s", PieceType::Soldier, (0, 0))];
        assert_eq!(Configuration::standard().validate(&pieces), Ok(None));
    }
}

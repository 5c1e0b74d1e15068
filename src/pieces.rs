//! Piece shapes and coordinate types.
//!
//! Every piece is an axis-aligned rectangle anchored at its top-left cell.
//! The x axis points right and the y axis points down.

/// A board-local cell coordinate `(x, y)`, borders excluded.
pub type Position = (i32, i32);

/// Number of distinct cell states: one per piece type plus the empty state.
pub const CELL_STATES: usize = PieceType::ALL.len() + 1;

/// The four piece shapes of the puzzle.
///
/// The discriminant is the tag used by the Zobrist table, so 0 stays free
/// for the empty cell.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum PieceType {
    /// 1x1.
    Soldier = 1,
    /// 1x2, tall.
    CommanderVertical = 2,
    /// 2x1, wide.
    CommanderHorizontal = 3,
    /// 2x2, the piece that has to reach the goal.
    General = 4,
}

impl PieceType {
    pub const ALL: [PieceType; 4] = [
        PieceType::Soldier,
        PieceType::CommanderVertical,
        PieceType::CommanderHorizontal,
        PieceType::General,
    ];

    /// Returns `(width, height)` of the shape in cells.
    #[inline]
    pub const fn footprint(self) -> (i32, i32) {
        match self {
            PieceType::Soldier => (1, 1),
            PieceType::CommanderVertical => (1, 2),
            PieceType::CommanderHorizontal => (2, 1),
            PieceType::General => (2, 2),
        }
    }

    /// Looks up the shape with the given footprint.
    pub const fn from_footprint(width: i32, height: i32) -> Option<PieceType> {
        match (width, height) {
            (1, 1) => Some(PieceType::Soldier),
            (1, 2) => Some(PieceType::CommanderVertical),
            (2, 1) => Some(PieceType::CommanderHorizontal),
            (2, 2) => Some(PieceType::General),
            _ => None,
        }
    }

    /// The cell-state tag of this shape (1..=4).
    #[inline]
    pub const fn tag(self) -> usize {
        self as usize
    }

    /// Iterates the cells covered by this shape when anchored at `anchor`.
    #[inline]
    pub fn cells(self, anchor: Position) -> impl Iterator<Item = Position> {
        let (width, height) = self.footprint();
        (0..height).flat_map(move |dy| (0..width).map(move |dx| (anchor.0 + dx, anchor.1 + dy)))
    }
}

/// A piece placed on the board.
///
/// Pieces are values: a move produces a new `Piece`, the old one is left
/// untouched so that earlier boards stay valid.
#[derive(Clone, Debug)]
pub struct Piece {
    /// Display key, ignored by the search.
    pub label: String,
    pub kind: PieceType,
    /// Top-left cell of the footprint.
    pub position: Position,
}

/// Pieces compare by position only; labels are presentation.
impl PartialEq for Piece {
    fn eq(&self, other: &Self) -> bool {
        self.position == other.position
    }
}

impl Eq for Piece {}

impl Piece {
    pub fn new(label: impl Into<String>, kind: PieceType, position: Position) -> Self {
        Self {
            label: label.into(),
            kind,
            position,
        }
    }

    #[inline]
    pub fn footprint(&self) -> (i32, i32) {
        self.kind.footprint()
    }

    /// Cells currently covered by this piece.
    #[inline]
    pub fn cells(&self) -> impl Iterator<Item = Position> {
        self.kind.cells(self.position)
    }

    /// Returns a copy of this piece shifted by `(dx, dy)`.
    pub fn translated(&self, (dx, dy): (i32, i32)) -> Self {
        Self {
            label: self.label.clone(),
            kind: self.kind,
            position: (self.position.0 + dx, self.position.1 + dy),
        }
    }

    /// Checks that this piece lies inside a `columns x rows` board and
    /// overlaps none of `others`.
    pub fn fits(&self, columns: usize, rows: usize, others: &[Piece]) -> bool {
        let (x, y) = self.position;
        let (width, height) = self.footprint();
        let inside = x >= 0
            && y >= 0
            && (x + width) as i64 <= columns as i64
            && (y + height) as i64 <= rows as i64;
        inside && !others.iter().any(|other| self.intersects(other))
    }

    /// Half-open rectangle overlap test: touching edges do not intersect.
    pub fn intersects(&self, other: &Piece) -> bool {
        let (x, y) = self.position;
        let (w, h) = self.footprint();
        let (ox, oy) = other.position;
        let (ow, oh) = other.footprint();
        !(x + w <= ox || y + h <= oy || ox + ow <= x || oy + oh <= y)
    }

    /// Default display label for a new piece of `kind`, given what is
    /// already on the board. Numbered labels wrap after four.
    pub fn assign_label(kind: PieceType, current: &[Piece]) -> String {
        let count = current.iter().filter(|piece| piece.kind == kind).count();
        match kind {
            PieceType::Soldier => format!("soldier_{}", count % 4 + 1),
            PieceType::CommanderVertical => format!("commander_vertical_{}", count % 4 + 1),
            PieceType::CommanderHorizontal => "commander_horizontal".to_string(),
            PieceType::General => "cao_cao".to_string(),
        }
    }
}

/// Standard board width.
pub const STANDARD_COLUMNS: usize = 4;
/// Standard board height.
pub const STANDARD_ROWS: usize = 5;
/// Where the general leaves the standard board.
pub const STANDARD_GOAL: Position = (1, 3);

/// The classic opening layout (横刀立马).
pub fn standard_pieces() -> Vec<Piece> {
    use PieceType::*;

    vec![
        Piece::new("commander_vertical_1", CommanderVertical, (0, 0)),
        Piece::new("cao_cao", General, (1, 0)),
        Piece::new("commander_vertical_2", CommanderVertical, (3, 0)),
        Piece::new("commander_vertical_3", CommanderVertical, (0, 2)),
        Piece::new("commander_horizontal", CommanderHorizontal, (1, 2)),
        Piece::new("commander_vertical_4", CommanderVertical, (3, 2)),
        Piece::new("soldier_1", Soldier, (0, 4)),
        Piece::new("soldier_2", Soldier, (1, 3)),
        Piece::new("soldier_3", Soldier, (2, 3)),
        Piece::new("soldier_4", Soldier, (3, 4)),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_footprints_match_shapes() {
        for kind in PieceType::ALL {
            let (width, height) = kind.footprint();
            assert_eq!(PieceType::from_footprint(width, height), Some(kind));
            assert_eq!(kind.cells((0, 0)).count() as i32, width * height);
        }
        assert_eq!(PieceType::from_footprint(3, 1), None);
    }

    #[test]
    fn test_general_cells_are_row_major() {
        let cells: Vec<_> = PieceType::General.cells((1, 3)).collect();
        assert_eq!(cells, vec![(1, 3), (2, 3), (1, 4), (2, 4)]);
    }

    #[test]
    fn test_touching_pieces_do_not_intersect() {
        let left = Piece::new("a", PieceType::CommanderVertical, (0, 0));
        let right = Piece::new("b", PieceType::General, (1, 0));
        assert!(!left.intersects(&right));
        assert!(!right.intersects(&left));

        let below = Piece::new("c", PieceType::CommanderHorizontal, (1, 1));
        assert!(below.intersects(&right));
    }

    #[test]
    fn test_fits_checks_bounds_and_overlap() {
        let others = vec![Piece::new("g", PieceType::General, (1, 0))];

        assert!(Piece::new("s", PieceType::Soldier, (0, 0)).fits(4, 5, &others));
        assert!(!Piece::new("s", PieceType::Soldier, (2, 1)).fits(4, 5, &others));
        assert!(!Piece::new("h", PieceType::CommanderHorizontal, (3, 4)).fits(4, 5, &[]));
        assert!(!Piece::new("v", PieceType::CommanderVertical, (0, 4)).fits(4, 5, &[]));
        assert!(!Piece::new("s", PieceType::Soldier, (-1, 0)).fits(4, 5, &[]));
    }

    #[test]
    fn test_standard_layout_is_consistent() {
        let pieces = standard_pieces();
        assert_eq!(pieces.len(), 10);
        assert_eq!(
            pieces.iter().filter(|p| p.kind == PieceType::General).count(),
            1
        );
        for (i, piece) in pieces.iter().enumerate() {
            assert!(
                piece.fits(STANDARD_COLUMNS, STANDARD_ROWS, &pieces[..i]),
                "piece {i} does not fit"
            );
        }
        let covered: i32 = pieces
            .iter()
            .map(|p| p.footprint().0 * p.footprint().1)
            .sum();
        assert_eq!(covered, 18);
    }

    #[test]
    fn test_assign_label_cycles() {
        let mut pieces = Vec::new();
        for i in 0..5 {
            let label = Piece::assign_label(PieceType::Soldier, &pieces);
            assert_eq!(label, format!("soldier_{}", i % 4 + 1));
            pieces.push(Piece::new(label, PieceType::Soldier, (i, 0)));
        }
        assert_eq!(Piece::assign_label(PieceType::General, &pieces), "cao_cao");
    }

    #[test]
    fn test_pieces_compare_by_position() {
        let a = Piece::new("soldier_1", PieceType::Soldier, (2, 3));
        let b = Piece::new("soldier_2", PieceType::Soldier, (2, 3));
        assert_eq!(a, b);
        assert_ne!(a, a.translated((1, 0)));
    }
}

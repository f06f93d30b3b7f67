use arrayvec::ArrayVec;
use serde::{Deserialize, Serialize};

/// A falling piece with kind, rotation state, and anchor position.
///
/// Pieces are immutable value types: movement and rotation return new
/// `Piece` instances. The shape data itself lives in static per-kind mask
/// tables; a piece only carries an index into them.
///
/// # Coordinate System
///
/// - The anchor is the top-left corner of the mask's bounding box
/// - X increases rightward (columns), Y increases downward (rows)
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Piece {
    kind: PieceKind,
    rotation: Rotation,
    position: Position,
}

impl Piece {
    /// Creates a piece in its spawn rotation anchored at the origin.
    #[must_use]
    pub const fn new(kind: PieceKind) -> Self {
        Self {
            kind,
            rotation: Rotation::SPAWN,
            position: Position::new(0, 0),
        }
    }

    #[must_use]
    pub const fn kind(&self) -> PieceKind {
        self.kind
    }

    #[must_use]
    pub const fn rotation(&self) -> Rotation {
        self.rotation
    }

    #[must_use]
    pub const fn position(&self) -> Position {
        self.position
    }

    #[must_use]
    pub const fn with_position(self, position: Position) -> Self {
        Self {
            kind: self.kind,
            rotation: self.rotation,
            position,
        }
    }

    #[must_use]
    pub const fn with_rotation(self, rotation: Rotation) -> Self {
        Self {
            kind: self.kind,
            rotation,
            position: self.position,
        }
    }

    /// The occupancy mask for the current rotation state.
    #[must_use]
    pub fn mask(&self) -> &'static Mask {
        self.kind.mask(self.rotation)
    }

    /// Absolute board coordinates covered by the piece at its anchor.
    pub fn occupied_cells(&self) -> impl Iterator<Item = (usize, usize)> + '_ {
        self.mask()
            .filled_offsets()
            .map(move |(dx, dy)| (self.position.x() + dx, self.position.y() + dy))
    }

    /// Rotates clockwise, wrapping modulo the kind's distinct mask count.
    #[must_use]
    pub fn rotated_cw(&self) -> Self {
        self.with_rotation(self.rotation.rotated_cw(self.kind.rotation_count()))
    }

    /// Rotates counter-clockwise, wrapping modulo the kind's distinct mask count.
    #[must_use]
    pub fn rotated_ccw(&self) -> Self {
        self.with_rotation(self.rotation.rotated_ccw(self.kind.rotation_count()))
    }

    /// All distinct rotation states of this piece at its current anchor,
    /// in ascending rotation-index order.
    #[must_use]
    pub fn distinct_rotations(&self) -> ArrayVec<Self, 4> {
        (0..self.kind.rotation_count())
            .map(|index| self.with_rotation(Rotation::new(index)))
            .collect()
    }
}

/// Anchor coordinate of a piece's mask on the board.
///
/// (0, 0) is the board's top-left corner.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Position {
    x: usize,
    y: usize,
}

impl Position {
    #[must_use]
    pub const fn new(x: usize, y: usize) -> Self {
        Self { x, y }
    }

    #[must_use]
    pub const fn x(self) -> usize {
        self.x
    }

    #[must_use]
    pub const fn y(self) -> usize {
        self.y
    }
}

/// Rotation state of a piece: an index into its kind's mask table.
///
/// Kinds with rotational symmetry have fewer than four distinct masks, so
/// wrapping is always modulo the table length rather than a fixed 4.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct Rotation(usize);

impl Rotation {
    pub const SPAWN: Self = Self(0);

    #[must_use]
    pub const fn new(index: usize) -> Self {
        Self(index)
    }

    #[must_use]
    pub const fn index(self) -> usize {
        self.0
    }

    #[must_use]
    const fn rotated_cw(self, count: usize) -> Self {
        Self((self.0 + 1) % count)
    }

    #[must_use]
    const fn rotated_ccw(self, count: usize) -> Self {
        Self((self.0 + count - 1) % count)
    }
}

/// Enum representing the type of piece.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize)]
#[repr(u8)]
pub enum PieceKind {
    /// I-piece.
    I = 0,
    /// O-piece.
    O = 1,
    /// S-piece.
    S = 2,
    /// Z-piece.
    Z = 3,
    /// J-piece.
    J = 4,
    /// L-piece.
    L = 5,
    /// T-piece.
    T = 6,
}

impl PieceKind {
    /// Number of piece types (7).
    pub const LEN: usize = 7;

    /// All piece kinds in canonical order.
    pub const ALL: [Self; Self::LEN] = [
        Self::I,
        Self::O,
        Self::S,
        Self::Z,
        Self::J,
        Self::L,
        Self::T,
    ];

    /// The distinct rotation masks for this kind, spawn state first.
    #[must_use]
    pub fn masks(self) -> &'static [Mask] {
        PIECE_MASKS[self as usize]
    }

    /// Number of distinct rotation states (1, 2, or 4 depending on symmetry).
    #[must_use]
    pub fn rotation_count(self) -> usize {
        self.masks().len()
    }

    #[must_use]
    pub fn mask(self, rotation: Rotation) -> &'static Mask {
        &self.masks()[rotation.index()]
    }

    /// Returns the single character representation of this piece kind.
    #[must_use]
    pub const fn as_char(self) -> char {
        match self {
            PieceKind::I => 'I',
            PieceKind::O => 'O',
            PieceKind::S => 'S',
            PieceKind::Z => 'Z',
            PieceKind::J => 'J',
            PieceKind::L => 'L',
            PieceKind::T => 'T',
        }
    }

    /// Parses a piece kind from a single character.
    #[must_use]
    pub const fn from_char(c: char) -> Option<Self> {
        match c {
            'I' => Some(PieceKind::I),
            'O' => Some(PieceKind::O),
            'S' => Some(PieceKind::S),
            'Z' => Some(PieceKind::Z),
            'J' => Some(PieceKind::J),
            'L' => Some(PieceKind::L),
            'T' => Some(PieceKind::T),
            _ => None,
        }
    }
}

/// Rectangular boolean occupancy pattern for one rotation state.
///
/// Masks are trimmed to the piece's bounding box, so the same anchor math
/// serves collision checks, gravity, and rendering without empty margins.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Mask {
    rows: &'static [&'static [bool]],
}

impl Mask {
    const fn new(rows: &'static [&'static [bool]]) -> Self {
        Self { rows }
    }

    #[must_use]
    pub fn width(&self) -> usize {
        self.rows[0].len()
    }

    #[must_use]
    pub fn height(&self) -> usize {
        self.rows.len()
    }

    #[must_use]
    pub fn is_filled(&self, dx: usize, dy: usize) -> bool {
        self.rows[dy][dx]
    }

    /// Offsets of filled sub-cells relative to the mask's top-left corner.
    pub fn filled_offsets(&self) -> impl Iterator<Item = (usize, usize)> + '_ {
        self.rows.iter().enumerate().flat_map(|(dy, row)| {
            row.iter()
                .enumerate()
                .filter_map(move |(dx, &filled)| filled.then_some((dx, dy)))
        })
    }
}

const C: bool = true;
const E: bool = false;

// Spawn state first, then successive clockwise rotations. Only distinct
// states are listed: I, S, and Z repeat after two, O after one.
const I_MASKS: [Mask; 2] = [
    Mask::new(&[&[C, C, C, C]]),
    Mask::new(&[&[C], &[C], &[C], &[C]]),
];

const O_MASKS: [Mask; 1] = [Mask::new(&[&[C, C], &[C, C]])];

const S_MASKS: [Mask; 2] = [
    Mask::new(&[&[E, C, C], &[C, C, E]]),
    Mask::new(&[&[C, E], &[C, C], &[E, C]]),
];

const Z_MASKS: [Mask; 2] = [
    Mask::new(&[&[C, C, E], &[E, C, C]]),
    Mask::new(&[&[E, C], &[C, C], &[C, E]]),
];

const J_MASKS: [Mask; 4] = [
    Mask::new(&[&[C, E, E], &[C, C, C]]),
    Mask::new(&[&[C, C], &[C, E], &[C, E]]),
    Mask::new(&[&[C, C, C], &[E, E, C]]),
    Mask::new(&[&[E, C], &[E, C], &[C, C]]),
];

const L_MASKS: [Mask; 4] = [
    Mask::new(&[&[E, E, C], &[C, C, C]]),
    Mask::new(&[&[C, E], &[C, E], &[C, C]]),
    Mask::new(&[&[C, C, C], &[C, E, E]]),
    Mask::new(&[&[C, C], &[E, C], &[E, C]]),
];

const T_MASKS: [Mask; 4] = [
    Mask::new(&[&[C, C, C], &[E, C, E]]),
    Mask::new(&[&[E, C], &[C, C], &[E, C]]),
    Mask::new(&[&[E, C, E], &[C, C, C]]),
    Mask::new(&[&[C, E], &[C, C], &[C, E]]),
];

const PIECE_MASKS: [&[Mask]; PieceKind::LEN] = [
    &I_MASKS, &O_MASKS, &S_MASKS, &Z_MASKS, &J_MASKS, &L_MASKS, &T_MASKS,
];

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rotation_counts() {
        let expected = [
            (PieceKind::I, 2),
            (PieceKind::O, 1),
            (PieceKind::S, 2),
            (PieceKind::Z, 2),
            (PieceKind::J, 4),
            (PieceKind::L, 4),
            (PieceKind::T, 4),
        ];
        for (kind, count) in expected {
            assert_eq!(kind.rotation_count(), count, "{kind:?}");
        }
    }

    #[test]
    fn test_every_mask_has_four_cells() {
        for kind in PieceKind::ALL {
            for mask in kind.masks() {
                assert_eq!(
                    mask.filled_offsets().count(),
                    4,
                    "{kind:?} mask {mask:?}"
                );
            }
        }
    }

    #[test]
    fn test_mask_rows_are_rectangular() {
        for kind in PieceKind::ALL {
            for mask in kind.masks() {
                for dy in 0..mask.height() {
                    assert_eq!(mask.rows[dy].len(), mask.width(), "{kind:?}");
                }
            }
        }
    }

    #[test]
    fn test_rotation_cycle_returns_to_spawn() {
        for kind in PieceKind::ALL {
            let piece = Piece::new(kind);
            let mut rotated = piece;
            for _ in 0..kind.rotation_count() {
                rotated = rotated.rotated_cw();
            }
            assert_eq!(rotated, piece, "{kind:?} clockwise cycle");

            let mut rotated = piece;
            for _ in 0..kind.rotation_count() {
                rotated = rotated.rotated_ccw();
            }
            assert_eq!(rotated, piece, "{kind:?} counter-clockwise cycle");
        }
    }

    #[test]
    fn test_cw_then_ccw_is_identity() {
        for kind in PieceKind::ALL {
            let piece = Piece::new(kind).rotated_cw();
            assert_eq!(piece.rotated_ccw().rotated_cw(), piece, "{kind:?}");
        }
    }

    #[test]
    fn test_occupied_cells_are_anchor_relative() {
        // T spawn mask:
        //   ###
        //   .#.
        let piece = Piece::new(PieceKind::T).with_position(Position::new(3, 10));
        let cells: Vec<_> = piece.occupied_cells().collect();
        assert_eq!(cells, vec![(3, 10), (4, 10), (5, 10), (4, 11)]);
    }

    #[test]
    fn test_distinct_rotations_order_and_anchor() {
        let piece = Piece::new(PieceKind::J).with_position(Position::new(2, 5));
        let rotations = piece.distinct_rotations();
        assert_eq!(rotations.len(), 4);
        for (index, rotated) in rotations.iter().enumerate() {
            assert_eq!(rotated.rotation().index(), index);
            assert_eq!(rotated.position(), piece.position());
        }
    }

    #[test]
    fn test_vertical_i_mask() {
        let mask = PieceKind::I.mask(Rotation::new(1));
        assert_eq!(mask.width(), 1);
        assert_eq!(mask.height(), 4);
        for dy in 0..4 {
            assert!(mask.is_filled(0, dy));
        }
    }

    #[test]
    fn test_piece_kind_char_conversion() {
        for kind in PieceKind::ALL {
            assert_eq!(PieceKind::from_char(kind.as_char()), Some(kind));
        }
        assert_eq!(PieceKind::from_char('X'), None);
        assert_eq!(PieceKind::from_char('i'), None);
    }

    #[test]
    fn test_piece_kind_serde_round_trip() {
        let serialized = serde_json::to_string(&PieceKind::ALL).unwrap();
        let deserialized: Vec<PieceKind> = serde_json::from_str(&serialized).unwrap();
        assert_eq!(deserialized, PieceKind::ALL);
    }
}

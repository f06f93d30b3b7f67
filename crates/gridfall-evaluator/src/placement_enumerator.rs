//! Enumeration of legal resting positions for a piece.
//!
//! For every distinct rotation state and every anchor column where the
//! mask fits the board width, the board's gravity simulation produces at
//! most one landing row. The sequence is lazy, finite (bounded by
//! `rotation_count x width`), and deterministic: rotations ascend first,
//! then columns. It is recomputed fresh per call since the board changes
//! between search nodes.

use gridfall_engine::{Board, Piece, PieceKind, Position, Rotation};

/// A legal resting position: rotation state, anchor column, landing row.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Placement {
    rotation: Rotation,
    x: usize,
    y: usize,
}

impl Placement {
    #[must_use]
    pub fn rotation(&self) -> Rotation {
        self.rotation
    }

    /// Anchor column.
    #[must_use]
    pub fn x(&self) -> usize {
        self.x
    }

    /// Landing row (anchor row after gravity).
    #[must_use]
    pub fn y(&self) -> usize {
        self.y
    }

    /// Materializes the placement as a positioned piece of the given kind.
    #[must_use]
    pub fn to_piece(&self, kind: PieceKind) -> Piece {
        Piece::new(kind)
            .with_rotation(self.rotation)
            .with_position(Position::new(self.x, self.y))
    }
}

/// Lazily yields every legal final resting position for `kind` on `board`.
///
/// Combinations with no legal landing (blocked or overflowing columns) are
/// skipped entirely; an exhausted iterator with no items means the piece
/// cannot be placed at all.
pub fn enumerate_placements(
    board: &Board,
    kind: PieceKind,
) -> impl Iterator<Item = Placement> + '_ {
    Piece::new(kind)
        .distinct_rotations()
        .into_iter()
        .flat_map(move |piece| {
            let rotation = piece.rotation();
            let mask = piece.mask();
            let max_x = board.width().saturating_sub(mask.width());
            (0..=max_x).filter_map(move |x| {
                board
                    .drop_position(mask, x)
                    .map(|y| Placement { rotation, x, y })
            })
        })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_candidate_count_on_empty_board() {
        let board = Board::standard();
        // I: horizontal 7 anchors + vertical 10.
        assert_eq!(enumerate_placements(&board, PieceKind::I).count(), 17);
        // O: one rotation, 9 anchors.
        assert_eq!(enumerate_placements(&board, PieceKind::O).count(), 9);
        // T: 8 + 9 + 8 + 9 across the four rotations.
        assert_eq!(enumerate_placements(&board, PieceKind::T).count(), 34);
    }

    #[test]
    fn test_every_candidate_is_placeable() {
        let board = Board::from_ascii(
            "
            ..#.......
            ..#.......
            ###...####
            ##########
            ",
        );
        for kind in PieceKind::ALL {
            for placement in enumerate_placements(&board, kind) {
                let mask = kind.mask(placement.rotation());
                assert!(
                    board.can_place(mask, placement.x(), placement.y()),
                    "{kind:?} at {placement:?}"
                );
                assert!(
                    !board.can_place(mask, placement.x(), placement.y() + 1),
                    "{kind:?} at {placement:?} is not resting"
                );
            }
        }
    }

    #[test]
    fn test_enumeration_order_is_rotation_then_column() {
        let board = Board::standard();
        let placements: Vec<_> = enumerate_placements(&board, PieceKind::I).collect();
        let keys: Vec<_> = placements
            .iter()
            .map(|p| (p.rotation().index(), p.x()))
            .collect();
        let mut sorted = keys.clone();
        sorted.sort_unstable();
        assert_eq!(keys, sorted);
        assert_eq!(keys.first(), Some(&(0, 0)));
    }

    #[test]
    fn test_blocked_board_yields_nothing() {
        let art = "##########\n".repeat(40);
        let board = Board::from_ascii(&art);
        for kind in PieceKind::ALL {
            assert_eq!(enumerate_placements(&board, kind).count(), 0, "{kind:?}");
        }
    }

    #[test]
    fn test_to_piece_matches_placement() {
        let board = Board::standard();
        let placement = enumerate_placements(&board, PieceKind::J).next().unwrap();
        let piece = placement.to_piece(PieceKind::J);
        assert_eq!(piece.rotation(), placement.rotation());
        assert_eq!(piece.position().x(), placement.x());
        assert_eq!(piece.position().y(), placement.y());
    }
}

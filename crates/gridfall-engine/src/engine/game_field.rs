use crate::{
    PieceCollisionError, TopOutError,
    core::{
        board::{Board, LinesCleared},
        piece::{Piece, PieceKind, Position},
    },
};

use super::piece_queue::PieceQueue;

/// Live game state: the board, the falling piece, and the piece queue.
///
/// The field does not decide placements; a caller (player input or a
/// placement search) positions the falling piece, then completes the drop.
#[derive(Debug, Clone)]
pub struct GameField {
    board: Board,
    falling_piece: Piece,
    queue: PieceQueue,
}

impl Default for GameField {
    fn default() -> Self {
        Self::new()
    }
}

impl GameField {
    /// Creates a standard field with an OS-seeded piece queue.
    #[must_use]
    pub fn new() -> Self {
        Self::with_queue(PieceQueue::new())
    }

    /// Creates a standard field with a deterministic piece queue.
    #[must_use]
    pub fn from_seed(seed: u64) -> Self {
        Self::with_queue(PieceQueue::from_seed(seed))
    }

    fn with_queue(mut queue: PieceQueue) -> Self {
        let board = Board::standard();
        let falling_piece = spawn_piece(queue.pop_next(), board.width());
        Self {
            board,
            falling_piece,
            queue,
        }
    }

    #[must_use]
    pub fn board(&self) -> &Board {
        &self.board
    }

    #[must_use]
    pub fn falling_piece(&self) -> Piece {
        self.falling_piece
    }

    /// The ordered window a placement search evaluates: the falling
    /// piece's kind followed by upcoming pieces, `len` kinds in total.
    #[must_use]
    pub fn lookahead(&self, len: usize) -> Vec<PieceKind> {
        std::iter::once(self.falling_piece.kind())
            .chain(self.queue.next_pieces())
            .take(len)
            .collect()
    }

    /// Moves the falling piece, rejecting positions that collide.
    ///
    /// The kind must match the current falling piece; only rotation and
    /// anchor may change.
    pub fn set_falling_piece(&mut self, piece: Piece) -> Result<(), PieceCollisionError> {
        if piece.kind() != self.falling_piece.kind() {
            return Err(PieceCollisionError);
        }
        if !self
            .board
            .can_place(piece.mask(), piece.position().x(), piece.position().y())
        {
            return Err(PieceCollisionError);
        }
        self.falling_piece = piece;
        Ok(())
    }

    /// Where the falling piece would land if dropped straight down, for
    /// ghost-preview rendering.
    #[must_use]
    pub fn ghost_piece(&self) -> Piece {
        let x = self.falling_piece.position().x();
        let landing = self
            .board
            .drop_position(self.falling_piece.mask(), x)
            .unwrap_or(self.falling_piece.position().y());
        self.falling_piece.with_position(Position::new(x, landing))
    }

    /// Locks the falling piece, clears completed lines, and spawns the
    /// next piece.
    ///
    /// The result is `Err` when the game is over: the piece came to rest
    /// entirely above the skyline, or the successor cannot spawn. Lines
    /// cleared by the final drop are still reported.
    pub fn complete_piece_drop(&mut self) -> (LinesCleared, Result<(), TopOutError>) {
        let piece = self.falling_piece;
        // The falling piece is validated on every move, so this only fails
        // when dropping is attempted after a blocked spawn.
        if self.board.add_piece(&piece).is_err() {
            return (LinesCleared::None, Err(TopOutError));
        }
        let cleared = self.board.clear_completed_lines(&piece);

        if piece
            .occupied_cells()
            .all(|(_, y)| y < self.board.skyline())
        {
            return (cleared, Err(TopOutError));
        }

        let next = spawn_piece(self.queue.pop_next(), self.board.width());
        let blocked = !self.board.can_place(
            next.mask(),
            next.position().x(),
            next.position().y(),
        );
        self.falling_piece = next;
        if blocked {
            return (cleared, Err(TopOutError));
        }

        (cleared, Ok(()))
    }
}

/// Spawns a piece at the top of the buffer zone, horizontally centered.
fn spawn_piece(kind: PieceKind, board_width: usize) -> Piece {
    let piece = Piece::new(kind);
    let x = board_width.saturating_sub(piece.mask().width()) / 2;
    piece.with_position(Position::new(x, 0))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::{
        board::Cell,
        piece::Rotation,
    };

    #[test]
    fn test_new_field_spawns_centered_piece() {
        let field = GameField::from_seed(1);
        let piece = field.falling_piece();
        assert_eq!(piece.position().y(), 0);
        let max_x = field.board().width() - piece.mask().width();
        assert!(piece.position().x() <= max_x);
        assert!(field
            .board()
            .rows()
            .all(|row| row.iter().all(|c| c.is_empty())));
    }

    #[test]
    fn test_lookahead_starts_with_falling_piece() {
        let field = GameField::from_seed(2);
        let window = field.lookahead(3);
        assert_eq!(window.len(), 3);
        assert_eq!(window[0], field.falling_piece().kind());
    }

    #[test]
    fn test_set_falling_piece_rejects_kind_swap() {
        let mut field = GameField::from_seed(3);
        let current = field.falling_piece();
        let other = PieceKind::ALL
            .into_iter()
            .find(|&k| k != current.kind())
            .unwrap();
        assert!(field.set_falling_piece(Piece::new(other)).is_err());
    }

    #[test]
    fn test_set_falling_piece_rejects_collision() {
        let mut field = GameField::from_seed(4);
        let piece = field.falling_piece();
        // Far outside the right edge.
        let off_board = piece.with_position(Position::new(field.board().width(), 0));
        assert!(field.set_falling_piece(off_board).is_err());
        assert_eq!(field.falling_piece(), piece);
    }

    #[test]
    fn test_complete_piece_drop_locks_and_respawns() {
        let mut field = GameField::from_seed(5);
        let piece = field.falling_piece();
        let x = piece.position().x();
        let landing = field.board().drop_position(piece.mask(), x).unwrap();
        field
            .set_falling_piece(piece.with_position(Position::new(x, landing)))
            .unwrap();

        let (cleared, result) = field.complete_piece_drop();
        assert!(cleared.is_none());
        assert!(result.is_ok());
        assert_eq!(
            field
                .board()
                .rows()
                .flatten()
                .filter(|c| !c.is_empty())
                .count(),
            4
        );
        assert_eq!(field.falling_piece().position().y(), 0);
    }

    #[test]
    fn test_ghost_piece_tracks_landing_row() {
        let field = GameField::from_seed(6);
        let ghost = field.ghost_piece();
        let piece = field.falling_piece();
        assert_eq!(ghost.kind(), piece.kind());
        assert_eq!(ghost.position().x(), piece.position().x());
        assert!(field
            .board()
            .can_place(ghost.mask(), ghost.position().x(), ghost.position().y()));
        assert!(!field.board().can_place(
            ghost.mask(),
            ghost.position().x(),
            ghost.position().y() + 1
        ));
    }

    #[test]
    fn test_ghost_overlay_round_trip() {
        let mut field = GameField::from_seed(8);
        let ghost = field.ghost_piece();
        let board_before = field.board().clone();

        field.board.add_ghost(&ghost).unwrap();
        assert!(field
            .board
            .cell(ghost.position().x(), ghost.position().y())
            .is_some_and(|c| c == Cell::Ghost || c == Cell::Empty));
        field.board.remove_ghost(&ghost).unwrap();
        assert_eq!(*field.board(), board_before);
    }

    #[test]
    fn test_dropping_forever_tops_out() {
        let mut field = GameField::from_seed(9);
        let mut drops = 0;
        loop {
            drops += 1;
            assert!(drops < 1000, "field never topped out");
            // Lock each piece wherever it spawned would collide mid-air;
            // drop it straight down instead so the stack grows legally.
            let piece = field.falling_piece();
            let x = piece.position().x();
            match field.board().drop_position(piece.mask(), x) {
                Some(landing) => {
                    field
                        .set_falling_piece(piece.with_position(Position::new(x, landing)))
                        .unwrap();
                    let (_, result) = field.complete_piece_drop();
                    if result.is_err() {
                        break;
                    }
                }
                None => break,
            }
        }
        // The stack reached the buffer zone near the spawn columns.
        assert!(field.board().has_cells_above_skyline());
    }

    #[test]
    fn test_vertical_rotation_is_settable() {
        let mut field = GameField::from_seed(10);
        let piece = field.falling_piece();
        let rotated = piece.with_rotation(Rotation::SPAWN).rotated_cw();
        let max_x = field.board().width() - rotated.mask().width();
        let target = rotated.with_position(Position::new(max_x.min(piece.position().x()), 0));
        assert!(field.set_falling_piece(target).is_ok());
    }
}

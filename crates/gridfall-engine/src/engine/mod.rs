//! Game orchestration on top of the core data model.
//!
//! - [`PieceQueue`] - 7-bag piece generation, seedable for determinism
//! - [`GameField`] - live game state: board, falling piece, upcoming pieces
//! - [`GameStats`] - score and line-clear accounting
//!
//! A turn progresses by positioning the falling piece on the [`GameField`]
//! (typically at a landing spot chosen by a placement search), then calling
//! [`GameField::complete_piece_drop`], which locks the piece, resolves line
//! clears, and spawns the successor.

pub use self::{game_field::*, game_stats::*, piece_queue::*};

mod game_field;
mod game_stats;
mod piece_queue;

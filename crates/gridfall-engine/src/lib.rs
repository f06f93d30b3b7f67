//! Board and piece engine for a grid-based stacking puzzle.
//!
//! The [`core`] module holds the data model: a dynamically-sized [`Board`]
//! of cells with collision and gravity primitives, and immutable [`Piece`]
//! values backed by static rotation-mask tables.
//!
//! The [`engine`] module layers game orchestration on top: a 7-bag
//! [`PieceQueue`], a [`GameField`] that owns the live board and falling
//! piece, and [`GameStats`] for score tracking.
//!
//! Placement decisions are made elsewhere; this crate only provides the
//! board mechanics those decisions are simulated against.

pub use self::{core::*, engine::*};

pub mod core;
pub mod engine;

/// Board construction rejected the requested dimensions.
///
/// The visible play area is 20 rows; total height must exceed it so an
/// equally-sized hidden buffer exists above the skyline.
#[derive(Debug, derive_more::Display, derive_more::Error)]
#[display("invalid board dimensions {height}x{width}: height must exceed 20 and width must be non-zero")]
pub struct InvalidDimensionsError {
    pub height: usize,
    pub width: usize,
}

/// A cell-level write or check failed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, derive_more::Display, derive_more::Error)]
pub enum PlacementError {
    /// A targeted cell lies outside the grid.
    #[display("cell ({x}, {y}) is outside the board")]
    OutOfBounds { x: usize, y: usize },
    /// A targeted cell already holds a locked occupant.
    #[display("cell ({x}, {y}) is already occupied")]
    Collision { x: usize, y: usize },
    /// A targeted cell does not hold the occupant being removed.
    #[display("cell ({x}, {y}) does not hold the expected occupant")]
    Mismatch { x: usize, y: usize },
}

/// The falling piece cannot occupy the requested position.
#[derive(Debug, derive_more::Display, derive_more::Error)]
#[display("piece colliding when setting falling piece")]
pub struct PieceCollisionError;

/// The stack reached the buffer zone: either the locked piece came to rest
/// entirely above the skyline, or the next piece cannot spawn.
#[derive(Debug, derive_more::Display, derive_more::Error)]
#[display("stack reached the buffer zone")]
pub struct TopOutError;

use serde::{Deserialize, Serialize};

use crate::{InvalidDimensionsError, PlacementError};

use super::piece::{Mask, Piece, PieceKind};

/// Number of rows visible to the player. Everything above them is the
/// hidden buffer zone used for spawning and overflow detection.
pub const VISIBLE_HEIGHT: usize = 20;

/// Standard playfield width.
pub const STANDARD_WIDTH: usize = 10;

/// Standard total height: 20 visible rows plus a 20-row buffer zone.
pub const STANDARD_HEIGHT: usize = 40;

/// A single cell of the board.
///
/// `Ghost` marks the drop-preview overlay; it is treated as empty by
/// collision checks, line completeness, and the height/hole scans, and is
/// never part of search state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Cell {
    #[default]
    Empty,
    Ghost,
    Piece(PieceKind),
}

impl Cell {
    /// Whether the cell can be occupied by a falling piece.
    #[must_use]
    pub fn is_empty(self) -> bool {
        matches!(self, Cell::Empty | Cell::Ghost)
    }
}

/// Classification of a line-clear event.
///
/// Counts above four are not reachable with four-cell pieces but are
/// classified as `Unknown` rather than causing a panic.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, derive_more::IsVariant, Deserialize, Serialize,
)]
#[serde(rename_all = "snake_case")]
pub enum LinesCleared {
    None,
    Single,
    Double,
    Triple,
    Tetris,
    Unknown,
}

impl LinesCleared {
    #[must_use]
    pub fn from_count(count: usize) -> Self {
        match count {
            0 => LinesCleared::None,
            1 => LinesCleared::Single,
            2 => LinesCleared::Double,
            3 => LinesCleared::Triple,
            4 => LinesCleared::Tetris,
            _ => LinesCleared::Unknown,
        }
    }

    /// Number of lines this classification represents. `Unknown` maps to
    /// zero so it contributes nothing to totals or scoring.
    #[must_use]
    pub fn count(self) -> usize {
        match self {
            LinesCleared::None | LinesCleared::Unknown => 0,
            LinesCleared::Single => 1,
            LinesCleared::Double => 2,
            LinesCleared::Triple => 3,
            LinesCleared::Tetris => 4,
        }
    }
}

/// The rectangular grid of cells on which pieces stack.
///
/// Row 0 is the top of the buffer zone; rows increase downward. Storage is
/// a single row-major `Vec`: the placement search clones boards
/// combinatorially often, and a flat grid clones with one memcpy.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Board {
    width: usize,
    height: usize,
    cells: Vec<Cell>,
}

impl Board {
    /// Creates an empty board.
    ///
    /// Fails unless `height` exceeds [`VISIBLE_HEIGHT`] (the hidden buffer
    /// needs at least one row) and `width` is non-zero.
    pub fn new(height: usize, width: usize) -> Result<Self, InvalidDimensionsError> {
        if height <= VISIBLE_HEIGHT || width == 0 {
            return Err(InvalidDimensionsError { height, width });
        }
        Ok(Self {
            width,
            height,
            cells: vec![Cell::Empty; height * width],
        })
    }

    /// The standard 40x10 board: 20 visible rows under a 20-row buffer.
    #[must_use]
    pub fn standard() -> Self {
        Self {
            width: STANDARD_WIDTH,
            height: STANDARD_HEIGHT,
            cells: vec![Cell::Empty; STANDARD_HEIGHT * STANDARD_WIDTH],
        }
    }

    #[must_use]
    pub fn width(&self) -> usize {
        self.width
    }

    #[must_use]
    pub fn height(&self) -> usize {
        self.height
    }

    /// The boundary row between the buffer zone and the visible area.
    /// Occupied cells strictly above it indicate an overflowing stack.
    #[must_use]
    pub fn skyline(&self) -> usize {
        self.height - VISIBLE_HEIGHT
    }

    #[must_use]
    pub fn cell(&self, x: usize, y: usize) -> Option<Cell> {
        (x < self.width && y < self.height).then(|| self.cells[y * self.width + x])
    }

    /// Iterates over rows from the top of the buffer zone down.
    pub fn rows(&self) -> impl Iterator<Item = &[Cell]> {
        self.cells.chunks_exact(self.width)
    }

    /// Whether any occupied cell sits strictly above the skyline.
    #[must_use]
    pub fn has_cells_above_skyline(&self) -> bool {
        self.rows()
            .take(self.skyline())
            .any(|row| row.iter().any(|cell| !cell.is_empty()))
    }

    /// Checks whether every filled sub-cell of `mask`, anchored at
    /// `(x, y)`, maps to an in-bounds empty cell. Does not mutate.
    #[must_use]
    pub fn can_place(&self, mask: &Mask, x: usize, y: usize) -> bool {
        mask.filled_offsets().all(|(dx, dy)| {
            self.cell(x + dx, y + dy).is_some_and(Cell::is_empty)
        })
    }

    /// Simulates gravity for `mask` dropped in at anchor column `x`.
    ///
    /// Returns the lowest anchor row the mask can rest at, descending from
    /// the top of the board. `None` means even the top row collides, which
    /// is the top-out signal.
    #[must_use]
    pub fn drop_position(&self, mask: &Mask, x: usize) -> Option<usize> {
        if !self.can_place(mask, x, 0) {
            return None;
        }
        let mut y = 0;
        while self.can_place(mask, x, y + 1) {
            y += 1;
        }
        Some(y)
    }

    /// Locks the piece's cells onto the board.
    ///
    /// Fails with [`PlacementError::Collision`] if any targeted cell holds
    /// a locked occupant (ghost cells may be overwritten), or
    /// [`PlacementError::OutOfBounds`] if the piece hangs off the grid.
    /// The board is untouched on error.
    pub fn add_piece(&mut self, piece: &Piece) -> Result<(), PlacementError> {
        self.write_cells(piece, Cell::Piece(piece.kind()), |cell, x, y| {
            if cell.is_empty() {
                Ok(())
            } else {
                Err(PlacementError::Collision { x, y })
            }
        })
    }

    /// Writes the piece's cells as ghost markers for drop preview.
    ///
    /// Occupied cells are overwritten without error: when the stack is at
    /// the skyline the preview can legally cover locked cells. Bounds are
    /// still enforced.
    pub fn add_ghost(&mut self, piece: &Piece) -> Result<(), PlacementError> {
        self.write_cells(piece, Cell::Ghost, |_, _, _| Ok(()))
    }

    /// Clears the piece's cells.
    ///
    /// Fails with [`PlacementError::Mismatch`] if a targeted cell does not
    /// hold exactly this piece's marker. The board is untouched on error.
    pub fn remove_piece(&mut self, piece: &Piece) -> Result<(), PlacementError> {
        let expected = Cell::Piece(piece.kind());
        self.write_cells(piece, Cell::Empty, move |cell, x, y| {
            if cell == expected {
                Ok(())
            } else {
                Err(PlacementError::Mismatch { x, y })
            }
        })
    }

    /// Clears the piece's ghost markers.
    pub fn remove_ghost(&mut self, piece: &Piece) -> Result<(), PlacementError> {
        self.write_cells(piece, Cell::Empty, |cell, x, y| {
            if cell == Cell::Ghost {
                Ok(())
            } else {
                Err(PlacementError::Mismatch { x, y })
            }
        })
    }

    /// Validates every targeted cell, then writes them all. Two phases so
    /// a failing placement never leaves a half-written board.
    fn write_cells(
        &mut self,
        piece: &Piece,
        value: Cell,
        check: impl Fn(Cell, usize, usize) -> Result<(), PlacementError>,
    ) -> Result<(), PlacementError> {
        for (x, y) in piece.occupied_cells() {
            let cell = self
                .cell(x, y)
                .ok_or(PlacementError::OutOfBounds { x, y })?;
            check(cell, x, y)?;
        }
        for (x, y) in piece.occupied_cells() {
            self.cells[y * self.width + x] = value;
        }
        Ok(())
    }

    /// Removes completed rows among those spanned by the piece's mask (the
    /// only rows a placement can have completed), shifting the rows above
    /// down and inserting fresh empty rows at the top.
    pub fn clear_completed_lines(&mut self, piece: &Piece) -> LinesCleared {
        let top = piece.position().y();
        let mut cleared = 0;
        for dy in 0..piece.mask().height() {
            let y = top + dy;
            if y < self.height && self.is_row_full(y) {
                self.remove_row(y);
                cleared += 1;
            }
        }
        LinesCleared::from_count(cleared)
    }

    fn is_row_full(&self, y: usize) -> bool {
        self.cells[y * self.width..][..self.width]
            .iter()
            .all(|cell| !cell.is_empty())
    }

    fn remove_row(&mut self, y: usize) {
        self.cells.copy_within(..y * self.width, self.width);
        self.cells[..self.width].fill(Cell::Empty);
    }

    /// Height of each column measured from the floor: `height` minus the
    /// first occupied row, 0 for an empty column. Buffer rows included.
    #[must_use]
    pub fn column_heights(&self) -> Vec<u32> {
        let mut heights = vec![0; self.width];
        for (y, row) in self.rows().enumerate() {
            for (x, cell) in row.iter().enumerate() {
                if heights[x] == 0 && !cell.is_empty() {
                    heights[x] = u32::try_from(self.height - y).unwrap();
                }
            }
        }
        heights
    }

    /// Builds a standard board from ASCII art for testing.
    ///
    /// `#` cells are filled (with I-blocks), `.` cells are empty. Rows are
    /// given top to bottom and anchored to the board floor, so fixtures
    /// only describe the stack, not the whole grid.
    ///
    /// # Panics
    ///
    /// Panics if a row's width does not match the board width, or if more
    /// rows are given than the board holds.
    #[must_use]
    pub fn from_ascii(art: &str) -> Self {
        let mut board = Self::standard();
        let lines: Vec<&str> = art
            .lines()
            .map(str::trim)
            .filter(|line| !line.is_empty())
            .collect();
        assert!(
            lines.len() <= board.height,
            "fixture has {} rows but the board holds {}",
            lines.len(),
            board.height
        );

        let top = board.height - lines.len();
        for (dy, line) in lines.iter().enumerate() {
            let chars: Vec<char> = line.chars().filter(|c| *c == '#' || *c == '.').collect();
            assert_eq!(
                chars.len(),
                board.width,
                "each fixture row must have exactly {} cells, got {} at row {dy}",
                board.width,
                chars.len()
            );
            for (x, &ch) in chars.iter().enumerate() {
                if ch == '#' {
                    board.cells[(top + dy) * board.width + x] = Cell::Piece(PieceKind::I);
                }
            }
        }
        board
    }
}

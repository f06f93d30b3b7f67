//! Numeric descriptors of a board state.
//!
//! A [`FeatureVector`] is computed fresh from a snapshot in a small
//! constant number of linear passes and never mutated in place. Extraction
//! runs once per explored placement, combinatorially many times per search
//! call, so every pass is linear in board size.
//!
//! Heights are measured from the floor (`board height - first occupied
//! row`, 0 for an empty column), buffer rows included. Ghost markers count
//! as empty throughout.

use gridfall_engine::Board;

/// Derived descriptors of one board snapshot.
///
/// `lines_cleared` counts rows that are currently full, which is only
/// nonzero on a post-placement, pre-clear snapshot; the scoring pipeline
/// extracts features at exactly that point.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FeatureVector {
    /// Sum of all column heights.
    pub cumulative_height: u32,
    /// Superlinear penalty term: `max_height^1.5`.
    pub weighted_height: f64,
    /// Max column height minus min column height.
    pub relative_height: u32,
    /// Empty cells with at least one occupied cell above them.
    pub hole_count: u32,
    /// Sum of absolute height differences between adjacent columns.
    pub bumpiness: u32,
    /// Fully-occupied rows in the snapshot.
    pub lines_cleared: u32,
}

impl FeatureVector {
    /// Extracts all features from a board snapshot.
    #[must_use]
    pub fn extract(board: &Board) -> Self {
        let heights = board.column_heights();
        let max_height = heights.iter().copied().max().unwrap_or(0);
        let min_height = heights.iter().copied().min().unwrap_or(0);

        Self {
            cumulative_height: heights.iter().sum(),
            weighted_height: f64::from(max_height).powf(1.5),
            relative_height: max_height - min_height,
            hole_count: count_holes(board),
            bumpiness: bumpiness(&heights),
            lines_cleared: count_full_lines(board),
        }
    }
}

/// Holes per column summed: an empty cell is a hole when any occupied cell
/// sits above it in the same column.
fn count_holes(board: &Board) -> u32 {
    let mut holes = 0;
    for x in 0..board.width() {
        let mut block_above = false;
        for y in 0..board.height() {
            let occupied = board.cell(x, y).is_some_and(|cell| !cell.is_empty());
            if occupied {
                block_above = true;
            } else if block_above {
                holes += 1;
            }
        }
    }
    holes
}

fn bumpiness(heights: &[u32]) -> u32 {
    heights
        .windows(2)
        .map(|pair| pair[0].abs_diff(pair[1]))
        .sum()
}

fn count_full_lines(board: &Board) -> u32 {
    let full = board
        .rows()
        .filter(|row| row.iter().all(|cell| !cell.is_empty()))
        .count();
    u32::try_from(full).unwrap()
}

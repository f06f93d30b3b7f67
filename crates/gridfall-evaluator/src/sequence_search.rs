//! Bounded-depth search over a sequence of upcoming pieces.
//!
//! Given a board and an ordered piece list (current piece first), the
//! search enumerates every legal placement for the head piece, simulates
//! each on a cloned board, and recurses into the tail, keeping the best
//! cumulative score. Only the first-piece placement is returned; callers
//! re-run the search each turn once the next lookahead window is known,
//! so the search is stateless between calls.
//!
//! # Scoring convention
//!
//! Each placement contributes an immediate reward: the weighted score of
//! the post-placement, **pre-clear** snapshot. At that point the
//! `lines_cleared` feature counts exactly the rows the placement just
//! completed, while the height features still see them. Completed lines
//! are then cleared before recursing, so deeper levels search the
//! post-clear board. A branch's total is the sum of its per-depth
//! immediate rewards; totals are therefore only comparable between
//! branches of the same depth, which is all the maximization needs.
//!
//! # Complexity
//!
//! Branching is at most `rotation_count x width` per level (about 40), so
//! a search does `O((rotation_count x width)^depth)` board clones and
//! feature extractions. Cloning is a single memcpy and extraction is
//! linear in board size, which keeps depth 2-3 interactive.

use gridfall_engine::{Board, PieceKind};

use crate::{
    board_features::FeatureVector,
    placement_enumerator::{Placement, enumerate_placements},
    weights::HeuristicWeights,
};

/// No legal placement exists for the current piece.
///
/// This is an expected terminal outcome - the stack has overflowed to the
/// point where the piece cannot enter the board - and is the signal
/// callers map to game-over.
#[derive(Debug, Clone, Copy, PartialEq, Eq, derive_more::Display, derive_more::Error)]
#[display("no legal placement exists for the current piece")]
pub struct NoLegalPlacementError;

/// Chooses piece placements by exhaustive bounded-depth search.
///
/// Holds only the weight configuration; every search call is
/// self-contained and works on cloned boards, so one `PlacementSearch`
/// can serve concurrent callers.
#[derive(Debug, Clone, Default)]
pub struct PlacementSearch {
    weights: HeuristicWeights,
}

impl PlacementSearch {
    #[must_use]
    pub fn new(weights: HeuristicWeights) -> Self {
        Self { weights }
    }

    #[must_use]
    pub fn weights(&self) -> &HeuristicWeights {
        &self.weights
    }

    /// Single-piece decision: the best placement for `kind` on `board`.
    pub fn find_best_placement(
        &self,
        board: &Board,
        kind: PieceKind,
    ) -> Result<Placement, NoLegalPlacementError> {
        self.find_best_placement_sequence(board, &[kind], 1)
            .map(|(placement, _score)| placement)
    }

    /// Lookahead decision over an ordered piece list, current piece first.
    ///
    /// `depth` bounds how many pieces from the list may be placed; it is
    /// clamped to the list length and raised to at least 1. Returns the
    /// best first-piece placement together with the best cumulative score
    /// achievable below it. The caller applies only the first placement
    /// and re-runs the search next turn.
    ///
    /// Identical inputs always return the identical placement and score:
    /// exact ties keep the first candidate in enumeration order (rotation
    /// ascending, then column ascending).
    pub fn find_best_placement_sequence(
        &self,
        board: &Board,
        pieces: &[PieceKind],
        depth: usize,
    ) -> Result<(Placement, f64), NoLegalPlacementError> {
        let horizon = depth.clamp(1, pieces.len().max(1));
        let window = pieces.get(..horizon).ok_or(NoLegalPlacementError)?;
        self.search(board, window).ok_or(NoLegalPlacementError)
    }

    /// One level of the recursion: place the head piece every legal way,
    /// recurse on the tail, keep the best total.
    fn search(&self, board: &Board, pieces: &[PieceKind]) -> Option<(Placement, f64)> {
        let (&head, tail) = pieces.split_first()?;
        let mut best: Option<(Placement, f64)> = None;

        for candidate in enumerate_placements(board, head) {
            let piece = candidate.to_piece(head);
            let mut next = board.clone();
            if let Err(err) = next.add_piece(&piece) {
                // The enumerator only yields placeable candidates, so this
                // is a contract violation; skip the candidate rather than
                // abandoning the remaining ones.
                tracing::warn!(%err, ?candidate, "skipping unplaceable candidate");
                continue;
            }

            let features = FeatureVector::extract(&next);
            let mut total = self.weights.score(&features);
            next.clear_completed_lines(&piece);

            if !tail.is_empty() {
                // A dead-end tail (no legal placement below) terminates the
                // branch early; it keeps the reward accumulated so far.
                if let Some((_, tail_score)) = self.search(&next, tail) {
                    total += tail_score;
                }
            }

            if best.is_none_or(|(_, best_score)| total > best_score) {
                best = Some((candidate, total));
            }
        }

        best
    }
}

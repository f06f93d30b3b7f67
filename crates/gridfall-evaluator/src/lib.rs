//! Placement evaluation and search for the stacking engine.
//!
//! This crate decides where a piece should go. It is built from four
//! layers, each usable on its own:
//!
//! 1. **Feature extraction** ([`board_features`]) - derives a numeric
//!    [`board_features::FeatureVector`] from a board snapshot: column
//!    heights in aggregate, holes, bumpiness, and full rows.
//! 2. **Scoring** ([`weights`]) - collapses a feature vector into a scalar
//!    via a weighted linear combination. Weights are plain data, so
//!    alternate tunings are swapped without touching the algorithm.
//! 3. **Placement enumeration** ([`placement_enumerator`]) - lazily yields
//!    every legal resting position for a piece across its distinct
//!    rotations and anchor columns.
//! 4. **Sequence search** ([`sequence_search`]) - bounded-depth recursive
//!    exploration over an ordered list of upcoming pieces, returning the
//!    best first-piece placement and its achievable score.
//!
//! The search never mutates the board it is handed; every hypothetical
//! future is explored on a locally-owned clone. All entry points take
//! `&self`/`&Board`, so a full search can run on a worker thread while the
//! caller keeps rendering the live game.
//!
//! # Example
//!
//! ```
//! use gridfall_engine::{Board, PieceKind};
//! use gridfall_evaluator::{sequence_search::PlacementSearch, weights::HeuristicWeights};
//!
//! let search = PlacementSearch::new(HeuristicWeights::default());
//! let board = Board::standard();
//!
//! let pieces = [PieceKind::I, PieceKind::O];
//! let (placement, score) = search
//!     .find_best_placement_sequence(&board, &pieces, 2)
//!     .unwrap();
//! let first = placement.to_piece(pieces[0]);
//! # let _ = (first, score);
//! ```

pub mod board_features;
pub mod placement_enumerator;
pub mod sequence_search;
pub mod weights;

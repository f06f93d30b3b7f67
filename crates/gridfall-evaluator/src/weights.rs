//! Heuristic scoring: a weighted linear combination of board features.
//!
//! The weight set is configuration, not code. It derives serde so an
//! alternate tuning can be loaded from data and injected into the search
//! without touching the algorithm. Scores are only comparable within one
//! weight configuration; there is no normalization.

use serde::{Deserialize, Serialize};

use crate::board_features::FeatureVector;

/// One weight per board feature.
///
/// Sign conventions of the default tuning: line clears are rewarded, holes
/// carry the heaviest penalty, bumpiness and both height terms are
/// penalized, and relative height is mildly rewarded (keeping one deep
/// well open for line pieces tends to outscore a perfectly flat stack).
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct HeuristicWeights {
    pub lines_cleared: f64,
    pub hole_count: f64,
    pub bumpiness: f64,
    pub cumulative_height: f64,
    pub weighted_height: f64,
    pub relative_height: f64,
}

impl Default for HeuristicWeights {
    fn default() -> Self {
        Self {
            lines_cleared: 0.7607,
            hole_count: -0.9963,
            bumpiness: -0.1848,
            cumulative_height: -0.1540,
            weighted_height: -0.0522,
            relative_height: 0.0744,
        }
    }
}

impl HeuristicWeights {
    /// Scores a feature vector: the dot product of weights and features.
    /// Higher is better.
    #[must_use]
    pub fn score(&self, features: &FeatureVector) -> f64 {
        self.lines_cleared * f64::from(features.lines_cleared)
            + self.hole_count * f64::from(features.hole_count)
            + self.bumpiness * f64::from(features.bumpiness)
            + self.cumulative_height * f64::from(features.cumulative_height)
            + self.weighted_height * features.weighted_height
            + self.relative_height * f64::from(features.relative_height)
    }
}

//! Adjacency-weighted layout scoring.
//!
//! A layout scores the sum of relationship weights over every department
//! pair that touches. Each pair counts once no matter how many of its
//! cells share an edge. Zero-weight pairs (code `X` or undefined) never
//! contribute, so only the weighted pairs are tested at all.

use crate::model::{DeptPair, PositionMap, WeightTable};

/// Score of a chromosome that could not be placed.
///
/// Lower than any feasible score, since feasible scores are sums of
/// nonnegative weights. It is an internal value and is never reported as a
/// real score.
pub const INFEASIBLE_SCORE: f64 = -1e9;

/// Scores a placement, or returns [`INFEASIBLE_SCORE`] for a failed one.
pub fn score(positions: Option<&PositionMap>, weights: &WeightTable) -> f64 {
    match positions {
        Some(map) => adjacency_score(map, weights),
        None => INFEASIBLE_SCORE,
    }
}

/// Sum of weights of all adjacent weighted pairs in `positions`.
pub fn adjacency_score(positions: &PositionMap, weights: &WeightTable) -> f64 {
    adjacent_pairs(positions, weights)
        .into_iter()
        .map(|(_, w)| w)
        .sum()
}

/// Weighted pairs that are adjacent in `positions`, with their weights.
pub fn adjacent_pairs(positions: &PositionMap, weights: &WeightTable) -> Vec<(DeptPair, f64)> {
    weights
        .weighted_pairs()
        .into_iter()
        .filter(|(pair, _)| positions.are_adjacent(pair.first(), pair.second()))
        .collect()
}

/// Whether `score` came from a feasible layout.
pub fn is_feasible(score: f64) -> bool {
    score > INFEASIBLE_SCORE
}

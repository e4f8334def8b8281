//! Tournament selection.
//!
//! Selection works on the fitness list of the current generation. Higher
//! fitness is better.
//!
//! # References
//!
//! - Blickle & Thiele (1996), "A Comparison of Selection Schemes used in
//!   Evolutionary Algorithms"

use crate::random::sample_distinct;
use rand::Rng;

/// Tournament selection: draw `k` distinct individuals, return the fittest.
///
/// The draw is without replacement and `k` is clamped to the population
/// size. Ties go to the individual drawn first.
///
/// # Complexity
/// O(n) per selection (index pool), O(k) comparisons
///
/// # Panics
/// Panics if `fitnesses` is empty.
pub fn tournament<R: Rng>(fitnesses: &[f64], k: usize, rng: &mut R) -> usize {
    assert!(!fitnesses.is_empty(), "cannot select from empty population");

    let contenders = sample_distinct(fitnesses.len(), k.max(1), rng);
    let mut best = contenders[0];
    for &idx in &contenders[1..] {
        if fitnesses[idx] > fitnesses[best] {
            best = idx;
        }
    }
    best
}

/// Runs two independent tournaments and returns both winners.
///
/// The same individual may win both.
pub fn select_parents<R: Rng>(fitnesses: &[f64], k: usize, rng: &mut R) -> (usize, usize) {
    let first = tournament(fitnesses, k, rng);
    let second = tournament(fitnesses, k, rng);
    (first, second)
}

/// Indices of the `count` fittest individuals, best first.
///
/// Ties keep their original order.
pub fn elite_indices(fitnesses: &[f64], count: usize) -> Vec<usize> {
    let mut order: Vec<usize> = (0..fitnesses.len()).collect();
    // Stable sort: equal fitness keeps ascending index.
    order.sort_by(|&a, &b| fitnesses[b].total_cmp(&fitnesses[a]));
    order.truncate(count);
    order
}

//! Initial population construction.

use super::operators::is_permutation;
use crate::random::random_permutation;
use rand::Rng;
use std::collections::HashSet;
use tracing::debug;

/// Upper bound on up-front population reservation.
const MAX_RESERVE: usize = 1024;

/// Builds the first generation of `size` chromosomes over `0..n`.
///
/// The first chromosome is `seed` when it is a permutation of `0..n`, and a
/// random permutation otherwise. The rest are random permutations, kept
/// distinct on a best-effort basis: after `size * attempts_factor` random
/// draws without filling the population, duplicates are accepted. Small
/// department counts may have fewer distinct orders than `size`.
pub fn initialize_population<R: Rng>(
    n: usize,
    seed: Option<&[usize]>,
    size: usize,
    attempts_factor: usize,
    rng: &mut R,
) -> Vec<Vec<usize>> {
    let mut population = Vec::with_capacity(size.min(MAX_RESERVE));
    if size == 0 {
        return population;
    }

    let first = match seed {
        Some(genes) if is_permutation(genes, n) => genes.to_vec(),
        _ => random_permutation(n, rng),
    };
    let mut seen: HashSet<Vec<usize>> = HashSet::new();
    seen.insert(first.clone());
    population.push(first);

    let max_attempts = size.saturating_mul(attempts_factor);
    let mut attempts = 0usize;
    while population.len() < size && attempts < max_attempts {
        attempts += 1;
        let perm = random_permutation(n, rng);
        if seen.insert(perm.clone()) {
            population.push(perm);
        }
    }

    if population.len() < size {
        debug!(
            distinct = population.len(),
            requested = size,
            "Could not build a duplicate-free initial population; allowing duplicates."
        );
        while population.len() < size {
            population.push(random_permutation(n, rng));
        }
    }

    population
}

//! Permutation crossover and mutation for placement orders.
//!
//! Chromosomes are permutations of department ids (`&[usize]` over
//! `0..n`). Both operators always return a permutation of the same set.
//!
//! # References
//!
//! - Davis (1985), "Applying Adaptive Algorithms to Epistatic Domains"
//! - Cicirello (2023), "Genetic Operators for Permutation Representation"

use rand::Rng;

// ============================================================================
// Crossover
// ============================================================================

/// Order Crossover (OX) producing a single child.
///
/// # Algorithm
///
/// 1. Pick two distinct cut indices `a < b` uniformly at random
/// 2. Copy `parent1[a..=b]` into the same positions of the child
/// 3. Fill the remaining positions left to right with the genes of
///    `parent2`, in parent2's order, skipping genes already in the child
///
/// Chromosomes shorter than 2 have no distinct cut pair; the child is a
/// copy of `parent1`.
///
/// # Complexity
/// O(n) time, O(n) space
///
/// # Panics
/// Panics if the parents have different lengths.
pub fn order_crossover<R: Rng>(parent1: &[usize], parent2: &[usize], rng: &mut R) -> Vec<usize> {
    let n = parent1.len();
    assert_eq!(n, parent2.len(), "parents must have equal length");

    if n < 2 {
        return parent1.to_vec();
    }

    let (a, b) = distinct_cut_points(n, rng);
    ox_build_child(parent1, parent2, a, b)
}

/// Build one OX child: keep `template[start..=end]`, fill from `donor`.
pub(crate) fn ox_build_child(
    template: &[usize],
    donor: &[usize],
    start: usize,
    end: usize,
) -> Vec<usize> {
    let n = template.len();
    let mut child = vec![usize::MAX; n];
    let mut present = vec![false; n];

    for i in start..=end {
        child[i] = template[i];
        present[template[i]] = true;
    }

    let mut fill = donor.iter().copied().filter(|&gene| !present[gene]);
    for slot in child.iter_mut().filter(|slot| **slot == usize::MAX) {
        if let Some(gene) = fill.next() {
            *slot = gene;
        }
    }

    child
}

// ============================================================================
// Mutation
// ============================================================================

/// Swap mutation applied with probability `rate`.
///
/// When it fires, two distinct positions are chosen uniformly and their
/// genes exchanged. Returns whether a swap happened.
pub fn swap_mutation<R: Rng>(perm: &mut [usize], rate: f64, rng: &mut R) -> bool {
    let n = perm.len();
    if n < 2 || !rng.random_bool(rate.clamp(0.0, 1.0)) {
        return false;
    }
    let (i, j) = distinct_cut_points(n, rng);
    perm.swap(i, j);
    true
}

// ============================================================================
// Helpers
// ============================================================================

/// Two distinct indices in `0..n`, returned in ascending order.
///
/// Requires `n >= 2`.
fn distinct_cut_points<R: Rng>(n: usize, rng: &mut R) -> (usize, usize) {
    let a = rng.random_range(0..n);
    // Draw from the n - 1 remaining indices.
    let mut b = rng.random_range(0..n - 1);
    if b >= a {
        b += 1;
    }
    if a < b {
        (a, b)
    } else {
        (b, a)
    }
}

/// Whether `perm` is a permutation of `0..n`.
pub fn is_permutation(perm: &[usize], n: usize) -> bool {
    if perm.len() != n {
        return false;
    }
    let mut seen = vec![false; n];
    perm.iter()
        .all(|&g| g < n && !std::mem::replace(&mut seen[g], true))
}

// ============================================================================
// Tests
// ============================================================================

//! Crossover, mutation and repair on flattened cubes.
//!
//! Operators work on raw `Vec<u32>` genomes (layer-major cube values) so
//! that crossover children may transiently hold duplicates. Every child goes
//! through [`mutate_and_repair`] before it is wrapped back into a
//! [`Cube`](crate::cube::Cube).
//!
//! # Crossover Operators
//!
//! - [`layer_crossover`]: single cut between whole z layers
//! - [`order_crossover`] (OX): Davis (1985), preserves relative order
//!
//! # Mutation and Repair
//!
//! - [`swap_mutation`]: exchange two distinct positions, O(1)
//! - [`repair`]: replace repeated values with missing ones, O(n)
//!
//! # References
//!
//! - Davis (1985), "Applying Adaptive Algorithms to Epistatic Domains"

use rand::Rng;

// ============================================================================
// Crossover operators
// ============================================================================

/// Single-point crossover at z-layer granularity.
///
/// Picks a cut `k` uniformly in `[1, side-1]`. `child1` takes parent1's
/// layers `[0, k)` and parent2's layers `[k, side)`; `child2` is the
/// complement. Children are generally not permutations.
///
/// # Panics
/// Panics if the parents are not both of length `side³`, or `side < 2`.
pub fn layer_crossover<R: Rng>(
    parent1: &[u32],
    parent2: &[u32],
    side: usize,
    rng: &mut R,
) -> (Vec<u32>, Vec<u32>) {
    assert!(side >= 2, "cube side must be at least 2");
    let len = side * side * side;
    assert_eq!(parent1.len(), len, "parent1 length does not match side");
    assert_eq!(parent2.len(), len, "parent2 length does not match side");

    let k = rng.random_range(1..side);
    layer_crossover_at(parent1, parent2, k * side * side)
}

/// Layer crossover with an explicit flat cut position.
fn layer_crossover_at(parent1: &[u32], parent2: &[u32], cut: usize) -> (Vec<u32>, Vec<u32>) {
    let mut child1 = parent1[..cut].to_vec();
    child1.extend_from_slice(&parent2[cut..]);
    let mut child2 = parent2[..cut].to_vec();
    child2.extend_from_slice(&parent1[cut..]);
    (child1, child2)
}

/// Order Crossover (OX) for permutations of `1..=len`.
///
/// # Algorithm (Davis, 1985)
///
/// 1. Select a random segment `[start, end]` from parent1
/// 2. Copy segment to child at the same positions
/// 3. Fill remaining positions with values from parent2, in their original
///    order starting after the segment, skipping values already present
///
/// # Complexity
/// O(n) time, O(n) space
///
/// # Panics
/// Panics if parents have different lengths or are empty.
pub fn order_crossover<R: Rng>(
    parent1: &[u32],
    parent2: &[u32],
    rng: &mut R,
) -> (Vec<u32>, Vec<u32>) {
    let n = parent1.len();
    assert_eq!(n, parent2.len(), "parents must have equal length");
    assert!(n > 0, "parents must not be empty");

    let (start, end) = random_segment(n, rng);

    let child1 = ox_build_child(parent1, parent2, start, end);
    let child2 = ox_build_child(parent2, parent1, start, end);

    (child1, child2)
}

/// Build one OX child: copy segment from `template`, fill from `donor`.
fn ox_build_child(template: &[u32], donor: &[u32], start: usize, end: usize) -> Vec<u32> {
    let n = template.len();
    let mut child = vec![0; n];
    let mut in_segment = vec![false; n + 1];

    for i in start..=end {
        child[i] = template[i];
        in_segment[template[i] as usize] = true;
    }

    let mut pos = (end + 1) % n;
    for offset in 0..n {
        let val = donor[(end + 1 + offset) % n];
        if !in_segment[val as usize] {
            child[pos] = val;
            pos = (pos + 1) % n;
        }
    }

    child
}

// ============================================================================
// Mutation and repair
// ============================================================================

/// Swap mutation: exchange two distinct random positions.
pub fn swap_mutation<R: Rng>(genome: &mut [u32], rng: &mut R) {
    if genome.len() < 2 {
        return;
    }
    let (i, j) = crate::random::distinct_pair(genome.len(), rng);
    genome.swap(i, j);
}

/// Restores the permutation invariant over `1..=genome.len()`.
///
/// Scans in index order; every occurrence of a value already seen (or out
/// of range) is overwritten with the smallest value not present anywhere
/// in the genome. Values at their first occurrence are never moved.
///
/// Returns the number of positions rewritten.
pub fn repair(genome: &mut [u32]) -> usize {
    let len = genome.len();
    let mut present = vec![false; len + 1];
    for &v in genome.iter() {
        if let Some(slot) = present.get_mut(v as usize) {
            *slot = true;
        }
    }
    let mut missing = (1..=len as u32).filter(|&v| !present[v as usize]);

    let mut seen = vec![false; len + 1];
    let mut rewritten = 0;
    for value in genome.iter_mut() {
        let slot = *value as usize;
        if slot != 0 && slot <= len && !seen[slot] {
            seen[slot] = true;
            continue;
        }
        // Duplicates and missing values balance out, so this never runs dry.
        if let Some(replacement) = missing.next() {
            *value = replacement;
            seen[replacement as usize] = true;
            rewritten += 1;
        }
    }
    rewritten
}

/// Mutation step applied to every GA child: with probability
/// `mutation_rate` one [`swap_mutation`], then an unconditional
/// [`repair`].
pub fn mutate_and_repair<R: Rng>(genome: &mut [u32], mutation_rate: f64, rng: &mut R) {
    if rng.random_range(0.0..1.0) < mutation_rate {
        swap_mutation(genome, rng);
    }
    repair(genome);
}

// ============================================================================
// Helpers
// ============================================================================

/// Pick a random segment `[start, end]` within `0..n` where `start <= end`.
fn random_segment<R: Rng>(n: usize, rng: &mut R) -> (usize, usize) {
    let a = rng.random_range(0..n);
    let b = rng.random_range(0..n);
    if a <= b {
        (a, b)
    } else {
        (b, a)
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::random::{create_rng, shuffle};
    use proptest::prelude::*;
    use std::collections::HashSet;

    /// Check that a slice is a valid permutation of 1..=n.
    fn is_valid_permutation(genome: &[u32], n: usize) -> bool {
        if genome.len() != n {
            return false;
        }
        let set: HashSet<u32> = genome.iter().copied().collect();
        set.len() == n && genome.iter().all(|&v| v >= 1 && v as usize <= n)
    }

    fn random_genome(n: usize, seed: u64) -> Vec<u32> {
        let mut genome: Vec<u32> = (1..=n as u32).collect();
        shuffle(&mut genome, &mut create_rng(seed));
        genome
    }

    // ---- Layer crossover ----

    #[test]
    fn test_layer_crossover_takes_whole_layers() {
        let mut rng = create_rng(42);
        let p1: Vec<u32> = (1..=27).collect();
        let p2: Vec<u32> = (1..=27).rev().collect();

        for _ in 0..50 {
            let (c1, c2) = layer_crossover(&p1, &p2, 3, &mut rng);
            let cut = (0..=27).find(|&i| i == 27 || c1[i] != p1[i]).unwrap();
            assert!(cut == 9 || cut == 18, "cut {cut} not on a layer boundary");
            assert_eq!(&c1[..cut], &p1[..cut]);
            assert_eq!(&c1[cut..], &p2[cut..]);
            assert_eq!(&c2[..cut], &p2[..cut]);
            assert_eq!(&c2[cut..], &p1[cut..]);
        }
    }

    #[test]
    fn test_layer_crossover_cut_range() {
        let mut rng = create_rng(1);
        let p1 = vec![1u32; 8];
        let p2 = vec![2u32; 8];
        for _ in 0..100 {
            let (c1, _) = layer_crossover(&p1, &p2, 2, &mut rng);
            // Side 2 has exactly one legal cut: after the first layer.
            assert_eq!(c1, vec![1, 1, 1, 1, 2, 2, 2, 2]);
        }
    }

    #[test]
    fn test_layer_crossover_usually_breaks_permutation() {
        let p1: Vec<u32> = (1..=8).collect();
        let p2: Vec<u32> = vec![5, 6, 7, 8, 1, 2, 3, 4];
        let (c1, c2) = layer_crossover_at(&p1, &p2, 4);
        assert_eq!(c1, vec![1, 2, 3, 4, 1, 2, 3, 4]);
        assert_eq!(c2, vec![5, 6, 7, 8, 5, 6, 7, 8]);
        assert!(!is_valid_permutation(&c1, 8));
    }

    // ---- OX Crossover ----

    #[test]
    fn test_ox_produces_valid_permutations() {
        let mut rng = create_rng(42);
        let p1: Vec<u32> = (1..=8).collect();
        let p2: Vec<u32> = (1..=8).rev().collect();

        for _ in 0..100 {
            let (c1, c2) = order_crossover(&p1, &p2, &mut rng);
            assert!(is_valid_permutation(&c1, 8), "OX child1 not valid: {c1:?}");
            assert!(is_valid_permutation(&c2, 8), "OX child2 not valid: {c2:?}");
        }
    }

    #[test]
    fn test_ox_identical_parents() {
        let mut rng = create_rng(42);
        let p = random_genome(27, 5);
        let (c1, c2) = order_crossover(&p, &p, &mut rng);
        assert_eq!(c1, p);
        assert_eq!(c2, p);
    }

    // ---- Mutation ----

    #[test]
    fn test_swap_changes_exactly_two_positions() {
        let mut rng = create_rng(42);
        for _ in 0..100 {
            let original: Vec<u32> = (1..=10).collect();
            let mut genome = original.clone();
            swap_mutation(&mut genome, &mut rng);
            let changed = genome.iter().zip(&original).filter(|(a, b)| a != b).count();
            assert_eq!(changed, 2);
            assert!(is_valid_permutation(&genome, 10));
        }
    }

    #[test]
    fn test_mutation_rate_zero_only_repairs() {
        let mut rng = create_rng(3);
        let original = random_genome(27, 9);
        let mut genome = original.clone();
        mutate_and_repair(&mut genome, 0.0, &mut rng);
        assert_eq!(genome, original);
    }

    #[test]
    fn test_mutation_rate_one_always_swaps() {
        let mut rng = create_rng(3);
        let original = random_genome(27, 9);
        for _ in 0..20 {
            let mut genome = original.clone();
            mutate_and_repair(&mut genome, 1.0, &mut rng);
            assert_ne!(genome, original);
            assert!(is_valid_permutation(&genome, 27));
        }
    }

    // ---- Repair ----

    #[test]
    fn test_repair_pairs_missing_values_in_index_order() {
        let mut genome = vec![1, 2, 3, 4, 1, 2, 3, 4];
        let rewritten = repair(&mut genome);
        assert_eq!(rewritten, 4);
        assert_eq!(genome, vec![1, 2, 3, 4, 5, 6, 7, 8]);
    }

    #[test]
    fn test_repair_keeps_first_occurrences() {
        let mut genome = vec![8, 8, 2, 2, 5, 6, 7, 1];
        repair(&mut genome);
        assert_eq!(genome, vec![8, 3, 2, 4, 5, 6, 7, 1]);
    }

    #[test]
    fn test_repair_out_of_range_values() {
        let mut genome = vec![0, 9, 3, 4];
        repair(&mut genome);
        assert!(is_valid_permutation(&genome, 4));
        assert_eq!(&genome[2..], &[3, 4]);
    }

    #[test]
    fn test_repair_noop_on_permutation() {
        let mut genome = random_genome(64, 1);
        let original = genome.clone();
        assert_eq!(repair(&mut genome), 0);
        assert_eq!(genome, original);
    }

    // ---- Pipeline ----

    proptest! {
        #[test]
        fn crossover_then_repair_is_permutation(
            s1 in any::<u64>(),
            s2 in any::<u64>(),
            s3 in any::<u64>(),
            rate in 0.0f64..=1.0,
        ) {
            let side = 3;
            let n = side * side * side;
            let p1 = random_genome(n, s1);
            let p2 = random_genome(n, s2);
            let mut rng = create_rng(s3);
            let (mut c1, mut c2) = layer_crossover(&p1, &p2, side, &mut rng);
            mutate_and_repair(&mut c1, rate, &mut rng);
            mutate_and_repair(&mut c2, rate, &mut rng);
            prop_assert!(is_valid_permutation(&c1, n));
            prop_assert!(is_valid_permutation(&c2, n));
        }

        #[test]
        fn repair_fixes_arbitrary_genomes(genome in proptest::collection::vec(0u32..40, 27)) {
            let mut genome = genome;
            repair(&mut genome);
            prop_assert!(is_valid_permutation(&genome, 27));
        }
    }

    #[test]
    fn test_random_segment_bounds() {
        let mut rng = create_rng(42);
        for _ in 0..1000 {
            let (start, end) = random_segment(10, &mut rng);
            assert!(start <= end);
            assert!(end < 10);
        }
    }
}

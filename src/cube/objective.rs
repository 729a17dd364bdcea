//! Objective function: total deviation from the magic number.
//!
//! The line set is built once per side length and reused for every call.
//! For side `n` it contains `3n² + 6n + 4` lines:
//!
//! | Kind | Count | Cells |
//! |------|-------|-------|
//! | Row | n² | `(z, y, ·)` |
//! | Column | n² | `(z, ·, x)` |
//! | Pillar | n² | `(·, y, x)` |
//! | Plane diagonal | 6n | main and anti diagonal of every z, y and x plane |
//! | Space diagonal | 4 | corner to corner through all three axes |
//!
//! The score is `Σ |line_sum − M(n)|`. A full evaluation touches every line
//! (O(n³)); [`Objective::score_after_swap`] only revisits the lines through
//! the two swapped cells (O(n)) and returns the identical value.

use super::types::{cell_count, Cube};
use crate::error::ConfigError;

/// Magic number `M(n) = n·(n³+1)/2`.
pub fn magic_number(side: usize) -> u64 {
    let n = side as u64;
    n * (n * n * n + 1) / 2
}

/// GA fitness `1/(1+score)`, in `(0, 1]` and strictly decreasing in score.
///
/// Only used to weight selection; acceptance decisions use raw scores.
pub fn fitness(score: u64) -> f64 {
    1.0 / (1.0 + score as f64)
}

/// The family a line belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum LineKind {
    Row,
    Column,
    Pillar,
    PlaneDiagonal,
    SpaceDiagonal,
}

/// Deviation split by line family. `total()` equals [`Objective::score`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ScoreBreakdown {
    pub rows: u64,
    pub columns: u64,
    pub pillars: u64,
    pub plane_diagonals: u64,
    pub space_diagonals: u64,
}

impl ScoreBreakdown {
    pub fn total(&self) -> u64 {
        self.rows + self.columns + self.pillars + self.plane_diagonals + self.space_diagonals
    }

    fn add(&mut self, kind: LineKind, deviation: u64) {
        match kind {
            LineKind::Row => self.rows += deviation,
            LineKind::Column => self.columns += deviation,
            LineKind::Pillar => self.pillars += deviation,
            LineKind::PlaneDiagonal => self.plane_diagonals += deviation,
            LineKind::SpaceDiagonal => self.space_diagonals += deviation,
        }
    }
}

/// Scores cubes of one side length.
///
/// Holds the magic number, the flattened line set, and for every cell the
/// sorted ids of the lines passing through it.
#[derive(Debug, Clone)]
pub struct Objective {
    side: usize,
    magic: i64,
    kinds: Vec<LineKind>,
    /// Line `l` occupies `cells[l * side..(l + 1) * side]`.
    cells: Vec<usize>,
    membership: Vec<Vec<usize>>,
}

impl Objective {
    /// Builds the objective for cubes of side `side`.
    pub fn new(side: usize) -> Result<Self, ConfigError> {
        if side < 2 {
            return Err(ConfigError::SideTooSmall(side));
        }
        let n = side;
        let idx = |z: usize, y: usize, x: usize| (z * n + y) * n + x;

        let line_count = 3 * n * n + 6 * n + 4;
        let mut kinds = Vec::with_capacity(line_count);
        let mut cells = Vec::with_capacity(line_count * n);
        let mut push = |kind: LineKind, line: &mut dyn Iterator<Item = usize>| {
            kinds.push(kind);
            cells.extend(line);
        };

        for z in 0..n {
            for y in 0..n {
                push(LineKind::Row, &mut (0..n).map(|x| idx(z, y, x)));
            }
        }
        for z in 0..n {
            for x in 0..n {
                push(LineKind::Column, &mut (0..n).map(|y| idx(z, y, x)));
            }
        }
        for y in 0..n {
            for x in 0..n {
                push(LineKind::Pillar, &mut (0..n).map(|z| idx(z, y, x)));
            }
        }
        for z in 0..n {
            push(LineKind::PlaneDiagonal, &mut (0..n).map(|i| idx(z, i, i)));
            push(LineKind::PlaneDiagonal, &mut (0..n).map(|i| idx(z, i, n - 1 - i)));
        }
        for y in 0..n {
            push(LineKind::PlaneDiagonal, &mut (0..n).map(|i| idx(i, y, i)));
            push(LineKind::PlaneDiagonal, &mut (0..n).map(|i| idx(n - 1 - i, y, i)));
        }
        for x in 0..n {
            push(LineKind::PlaneDiagonal, &mut (0..n).map(|i| idx(i, i, x)));
            push(LineKind::PlaneDiagonal, &mut (0..n).map(|i| idx(i, n - 1 - i, x)));
        }
        push(LineKind::SpaceDiagonal, &mut (0..n).map(|i| idx(i, i, i)));
        push(LineKind::SpaceDiagonal, &mut (0..n).map(|i| idx(i, i, n - 1 - i)));
        push(LineKind::SpaceDiagonal, &mut (0..n).map(|i| idx(i, n - 1 - i, i)));
        push(LineKind::SpaceDiagonal, &mut (0..n).map(|i| idx(n - 1 - i, i, i)));

        // Lines are visited in id order, so each membership list is sorted.
        let mut membership = vec![Vec::new(); cell_count(n)];
        for (line, members) in cells.chunks_exact(n).enumerate() {
            for &cell in members {
                membership[cell].push(line);
            }
        }

        Ok(Self {
            side,
            magic: magic_number(side) as i64,
            kinds,
            cells,
            membership,
        })
    }

    pub fn side(&self) -> usize {
        self.side
    }

    pub fn magic_number(&self) -> u64 {
        self.magic as u64
    }

    /// Number of lines, `3n² + 6n + 4`.
    pub fn line_count(&self) -> usize {
        self.kinds.len()
    }

    /// Every line with its kind and flat cell indices.
    pub fn lines(&self) -> impl Iterator<Item = (LineKind, &[usize])> + '_ {
        self.kinds
            .iter()
            .copied()
            .zip(self.cells.chunks_exact(self.side))
    }

    /// Total deviation of `cube`. Zero iff it is a diagonal magic cube.
    ///
    /// # Panics
    /// Panics if the cube side differs from the objective's.
    pub fn score(&self, cube: &Cube) -> u64 {
        self.check_side(cube);
        self.score_values(cube.values())
    }

    /// Total deviation of raw layer-major values.
    ///
    /// Accepts arrangements that are not permutations, which is useful for
    /// scoring hand-built grids.
    ///
    /// # Panics
    /// Panics if `values.len() != n³`.
    pub fn score_values(&self, values: &[u32]) -> u64 {
        assert_eq!(
            values.len(),
            cell_count(self.side),
            "value count does not match cube side"
        );
        self.cells
            .chunks_exact(self.side)
            .map(|line| self.deviation(line_sum(values, line)))
            .sum()
    }

    /// Deviation split by line kind.
    pub fn breakdown(&self, cube: &Cube) -> ScoreBreakdown {
        self.check_side(cube);
        let values = cube.values();
        let mut breakdown = ScoreBreakdown::default();
        for (kind, line) in self.lines() {
            breakdown.add(kind, self.deviation(line_sum(values, line)));
        }
        breakdown
    }

    /// Score the cube would have after swapping flat cells `a` and `b`.
    ///
    /// `current_score` must be the cube's current score. Only the lines
    /// through `a` or `b` are summed; a line through both keeps its sum.
    ///
    /// # Panics
    /// Panics if the cube side differs from the objective's, or if `a` or
    /// `b` is not below `n³`.
    pub fn score_after_swap(&self, cube: &Cube, current_score: u64, a: usize, b: usize) -> u64 {
        self.check_side(cube);
        let values = cube.values();
        let (va, vb) = (values[a] as i64, values[b] as i64);
        if a == b || va == vb {
            return current_score;
        }

        let mut delta = 0i64;
        for &line in &self.membership[a] {
            if self.membership[b].binary_search(&line).is_err() {
                delta += self.line_delta(values, line, vb - va);
            }
        }
        for &line in &self.membership[b] {
            if self.membership[a].binary_search(&line).is_err() {
                delta += self.line_delta(values, line, va - vb);
            }
        }

        let next = current_score as i64 + delta;
        debug_assert!(next >= 0, "current_score was stale");
        next.max(0) as u64
    }

    fn line_delta(&self, values: &[u32], line: usize, shift: i64) -> i64 {
        let members = &self.cells[line * self.side..(line + 1) * self.side];
        let old = line_sum(values, members);
        self.deviation(old + shift) as i64 - self.deviation(old) as i64
    }

    fn deviation(&self, sum: i64) -> u64 {
        (sum - self.magic).unsigned_abs()
    }

    fn check_side(&self, cube: &Cube) {
        assert_eq!(
            cube.side(),
            self.side,
            "cube side does not match objective side"
        );
    }
}

fn line_sum(values: &[u32], line: &[usize]) -> i64 {
    line.iter().map(|&cell| values[cell] as i64).sum()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cube::fixtures::diagonal_magic_7;
    use crate::cube::Coord;
    use crate::random::create_rng;
    use proptest::prelude::*;

    fn sample_n2() -> Cube {
        Cube::from_layers(&[
            vec![vec![1, 2], vec![3, 4]],
            vec![vec![5, 6], vec![7, 8]],
        ])
        .unwrap()
    }

    fn reflect_z(cube: &Cube) -> Cube {
        let n = cube.side();
        let values = (0..n)
            .rev()
            .flat_map(|z| cube.layer(z).to_vec())
            .collect();
        Cube::from_values(n, values).unwrap()
    }

    #[test]
    fn test_magic_number() {
        assert_eq!(magic_number(2), 9);
        assert_eq!(magic_number(3), 42);
        assert_eq!(magic_number(5), 315);
    }

    #[test]
    fn test_rejects_small_side() {
        assert_eq!(Objective::new(1).unwrap_err(), ConfigError::SideTooSmall(1));
    }

    #[test]
    fn test_line_counts() {
        for n in 2..=6 {
            let objective = Objective::new(n).unwrap();
            assert_eq!(objective.line_count(), 3 * n * n + 6 * n + 4);
            let count = |kind| objective.lines().filter(|(k, _)| *k == kind).count();
            assert_eq!(count(LineKind::Row), n * n);
            assert_eq!(count(LineKind::Column), n * n);
            assert_eq!(count(LineKind::Pillar), n * n);
            assert_eq!(count(LineKind::PlaneDiagonal), 6 * n);
            assert_eq!(count(LineKind::SpaceDiagonal), 4);
            assert!(objective.lines().all(|(_, cells)| cells.len() == n));
        }
    }

    #[test]
    fn test_hand_computed_n2() {
        // M(2) = 9. Rows 6+2+2+6, columns 5+3+3+5, pillars 3+1+1+3,
        // z-plane diagonals 4*4, y-plane 4*2, x-plane 4*1, space 0.
        let objective = Objective::new(2).unwrap();
        let cube = sample_n2();
        let breakdown = objective.breakdown(&cube);
        assert_eq!(breakdown.rows, 16);
        assert_eq!(breakdown.columns, 16);
        assert_eq!(breakdown.pillars, 8);
        assert_eq!(breakdown.plane_diagonals, 28);
        assert_eq!(breakdown.space_diagonals, 0);
        assert_eq!(objective.score(&cube), 68);
        assert_eq!(breakdown.total(), 68);
    }

    #[test]
    fn test_deterministic() {
        let objective = Objective::new(5).unwrap();
        let cube = Cube::random(5, &mut create_rng(3));
        assert_eq!(objective.score(&cube), objective.score(&cube));
    }

    #[test]
    fn test_zero_when_every_line_hits_magic() {
        // With every cell equal to M(n)/n each line sums to M(n).
        for n in [3usize, 5] {
            let objective = Objective::new(n).unwrap();
            let fill = (magic_number(n) / n as u64) as u32;
            assert_eq!(objective.score_values(&vec![fill; n * n * n]), 0);
        }
    }

    #[test]
    fn test_magic_permutation_scores_zero() {
        let objective = Objective::new(7).unwrap();
        let cube = diagonal_magic_7();
        assert!(cube.is_permutation());
        assert_eq!(objective.score(&cube), 0);
        assert_eq!(objective.breakdown(&cube), ScoreBreakdown::default());

        // Any swap breaks at least one line through a cell it moves.
        for (a, b) in [(0, 1), (0, 342), (171, 200)] {
            assert!(objective.score_after_swap(&cube, 0, a, b) > 0);
        }
    }

    #[test]
    #[should_panic]
    fn test_score_after_swap_out_of_range_panics() {
        let objective = Objective::new(2).unwrap();
        let cube = sample_n2();
        let score = objective.score(&cube);
        objective.score_after_swap(&cube, score, 0, 8);
    }

    #[test]
    fn test_reflection_preserves_score() {
        let objective = Objective::new(4).unwrap();
        let mut rng = create_rng(11);
        for _ in 0..20 {
            let cube = Cube::random(4, &mut rng);
            assert_eq!(objective.score(&cube), objective.score(&reflect_z(&cube)));
        }
    }

    #[test]
    fn test_swap_twice_restores_score() {
        let objective = Objective::new(5).unwrap();
        let mut cube = Cube::random(5, &mut create_rng(5));
        let before = objective.score(&cube);
        let (a, b) = (Coord::new(0, 1, 2), Coord::new(4, 3, 0));
        cube.swap(a, b);
        cube.swap(a, b);
        assert_eq!(objective.score(&cube), before);
    }

    #[test]
    fn test_score_after_swap_same_cell() {
        let objective = Objective::new(3).unwrap();
        let cube = Cube::random(3, &mut create_rng(8));
        let score = objective.score(&cube);
        assert_eq!(objective.score_after_swap(&cube, score, 4, 4), score);
    }

    #[test]
    fn test_score_after_swap_exhaustive_n2() {
        let objective = Objective::new(2).unwrap();
        let cube = sample_n2();
        let score = objective.score(&cube);
        for a in 0..8 {
            for b in 0..8 {
                let mut swapped = cube.clone();
                swapped.swap_indices(a, b);
                assert_eq!(
                    objective.score_after_swap(&cube, score, a, b),
                    objective.score(&swapped),
                    "mismatch for swap ({a}, {b})"
                );
            }
        }
    }

    #[test]
    #[should_panic(expected = "cube side does not match")]
    fn test_wrong_side_panics() {
        let objective = Objective::new(3).unwrap();
        objective.score(&sample_n2());
    }

    #[test]
    fn test_fitness() {
        assert!((fitness(0) - 1.0).abs() < 1e-15);
        assert!((fitness(1) - 0.5).abs() < 1e-15);
        assert!(fitness(10) > fitness(11));
        assert!(fitness(u64::MAX) > 0.0);
    }

    proptest! {
        #[test]
        fn incremental_matches_full(seed in any::<u64>(), a in 0usize..125, b in 0usize..125) {
            let objective = Objective::new(5).unwrap();
            let mut cube = Cube::random(5, &mut create_rng(seed));
            let score = objective.score(&cube);
            let predicted = objective.score_after_swap(&cube, score, a, b);
            cube.swap_indices(a, b);
            prop_assert_eq!(predicted, objective.score(&cube));
        }
    }
}

//! Fitness-proportionate parent selection.
//!
//! Each generation builds one [`RouletteWheel`] from the population's
//! fitnesses `1/(1+score)`. Every parent slot is an independent draw with
//! replacement, so the same individual can be picked for both slots.
//!
//! # References
//!
//! - Goldberg (1989), *Genetic Algorithms in Search, Optimization, and
//!   Machine Learning*, ch. 1

use super::types::Individual;
use rand::Rng;

/// Weighted sampling with replacement over a population.
///
/// # Complexity
/// O(n) to build, O(log n) per draw
#[derive(Debug, Clone)]
pub struct RouletteWheel {
    cumulative: Vec<f64>,
}

impl RouletteWheel {
    /// Builds the wheel from the population's fitnesses.
    ///
    /// # Panics
    /// Panics if `population` is empty.
    pub fn new(population: &[Individual]) -> Self {
        Self::from_weights(population.iter().map(Individual::fitness))
    }

    /// Builds the wheel from arbitrary positive weights.
    ///
    /// # Panics
    /// Panics if there are no weights.
    pub fn from_weights(weights: impl IntoIterator<Item = f64>) -> Self {
        let mut total = 0.0;
        let cumulative: Vec<f64> = weights
            .into_iter()
            .map(|w| {
                total += w;
                total
            })
            .collect();
        assert!(!cumulative.is_empty(), "cannot select from empty population");
        Self { cumulative }
    }

    /// Number of slots on the wheel.
    pub fn len(&self) -> usize {
        self.cumulative.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cumulative.is_empty()
    }

    /// Probability of drawing slot `i`.
    pub fn probability(&self, i: usize) -> f64 {
        let previous = if i == 0 { 0.0 } else { self.cumulative[i - 1] };
        (self.cumulative[i] - previous) / self.total()
    }

    /// Draws one index with probability `w_i / Σw`.
    pub fn select<R: Rng>(&self, rng: &mut R) -> usize {
        let n = self.cumulative.len();
        if n == 1 {
            return 0;
        }
        let threshold = rng.random_range(0.0..self.total());
        let idx = self.cumulative.partition_point(|&c| c <= threshold);
        idx.min(n - 1) // floating-point fallback
    }

    fn total(&self) -> f64 {
        self.cumulative[self.cumulative.len() - 1]
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::random::create_rng;

    #[test]
    fn test_roulette_favors_best() {
        // Fitness 1/(1+score) for scores 99, 49, 0, 79.
        let wheel = RouletteWheel::from_weights([0.01, 0.02, 1.0, 0.0125]);
        let mut rng = create_rng(42);

        let mut counts = [0u32; 4];
        let n = 10000;
        for _ in 0..n {
            counts[wheel.select(&mut rng)] += 1;
        }
        assert!(
            counts[2] > 9000,
            "expected the zero-score slot to dominate, got {counts:?}"
        );
        assert!(counts[1] > counts[0]);
    }

    #[test]
    fn test_roulette_proportional() {
        let wheel = RouletteWheel::from_weights([1.0, 3.0]);
        let mut rng = create_rng(7);

        let n = 20000;
        let hits = (0..n).filter(|_| wheel.select(&mut rng) == 1).count();
        let ratio = hits as f64 / n as f64;
        assert!(
            (ratio - 0.75).abs() < 0.02,
            "expected ~75% for weight 3 of 4, got {ratio}"
        );
        assert!((wheel.probability(1) - 0.75).abs() < 1e-12);
    }

    #[test]
    fn test_equal_weights_roughly_uniform() {
        let wheel = RouletteWheel::from_weights([0.5; 4]);
        let mut rng = create_rng(42);

        let mut counts = [0u32; 4];
        for _ in 0..10000 {
            counts[wheel.select(&mut rng)] += 1;
        }
        for &c in &counts {
            assert!(c > 2000, "expected roughly uniform, got {counts:?}");
        }
    }

    #[test]
    fn test_single_slot() {
        let wheel = RouletteWheel::from_weights([0.3]);
        let mut rng = create_rng(42);
        assert_eq!(wheel.select(&mut rng), 0);
        assert_eq!(wheel.len(), 1);
    }

    #[test]
    fn test_with_replacement_allows_self_pairing() {
        let wheel = RouletteWheel::from_weights([1.0, 1.0]);
        let mut rng = create_rng(3);
        let same = (0..200)
            .filter(|_| wheel.select(&mut rng) == wheel.select(&mut rng))
            .count();
        assert!(same > 0, "independent draws should sometimes coincide");
    }

    #[test]
    #[should_panic(expected = "cannot select from empty population")]
    fn test_empty_population_panics() {
        RouletteWheel::from_weights(std::iter::empty());
    }
}

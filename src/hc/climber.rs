//! Local search state over a single cube.

use super::types::{BestNeighbor, PlateauPolicy};
use crate::cube::{Cube, Objective};
use crate::error::ConfigError;
use crate::random::distinct_pair;
use rand::Rng;

/// A hill climber that owns one cube and its current score.
///
/// Neighbours are all cubes reachable by swapping two cells. Each swap is
/// scored incrementally through [`Objective::score_after_swap`], so a full
/// scan costs `O(n³·(n³−1)/2 · n)` rather than re-scoring every line.
///
/// ```
/// use u_magicube::cube::{Cube, Objective};
/// use u_magicube::hc::{HillClimbing, PlateauPolicy};
/// use u_magicube::random::create_rng;
///
/// let objective = Objective::new(3).unwrap();
/// let cube = Cube::random(3, &mut create_rng(1));
/// let mut climber = HillClimbing::new(&objective, cube, PlateauPolicy::Strict).unwrap();
///
/// let start = climber.score();
/// let end = climber.perform_search();
/// assert!(end <= start);
/// ```
#[derive(Debug, Clone)]
pub struct HillClimbing<'a> {
    objective: &'a Objective,
    cube: Cube,
    score: u64,
    plateau: PlateauPolicy,
    steps: usize,
    history: Vec<u64>,
}

impl<'a> HillClimbing<'a> {
    pub fn new(
        objective: &'a Objective,
        cube: Cube,
        plateau: PlateauPolicy,
    ) -> Result<Self, ConfigError> {
        if cube.side() != objective.side() {
            return Err(ConfigError::SideMismatch {
                expected: objective.side(),
                found: cube.side(),
            });
        }
        let score = objective.score(&cube);
        Ok(Self {
            objective,
            cube,
            score,
            plateau,
            steps: 0,
            history: vec![score],
        })
    }

    pub fn cube(&self) -> &Cube {
        &self.cube
    }

    pub fn into_cube(self) -> Cube {
        self.cube
    }

    pub fn score(&self) -> u64 {
        self.score
    }

    pub fn plateau(&self) -> PlateauPolicy {
        self.plateau
    }

    /// Number of swaps committed so far.
    pub fn steps(&self) -> usize {
        self.steps
    }

    /// Starting score followed by the score after every committed swap.
    pub fn history(&self) -> &[u64] {
        &self.history
    }

    /// Scans every unordered pair of cells and applies the best swap.
    ///
    /// The scan starts from the current score and keeps the best pair
    /// according to the plateau policy. When a pair was recorded it is
    /// swapped in place before returning.
    pub fn find_best_neighbor(&mut self) -> BestNeighbor {
        self.scan_and_apply(self.plateau)
    }

    /// Steepest ascent until a step fails to strictly lower the score.
    ///
    /// Returns the final score. Under [`PlateauPolicy::Permissive`] the
    /// last step may have committed a zero-gain swap.
    pub fn perform_search(&mut self) -> u64 {
        loop {
            let before = self.score;
            let neighbor = self.find_best_neighbor();
            if neighbor.value >= before {
                break;
            }
        }
        tracing::trace!(score = self.score, steps = self.steps, "local optimum");
        self.score
    }

    /// Steepest ascent that also walks plateaus.
    ///
    /// Ties are always accepted here regardless of the configured policy.
    /// Stops after `max_sideways` consecutive zero-gain moves or when every
    /// neighbour is worse. Returns the final score.
    pub fn sideways_search(&mut self, max_sideways: usize) -> u64 {
        let mut sideways = 0;
        while sideways < max_sideways {
            let before = self.score;
            let neighbor = self.scan_and_apply(PlateauPolicy::Permissive);
            if neighbor.swap.is_none() {
                break;
            }
            if neighbor.value < before {
                sideways = 0;
            } else {
                sideways += 1;
            }
        }
        self.score
    }

    /// Random-swap hill climbing: `max_iterations` proposals, each kept only
    /// if it strictly lowers the score. Returns the final score.
    pub fn stochastic_search<R: Rng>(&mut self, max_iterations: usize, rng: &mut R) -> u64 {
        for _ in 0..max_iterations {
            let (a, b) = distinct_pair(self.cube.len(), rng);
            let value = self
                .objective
                .score_after_swap(&self.cube, self.score, a, b);
            if value < self.score {
                self.commit(a, b, value);
            }
        }
        self.score
    }

    fn scan_and_apply(&mut self, plateau: PlateauPolicy) -> BestNeighbor {
        let len = self.cube.len();
        let mut best_value = self.score;
        let mut best_pair = None;

        for i in 0..len {
            for j in (i + 1)..len {
                let value = self
                    .objective
                    .score_after_swap(&self.cube, self.score, i, j);
                if plateau.accepts(value, best_value) {
                    best_value = value;
                    best_pair = Some((i, j));
                }
            }
        }

        let swap = best_pair.map(|(i, j)| {
            self.commit(i, j, best_value);
            (self.cube.coord_of(i), self.cube.coord_of(j))
        });
        BestNeighbor {
            value: self.score,
            swap,
        }
    }

    fn commit(&mut self, a: usize, b: usize, value: u64) {
        self.cube.swap_indices(a, b);
        self.score = value;
        self.steps += 1;
        self.history.push(value);
    }
}

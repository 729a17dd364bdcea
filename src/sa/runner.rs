//! SA execution loop.

use super::config::SaConfig;
use super::types::{acceptance_probability, MoveOutcome};
use crate::cube::{Cube, Objective};
use crate::error::ConfigError;
use crate::random::rng_from_seed;
use rand::Rng;

/// Result of a Simulated Annealing run.
#[derive(Debug, Clone)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SaResult {
    /// The best cube seen at any point of the trajectory.
    pub best: Cube,

    /// Score of `best`.
    pub best_score: u64,

    /// Cube the trajectory ended on.
    pub final_cube: Cube,

    /// Score of `final_cube`.
    pub final_score: u64,

    /// Score of the starting cube.
    pub initial_score: u64,

    /// Total number of iterations (proposed swaps).
    pub iterations: usize,

    /// Final temperature when the algorithm stopped.
    pub final_temperature: f64,

    /// Number of accepted moves (including improvements).
    pub accepted_moves: usize,

    /// Number of improving moves.
    pub improving_moves: usize,

    /// Best score sampled every `history_interval` iterations.
    pub score_history: Vec<u64>,

    /// Current (trajectory) score sampled every `history_interval`
    /// iterations. Unlike `score_history` it rises on accepted uphill moves.
    pub current_history: Vec<u64>,

    /// Metropolis probability `min(1, exp(−Δ/T))` of the move proposed at
    /// each sampled iteration, aligned with `current_history`.
    pub acceptance_history: Vec<f64>,
}

impl SaResult {
    /// `true` when `best` is a diagonal magic cube.
    pub fn is_solved(&self) -> bool {
        self.best_score == 0
    }

    /// The best cube and its score.
    pub fn into_best(self) -> (Cube, u64) {
        (self.best, self.best_score)
    }
}

/// A single annealing trajectory over one cube.
///
/// Drive it one [`step`](Self::step) at a time, or let
/// [`perform_search`](Self::perform_search) run the whole schedule.
///
/// ```
/// use u_magicube::cube::{Cube, Objective};
/// use u_magicube::random::create_rng;
/// use u_magicube::sa::{SaConfig, SimulatedAnnealing};
///
/// let objective = Objective::new(3).unwrap();
/// let mut rng = create_rng(7);
/// let cube = Cube::random(3, &mut rng);
/// let config = SaConfig::new(100.0, 0.99, 0.01);
///
/// let sa = SimulatedAnnealing::new(&objective, cube, &config).unwrap();
/// let result = sa.perform_search(&mut rng);
/// assert!(result.best_score <= result.initial_score);
/// ```
#[derive(Debug, Clone)]
pub struct SimulatedAnnealing<'a> {
    objective: &'a Objective,
    config: SaConfig,
    cube: Cube,
    score: u64,
    best: Cube,
    best_score: u64,
    initial_score: u64,
    temperature: f64,
    iterations: usize,
    accepted_moves: usize,
    improving_moves: usize,
    score_history: Vec<u64>,
    current_history: Vec<u64>,
    acceptance_history: Vec<f64>,
}

impl<'a> SimulatedAnnealing<'a> {
    /// Starts a trajectory at `cube` with temperature `T₀`.
    pub fn new(
        objective: &'a Objective,
        cube: Cube,
        config: &SaConfig,
    ) -> Result<Self, ConfigError> {
        config.validate()?;
        if cube.side() != objective.side() {
            return Err(ConfigError::SideMismatch {
                expected: objective.side(),
                found: cube.side(),
            });
        }

        let score = objective.score(&cube);
        Ok(Self {
            objective,
            config: config.clone(),
            best: cube.clone(),
            cube,
            score,
            best_score: score,
            initial_score: score,
            temperature: config.initial_temperature,
            iterations: 0,
            accepted_moves: 0,
            improving_moves: 0,
            score_history: vec![score],
            current_history: Vec::new(),
            acceptance_history: Vec::new(),
        })
    }

    pub fn cube(&self) -> &Cube {
        &self.cube
    }

    pub fn score(&self) -> u64 {
        self.score
    }

    pub fn best(&self) -> &Cube {
        &self.best
    }

    pub fn best_score(&self) -> u64 {
        self.best_score
    }

    pub fn temperature(&self) -> f64 {
        self.temperature
    }

    pub fn iterations(&self) -> usize {
        self.iterations
    }

    /// `true` once the temperature reached the floor or the iteration
    /// budget is spent.
    pub fn is_frozen(&self) -> bool {
        let budget_spent =
            self.config.max_iterations > 0 && self.iterations >= self.config.max_iterations;
        self.temperature <= self.config.min_temperature || budget_spent
    }

    /// Proposes one swap of two uniformly drawn cells, applies the
    /// Metropolis criterion, then cools.
    ///
    /// The two cells may coincide, in which case the move is a no-op that
    /// still counts as an accepted iteration.
    pub fn step<R: Rng>(&mut self, rng: &mut R) -> MoveOutcome {
        let len = self.cube.len();
        let a = rng.random_range(0..len);
        let b = rng.random_range(0..len);

        let next = self
            .objective
            .score_after_swap(&self.cube, self.score, a, b);

        let p = acceptance_probability(next.saturating_sub(self.score), self.temperature);
        let outcome = if next < self.score {
            MoveOutcome::Improved
        } else if rng.random_range(0.0..1.0) < p {
            MoveOutcome::Accepted
        } else {
            MoveOutcome::Rejected
        };

        if outcome.is_accepted() {
            self.cube.swap_indices(a, b);
            self.score = next;
            self.accepted_moves += 1;
        }
        if outcome == MoveOutcome::Improved {
            self.improving_moves += 1;
            if self.score < self.best_score {
                self.best.clone_from(&self.cube);
                self.best_score = self.score;
                tracing::trace!(
                    iteration = self.iterations,
                    score = self.best_score,
                    temperature = self.temperature,
                    "new best"
                );
            }
        }

        self.iterations += 1;
        if self.iterations.is_multiple_of(self.config.history_interval) {
            self.score_history.push(self.best_score);
            self.current_history.push(self.score);
            self.acceptance_history.push(p);
        }

        self.temperature *= self.config.cooling_rate;
        outcome
    }

    /// Anneals until frozen and returns the outcome.
    pub fn perform_search<R: Rng>(mut self, rng: &mut R) -> SaResult {
        while !self.is_frozen() {
            self.step(rng);
        }
        self.into_result()
    }

    /// Ends the trajectory where it currently stands.
    pub fn into_result(mut self) -> SaResult {
        if self.score_history.last() != Some(&self.best_score) {
            self.score_history.push(self.best_score);
        }
        SaResult {
            best: self.best,
            best_score: self.best_score,
            final_cube: self.cube,
            final_score: self.score,
            initial_score: self.initial_score,
            iterations: self.iterations,
            final_temperature: self.temperature,
            accepted_moves: self.accepted_moves,
            improving_moves: self.improving_moves,
            score_history: self.score_history,
            current_history: self.current_history,
            acceptance_history: self.acceptance_history,
        }
    }
}

/// Executes Simulated Annealing from a random starting cube.
///
/// # Usage
///
/// ```
/// use u_magicube::cube::Objective;
/// use u_magicube::sa::{SaConfig, SaRunner};
///
/// let objective = Objective::new(3).unwrap();
/// let config = SaConfig::new(100.0, 0.999, 0.01).with_seed(42);
/// let result = SaRunner::run(&objective, &config).unwrap();
/// assert!(result.best_score <= result.initial_score);
/// ```
pub struct SaRunner;

impl SaRunner {
    /// Runs SA with an RNG seeded from `config.seed`.
    pub fn run(objective: &Objective, config: &SaConfig) -> Result<SaResult, ConfigError> {
        let mut rng = rng_from_seed(config.seed);
        Self::run_with_rng(objective, config, &mut rng)
    }

    /// Runs SA drawing all randomness from `rng`.
    #[tracing::instrument(
        level = "debug",
        name = "Simulated Annealing",
        skip_all,
        fields(
            side = objective.side(),
            t0 = config.initial_temperature,
            cooling_rate = config.cooling_rate
        )
    )]
    pub fn run_with_rng<R: Rng>(
        objective: &Objective,
        config: &SaConfig,
        rng: &mut R,
    ) -> Result<SaResult, ConfigError> {
        config.validate()?;
        let cube = Cube::random(objective.side(), rng);
        let sa = SimulatedAnnealing::new(objective, cube, config)?;
        tracing::debug!(initial_score = sa.score(), "starting annealing");

        let result = sa.perform_search(rng);
        tracing::info!(
            best_score = result.best_score,
            final_score = result.final_score,
            iterations = result.iterations,
            accepted = result.accepted_moves,
            "simulated annealing finished"
        );
        Ok(result)
    }
}

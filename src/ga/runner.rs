//! GA evolutionary loop execution.
//!
//! [`GaRunner`] orchestrates the complete evolutionary process:
//! initialization → evaluation → selection → crossover → mutation/repair → repeat.

use super::config::{Crossover, GaConfig};
use super::operators::{layer_crossover, mutate_and_repair, order_crossover};
use super::selection::RouletteWheel;
use super::types::Individual;
use crate::cube::{Cube, Objective};
use crate::error::ConfigError;
use crate::random::rng_from_seed;
use rand::Rng;

/// Score statistics of one generation's population.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct GenerationStats {
    /// Zero-based generation index.
    pub generation: usize,
    pub best_score: u64,
    pub mean_score: f64,
    pub worst_score: u64,
}

/// Result of a GA optimization run.
#[derive(Debug, Clone)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct GaResult {
    /// The best cube found during the entire run.
    pub best: Cube,

    /// Score of `best`.
    pub best_score: u64,

    /// Number of generations whose population was bred.
    pub generations: usize,

    /// Whether a zero-score cube was found.
    pub solved: bool,

    /// Population statistics, one entry per inspected population.
    pub history: Vec<GenerationStats>,
}

impl GaResult {
    /// `true` when `best` is a diagonal magic cube.
    pub fn is_solved(&self) -> bool {
        self.best_score == 0
    }

    /// The best cube and its score.
    pub fn into_best(self) -> (Cube, u64) {
        (self.best, self.best_score)
    }
}

/// Executes the GA evolutionary loop.
///
/// # Usage
///
/// ```
/// use u_magicube::cube::Objective;
/// use u_magicube::ga::{GaConfig, GaRunner};
///
/// let objective = Objective::new(3).unwrap();
/// let config = GaConfig::default()
///     .with_population_size(20)
///     .with_max_generations(10)
///     .with_seed(42);
/// let result = GaRunner::run(&objective, &config).unwrap();
/// assert!(result.best.is_permutation());
/// ```
pub struct GaRunner;

impl GaRunner {
    /// Runs the GA with an RNG seeded from `config.seed`.
    pub fn run(objective: &Objective, config: &GaConfig) -> Result<GaResult, ConfigError> {
        let mut rng = rng_from_seed(config.seed);
        Self::run_with_rng(objective, config, &mut rng)
    }

    /// Runs the GA drawing all randomness from `rng`.
    pub fn run_with_rng<R: Rng>(
        objective: &Objective,
        config: &GaConfig,
        rng: &mut R,
    ) -> Result<GaResult, ConfigError> {
        config.validate()?;
        let side = objective.side();
        let population = (0..config.population_size)
            .map(|_| Individual::new(Cube::random(side, rng), objective))
            .collect();
        evolve(objective, config, population, rng)
    }

    /// Runs the GA from a caller-supplied initial population.
    ///
    /// The seeded population may have any size of at least 2; every bred
    /// generation has `config.population_size` members.
    pub fn run_from_population<R: Rng>(
        objective: &Objective,
        config: &GaConfig,
        cubes: Vec<Cube>,
        rng: &mut R,
    ) -> Result<GaResult, ConfigError> {
        config.validate()?;
        if cubes.len() < 2 {
            return Err(ConfigError::PopulationTooSmall(cubes.len()));
        }
        if let Some(cube) = cubes.iter().find(|c| c.side() != objective.side()) {
            return Err(ConfigError::SideMismatch {
                expected: objective.side(),
                found: cube.side(),
            });
        }
        let population = cubes
            .into_iter()
            .map(|cube| Individual::new(cube, objective))
            .collect();
        evolve(objective, config, population, rng)
    }
}

/// The evolutionary loop over an already scored initial population.
#[tracing::instrument(
    level = "debug",
    name = "Genetic Algorithm",
    skip_all,
    fields(
        side = objective.side(),
        population = config.population_size,
        generations = config.max_generations
    )
)]
fn evolve<R: Rng>(
    objective: &Objective,
    config: &GaConfig,
    mut population: Vec<Individual>,
    rng: &mut R,
) -> Result<GaResult, ConfigError> {
    let mut best = find_best(&population).clone();
    let mut history = Vec::with_capacity(config.max_generations + 1);

    for gen in 0..config.max_generations {
        history.push(stats(gen, &population));

        let gen_best = find_best(&population);
        if gen_best.score() < best.score() {
            best = gen_best.clone();
            tracing::debug!(generation = gen, score = best.score(), "new best");
        }
        if best.score() == 0 {
            tracing::info!(generation = gen, "magic cube found");
            return Ok(finish(best, gen, true, history));
        }

        population = breed(objective, config, &population, rng);
    }

    // The last bred population has been scored but not yet inspected.
    history.push(stats(config.max_generations, &population));
    let last_best = find_best(&population);
    if last_best.score() < best.score() {
        best = last_best.clone();
    }
    let solved = best.score() == 0;
    tracing::info!(best_score = best.score(), solved, "genetic algorithm finished");
    Ok(finish(best, config.max_generations, solved, history))
}

/// Builds the next population of exactly `population_size` children.
fn breed<R: Rng>(
    objective: &Objective,
    config: &GaConfig,
    population: &[Individual],
    rng: &mut R,
) -> Vec<Individual> {
    let side = objective.side();
    let wheel = RouletteWheel::new(population);
    let mut next_gen = Vec::with_capacity(config.population_size);

    while next_gen.len() < config.population_size {
        // Independent draws; a parent may be paired with itself.
        let p1 = population[wheel.select(rng)].cube().values();
        let p2 = population[wheel.select(rng)].cube().values();

        let (c1, c2) = match config.crossover {
            Crossover::LayerCut => layer_crossover(p1, p2, side, rng),
            Crossover::Ordered => order_crossover(p1, p2, rng),
        };

        for mut genome in [c1, c2] {
            if next_gen.len() >= config.population_size {
                break;
            }
            mutate_and_repair(&mut genome, config.mutation_rate, rng);
            next_gen.push(Individual::new(Cube::from_repaired(side, genome), objective));
        }
    }

    next_gen
}

fn finish(
    best: Individual,
    generations: usize,
    solved: bool,
    history: Vec<GenerationStats>,
) -> GaResult {
    let best_score = best.score();
    GaResult {
        best: best.into_cube(),
        best_score,
        generations,
        solved,
        history,
    }
}

fn stats(generation: usize, population: &[Individual]) -> GenerationStats {
    let scores = population.iter().map(Individual::score);
    let total: u64 = scores.clone().sum();
    GenerationStats {
        generation,
        best_score: scores.clone().min().unwrap_or(0),
        mean_score: total as f64 / population.len().max(1) as f64,
        worst_score: scores.max().unwrap_or(0),
    }
}

/// Find the individual with the best (lowest) score.
fn find_best(population: &[Individual]) -> &Individual {
    population
        .iter()
        .min_by_key(|ind| ind.score())
        .expect("population must not be empty")
}

// ============================================================================
// Tests
// ============================================================================

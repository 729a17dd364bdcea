//! Random-restart hill climbing.

use super::climber::HillClimbing;
use super::config::{HcConfig, HcVariant};
use crate::cube::{Cube, Objective};
use crate::error::ConfigError;
use crate::random::rng_from_seed;
use rand::Rng;

/// Result of a hill climbing run.
#[derive(Debug, Clone)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct HcResult {
    /// Best end state across all restarts.
    pub best: Cube,

    /// Score of `best`.
    pub best_score: u64,

    /// Starting score of the first restart.
    pub initial_score: u64,

    /// Total swaps committed across all restarts.
    pub steps: usize,

    /// Swaps committed by each restart, in order.
    pub restart_steps: Vec<usize>,

    /// Per-restart score trajectories, concatenated. Restart `k` contributes
    /// `restart_steps[k] + 1` entries: its starting score, then one per swap.
    pub score_history: Vec<u64>,
}

impl HcResult {
    /// `true` when `best` is a diagonal magic cube.
    pub fn is_solved(&self) -> bool {
        self.best_score == 0
    }

    /// Number of restarts actually run.
    pub fn restarts(&self) -> usize {
        self.restart_steps.len()
    }

    /// The best cube and its score.
    pub fn into_best(self) -> (Cube, u64) {
        (self.best, self.best_score)
    }
}

/// Runs hill climbing from one or more random starting cubes.
///
/// # Usage
///
/// ```
/// use u_magicube::cube::Objective;
/// use u_magicube::hc::{HcConfig, HcRunner};
///
/// let objective = Objective::new(3).unwrap();
/// let config = HcConfig::default().with_restarts(3).with_seed(42);
/// let result = HcRunner::run(&objective, &config).unwrap();
/// assert!(result.best_score <= result.initial_score);
/// assert_eq!(result.restarts(), 3);
/// ```
pub struct HcRunner;

impl HcRunner {
    /// Runs hill climbing with an RNG seeded from `config.seed`.
    pub fn run(objective: &Objective, config: &HcConfig) -> Result<HcResult, ConfigError> {
        let mut rng = rng_from_seed(config.seed);
        Self::run_with_rng(objective, config, &mut rng)
    }

    /// Runs hill climbing drawing all randomness from `rng`.
    ///
    /// Restarts stop early once a zero-score cube is found.
    #[tracing::instrument(
        level = "debug",
        name = "Hill Climbing",
        skip_all,
        fields(side = objective.side(), restarts = config.restarts)
    )]
    pub fn run_with_rng<R: Rng>(
        objective: &Objective,
        config: &HcConfig,
        rng: &mut R,
    ) -> Result<HcResult, ConfigError> {
        let side = objective.side();
        climb_restarts(objective, config, rng, |rng| Cube::random(side, rng))
    }
}

/// Restart loop drawing each starting cube from `next_start`.
fn climb_restarts<R, F>(
    objective: &Objective,
    config: &HcConfig,
    rng: &mut R,
    mut next_start: F,
) -> Result<HcResult, ConfigError>
where
    R: Rng,
    F: FnMut(&mut R) -> Cube,
{
    config.validate()?;

    let mut best: Option<(Cube, u64)> = None;
    let mut initial_score = 0;
    let mut restart_steps = Vec::with_capacity(config.restarts);
    let mut score_history = Vec::new();

    for restart in 0..config.restarts {
        let cube = next_start(rng);
        let mut climber = HillClimbing::new(objective, cube, config.plateau)?;
        if restart == 0 {
            initial_score = climber.score();
        }

        let score = match config.variant {
            HcVariant::SteepestAscent => climber.perform_search(),
            HcVariant::Sideways { max_sideways } => climber.sideways_search(max_sideways),
            HcVariant::Stochastic { max_iterations } => {
                climber.stochastic_search(max_iterations, rng)
            }
        };

        restart_steps.push(climber.steps());
        score_history.extend_from_slice(climber.history());
        tracing::debug!(restart, score, steps = climber.steps(), "restart finished");

        if best.as_ref().is_none_or(|&(_, s)| score < s) {
            best = Some((climber.into_cube(), score));
        }
        if score == 0 {
            tracing::info!(restart, "magic cube found");
            break;
        }
    }

    let (best, best_score) = best.ok_or(ConfigError::ZeroRestarts)?;
    tracing::info!(best_score, "hill climbing finished");
    Ok(HcResult {
        best,
        best_score,
        initial_score,
        steps: restart_steps.iter().sum(),
        restart_steps,
        score_history,
    })
}

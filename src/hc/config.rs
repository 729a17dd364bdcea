//! Hill climbing configuration.

use super::types::PlateauPolicy;
use crate::error::ConfigError;

/// Which hill-climbing loop a restart runs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum HcVariant {
    /// Apply the best neighbour until a step no longer strictly improves.
    #[default]
    SteepestAscent,

    /// Steepest ascent that keeps walking across plateaus.
    ///
    /// Stops after `max_sideways` consecutive zero-gain moves, or when no
    /// neighbour is at least as good as the current cube.
    Sideways { max_sideways: usize },

    /// `max_iterations` random swaps of two distinct cells, each kept only
    /// when it strictly lowers the score.
    Stochastic { max_iterations: usize },
}

/// Configuration for (random-restart) hill climbing.
///
/// # Examples
///
/// ```
/// use u_magicube::hc::{HcConfig, HcVariant, PlateauPolicy};
///
/// let config = HcConfig::default()
///     .with_variant(HcVariant::Sideways { max_sideways: 50 })
///     .with_plateau(PlateauPolicy::Strict)
///     .with_restarts(5)
///     .with_seed(42);
/// assert_eq!(config.restarts, 5);
/// assert!(config.validate().is_ok());
/// ```
#[derive(Debug, Clone)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct HcConfig {
    /// Tie handling inside the steepest-ascent neighbour scan.
    pub plateau: PlateauPolicy,
    /// Search loop run from each starting cube.
    pub variant: HcVariant,
    /// Independent climbs from fresh random cubes (at least 1).
    pub restarts: usize,
    /// Random seed (None for random).
    pub seed: Option<u64>,
}

impl Default for HcConfig {
    fn default() -> Self {
        Self {
            plateau: PlateauPolicy::Permissive,
            variant: HcVariant::SteepestAscent,
            restarts: 1,
            seed: None,
        }
    }
}

impl HcConfig {
    pub fn with_plateau(mut self, plateau: PlateauPolicy) -> Self {
        self.plateau = plateau;
        self
    }

    pub fn with_variant(mut self, variant: HcVariant) -> Self {
        self.variant = variant;
        self
    }

    /// Sets the number of random restarts.
    pub fn with_restarts(mut self, restarts: usize) -> Self {
        self.restarts = restarts;
        self
    }

    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Validates the configuration.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.restarts == 0 {
            return Err(ConfigError::ZeroRestarts);
        }
        match self.variant {
            HcVariant::Sideways { max_sideways: 0 } => {
                Err(ConfigError::ZeroIterations("max_sideways"))
            }
            HcVariant::Stochastic { max_iterations: 0 } => {
                Err(ConfigError::ZeroIterations("max_iterations"))
            }
            _ => Ok(()),
        }
    }
}

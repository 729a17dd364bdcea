//! SA configuration.

use crate::error::ConfigError;

/// Configuration for Simulated Annealing.
///
/// Cooling is geometric: after every iteration `T ← T · cooling_rate`. The
/// run stops once `T` is no longer above `min_temperature`. The floor is
/// always an explicit value; [`SaConfig::new`] requires it and
/// [`Default`] documents the single value used when building from defaults.
///
/// # Examples
///
/// ```
/// use u_magicube::sa::SaConfig;
///
/// let config = SaConfig::new(1000.0, 0.9999, 0.001)
///     .with_max_iterations(50_000)
///     .with_seed(42);
/// assert!(config.validate().is_ok());
/// ```
#[derive(Debug, Clone)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SaConfig {
    /// Initial temperature `T₀`. Higher values allow more exploration.
    pub initial_temperature: f64,

    /// Geometric cooling factor `r` in (0, 1). Higher = slower cooling.
    pub cooling_rate: f64,

    /// Temperature floor. The algorithm stops when `T` drops to or below it.
    pub min_temperature: f64,

    /// Maximum total iterations (hard budget). 0 = no limit.
    pub max_iterations: usize,

    /// Record the best score every this many iterations.
    pub history_interval: usize,

    /// Random seed for reproducibility.
    pub seed: Option<u64>,
}

impl Default for SaConfig {
    /// `T₀ = 1000`, `r = 0.9999`, floor `0.001`, no iteration cap.
    fn default() -> Self {
        Self::new(1000.0, 0.9999, 1e-3)
    }
}

impl SaConfig {
    /// Creates a config with the three schedule parameters spelled out.
    pub fn new(initial_temperature: f64, cooling_rate: f64, min_temperature: f64) -> Self {
        Self {
            initial_temperature,
            cooling_rate,
            min_temperature,
            max_iterations: 0,
            history_interval: 1000,
            seed: None,
        }
    }

    pub fn with_initial_temperature(mut self, t: f64) -> Self {
        self.initial_temperature = t;
        self
    }

    pub fn with_cooling_rate(mut self, rate: f64) -> Self {
        self.cooling_rate = rate;
        self
    }

    pub fn with_min_temperature(mut self, t: f64) -> Self {
        self.min_temperature = t;
        self
    }

    pub fn with_max_iterations(mut self, n: usize) -> Self {
        self.max_iterations = n;
        self
    }

    pub fn with_history_interval(mut self, n: usize) -> Self {
        self.history_interval = n;
        self
    }

    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Number of iterations the schedule runs before reaching the floor,
    /// ignoring `max_iterations`.
    pub fn scheduled_iterations(&self) -> usize {
        let ratio = (self.min_temperature / self.initial_temperature).ln();
        (ratio / self.cooling_rate.ln()).ceil().max(0.0) as usize
    }

    /// Validates the configuration.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !(self.initial_temperature > 0.0 && self.initial_temperature.is_finite()) {
            return Err(ConfigError::InvalidInitialTemperature(
                self.initial_temperature,
            ));
        }
        if !(self.cooling_rate > 0.0 && self.cooling_rate < 1.0) {
            return Err(ConfigError::InvalidCoolingRate(self.cooling_rate));
        }
        if !(self.min_temperature > 0.0 && self.min_temperature < self.initial_temperature) {
            return Err(ConfigError::InvalidMinTemperature {
                min: self.min_temperature,
                initial: self.initial_temperature,
            });
        }
        if self.history_interval == 0 {
            return Err(ConfigError::ZeroHistoryInterval);
        }
        Ok(())
    }
}

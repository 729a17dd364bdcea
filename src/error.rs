//! Error types.
//!
//! Failing to reach a zero score is not an error: every runner returns its
//! best-effort result and callers check `is_solved()`. The types here only
//! cover invalid parameters and malformed cube data.

use std::fmt;

/// Invalid construction parameters for the objective or a search strategy.
///
/// Returned by every `validate()` and by runner entry points before any
/// search work is done.
#[derive(Debug, Clone, PartialEq)]
pub enum ConfigError {
    /// Cube side length below 2.
    SideTooSmall(usize),
    /// A cube was handed to a strategy built for another side length.
    SideMismatch { expected: usize, found: usize },
    /// GA population below 2.
    PopulationTooSmall(usize),
    /// GA generation budget of zero.
    ZeroGenerations,
    /// Mutation rate outside `[0, 1]`.
    InvalidMutationRate(f64),
    /// Initial temperature not strictly positive.
    InvalidInitialTemperature(f64),
    /// Cooling rate outside the open interval `(0, 1)`.
    InvalidCoolingRate(f64),
    /// Temperature floor not positive, or not below the initial temperature.
    InvalidMinTemperature { min: f64, initial: f64 },
    /// Random-restart hill climbing with zero restarts.
    ZeroRestarts,
    /// An iteration budget that must be positive was zero.
    ZeroIterations(&'static str),
    /// History sampling interval of zero.
    ZeroHistoryInterval,
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::SideTooSmall(n) => {
                write!(f, "cube side must be at least 2, got {n}")
            }
            ConfigError::SideMismatch { expected, found } => {
                write!(f, "cube side mismatch: expected {expected}, found {found}")
            }
            ConfigError::PopulationTooSmall(p) => {
                write!(f, "population_size must be at least 2, got {p}")
            }
            ConfigError::ZeroGenerations => write!(f, "max_generations must be at least 1"),
            ConfigError::InvalidMutationRate(rate) => {
                write!(f, "mutation_rate must be in [0, 1], got {rate}")
            }
            ConfigError::InvalidInitialTemperature(t) => {
                write!(f, "initial_temperature must be positive, got {t}")
            }
            ConfigError::InvalidCoolingRate(r) => {
                write!(f, "cooling_rate must be in (0, 1), got {r}")
            }
            ConfigError::InvalidMinTemperature { min, initial } => write!(
                f,
                "min_temperature must be positive and below initial_temperature \
                 ({initial}), got {min}"
            ),
            ConfigError::ZeroRestarts => write!(f, "restarts must be at least 1"),
            ConfigError::ZeroIterations(what) => write!(f, "{what} must be at least 1"),
            ConfigError::ZeroHistoryInterval => write!(f, "history_interval must be at least 1"),
        }
    }
}

impl std::error::Error for ConfigError {}

/// Cube data that does not describe a valid arrangement of `1..=n³`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CubeError {
    /// Side length below 2.
    SideTooSmall(usize),
    /// Flat value count does not equal `n³`.
    WrongLength { expected: usize, found: usize },
    /// Nested layers/rows are not all of length `n`.
    Ragged,
    /// Values are not a permutation of `1..=n³`; `value` is the first
    /// offending entry (out of range or repeated).
    NotPermutation { value: u32 },
}

impl fmt::Display for CubeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CubeError::SideTooSmall(n) => write!(f, "cube side must be at least 2, got {n}"),
            CubeError::WrongLength { expected, found } => {
                write!(f, "expected {expected} cube values, found {found}")
            }
            CubeError::Ragged => write!(f, "cube layers and rows must all have the same length"),
            CubeError::NotPermutation { value } => {
                write!(f, "cube values are not a permutation: offending value {value}")
            }
        }
    }
}

impl std::error::Error for CubeError {}

//! Genetic Algorithm.
//!
//! Population-based search over magic cube arrangements. Each generation
//! draws parent pairs by roulette wheel on fitness `1/(1+score)`, recombines
//! them, and mutates and repairs every child so the population always holds
//! valid permutations of `1..=n³`.
//!
//! # Key Types
//!
//! - [`GaConfig`]: Algorithm parameters (population size, generations, mutation rate)
//! - [`GaRunner`]: Executes the evolutionary loop
//! - [`GaResult`]: Best cube found with per-generation statistics
//!
//! # Submodules
//!
//! - [`operators`]: Layer and order crossover, swap mutation, repair
//!
//! # References
//!
//! - Holland (1975), *Adaptation in Natural and Artificial Systems*
//! - Goldberg (1989), *Genetic Algorithms in Search, Optimization, and Machine Learning*

mod config;
pub mod operators;
mod runner;
mod selection;
mod types;

pub use config::{Crossover, GaConfig};
pub use runner::{GaResult, GaRunner, GenerationStats};
pub use selection::RouletteWheel;
pub use types::Individual;

//! Simulated Annealing (SA).
//!
//! A single-solution trajectory over cube arrangements. Each iteration
//! proposes swapping two random cells and accepts worsening moves with the
//! Metropolis probability `exp(−Δ/T)`. The temperature cools geometrically
//! until it reaches an explicit floor, letting the search escape the local
//! optima that stall hill climbing.
//!
//! # Key Types
//!
//! - [`SaConfig`]: Temperature schedule and budget
//! - [`SimulatedAnnealing`]: Steppable annealing state over one cube
//! - [`SaRunner`]: Runs a full schedule from a random cube
//!
//! # References
//!
//! - Kirkpatrick, Gelatt & Vecchi (1983), "Optimization by Simulated Annealing"
//! - Metropolis et al. (1953), "Equation of State Calculations by Fast Computing Machines"

mod config;
mod runner;
mod types;

pub use config::SaConfig;
pub use runner::{SaResult, SaRunner, SimulatedAnnealing};
pub use types::{acceptance_probability, MoveOutcome};

//! Diagonal magic cube search.
//!
//! Searches for arrangements of `1..=n³` in an `n×n×n` cube whose rows,
//! columns, pillars, planar diagonals and space diagonals all sum to the
//! magic number `n·(n³+1)/2`. Three local-search strategies share one
//! objective function:
//!
//! - **Hill Climbing (HC)**: Steepest-ascent swap search with a configurable
//!   plateau policy, plus sideways, stochastic and random-restart variants.
//! - **Simulated Annealing (SA)**: Random swaps under the Metropolis
//!   criterion with geometric cooling to an explicit temperature floor.
//! - **Genetic Algorithm (GA)**: Roulette-wheel selection, layer or order
//!   crossover, swap mutation and permutation repair.
//!
//! # Architecture
//!
//! [`cube::Objective`] precomputes the line set for a side length and
//! scores cubes in full or incrementally after a swap. Every strategy
//! borrows it, owns its own cubes and draws randomness from a seeded
//! [`rand::rngs::StdRng`]. Runs never fail to complete: an unsolved cube is
//! reported through `is_solved()`, while invalid parameters surface as
//! [`error::ConfigError`] before any search starts.
//!
//! # Example
//!
//! ```
//! use u_magicube::cube::Objective;
//! use u_magicube::sa::{SaConfig, SaRunner};
//!
//! let objective = Objective::new(3).unwrap();
//! let config = SaConfig::new(100.0, 0.999, 0.01).with_seed(42);
//! let result = SaRunner::run(&objective, &config).unwrap();
//! println!("best score {} after {} iterations", result.best_score, result.iterations);
//! ```

pub mod cube;
pub mod error;
pub mod ga;
pub mod hc;
pub mod random;
pub mod sa;

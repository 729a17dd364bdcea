//! Hill Climbing (HC).
//!
//! Local search over the swap neighbourhood of a cube. The steepest-ascent
//! step scans every unordered pair of cells, scores each swap incrementally
//! and applies the best one. Ties are governed by a [`PlateauPolicy`]:
//! the permissive policy records a pair whenever it is at least as good as
//! the best so far, so a step may commit a zero-gain swap before the search
//! stops on lack of strict improvement.
//!
//! # Key Types
//!
//! - [`HillClimbing`]: Climber state with steepest, sideways and stochastic loops
//! - [`HcConfig`]: Variant, plateau policy and number of random restarts
//! - [`HcRunner`]: Random-restart driver returning [`HcResult`]
//!
//! # References
//!
//! - Russell & Norvig (2010), *Artificial Intelligence: A Modern Approach*, §4.1

mod climber;
mod config;
mod runner;
mod types;

pub use climber::HillClimbing;
pub use config::{HcConfig, HcVariant};
pub use runner::{HcResult, HcRunner};
pub use types::{BestNeighbor, PlateauPolicy};

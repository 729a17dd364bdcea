//! Population member type.

use crate::cube::{fitness, Cube, Objective};

/// A cube together with its cached score.
///
/// The score is computed once when the individual is created; cubes in the
/// population are never mutated afterwards, only replaced.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Individual {
    cube: Cube,
    score: u64,
}

impl Individual {
    /// Scores `cube` and wraps it.
    pub fn new(cube: Cube, objective: &Objective) -> Self {
        let score = objective.score(&cube);
        Self { cube, score }
    }

    pub fn cube(&self) -> &Cube {
        &self.cube
    }

    /// Total deviation (lower is better).
    pub fn score(&self) -> u64 {
        self.score
    }

    /// Selection weight `1/(1+score)`.
    pub fn fitness(&self) -> f64 {
        fitness(self.score)
    }

    pub fn into_cube(self) -> Cube {
        self.cube
    }
}

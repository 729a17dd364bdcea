//! The magic cube and its objective function.
//!
//! A [`Cube`] of side `n` holds a permutation of `1..=n³`. The
//! [`Objective`] scores a cube by its total deviation from the magic number
//! `M(n) = n·(n³+1)/2` over every row, column, pillar, planar diagonal and
//! space diagonal. A score of zero means the cube is a diagonal magic cube.
//!
//! # Key Types
//!
//! - [`Cube`]: flat `n×n×n` grid with swap and read access
//! - [`Coord`]: a `(z, y, x)` cell coordinate
//! - [`Objective`]: precomputed line set, scoring and incremental swap scoring
//! - [`ScoreBreakdown`]: deviation split by [`LineKind`]

#[cfg(test)]
pub(crate) mod fixtures;
mod objective;
mod types;

pub use objective::{fitness, magic_number, LineKind, Objective, ScoreBreakdown};
pub use types::{Coord, Cube};

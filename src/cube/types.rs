//! Cube storage and coordinates.

use crate::error::CubeError;
use rand::Rng;
use std::fmt;

/// A cell coordinate: layer `z`, row `y`, column `x`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Coord {
    pub z: usize,
    pub y: usize,
    pub x: usize,
}

impl Coord {
    pub fn new(z: usize, y: usize, x: usize) -> Self {
        Self { z, y, x }
    }
}

/// An `n×n×n` cube holding a permutation of `1..=n³`.
///
/// Values are stored flat in layer-major order: cell `(z, y, x)` lives at
/// index `(z·n + y)·n + x`. Every public constructor guarantees the
/// permutation invariant and [`swap`](Cube::swap) preserves it.
///
/// `Clone` is a deep copy, so a cloned "best" cube is independent of the
/// working cube it was taken from.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Cube {
    side: usize,
    values: Vec<u32>,
}

impl Cube {
    /// Creates a cube filled with a uniform random permutation of `1..=n³`.
    ///
    /// # Panics
    /// Panics if `side < 2`.
    pub fn random<R: Rng>(side: usize, rng: &mut R) -> Self {
        assert!(side >= 2, "cube side must be at least 2");
        let mut values: Vec<u32> = (1..=cell_count(side) as u32).collect();
        crate::random::shuffle(&mut values, rng);
        Self { side, values }
    }

    /// Builds a cube from flat layer-major values.
    pub fn from_values(side: usize, values: Vec<u32>) -> Result<Self, CubeError> {
        if side < 2 {
            return Err(CubeError::SideTooSmall(side));
        }
        let expected = cell_count(side);
        if values.len() != expected {
            return Err(CubeError::WrongLength {
                expected,
                found: values.len(),
            });
        }
        if let Some(value) = first_violation(&values) {
            return Err(CubeError::NotPermutation { value });
        }
        Ok(Self { side, values })
    }

    /// Builds a cube from nested `[z][y][x]` layers.
    pub fn from_layers(layers: &[Vec<Vec<u32>>]) -> Result<Self, CubeError> {
        let side = layers.len();
        let ragged = layers
            .iter()
            .any(|layer| layer.len() != side || layer.iter().any(|row| row.len() != side));
        if ragged {
            return Err(CubeError::Ragged);
        }
        let values = layers.iter().flatten().flatten().copied().collect();
        Self::from_values(side, values)
    }

    /// Wraps values already known to be a permutation (GA repair output).
    pub(crate) fn from_repaired(side: usize, values: Vec<u32>) -> Self {
        debug_assert_eq!(values.len(), cell_count(side));
        debug_assert!(first_violation(&values).is_none(), "repair left duplicates");
        Self { side, values }
    }

    /// Side length `n`.
    pub fn side(&self) -> usize {
        self.side
    }

    /// Number of cells, `n³`.
    pub fn len(&self) -> usize {
        self.values.len()
    }

    /// Always `false`; a cube has at least 8 cells.
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Flat layer-major values.
    pub fn values(&self) -> &[u32] {
        &self.values
    }

    /// Consumes the cube, returning its flat values.
    pub fn into_values(self) -> Vec<u32> {
        self.values
    }

    /// Flat index of `coord`.
    ///
    /// # Panics
    /// Panics if any component is out of range.
    pub fn index_of(&self, coord: Coord) -> usize {
        let n = self.side;
        assert!(
            coord.z < n && coord.y < n && coord.x < n,
            "coordinate {coord:?} out of range for side {n}"
        );
        (coord.z * n + coord.y) * n + coord.x
    }

    /// Coordinate of flat index `index`.
    pub fn coord_of(&self, index: usize) -> Coord {
        let n = self.side;
        Coord {
            z: index / (n * n),
            y: (index / n) % n,
            x: index % n,
        }
    }

    /// Value at `coord`.
    pub fn get(&self, coord: Coord) -> u32 {
        self.values[self.index_of(coord)]
    }

    /// Value at flat `index`.
    pub fn get_index(&self, index: usize) -> u32 {
        self.values[index]
    }

    /// The `n²` values of layer `z`, row-major.
    pub fn layer(&self, z: usize) -> &[u32] {
        let area = self.side * self.side;
        &self.values[z * area..(z + 1) * area]
    }

    /// Swaps the values at two coordinates. Swapping a cell with itself is a
    /// no-op, and applying the same swap twice restores the cube.
    pub fn swap(&mut self, a: Coord, b: Coord) {
        let (i, j) = (self.index_of(a), self.index_of(b));
        self.values.swap(i, j);
    }

    /// Swaps the values at two flat indices.
    pub fn swap_indices(&mut self, i: usize, j: usize) {
        self.values.swap(i, j);
    }

    /// Whether the values are exactly a permutation of `1..=n³`.
    ///
    /// Always true for cubes built through the public API.
    pub fn is_permutation(&self) -> bool {
        first_violation(&self.values).is_none()
    }
}

impl fmt::Display for Cube {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let n = self.side;
        let width = cell_count(n).to_string().len();
        for z in 0..n {
            writeln!(f, "layer {z}:")?;
            for row in self.layer(z).chunks(n) {
                let cells: Vec<String> = row.iter().map(|v| format!("{v:>width$}")).collect();
                writeln!(f, "  {}", cells.join(" "))?;
            }
        }
        Ok(())
    }
}

/// `n³`.
pub(crate) fn cell_count(side: usize) -> usize {
    side * side * side
}

/// First value that is out of range or repeated, scanning in index order.
fn first_violation(values: &[u32]) -> Option<u32> {
    let len = values.len();
    let mut seen = vec![false; len + 1];
    for &v in values {
        let slot = v as usize;
        if slot == 0 || slot > len || seen[slot] {
            return Some(v);
        }
        seen[slot] = true;
    }
    None
}

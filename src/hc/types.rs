//! Hill climbing value types.

use crate::cube::Coord;

/// How the neighbour scan treats a swap that ties the best value so far.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum PlateauPolicy {
    /// Record a neighbour when `value ≤ best`; the last tied pair wins.
    ///
    /// A step can therefore commit a zero-gain swap, after which the outer
    /// loop stops because the score did not strictly drop.
    #[default]
    Permissive,

    /// Record a neighbour only when `value < best`. A committed step always
    /// strictly improves the score.
    Strict,
}

impl PlateauPolicy {
    /// Whether `candidate` replaces the recorded best `incumbent`.
    #[inline]
    pub fn accepts(self, candidate: u64, incumbent: u64) -> bool {
        match self {
            PlateauPolicy::Permissive => candidate <= incumbent,
            PlateauPolicy::Strict => candidate < incumbent,
        }
    }
}

/// Outcome of one neighbour scan.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct BestNeighbor {
    /// Score after the step. Equals the previous score when nothing was applied.
    pub value: u64,
    /// The swap that was applied, if any neighbour was recorded.
    pub swap: Option<(Coord, Coord)>,
}

//! SA move outcomes and the Metropolis criterion.

/// What a single annealing step did with its proposed swap.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum MoveOutcome {
    /// The swap lowered the score.
    Improved,
    /// The swap did not lower the score but passed the Metropolis test.
    Accepted,
    /// The swap was undone.
    Rejected,
}

impl MoveOutcome {
    /// `true` unless the swap was undone.
    pub fn is_accepted(self) -> bool {
        !matches!(self, MoveOutcome::Rejected)
    }
}

/// Metropolis acceptance probability `exp(−Δ/T)` for a non-improving move.
///
/// Returns 1 for `Δ ≤ 0` and 0 once the temperature is no longer positive.
pub fn acceptance_probability(delta: u64, temperature: f64) -> f64 {
    if delta == 0 {
        1.0
    } else if temperature > 0.0 {
        (-(delta as f64) / temperature).exp()
    } else {
        0.0
    }
}

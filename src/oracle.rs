//! The pair-interaction oracle and the scalar-energy adapter wrapped
//! around it.
//!
//! A single shared `overlap` flag that callers read and clear
//! immediately after each pair evaluation is an easy way to leak a stale
//! signal into the next call. Returning `PairEnergy { energy, overlap }`
//! from [`pair_energy`] instead gives every call site its own answer
//! with no shared mutable state to get out of sync.

use crate::config::constants::OVERLAP_SENTINEL_ENERGY;
use crate::core::particle::Particle;
use crate::math::{Real, Vector};

/// Outcome of evaluating the interaction between two particles.
pub enum PairOutcome {
    /// A bond formed; carries the oracle's output vector `O`, which the
    /// adapter dots against the per-system vector `e`.
    Bond(Vector),
    Overlap,
    None,
}

/// External collaborator: the pair interaction function, treated as an
/// oracle. Implementations must be side-effect-free.
pub trait PairOracle {
    fn interact(&self, p: &Particle, q: &Particle) -> PairOutcome;
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct PairEnergy {
    pub energy: Real,
    pub overlap: bool,
}

/// Maps an oracle outcome to a scalar energy contribution plus the
/// overlap signal.
pub fn pair_energy(
    oracle: &dyn PairOracle,
    p: &Particle,
    q: &Particle,
    e: Vector,
) -> PairEnergy {
    match oracle.interact(p, q) {
        PairOutcome::Bond(o) => PairEnergy {
            energy: e.dot(o),
            overlap: false,
        },
        PairOutcome::Overlap => PairEnergy {
            energy: OVERLAP_SENTINEL_ENERGY,
            overlap: true,
        },
        PairOutcome::None => PairEnergy {
            energy: 0.0,
            overlap: false,
        },
    }
}

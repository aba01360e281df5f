//! Rigid patchy particles.
//!
//! A particle carries a center position and a fixed number of patch
//! sites that translate and rotate rigidly with it. `r_old`/`patches_old`
//! hold a one-deep undo log, normally managed through [`DofSnapshot`]
//! rather than touched directly.

use crate::math::{Vector, zero_vector};

#[derive(Clone, Debug)]
pub struct Particle {
    /// Stable identifier in `[0, n_max)`, unchanged for the particle's lifetime.
    pub index: usize,
    pub r: Vector,
    pub patches: Vec<Vector>,
    r_old: Vector,
    patches_old: Vec<Vector>,
    /// Owning cell, assigned by `Cells::fill`/`Cells::change_cell`.
    pub cell: Option<usize>,
    pub cell_old: Option<usize>,
}

impl Particle {
    pub fn new(index: usize, r: Vector, patches: Vec<Vector>) -> Self {
        let patches_old = patches.clone();
        Self {
            index,
            r,
            patches,
            r_old: r,
            patches_old,
            cell: None,
            cell_old: None,
        }
    }

    pub fn zeroed(index: usize, n_patches: usize) -> Self {
        Self::new(index, zero_vector(), vec![zero_vector(); n_patches])
    }

    /// Begin a save/restore scope over this particle's degrees of freedom.
    pub fn store(&mut self) -> DofSnapshot<'_> {
        DofSnapshot::store(self)
    }

    /// Read-only view of the position captured by the last `store()`.
    /// Valid only between a store and its restore, same as `r_old` itself.
    pub fn r_old(&self) -> Vector {
        self.r_old
    }

    /// Equivalent to `store()` without holding a guard. Used where the
    /// store/move/restore sequence must interleave a call that needs its
    /// own `&mut` over the full particle arena (link enumeration), which
    /// a live `DofSnapshot` — tied to this one particle's borrow — would
    /// block.
    pub(crate) fn snapshot_in_place(&mut self) {
        self.r_old = self.r;
        self.patches_old.clear();
        self.patches_old.extend_from_slice(&self.patches);
    }

    pub(crate) fn restore_in_place(&mut self) {
        self.r = self.r_old;
        self.patches.clone_from(&self.patches_old);
    }
}

/// Scoped undo guard over one particle's position and patch sites.
///
/// Snapshots do not nest: a second `store()` while a guard from the first
/// is still alive would require two live mutable borrows of the same
/// particle, which the borrow checker rejects outright — the discipline
/// the original one-deep undo log relied on by convention is enforced
/// here by the type system.
pub struct DofSnapshot<'p> {
    particle: &'p mut Particle,
}

impl<'p> DofSnapshot<'p> {
    fn store(particle: &'p mut Particle) -> Self {
        particle.snapshot_in_place();
        Self { particle }
    }

    pub fn particle(&self) -> &Particle {
        self.particle
    }

    pub fn particle_mut(&mut self) -> &mut Particle {
        self.particle
    }

    /// Revert the particle to the state captured at `store()`.
    pub fn restore(self) {
        // `self.particle` comes back through the destructuring below, so
        // there is no double-borrow: the guard is consumed here.
        let DofSnapshot { particle } = self;
        particle.restore_in_place();
    }

    /// Keep whatever state the particle is in now; just drops the guard.
    pub fn commit(self) {}
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn restore_undoes_translation() {
        let mut p = Particle::new(
            0,
            Vector::new(1.0, 2.0, 3.0),
            vec![Vector::new(1.5, 2.0, 3.0)],
        );
        let before_r = p.r;
        let before_patches = p.patches.clone();

        let mut snap = p.store();
        snap.particle_mut().r += Vector::new(10.0, 10.0, 10.0);
        snap.particle_mut().patches[0] += Vector::new(10.0, 10.0, 10.0);
        snap.restore();

        assert_eq!(p.r, before_r);
        assert_eq!(p.patches, before_patches);
    }

    #[test]
    fn commit_keeps_the_move() {
        let mut p = Particle::new(0, Vector::ZERO, vec![]);
        let mut snap = p.store();
        snap.particle_mut().r = Vector::new(5.0, 0.0, 0.0);
        snap.commit();
        assert_eq!(p.r, Vector::new(5.0, 0.0, 0.0));
    }

    proptest! {
        /// `store(p); move(p); restore(p)` must yield positions and patches
        /// bitwise identical to before, for any starting state and any
        /// perturbation applied between store and restore.
        #[test]
        fn store_move_restore_round_trips(
            rx in -100.0f32..100.0, ry in -100.0f32..100.0, rz in -100.0f32..100.0,
            px in -100.0f32..100.0, py in -100.0f32..100.0, pz in -100.0f32..100.0,
            dx in -50.0f32..50.0, dy in -50.0f32..50.0, dz in -50.0f32..50.0,
        ) {
            let r = Vector::new(rx, ry, rz);
            let patch = Vector::new(px, py, pz);
            let delta = Vector::new(dx, dy, dz);

            let mut p = Particle::new(0, r, vec![patch]);
            let before_r = p.r;
            let before_patches = p.patches.clone();

            let mut snap = p.store();
            snap.particle_mut().r += delta;
            snap.particle_mut().patches[0] += delta;
            snap.restore();

            prop_assert_eq!(p.r, before_r);
            prop_assert_eq!(p.patches, before_patches);
        }
    }
}

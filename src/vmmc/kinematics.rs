//! The proposed rigid motion for a VMMC move, and how it is applied to
//! one particle at a time.

use crate::config::SimConfig;
use crate::core::Particle;
use crate::geometry::biased_angle;
use crate::math::{Vector, mid, rotation_matrix};
use crate::rng::RandomSource;

#[derive(Clone, Copy, Debug)]
pub enum Move {
    Translation(Vector),
    /// Carries the rotation matrix already built from the sampled axis
    /// and angle; every cluster member rotates about the seed using the
    /// same matrix.
    Rotation(crate::math::Matrix),
}

/// Step 1: draw a seed-centered translation or rotation with equal
/// probability.
pub fn propose_move(config: &SimConfig, rng: &mut impl RandomSource) -> Move {
    if rng.uniform01() < 0.5 {
        let half = config.disp_max / 2.0;
        let delta = Vector::new(
            (rng.uniform01() - 0.5) * config.disp_max,
            (rng.uniform01() - 0.5) * config.disp_max,
            (rng.uniform01() - 0.5) * config.disp_max,
        );
        debug_assert!(delta.x.abs() <= half + 1e-5);
        Move::Translation(delta)
    } else {
        let axis = rng.uniform_on_sphere();
        let angle = biased_angle(config.theta_max, rng);
        Move::Rotation(rotation_matrix(axis, angle))
    }
}

/// Applies `mv` to `particle`'s position and patches, rotating about
/// `seed_r` when `mv` is a rotation. The patch offset is recomputed via
/// minimum image before rotating, so a patch that wrapped around the box
/// relative to its own center still rotates rigidly.
pub fn apply_move(mv: Move, seed_r: Vector, particle: &mut Particle, box_size: Vector) {
    match mv {
        Move::Translation(delta) => {
            particle.r += delta;
            for patch in particle.patches.iter_mut() {
                *patch += delta;
            }
        }
        Move::Rotation(rotation) => {
            let dr = rotation * (particle.r - seed_r);
            for patch in particle.patches.iter_mut() {
                let dp = rotation * mid(particle.r, *patch, box_size);
                *patch = seed_r + dr + dp;
            }
            particle.r = seed_r + dr;
        }
    }
}

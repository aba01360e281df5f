//! Rotation-move geometry: the biased small-angle sampler used by the
//! VMMC rotation proposal.
//!
//! Minimum-image differences and the axis-angle rotation matrix itself
//! live in [`crate::math`]; this module holds the one piece of geometry
//! that needs a random source, so it stays out of the dependency-free
//! `math` module.

use crate::math::Real;
use crate::rng::RandomSource;

/// Samples an angle in `[0, theta_max)` from the density proportional to
/// `sin^2(theta)` (the correct measure for a uniformly random rotation
/// axis composed with a rotation angle; using a flat distribution over
/// `[0, theta_max)` would bias small rotations). Acceptance-rejection
/// against the density's maximum over `[0, theta_max)` keeps this exact
/// rather than relying on the small-angle `theta^2` approximation.
pub fn biased_angle<R: RandomSource>(theta_max: Real, rng: &mut R) -> Real {
    if theta_max <= 0.0 {
        return 0.0;
    }
    // sin^2 is increasing on [0, pi/2] and decreasing after, so the
    // interval maximum sits at theta_max once it passes pi/2, not at
    // the endpoint itself.
    let envelope = theta_max
        .min(std::f32::consts::FRAC_PI_2)
        .sin()
        .powi(2)
        .max(Real::EPSILON);
    loop {
        let theta = rng.uniform01() * theta_max;
        let density = theta.sin().powi(2);
        if rng.uniform01() * envelope < density {
            return theta;
        }
    }
}

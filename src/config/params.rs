//! `SimConfig`: the validated, typed bundle of simulation parameters —
//! box, rcut, T, K, e, n_patches, N_max, vmmc_max_move,
//! vmmc_max_cluster, disp_max, theta_max.

use crate::config::constants::MAX_PATCHES;
use crate::error::ConfigError;
use crate::math::{Real, Vector};

#[derive(Clone, Debug)]
pub struct SimConfig {
    pub box_size: Vector,
    pub rcut: Real,
    pub sqr_rcut: Real,
    pub n_patches: usize,
    pub n_max: usize,
    pub vmmc_max_move: Real,
    pub vmmc_max_cluster: usize,
    pub disp_max: Real,
    pub theta_max: Real,
    pub t: Real,
    pub k: Vector,
    pub e: Vector,
}

impl SimConfig {
    /// Validates the required fields and fills in the optional ones
    /// (`disp_max`, `theta_max`, `T`, `K`, `e`) with their defaults.
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        box_size: Vector,
        rcut: Real,
        n_patches: usize,
        n_max: usize,
        vmmc_max_move: Real,
        vmmc_max_cluster: usize,
    ) -> Result<Self, ConfigError> {
        for (axis, value) in [box_size.x, box_size.y, box_size.z].into_iter().enumerate() {
            if value <= 0.0 {
                return Err(ConfigError::NonPositiveBoxSide { axis, value });
            }
        }
        if rcut <= 0.0 {
            return Err(ConfigError::NonPositiveCutoff(rcut));
        }
        if n_max == 0 {
            return Err(ConfigError::NonPositiveCapacity(0));
        }
        if n_patches > MAX_PATCHES {
            return Err(ConfigError::TooManyPatches {
                got: n_patches,
                max: MAX_PATCHES,
            });
        }
        if vmmc_max_move <= 0.0 {
            return Err(ConfigError::NonPositiveMaxMove(vmmc_max_move));
        }
        if vmmc_max_cluster == 0 {
            return Err(ConfigError::ClusterCapTooSmall(0));
        }

        Ok(Self {
            box_size,
            rcut,
            sqr_rcut: rcut * rcut,
            n_patches,
            n_max,
            vmmc_max_move,
            vmmc_max_cluster,
            disp_max: 1.0,
            theta_max: 0.5,
            t: 1.0,
            k: Vector::ZERO,
            e: Vector::ZERO,
        })
    }

    pub fn with_disp_max(mut self, disp_max: Real) -> Self {
        self.disp_max = disp_max;
        self
    }

    pub fn with_theta_max(mut self, theta_max: Real) -> Self {
        self.theta_max = theta_max;
        self
    }

    pub fn with_temperature(mut self, t: Real) -> Self {
        self.t = t;
        self
    }

    pub fn with_k(mut self, k: Vector) -> Self {
        self.k = k;
        self
    }

    pub fn with_e(mut self, e: Vector) -> Self {
        self.e = e;
        self
    }
}

//! Configuration errors.
//!
//! These are the only errors the public API returns as `Result`s; the
//! resource-exhaustion failure (possible-links overflow) has no graceful
//! recovery and instead goes through [`crate::logging::Logger::exit`]
//! directly from inside a move.

use thiserror::Error;

#[derive(Debug, Error, PartialEq)]
pub enum ConfigError {
    #[error("box side {axis} must be positive, got {value}")]
    NonPositiveBoxSide { axis: usize, value: f32 },

    #[error("cutoff rcut must be positive, got {0}")]
    NonPositiveCutoff(f32),

    #[error("n_max must be positive, got {0}")]
    NonPositiveCapacity(i64),

    #[error("n_patches must not exceed {max}, got {got}")]
    TooManyPatches { got: usize, max: usize },

    #[error("vmmc_max_move must be positive, got {0}")]
    NonPositiveMaxMove(f32),

    #[error("vmmc_max_cluster must be at least 1, got {0}")]
    ClusterCapTooSmall(i64),
}

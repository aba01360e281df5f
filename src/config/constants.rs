//! Tunable defaults and hard limits.

use crate::math::Real;

/// Guards the fractional-coordinate cell lookup against landing exactly
/// on the upper rounding boundary (see `Cells::locate`).
pub const CELL_EPSILON: Real = 1e-7;

/// Minimum number of cells per dimension; smaller boxes are clamped up
/// to this so the 27-cell neighborhood never wraps onto itself twice.
pub const MIN_CELLS_PER_SIDE: i64 = 3;

/// Energy sentinel returned for an overlapping pair. Never consumed by
/// callers directly — they must check the `overlap` flag instead.
pub const OVERLAP_SENTINEL_ENERGY: Real = 1e8;

/// Assumed maximum number of candidate partners per particle; the
/// `possible_links` buffer is sized to `POSSIBLE_LINKS_PER_PARTICLE * n_max`.
pub const POSSIBLE_LINKS_PER_PARTICLE: usize = 16;

/// Hard cap on patch sites per particle, used only to bound the
/// `ConfigError::TooManyPatches` check; not a performance-relevant limit.
pub const MAX_PATCHES: usize = 32;

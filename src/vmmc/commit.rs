//! Steps 4-7: global constraints, the before/after cluster energy,
//! commit-or-revert, and the final cell/`is_in_cluster` cleanup.
//!
//! Grounded in the tail of `VMMC_dynamics` in the original source:
//! `_compute_cluster_energy` bracketing the move, the `force_reject`
//! checks, and the final pass that always calls `change_cell` regardless
//! of whether the move was kept.

use crate::config::SimConfig;
use crate::core::{Cells, Particle};
use crate::math::{Real, Vector, mid_sqr_distance};
use crate::oracle::{PairOracle, pair_energy};
use crate::vmmc::kinematics::{Move, apply_move};

pub struct FinalizeOutcome {
    pub accepted: bool,
    pub delta_e: Real,
}

/// Sum of `pair_energy(p, q)` over every cluster member `p` and every
/// particle `q` in `p`'s 27-cell neighborhood that is *not* in the
/// cluster. Each (member, outside neighbor) combination is visited
/// exactly once since the outer loop ranges only over cluster members.
pub fn cluster_energy(
    particles: &[Particle],
    cells: &Cells,
    clust: &[usize],
    is_in_cluster: &[bool],
    oracle: &dyn PairOracle,
    e: Vector,
) -> Real {
    let mut total = 0.0;
    for &p in clust {
        for q in cells.neighborhood_of(particles[p].r) {
            if q == p || is_in_cluster[q] {
                continue;
            }
            let result = pair_energy(oracle, &particles[p], &particles[q], e);
            debug_assert!(!result.overlap);
            total += result.energy;
        }
    }
    total
}

/// Moves every cluster member, rebinding its cell, and checks that it
/// stayed within `vmmc_max_move` of the seed's (live, already-updated)
/// position. The rotation/translation pivot is the seed's position
/// *before* any member moved — fixed for the whole pass, so every
/// member rotates about the same point. Returns whether any member
/// violated the displacement cap; every member is still snapshotted and
/// moved even after a violation is seen, so a subsequent revert can
/// restore all of them uniformly.
pub fn apply_cluster_move(
    particles: &mut [Particle],
    cells: &mut Cells,
    config: &SimConfig,
    mv: Move,
    clust: &[usize],
) -> bool {
    let pivot = particles[clust[0]].r;
    let cap_sqr = config.vmmc_max_move * config.vmmc_max_move;
    let mut violated = false;

    for &idx in clust {
        particles[idx].snapshot_in_place();
        apply_move(mv, pivot, &mut particles[idx], config.box_size);
        cells.change_cell(particles, idx);

        let seed_now = particles[clust[0]].r;
        let d2 = mid_sqr_distance(seed_now, particles[idx].r, config.box_size);
        if d2 > cap_sqr {
            violated = true;
        }
    }
    violated
}

/// Steps 4-7 in sequence. `is_in_cluster` is cleared for every member on
/// return, whatever the outcome, leaving the working set empty.
#[allow(clippy::too_many_arguments)]
pub fn finalize(
    particles: &mut [Particle],
    cells: &mut Cells,
    config: &SimConfig,
    mv: Move,
    clust: &[usize],
    is_in_cluster: &mut [bool],
    prelinked_particles: &[usize],
    oracle: &dyn PairOracle,
) -> FinalizeOutcome {
    let mut force_reject = clust.len() >= config.vmmc_max_cluster
        || prelinked_particles.iter().any(|&q| !is_in_cluster[q]);

    let mut delta_e = 0.0;
    let mut moved = false;

    if !force_reject {
        let e_before = cluster_energy(particles, cells, clust, is_in_cluster, oracle, config.e);
        moved = true;
        if apply_cluster_move(particles, cells, config, mv, clust) {
            force_reject = true;
        }
        if !force_reject {
            let e_after = cluster_energy(particles, cells, clust, is_in_cluster, oracle, config.e);
            delta_e = e_after - e_before;
        }
    }

    if force_reject && moved {
        for &idx in clust {
            particles[idx].restore_in_place();
        }
    }

    for &idx in clust {
        cells.change_cell(particles, idx);
        is_in_cluster[idx] = false;
    }

    FinalizeOutcome {
        accepted: !force_reject,
        delta_e,
    }
}

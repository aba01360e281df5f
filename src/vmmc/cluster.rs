//! Step 3 — the cluster recruitment loop.
//!
//! Grounded in `VMMC_dynamics`'s central `while` loop in the original
//! source: repeatedly pop a random candidate link, canonicalize it onto
//! the (already-recruited, not-yet-recruited) pair, and run the
//! two-sided Whitelam-Geissler acceptance test that keeps the move
//! reversible.

use crate::config::SimConfig;
use crate::core::{Cells, Particle};
use crate::logging::Logger;
use crate::oracle::{PairOracle, pair_energy};
use crate::rng::RandomSource;
use crate::vmmc::kinematics::{Move, apply_move};
use crate::vmmc::links::{PossibleLinks, populate_possible_links};

/// Returns disjoint mutable references to `particles[a]` and
/// `particles[b]`. `a` and `b` must be distinct.
fn two_mut(particles: &mut [Particle], a: usize, b: usize) -> (&mut Particle, &mut Particle) {
    debug_assert_ne!(a, b);
    if a < b {
        let (left, right) = particles.split_at_mut(b);
        (&mut left[a], &mut right[0])
    } else {
        let (left, right) = particles.split_at_mut(a);
        (&mut right[0], &mut left[b])
    }
}

#[allow(clippy::too_many_arguments)]
pub fn recruit(
    particles: &mut [Particle],
    cells: &Cells,
    config: &SimConfig,
    mv: Move,
    clust: &mut Vec<usize>,
    is_in_cluster: &mut [bool],
    possible_links: &mut PossibleLinks,
    prelinked_particles: &mut Vec<usize>,
    oracle: &dyn PairOracle,
    rng: &mut impl RandomSource,
    logger: &dyn Logger,
) {
    while !possible_links.is_empty() && clust.len() < config.vmmc_max_cluster {
        let i = rng.uniform_index(possible_links.len());
        let (a, b) = possible_links.swap_remove(i);

        if is_in_cluster[a] == is_in_cluster[b] {
            // Either both already recruited (drop), or — should not
            // happen given every stored link was produced around an
            // existing cluster member — neither is; drop defensively.
            continue;
        }
        let (p, q) = if is_in_cluster[a] { (a, b) } else { (b, a) };
        let seed_r = particles[clust[0]].r;

        let e_old = {
            let (pp, qq) = two_mut(particles, p, q);
            pair_energy(oracle, pp, qq, config.e)
        };
        debug_assert!(!e_old.overlap);

        let (e_p_moved, force_prelink) = {
            let (pp, qq) = two_mut(particles, p, q);
            let mut snap = pp.store();
            apply_move(mv, seed_r, snap.particle_mut(), config.box_size);
            let energy = pair_energy(oracle, snap.particle(), qq, config.e);
            snap.restore();
            (energy.energy, energy.overlap)
        };

        let p1 = 1.0 - ((e_old.energy - e_p_moved) / config.t).exp();

        if force_prelink || rng.uniform01() < p1 {
            let (e_q_moved, force_link) = {
                let (pp, qq) = two_mut(particles, p, q);
                let mut snap = qq.store();
                apply_move(mv, seed_r, snap.particle_mut(), config.box_size);
                let energy = pair_energy(oracle, pp, snap.particle(), config.e);
                snap.restore();
                (energy.energy, energy.overlap)
            };

            let p2 = (1.0 - ((e_old.energy - e_q_moved) / config.t).exp()).min(1.0);

            if force_link || rng.uniform01() < p2 / p1 {
                clust.push(q);
                is_in_cluster[q] = true;
                expand_links(particles, cells, config, mv, seed_r, q, possible_links, logger);
            } else {
                prelinked_particles.push(q);
            }
        }
    }
}

/// Enumerates links around a newly recruited member both before and
/// after its trial move, the same pattern as the seed's own step 2.
/// Uses the non-guard snapshot so the enumeration calls — which need
/// `&mut` over the whole particle arena — can interleave with the single
/// member's own store/move/restore.
#[allow(clippy::too_many_arguments)]
fn expand_links(
    particles: &mut [Particle],
    cells: &Cells,
    config: &SimConfig,
    mv: Move,
    seed_r: crate::math::Vector,
    member: usize,
    possible_links: &mut PossibleLinks,
    logger: &dyn Logger,
) {
    particles[member].snapshot_in_place();
    let r_old = particles[member].r_old();

    populate_possible_links(
        particles,
        cells,
        member,
        r_old,
        config.box_size,
        config.sqr_rcut,
        possible_links,
        logger,
    );

    apply_move(mv, seed_r, &mut particles[member], config.box_size);

    populate_possible_links(
        particles,
        cells,
        member,
        r_old,
        config.box_size,
        config.sqr_rcut,
        possible_links,
        logger,
    );

    particles[member].restore_in_place();
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::SimConfig;
    use crate::logging::test_support::RecordingLogger;
    use crate::math::Vector;
    use crate::oracle::PairOutcome;

    /// Bond energy `-1/|p-q|`: weakens (rises) as the pair separates.
    struct RadialBond;
    impl PairOracle for RadialBond {
        fn interact(&self, p: &Particle, q: &Particle) -> PairOutcome {
            let d = (p.r - q.r).length().max(1e-6);
            PairOutcome::Bond(Vector::new(-1.0 / d, 0.0, 0.0))
        }
    }

    /// Always returns the lowest possible draw, so any positive
    /// acceptance probability is taken deterministically.
    struct ZeroRng;
    impl RandomSource for ZeroRng {
        fn uniform01(&mut self) -> crate::math::Real {
            0.0
        }
    }

    #[test]
    fn perpendicular_translation_recruits_symmetric_partner() {
        let logger = RecordingLogger::default();
        let config = SimConfig::new(Vector::splat(10.0), 3.0, 0, 4, 0.5, 8)
            .unwrap()
            .with_temperature(1.0)
            .with_e(Vector::new(1.0, 0.0, 0.0));
        let mut cells = Cells::new(&config, &logger);
        // Collinear along x; translating perpendicular (z) makes the
        // "move p alone" and "move q alone" probes land at the same
        // resulting distance, so p2 == p1 exactly and the inner test
        // always fires once the outer one does.
        let mut particles = vec![
            Particle::new(0, Vector::new(1.0, 1.0, 1.0), vec![]),
            Particle::new(1, Vector::new(1.5, 1.0, 1.0), vec![]),
        ];
        cells.fill(&mut particles);

        let mut clust = vec![0usize];
        let mut is_in_cluster = vec![false; 2];
        is_in_cluster[0] = true;
        let mut possible_links = PossibleLinks::with_capacity(config.n_max);
        let mut prelinked = Vec::new();
        let mv = Move::Translation(Vector::new(0.0, 0.0, 0.1));

        possible_links.push_deduped(0, 1, &logger);

        let mut rng = ZeroRng;
        recruit(
            &mut particles,
            &cells,
            &config,
            mv,
            &mut clust,
            &mut is_in_cluster,
            &mut possible_links,
            &mut prelinked,
            &RadialBond,
            &mut rng,
            &logger,
        );

        assert!(clust.contains(&1));
        assert!(prelinked.is_empty());
    }

    #[test]
    fn both_already_in_cluster_just_drops_the_link() {
        let logger = RecordingLogger::default();
        let config = SimConfig::new(Vector::splat(10.0), 3.0, 0, 4, 0.5, 8).unwrap();
        let mut cells = Cells::new(&config, &logger);
        let mut particles = vec![
            Particle::new(0, Vector::new(1.0, 1.0, 1.0), vec![]),
            Particle::new(1, Vector::new(1.5, 1.0, 1.0), vec![]),
        ];
        cells.fill(&mut particles);

        let mut clust = vec![0usize, 1usize];
        let mut is_in_cluster = vec![true, true];
        let mut possible_links = PossibleLinks::with_capacity(config.n_max);
        possible_links.push_deduped(0, 1, &logger);
        let mut prelinked = Vec::new();
        let mv = Move::Translation(Vector::ZERO);
        let mut rng = ZeroRng;

        recruit(
            &mut particles,
            &cells,
            &config,
            mv,
            &mut clust,
            &mut is_in_cluster,
            &mut possible_links,
            &mut prelinked,
            &RadialBond,
            &mut rng,
            &logger,
        );

        assert_eq!(clust.len(), 2);
        assert!(possible_links.is_empty());
    }

    /// Empirical detailed-balance check: in the same symmetric
    /// perpendicular-translation setup as
    /// `perpendicular_translation_recruits_symmetric_partner` — where the
    /// geometry makes `p2 == p1` exactly, so recruitment succeeds iff the
    /// single outer draw `U(0,1) < p1` — the fraction of trials that end
    /// with `q` recruited must converge to the `p1` the production code
    /// itself computes, since that probability *is* the Whitelam-Geissler
    /// acceptance formula detailed balance depends on.
    #[test]
    fn recruitment_rate_matches_the_p1_acceptance_formula() {
        use crate::rng::RngSource;
        use rand::SeedableRng;
        use rand::rngs::SmallRng;

        let logger = RecordingLogger::default();
        let config = SimConfig::new(Vector::splat(10.0), 3.0, 0, 4, 0.5, 8)
            .unwrap()
            .with_temperature(1.0)
            .with_e(Vector::new(1.0, 0.0, 0.0));
        let mv = Move::Translation(Vector::new(0.0, 0.0, 0.1));

        // Mirrors the production p1 formula exactly, computed once against
        // the fixed starting geometry, as the independent expected value.
        let p_r = Vector::new(1.0, 1.0, 1.0);
        let q_r = Vector::new(1.5, 1.0, 1.0);
        let e_old = RadialBond.interact(
            &Particle::new(0, p_r, vec![]),
            &Particle::new(1, q_r, vec![]),
        );
        let e_old_energy = match e_old {
            PairOutcome::Bond(o) => config.e.dot(o),
            _ => panic!("expected a bond"),
        };
        let p_moved_r = p_r + Vector::new(0.0, 0.0, 0.1);
        let e_p_moved = RadialBond.interact(
            &Particle::new(0, p_moved_r, vec![]),
            &Particle::new(1, q_r, vec![]),
        );
        let e_p_moved_energy = match e_p_moved {
            PairOutcome::Bond(o) => config.e.dot(o),
            _ => panic!("expected a bond"),
        };
        let expected_p1 = 1.0 - ((e_old_energy - e_p_moved_energy) / config.t).exp();
        assert!((0.0..1.0).contains(&expected_p1));

        let mut rng = RngSource(SmallRng::seed_from_u64(123));
        let trials = 4000;
        let mut recruited = 0u32;
        for _ in 0..trials {
            let mut cells = Cells::new(&config, &logger);
            let mut particles = vec![Particle::new(0, p_r, vec![]), Particle::new(1, q_r, vec![])];
            cells.fill(&mut particles);

            let mut clust = vec![0usize];
            let mut is_in_cluster = vec![false, false];
            is_in_cluster[0] = true;
            let mut possible_links = PossibleLinks::with_capacity(config.n_max);
            possible_links.push_deduped(0, 1, &logger);
            let mut prelinked = Vec::new();

            recruit(
                &mut particles,
                &cells,
                &config,
                mv,
                &mut clust,
                &mut is_in_cluster,
                &mut possible_links,
                &mut prelinked,
                &RadialBond,
                &mut rng,
                &logger,
            );

            if clust.contains(&1) {
                recruited += 1;
            }
        }

        let empirical = recruited as f64 / trials as f64;
        // Binomial sampling error at 4000 trials is well under 0.03 at
        // the 5-sigma level for any p in (0, 1); 0.05 leaves ample margin.
        assert!(
            (empirical - expected_p1 as f64).abs() < 0.05,
            "empirical recruitment rate {empirical} should track p1={expected_p1}"
        );
    }
}

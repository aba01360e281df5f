//! The Virtual-Move Monte Carlo cluster move: seed selection and
//! proposal, link enumeration around the seed, cluster recruitment, and
//! commit/rollback — steps 1 through 7 of the protocol.
//!
//! Grounded in `VMMC_dynamics` from the original C source. The original
//! kept `clust`, `is_in_cluster`, `possible_links` and
//! `prelinked_particles` as process-wide globals reset at the top of
//! every call; here they live on a `Vmmc` context the driver owns and
//! passes explicitly, so nothing stops two independent simulations
//! running in the same process.

mod cluster;
mod commit;
mod kinematics;
mod links;

use crate::config::SimConfig;
use crate::core::SimulationState;
use crate::logging::Logger;
use crate::oracle::PairOracle;
use crate::rng::RandomSource;
use kinematics::propose_move;
use links::{PossibleLinks, populate_possible_links};

/// Preallocated working sets for one VMMC move. Reset at the start of
/// every [`Vmmc::vmmc_move`] call; never resized after construction.
pub struct Vmmc {
    clust: Vec<usize>,
    is_in_cluster: Vec<bool>,
    possible_links: PossibleLinks,
    prelinked_particles: Vec<usize>,
}

impl Vmmc {
    pub fn new(config: &SimConfig) -> Self {
        Self {
            clust: Vec::with_capacity(config.vmmc_max_cluster),
            is_in_cluster: vec![false; config.n_max],
            possible_links: PossibleLinks::with_capacity(config.n_max),
            prelinked_particles: Vec::new(),
        }
    }

    /// Executes one cluster move end-to-end: proposes a seed and a
    /// rigid motion, grows a cluster via probabilistic recruitment, then
    /// either commits it to `state` or reverts it exactly. Returns
    /// whether the move was accepted.
    pub fn vmmc_move(
        &mut self,
        state: &mut SimulationState,
        oracle: &dyn PairOracle,
        rng: &mut impl RandomSource,
        logger: &dyn Logger,
    ) -> bool {
        self.clust.clear();
        self.possible_links.clear();
        self.prelinked_particles.clear();

        let config = state.config().clone();
        let seed = rng.uniform_index(state.particle_count());
        let mv = propose_move(&config, rng);

        // Step 2: seed link enumeration, pre- and post-move, around the
        // seed's own pre-move position.
        {
            let (particles, cells) = state.split_for_links();
            particles[seed].snapshot_in_place();
            let r_old = particles[seed].r_old();

            populate_possible_links(
                particles,
                cells,
                seed,
                r_old,
                config.box_size,
                config.sqr_rcut,
                &mut self.possible_links,
                logger,
            );

            kinematics::apply_move(mv, particles[seed].r, &mut particles[seed], config.box_size);

            populate_possible_links(
                particles,
                cells,
                seed,
                r_old,
                config.box_size,
                config.sqr_rcut,
                &mut self.possible_links,
                logger,
            );

            particles[seed].restore_in_place();
        }

        self.clust.push(seed);
        self.is_in_cluster[seed] = true;

        // Step 3: recruitment loop.
        {
            let (particles, cells) = state.split_for_links();
            cluster::recruit(
                particles,
                cells,
                &config,
                mv,
                &mut self.clust,
                &mut self.is_in_cluster,
                &mut self.possible_links,
                &mut self.prelinked_particles,
                oracle,
                rng,
                logger,
            );
        }

        // Steps 4-7: global constraints, energy delta, commit/revert, cleanup.
        let (particles, cells) = state.split_for_motion();
        let outcome = commit::finalize(
            particles,
            cells,
            &config,
            mv,
            &self.clust,
            &mut self.is_in_cluster,
            &self.prelinked_particles,
            oracle,
        );

        state.record_attempt();
        if outcome.accepted {
            state.record_acceptance();
            state.add_energy(outcome.delta_e);
        }

        outcome.accepted
    }
}

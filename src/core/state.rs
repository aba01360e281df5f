//! Aggregate simulation state: the particle arena, the cell index and
//! the running energy the driver accumulates moves into.
//!
//! One struct the driver owns, with narrow accessors instead of public
//! fields, so invariants (particle count vs. capacity, cell/particle
//! consistency) stay enforced at the seams.

use crate::config::SimConfig;
use crate::core::cells::Cells;
use crate::core::particle::Particle;
use crate::logging::Logger;
use crate::math::{Real, Vector};

pub struct SimulationState {
    config: SimConfig,
    particles: Vec<Particle>,
    cells: Cells,
    energy: Real,
    attempted_moves: u64,
    accepted_moves: u64,
}

impl SimulationState {
    pub fn new(config: SimConfig, logger: &dyn Logger) -> Self {
        let cells = Cells::new(&config, logger);
        Self {
            particles: Vec::with_capacity(config.n_max),
            cells,
            config,
            energy: 0.0,
            attempted_moves: 0,
            accepted_moves: 0,
        }
    }

    pub fn config(&self) -> &SimConfig {
        &self.config
    }

    pub fn particles(&self) -> &[Particle] {
        &self.particles
    }

    pub fn particles_mut(&mut self) -> &mut [Particle] {
        &mut self.particles
    }

    pub fn particle_count(&self) -> usize {
        self.particles.len()
    }

    pub fn cells(&self) -> &Cells {
        &self.cells
    }

    pub fn cells_mut(&mut self) -> &mut Cells {
        &mut self.cells
    }

    /// Splits the aggregate into disjoint borrows of the particle arena
    /// and the (read-only) cell index, for link enumeration that needs
    /// to mutate arbitrary particles while walking cell chains.
    pub fn split_for_links(&mut self) -> (&mut [Particle], &Cells) {
        (&mut self.particles, &self.cells)
    }

    /// Splits the aggregate into disjoint mutable borrows of the particle
    /// arena and the cell index, for the rebind-after-move step.
    pub fn split_for_motion(&mut self) -> (&mut [Particle], &mut Cells) {
        (&mut self.particles, &mut self.cells)
    }

    /// Appends a particle and assigns it the next stable index. Panics
    /// if this would exceed `n_max`: a particle's index must stay valid
    /// for the lifetime of the simulation, so `N_max` is a hard capacity,
    /// not a hint.
    pub fn add_particle(&mut self, r: Vector, patches: Vec<Vector>) -> usize {
        assert!(
            self.particles.len() < self.config.n_max,
            "particle capacity {} exceeded",
            self.config.n_max
        );
        let index = self.particles.len();
        self.particles.push(Particle::new(index, r, patches));
        index
    }

    /// Repopulates the cell index from scratch. Must run once after the
    /// initial particles are added and before the first move.
    pub fn fill_cells(&mut self) {
        self.cells.fill(&mut self.particles);
    }

    pub fn energy(&self) -> Real {
        self.energy
    }

    pub fn add_energy(&mut self, delta: Real) {
        self.energy += delta;
    }

    pub fn attempted_moves(&self) -> u64 {
        self.attempted_moves
    }

    pub fn accepted_moves(&self) -> u64 {
        self.accepted_moves
    }

    pub(crate) fn record_attempt(&mut self) {
        self.attempted_moves += 1;
    }

    pub(crate) fn record_acceptance(&mut self) {
        self.accepted_moves += 1;
    }
}

//! Linked-cell spatial index.
//!
//! Particles live in a dense arena (`Vec<Particle>`, indexed by the
//! particle's stable `index`); this index only ever stores that index,
//! never a pointer, so cells and the per-particle `next` pointers form a
//! back-reference graph with no cycles to worry about (see DESIGN.md).

use crate::config::constants::{CELL_EPSILON, MIN_CELLS_PER_SIDE};
use crate::config::SimConfig;
use crate::core::particle::Particle;
use crate::logging::Logger;
use crate::math::{Real, Vector};

/// The 3x3x3 block of relative cell offsets, including the center cell.
const NEIGHBOR_OFFSETS: [(i64, i64, i64); 27] = {
    let mut offsets = [(0i64, 0i64, 0i64); 27];
    let mut idx = 0;
    let mut dx = -1i64;
    while dx <= 1 {
        let mut dy = -1i64;
        while dy <= 1 {
            let mut dz = -1i64;
            while dz <= 1 {
                offsets[idx] = (dx, dy, dz);
                idx += 1;
                dz += 1;
            }
            dy += 1;
        }
        dx += 1;
    }
    offsets
};

pub struct Cells {
    n_side: [i64; 3],
    n: usize,
    box_size: Vector,
    heads: Vec<Option<u32>>,
    next: Vec<Option<u32>>,
}

impl Cells {
    /// Builds the index from box size and cutoff, clamping each
    /// dimension's cell count up to `MIN_CELLS_PER_SIDE` and logging a
    /// notice when a clamp occurs.
    pub fn new(config: &SimConfig, logger: &dyn Logger) -> Self {
        let box_arr = [config.box_size.x, config.box_size.y, config.box_size.z];
        let mut n_side = [0i64; 3];
        for d in 0..3 {
            let raw = (box_arr[d] / config.rcut).floor() as i64;
            n_side[d] = if raw < MIN_CELLS_PER_SIDE {
                logger.log(&format!(
                    "box side {d} is too small for rcut={}, clamping cell count to {MIN_CELLS_PER_SIDE}",
                    config.rcut
                ));
                MIN_CELLS_PER_SIDE
            } else {
                raw
            };
        }
        let n = (n_side[0] * n_side[1] * n_side[2]) as usize;

        Self {
            n_side,
            n,
            box_size: config.box_size,
            heads: vec![None; n],
            next: vec![None; config.n_max],
        }
    }

    pub fn cell_count(&self) -> usize {
        self.n
    }

    pub fn n_side(&self) -> [i64; 3] {
        self.n_side
    }

    /// Fractional-coordinate cell lookup: returns the flattened index and
    /// the integer `(i, j, k)` triple used to iterate neighborhoods.
    pub fn locate(&self, r: Vector) -> (usize, [i64; 3]) {
        let box_arr = [self.box_size.x, self.box_size.y, self.box_size.z];
        let r_arr = [r.x, r.y, r.z];
        let mut idx = [0i64; 3];
        for d in 0..3 {
            let frac = r_arr[d] / box_arr[d] - (r_arr[d] / box_arr[d]).floor();
            idx[d] = (frac * (1.0 - CELL_EPSILON) * self.n_side[d] as Real) as i64;
            idx[d] = idx[d].clamp(0, self.n_side[d] - 1);
        }
        let flat = ((idx[0] * self.n_side[1] + idx[1]) * self.n_side[2] + idx[2]) as usize;
        (flat, idx)
    }

    /// Clears all chains and rebinds every particle in `particles`.
    pub fn fill(&mut self, particles: &mut [Particle]) {
        self.heads.iter_mut().for_each(|h| *h = None);
        self.next.iter_mut().for_each(|n| *n = None);

        for particle in particles.iter_mut() {
            let (cell, _) = self.locate(particle.r);
            self.next[particle.index] = self.heads[cell];
            self.heads[cell] = Some(particle.index as u32);
            particle.cell = Some(cell);
            particle.cell_old = Some(cell);
        }
    }

    /// Rebinds a single particle after its position changed. No-op if
    /// its owning cell did not change.
    pub fn change_cell(&mut self, particles: &mut [Particle], p_index: usize) {
        let (new_cell, _) = self.locate(particles[p_index].r);
        let old_cell = particles[p_index].cell;
        if old_cell == Some(new_cell) {
            return;
        }

        if let Some(old_cell) = old_cell {
            self.unlink(old_cell, p_index);
        }

        self.next[p_index] = self.heads[new_cell];
        self.heads[new_cell] = Some(p_index as u32);
        particles[p_index].cell_old = particles[p_index].cell;
        particles[p_index].cell = Some(new_cell);
    }

    fn unlink(&mut self, cell: usize, p_index: usize) {
        let mut cursor = self.heads[cell];
        if cursor == Some(p_index as u32) {
            self.heads[cell] = self.next[p_index];
            return;
        }
        while let Some(current) = cursor {
            let next = self.next[current as usize];
            if next == Some(p_index as u32) {
                self.next[current as usize] = self.next[p_index];
                return;
            }
            cursor = next;
        }
    }

    /// Non-fatal consistency diagnostic: counts particles reachable via
    /// all chains and logs a warning on mismatch.
    pub fn check(&self, expected_count: usize, logger: &dyn Logger) {
        let mut counter = 0usize;
        for &head in &self.heads {
            let mut cursor = head;
            while let Some(idx) = cursor {
                counter += 1;
                cursor = self.next[idx as usize];
            }
        }
        if counter != expected_count {
            logger.log(&format!(
                "there are {counter} particles in cells, there should be {expected_count}"
            ));
        }
    }

    /// Iterates the flattened indices of the 27 neighbor cells (including
    /// the cell itself) around the integer triple `idx`, wrapping at the
    /// box boundary.
    pub fn neighbor_cells(&self, idx: [i64; 3]) -> impl Iterator<Item = usize> + '_ {
        NEIGHBOR_OFFSETS.iter().map(move |&(dx, dy, dz)| {
            let i = (idx[0] + dx).rem_euclid(self.n_side[0]);
            let j = (idx[1] + dy).rem_euclid(self.n_side[1]);
            let k = (idx[2] + dz).rem_euclid(self.n_side[2]);
            ((i * self.n_side[1] + j) * self.n_side[2] + k) as usize
        })
    }

    /// Iterates the particle indices currently chained to `cell`.
    pub fn chain(&self, cell: usize) -> impl Iterator<Item = usize> + '_ {
        let mut cursor = self.heads[cell];
        std::iter::from_fn(move || {
            let current = cursor?;
            cursor = self.next[current as usize];
            Some(current as usize)
        })
    }

    /// Iterates every particle index in the 27-cell neighborhood of `r`,
    /// in the box this index was built for.
    pub fn neighborhood_of(&self, r: Vector) -> impl Iterator<Item = usize> + '_ {
        let (_, idx) = self.locate(r);
        self.neighbor_cells(idx).flat_map(move |cell| self.chain(cell))
    }
}

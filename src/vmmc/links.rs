//! Candidate-partner enumeration around one anchor particle.
//!
//! Grounded in `_populate_possible_links` from the original VMMC source:
//! walk the anchor's 27-cell neighborhood, record a deduplicated
//! unordered pair for every partner inside `rcut`, and permanently
//! re-image that partner's absolute coordinates onto the copy closest to
//! the anchor's pre-move position.

use crate::config::constants::POSSIBLE_LINKS_PER_PARTICLE;
use crate::core::{Cells, Particle};
use crate::logging::Logger;
use crate::math::{Real, Vector, mid};

/// The deduplicated, capped set of candidate recruitment pairs live for
/// one VMMC invocation. Stored as `(low, high)` particle indices so an
/// unordered pair has one canonical representation.
#[derive(Default)]
pub struct PossibleLinks {
    pairs: Vec<(u32, u32)>,
    cap: usize,
}

impl PossibleLinks {
    pub fn with_capacity(n_max: usize) -> Self {
        let cap = POSSIBLE_LINKS_PER_PARTICLE * n_max;
        Self {
            pairs: Vec::with_capacity(cap.min(4096)),
            cap,
        }
    }

    pub fn clear(&mut self) {
        self.pairs.clear();
    }

    pub fn len(&self) -> usize {
        self.pairs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pairs.is_empty()
    }

    /// Inserts the unordered pair `(a, b)` unless it is already present.
    /// Fatal once `cap` would be exceeded: this is a configuration error,
    /// never a recoverable one.
    pub fn push_deduped(&mut self, a: usize, b: usize, logger: &dyn Logger) {
        let (lo, hi) = if a < b { (a, b) } else { (b, a) };
        if self.pairs.iter().any(|&(x, y)| x as usize == lo && y as usize == hi) {
            return;
        }
        if self.pairs.len() >= self.cap {
            logger.exit(&format!(
                "VMMC: possible_links exceeded its capacity of {}",
                self.cap
            ));
        }
        self.pairs.push((lo as u32, hi as u32));
    }

    /// Removes and returns the pair at `i` via swap-with-last — O(1) and
    /// the asymptotically correct choice; do not replace this with an
    /// order-preserving erase.
    pub fn swap_remove(&mut self, i: usize) -> (usize, usize) {
        let (a, b) = self.pairs.swap_remove(i);
        (a as usize, b as usize)
    }

    pub fn get(&self, i: usize) -> (usize, usize) {
        let (a, b) = self.pairs[i];
        (a as usize, b as usize)
    }
}

/// Enumerates candidate partners for `anchor_index` in its 27-cell
/// neighborhood, recording deduplicated pairs into `links` and rewriting
/// every visited partner's absolute position onto the image closest to
/// `anchor_r_old`.
///
/// `anchor_r_old` is passed explicitly rather than read off the particle
/// because this same routine is invoked both for the seed being probed
/// in step 2 and for newly recruited members in step 3c, always against
/// the position captured by that particle's own `store()` — never the
/// anchor's *current* position, which during the post-move call is
/// already displaced.
pub fn populate_possible_links(
    particles: &mut [Particle],
    cells: &Cells,
    anchor_index: usize,
    anchor_r_old: Vector,
    box_size: Vector,
    sqr_rcut: Real,
    links: &mut PossibleLinks,
    logger: &dyn Logger,
) {
    let anchor_r = particles[anchor_index].r;
    let candidates: Vec<usize> = cells.neighborhood_of(anchor_r).collect();

    for q_index in candidates {
        if q_index == anchor_index {
            continue;
        }
        let q_r = particles[q_index].r;
        let d2 = crate::math::mid_sqr_distance(anchor_r, q_r, box_size);
        if d2 > sqr_rcut {
            continue;
        }

        links.push_deduped(anchor_index, q_index, logger);

        let delta = mid(anchor_r_old, q_r, box_size);
        let new_r = anchor_r_old + delta;
        let shift = new_r - q_r;
        let q = &mut particles[q_index];
        for patch in q.patches.iter_mut() {
            *patch += shift;
        }
        q.r = new_r;
    }
}

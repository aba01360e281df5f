/// Simple custom benchmarking without criterion
/// Avoids Windows MSVC linker issues with rayon/criterion
use std::time::Instant;

use rand::SeedableRng;
use rand::rngs::SmallRng;

use vmmc_core::config::SimConfig;
use vmmc_core::core::SimulationState;
use vmmc_core::logging::TracingLogger;
use vmmc_core::math::Vector;
use vmmc_core::oracle::{PairOracle, PairOutcome};
use vmmc_core::rng::RngSource;
use vmmc_core::vmmc::Vmmc;

fn time_it<F: FnMut()>(name: &str, iterations: usize, mut f: F) {
    // Warmup
    for _ in 0..5 {
        f();
    }

    let start = Instant::now();
    for _ in 0..iterations {
        f();
    }
    let elapsed = start.elapsed();

    let avg_ms = elapsed.as_secs_f64() * 1000.0 / iterations as f64;
    println!("{}: {:.3}ms avg ({} iterations)", name, avg_ms, iterations);
}

/// A square-well oracle: bonded within `well_radius`, hard-overlap below
/// `core_radius`, inert beyond the well. Cheap enough to not dominate
/// the benchmark itself.
struct SquareWell {
    core_radius_sqr: f32,
    well_radius_sqr: f32,
}

impl PairOracle for SquareWell {
    fn interact(
        &self,
        p: &vmmc_core::core::Particle,
        q: &vmmc_core::core::Particle,
    ) -> PairOutcome {
        let d2 = (p.r - q.r).length_squared();
        if d2 < self.core_radius_sqr {
            PairOutcome::Overlap
        } else if d2 < self.well_radius_sqr {
            PairOutcome::Bond(Vector::new(-1.0, 0.0, 0.0))
        } else {
            PairOutcome::None
        }
    }
}

fn lattice_state(count: usize, box_side: f32) -> SimulationState {
    let config = SimConfig::new(Vector::splat(box_side), 1.5, 0, count + 8, 0.5, 64).unwrap();
    let logger = TracingLogger;
    let mut state = SimulationState::new(config, &logger);

    let side = (count as f32).cbrt().ceil() as usize;
    let spacing = box_side / side as f32;
    'fill: for x in 0..side {
        for y in 0..side {
            for z in 0..side {
                if state.particle_count() >= count {
                    break 'fill;
                }
                let r = Vector::new(
                    x as f32 * spacing,
                    y as f32 * spacing,
                    z as f32 * spacing,
                );
                state.add_particle(r, vec![]);
            }
        }
    }
    state.fill_cells();
    state
}

fn main() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .try_init();

    println!("\n=== VMMC Core Benchmarks ===\n");

    let oracle = SquareWell {
        core_radius_sqr: 0.6,
        well_radius_sqr: 1.2,
    };
    let logger = TracingLogger;

    println!("--- Cell Rebuild ---");
    for &count in &[1000, 5000, 10000, 20000] {
        let mut state = lattice_state(count, (count as f32).cbrt() * 1.5);
        time_it(&format!("cells_fill (n={count})"), 20, || {
            state.fill_cells();
        });
    }

    println!("\n--- VMMC Moves ---");
    for &count in &[100, 1000, 5000] {
        let mut state = lattice_state(count, (count as f32).cbrt() * 1.5);
        let mut vmmc = Vmmc::new(state.config());
        let mut rng = RngSource(SmallRng::seed_from_u64(count as u64));

        time_it(&format!("vmmc_move (n={count})"), 200, || {
            vmmc.vmmc_move(&mut state, &oracle, &mut rng, &logger);
        });
    }

    println!("\n=== Benchmark Complete ===\n");
}

//! Monte Carlo core for a system of rigid patchy particles in a periodic
//! box: a linked-cell neighbor index plus the Virtual-Move Monte Carlo
//! (VMMC) cluster move described in Whitelam & Geissler.
//!
//! This crate is the core only — seeding a configuration, driving the
//! outer MC loop, parsing input, and writing trajectories are left to
//! the caller. Three small traits mark the seams: [`oracle::PairOracle`]
//! (the interaction potential), [`rng::RandomSource`] (the random draws
//! VMMC needs) and [`logging::Logger`] (the two diagnostic sinks).
//!
//! ```no_run
//! use vmmc_core::config::SimConfig;
//! use vmmc_core::core::SimulationState;
//! use vmmc_core::logging::TracingLogger;
//! use vmmc_core::math::Vector;
//! use vmmc_core::rng::RngSource;
//! use vmmc_core::vmmc::Vmmc;
//! use rand::rngs::SmallRng;
//! use rand::SeedableRng;
//!
//! # struct MyOracle;
//! # impl vmmc_core::oracle::PairOracle for MyOracle {
//! #     fn interact(&self, _p: &vmmc_core::core::Particle, _q: &vmmc_core::core::Particle) -> vmmc_core::oracle::PairOutcome {
//! #         vmmc_core::oracle::PairOutcome::None
//! #     }
//! # }
//! let config = SimConfig::new(Vector::splat(20.0), 1.5, 1, 256, 0.5, 60).unwrap();
//! let logger = TracingLogger;
//! let mut state = SimulationState::new(config.clone(), &logger);
//! state.add_particle(Vector::ZERO, vec![Vector::new(0.5, 0.0, 0.0)]);
//! state.fill_cells();
//!
//! let mut vmmc = Vmmc::new(&config);
//! let mut rng = RngSource(SmallRng::seed_from_u64(0));
//! vmmc.vmmc_move(&mut state, &MyOracle, &mut rng, &logger);
//! ```

pub mod config;
pub mod core;
pub mod error;
pub mod geometry;
pub mod logging;
pub mod math;
pub mod oracle;
pub mod rng;
pub mod vmmc;

pub use config::SimConfig;
pub use core::{Cells, Particle, SimulationState};
pub use error::ConfigError;
pub use logging::{Logger, TracingLogger};
pub use oracle::{PairEnergy, PairOracle, PairOutcome};
pub use rng::{RandomSource, RngSource};
pub use vmmc::Vmmc;

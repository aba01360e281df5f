//! Core data structures
//!
//! Fundamental data structures for the VMMC core:
//! - Cells: linked-cell spatial index
//! - Particle: rigid patchy body
//! - SimulationState: the aggregate the driver owns

pub mod cells;
pub mod particle;
pub mod state;

pub use cells::Cells;
pub use particle::{DofSnapshot, Particle};
pub use state::SimulationState;

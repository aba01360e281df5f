//! Configuration and parameters
//!
//! Constants and validated simulation settings.

pub mod constants;
pub mod params;

pub use constants::*;
pub use params::SimConfig;

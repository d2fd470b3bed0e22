//! Configuration and parameters
//!
//! Tuning defaults and the validated parameter set read by the simulator.

pub mod constants;
pub mod sim_params;

pub use constants::*;
pub use sim_params::*;

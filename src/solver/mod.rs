// src/solver/mod.rs
pub mod drop_update;
pub mod grid_update;
pub mod splash_update;

pub use drop_update::*;
pub use grid_update::*;
pub use splash_update::*;

use std::time::Duration;

use bevy::prelude::*;

pub mod config;
pub mod core;
pub mod error;
pub mod math;
pub mod solver;

// Public re-exports for clean API
pub use crate::config::{
    DropParams, FIXED_TICK_HZ, RenderLayout, SimParams, SplashParams, WaveParams,
};
pub use crate::core::{
    DropPhase, DropView, HeightField, ImpactEvent, ImpactProcessor, ImpactRing, ParticleView,
    Projectile, RippleState, SplashParticle, SplashParticleSystem, WaveCell,
};
pub use crate::error::{ConfigError, ConfigResult};
pub use crate::math::{Point, Real, Vector};

use crate::solver::{drop_update, grid_update, log_ripple_diagnostics, splash_update, sync_params};

/// Runs the ripple simulation on `FixedUpdate`.
///
/// Stages are chained in tick order: parameters, drop, waves, splash.
#[derive(Clone, Debug, Default)]
pub struct RipplePlugin {
    pub params: SimParams,
}

impl RipplePlugin {
    pub fn new(params: SimParams) -> Self {
        Self { params }
    }
}

impl Plugin for RipplePlugin {
    fn build(&self, app: &mut App) {
        app.insert_resource(RippleState::new(self.params.clone()));
        app.insert_resource(Time::<Fixed>::from_duration(Duration::from_secs_f64(
            1.0 / FIXED_TICK_HZ,
        )));
        app.add_systems(
            FixedUpdate,
            (
                sync_params,
                drop_update,
                grid_update,
                splash_update,
                log_ripple_diagnostics,
            )
                .chain(),
        );
    }
}

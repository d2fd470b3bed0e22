// Tuning defaults for the ripple simulation. Visual tuning values, not
// physical constants.
use bevy::prelude::*;

// Height field
pub const GRID_SIZE: usize = 120;
pub const MIN_GRID_SIZE: usize = 3;
pub const SPRING_CONSTANT: f32 = 0.04;
pub const DAMPING_FACTOR: f32 = 0.985;
pub const SPREAD_FACTOR: f32 = 0.15;
pub const RIPPLE_ENERGY_SCALE: f32 = 0.2;

// Drop
pub const DROP_HEIGHT: f32 = 200.0;
pub const IMPACT_ALTITUDE: f32 = 0.0;
pub const DROP_FALL_SPEED: f32 = 8.0;
pub const DROP_RADIUS: f32 = 18.0;
pub const DROP_RADIUS_RANGE: (f32, f32) = (5.0, 100.0);
pub const DROP_ANGLE: f32 = 45.0;
pub const DROP_ANGLE_RANGE: (f32, f32) = (0.0, 90.0);
pub const DROP_BASE_MASS: f32 = 1.0;
pub const REFERENCE_RADIUS: f32 = DROP_RADIUS;
/// Cells kept between the launch ring and the grid edge
pub const LAUNCH_MARGIN: usize = 5;

// Splash
pub const SPLASH_PARTICLE_SPEED: f32 = 3.5;
pub const SPLASH_PARTICLE_VARIATION: f32 = 1.5;
pub const SPLASH_PARTICLE_COUNT: usize = 30;
pub const SPLASH_GRAVITY: f32 = 0.1;
pub const SPLASH_GRAVITY_RANGE: (f32, f32) = (0.1, 2.0);
pub const SPLASH_RESTITUTION: f32 = 0.4;
pub const SPLASH_LIFETIME: (f32, f32) = (0.6, 1.6);
pub const SPLASH_SIZE: (f32, f32) = (2.0, 6.0);
pub const SPLASH_LIFE_DECREMENT: f32 = 0.04;
pub const SPLASH_SURFACE_LINE: f32 = 400.0;
/// Remaining lifetime, as a fraction of the per-tick decrement, that counts
/// as expired. Covers rounding left over from repeated subtraction.
pub const SPLASH_EXPIRY_TOLERANCE: f32 = 1e-3;

// Slider range for the damping control
pub const DAMPING_RANGE: (f32, f32) = (0.90, 0.999);

// Render space (y-down) placement of the grid
pub const RENDER_OFFSET: Vec2 = Vec2::new(550.0, 80.0);
pub const RENDER_EXTENT: f32 = 700.0;
/// Render-space y of the resting surface in the side view
pub const SIDE_VIEW_SURFACE: f32 = 500.0;
/// Rows averaged on each side of the drop row for the side profile
pub const SIDE_VIEW_BAND: usize = 2;

// Impact ring
pub const IMPACT_RING_TICKS: u32 = 20;
pub const IMPACT_RING_GROWTH: f32 = 3.0;
pub const IMPACT_RING_SCALE: f32 = 1.2;
pub const IMPACT_RING_ALPHA: f32 = 180.0;
pub const IMPACT_RING_FADE: f32 = 8.0;

// Fixed tick rate driven by the plugin
pub const FIXED_TICK_HZ: f64 = 120.0;

pub mod height_field;
pub mod impact;
pub mod projectile;
pub mod ripple_state;
pub mod splash;

pub use height_field::{HeightField, NEIGHBOR_COUNT, STENCIL_OFFSETS, WaveCell};
pub use impact::{DropPhase, ImpactEvent, ImpactProcessor, ImpactRing};
pub use projectile::{Projectile, launch_point};
pub use ripple_state::{DropView, RippleState};
pub use splash::{ParticleView, SplashParticle, SplashParticleSystem};

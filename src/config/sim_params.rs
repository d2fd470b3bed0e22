use bevy::prelude::*;

use super::constants::*;
use crate::error::{ConfigError, ConfigResult};
use crate::math::{Point, Real};

/// Coefficients of the spring-damper height field.
///
/// The integrator is explicit and only conditionally stable. Large spring or
/// spread values with damping near 1.0 let `|velocity|` diverge; nothing
/// guards against that at runtime.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct WaveParams {
    /// Pull of every cell back toward rest height
    pub spring_constant: Real,
    /// Coupling strength to the 4-neighbour stencil
    pub spread_factor: Real,
    /// Multiplier applied to velocity after each step
    pub damping_factor: Real,
    /// Converts impact energy into visible ripple strength
    pub energy_scale: Real,
}

impl Default for WaveParams {
    fn default() -> Self {
        Self {
            spring_constant: SPRING_CONSTANT,
            spread_factor: SPREAD_FACTOR,
            damping_factor: DAMPING_FACTOR,
            energy_scale: RIPPLE_ENERGY_SCALE,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct DropParams {
    pub drop_height: Real,
    pub impact_altitude: Real,
    pub fall_speed: Real,
    pub radius: Real,
    /// Degrees, only used to place the launch point on the grid
    pub angle: Real,
    pub base_mass: Real,
    pub reference_radius: Real,
}

impl Default for DropParams {
    fn default() -> Self {
        Self {
            drop_height: DROP_HEIGHT,
            impact_altitude: IMPACT_ALTITUDE,
            fall_speed: DROP_FALL_SPEED,
            radius: DROP_RADIUS,
            angle: DROP_ANGLE,
            base_mass: DROP_BASE_MASS,
            reference_radius: REFERENCE_RADIUS,
        }
    }
}

/// Splash spray behaviour. Render space is y-down.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct SplashParams {
    pub speed: Real,
    pub variation: Real,
    pub count: usize,
    pub gravity: Real,
    /// Render-space line particles bounce off while moving down
    pub surface_line: Real,
    pub restitution: Real,
    pub lifetime_min: Real,
    pub lifetime_max: Real,
    pub size_min: Real,
    pub size_max: Real,
    /// Lifetime removed from every particle per tick
    pub life_decrement: Real,
}

impl SplashParams {
    /// Launch speed bounds derived from the base speed and variation
    pub fn speed_range(&self) -> (Real, Real) {
        (
            self.speed * 0.7 * self.variation,
            self.speed * 1.3 * self.variation,
        )
    }

    /// Ticks needed for the longest-lived particle to expire
    pub fn ticks_to_expire(&self) -> usize {
        if self.life_decrement <= 0.0 {
            return usize::MAX;
        }
        (self.lifetime_max / self.life_decrement - SPLASH_EXPIRY_TOLERANCE).ceil() as usize
    }

    /// Whether a particle with `lifetime` left is gone after a tick that
    /// removed `delta`
    #[inline]
    pub fn is_expired(lifetime: Real, delta: Real) -> bool {
        lifetime <= delta.max(0.0) * SPLASH_EXPIRY_TOLERANCE
    }
}

impl Default for SplashParams {
    fn default() -> Self {
        Self {
            speed: SPLASH_PARTICLE_SPEED,
            variation: SPLASH_PARTICLE_VARIATION,
            count: SPLASH_PARTICLE_COUNT,
            gravity: SPLASH_GRAVITY,
            surface_line: SPLASH_SURFACE_LINE,
            restitution: SPLASH_RESTITUTION,
            lifetime_min: SPLASH_LIFETIME.0,
            lifetime_max: SPLASH_LIFETIME.1,
            size_min: SPLASH_SIZE.0,
            size_max: SPLASH_SIZE.1,
            life_decrement: SPLASH_LIFE_DECREMENT,
        }
    }
}

/// Maps grid coordinates onto the renderer's (y-down) surface.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct RenderLayout {
    pub offset: Vec2,
    /// Render-space width covered by the whole grid
    pub extent: Real,
    /// Resting surface height of the side view
    pub side_surface: Real,
}

impl RenderLayout {
    #[inline]
    pub fn cell_size(&self, grid_size: usize) -> Real {
        self.extent / grid_size.max(1) as Real
    }

    /// Grid point to render point, truncated to whole units
    #[inline]
    pub fn grid_to_render(&self, grid_point: Point, grid_size: usize) -> Point {
        self.offset + (grid_point * self.cell_size(grid_size)).floor()
    }

    /// Side-view polyline for a height profile, one point per grid column
    pub fn profile_to_render(&self, profile: &[Real]) -> Vec<Point> {
        let cell = self.cell_size(profile.len());
        profile
            .iter()
            .enumerate()
            .map(|(i, height)| {
                Vec2::new(
                    self.offset.x + (i as Real * cell).floor(),
                    self.side_surface + height,
                )
            })
            .collect()
    }
}

impl Default for RenderLayout {
    fn default() -> Self {
        Self {
            offset: RENDER_OFFSET,
            extent: RENDER_EXTENT,
            side_surface: SIDE_VIEW_SURFACE,
        }
    }
}

/// Complete parameter set read by the simulator each tick.
///
/// Fields are public for reading and for trusted tooling. Input coming from a
/// user goes through the `set_*` methods, which reject bad values and keep the
/// previous ones.
#[derive(Clone, Debug, PartialEq)]
pub struct SimParams {
    /// Cells per side. A new size takes effect on the next reset.
    pub grid_size: usize,
    pub wave: WaveParams,
    pub drop: DropParams,
    pub splash: SplashParams,
    pub layout: RenderLayout,
    /// Fixed RNG seed for reproducible splashes
    pub seed: Option<u64>,
}

impl Default for SimParams {
    fn default() -> Self {
        Self {
            grid_size: GRID_SIZE,
            wave: WaveParams::default(),
            drop: DropParams::default(),
            splash: SplashParams::default(),
            layout: RenderLayout::default(),
            seed: None,
        }
    }
}

impl SimParams {
    pub fn with_grid_size(mut self, grid_size: usize) -> Self {
        self.grid_size = grid_size.max(MIN_GRID_SIZE);
        self
    }

    pub fn with_wave(mut self, wave: WaveParams) -> Self {
        self.wave = wave;
        self
    }

    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    pub fn set_grid_size(&mut self, grid_size: usize) -> ConfigResult {
        if grid_size < MIN_GRID_SIZE {
            return Err(reject(ConfigError::InvalidGridSize(grid_size)));
        }
        self.grid_size = grid_size;
        Ok(())
    }

    pub fn set_spring_constant(&mut self, value: Real) -> ConfigResult {
        self.wave.spring_constant = check_range("spring_constant", value, 0.0, 1.0)?;
        Ok(())
    }

    pub fn set_spread_factor(&mut self, value: Real) -> ConfigResult {
        self.wave.spread_factor = check_range("spread_factor", value, 0.0, 1.0)?;
        Ok(())
    }

    pub fn set_damping_factor(&mut self, value: Real) -> ConfigResult {
        self.wave.damping_factor = check_range("damping_factor", value, 0.0, 1.0)?;
        Ok(())
    }

    pub fn set_energy_scale(&mut self, value: Real) -> ConfigResult {
        self.wave.energy_scale = check_range("energy_scale", value, 0.0, Real::MAX)?;
        Ok(())
    }

    pub fn set_fall_speed(&mut self, value: Real) -> ConfigResult {
        self.drop.fall_speed = check_range("fall_speed", value, Real::MIN_POSITIVE, Real::MAX)?;
        Ok(())
    }

    pub fn set_drop_radius(&mut self, value: Real) -> ConfigResult {
        let (min, max) = DROP_RADIUS_RANGE;
        self.drop.radius = check_range("drop_radius", value, min, max)?;
        Ok(())
    }

    pub fn set_drop_angle(&mut self, value: Real) -> ConfigResult {
        let (min, max) = DROP_ANGLE_RANGE;
        self.drop.angle = check_range("drop_angle", value, min, max)?;
        Ok(())
    }

    pub fn set_splash_speed(&mut self, value: Real) -> ConfigResult {
        self.splash.speed = check_range("splash_speed", value, 0.0, Real::MAX)?;
        Ok(())
    }

    pub fn set_splash_variation(&mut self, value: Real) -> ConfigResult {
        self.splash.variation = check_range("splash_variation", value, 0.0, Real::MAX)?;
        Ok(())
    }

    pub fn set_splash_count(&mut self, count: usize) {
        self.splash.count = count;
    }

    /// Applies the text of the angle and size input boxes.
    ///
    /// Empty text keeps the current value. Both fields are validated before
    /// either is written, so a bad field leaves the other untouched too.
    pub fn apply_drop_input(&mut self, angle_text: &str, size_text: &str) -> ConfigResult {
        let angle = parse_field("drop_angle", angle_text)?;
        let radius = parse_field("drop_radius", size_text)?;

        let angle = match angle {
            Some(value) => check_range("drop_angle", value, DROP_ANGLE_RANGE.0, DROP_ANGLE_RANGE.1)?,
            None => self.drop.angle,
        };
        let radius = match radius {
            Some(value) => {
                check_range("drop_radius", value, DROP_RADIUS_RANGE.0, DROP_RADIUS_RANGE.1)?
            }
            None => self.drop.radius,
        };

        self.drop.angle = angle;
        self.drop.radius = radius;
        Ok(())
    }

    // Slider controls clamp instead of rejecting

    pub fn slide_gravity(&mut self, value: Real) {
        if value.is_finite() {
            self.splash.gravity = value.clamp(SPLASH_GRAVITY_RANGE.0, SPLASH_GRAVITY_RANGE.1);
        }
    }

    pub fn slide_damping(&mut self, value: Real) {
        if value.is_finite() {
            self.wave.damping_factor = value.clamp(DAMPING_RANGE.0, DAMPING_RANGE.1);
        }
    }

    pub fn slide_drop_radius(&mut self, value: Real) {
        if value.is_finite() {
            self.drop.radius = value.clamp(DROP_RADIUS_RANGE.0, DROP_RADIUS_RANGE.1);
        }
    }
}

fn reject(error: ConfigError) -> ConfigError {
    warn!("rejected update: {error}");
    error
}

fn check_range(field: &'static str, value: Real, min: Real, max: Real) -> ConfigResult<Real> {
    if value.is_finite() && (min..=max).contains(&value) {
        Ok(value)
    } else {
        Err(reject(ConfigError::OutOfRange {
            field,
            value,
            min,
            max,
        }))
    }
}

fn parse_field(field: &'static str, text: &str) -> ConfigResult<Option<Real>> {
    let text = text.trim();
    if text.is_empty() {
        return Ok(None);
    }
    match text.parse::<Real>() {
        Ok(value) if value.is_finite() => Ok(Some(value)),
        _ => Err(reject(ConfigError::NotANumber {
            field,
            input: text.to_owned(),
        })),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn non_numeric_input_keeps_previous_values() {
        let mut params = SimParams::default();
        let before = params.clone();

        let err = params.apply_drop_input("4x5", "20").unwrap_err();
        assert!(matches!(err, ConfigError::NotANumber { field: "drop_angle", .. }));
        assert_eq!(params, before);

        let err = params.apply_drop_input("30", "abc").unwrap_err();
        assert_eq!(err.field(), "drop_radius");
        assert_eq!(params, before);
    }

    #[test]
    fn out_of_range_input_is_rejected_atomically() {
        let mut params = SimParams::default();
        assert!(params.apply_drop_input("30", "150").is_err());
        assert_eq!(params.drop.angle, DROP_ANGLE);
        assert_eq!(params.drop.radius, DROP_RADIUS);

        assert!(params.set_drop_angle(91.0).is_err());
        assert!(params.set_drop_radius(4.9).is_err());
        assert!(params.set_damping_factor(Real::NAN).is_err());
        assert_eq!(params, SimParams::default());
    }

    #[test]
    fn empty_input_keeps_current_value() {
        let mut params = SimParams::default();
        params.apply_drop_input("", " 40 ").unwrap();
        assert_eq!(params.drop.angle, DROP_ANGLE);
        assert_eq!(params.drop.radius, 40.0);

        params.apply_drop_input("60.5", "").unwrap();
        assert_eq!(params.drop.angle, 60.5);
        assert_eq!(params.drop.radius, 40.0);
    }

    #[test]
    fn sliders_clamp_to_their_ranges() {
        let mut params = SimParams::default();
        params.slide_damping(0.5);
        assert_eq!(params.wave.damping_factor, DAMPING_RANGE.0);
        params.slide_gravity(9.0);
        assert_eq!(params.splash.gravity, SPLASH_GRAVITY_RANGE.1);
        params.slide_drop_radius(1.0);
        assert_eq!(params.drop.radius, DROP_RADIUS_RANGE.0);
    }

    #[test]
    fn grid_size_has_a_floor() {
        let mut params = SimParams::default();
        assert_eq!(
            params.set_grid_size(2),
            Err(ConfigError::InvalidGridSize(2))
        );
        assert_eq!(params.grid_size, GRID_SIZE);
        assert_eq!(SimParams::default().with_grid_size(1).grid_size, MIN_GRID_SIZE);
    }

    #[test]
    fn layout_maps_grid_to_render_space() {
        let layout = RenderLayout::default();
        let p = layout.grid_to_render(Vec2::new(96.0, 96.0), 120);
        assert_eq!(p, RENDER_OFFSET + Vec2::splat(560.0));
    }

    #[test]
    fn default_splash_expires_in_forty_ticks() {
        assert_eq!(SplashParams::default().ticks_to_expire(), 40);
    }

    #[test]
    fn rounding_residue_counts_as_expired() {
        assert!(SplashParams::is_expired(4.2e-7, 0.04));
        assert!(SplashParams::is_expired(-0.01, 0.04));
        assert!(!SplashParams::is_expired(0.04, 0.04));
        // A frozen batch never expires
        assert!(!SplashParams::is_expired(0.5, 0.0));
    }

    #[test]
    fn profile_maps_columns_onto_the_side_surface() {
        let layout = RenderLayout::default();
        let points = layout.profile_to_render(&[0.0, -3.0, 2.5, 0.0]);
        assert_eq!(points.len(), 4);
        assert_eq!(points[0], Vec2::new(RENDER_OFFSET.x, SIDE_VIEW_SURFACE));
        assert_eq!(points[1], Vec2::new(RENDER_OFFSET.x + 175.0, SIDE_VIEW_SURFACE - 3.0));
        assert_eq!(points[2].y, SIDE_VIEW_SURFACE + 2.5);
    }

    #[test]
    fn angle_steps_past_the_range_are_rejected() {
        let mut params = SimParams::default();
        params.set_drop_angle(params.drop.angle + 45.0).unwrap();
        assert_eq!(params.drop.angle, 90.0);
        assert!(params.set_drop_angle(params.drop.angle + 5.0).is_err());
        assert_eq!(params.drop.angle, 90.0);
    }
}

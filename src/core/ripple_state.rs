use bevy::prelude::*;
use rand::SeedableRng;
use rand::rngs::StdRng;

use crate::config::{SIDE_VIEW_BAND, SimParams};
use crate::error::ConfigResult;
use crate::math::{Point, Real};

use super::height_field::HeightField;
use super::impact::{DropPhase, ImpactEvent, ImpactProcessor, ImpactRing};
use super::splash::{ParticleView, SplashParticleSystem};

/// Drop state as exported to the renderer
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct DropView {
    pub grid_position: Point,
    pub render_position: Point,
    pub altitude: Real,
    pub radius: Real,
    pub phase: DropPhase,
}

/// Aggregate simulation state: height field, drop and splash, plus the
/// parameters they read each tick.
#[derive(Resource)]
pub struct RippleState {
    params: SimParams,
    height_field: HeightField,
    impact: ImpactProcessor,
    splash: SplashParticleSystem,
    rng: StdRng,
    paused: bool,
    tick_count: u64,
}

impl RippleState {
    pub fn new(params: SimParams) -> Self {
        let rng = match params.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_rng(&mut rand::rng()),
        };
        Self {
            height_field: HeightField::new(params.grid_size, params.wave),
            impact: ImpactProcessor::new(&params),
            splash: SplashParticleSystem::new(params.splash),
            rng,
            paused: false,
            tick_count: 0,
            params,
        }
    }

    pub fn params(&self) -> &SimParams {
        &self.params
    }

    /// Parameters are read at the start of every tick. A new grid size only
    /// takes effect on the next reset.
    pub fn params_mut(&mut self) -> &mut SimParams {
        &mut self.params
    }

    /// Applies the angle and size input text; see
    /// [`SimParams::apply_drop_input`].
    pub fn apply_drop_input(&mut self, angle_text: &str, size_text: &str) -> ConfigResult {
        self.params.apply_drop_input(angle_text, size_text)
    }

    pub fn height_field(&self) -> &HeightField {
        &self.height_field
    }

    pub fn height_field_mut(&mut self) -> &mut HeightField {
        &mut self.height_field
    }

    pub fn impact(&self) -> &ImpactProcessor {
        &self.impact
    }

    pub fn splash(&self) -> &SplashParticleSystem {
        &self.splash
    }

    pub fn phase(&self) -> DropPhase {
        self.impact.phase()
    }

    pub fn is_paused(&self) -> bool {
        self.paused
    }

    pub fn tick_count(&self) -> u64 {
        self.tick_count
    }

    // Commands

    pub fn start(&mut self) -> bool {
        self.sync_params();
        self.impact.start(&self.params)
    }

    /// Returns every component to its freshly constructed state. Safe at any
    /// point of the tick sequence. The pause flag is left as it is.
    pub fn reset(&mut self) {
        if self.height_field.size() != self.params.grid_size {
            self.height_field.resize(self.params.grid_size);
        } else {
            self.height_field.reset();
        }
        self.impact.reset(&self.params);
        self.splash.clear();
        if let Some(seed) = self.params.seed {
            self.rng = StdRng::seed_from_u64(seed);
        }
        self.tick_count = 0;
        self.sync_params();
        info!("simulation reset ({0}x{0} grid)", self.params.grid_size);
    }

    pub fn restart(&mut self) -> bool {
        self.reset();
        self.start()
    }

    pub fn pause(&mut self) {
        self.paused = true;
    }

    pub fn resume(&mut self) {
        self.paused = false;
    }

    pub fn toggle_pause(&mut self) {
        self.paused = !self.paused;
    }

    // Tick stages, run in this order

    /// Copies the external parameters into the components
    pub fn sync_params(&mut self) {
        self.height_field.set_params(self.params.wave);
        self.splash.set_params(self.params.splash);
    }

    pub fn advance_drop(&mut self) -> Option<ImpactEvent> {
        if self.paused {
            return None;
        }
        self.impact.advance(
            &self.params,
            &mut self.height_field,
            &mut self.splash,
            &mut self.rng,
        )
    }

    pub fn integrate_waves(&mut self) {
        if self.paused {
            return;
        }
        self.height_field.step();
    }

    pub fn advance_splash(&mut self) {
        if self.paused {
            return;
        }
        self.splash.step(self.params.splash.life_decrement);
        self.tick_count += 1;
    }

    /// Runs one full tick outside of a Bevy schedule
    pub fn tick(&mut self) -> Option<ImpactEvent> {
        if self.paused {
            return None;
        }
        self.sync_params();
        let event = self.advance_drop();
        self.integrate_waves();
        self.advance_splash();
        event
    }

    // Read export

    /// Row-major snapshot of the height grid
    pub fn heights(&self) -> Vec<Real> {
        self.height_field.heights()
    }

    pub fn particles(&self) -> impl Iterator<Item = ParticleView> + '_ {
        self.splash.views()
    }

    pub fn drop_view(&self) -> DropView {
        let projectile = self.impact.projectile();
        DropView {
            grid_position: projectile.position,
            render_position: self
                .params
                .layout
                .grid_to_render(projectile.position, self.height_field.size()),
            altitude: projectile.altitude,
            radius: projectile.radius,
            phase: self.impact.phase(),
        }
    }

    pub fn impact_ring(&self) -> Option<ImpactRing> {
        self.impact.impact_ring()
    }

    /// Side-view polyline through the drop's row, averaged over a few rows
    pub fn surface_profile(&self) -> Vec<Point> {
        let row = self.impact.projectile().position.y.max(0.0) as usize;
        let profile = self.height_field.cross_section(row, SIDE_VIEW_BAND);
        self.params.layout.profile_to_render(&profile)
    }
}

impl Default for RippleState {
    fn default() -> Self {
        Self::new(SimParams::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{RENDER_OFFSET, SIDE_VIEW_SURFACE};

    fn seeded() -> RippleState {
        RippleState::new(SimParams::default().with_seed(42))
    }

    fn assert_fresh(state: &RippleState) {
        let fresh = seeded();
        assert!(state.height_field().is_at_rest());
        assert_eq!(state.height_field().size(), fresh.height_field().size());
        assert!(state.splash().is_empty());
        assert_eq!(state.drop_view(), fresh.drop_view());
        assert_eq!(state.phase(), DropPhase::Idle);
        assert!(state.impact_ring().is_none());
    }

    #[test]
    fn reset_restores_fresh_state() {
        let mut state = seeded();
        state.start();
        for _ in 0..40 {
            state.tick();
        }
        assert!(!state.splash().is_empty());
        assert!(!state.height_field().is_at_rest());

        state.reset();
        assert_fresh(&state);
    }

    #[test]
    fn reset_mid_fall_is_safe() {
        let mut state = seeded();
        state.start();
        for _ in 0..10 {
            state.tick();
        }
        state.reset();
        assert_fresh(&state);
        // The next fall still impacts
        assert!(state.start());
        let impacts = (0..30).filter_map(|_| state.tick()).count();
        assert_eq!(impacts, 1);
    }

    #[test]
    fn pause_freezes_everything() {
        let mut state = seeded();
        state.start();
        for _ in 0..26 {
            state.tick();
        }
        state.pause();
        let heights = state.heights();
        let particles: Vec<_> = state.particles().collect();
        let drop = state.drop_view();
        let ticks = state.tick_count();

        for _ in 0..10 {
            assert!(state.tick().is_none());
        }
        assert_eq!(state.heights(), heights);
        assert_eq!(state.particles().collect::<Vec<_>>(), particles);
        assert_eq!(state.drop_view(), drop);
        assert_eq!(state.tick_count(), ticks);

        state.resume();
        state.tick();
        assert_ne!(state.heights(), heights);
    }

    #[test]
    fn restart_begins_a_new_fall() {
        let mut state = seeded();
        state.start();
        for _ in 0..30 {
            state.tick();
        }
        assert_eq!(state.phase(), DropPhase::Impacted);
        assert!(!state.start());

        assert!(state.restart());
        assert_eq!(state.phase(), DropPhase::Falling);
        assert!(state.splash().is_empty());
        assert!(state.height_field().is_at_rest());
    }

    #[test]
    fn seeded_reset_replays_the_same_splash() {
        let mut fresh = seeded();
        fresh.start();
        for _ in 0..30 {
            fresh.tick();
        }

        let mut state = seeded();
        state.start();
        for _ in 0..30 {
            state.tick();
        }
        state.reset();
        state.start();
        for _ in 0..30 {
            state.tick();
        }

        assert_eq!(
            state.particles().collect::<Vec<_>>(),
            fresh.particles().collect::<Vec<_>>()
        );
        assert_eq!(state.heights(), fresh.heights());
    }

    #[test]
    fn surface_profile_tracks_the_drop_row() {
        let mut state = seeded();
        let flat = state.surface_profile();
        assert_eq!(flat.len(), 120);
        assert!(flat.iter().all(|point| point.y == SIDE_VIEW_SURFACE));
        assert_eq!(flat[0].x, RENDER_OFFSET.x);

        state.start();
        for _ in 0..30 {
            state.tick();
        }
        let rippled = state.surface_profile();
        assert!(rippled.iter().any(|point| point.y != SIDE_VIEW_SURFACE));
    }

    #[test]
    fn grid_size_change_applies_on_reset() {
        let mut state = seeded();
        state.params_mut().set_grid_size(40).unwrap();
        assert_eq!(state.height_field().size(), 120);
        state.reset();
        assert_eq!(state.height_field().size(), 40);
        assert_eq!(state.heights().len(), 1600);
    }

    #[test]
    fn rejected_input_leaves_drop_untouched() {
        let mut state = seeded();
        let before = state.params().clone();
        assert!(state.apply_drop_input("ninety", "20").is_err());
        assert_eq!(*state.params(), before);
        state.start();
        assert_eq!(state.drop_view().grid_position, Vec2::new(96.0, 96.0));
    }
}

use bevy::prelude::*;

use ripple2d::math::lerp;
use ripple2d::{DropPhase, RipplePlugin, RippleState};

/// Centre of the render-space canvas (y-down)
const VIEW_CENTER: Vec2 = Vec2::new(600.0, 400.0);
/// Draw every n-th cell in each direction
const CELL_STRIDE: usize = 2;
const HEIGHT_COLOR_RANGE: f32 = 2.0;

const RADIUS_STEP: f32 = 1.0;
const ANGLE_STEP: f32 = 5.0;
const DAMPING_STEP: f32 = 0.001;
const GRAVITY_STEP: f32 = 0.05;
const HIGHLIGHT: f32 = 0.3;

/// Top-down height map or side cross-section
#[derive(Resource, Default)]
struct ViewMode {
    side: bool,
}

fn render_to_world(point: Vec2) -> Vec2 {
    Vec2::new(point.x - VIEW_CENTER.x, VIEW_CENTER.y - point.y)
}

fn height_color(height: f32, shade: f32) -> Color {
    let t = ((height / HEIGHT_COLOR_RANGE).clamp(-1.0, 1.0) + 1.0) * 0.5;
    let highlight = HIGHLIGHT * shade;
    Color::srgb(
        (lerp(0.05, 0.55, t) + highlight).min(1.0),
        (lerp(0.2, 0.8, t) + highlight).min(1.0),
        (lerp(0.55, 1.0, t) + highlight).min(1.0),
    )
}

fn init(mut commands: Commands) {
    commands.spawn(Camera2d);
    info!(
        "controls: Space start, R reset, T restart, P pause, V view, Up/Down radius, Left/Right angle, [/] damping, -/= gravity"
    );
}

fn controls(
    input: Res<ButtonInput<KeyCode>>,
    mut state: ResMut<RippleState>,
    mut view: ResMut<ViewMode>,
) {
    if input.just_pressed(KeyCode::KeyV) {
        view.side = !view.side;
    }
    if input.just_pressed(KeyCode::Space) {
        state.start();
    }
    if input.just_pressed(KeyCode::KeyR) {
        state.reset();
    }
    if input.just_pressed(KeyCode::KeyT) {
        state.restart();
    }
    if input.just_pressed(KeyCode::KeyP) {
        state.toggle_pause();
        info!("paused: {}", state.is_paused());
    }

    let params = state.params_mut();
    if input.just_pressed(KeyCode::ArrowUp) {
        let radius = params.drop.radius + RADIUS_STEP;
        params.slide_drop_radius(radius);
    }
    if input.just_pressed(KeyCode::ArrowDown) {
        let radius = params.drop.radius - RADIUS_STEP;
        params.slide_drop_radius(radius);
    }
    if input.just_pressed(KeyCode::ArrowLeft) || input.just_pressed(KeyCode::ArrowRight) {
        let step = if input.just_pressed(KeyCode::ArrowLeft) {
            -ANGLE_STEP
        } else {
            ANGLE_STEP
        };
        let angle = params.drop.angle + step;
        // Rejected angles are logged by the setter and the old angle stays
        params.set_drop_angle(angle).ok();
    }
    if input.just_pressed(KeyCode::BracketLeft) {
        let damping = params.wave.damping_factor - DAMPING_STEP;
        params.slide_damping(damping);
    }
    if input.just_pressed(KeyCode::BracketRight) {
        let damping = params.wave.damping_factor + DAMPING_STEP;
        params.slide_damping(damping);
    }
    if input.just_pressed(KeyCode::Minus) {
        let gravity = params.splash.gravity - GRAVITY_STEP;
        params.slide_gravity(gravity);
    }
    if input.just_pressed(KeyCode::Equal) {
        let gravity = params.splash.gravity + GRAVITY_STEP;
        params.slide_gravity(gravity);
    }
}

fn draw_surface(state: Res<RippleState>, view: Res<ViewMode>, mut gizmos: Gizmos) {
    if view.side {
        let profile = state.surface_profile().into_iter().map(render_to_world);
        gizmos.linestrip_2d(profile, Color::srgb(0.7, 0.86, 1.0));
        return;
    }

    let field = state.height_field();
    let size = field.size();
    let layout = state.params().layout;
    let cell = Vec2::splat(layout.cell_size(size) * CELL_STRIDE as f32 * 0.9);

    for j in (0..size).step_by(CELL_STRIDE) {
        for i in (0..size).step_by(CELL_STRIDE) {
            let point = layout.grid_to_render(Vec2::new(i as f32, j as f32), size);
            gizmos.rect_2d(
                render_to_world(point),
                cell,
                height_color(field.height_at(i, j), field.shade(i, j)),
            );
        }
    }
}

fn draw_drop(state: Res<RippleState>, view: Res<ViewMode>, mut gizmos: Gizmos) {
    let drop = state.drop_view();
    if drop.phase == DropPhase::Falling {
        let point = if view.side {
            Vec2::new(
                drop.render_position.x,
                state.params().layout.side_surface - drop.altitude,
            )
        } else {
            drop.render_position - Vec2::Y * drop.altitude
        };
        gizmos.circle_2d(
            render_to_world(point),
            drop.radius * 0.5,
            Color::srgb(0.6, 0.8, 1.0),
        );
    }

    if let Some(ring) = state.impact_ring().filter(|_| !view.side) {
        gizmos.circle_2d(
            render_to_world(ring.center),
            ring.radius,
            Color::srgba(0.8, 0.9, 1.0, ring.alpha),
        );
    }
}

fn draw_splash(state: Res<RippleState>, mut gizmos: Gizmos) {
    for particle in state.particles() {
        gizmos.circle_2d(
            render_to_world(particle.position),
            particle.size * 0.5,
            Color::srgba(0.7, 0.85, 1.0, particle.alpha()),
        );
    }
}

fn main() {
    App::new()
        .add_plugins(DefaultPlugins)
        .add_plugins(RipplePlugin::default())
        .init_resource::<ViewMode>()
        .add_systems(Startup, init)
        .add_systems(Update, (controls, draw_surface, draw_drop, draw_splash).chain())
        .run();
}

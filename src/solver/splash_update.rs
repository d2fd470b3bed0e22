use bevy::prelude::*;

use crate::core::RippleState;

/// Splash stage: ballistic motion, floor bounce and expiry.
pub fn splash_update(mut state: ResMut<RippleState>) {
    state.advance_splash();
}

pub fn log_ripple_diagnostics(state: Res<RippleState>, mut tick: Local<u32>) {
    const SAMPLE_PERIOD: u32 = 120;

    if state.is_paused() {
        return;
    }
    if *tick % SAMPLE_PERIOD == 0 {
        let field = state.height_field();
        debug!(
            "tick {}: phase={:?} max|h|={:.4} energy={:.4} particles={}",
            state.tick_count(),
            state.phase(),
            field.max_abs_height(),
            field.total_energy(),
            state.splash().len()
        );
    }
    *tick = tick.wrapping_add(1);
}

use bevy::prelude::*;

use crate::core::RippleState;

/// Copies the current `SimParams` into the field and the splash before any
/// stage reads them.
pub fn sync_params(mut state: ResMut<RippleState>) {
    state.sync_params();
}

/// Drop stage: moves the drop and, on the tick it lands, injects the impulse
/// and emits the splash.
pub fn drop_update(mut state: ResMut<RippleState>) {
    if let Some(event) = state.advance_drop() {
        debug!(
            "impact injected {:.3} velocity into the field, ring at ({:.0}, {:.0})",
            event.injected, event.render_point.x, event.render_point.y
        );
    }
}

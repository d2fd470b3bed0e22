use bevy::prelude::*;

use crate::core::RippleState;

/// Wave stage: one explicit step of the spring-coupled height field.
pub fn grid_update(mut state: ResMut<RippleState>) {
    state.integrate_waves();
}

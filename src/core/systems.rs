//! Core domain: setup and runtime tweaks.

use bevy::prelude::*;

#[cfg(feature = "dev-tools")]
use crate::core::SimulationClock;

pub(crate) fn setup_camera(mut commands: Commands) {
    commands.spawn(Camera2d);
}

/// F2 freezes the simulation, F3 runs it at quarter speed, F4 restores it.
#[cfg(feature = "dev-tools")]
pub(crate) fn handle_time_scale_hotkeys(
    keyboard: Res<ButtonInput<KeyCode>>,
    mut clock: ResMut<SimulationClock>,
) {
    let scale = if keyboard.just_pressed(KeyCode::F2) {
        0.0
    } else if keyboard.just_pressed(KeyCode::F3) {
        0.25
    } else if keyboard.just_pressed(KeyCode::F4) {
        1.0
    } else {
        return;
    };

    clock.time_scale = scale;
    info!("[DEBUG] Time scale set to {}", scale);
}

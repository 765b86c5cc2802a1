//! Core domain: camera, simulation clock and shared wiring.

mod resources;
mod systems;

#[cfg(test)]
mod tests;

pub use resources::SimulationClock;

use bevy::prelude::*;

use crate::core::systems::setup_camera;

pub struct CorePlugin;

impl Plugin for CorePlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<SimulationClock>()
            .add_systems(Startup, setup_camera);

        #[cfg(feature = "dev-tools")]
        app.add_systems(Update, systems::handle_time_scale_hotkeys);
    }
}

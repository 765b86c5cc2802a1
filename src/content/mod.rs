//! Content domain: data-driven movement tuning loaded from RON.

mod loader;
mod validation;

#[cfg(test)]
mod tests;

pub use loader::load_movement_tuning;
pub use validation::validate_tuning;

use bevy::prelude::*;
use std::path::Path;

use crate::movement::MovementTuning;

/// Directory holding the RON data files.
pub const DATA_DIR: &str = "assets/data";

pub struct ContentPlugin;

impl Plugin for ContentPlugin {
    fn build(&self, app: &mut App) {
        app.add_systems(Startup, load_movement_content);
    }
}

/// Replaces the default tuning with the one on disk. Any load or validation
/// error keeps the defaults.
fn load_movement_content(mut commands: Commands) {
    let tuning = match load_movement_tuning(Path::new(DATA_DIR)) {
        Ok(tuning) => tuning,
        Err(e) => {
            warn!("{}; using default movement tuning", e);
            return;
        }
    };

    let errors = validate_tuning(&tuning);
    if !errors.is_empty() {
        for error in &errors {
            error!("Tuning validation: {}", error);
        }
        warn!(
            "{} tuning error(s); using default movement tuning",
            errors.len()
        );
        commands.insert_resource(MovementTuning::default());
        return;
    }

    info!(
        "Movement tuning loaded (max jump height {:.1})",
        tuning.max_jump_height()
    );
    commands.insert_resource(tuning);
}

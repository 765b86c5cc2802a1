//! Movement domain: locomotion, mag-grip climbing and plugin wiring.

mod character;
mod climb;
pub(crate) mod collision;
mod components;
mod context;
mod events;
mod locomotion;
mod query;
mod resources;
mod state;
mod systems;

#[cfg(feature = "dev-tools")]
mod dev;

#[cfg(test)]
mod test_support;

pub use character::Character;
pub use climb::ClimbEngine;
pub use components::{Facing, GameLayer, Ground, Player, Wall};
pub use context::{MovementObserver, TickContext};
pub use events::{CeilingTouchedEvent, FacingChangedEvent, WallTouchedEvent};
pub use locomotion::Locomotion;
pub use query::{CollisionQuery, LevelQuery, SurfaceHit};
pub use resources::{MovementInput, MovementTuning};
pub use state::{CharacterState, ClimbState, ColliderId, MasterState, MoveState};

use bevy::prelude::*;

use crate::movement::systems::{apply_facing_to_sprite, read_input, simulate_characters};

pub struct MovementPlugin;

impl Plugin for MovementPlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<MovementTuning>()
            .init_resource::<MovementInput>()
            .add_message::<FacingChangedEvent>()
            .add_message::<WallTouchedEvent>()
            .add_message::<CeilingTouchedEvent>()
            .add_systems(Update, read_input)
            .add_systems(FixedUpdate, simulate_characters)
            .add_systems(Update, apply_facing_to_sprite);

        #[cfg(feature = "dev-tools")]
        app.add_systems(Startup, (dev::spawn_test_room, dev::spawn_player));
    }
}

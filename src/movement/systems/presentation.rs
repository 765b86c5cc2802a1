//! Movement domain: presentation reactions to movement messages.

use bevy::ecs::message::MessageReader;
use bevy::prelude::*;

use crate::movement::{Facing, FacingChangedEvent};

pub(crate) fn apply_facing_to_sprite(
    mut events: MessageReader<FacingChangedEvent>,
    mut sprites: Query<&mut Sprite>,
) {
    for event in events.read() {
        if let Ok(mut sprite) = sprites.get_mut(event.entity) {
            sprite.flip_x = event.facing == Facing::Left;
        }
    }
}

//! Movement domain: fixed-step simulation of every character.

use bevy::ecs::message::MessageWriter;
use bevy::prelude::*;

use crate::core::SimulationClock;
use crate::movement::events::{MovementNotice, Notices};
use crate::movement::{
    CeilingTouchedEvent, Character, FacingChangedEvent, LevelQuery, MovementInput, MovementTuning,
    Player, TickContext, WallTouchedEvent,
};

pub(crate) fn simulate_characters(
    time: Res<Time>,
    clock: Res<SimulationClock>,
    tuning: Res<MovementTuning>,
    mut input: ResMut<MovementInput>,
    level: LevelQuery,
    mut characters: Query<(Entity, &mut Character, &mut Transform), With<Player>>,
    mut facing_events: MessageWriter<FacingChangedEvent>,
    mut wall_events: MessageWriter<WallTouchedEvent>,
    mut ceiling_events: MessageWriter<CeilingTouchedEvent>,
) {
    if clock.is_paused() {
        return;
    }
    let dt = clock.scaled(time.delta_secs());

    for (entity, mut character, mut transform) in &mut characters {
        let world = level.for_character(entity);
        let mut notices = Notices::default();
        {
            let mut ctx = TickContext {
                input: &mut *input,
                world: &world,
                observer: &mut notices,
                tuning: &*tuning,
                dt,
            };
            character.tick(&mut ctx);
        }

        let position = character.state.position;
        transform.translation.x = position.x;
        transform.translation.y = position.y;

        for notice in notices.entries {
            match notice {
                MovementNotice::Facing(facing) => {
                    facing_events.write(FacingChangedEvent { entity, facing });
                }
                MovementNotice::Wall(wall) => {
                    wall_events.write(WallTouchedEvent { entity, wall });
                }
                MovementNotice::Ceiling(ceiling) => {
                    ceiling_events.write(CeilingTouchedEvent { entity, ceiling });
                }
            }
        }
    }

    // Edge triggers last exactly one fixed tick.
    input.jump_just_pressed = false;
    input.climb_just_pressed = false;
}

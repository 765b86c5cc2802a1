//! Movement domain: one character's state and the engines that drive it.

use bevy::prelude::*;

use crate::movement::{CharacterState, ClimbEngine, Locomotion, MasterState, TickContext};

/// A simulated character. Exactly one of locomotion, climbing or a ledge
/// transition moves it on any tick.
#[derive(Component, Debug, Clone)]
pub struct Character {
    pub state: CharacterState,
    pub locomotion: Locomotion,
    pub climb: ClimbEngine,
}

impl Character {
    pub fn new(position: Vec2, half_extents: Vec2, climb_upgrade: bool) -> Self {
        Self {
            state: CharacterState::new(position, half_extents),
            locomotion: Locomotion::default(),
            climb: ClimbEngine::new(climb_upgrade),
        }
    }

    pub fn tick(&mut self, ctx: &mut TickContext) {
        if ctx.dt <= 0.0 {
            return;
        }
        self.climb.tick_timers(ctx);

        if self.state.ledge.ledge_climb_in_progress {
            self.climb.tick_transition(&mut self.state, ctx);
            return;
        }

        match self.state.master_state {
            MasterState::Default => {
                let contacts = self.locomotion.tick(&mut self.state, ctx);
                // A wall the character runs into mid-air is offered to the
                // climb engine, which applies its own grab rules.
                if let Some(wall) = contacts.wall {
                    if !self.state.on_ground {
                        self.climb.initiate_wall_grab(&mut self.state, &wall, ctx);
                    }
                }
                if ctx.input.climb_just_pressed && self.state.master_state == MasterState::Default
                {
                    self.climb.climb_from_ledge(&mut self.state, ctx);
                }
            }
            MasterState::Climbing => self.climb.tick(&mut self.state, ctx),
        }
    }
}

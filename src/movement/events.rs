//! Movement domain: messages republished from movement ticks.

use bevy::ecs::message::Message;
use bevy::prelude::*;

use crate::movement::{ColliderId, Facing, MovementObserver, SurfaceHit};

#[derive(Debug)]
pub struct FacingChangedEvent {
    pub entity: Entity,
    pub facing: Facing,
}

impl Message for FacingChangedEvent {}

#[derive(Debug)]
pub struct WallTouchedEvent {
    pub entity: Entity,
    pub wall: ColliderId,
}

impl Message for WallTouchedEvent {}

#[derive(Debug)]
pub struct CeilingTouchedEvent {
    pub entity: Entity,
    pub ceiling: ColliderId,
}

impl Message for CeilingTouchedEvent {}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum MovementNotice {
    Facing(Facing),
    Wall(ColliderId),
    Ceiling(ColliderId),
}

/// Collects one tick's notifications so they can be written as messages once
/// the character borrow ends.
#[derive(Debug, Default)]
pub(crate) struct Notices {
    pub(crate) entries: Vec<MovementNotice>,
}

impl MovementObserver for Notices {
    fn facing_changed(&mut self, facing: Facing) {
        self.entries.push(MovementNotice::Facing(facing));
    }

    fn touched_wall(&mut self, wall: &SurfaceHit) {
        self.entries.push(MovementNotice::Wall(wall.id));
    }

    fn touched_ceiling(&mut self, ceiling: &SurfaceHit) {
        self.entries.push(MovementNotice::Ceiling(ceiling.id));
    }
}

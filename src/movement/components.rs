//! Movement domain: components and physics layers for locomotion.

use avian2d::prelude::*;
use bevy::prelude::*;

/// Physics layers for collision filtering
#[derive(PhysicsLayer, Clone, Copy, Debug, Default)]
pub enum GameLayer {
    #[default]
    Default,
    /// Ground surfaces (floors, platforms)
    Ground,
    /// Wall surfaces (climbable with mag-grip)
    Wall,
    /// Player character
    Player,
}

impl GameLayer {
    /// Mask used by every movement cast: anything that blocks a character.
    pub fn all_collision() -> LayerMask {
        [GameLayer::Ground, GameLayer::Wall].into()
    }
}

#[derive(Component, Debug)]
pub struct Player;

/// Marker for ground colliders
#[derive(Component, Debug)]
pub struct Ground;

/// Marker for wall colliders
#[derive(Component, Debug)]
pub struct Wall;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Facing {
    #[default]
    Right,
    Left,
}

impl Facing {
    /// Returns the facing as a signed unit: `1.0` right, `-1.0` left.
    pub fn sign(self) -> f32 {
        match self {
            Facing::Right => 1.0,
            Facing::Left => -1.0,
        }
    }

    /// Facing for a signed value. Zero is treated as right.
    pub fn from_sign(value: f32) -> Self {
        if value < 0.0 {
            Facing::Left
        } else {
            Facing::Right
        }
    }
}

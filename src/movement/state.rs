//! Movement domain: per-character state shared by both engines.

use bevy::prelude::*;

use crate::movement::Facing;

/// Selects which engine drives a character this tick.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum MasterState {
    #[default]
    Default,
    Climbing,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum MoveState {
    /// Only entered when forced from outside (cutscenes).
    Walking,
    #[default]
    Sneaking,
    Running,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ClimbState {
    #[default]
    NotClimbing,
    WallClimb,
    /// Reserved; no behaviour is attached yet.
    CeilingClimb,
}

/// Identity of a level collider as reported by the collision backend.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ColliderId(pub u64);

/// Ledge flags, re-derived from geometry every tick.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct LedgeFlags {
    pub looking_over_ledge: bool,
    pub against_the_ledge: bool,
    pub ledge_climb_in_progress: bool,
}

impl LedgeFlags {
    pub fn clear(&mut self) {
        *self = Self::default();
    }
}

/// Registers of the scripted quadratic Bezier move used by ledge vaults.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct BezierTransition {
    pub start: Vec2,
    pub end: Vec2,
    pub control: Vec2,
    /// Normalized progress in `[0, 1]`.
    pub distance: f32,
}

impl BezierTransition {
    pub fn point_at(&self, t: f32) -> Vec2 {
        quadratic_bezier(self.start, self.control, self.end, t)
    }
}

/// `lerp(lerp(start, control, t), lerp(control, end, t), t)`.
pub fn quadratic_bezier(start: Vec2, control: Vec2, end: Vec2, t: f32) -> Vec2 {
    let a = start.lerp(control, t);
    let b = control.lerp(end, t);
    a.lerp(b, t)
}

/// Physics and state registers of one character.
#[derive(Debug, Clone)]
pub struct CharacterState {
    /// Collider center in world space.
    pub position: Vec2,
    /// World units per second; a tick moves the character by `velocity * dt`.
    pub velocity: Vec2,
    /// Half size of the axis-aligned collider used for every cast.
    pub half_extents: Vec2,
    pub on_ground: bool,
    pub is_jumping: bool,
    pub jump_turned: bool,
    /// Seconds since the current jump started.
    pub jump_input_time: f32,
    /// Remaining coyote window; a jump is allowed while positive.
    pub jump_grace_time: f32,
    pub facing: Facing,
    /// Signed horizontal acceleration picked from input and state.
    pub character_accel: f32,
    pub master_state: MasterState,
    pub move_state: MoveState,
    pub ledge: LedgeFlags,
    pub bezier: BezierTransition,
}

impl CharacterState {
    pub fn new(position: Vec2, half_extents: Vec2) -> Self {
        Self {
            position,
            velocity: Vec2::ZERO,
            half_extents,
            on_ground: false,
            is_jumping: false,
            jump_turned: false,
            jump_input_time: 0.0,
            jump_grace_time: 0.0,
            facing: Facing::Right,
            character_accel: 0.0,
            master_state: MasterState::Default,
            move_state: MoveState::Sneaking,
            ledge: LedgeFlags::default(),
            bezier: BezierTransition::default(),
        }
    }

    /// World-space bounds of the collider.
    pub fn bounds(&self) -> Rect {
        Rect::from_center_half_size(self.position, self.half_extents)
    }

    pub fn height(&self) -> f32 {
        self.half_extents.y * 2.0
    }

    /// Drops any active jump and its timers.
    pub fn reset_jump(&mut self) {
        self.is_jumping = false;
        self.jump_turned = false;
        self.jump_input_time = 0.0;
        self.jump_grace_time = 0.0;
    }

    /// Starts a jump: lift begins next vertical update.
    pub fn start_jump(&mut self) {
        self.is_jumping = true;
        self.on_ground = false;
        self.jump_input_time = 0.0;
        self.jump_grace_time = 0.0;
    }

    pub fn can_jump(&self) -> bool {
        self.on_ground || self.jump_grace_time > 0.0
    }
}

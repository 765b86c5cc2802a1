//! Movement domain: tuning and input resources.

use bevy::prelude::*;
use serde::{Deserialize, Serialize};

/// Movement constants. Speeds are world units per second, times in seconds.
///
/// Loaded from `assets/data/movement.ron` at startup; any field missing from
/// the file keeps its default.
#[derive(Resource, Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct MovementTuning {
    pub walk_speed: f32,
    pub sneak_speed: f32,
    pub run_speed: f32,
    /// Horizontal acceleration magnitude used while running and in the air.
    pub acceleration: f32,
    /// Ground deceleration when input stops or reverses.
    pub drag: f32,
    /// Air deceleration when there is no horizontal input.
    pub air_drag: f32,
    pub gravity: f32,
    /// Upward speed held while a jump is active.
    pub jump_speed: f32,
    /// A jump lasts at least this long, even on a tap.
    pub jump_duration_min: f32,
    /// Holding jump keeps lifting until this much time has elapsed.
    pub jump_control_time: f32,
    /// Coyote window after walking off a ledge.
    pub jump_grace_period: f32,
    pub jump_horizontal_min: f32,
    pub jump_horizontal_max: f32,
    /// Per-axis velocity ceilings.
    pub max_velocity_x: f32,
    pub max_velocity_y: f32,
    /// Gap kept between the collider and any surface.
    pub skin_width: f32,
    /// How much shorter the horizontal probes are while grounded, so the
    /// floor is never reported as a wall.
    pub ground_probe_inset: f32,
    /// Overlap with a platform corner small enough to be nudged off instead
    /// of landing.
    pub corner_save_width: f32,
    /// Drop beyond a platform edge that still counts as continuing floor.
    pub ledge_drop_tolerance: f32,
    pub climb_speed: f32,
    pub wall_slide_speed: f32,
    /// Time after a release before another wall grab is allowed.
    pub wall_grab_delay: f32,
    /// Normalized Bezier progress per second.
    pub bezier_rate: f32,
    /// Extra height of the vault curve's control point above the landing.
    pub ledge_vault_lift: f32,
    /// How far ahead of the collider a ledge can be reached from.
    pub ledge_reach: f32,
}

impl Default for MovementTuning {
    fn default() -> Self {
        Self {
            walk_speed: 200.0,
            sneak_speed: 120.0,
            run_speed: 320.0,
            acceleration: 2400.0,
            drag: 2600.0,
            air_drag: 600.0,
            gravity: 1800.0,
            jump_speed: 420.0,
            jump_duration_min: 0.10,
            jump_control_time: 0.25,
            jump_grace_period: 0.12,
            jump_horizontal_min: 160.0,
            jump_horizontal_max: 320.0,
            max_velocity_x: 420.0,
            max_velocity_y: 900.0,
            skin_width: 1.0,
            ground_probe_inset: 4.0,
            corner_save_width: 6.0,
            ledge_drop_tolerance: 8.0,
            climb_speed: 140.0,
            wall_slide_speed: 240.0,
            wall_grab_delay: 0.15,
            bezier_rate: 5.0,
            ledge_vault_lift: 12.0,
            ledge_reach: 12.0,
        }
    }
}

impl MovementTuning {
    pub fn max_velocity(&self) -> Vec2 {
        Vec2::new(self.max_velocity_x, self.max_velocity_y)
    }

    /// Horizontal speed imparted by a wall kick.
    pub fn wall_kick_speed(&self) -> f32 {
        (self.jump_horizontal_min + self.jump_horizontal_max) * 0.5
    }

    /// Height gained by a jump held for the full control time, followed by
    /// the ballistic arc. Uses `h = v * t + v^2 / (2g)`.
    pub fn max_jump_height(&self) -> f32 {
        self.jump_speed * self.jump_control_time
            + self.jump_speed * self.jump_speed / (2.0 * self.gravity)
    }
}

/// The per-tick input contract the engines read.
#[derive(Resource, Debug, Default, Clone)]
pub struct MovementInput {
    /// Horizontal and vertical axes, each in `[-1, 1]`.
    pub axis: Vec2,
    pub jump_just_pressed: bool,
    pub jump_held: bool,
    pub run_held: bool,
    /// Edge trigger for climbing onto a ledge from a hang.
    pub climb_just_pressed: bool,
    /// Asserted by the climb engine during scripted transitions; while set the
    /// input reader must not route device input.
    pub input_override: bool,
}

impl MovementInput {
    /// Marks the jump press of this tick as used.
    pub fn consume_jump(&mut self) {
        self.jump_just_pressed = false;
    }

    /// Clears device-driven fields while keeping the override flag.
    pub fn neutral(&mut self) {
        self.axis = Vec2::ZERO;
        self.jump_just_pressed = false;
        self.jump_held = false;
        self.run_held = false;
        self.climb_just_pressed = false;
    }
}

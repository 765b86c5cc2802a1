//! Movement domain: collision resolution and velocity helpers shared by the
//! locomotion and climb engines.

use bevy::prelude::*;

use crate::movement::{CharacterState, GameLayer, MovementTuning, SurfaceHit, TickContext};

/// Anything below this is treated as touching.
pub const CONTACT_EPSILON: f32 = 1e-3;

/// Values that vanish when added to this offset are snapped to zero.
const PRECISION_SENTINEL: f32 = 100_000.0;

/// Zeroes values too small to survive being added to a large offset, so
/// drift never accumulates around zero.
pub fn snap_negligible(value: f32) -> f32 {
    if (value + PRECISION_SENTINEL) - PRECISION_SENTINEL == 0.0 {
        0.0
    } else {
        value
    }
}

/// Moves `current` toward `target` by at most `max_delta`.
pub fn move_toward(current: f32, target: f32, max_delta: f32) -> f32 {
    if (target - current).abs() <= max_delta {
        target
    } else {
        current + (target - current).signum() * max_delta
    }
}

/// Sign with an explicit zero, unlike `f32::signum`.
pub fn axis_sign(value: f32) -> f32 {
    if value > 0.0 {
        1.0
    } else if value < 0.0 {
        -1.0
    } else {
        0.0
    }
}

/// Velocity that covers exactly `displacement` in one tick.
fn velocity_for(displacement: f32, dt: f32) -> f32 {
    if dt > 0.0 { displacement / dt } else { 0.0 }
}

fn axis_dir(axis: Vec2) -> Dir2 {
    if axis.x > 0.0 {
        Dir2::X
    } else if axis.x < 0.0 {
        Dir2::NEG_X
    } else if axis.y > 0.0 {
        Dir2::Y
    } else {
        Dir2::NEG_Y
    }
}

/// Result of sweeping one axis.
#[derive(Debug, Clone, Copy)]
pub struct AxisContact {
    pub hit: SurfaceHit,
    /// Distance to the surface after the skin margin; negative when already
    /// inside the margin.
    pub remaining: f32,
}

impl AxisContact {
    pub fn touching(&self) -> bool {
        self.remaining <= CONTACT_EPSILON
    }
}

/// Sweeps a thin box from the collider face in `direction` (`1.0` right,
/// `-1.0` left) and clamps horizontal velocity so the move stops one skin
/// width short of the surface.
///
/// While airborne the probe spans the full collider height so ledge corners
/// are caught; while grounded it is inset so the floor is never a wall.
pub fn resolve_horizontal(
    state: &mut CharacterState,
    ctx: &TickContext,
    direction: f32,
) -> Option<AxisContact> {
    let tuning = ctx.tuning;
    let skin = tuning.skin_width;
    let half = state.half_extents;
    let probe_half_height = if state.on_ground {
        half.y - tuning.ground_probe_inset
    } else {
        half.y - skin
    }
    .max(skin);

    let origin = state.position + Vec2::new(direction * (half.x - skin), 0.0);
    let displacement = state.velocity.x * ctx.dt;
    let travel = (displacement * direction).max(0.0);

    let hit = ctx.world.cast_box(
        origin,
        Vec2::new(skin, probe_half_height),
        axis_dir(Vec2::new(direction, 0.0)),
        travel + skin * 2.0,
        GameLayer::all_collision(),
    )?;

    let remaining = hit.distance - skin;
    if displacement * direction > remaining {
        state.velocity.x = velocity_for(remaining * direction, ctx.dt);
    }
    Some(AxisContact { hit, remaining })
}

/// Upward sweep; clamps vertical velocity below a ceiling.
pub fn resolve_ceiling(state: &mut CharacterState, ctx: &TickContext) -> Option<AxisContact> {
    let skin = ctx.tuning.skin_width;
    let half = state.half_extents;
    let origin = state.position + Vec2::new(0.0, half.y - skin);
    let displacement = state.velocity.y * ctx.dt;

    let hit = ctx.world.cast_box(
        origin,
        Vec2::new((half.x - skin).max(skin), skin),
        Dir2::Y,
        displacement.max(0.0) + skin * 2.0,
        GameLayer::all_collision(),
    )?;

    let remaining = hit.distance - skin;
    if displacement > remaining {
        state.velocity.y = velocity_for(remaining, ctx.dt);
    }
    Some(AxisContact { hit, remaining })
}

/// Downward sweep from the feet. Only reports the floor; callers decide
/// whether the contact is a landing.
pub fn probe_floor(state: &CharacterState, ctx: &TickContext) -> Option<AxisContact> {
    let skin = ctx.tuning.skin_width;
    let half = state.half_extents;
    let origin = state.position - Vec2::new(0.0, half.y - skin);
    let displacement = state.velocity.y * ctx.dt;

    let hit = ctx.world.cast_box(
        origin,
        Vec2::new((half.x - skin).max(skin), skin),
        Dir2::NEG_Y,
        (-displacement).max(0.0) + skin * 2.0,
        GameLayer::all_collision(),
    )?;

    Some(AxisContact {
        hit,
        remaining: hit.distance - skin,
    })
}

/// Whether this tick's fall reaches the floor contact.
pub fn reaches_floor(state: &CharacterState, contact: &AxisContact, dt: f32) -> bool {
    state.velocity.y <= 0.0 && state.velocity.y * dt <= -contact.remaining + CONTACT_EPSILON
}

/// Puts the character on the floor: the fall is clamped to the remaining
/// distance (which pushes back out when inside the skin margin).
pub fn land(state: &mut CharacterState, contact: &AxisContact, dt: f32) {
    state.velocity.y = velocity_for(-contact.remaining, dt);
    state.on_ground = true;
    state.is_jumping = false;
    state.jump_turned = false;
    state.jump_grace_time = 0.0;
}

/// Clamps each axis of the velocity to the tuning's global ceiling.
pub fn clamp_velocity(velocity: Vec2, tuning: &MovementTuning) -> Vec2 {
    let max = tuning.max_velocity();
    Vec2::new(
        velocity.x.clamp(-max.x, max.x),
        velocity.y.clamp(-max.y, max.y),
    )
}

/// Applies this tick's velocity to the position.
pub fn translate(state: &mut CharacterState, dt: f32) {
    state.position += state.velocity * dt;
}

/// Whether floor continues just past `edge_x` in `direction`, within the drop
/// tolerance. Used to tell a real ledge from a seam between floor tiles.
pub fn floor_continues(
    state: &CharacterState,
    ctx: &TickContext,
    edge_x: f32,
    direction: f32,
) -> bool {
    let skin = ctx.tuning.skin_width;
    let feet = state.position.y - state.half_extents.y;
    let origin = Vec2::new(edge_x + direction * skin * 2.0, feet + skin);
    ctx.world
        .cast_ray(
            origin,
            Dir2::NEG_Y,
            ctx.tuning.ledge_drop_tolerance + skin * 2.0,
            GameLayer::all_collision(),
        )
        .is_some()
}

//! Movement domain: ground and air locomotion.
//!
//! Each tick runs in a fixed order: input interpretation, horizontal velocity,
//! vertical velocity, collision resolution, then translation (only while the
//! character is not climbing).

use bevy::prelude::*;

use crate::movement::collision::{self, AxisContact, axis_sign, move_toward, snap_negligible};
use crate::movement::{CharacterState, Facing, MasterState, MoveState, SurfaceHit, TickContext};

/// Surfaces the character was pushed against this tick.
#[derive(Debug, Default, Clone, Copy)]
pub struct Contacts {
    pub wall: Option<SurfaceHit>,
    pub ceiling: Option<SurfaceHit>,
    pub floor: Option<SurfaceHit>,
}

#[derive(Debug, Default, Clone)]
pub struct Locomotion {
    walk_forced: bool,
}

impl Locomotion {
    /// Forces `MoveState::Walking` regardless of the run button. Used by
    /// scripted sequences.
    pub fn force_walk(&mut self, forced: bool) {
        self.walk_forced = forced;
    }

    pub fn tick(&mut self, state: &mut CharacterState, ctx: &mut TickContext) -> Contacts {
        let dt = ctx.dt;
        state.jump_grace_time = (state.jump_grace_time - dt).max(0.0);

        self.interpret_input(state, ctx);
        self.update_horizontal(state, ctx);
        update_vertical(state, ctx);
        state.velocity = collision::clamp_velocity(state.velocity, ctx.tuning);
        let contacts = resolve_collisions(state, ctx);

        if state.master_state == MasterState::Default {
            collision::translate(state, dt);
        }
        contacts
    }

    fn interpret_input(&self, state: &mut CharacterState, ctx: &mut TickContext) {
        let input = &*ctx.input;
        state.move_state = if self.walk_forced {
            MoveState::Walking
        } else if input.run_held {
            MoveState::Running
        } else {
            MoveState::Sneaking
        };

        let x = input.axis.x;
        if x != 0.0 {
            state.character_accel = axis_sign(x) * ctx.tuning.acceleration;
            let wanted = Facing::from_sign(x);
            if wanted != state.facing {
                state.facing = wanted;
                if !state.on_ground {
                    state.jump_turned = true;
                }
                ctx.observer.facing_changed(wanted);
            }
        }

        if ctx.input.jump_just_pressed && state.can_jump() && !state.is_jumping {
            state.start_jump();
            ctx.input.consume_jump();
            debug!("Jump started (grace window used: {})", !state.on_ground);
        }
    }

    fn update_horizontal(&self, state: &mut CharacterState, ctx: &TickContext) {
        let tuning = ctx.tuning;
        let dt = ctx.dt;
        let x = ctx.input.axis.x;
        let vx = state.velocity.x;

        let next = if state.on_ground {
            match state.move_state {
                MoveState::Running => {
                    let pushing_along = x != 0.0 && (vx == 0.0 || axis_sign(vx) == axis_sign(x));
                    let next = if pushing_along {
                        vx + state.character_accel * dt
                    } else {
                        move_toward(vx, 0.0, tuning.drag * dt)
                    };
                    next.clamp(-tuning.run_speed, tuning.run_speed)
                }
                MoveState::Walking | MoveState::Sneaking => {
                    let speed = if state.move_state == MoveState::Walking {
                        tuning.walk_speed
                    } else {
                        tuning.sneak_speed
                    };
                    let target = speed * x;
                    if vx.abs() > speed {
                        move_toward(vx, target, tuning.drag * dt)
                    } else {
                        target
                    }
                }
            }
        } else if state.jump_turned {
            tuning.sneak_speed * axis_sign(state.character_accel)
        } else if x != 0.0 {
            (vx + state.character_accel * dt)
                .clamp(-tuning.jump_horizontal_max, tuning.jump_horizontal_max)
        } else {
            move_toward(vx, 0.0, tuning.air_drag * dt)
        };

        state.velocity.x = snap_negligible(next);
    }
}

fn update_vertical(state: &mut CharacterState, ctx: &TickContext) {
    let tuning = ctx.tuning;
    let mut vy = state.velocity.y - tuning.gravity * ctx.dt;

    if state.is_jumping {
        let elapsed = state.jump_input_time;
        if state.jump_turned && state.velocity.y >= 0.0 {
            state.is_jumping = false;
            debug!("Jump cancelled by mid-air turn at {:.3}s", elapsed);
        } else if elapsed < tuning.jump_duration_min
            || (ctx.input.jump_held && elapsed < tuning.jump_control_time)
        {
            vy = tuning.jump_speed;
        } else {
            state.is_jumping = false;
        }
        state.jump_input_time += ctx.dt;
    }

    if state.on_ground {
        vy = snap_negligible(vy);
    }
    state.velocity.y = vy;
}

fn resolve_collisions(state: &mut CharacterState, ctx: &mut TickContext) -> Contacts {
    let mut contacts = Contacts::default();

    for direction in [1.0, -1.0] {
        let moving_in = state.velocity.x * direction > 0.0;
        if let Some(contact) = collision::resolve_horizontal(state, ctx, direction) {
            if moving_in && contact.touching() {
                ctx.observer.touched_wall(&contact.hit);
                contacts.wall = Some(contact.hit);
            }
        }
    }

    let rising = state.velocity.y > 0.0;
    if let Some(contact) = collision::resolve_ceiling(state, ctx) {
        if rising && contact.touching() {
            state.is_jumping = false;
            ctx.observer.touched_ceiling(&contact.hit);
            contacts.ceiling = Some(contact.hit);
        }
    }

    contacts.floor = resolve_floor(state, ctx);
    contacts
}

/// Downward resolution: corner save, landing, coyote start and ledge stop.
fn resolve_floor(state: &mut CharacterState, ctx: &TickContext) -> Option<SurfaceHit> {
    let dt = ctx.dt;
    let was_on_ground = state.on_ground;

    let landing = collision::probe_floor(state, ctx)
        .filter(|contact| collision::reaches_floor(state, contact, dt));

    let Some(contact) = landing else {
        if was_on_ground && !state.is_jumping {
            state.jump_grace_time = ctx.tuning.jump_grace_period;
            debug!("Left ground, grace period started");
        }
        state.on_ground = false;
        state.ledge.against_the_ledge = false;
        return None;
    };

    if !was_on_ground && corner_save(state, &contact, ctx) {
        state.on_ground = false;
        return None;
    }

    if !was_on_ground {
        debug!("Landed on {:?}", contact.hit.id);
    }
    collision::land(state, &contact, dt);
    if state.move_state == MoveState::Running {
        // Air speed above the run cap is dropped on touchdown.
        let cap = ctx.tuning.run_speed;
        state.velocity.x = state.velocity.x.clamp(-cap, cap);
    }
    stop_at_ledge(state, &contact, ctx);
    Some(contact.hit)
}

/// Nudges a falling character off a platform corner it barely overlaps while
/// moving away from it. Returns whether the landing was skipped.
fn corner_save(state: &mut CharacterState, contact: &AxisContact, ctx: &TickContext) -> bool {
    let direction = axis_sign(state.velocity.x);
    if direction == 0.0 {
        return false;
    }
    let surface = contact.hit.bounds;
    let moving_away = (surface.center().x - state.position.x) * direction < 0.0;
    if !moving_away {
        return false;
    }

    let shift = state.velocity.x * ctx.dt;
    let left = state.position.x - state.half_extents.x + shift;
    let right = state.position.x + state.half_extents.x + shift;
    let overlap = right.min(surface.max.x) - left.max(surface.min.x);
    if overlap <= 0.0 || overlap > ctx.tuning.corner_save_width {
        return false;
    }

    state.position.x += direction * (overlap + ctx.tuning.skin_width);
    debug!("Corner save: nudged {:.2} off platform edge", overlap);
    true
}

/// While grounded and not running, horizontal motion stops at a real
/// platform edge.
fn stop_at_ledge(state: &mut CharacterState, contact: &AxisContact, ctx: &TickContext) {
    state.ledge.against_the_ledge = false;
    if state.move_state == MoveState::Running {
        return;
    }
    let direction = axis_sign(state.velocity.x);
    if direction == 0.0 {
        return;
    }

    let surface = contact.hit.bounds;
    let edge = if direction > 0.0 {
        surface.max.x
    } else {
        surface.min.x
    };
    let leading = state.position.x + direction * state.half_extents.x;
    let leading_after = leading + state.velocity.x * ctx.dt;
    if (leading_after - edge) * direction <= 0.0 {
        return;
    }
    if collision::floor_continues(state, ctx, edge, direction) {
        return;
    }

    let room = ((edge - leading) * direction).max(0.0);
    state.velocity.x = if ctx.dt > 0.0 {
        direction * room / ctx.dt
    } else {
        0.0
    };
    state.ledge.against_the_ledge = true;
}

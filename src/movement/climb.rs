//! Movement domain: mag-grip wall climbing, ledge look and ledge vaults.
//!
//! The climb engine owns the character while `MasterState::Climbing` is set.
//! Vaults are scripted quadratic Bezier moves; while one is in progress it
//! runs instead of either engine.

use bevy::prelude::*;

use crate::movement::collision::{self, CONTACT_EPSILON, axis_sign};
use crate::movement::{
    CharacterState, ClimbState, Facing, GameLayer, MasterState, SurfaceHit, TickContext,
};

#[derive(Debug, Clone)]
pub struct ClimbEngine {
    state: ClimbState,
    transitioning_to: ClimbState,
    /// Surface currently held or being vaulted onto.
    anchor: Option<SurfaceHit>,
    /// Seconds since the last release, capped at the grab delay.
    since_release: f32,
    upgrade_acquired: bool,
}

impl Default for ClimbEngine {
    fn default() -> Self {
        Self::new(false)
    }
}

impl ClimbEngine {
    pub fn new(upgrade_acquired: bool) -> Self {
        Self {
            state: ClimbState::NotClimbing,
            transitioning_to: ClimbState::NotClimbing,
            anchor: None,
            since_release: f32::INFINITY,
            upgrade_acquired,
        }
    }

    pub fn state(&self) -> ClimbState {
        self.state
    }

    pub fn transitioning_to(&self) -> ClimbState {
        self.transitioning_to
    }

    pub fn anchor(&self) -> Option<&SurfaceHit> {
        self.anchor.as_ref()
    }

    pub fn acquire_upgrade(&mut self) {
        self.upgrade_acquired = true;
    }

    pub fn has_upgrade(&self) -> bool {
        self.upgrade_acquired
    }

    /// Advances the re-grab delay. Runs every tick regardless of mode.
    pub fn tick_timers(&mut self, ctx: &TickContext) {
        self.since_release = (self.since_release + ctx.dt).min(ctx.tuning.wall_grab_delay);
    }

    fn grab_ready(&self, ctx: &TickContext) -> bool {
        self.since_release >= ctx.tuning.wall_grab_delay
    }

    /// Tries to grab `surface`. Requires the upgrade, an airborne character,
    /// an elapsed grab delay and a surface covering the whole collider height.
    pub fn initiate_wall_grab(
        &mut self,
        state: &mut CharacterState,
        surface: &SurfaceHit,
        ctx: &mut TickContext,
    ) -> bool {
        if !self.upgrade_acquired
            || self.state != ClimbState::NotClimbing
            || state.on_ground
            || state.ledge.ledge_climb_in_progress
            || !self.grab_ready(ctx)
        {
            return false;
        }

        let body = state.bounds();
        if surface.bounds.min.y > body.min.y || surface.bounds.max.y < body.max.y {
            return false;
        }

        state.reset_jump();
        self.state = ClimbState::WallClimb;
        state.master_state = MasterState::Climbing;

        let away = Facing::from_sign(state.position.x - surface.bounds.center().x);
        if away != state.facing {
            state.facing = away;
            ctx.observer.facing_changed(away);
        }
        state.velocity = Vec2::ZERO;
        self.anchor = Some(*surface);
        debug!("Wall grab on {:?}", surface.id);
        true
    }

    /// Releases any hold and hands the character back to locomotion. The full
    /// grab delay must elapse before the next grab.
    pub fn stop_climbing(&mut self, state: &mut CharacterState) {
        self.state = ClimbState::NotClimbing;
        self.anchor = None;
        self.since_release = 0.0;
        state.master_state = MasterState::Default;
        state.ledge.looking_over_ledge = false;
        state.ledge.against_the_ledge = false;
    }

    pub fn tick(&mut self, state: &mut CharacterState, ctx: &mut TickContext) {
        match self.state {
            ClimbState::WallClimb => self.tick_wall_climb(state, ctx),
            ClimbState::CeilingClimb | ClimbState::NotClimbing => {}
        }
    }

    fn tick_wall_climb(&mut self, state: &mut CharacterState, ctx: &mut TickContext) {
        let Some(anchor) = self.anchor else {
            ctx.observer
                .invariant_violation("wall climb active without an anchor");
            return;
        };
        let dt = ctx.dt;
        let tuning = ctx.tuning;

        let toward_wall = axis_sign(anchor.bounds.center().x - state.position.x);
        let Some(hit) = Dir2::new(Vec2::new(toward_wall, 0.0))
            .ok()
            .and_then(|dir| {
                ctx.world.cast_ray(
                    state.position,
                    dir,
                    state.half_extents.x + tuning.skin_width * 4.0,
                    GameLayer::all_collision(),
                )
            })
            .filter(|hit| hit.id == anchor.id)
        else {
            ctx.observer
                .invariant_violation("climb anchor not found beside the character");
            return;
        };
        self.anchor = Some(hit);

        let y = ctx.input.axis.y;
        let mut vy = if y > 0.0 {
            tuning.climb_speed * y
        } else if y < 0.0 {
            -tuning.wall_slide_speed
        } else {
            0.0
        };
        // Wall climbing never carries horizontal speed.
        state.velocity.x = 0.0;

        let body = state.bounds();
        let to_top = hit.bounds.max.y - body.max.y;
        let to_bottom = body.min.y - hit.bounds.min.y;
        if vy * dt > to_top {
            vy = to_top / dt;
        }
        if vy * dt < -to_bottom {
            vy = -to_bottom / dt;
        }
        state.velocity.y = vy;

        if vy < 0.0 {
            if let Some(contact) = collision::probe_floor(state, ctx)
                .filter(|contact| contact.hit.id != anchor.id)
                .filter(|contact| collision::reaches_floor(state, contact, dt))
            {
                collision::land(state, &contact, dt);
                self.stop_climbing(state);
                collision::translate(state, dt);
                debug!("Wall climb released onto ground");
                return;
            }
        }

        let moved = vy * dt;
        state.ledge.against_the_ledge =
            to_top - moved <= CONTACT_EPSILON || to_bottom + moved <= CONTACT_EPSILON;

        let x = ctx.input.axis.x;
        state.ledge.looking_over_ledge = state.ledge.against_the_ledge
            && (y != 0.0 || (x != 0.0 && axis_sign(x) == toward_wall));

        collision::translate(state, dt);

        if ctx.input.jump_just_pressed {
            ctx.input.consume_jump();
            if state.ledge.looking_over_ledge {
                self.vault_or_drop(state, ctx);
            } else {
                self.wall_kick(state, ctx);
            }
        }
    }

    fn wall_kick(&mut self, state: &mut CharacterState, ctx: &mut TickContext) {
        let wall_x = self
            .anchor
            .map(|anchor| anchor.bounds.center().x)
            .unwrap_or(state.position.x - state.facing.sign());
        self.stop_climbing(state);
        state.start_jump();

        let away = Facing::from_sign(state.position.x - wall_x);
        if away != state.facing {
            state.facing = away;
            ctx.observer.facing_changed(away);
        }
        state.character_accel = away.sign() * ctx.tuning.acceleration;
        state.velocity.x = away.sign() * ctx.tuning.wall_kick_speed();
        debug!("Wall kick, facing {:?}", away);
    }

    fn vault_or_drop(&mut self, state: &mut CharacterState, ctx: &mut TickContext) {
        let Some(anchor) = self.anchor else {
            ctx.observer
                .invariant_violation("ledge vault requested without an anchor");
            return;
        };
        let body = state.bounds();

        if (anchor.bounds.min.y - body.min.y).abs() <= CONTACT_EPSILON {
            self.stop_climbing(state);
            debug!("Dropped off the bottom of {:?}", anchor.id);
        } else if (anchor.bounds.max.y - body.max.y).abs() <= CONTACT_EPSILON {
            let toward = Facing::from_sign(anchor.bounds.center().x - state.position.x);
            self.begin_ledge_transition(state, &anchor, toward, ctx);
        } else {
            ctx.observer
                .invariant_violation("ledge look without a flush edge on the anchor");
        }
    }

    /// Climbs onto a ledge ahead of and above the character, e.g. from a hang.
    ///
    /// The ledge top is found with a downward box cast ahead of the collider
    /// and must sit above the feet, with its near edge in front. A sideways
    /// ray one body height below that top must then reach the same collider
    /// from outside it, so only ledges tall enough to hang from qualify.
    pub fn climb_from_ledge(&mut self, state: &mut CharacterState, ctx: &mut TickContext) -> bool {
        if !self.upgrade_acquired || state.ledge.ledge_climb_in_progress {
            return false;
        }
        let tuning = ctx.tuning;
        let skin = tuning.skin_width;
        let half = state.half_extents;
        let facing = state.facing.sign();
        let body = state.bounds();

        let probe_half = Vec2::new(tuning.ledge_reach * 0.5, skin);
        let origin = Vec2::new(
            state.position.x + facing * (half.x + probe_half.x),
            body.max.y + half.y,
        );
        let ledge = ctx
            .world
            .cast_box(
                origin,
                probe_half,
                Dir2::NEG_Y,
                state.height() + half.y,
                GameLayer::all_collision(),
            )
            .filter(|hit| hit.distance > 0.0);

        let side = if facing > 0.0 { Dir2::X } else { Dir2::NEG_X };
        let validated = ledge
            .filter(|ledge| ledge.bounds.max.y > body.min.y + skin)
            .filter(|ledge| (near_edge(ledge.bounds, facing) - state.position.x) * facing >= 0.0)
            .filter(|ledge| {
                let below_top =
                    Vec2::new(state.position.x, ledge.bounds.max.y - state.height() + skin);
                ctx.world
                    .cast_ray(
                        below_top,
                        side,
                        half.x + tuning.ledge_reach + skin * 2.0,
                        GameLayer::all_collision(),
                    )
                    .is_some_and(|face| face.id == ledge.id && face.distance > 0.0)
            });

        let Some(ledge) = validated else {
            state.reset_jump();
            debug!("No grabbable ledge ahead");
            return false;
        };

        let toward = state.facing;
        state.reset_jump();
        state.master_state = MasterState::Climbing;
        self.anchor = Some(ledge);
        self.begin_ledge_transition(state, &ledge, toward, ctx);
        true
    }

    /// Sets up the Bezier move onto the top of `ledge`, travelling `toward`.
    fn begin_ledge_transition(
        &mut self,
        state: &mut CharacterState,
        ledge: &SurfaceHit,
        toward: Facing,
        ctx: &mut TickContext,
    ) {
        let tuning = ctx.tuning;
        let half = state.half_extents;
        let sign = toward.sign();
        let end = Vec2::new(
            near_edge(ledge.bounds, sign) + sign * (half.x + tuning.skin_width),
            ledge.bounds.max.y + half.y + tuning.skin_width,
        );
        let control = Vec2::new(state.position.x, end.y + tuning.ledge_vault_lift);

        state.bezier.start = state.position;
        state.bezier.control = control;
        state.bezier.end = end;
        state.bezier.distance = 0.0;
        state.velocity = Vec2::ZERO;
        state.ledge.ledge_climb_in_progress = true;
        self.transitioning_to = ClimbState::NotClimbing;
        ctx.input.input_override = true;

        if toward != state.facing {
            state.facing = toward;
            ctx.observer.facing_changed(toward);
        }
        debug!("Ledge vault onto {:?}, landing at {:?}", ledge.id, end);
    }

    /// Advances an in-progress Bezier move. Returns `true` on the tick it
    /// completes.
    pub fn tick_transition(&mut self, state: &mut CharacterState, ctx: &mut TickContext) -> bool {
        if !state.ledge.ledge_climb_in_progress {
            return false;
        }
        let bezier = &mut state.bezier;
        bezier.distance = (bezier.distance + ctx.tuning.bezier_rate * ctx.dt).min(1.0);
        state.position = bezier.point_at(bezier.distance);

        if state.bezier.distance < 1.0 {
            return false;
        }

        state.position = state.bezier.end;
        state.ledge.ledge_climb_in_progress = false;
        self.state = self.transitioning_to;
        ctx.input.input_override = false;
        if self.state == ClimbState::NotClimbing {
            state.ledge.clear();
            self.stop_climbing(state);
        }
        true
    }
}

/// Edge of `bounds` met first when travelling along `sign`.
fn near_edge(bounds: Rect, sign: f32) -> f32 {
    if sign > 0.0 { bounds.min.x } else { bounds.max.x }
}

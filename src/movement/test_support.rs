//! Movement domain: in-memory level and tick harness for tests.

use avian2d::prelude::*;
use bevy::prelude::*;

use crate::movement::{
    Character, ColliderId, CollisionQuery, Facing, GameLayer, MovementInput, MovementObserver,
    MovementTuning, SurfaceHit, TickContext,
};

pub(crate) const DT: f32 = 1.0 / 64.0;
pub(crate) const HALF: Vec2 = Vec2::new(12.0, 24.0);

#[derive(Debug, Clone, Copy)]
struct Solid {
    id: ColliderId,
    bounds: Rect,
    layer: GameLayer,
}

/// Axis-aligned boxes answering casts the way the physics backend does:
/// nearest hit only, and distance zero when the cast starts overlapping.
#[derive(Debug, Default)]
pub(crate) struct BoxWorld {
    solids: Vec<Solid>,
    next_id: u64,
}

impl BoxWorld {
    pub(crate) fn add(&mut self, layer: GameLayer, min: Vec2, max: Vec2) -> ColliderId {
        self.next_id += 1;
        let id = ColliderId(self.next_id);
        self.solids.push(Solid {
            id,
            bounds: Rect { min, max },
            layer,
        });
        id
    }

    pub(crate) fn ground(&mut self, min: Vec2, max: Vec2) -> ColliderId {
        self.add(GameLayer::Ground, min, max)
    }

    pub(crate) fn wall(&mut self, min: Vec2, max: Vec2) -> ColliderId {
        self.add(GameLayer::Wall, min, max)
    }

    /// Contact record for `id`, as a grab caller would receive it.
    pub(crate) fn surface(&self, id: ColliderId) -> SurfaceHit {
        let solid = self
            .solids
            .iter()
            .find(|solid| solid.id == id)
            .expect("unknown collider id");
        SurfaceHit {
            distance: 0.0,
            id,
            bounds: solid.bounds,
        }
    }

    fn nearest(&self, mask: LayerMask, distance: impl Fn(Rect) -> Option<f32>) -> Option<SurfaceHit> {
        let mut best: Option<SurfaceHit> = None;
        for solid in &self.solids {
            if mask.0 & solid.layer.to_bits() == 0 {
                continue;
            }
            let Some(d) = distance(solid.bounds) else {
                continue;
            };
            if best.is_none_or(|hit| d < hit.distance) {
                best = Some(SurfaceHit {
                    distance: d,
                    id: solid.id,
                    bounds: solid.bounds,
                });
            }
        }
        best
    }
}

/// Slab test. Returns the entry distance, zero when `origin` is inside.
fn ray_rect(origin: Vec2, direction: Vec2, max_distance: f32, rect: Rect) -> Option<f32> {
    let mut t_enter = f32::NEG_INFINITY;
    let mut t_exit = f32::INFINITY;
    for axis in 0..2 {
        let o = origin[axis];
        let d = direction[axis];
        let (lo, hi) = (rect.min[axis], rect.max[axis]);
        if d.abs() < f32::EPSILON {
            if o < lo || o > hi {
                return None;
            }
        } else {
            let t1 = (lo - o) / d;
            let t2 = (hi - o) / d;
            t_enter = t_enter.max(t1.min(t2));
            t_exit = t_exit.min(t1.max(t2));
        }
    }
    if t_exit < t_enter || t_exit <= 0.0 {
        return None;
    }
    let t = t_enter.max(0.0);
    (t <= max_distance).then_some(t)
}

impl CollisionQuery for BoxWorld {
    fn cast_box(
        &self,
        origin: Vec2,
        half_extents: Vec2,
        direction: Dir2,
        max_distance: f32,
        mask: LayerMask,
    ) -> Option<SurfaceHit> {
        // A box sweep is a ray against each solid grown by the box.
        self.nearest(mask, |bounds| {
            let grown = Rect {
                min: bounds.min - half_extents,
                max: bounds.max + half_extents,
            };
            ray_rect(origin, *direction, max_distance, grown)
        })
    }

    fn cast_ray(
        &self,
        origin: Vec2,
        direction: Dir2,
        max_distance: f32,
        mask: LayerMask,
    ) -> Option<SurfaceHit> {
        self.nearest(mask, |bounds| {
            ray_rect(origin, *direction, max_distance, bounds)
        })
    }
}

#[derive(Debug, Default)]
pub(crate) struct RecordingObserver {
    pub(crate) facings: Vec<Facing>,
    pub(crate) walls: Vec<ColliderId>,
    pub(crate) ceilings: Vec<ColliderId>,
    pub(crate) violations: Vec<String>,
}

impl MovementObserver for RecordingObserver {
    fn facing_changed(&mut self, facing: Facing) {
        self.facings.push(facing);
    }

    fn touched_wall(&mut self, wall: &SurfaceHit) {
        self.walls.push(wall.id);
    }

    fn touched_ceiling(&mut self, ceiling: &SurfaceHit) {
        self.ceilings.push(ceiling.id);
    }

    fn invariant_violation(&mut self, message: &str) {
        self.violations.push(message.to_string());
    }
}

/// Everything a tick needs besides the character, owned in one place.
pub(crate) struct Harness {
    pub(crate) world: BoxWorld,
    pub(crate) input: MovementInput,
    pub(crate) tuning: MovementTuning,
    pub(crate) observer: RecordingObserver,
    pub(crate) dt: f32,
}

impl Default for Harness {
    fn default() -> Self {
        Self {
            world: BoxWorld::default(),
            input: MovementInput::default(),
            tuning: MovementTuning::default(),
            observer: RecordingObserver::default(),
            dt: DT,
        }
    }
}

impl Harness {
    pub(crate) fn ctx(&mut self) -> TickContext<'_> {
        TickContext {
            input: &mut self.input,
            world: &self.world,
            observer: &mut self.observer,
            tuning: &self.tuning,
            dt: self.dt,
        }
    }

    /// One fixed tick, clearing edge triggers afterwards like the host does.
    pub(crate) fn tick(&mut self, character: &mut Character) {
        let mut ctx = self.ctx();
        character.tick(&mut ctx);
        self.input.jump_just_pressed = false;
        self.input.climb_just_pressed = false;
    }

    pub(crate) fn tick_n(&mut self, character: &mut Character, ticks: usize) {
        for _ in 0..ticks {
            self.tick(character);
        }
    }

    /// A character resting on a floor whose top is at `floor_top`.
    pub(crate) fn standing_at(&self, x: f32, floor_top: f32) -> Character {
        let y = floor_top + self.tuning.skin_width + HALF.y;
        let mut character = Character::new(Vec2::new(x, y), HALF, true);
        character.state.on_ground = true;
        character
    }
}

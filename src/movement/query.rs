//! Movement domain: collision query contract and its avian2d backend.

use avian2d::prelude::*;
use bevy::ecs::system::SystemParam;
use bevy::prelude::*;

use crate::movement::ColliderId;

/// Nearest surface reported by a cast.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SurfaceHit {
    /// Distance travelled along the cast direction before contact.
    pub distance: f32,
    pub id: ColliderId,
    /// World-space bounds of the hit collider.
    pub bounds: Rect,
}

/// Shape casts against level geometry. Implementations report the nearest
/// hit only; `None` means nothing is in range.
pub trait CollisionQuery {
    fn cast_box(
        &self,
        origin: Vec2,
        half_extents: Vec2,
        direction: Dir2,
        max_distance: f32,
        mask: LayerMask,
    ) -> Option<SurfaceHit>;

    fn cast_ray(
        &self,
        origin: Vec2,
        direction: Dir2,
        max_distance: f32,
        mask: LayerMask,
    ) -> Option<SurfaceHit>;
}

/// Level access for the movement systems.
#[derive(SystemParam)]
pub struct LevelQuery<'w, 's> {
    spatial: SpatialQuery<'w, 's>,
    aabbs: Query<'w, 's, &'static ColliderAabb>,
}

impl<'w, 's> LevelQuery<'w, 's> {
    /// Casts issued on behalf of `character`, which never hits itself.
    pub fn for_character(&self, character: Entity) -> CharacterCasts<'_, 'w, 's> {
        CharacterCasts {
            level: self,
            exclude: character,
        }
    }

    fn surface(&self, entity: Entity, distance: f32) -> Option<SurfaceHit> {
        let aabb = self.aabbs.get(entity).ok()?;
        Some(SurfaceHit {
            distance,
            id: ColliderId(entity.to_bits()),
            bounds: Rect {
                min: aabb.min,
                max: aabb.max,
            },
        })
    }
}

pub struct CharacterCasts<'a, 'w, 's> {
    level: &'a LevelQuery<'w, 's>,
    exclude: Entity,
}

impl CharacterCasts<'_, '_, '_> {
    fn filter(&self, mask: LayerMask) -> SpatialQueryFilter {
        SpatialQueryFilter::from_mask(mask).with_excluded_entities([self.exclude])
    }
}

impl CollisionQuery for CharacterCasts<'_, '_, '_> {
    fn cast_box(
        &self,
        origin: Vec2,
        half_extents: Vec2,
        direction: Dir2,
        max_distance: f32,
        mask: LayerMask,
    ) -> Option<SurfaceHit> {
        let shape = Collider::rectangle(half_extents.x * 2.0, half_extents.y * 2.0);
        let hit = self.level.spatial.cast_shape(
            &shape,
            origin,
            0.0,
            direction,
            &ShapeCastConfig::from_max_distance(max_distance),
            &self.filter(mask),
        )?;
        self.level.surface(hit.entity, hit.distance)
    }

    fn cast_ray(
        &self,
        origin: Vec2,
        direction: Dir2,
        max_distance: f32,
        mask: LayerMask,
    ) -> Option<SurfaceHit> {
        let hit =
            self.level
                .spatial
                .cast_ray(origin, direction, max_distance, true, &self.filter(mask))?;
        self.level.surface(hit.entity, hit.distance)
    }
}

//! Headless spatial queries: raycast по коллайдерам сцены
//!
//! Геометрия сцены описывается `bevy_rapier3d::Collider` (ball / cuboid),
//! но лучи считаются аналитически - без rapier physics step, чтобы headless
//! симуляция и тесты работали с MinimalPlugins.
//! Остальные формы коллайдеров игнорируются.

use bevy::prelude::*;
use bevy_rapier3d::prelude::Collider;

use crate::ai::vision::{HitTag, OcclusionQuery, RayHit};

/// Форма коллайдера, поддерживаемая headless raycast'ом
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ColliderShape {
    Ball { radius: f32 },
    Cuboid { half_extents: Vec3 },
}

impl ColliderShape {
    pub fn from_collider(collider: &Collider) -> Option<Self> {
        if let Some(ball) = collider.as_ball() {
            return Some(Self::Ball {
                radius: ball.radius(),
            });
        }
        if let Some(cuboid) = collider.as_cuboid() {
            return Some(Self::Cuboid {
                half_extents: cuboid.half_extents(),
            });
        }
        None
    }
}

#[derive(Debug, Clone, Copy)]
pub struct SceneCollider {
    pub entity: Entity,
    pub center: Vec3,
    pub rotation: Quat,
    pub shape: ColliderShape,
}

/// Snapshot коллайдеров сцены на текущий тик
#[derive(Debug, Clone, Default)]
pub struct SceneColliders {
    colliders: Vec<SceneCollider>,
}

impl SceneColliders {
    pub fn new() -> Self {
        Self::default()
    }

    /// Собирает snapshot из query (неподдерживаемые формы пропускаются)
    pub fn collect<'a>(items: impl IntoIterator<Item = (Entity, &'a Transform, &'a Collider)>) -> Self {
        let mut scene = Self::new();
        for (entity, transform, collider) in items {
            if let Some(shape) = ColliderShape::from_collider(collider) {
                scene.insert(entity, transform, shape);
            }
        }
        scene
    }

    pub fn insert(&mut self, entity: Entity, transform: &Transform, shape: ColliderShape) {
        self.colliders.push(SceneCollider {
            entity,
            center: transform.translation,
            rotation: transform.rotation,
            shape,
        });
    }

    pub fn len(&self) -> usize {
        self.colliders.len()
    }

    pub fn is_empty(&self) -> bool {
        self.colliders.is_empty()
    }

    /// Ближайший hit луча (entity, distance) в пределах `max_distance`
    ///
    /// `exclude` - обычно сам стреляющий/наблюдатель.
    pub fn cast_ray(&self, origin: Vec3, direction: Vec3, max_distance: f32, exclude: Option<Entity>) -> Option<(Entity, f32)> {
        let direction = direction.try_normalize()?;

        self.colliders
            .iter()
            .filter(|c| Some(c.entity) != exclude)
            .filter_map(|c| intersect(c, origin, direction, max_distance).map(|t| (c.entity, t)))
            .min_by(|a, b| a.1.total_cmp(&b.1))
    }
}

fn intersect(collider: &SceneCollider, origin: Vec3, direction: Vec3, max_distance: f32) -> Option<f32> {
    match collider.shape {
        ColliderShape::Ball { radius } => ray_sphere(origin, direction, collider.center, radius, max_distance),
        ColliderShape::Cuboid { half_extents } => {
            // В локальное пространство коробки (OBB → AABB)
            let inverse = collider.rotation.inverse();
            let local_origin = inverse * (origin - collider.center);
            let local_direction = inverse * direction;
            ray_aabb(local_origin, local_direction, -half_extents, half_extents, max_distance)
        }
    }
}

/// Ray vs sphere, `direction` нормализован. Луч изнутри сферы → 0.
fn ray_sphere(origin: Vec3, direction: Vec3, center: Vec3, radius: f32, max_distance: f32) -> Option<f32> {
    let m = origin - center;
    let b = m.dot(direction);
    let c = m.length_squared() - radius * radius;

    if c > 0.0 && b > 0.0 {
        return None; // снаружи и смотрим от сферы
    }

    let discriminant = b * b - c;
    if discriminant < 0.0 {
        return None;
    }

    let t = (-b - discriminant.sqrt()).max(0.0);
    (t <= max_distance).then_some(t)
}

/// Ray vs AABB (slab test)
fn ray_aabb(origin: Vec3, direction: Vec3, min: Vec3, max: Vec3, max_distance: f32) -> Option<f32> {
    let mut t_min = 0.0_f32;
    let mut t_max = max_distance;

    for axis in 0..3 {
        let o = origin[axis];
        let d = direction[axis];

        if d.abs() < f32::EPSILON {
            if o < min[axis] || o > max[axis] {
                return None;
            }
            continue;
        }

        let inv = 1.0 / d;
        let t1 = (min[axis] - o) * inv;
        let t2 = (max[axis] - o) * inv;
        t_min = t_min.max(t1.min(t2));
        t_max = t_max.min(t1.max(t2));

        if t_min > t_max {
            return None;
        }
    }

    Some(t_min)
}

/// Occlusion query для одного наблюдателя: hit по `target` → HitTag::Target
pub struct TargetOcclusion<'a> {
    pub scene: &'a SceneColliders,
    pub target: Entity,
    /// Коллайдер самого наблюдателя (луч стартует внутри него)
    pub observer: Entity,
}

impl OcclusionQuery for TargetOcclusion<'_> {
    fn query_first_hit(&self, origin: Vec3, direction: Vec3, max_distance: f32) -> Option<RayHit> {
        let (entity, distance) = self
            .scene
            .cast_ray(origin, direction, max_distance, Some(self.observer))?;

        let tag = if entity == self.target {
            HitTag::Target
        } else {
            HitTag::Obstacle
        };
        Some(RayHit { tag, distance })
    }
}

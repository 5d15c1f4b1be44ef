//! Vision - FOV cone + occlusion raycast
//!
//! Порядок проверки:
//! 1. Направление от глаз (позиция + eye_height вверх) к цели
//! 2. Угол к forward > fov/2 → не видим (без raycast)
//! 3. Raycast от глаз к цели до max_distance
//! 4. Видим ТОЛЬКО если первый hit помечен как target
//!
//! Промах луча = не видим: probe подтверждает конкретную цель,
//! а не просто отсутствие препятствий.

use bevy::prelude::*;

/// Что луч встретил первым
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Reflect)]
pub enum HitTag {
    /// Сама цель (игрок)
    Target,
    /// Стена, объект, другой актор - всё что не цель
    Obstacle,
}

/// Первый hit луча
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RayHit {
    pub tag: HitTag,
    pub distance: f32,
}

/// Occlusion query (raycast по геометрии сцены) - предоставляется host'ом
///
/// `None` = ничего не задето ИЛИ query недоступен. Оба случая трактуются
/// как "не видим" (fail safe в сторону патруля).
pub trait OcclusionQuery {
    fn query_first_hit(&self, origin: Vec3, direction: Vec3, max_distance: f32) -> Option<RayHit>;
}

impl<F> OcclusionQuery for F
where
    F: Fn(Vec3, Vec3, f32) -> Option<RayHit>,
{
    fn query_first_hit(&self, origin: Vec3, direction: Vec3, max_distance: f32) -> Option<RayHit> {
        self(origin, direction, max_distance)
    }
}

/// Host без физики: ничего не видно никогда
pub struct NoOcclusion;

impl OcclusionQuery for NoOcclusion {
    fn query_first_hit(&self, _origin: Vec3, _direction: Vec3, _max_distance: f32) -> Option<RayHit> {
        None
    }
}

/// FOV, начиная с которого угловая проверка отключена
pub const FULL_FIELD_OF_VIEW: f32 = 360.0;

/// Vision probe: FOV cone + raycast подтверждение
pub struct VisibilityProbe<'q, Q: OcclusionQuery + ?Sized> {
    occlusion: &'q Q,
    /// Высота глаз над базовой позицией (уровень груди)
    eye_height: f32,
}

impl<'q, Q: OcclusionQuery + ?Sized> VisibilityProbe<'q, Q> {
    pub fn new(occlusion: &'q Q, eye_height: f32) -> Self {
        Self {
            occlusion,
            eye_height,
        }
    }

    pub fn eye_position(&self, observer_position: Vec3) -> Vec3 {
        observer_position + Vec3::Y * self.eye_height
    }

    pub fn can_see(
        &self,
        observer_position: Vec3,
        observer_forward: Vec3,
        target_position: Vec3,
        fov_degrees: f32,
        max_distance: f32,
    ) -> bool {
        let eye = self.eye_position(observer_position);
        let Some(direction) = (target_position - eye).try_normalize() else {
            // Цель ровно в точке глаз - луч не определён
            return false;
        };

        if fov_degrees < FULL_FIELD_OF_VIEW {
            let Some(forward) = observer_forward.try_normalize() else {
                return false;
            };
            let angle = forward.angle_between(direction).to_degrees();
            if angle > fov_degrees / 2.0 {
                crate::logger::log(&format!(
                    "vision: target outside FOV ({:.1}° > {:.1}°)",
                    angle,
                    fov_degrees / 2.0
                ));
                return false;
            }
        }

        match self.occlusion.query_first_hit(eye, direction, max_distance) {
            Some(RayHit { tag: HitTag::Target, distance }) => {
                crate::logger::log(&format!("vision: target confirmed at {:.2}m", distance));
                true
            }
            Some(RayHit { tag: HitTag::Obstacle, distance }) => {
                crate::logger::log(&format!("vision: view blocked at {:.2}m", distance));
                false
            }
            None => {
                crate::logger::log("vision: ray hit nothing");
                false
            }
        }
    }
}

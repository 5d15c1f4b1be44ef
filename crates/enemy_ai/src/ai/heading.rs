//! Heading helpers (yaw в горизонтальной плоскости XZ)
//!
//! Facing агента - горизонтальный unit вектор. Yaw считается вокруг +Y:
//! `Quat::from_rotation_y(yaw) * Vec3::Z` даёт направление с этим yaw.

use bevy::prelude::*;
use std::f32::consts::{PI, TAU};

/// Минимальная длина горизонтальной проекции, ниже которой направление не определено
const MIN_FLAT_LENGTH: f32 = 1e-4;

/// Проекция на XZ + normalize. `None` если вектор (почти) вертикальный или нулевой.
pub fn flatten(direction: Vec3) -> Option<Vec3> {
    let flat = Vec3::new(direction.x, 0.0, direction.z);
    if flat.length_squared() < MIN_FLAT_LENGTH * MIN_FLAT_LENGTH {
        return None;
    }
    Some(flat.normalize())
}

/// Горизонтальное направление from → to
pub fn heading_between(from: Vec3, to: Vec3) -> Option<Vec3> {
    flatten(to - from)
}

pub fn yaw_of(direction: Vec3) -> f32 {
    direction.x.atan2(direction.z)
}

pub fn from_yaw(yaw: f32) -> Vec3 {
    Quat::from_rotation_y(yaw) * Vec3::Z
}

/// Нормализует угол в (-PI, PI]
pub fn wrap_angle(angle: f32) -> f32 {
    let mut wrapped = angle.rem_euclid(TAU);
    if wrapped > PI {
        wrapped -= TAU;
    }
    wrapped
}

/// Signed угол (радианы) поворота от `from` к `to` вокруг +Y
pub fn signed_yaw_delta(from: Vec3, to: Vec3) -> f32 {
    wrap_angle(yaw_of(to) - yaw_of(from))
}

/// Поворачивает `from` к `to` не больше чем на `max_step` радиан
pub fn rotate_towards(from: Vec3, to: Vec3, max_step: f32) -> Vec3 {
    let delta = signed_yaw_delta(from, to);
    if delta.abs() <= max_step {
        return to;
    }
    from_yaw(yaw_of(from) + max_step.copysign(delta))
}

//! First-person look: pitch камеры + yaw тела
//!
//! Binding устройств (мышь / геймпад) - вне крейта: host пишет LookInput.

use bevy::prelude::*;

/// Ограничение pitch (градусы)
pub const PITCH_LIMIT_DEGREES: f32 = 80.0;

/// Look контроллер игрока
///
/// `pitch` - наклон камеры в градусах (положительный = вниз, input вверх уменьшает pitch),
/// yaw применяется к Transform тела напрямую.
#[derive(Component, Debug, Clone, Copy, Reflect)]
#[reflect(Component)]
pub struct LookController {
    pub pitch: f32,
    /// Градусы yaw на единицу input в секунду
    pub sensitivity_x: f32,
    pub sensitivity_y: f32,
}

impl Default for LookController {
    fn default() -> Self {
        Self {
            pitch: 0.0,
            sensitivity_x: 30.0,
            sensitivity_y: 30.0,
        }
    }
}

impl LookController {
    /// Применяет input: возвращает yaw (градусы), на который нужно повернуть тело
    pub fn process(&mut self, input: Vec2, dt: f32) -> f32 {
        self.pitch -= input.y * dt * self.sensitivity_y;
        self.pitch = self.pitch.clamp(-PITCH_LIMIT_DEGREES, PITCH_LIMIT_DEGREES);
        input.x * dt * self.sensitivity_x
    }

    /// Локальный поворот камеры (только pitch)
    pub fn camera_rotation(&self) -> Quat {
        // Bevy: положительный поворот вокруг +X поднимает взгляд
        Quat::from_rotation_x(-self.pitch.to_radians())
    }
}

/// Event: look input за кадр (x - yaw, y - pitch)
#[derive(Event, Debug, Clone, Copy)]
pub struct LookInput {
    pub entity: Entity,
    pub delta: Vec2,
}

/// Система: LookInput → pitch + yaw тела
pub fn apply_look_input(
    mut inputs: EventReader<LookInput>,
    mut players: Query<(&mut LookController, &mut Transform)>,
    time: Res<Time<Fixed>>,
) {
    let dt = time.delta_secs();

    for input in inputs.read() {
        let Ok((mut look, mut transform)) = players.get_mut(input.entity) else {
            continue;
        };
        let yaw = look.process(input.delta, dt);
        transform.rotate_y(yaw.to_radians());
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_pitch_clamps_both_ways() {
        let mut look = LookController::default();

        look.process(Vec2::new(0.0, -1000.0), 1.0);
        assert_eq!(look.pitch, PITCH_LIMIT_DEGREES);

        look.process(Vec2::new(0.0, 1000.0), 1.0);
        assert_eq!(look.pitch, -PITCH_LIMIT_DEGREES);
    }

    #[test]
    fn test_yaw_scales_with_dt_and_sensitivity() {
        let mut look = LookController {
            sensitivity_x: 90.0,
            ..default()
        };

        let yaw = look.process(Vec2::new(2.0, 0.0), 0.5);
        assert_relative_eq!(yaw, 90.0);
        assert_eq!(look.pitch, 0.0);
    }

    #[test]
    fn test_positive_pitch_looks_down() {
        let look = LookController {
            pitch: 30.0,
            ..default()
        };
        let forward = look.camera_rotation() * Vec3::NEG_Z;
        assert_relative_eq!(forward.x, 0.0);
        assert_relative_eq!(forward.y, -0.5, epsilon = 1e-6);
    }
}

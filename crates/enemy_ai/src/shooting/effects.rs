//! Hit effects (muzzle flash + impact point)
//!
//! Headless: эффект - просто entity с Transform и таймером жизни,
//! визуальный слой рендерит по `kind`.

use bevy::prelude::*;

/// Время жизни эффекта (секунды)
pub const HIT_EFFECT_LIFETIME: f32 = 1.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Reflect)]
pub enum HitEffectKind {
    /// Вспышка у дула (origin выстрела)
    Muzzle,
    /// Точка попадания
    Impact,
}

#[derive(Component, Debug, Clone, Reflect)]
#[reflect(Component)]
pub struct HitEffect {
    pub kind: HitEffectKind,
    /// Оставшееся время жизни
    pub remaining: f32,
}

impl HitEffect {
    pub fn new(kind: HitEffectKind) -> Self {
        Self {
            kind,
            remaining: HIT_EFFECT_LIFETIME,
        }
    }
}

/// Система: tick lifetime → despawn
pub fn expire_hit_effects(mut commands: Commands, mut effects: Query<(Entity, &mut HitEffect)>, time: Res<Time<Fixed>>) {
    let delta = time.delta_secs();

    for (entity, mut effect) in effects.iter_mut() {
        effect.remaining -= delta;
        if effect.remaining <= 0.0 {
            commands.entity(entity).despawn();
        }
    }
}

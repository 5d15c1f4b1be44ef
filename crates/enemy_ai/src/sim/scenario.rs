//! Scripted поведение игрока для headless прогонов

use bevy::prelude::*;
use rand::Rng;

use crate::ai::EnemyBehavior;
use crate::components::{Health, Player};
use crate::shooting::{FireIntent, Weapon};
use crate::sim::rng::DeterministicRng;

/// Случайное блуждание в квадрате [-half_extent, half_extent] по XZ
#[derive(Component, Debug, Clone, Reflect)]
#[reflect(Component)]
pub struct Wanderer {
    pub speed: f32,
    pub half_extent: f32,
    pub goal: Option<Vec3>,
}

impl Default for Wanderer {
    fn default() -> Self {
        Self {
            speed: 1.5,
            half_extent: 12.0,
            goal: None,
        }
    }
}

/// Периодическая стрельба в ближайшего живого врага
#[derive(Component, Debug, Clone, Reflect)]
#[reflect(Component)]
pub struct AutoFire {
    /// Интервал между выстрелами (секунды)
    pub interval: f32,
    pub cooldown: f32,
    /// Высота дула над позицией игрока
    pub muzzle_height: f32,
}

impl Default for AutoFire {
    fn default() -> Self {
        Self {
            interval: 1.5,
            cooldown: 1.5,
            muzzle_height: 0.5,
        }
    }
}

/// Система: блуждание (новая цель - из DeterministicRng)
pub fn wander_players(
    mut rng: ResMut<DeterministicRng>,
    mut wanderers: Query<(&mut Transform, &mut Wanderer)>,
    time: Res<Time<Fixed>>,
) {
    let delta = time.delta_secs();

    for (mut transform, mut wanderer) in wanderers.iter_mut() {
        let goal = match wanderer.goal {
            Some(goal) if transform.translation.distance(goal) > 0.05 => goal,
            _ => {
                let extent = wanderer.half_extent.max(0.1);
                let goal = Vec3::new(
                    rng.rng.gen_range(-extent..extent),
                    transform.translation.y,
                    rng.rng.gen_range(-extent..extent),
                );
                wanderer.goal = Some(goal);
                goal
            }
        };

        let to_goal = goal - transform.translation;
        let step = wanderer.speed * delta;
        if to_goal.length() <= step {
            transform.translation = goal;
        } else {
            transform.translation += to_goal.normalize() * step;
        }
    }
}

/// Система: AutoFire → FireIntent в ближайшего живого врага в пределах range
pub fn auto_fire(
    mut shooters: Query<(Entity, &Transform, &mut AutoFire, Option<&Weapon>, Option<&Health>), With<Player>>,
    enemies: Query<(&Transform, &EnemyBehavior), Without<Player>>,
    mut fire_events: EventWriter<FireIntent>,
    time: Res<Time<Fixed>>,
) {
    let delta = time.delta_secs();

    for (shooter, transform, mut auto_fire, weapon, health) in shooters.iter_mut() {
        if health.is_some_and(|h| !h.is_alive()) {
            continue;
        }

        auto_fire.cooldown -= delta;
        if auto_fire.cooldown > 0.0 {
            continue;
        }

        let range = weapon.copied().unwrap_or_default().range;
        let origin = transform.translation + Vec3::Y * auto_fire.muzzle_height;

        let nearest = enemies
            .iter()
            .filter(|(_, behavior)| !behavior.is_dead())
            .map(|(enemy_transform, _)| enemy_transform.translation)
            .filter(|position| position.distance(origin) <= range)
            .min_by(|a, b| a.distance(origin).total_cmp(&b.distance(origin)));

        let Some(target) = nearest else {
            continue;
        };

        auto_fire.cooldown = auto_fire.interval;
        fire_events.write(FireIntent {
            shooter,
            origin,
            direction: target - origin,
        });
    }
}

//! Hitscan оружие
//!
//! Архитектура:
//! - FireIntent - "хочу выстрелить" (input / сценарий / тест)
//! - process_fire_intents - raycast + эффекты + урон
//! - Промах (ничего в пределах range) - ни эффектов, ни урона

use bevy::prelude::*;
use bevy_rapier3d::prelude::Collider;

use crate::ai::{EnemyBehavior, EnemyDamaged, EnemyKilled};
use crate::components::Health;
use crate::physics::SceneColliders;
use crate::shooting::effects::{HitEffect, HitEffectKind};

/// Дальность hitscan по умолчанию (метры)
pub const DEFAULT_WEAPON_RANGE: f32 = 100.0;

/// Оружие стрелка
#[derive(Component, Debug, Clone, Copy, Reflect)]
#[reflect(Component)]
pub struct Weapon {
    pub range: f32,
    pub damage: u32,
}

impl Default for Weapon {
    fn default() -> Self {
        Self {
            range: DEFAULT_WEAPON_RANGE,
            damage: 25,
        }
    }
}

/// Event: выстрел из точки `origin` в направлении `direction`
#[derive(Event, Debug, Clone)]
pub struct FireIntent {
    pub shooter: Entity,
    /// Fire point (дуло)
    pub origin: Vec3,
    pub direction: Vec3,
}

/// Система: обработка FireIntent
///
/// Стрелок без `Weapon` стреляет оружием по умолчанию.
pub fn process_fire_intents(
    mut commands: Commands,
    mut intents: EventReader<FireIntent>,
    weapons: Query<&Weapon>,
    colliders: Query<(Entity, &Transform, &Collider)>,
    mut enemies: Query<&mut Health, With<EnemyBehavior>>,
    mut damaged_events: EventWriter<EnemyDamaged>,
    mut killed_events: EventWriter<EnemyKilled>,
) {
    if intents.is_empty() {
        return;
    }
    let scene = SceneColliders::collect(colliders.iter());

    for intent in intents.read() {
        let weapon = weapons.get(intent.shooter).copied().unwrap_or_default();

        let Some((hit_entity, distance)) =
            scene.cast_ray(intent.origin, intent.direction, weapon.range, Some(intent.shooter))
        else {
            crate::logger::log(&format!("🔫 {:?} missed", intent.shooter));
            continue;
        };

        let Some(direction) = intent.direction.try_normalize() else {
            continue;
        };
        let impact_point = intent.origin + direction * distance;

        commands.spawn((
            Transform::from_translation(intent.origin),
            HitEffect::new(HitEffectKind::Muzzle),
        ));
        commands.spawn((
            Transform::from_translation(impact_point),
            HitEffect::new(HitEffectKind::Impact),
        ));

        crate::logger::log(&format!(
            "🔫 {:?} hit {:?} at {:.2}m",
            intent.shooter, hit_entity, distance
        ));

        let Ok(mut health) = enemies.get_mut(hit_entity) else {
            continue;
        };

        let was_alive = health.is_alive();
        health.take_damage(weapon.damage);

        damaged_events.write(EnemyDamaged {
            enemy: hit_entity,
            attacker: Some(intent.shooter),
            amount: weapon.damage,
        });

        if was_alive && !health.is_alive() {
            killed_events.write(EnemyKilled { enemy: hit_entity });
            crate::logger::log_info(&format!("💀 Enemy {:?} killed by {:?}", hit_entity, intent.shooter));
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::logger::{set_logger, LogLevel, LogPrinter};
    use bevy::ecs::system::RunSystemOnce;
    use std::sync::{Arc, Mutex};

    fn world_with_events() -> World {
        let mut world = World::new();
        world.init_resource::<Events<FireIntent>>();
        world.init_resource::<Events<EnemyDamaged>>();
        world.init_resource::<Events<EnemyKilled>>();
        world
    }

    fn fire(world: &mut World, shooter: Entity, direction: Vec3) {
        world.send_event(FireIntent {
            shooter,
            origin: Vec3::new(0.0, 1.0, 0.0),
            direction,
        });
        world.run_system_once(process_fire_intents).unwrap();
        // Новая система при каждом run читает буфер с начала
        world.resource_mut::<Events<FireIntent>>().clear();
    }

    fn count_effects(world: &mut World) -> usize {
        world.query::<&HitEffect>().iter(world).count()
    }

    #[test]
    fn test_hit_spawns_muzzle_and_impact() {
        let mut world = world_with_events();
        let shooter = world.spawn(Weapon::default()).id();
        world.spawn((Transform::from_xyz(0.0, 1.0, 20.0), Collider::cuboid(2.0, 2.0, 0.5)));

        fire(&mut world, shooter, Vec3::Z);

        let mut kinds: Vec<_> = world.query::<&HitEffect>().iter(&world).map(|e| e.kind).collect();
        kinds.sort_by_key(|k| *k as u8);
        assert_eq!(kinds, vec![HitEffectKind::Muzzle, HitEffectKind::Impact]);

        let impact = world
            .query::<(&HitEffect, &Transform)>()
            .iter(&world)
            .find(|(e, _)| e.kind == HitEffectKind::Impact)
            .map(|(_, t)| t.translation)
            .unwrap();
        assert!((impact.z - 19.5).abs() < 1e-4);
    }

    #[test]
    fn test_miss_spawns_nothing() {
        let mut world = world_with_events();
        let shooter = world.spawn(Weapon::default()).id();
        // Дальше weapon range
        world.spawn((Transform::from_xyz(0.0, 1.0, 150.0), Collider::ball(1.0)));

        fire(&mut world, shooter, Vec3::Z);
        assert_eq!(count_effects(&mut world), 0);
    }

    #[test]
    fn test_enemy_takes_damage_and_dies() {
        let mut world = world_with_events();
        let shooter = world
            .spawn(Weapon {
                range: 50.0,
                damage: 60,
            })
            .id();
        let enemy = world
            .spawn((
                Transform::from_xyz(0.0, 1.0, 10.0),
                Collider::ball(0.5),
                Health::new(100),
                EnemyBehavior::new(Default::default(), Vec::new()),
            ))
            .id();

        fire(&mut world, shooter, Vec3::Z);
        assert_eq!(world.get::<Health>(enemy).unwrap().current, 40);
        assert_eq!(world.resource::<Events<EnemyDamaged>>().len(), 1);
        assert_eq!(world.resource::<Events<EnemyKilled>>().len(), 0);

        fire(&mut world, shooter, Vec3::Z);
        assert_eq!(world.get::<Health>(enemy).unwrap().current, 0);
        assert_eq!(world.resource::<Events<EnemyKilled>>().len(), 1);
    }

    /// Собирает строки логов (sink глобальный - фильтруем по тексту)
    struct CapturingLogger(Arc<Mutex<Vec<(LogLevel, String)>>>);

    impl LogPrinter for CapturingLogger {
        fn log(&self, level: LogLevel, message: &str) {
            if let Ok(mut lines) = self.0.lock() {
                lines.push((level, message.to_string()));
            }
        }
    }

    #[test]
    fn test_kill_is_logged_at_info_level() {
        let lines = Arc::new(Mutex::new(Vec::new()));
        set_logger(Box::new(CapturingLogger(lines.clone())));

        let mut world = world_with_events();
        let shooter = world
            .spawn(Weapon {
                range: 50.0,
                damage: 500,
            })
            .id();
        let enemy = world
            .spawn((
                Transform::from_xyz(0.0, 1.0, 10.0),
                Collider::ball(0.5),
                Health::new(100),
                EnemyBehavior::new(Default::default(), Vec::new()),
            ))
            .id();
        fire(&mut world, shooter, Vec3::Z);

        // Соседние тесты в других World'ах могут убить entity с тем же id
        let needle = format!("Enemy {:?} killed by", enemy);
        let lines = lines.lock().unwrap();
        let kills: Vec<_> = lines.iter().filter(|(_, m)| m.contains(&needle)).collect();
        assert!(!kills.is_empty());
        for (level, message) in kills {
            assert_eq!(*level, LogLevel::Info);
            // Уровень печатает принтер, в самом сообщении его нет
            assert!(!message.contains("INFO"), "{message}");
        }
    }

    #[test]
    fn test_shooter_collider_is_ignored() {
        let mut world = world_with_events();
        let shooter = world
            .spawn((Transform::from_xyz(0.0, 1.0, 0.0), Collider::ball(0.5), Weapon::default()))
            .id();
        world.spawn((Transform::from_xyz(0.0, 1.0, 5.0), Collider::ball(1.0)));

        fire(&mut world, shooter, Vec3::Z);
        let impact = world
            .query::<(&HitEffect, &Transform)>()
            .iter(&world)
            .find(|(e, _)| e.kind == HitEffectKind::Impact)
            .map(|(_, t)| t.translation);
        assert_eq!(impact.map(|p| (p.z * 100.0).round() / 100.0), Some(4.0));
    }
}

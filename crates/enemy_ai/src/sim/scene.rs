//! Spawn helpers + snapshot для сравнения детерминизма

use bevy::prelude::*;
use bevy_rapier3d::prelude::Collider;

use crate::ai::{EnemyBehavior, EnemyConfig};
use crate::components::{AnimationState, Health, NavAgent, Player};
use crate::player::LookController;
use crate::shooting::Weapon;
use crate::sim::scenario::{AutoFire, Wanderer};

/// Радиус коллайдера актора (ball вместо capsule - raycast headless)
pub const ACTOR_RADIUS: f32 = 0.5;

/// Entity демо сцены
#[derive(Debug, Clone)]
pub struct DemoScene {
    pub player: Entity,
    pub enemies: Vec<Entity>,
    pub walls: Vec<Entity>,
}

/// Spawn врага: полный набор компонентов для EnemyAIPlugin
pub fn spawn_enemy(world: &mut World, position: Vec3, config: EnemyConfig, waypoints: Vec<Vec3>) -> Entity {
    world
        .spawn((
            Transform::from_translation(position),
            EnemyBehavior::new(config, waypoints),
            NavAgent::default(),
            AnimationState::default(),
            Health::new(100),
            Collider::ball(ACTOR_RADIUS),
        ))
        .id()
}

/// Spawn игрока (цель врагов). Без Wanderer/AutoFire - стоит на месте.
pub fn spawn_player(world: &mut World, position: Vec3) -> Entity {
    world
        .spawn((
            Transform::from_translation(position),
            Player,
            Health::new(100),
            LookController::default(),
            Weapon::default(),
            Collider::ball(ACTOR_RADIUS),
        ))
        .id()
}

/// Spawn стены (box) - препятствие для vision и выстрелов
pub fn spawn_wall(world: &mut World, center: Vec3, half_extents: Vec3) -> Entity {
    world
        .spawn((
            Transform::from_translation(center),
            Collider::cuboid(half_extents.x, half_extents.y, half_extents.z),
        ))
        .id()
}

/// Демо арена: два патрульных, стена, блуждающий стреляющий игрок
pub fn spawn_demo_scene(world: &mut World, config: &EnemyConfig) -> DemoScene {
    let square = vec![
        Vec3::new(0.0, 0.0, 0.0),
        Vec3::new(10.0, 0.0, 0.0),
        Vec3::new(10.0, 0.0, 10.0),
        Vec3::new(0.0, 0.0, 10.0),
    ];
    let line = vec![Vec3::new(-8.0, 0.0, -8.0), Vec3::new(-8.0, 0.0, 6.0)];

    let enemies = vec![
        spawn_enemy(world, square[0], config.clone(), square),
        spawn_enemy(world, line[0], config.clone(), line),
    ];

    let walls = vec![spawn_wall(world, Vec3::new(4.0, 1.0, 4.0), Vec3::new(2.0, 1.0, 0.25))];

    let player = spawn_player(world, Vec3::new(0.0, 1.0, -12.0));
    world
        .entity_mut(player)
        .insert((Wanderer::default(), AutoFire::default()));

    crate::logger::log_info(&format!(
        "demo scene: player {:?}, {} enemies, {} walls",
        player,
        enemies.len(),
        walls.len()
    ));

    DemoScene { player, enemies, walls }
}

/// Snapshot симуляции для сравнения детерминизма
///
/// Враги (state, позиция, health) + игрок (позиция, health), по Entity index.
pub fn simulation_snapshot(world: &mut World) -> Vec<u8> {
    let mut snapshot = Vec::new();

    let mut enemies = world.query::<(Entity, &EnemyBehavior, &Transform, &Health)>();
    let mut rows: Vec<_> = enemies
        .iter(world)
        .map(|(entity, behavior, transform, health)| {
            (
                entity.index(),
                format!("{:?}|{:?}|{}", behavior.state(), transform.translation, health.current),
            )
        })
        .collect();

    let mut players = world.query_filtered::<(Entity, &Transform, &Health), With<Player>>();
    rows.extend(players.iter(world).map(|(entity, transform, health)| {
        (entity.index(), format!("player|{:?}|{}", transform.translation, health.current))
    }));

    // Сортируем по Entity ID для детерминизма
    rows.sort_by_key(|(index, _)| *index);

    for (index, row) in rows {
        snapshot.extend_from_slice(&index.to_le_bytes());
        snapshot.extend_from_slice(row.as_bytes());
    }

    snapshot
}

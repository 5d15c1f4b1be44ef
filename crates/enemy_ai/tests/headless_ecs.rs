//! Integration тесты: полный FixedUpdate pipeline на headless App
//!
//! create_headless_app двигает время вручную (1 fixed tick на update).
//! Первый update имеет нулевую delta - проверки с запасом по тикам.

use bevy::prelude::*;
use enemy_ai::sim::{spawn_enemy, spawn_player, spawn_wall};
use enemy_ai::{
    create_headless_app, AnimationState, AnimationTrigger, EnemyBehavior, EnemyConfig, EnemyState, EnemyStateChanged,
    FireIntent, Health, HitEffect, LookInput, NavAgent, Weapon,
};

#[derive(Resource, Default)]
struct Transitions(Vec<(EnemyState, EnemyState)>);

fn collect_transitions(mut events: EventReader<EnemyStateChanged>, mut transitions: ResMut<Transitions>) {
    for event in events.read() {
        transitions.0.push((event.from, event.to));
    }
}

fn test_app() -> App {
    let mut app = create_headless_app(7);
    app.init_resource::<Transitions>()
        .add_systems(Update, collect_transitions);
    app
}

fn run(app: &mut App, updates: usize) {
    for _ in 0..updates {
        app.update();
    }
}

/// Враг в начале координат, смотрит на +Z, без патруля
fn spawn_watching_enemy(app: &mut App) -> Entity {
    let world = app.world_mut();
    let enemy = spawn_enemy(world, Vec3::ZERO, EnemyConfig::default(), Vec::new());
    world
        .entity_mut(enemy)
        .insert(Transform::from_translation(Vec3::ZERO).looking_to(Vec3::Z, Vec3::Y));
    enemy
}

fn state_of(app: &App, enemy: Entity) -> EnemyState {
    app.world().get::<EnemyBehavior>(enemy).map(|b| b.state()).unwrap()
}

fn effect_count(app: &mut App) -> usize {
    let world = app.world_mut();
    world.query::<&HitEffect>().iter(world).count()
}

#[test]
fn test_visible_player_is_chased() {
    let mut app = test_app();
    let enemy = spawn_watching_enemy(&mut app);
    let player = spawn_player(app.world_mut(), Vec3::new(0.0, 1.0, 6.0));

    run(&mut app, 5);

    assert_eq!(state_of(&app, enemy), EnemyState::Chasing);

    let agent = app.world().get::<NavAgent>(enemy).unwrap();
    let player_position = app.world().get::<Transform>(player).unwrap().translation;
    assert_eq!(agent.destination, Some(player_position));
    assert_eq!(agent.speed, EnemyConfig::default().chase_speed);
    assert!(app.world().get::<AnimationState>(enemy).unwrap().is_running);

    // Сдвинулся к игроку
    assert!(app.world().get::<Transform>(enemy).unwrap().translation.z > 0.0);

    let transitions = &app.world().resource::<Transitions>().0;
    assert!(transitions.contains(&(EnemyState::Patrolling, EnemyState::Chasing)));
}

#[test]
fn test_chase_turns_gradually_towards_player() {
    let mut app = test_app();
    let enemy = spawn_watching_enemy(&mut app);
    // Игрок на ~33.7° правее направления взгляда
    spawn_player(app.world_mut(), Vec3::new(4.0, 1.0, 6.0));

    run(&mut app, 5);
    assert_eq!(state_of(&app, enemy), EnemyState::Chasing);
    assert!(!app.world().get::<NavAgent>(enemy).unwrap().update_rotation);

    // face_target_rate * dt ≈ 8% ошибки за tick: steering не должен snap'ать на цель
    let forward = app.world().get::<Transform>(enemy).unwrap().forward();
    let yaw = forward.x.atan2(forward.z).to_degrees();
    assert!(yaw > 0.5 && yaw < 25.0, "yaw = {yaw}");
}

#[test]
fn test_close_player_is_attacked() {
    let mut app = test_app();
    let enemy = spawn_watching_enemy(&mut app);
    spawn_player(app.world_mut(), Vec3::new(0.0, 1.0, 2.0));

    run(&mut app, 5);

    assert_eq!(state_of(&app, enemy), EnemyState::Attacking);
    assert!(app.world().get::<NavAgent>(enemy).unwrap().stopped);
    let animation = app.world().get::<AnimationState>(enemy).unwrap();
    assert!(animation.is_attacking);
    assert!(!animation.is_running);
}

#[test]
fn test_wall_blocks_vision() {
    let mut app = test_app();
    let enemy = spawn_watching_enemy(&mut app);
    spawn_wall(app.world_mut(), Vec3::new(0.0, 1.0, 3.0), Vec3::new(2.0, 2.0, 0.25));
    spawn_player(app.world_mut(), Vec3::new(0.0, 1.0, 6.0));

    run(&mut app, 20);

    assert_eq!(state_of(&app, enemy), EnemyState::Patrolling);
}

#[test]
fn test_player_behind_is_not_detected() {
    let mut app = test_app();
    let enemy = spawn_watching_enemy(&mut app);
    spawn_player(app.world_mut(), Vec3::new(0.0, 1.0, -6.0));

    run(&mut app, 20);

    assert_eq!(state_of(&app, enemy), EnemyState::Patrolling);
}

#[test]
fn test_shot_from_behind_triggers_chase() {
    let mut app = test_app();
    let enemy = spawn_watching_enemy(&mut app);
    let player = spawn_player(app.world_mut(), Vec3::new(0.0, 1.0, -6.0));

    run(&mut app, 3);
    assert_eq!(state_of(&app, enemy), EnemyState::Patrolling);

    app.world_mut().send_event(FireIntent {
        shooter: player,
        origin: Vec3::new(0.0, 1.0, -6.0),
        direction: Vec3::new(0.0, -1.0, 6.0),
    });
    run(&mut app, 2);

    let damage = Weapon::default().damage;
    assert_eq!(app.world().get::<Health>(enemy).unwrap().current, 100 - damage);
    assert_eq!(state_of(&app, enemy), EnemyState::Chasing);
    assert_eq!(effect_count(&mut app), 2, "muzzle + impact");
}

#[test]
fn test_hit_effects_expire_after_lifetime() {
    let mut app = test_app();
    let player = spawn_player(app.world_mut(), Vec3::ZERO);
    spawn_wall(app.world_mut(), Vec3::new(0.0, 0.0, -5.0), Vec3::ONE);
    run(&mut app, 2);

    app.world_mut().send_event(FireIntent {
        shooter: player,
        origin: Vec3::ZERO,
        direction: Vec3::NEG_Z,
    });
    run(&mut app, 2);
    assert_eq!(effect_count(&mut app), 2);

    // 1s = 64 fixed tick'а
    run(&mut app, 70);
    assert_eq!(effect_count(&mut app), 0);
}

#[test]
fn test_lethal_shot_kills_enemy() {
    let mut app = test_app();
    let enemy = spawn_watching_enemy(&mut app);
    let player = spawn_player(app.world_mut(), Vec3::new(0.0, 1.0, -6.0));
    app.world_mut().entity_mut(player).insert(Weapon {
        range: 100.0,
        damage: 500,
    });
    run(&mut app, 2);

    app.world_mut().send_event(FireIntent {
        shooter: player,
        origin: Vec3::new(0.0, 1.0, -6.0),
        direction: Vec3::new(0.0, -1.0, 6.0),
    });
    run(&mut app, 2);

    assert_eq!(state_of(&app, enemy), EnemyState::Dead);
    assert_eq!(app.world().get::<Health>(enemy).unwrap().current, 0);
    assert!(app.world().get::<NavAgent>(enemy).unwrap().stopped);
    assert_eq!(
        app.world().get::<AnimationState>(enemy).unwrap().pending_triggers,
        vec![AnimationTrigger::Die]
    );

    // Dead терминален: дальше ничего не двигается
    let position = app.world().get::<Transform>(enemy).unwrap().translation;
    run(&mut app, 30);
    assert_eq!(state_of(&app, enemy), EnemyState::Dead);
    assert_eq!(app.world().get::<Transform>(enemy).unwrap().translation, position);
}

#[test]
fn test_look_input_rotates_player() {
    let mut app = test_app();
    let player = spawn_player(app.world_mut(), Vec3::ZERO);
    run(&mut app, 2);

    app.world_mut().send_event(LookInput {
        entity: player,
        delta: Vec2::new(4.0, 0.0),
    });
    run(&mut app, 2);

    let rotation = app.world().get::<Transform>(player).unwrap().rotation;
    assert!(rotation.angle_between(Quat::IDENTITY) > 0.0);
}

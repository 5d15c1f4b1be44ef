//! ECS host для EnemyBehavior
//!
//! Каждый FixedUpdate тик:
//! 1. Snapshot коллайдеров сцены (SceneColliders)
//! 2. Perception: позиция/forward врага, позиция живого игрока, occlusion query
//! 3. `EnemyBehavior::tick` пишет команды в NavAgent + AnimationState
//! 4. Смена варианта FSM → EnemyStateChanged
//!
//! Враги не перекрывают обзор друг другу (их коллайдеры не попадают в snapshot).

use bevy::prelude::*;
use bevy_rapier3d::prelude::Collider;

use crate::ai::behavior::{AnimationFlag, AnimationTrigger, EnemyBehavior, Locomotion, Perception, Presentation};
use crate::ai::events::EnemyStateChanged;
use crate::components::{AnimationState, Health, NavAgent, Player};
use crate::physics::{SceneColliders, TargetOcclusion};

/// Locomotion + Presentation поверх компонентов одного врага
pub struct AgentHost<'a> {
    pub transform: &'a mut Transform,
    pub agent: &'a mut NavAgent,
    pub animation: &'a mut AnimationState,
}

impl Locomotion for AgentHost<'_> {
    fn set_destination(&mut self, position: Vec3) {
        self.agent.set_destination(position);
    }

    fn stop_movement(&mut self) {
        self.agent.stop();
    }

    fn set_speed(&mut self, speed: f32) {
        self.agent.speed = speed;
    }

    fn set_facing(&mut self, direction: Vec3) {
        self.transform.look_to(direction, Vec3::Y);
    }

    fn remaining_distance(&self) -> f32 {
        self.agent.remaining_distance
    }

    fn path_pending(&self) -> bool {
        self.agent.path_pending
    }

    fn set_auto_rotation(&mut self, enabled: bool) {
        self.agent.update_rotation = enabled;
    }
}

impl Presentation for AgentHost<'_> {
    fn set_animation_flag(&mut self, flag: AnimationFlag, value: bool) {
        self.animation.set_flag(flag, value);
    }

    fn trigger_animation(&mut self, trigger: AnimationTrigger) {
        self.animation.trigger(trigger);
    }
}

/// System: tick всех живых врагов
///
/// Цель - единственный живой `Player`. Игрок без Collider никогда не
/// подтверждается raycast'ом (враги его не видят).
pub fn tick_enemy_behaviors(
    mut enemies: Query<
        (Entity, &mut EnemyBehavior, &mut Transform, &mut NavAgent, &mut AnimationState),
        Without<Player>,
    >,
    players: Query<(Entity, &Transform, Option<&Health>), With<Player>>,
    colliders: Query<(Entity, &Transform, &Collider), Without<EnemyBehavior>>,
    time: Res<Time<Fixed>>,
    mut state_events: EventWriter<EnemyStateChanged>,
) {
    let dt = time.delta_secs();
    let scene = SceneColliders::collect(colliders.iter());

    let target = players
        .single()
        .ok()
        .filter(|(_, _, health)| health.is_none_or(|h| h.is_alive()))
        .map(|(entity, transform, _)| (entity, transform.translation));

    for (entity, mut behavior, mut transform, mut agent, mut animation) in enemies.iter_mut() {
        if behavior.is_dead() {
            continue;
        }

        let occlusion = TargetOcclusion {
            scene: &scene,
            target: target.map_or(Entity::PLACEHOLDER, |(player, _)| player),
            observer: entity,
        };
        let perception = Perception {
            self_position: transform.translation,
            self_forward: transform.forward().as_vec3(),
            target_position: target.map(|(_, position)| position),
            occlusion: &occlusion,
        };

        let before = behavior.state();
        let mut host = AgentHost {
            transform: &mut transform,
            agent: &mut agent,
            animation: &mut animation,
        };
        behavior.tick(dt, &perception, &mut host);
        let after = behavior.state();

        if std::mem::discriminant(&before) != std::mem::discriminant(&after) {
            state_events.write(EnemyStateChanged {
                enemy: entity,
                from: before,
                to: after,
            });
        }
    }
}

//! AI reaction systems (damage, death).

use bevy::prelude::*;

use crate::ai::behavior::EnemyBehavior;
use crate::ai::events::{EnemyDamaged, EnemyKilled};
use crate::ai::systems::behavior::AgentHost;
use crate::components::{AnimationState, NavAgent};

/// System: AI реакция на полученный урон
///
/// Враг, которого ранили, в следующем tick'е переходит в Chasing
/// (даже если игрок вне FOV - "ударили в спину → развернулся").
pub fn react_to_damage(mut damage_events: EventReader<EnemyDamaged>, mut enemies: Query<&mut EnemyBehavior>) {
    for event in damage_events.read() {
        let Ok(mut behavior) = enemies.get_mut(event.enemy) else {
            continue;
        };

        behavior.notify_damaged();
        crate::logger::log(&format!(
            "🔥 {:?} hit by {:?} for {} → will chase",
            event.enemy, event.attacker, event.amount
        ));
    }
}

/// System: обработка смерти → EnemyBehavior в Dead state
///
/// Мёртвый враг останавливается, получает Die триггер и больше не тикает.
pub fn handle_enemy_death(
    mut killed_events: EventReader<EnemyKilled>,
    mut enemies: Query<(&mut EnemyBehavior, &mut Transform, &mut NavAgent, &mut AnimationState)>,
) {
    for event in killed_events.read() {
        let Ok((mut behavior, mut transform, mut agent, mut animation)) = enemies.get_mut(event.enemy) else {
            continue;
        };
        if behavior.is_dead() {
            continue;
        }

        let mut host = AgentHost {
            transform: &mut transform,
            agent: &mut agent,
            animation: &mut animation,
        };
        behavior.die(&mut host);
        crate::logger::log_info(&format!("💀 {:?} died → AI disabled (Dead state)", event.enemy));
    }
}

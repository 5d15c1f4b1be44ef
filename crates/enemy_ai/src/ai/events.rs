//! AI Events - сигналы между combat слоем и enemy AI
//!
//! Поток:
//! shooting (hitscan) → EnemyDamaged → react_to_damage → EnemyBehavior::notify_damaged
//! Health == 0 → EnemyKilled → handle_enemy_death → EnemyBehavior::die
//! tick_enemy_behaviors → EnemyStateChanged (для логов / визуального слоя)

use bevy::prelude::*;

use crate::ai::components::EnemyState;

/// Врага ранили (урон уже применён к Health)
#[derive(Event, Debug, Clone)]
pub struct EnemyDamaged {
    pub enemy: Entity,
    /// Кто стрелял (None - урон от окружения)
    pub attacker: Option<Entity>,
    pub amount: u32,
}

/// Health врага дошёл до 0
#[derive(Event, Debug, Clone)]
pub struct EnemyKilled {
    pub enemy: Entity,
}

/// FSM врага сменил состояние (сравнение по варианту, не по таймерам)
#[derive(Event, Debug, Clone)]
pub struct EnemyStateChanged {
    pub enemy: Entity,
    pub from: EnemyState,
    pub to: EnemyState,
}
